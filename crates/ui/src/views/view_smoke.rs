use portal_core::{BasePath, HistoryMode, ShellError};

use super::test_harness::{setup_harness_without_toolkit, setup_view_harness};
use crate::app::{MOUNT_POINT, start};

#[test]
fn each_route_renders_its_view() {
    for (path, heading) in [
        ("/", "<h2>Home</h2>"),
        ("/login", "<h2>Log in</h2>"),
        ("/auth", "<h2>Create an account</h2>"),
        ("/fileupload", "<h2>File upload</h2>"),
    ] {
        let mut harness = setup_view_harness("/", path);
        harness.rebuild();
        let html = harness.render();
        assert!(html.contains(heading), "missing {heading} for {path} in {html}");
    }
}

#[test]
fn unknown_path_renders_fallback() {
    let mut harness = setup_view_harness("/", "/unknown");
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Page not found"), "missing fallback in {html}");
    assert!(html.contains("/unknown"), "missing path in {html}");
    assert!(harness.router.state().is_not_found());
}

#[test]
fn links_carry_base_path() {
    let mut harness = setup_view_harness("/portal", "/");
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("href=\"/portal/fileupload\""),
        "missing prefixed link in {html}"
    );
    assert!(html.contains("/portal/"), "missing address in {html}");
}

#[test]
fn missing_toolkit_is_reported_by_the_error_boundary() {
    let mut harness = setup_harness_without_toolkit();
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "no error page in {html}");
    assert!(!html.contains("<h2>Home</h2>"), "view rendered without toolkit: {html}");
}

#[test]
fn shell_is_mounted_once_per_host() {
    let harness = setup_view_harness("/", "/");
    assert!(harness.host.is_mounted(MOUNT_POINT));

    let err = start(HistoryMode::Memory, BasePath::root(), &harness.host).unwrap_err();
    assert!(
        matches!(
            err,
            portal_core::Error::Shell(ShellError::AlreadyMounted { .. })
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn outlet_follows_navigation_after_mount() {
    let mut harness = setup_view_harness("/", "/");
    harness.rebuild();
    assert!(harness.render().contains("<h2>Home</h2>"));

    harness.router.navigate("Auth").expect("navigate");
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("<h2>Create an account</h2>"), "outlet did not update: {html}");

    harness.router.back();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("<h2>Home</h2>"), "outlet did not go back: {html}");
}
