use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use portal_core::{
    BasePath, Dependencies, HistoryMode, HostDocument, MountedApp, NavigationController, Shell,
};

use crate::app::{App, AppFrame, MOUNT_POINT, RootComponent, start};
use crate::routes;

#[derive(Props, Clone)]
struct HarnessProps {
    app: MountedApp<RootComponent>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn Harness(props: HarnessProps) -> Element {
    use_context_provider(|| props.app.clone());
    rsx! { AppFrame {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub router: NavigationController,
    pub host: HostDocument,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Runs spawned tasks and re-renders until the dom goes quiet.
    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let worked = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
            if worked.is_err() {
                break;
            }
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Starts the real shell in memory mode, positioned at `path`.
pub fn setup_view_harness(base: &str, path: &str) -> ViewHarness {
    let host = HostDocument::new();
    let app = start(HistoryMode::Memory, BasePath::new(base), &host).expect("start shell");
    let router = app.router().clone();
    if path != "/" {
        router.navigate(path).expect("navigate");
    }

    let dom = VirtualDom::new_with_props(Harness, HarnessProps { app });
    ViewHarness { dom, router, host }
}

/// A shell started with a placeholder dependency instead of the UI toolkit.
pub fn setup_harness_without_toolkit() -> ViewHarness {
    let host = HostDocument::new();
    let table = routes::build().expect("route table");
    let router = NavigationController::create(table, HistoryMode::Memory, BasePath::root());
    let root: RootComponent = App;
    let app = Shell::start(
        root,
        Dependencies { ui: Arc::new(()) },
        router.clone(),
        host.target(MOUNT_POINT),
    )
    .expect("start shell");

    let dom = VirtualDom::new_with_props(Harness, HarnessProps { app });
    ViewHarness { dom, router, host }
}
