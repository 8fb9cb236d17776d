use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use portal_core::{NavigationController, NavigationState, Params, Resolution};

use crate::views::{NotFoundView, ViewCatalog};

/// Current navigation state as a signal.
///
/// The controller pushes every committed transition into a channel; a task
/// owned by the calling component drains it into the signal, so updates
/// arrive in commit order even when several land between renders.
pub fn use_navigation_state() -> Signal<NavigationState> {
    let nav = use_context::<NavigationController>();
    let initial = nav.state();
    let current = use_signal(move || initial);

    let subscription = use_hook(move || {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<NavigationState>();
        let mut current = current;
        spawn(async move {
            while let Some(next) = rx.recv().await {
                current.set(next);
            }
        });
        let subscription = nav.subscribe(move |state| {
            // The receiver is gone once the component unmounts.
            let _ = tx.send(state.clone());
        });
        Rc::new(RefCell::new(Some(subscription)))
    });

    use_drop(move || {
        if let Some(subscription) = subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    });

    current
}

/// Renders the view the current location resolves to, or the not-found page.
#[component]
pub fn RouterOutlet() -> Element {
    let state = use_navigation_state();
    let state = state.read();

    match state.resolution() {
        Resolution::Matched(found) => ViewCatalog::render(found.entry().view()),
        Resolution::NotFound => rsx! {
            NotFoundView { path: state.path().to_string() }
        },
    }
}

/// An anchor that navigates through the controller instead of reloading.
///
/// `to` is a route name or, with a leading `/`, a literal path.
#[component]
pub fn NavLink(
    #[props(into)] to: String,
    #[props(default, into)] class: String,
    children: Element,
) -> Element {
    let nav = use_context::<NavigationController>();
    let href = nav
        .href(to.as_str(), &Params::new())
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "link target does not resolve");
            "#".to_string()
        });

    rsx! {
        a {
            class: "{class}",
            href: "{href}",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                if let Err(err) = nav.navigate(to.as_str()) {
                    tracing::warn!(%err, "link navigation rejected");
                }
            },
            {children}
        }
    }
}

/// Back/forward controls plus the current URL, for hosts without browser chrome.
#[component]
pub fn AddressBar() -> Element {
    let nav = use_context::<NavigationController>();
    let state = use_navigation_state();
    let url = nav.base_path().join(&state.read().location().to_string());
    let back = nav.clone();
    let forward = nav.clone();

    rsx! {
        div { class: "address-bar",
            button { r#type: "button", onclick: move |_| back.back(), "‹" }
            button { r#type: "button", onclick: move |_| forward.forward(), "›" }
            code { class: "address-bar-url", "{url}" }
        }
    }
}
