use std::sync::Arc;

use dioxus::prelude::*;

use crate::outlet::NavLink;
use crate::toolkit::{UiToolkit, Variant};

#[component]
pub fn NotFoundView(path: String) -> Element {
    let toolkit = use_context::<Arc<UiToolkit>>();

    rsx! {
        div { class: "page page-not-found",
            h2 { "Page not found" }
            div { class: toolkit.alert_class(Variant::Danger),
                "Nothing lives at "
                code { "{path}" }
            }
            NavLink { to: "Home", "Back to home" }
        }
    }
}
