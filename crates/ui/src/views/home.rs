use std::sync::Arc;

use dioxus::prelude::*;

use crate::outlet::NavLink;
use crate::toolkit::{UiToolkit, Variant};

const MENU: &str = "home-menu";

#[component]
pub fn HomeView() -> Element {
    let toolkit = use_context::<Arc<UiToolkit>>();
    let mut menu_open = use_signal(|| false);
    let menu_class = if menu_open() {
        "dropdown-menu show"
    } else {
        "dropdown-menu"
    };
    let toggle = Arc::clone(&toolkit);

    rsx! {
        div { class: "page page-home",
            h2 { "Home" }
            p { "Your notes and uploads live here." }
            div { class: "dropdown",
                button {
                    class: toolkit.button_class(Variant::Secondary),
                    r#type: "button",
                    onclick: move |_| menu_open.set(toggle.toggle(MENU)),
                    "Go to"
                }
                ul { class: menu_class,
                    li { NavLink { to: "FileUpload", class: "dropdown-item", "Upload a file" } }
                    li { NavLink { to: "Login", class: "dropdown-item", "Switch account" } }
                }
            }
        }
    }
}
