use std::sync::Arc;

use dioxus::prelude::*;

use crate::outlet::NavLink;
use crate::toolkit::{UiToolkit, Variant};

#[component]
pub fn AuthView() -> Element {
    let toolkit = use_context::<Arc<UiToolkit>>();

    rsx! {
        div { class: "page page-auth",
            h2 { "Create an account" }
            div { class: toolkit.alert_class(Variant::Secondary),
                "Accounts are confirmed by email before the first upload."
            }
            p {
                "Already registered? "
                NavLink { to: "Login", "Log in" }
            }
        }
    }
}
