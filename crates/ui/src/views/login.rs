use std::sync::Arc;

use dioxus::prelude::*;

use crate::outlet::NavLink;
use crate::toolkit::{UiToolkit, Variant};

#[component]
pub fn LoginView() -> Element {
    let toolkit = use_context::<Arc<UiToolkit>>();

    rsx! {
        div { class: "page page-login",
            h2 { "Log in" }
            form { class: toolkit.card_class(),
                onsubmit: move |evt: FormEvent| evt.prevent_default(),
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    class: toolkit.input_class(),
                    r#type: "email",
                    name: "email",
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    class: toolkit.input_class(),
                    r#type: "password",
                    name: "password",
                }
                button {
                    class: toolkit.button_class(Variant::Primary),
                    r#type: "submit",
                    "Log in"
                }
            }
            p {
                "No account yet? "
                NavLink { to: "Auth", "Register" }
            }
        }
    }
}
