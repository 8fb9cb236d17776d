use std::sync::Arc;

use dioxus::prelude::*;

use crate::toolkit::{UiToolkit, Variant};

const HELP: &str = "upload-help";

#[component]
pub fn FileUploadView() -> Element {
    let toolkit = use_context::<Arc<UiToolkit>>();
    let mut help_open = use_signal(|| false);
    let modal_class = if help_open() { "modal show" } else { "modal" };
    let open = Arc::clone(&toolkit);
    let close = Arc::clone(&toolkit);

    rsx! {
        div { class: "page page-upload",
            h2 { "File upload" }
            div { class: toolkit.card_class(),
                input {
                    class: toolkit.input_class(),
                    r#type: "file",
                    name: "file",
                }
                button {
                    class: toolkit.button_class(Variant::Link),
                    r#type: "button",
                    onclick: move |_| help_open.set(open.toggle(HELP)),
                    "What can I upload?"
                }
            }
            div { class: modal_class, "role": "dialog",
                div { class: "modal-body",
                    p { "Plain text and markdown files up to 10 MB." }
                    button {
                        class: toolkit.button_class(Variant::Primary),
                        r#type: "button",
                        onclick: move |_| {
                            close.close(HELP);
                            help_open.set(false);
                        },
                        "Close"
                    }
                }
            }
        }
    }
}
