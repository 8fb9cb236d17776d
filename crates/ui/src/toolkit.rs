use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Primary,
    Secondary,
    Danger,
    Link,
}

impl Variant {
    fn suffix(self) -> &'static str {
        match self {
            Variant::Primary => "primary",
            Variant::Secondary => "secondary",
            Variant::Danger => "danger",
            Variant::Link => "link",
        }
    }
}

/// Shared UI-toolkit handle: class names plus modal, dropdown and tooltip
/// behaviour. One instance per session, injected into every view.
#[derive(Debug, Default)]
pub struct UiToolkit {
    open: Mutex<HashSet<String>>,
}

impl UiToolkit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn button_class(&self, variant: Variant) -> String {
        format!("btn btn-{}", variant.suffix())
    }

    #[must_use]
    pub fn alert_class(&self, variant: Variant) -> String {
        format!("alert alert-{}", variant.suffix())
    }

    #[must_use]
    pub fn input_class(&self) -> &'static str {
        "form-control"
    }

    #[must_use]
    pub fn card_class(&self) -> &'static str {
        "card"
    }

    /// Toggles a modal, dropdown or tooltip by id. Returns the new state.
    pub fn toggle(&self, id: &str) -> bool {
        let mut open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if open.remove(id) {
            false
        } else {
            open.insert(id.to_string());
            true
        }
    }

    pub fn close(&self, id: &str) {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    #[must_use]
    pub fn is_open(&self, id: &str) -> bool {
        self.open
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    /// Class for an overlay element given its open state.
    #[must_use]
    pub fn overlay_class(&self, kind: &str, id: &str) -> String {
        if self.is_open(id) {
            format!("{kind} show")
        } else {
            kind.to_string()
        }
    }
}
