use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::shell::ShellError;

/// Typed dependency container handed to every view in the tree.
///
/// Values are keyed by their concrete type, so a consumer asks for exactly
/// the capability it needs: `injector.get::<UiToolkit>()`.
#[derive(Clone, Default)]
pub struct Injector {
    values: HashMap<TypeId, (&'static str, Arc<dyn Any + Send + Sync>)>,
}

impl Injector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under its type.
    ///
    /// # Errors
    ///
    /// `ShellError::DuplicateDependency` if a value of this type is already
    /// registered; the existing value is kept.
    pub fn provide<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> Result<(), ShellError> {
        let key = TypeId::of::<T>();
        if self.values.contains_key(&key) {
            return Err(ShellError::DuplicateDependency {
                type_name: type_name::<T>(),
            });
        }
        self.values.insert(key, (type_name::<T>(), value));
        Ok(())
    }

    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let (_, value) = self.values.get(&TypeId::of::<T>())?;
        Arc::clone(value).downcast::<T>().ok()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.values.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("Injector").field("provided", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Theme(&'static str);

    #[test]
    fn provided_value_is_shared() {
        let mut injector = Injector::new();
        let theme = Arc::new(Theme("dark"));
        injector.provide(Arc::clone(&theme)).unwrap();

        let got = injector.get::<Theme>().unwrap();
        assert!(Arc::ptr_eq(&got, &theme));
        assert!(injector.get::<String>().is_none());
    }

    #[test]
    fn second_provide_of_same_type_is_rejected() {
        let mut injector = Injector::new();
        injector.provide(Arc::new(Theme("dark"))).unwrap();
        let err = injector.provide(Arc::new(Theme("light"))).unwrap_err();
        assert!(matches!(err, ShellError::DuplicateDependency { .. }));
        assert_eq!(*injector.get::<Theme>().unwrap(), Theme("dark"));
        assert_eq!(injector.len(), 1);
    }
}
