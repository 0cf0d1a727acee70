//! Ordered, composable mutations applied to a document while it is built.
//!
//! Every builder in this crate constructs a defaulted document and then folds
//! the caller's options over it in the order given. Options are reusable
//! values: building twice from the same option slice yields equal documents.
use std::fmt;
use std::sync::Arc;

/// A single mutation targeting one document kind (or its spec).
///
/// Options hold no state of their own beyond what they captured at
/// construction, so cloning is cheap and they can be shared across threads.
pub struct Opt<T: ?Sized> {
    label: &'static str,
    apply: Arc<dyn Fn(&mut T) + Send + Sync>,
}

impl<T: ?Sized> Opt<T> {
    /// Wrap a mutation. The label only shows up in logs and `Debug` output.
    pub fn new(label: &'static str, apply: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        Self {
            label,
            apply: Arc::new(apply),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn apply(&self, target: &mut T) {
        (self.apply)(target);
    }
}

impl<T: ?Sized> Clone for Opt<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opt").field(&self.label).finish()
    }
}

/// Apply every option to `target`, strictly in order. Later options win
/// wherever two options write the same field.
pub fn apply_all<T: ?Sized>(target: &mut T, options: &[Opt<T>]) {
    for option in options {
        tracing::trace!(option = option.label(), "apply option");
        option.apply(target);
    }
}

#[cfg(test)]
#[path = "opt_tests.rs"]
mod tests;
