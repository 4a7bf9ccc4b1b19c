//! Handles to application-owned state referenced from the component tree.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A cloneable reference to mutable state owned by the application.
///
/// Widgets such as scroll views, lists, text inputs, modals and toasts do not
/// own the values they edit. The application creates a `Shared<T>`, keeps one
/// clone for itself, and hands another to the builder each frame. Dropping a
/// tree only drops the tree's clone; the value lives for as long as the
/// application holds a handle.
///
/// Handles are `Send + Sync` so background work can update a value and then
/// call [`RenderHandle::request_render`](crate::runtime::RenderHandle::request_render).
///
/// ```rust,ignore
/// let count = Shared::new(0);
/// let c = count.clone();
/// let incr = Callback::new(move || c.update(|n| *n += 1));
/// ```
pub struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    /// Wrap a value in a new handle.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        *self.lock() = value;
    }

    /// Mutate the stored value in place and return the closure's result.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    /// Read the stored value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock())
    }

    /// Whether two handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        // A panic while another handle held the lock leaves the value usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Shared<T> {
    /// Return a copy of the stored value.
    pub fn get(&self) -> T {
        self.lock().clone()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|v| f.debug_tuple("Shared").field(v).finish())
    }
}
