//! Actions fired by widgets in response to input.
//!
//! Widgets never call raw function pointers. A button holds a [`Callback`], a
//! list holds a [`SelectCallback`], and the dispatcher invokes them. Because
//! the handlers are ordinary closures they can mutate a [`Shared`](crate::Shared)
//! value, post a message to a channel, or record calls in a test.

use std::fmt;
use std::sync::Arc;

/// A shareable, argument-less action.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    /// Wrap a closure.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// An action that sends a clone of `msg` on `tx` each time it fires.
    ///
    /// Send errors (receiver dropped) are ignored.
    pub fn post<M>(tx: tokio::sync::mpsc::UnboundedSender<M>, msg: M) -> Self
    where
        M: Clone + Send + Sync + 'static,
    {
        Self::new(move || {
            let _ = tx.send(msg.clone());
        })
    }

    /// Run the action.
    pub fn call(&self) {
        (self.0)()
    }
}

impl<F> From<F> for Callback
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A shareable action receiving the index of the chosen item.
#[derive(Clone)]
pub struct SelectCallback(Arc<dyn Fn(usize) + Send + Sync>);

impl SelectCallback {
    /// Wrap a closure.
    pub fn new(f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the action for `index`.
    pub fn call(&self, index: usize) {
        (self.0)(index)
    }
}

impl<F> From<F> for SelectCallback
where
    F: Fn(usize) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl fmt::Debug for SelectCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectCallback(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shared;

    #[test]
    fn callback_mutates_shared_state() {
        let hits = Shared::new(0);
        let h = hits.clone();
        let cb = Callback::new(move || h.update(|n| *n += 1));
        cb.call();
        cb.clone().call();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn post_sends_message() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let cb = Callback::post(tx, "saved");
        cb.call();
        assert_eq!(rx.try_recv().ok(), Some("saved"));
    }

    #[test]
    fn select_callback_receives_index() {
        let picked = Shared::new(None);
        let p = picked.clone();
        let cb = SelectCallback::new(move |i| p.set(Some(i)));
        cb.call(4);
        assert_eq!(picked.get(), Some(4));
    }

    #[test]
    fn closures_convert_into_actions() {
        let hits = Shared::new(0);
        let h = hits.clone();
        let cb: Callback = (move || h.update(|n| *n += 10)).into();
        cb.call();
        let h = hits.clone();
        let pick: SelectCallback = (move |i: usize| h.update(|n| *n += i)).into();
        pick.call(2);
        assert_eq!(hits.get(), 12);
    }
}
