use std::sync::Arc;

/// The interface for route and filter handlers.
///
/// A handler is an opaque capability: it receives the surrounding pipeline's context `C` and acts
/// on it. The router never calls handlers itself; it only hands back the one(s) that matched.
///
/// Any `Fn(&mut C)` that is `Send + Sync` is a handler.
///
/// # Examples
/// ```
/// use waymark::{handler, BoxHandler, Handler};
///
/// let greet: BoxHandler<String> = handler(|out: &mut String| out.push_str("hello"));
///
/// let mut out = String::new();
/// greet.call(&mut out);
/// assert_eq!(out, "hello");
/// ```
pub trait Handler<C>: Send + Sync {
    fn call(&self, ctx: &mut C);
}

impl<C, F> Handler<C> for F
where
    F: Fn(&mut C) + Send + Sync,
{
    #[inline]
    fn call(&self, ctx: &mut C) {
        (self)(ctx)
    }
}

/// Shared, type-erased handler.
pub type BoxHandler<C> = Arc<dyn Handler<C>>;

/// Erases the type of `handler`.
pub fn handler<C, H>(handler: H) -> BoxHandler<C>
where
    H: Handler<C> + 'static,
{
    Arc::new(handler)
}
