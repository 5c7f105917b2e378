// src/middleware/correlation.rs
//! Per-task correlation context.
//!
//! Every intercepted handler call runs inside its own [`scope`]. Values put into
//! the context are only visible to the future running inside that scope, so two
//! requests served at the same time never see each other's request id.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

/// Key under which the interceptor stores the generated correlation id.
pub const REQUEST_ID: &str = "requestId";

tokio::task_local! {
    static CONTEXT: RefCell<HashMap<&'static str, String>>;
}

/// Run `fut` with a fresh, empty correlation context.
pub async fn scope<F>(fut: F) -> F::Output
where
    F: Future,
{
    CONTEXT.scope(RefCell::new(HashMap::new()), fut).await
}

/// Store a value in the current context. Outside of a [`scope`] this is a no-op.
pub fn put(key: &'static str, value: impl Into<String>) {
    let value = value.into();
    let _ = CONTEXT.try_with(|ctx| {
        ctx.borrow_mut().insert(key, value);
    });
}

pub fn get(key: &str) -> Option<String> {
    CONTEXT
        .try_with(|ctx| ctx.borrow().get(key).cloned())
        .ok()
        .flatten()
}

/// Correlation id of the invocation currently being intercepted, if any.
pub fn request_id() -> Option<String> {
    get(REQUEST_ID)
}

pub fn clear() {
    let _ = CONTEXT.try_with(|ctx| ctx.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_are_only_visible_inside_scope() {
        assert_eq!(request_id(), None);

        let seen = scope(async {
            put(REQUEST_ID, "abc");
            request_id()
        })
        .await;

        assert_eq!(seen.as_deref(), Some("abc"));
        assert_eq!(request_id(), None);
    }

    #[tokio::test]
    async fn test_put_outside_scope_is_ignored() {
        put(REQUEST_ID, "leaked");
        assert_eq!(request_id(), None);
    }

    #[tokio::test]
    async fn test_clear_empties_context() {
        scope(async {
            put(REQUEST_ID, "abc");
            put("other", "value");
            clear();
            assert_eq!(request_id(), None);
            assert_eq!(get("other"), None);
        })
        .await;
    }

    #[tokio::test]
    async fn test_concurrent_scopes_are_isolated() {
        let first = scope(async {
            put(REQUEST_ID, "first");
            tokio::task::yield_now().await;
            request_id()
        });
        let second = scope(async {
            put(REQUEST_ID, "second");
            tokio::task::yield_now().await;
            request_id()
        });

        let (a, b) = tokio::join!(first, second);
        assert_eq!(a.as_deref(), Some("first"));
        assert_eq!(b.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_nested_scope_restores_outer_value() {
        scope(async {
            put(REQUEST_ID, "outer");
            let inner = scope(async {
                put(REQUEST_ID, "inner");
                request_id()
            })
            .await;
            assert_eq!(inner.as_deref(), Some("inner"));
            assert_eq!(request_id().as_deref(), Some("outer"));
        })
        .await;
    }
}
