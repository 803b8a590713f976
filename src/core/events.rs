//! Event notification around each write
//!
//! The facade announces `logging.writing` before and `logging.written` after
//! every write. Dispatchers are injected at construction; a facade without one
//! uses [`NoopDispatcher`]. Failures and panics inside a dispatcher are
//! swallowed, so observers can never break logging.

use super::error::Result;
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub const WRITING_EVENT: &str = "logging.writing";
pub const WRITTEN_EVENT: &str = "logging.written";

pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event: &str, payload: &Value) -> Result<()>;
}

/// Dispatcher that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatcher;

impl EventDispatcher for NoopDispatcher {
    fn dispatch(&self, _event: &str, _payload: &Value) -> Result<()> {
        Ok(())
    }
}

impl<F> EventDispatcher for F
where
    F: Fn(&str, &Value) -> Result<()> + Send + Sync,
{
    fn dispatch(&self, event: &str, payload: &Value) -> Result<()> {
        self(event, payload)
    }
}

/// Deliver one event, discarding errors and panics
pub(crate) fn dispatch_quietly(dispatcher: &dyn EventDispatcher, event: &str, payload: &Value) {
    let _ = catch_unwind(AssertUnwindSafe(|| dispatcher.dispatch(event, payload)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex;
    use serde_json::json;

    #[test]
    fn test_closure_dispatcher_receives_events() {
        let seen = Mutex::new(Vec::new());
        let dispatcher = |event: &str, payload: &Value| -> Result<()> {
            seen.lock().push((event.to_string(), payload.clone()));
            Ok(())
        };

        dispatch_quietly(&dispatcher, WRITING_EVENT, &json!({"channel": "app"}));
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "logging.writing");
        assert_eq!(seen[0].1["channel"], "app");
    }

    #[test]
    fn test_errors_are_swallowed() {
        let dispatcher = |event: &str, _: &Value| -> Result<()> {
            Err(LoggerError::dispatch(event, "listener failed"))
        };
        dispatch_quietly(&dispatcher, WRITTEN_EVENT, &Value::Null);
    }

    #[test]
    fn test_panics_are_swallowed() {
        let dispatcher = |_: &str, _: &Value| -> Result<()> { panic!("observer bug") };
        dispatch_quietly(&dispatcher, WRITTEN_EVENT, &Value::Null);
    }

    #[test]
    fn test_noop_dispatcher() {
        assert!(NoopDispatcher.dispatch(WRITING_EVENT, &Value::Null).is_ok());
    }
}
