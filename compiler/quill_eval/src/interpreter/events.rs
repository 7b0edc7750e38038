//! Registry of `on` handlers.

use crate::Value;

struct Handler {
    event: Value,
    function: Value,
}

/// Handlers in registration order. Events are matched by value equality.
#[derive(Default)]
pub(super) struct EventRegistry {
    handlers: Vec<Handler>,
}

impl EventRegistry {
    pub(super) fn register(&mut self, event: Value, function: Value) {
        self.handlers.push(Handler { event, function });
    }

    /// Snapshot of the handlers for `event`. Handlers registered while
    /// these run are not included.
    pub(super) fn handlers_for(&self, event: &Value) -> Vec<Value> {
        self.handlers
            .iter()
            .filter(|handler| handler.event.equals(event))
            .map(|handler| handler.function.clone())
            .collect()
    }

    pub(super) fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(super) fn clear(&mut self) {
        self.handlers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_handlers_match_by_value_in_order() {
        let mut registry = EventRegistry::default();
        registry.register("hit".into(), Value::Number(1.0));
        registry.register("miss".into(), Value::Number(2.0));
        registry.register("hit".into(), Value::Number(3.0));

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.handlers_for(&"hit".into()),
            vec![Value::Number(1.0), Value::Number(3.0)]
        );
        assert!(registry.handlers_for(&Value::Null).is_empty());

        registry.clear();
        assert_eq!(registry.len(), 0);
    }
}
