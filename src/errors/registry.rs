//! Reason-keyed registry of error prototypes.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::StatusError;

/// Process-wide table mapping a reason to its canonical prototype.
///
/// Components register their error vocabulary once during startup; the
/// inbound wire path reads the table for the rest of the process
/// lifetime. The registry is an explicit value, not hidden global state:
/// construct one at process start and hand it to whatever performs
/// deserialization. Tests build isolated registries per case.
///
/// Writes and reads may interleave freely; the lock guarantees no torn
/// entry is ever observed.
#[derive(Debug, Default)]
pub struct ErrorRegistry {
    slots: RwLock<HashMap<String, StatusError>>,
}

impl ErrorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `proto` under its reason.
    ///
    /// Registering twice under the same reason silently overwrites the
    /// slot (last writer wins); namespace reasons per component to avoid
    /// collisions. Re-registering the same prototype is idempotent.
    pub fn register(&self, proto: StatusError) {
        self.slots.write().insert(proto.reason().to_string(), proto);
    }

    /// Returns the prototype registered under `reason`, if any.
    #[must_use]
    pub fn lookup(&self, reason: &str) -> Option<StatusError> {
        self.slots.read().get(reason).cloned()
    }

    /// Returns the number of registered reasons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}
