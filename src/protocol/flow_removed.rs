//! Flow-removed notifications.

use serde::{Deserialize, Serialize};

use crate::matching::FlowMatch;

/// Why a switch evicted a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovedReason {
    /// No traffic for `idle_timeout` seconds.
    IdleTimeout,
    /// `hard_timeout` seconds since installation.
    HardTimeout,
    /// Deleted by an explicit command.
    Delete,
}

/// A switch-to-controller notification that a flow is gone. Identity is
/// exact: cookie plus an exactly-equal match, plus priority when the
/// switch reports one. Never interpreted as a wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRemoved {
    /// Cookie of the removed entry.
    pub cookie: u64,
    /// Match of the removed entry, compared for exact equality.
    pub pattern: FlowMatch,
    /// Priority of the removed entry, when the switch encodes one.
    pub priority: Option<u16>,
}

impl FlowRemoved {
    pub fn new(cookie: u64, pattern: FlowMatch) -> Self {
        Self {
            cookie,
            pattern,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }
}
