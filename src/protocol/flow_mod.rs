//! Flow-modification commands.
//!
//! # Responsibilities
//! - Carry one already-parsed flow-table mutation: kind, identity, pattern,
//!   actions, timeouts
//! - Keep the command-kind set closed so dispatch is exhaustive
//!
//! # Design Decisions
//! - `FlowModKind` is a plain enum; a new kind is a compile error at every
//!   dispatch site, never a silent no-op
//! - Timeouts are an explicit `Permanent` variant rather than a zero sentinel

use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::matching::FlowMatch;

/// How long before a flow entry expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeout {
    /// Never expires on this axis.
    #[default]
    Permanent,
    /// Expires this many seconds after the reference instant.
    After(u16),
}

impl Timeout {
    /// True if the timeout is disabled.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Timeout::Permanent)
    }
}

impl From<u16> for Timeout {
    /// OpenFlow encodes "no timeout" as zero seconds.
    fn from(secs: u16) -> Self {
        if secs == 0 {
            Timeout::Permanent
        } else {
            Timeout::After(secs)
        }
    }
}

/// The kind of mutation a flow-mod performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowModKind {
    /// Install a new entry, unconditionally.
    Add,
    /// Update actions/timeouts of every covered entry, or add if none.
    Modify,
    /// Update the one exactly-identified entry, or add if absent.
    ModifyStrict,
    /// Remove every covered entry, ignoring priority.
    Delete,
    /// Remove the one exactly-identified entry.
    DeleteStrict,
}

/// A flow-table mutation command from a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMod {
    /// What to do.
    pub kind: FlowModKind,
    /// Entry priority; higher wins at lookup time.
    pub priority: u16,
    /// Opaque installer-chosen identifier.
    pub cookie: u64,
    /// Which flows the command targets.
    pub pattern: FlowMatch,
    /// Actions to install.
    pub actions: Vec<Action>,
    /// Inactivity expiry.
    pub idle_timeout: Timeout,
    /// Absolute expiry since installation.
    pub hard_timeout: Timeout,
}

impl FlowMod {
    /// A command with the given kind and match-all pattern; callers refine
    /// it with the with-style setters.
    pub fn new(kind: FlowModKind) -> Self {
        Self {
            kind,
            priority: 0,
            cookie: 0,
            pattern: FlowMatch::any(),
            actions: Vec::new(),
            idle_timeout: Timeout::Permanent,
            hard_timeout: Timeout::Permanent,
        }
    }

    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_cookie(mut self, cookie: u64) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn with_pattern(mut self, pattern: FlowMatch) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.idle_timeout = timeout.into();
        self
    }

    pub fn with_hard_timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.hard_timeout = timeout.into();
        self
    }
}
