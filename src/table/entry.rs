//! A single forwarding rule.
//!
//! # Responsibilities
//! - Hold rule identity (priority, cookie, match), actions, timeouts
//! - Track lifecycle timestamps and packet/byte counters
//! - Decide expiry against a caller-supplied clock
//!
//! # Design Decisions
//! - Timestamps are plain seconds handed in by the caller; the entry never
//!   reads wall time itself, so expiry is deterministic and testable
//! - Fields are private; mutation goes through `touch_packet` and the
//!   crate-internal modify path, never through an aliased reference
//! - Hard timeout is checked before idle, and wins

use serde::{Deserialize, Serialize};

use crate::matching::FlowMatch;
use crate::protocol::{Action, FlowMod, FlowModKind, FlowRemoved, RemovedReason, Timeout};

/// Packet and byte counters for one entry. Monotonically non-decreasing
/// until the entry is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowCounters {
    /// Packets accounted to this entry.
    pub packets: u64,
    /// Bytes accounted to this entry.
    pub bytes: u64,
}

/// One rule in a flow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    priority: u16,
    cookie: u64,
    pattern: FlowMatch,
    actions: Vec<Action>,
    idle_timeout: Timeout,
    hard_timeout: Timeout,
    created_at: u64,
    last_touched_at: u64,
    counters: FlowCounters,
}

impl TableEntry {
    /// Build an entry installed at `now`; `created_at` and
    /// `last_touched_at` both start there.
    pub fn new(
        priority: u16,
        cookie: u64,
        pattern: FlowMatch,
        actions: Vec<Action>,
        idle_timeout: impl Into<Timeout>,
        hard_timeout: impl Into<Timeout>,
        now: u64,
    ) -> Self {
        Self {
            priority,
            cookie,
            pattern,
            actions,
            idle_timeout: idle_timeout.into(),
            hard_timeout: hard_timeout.into(),
            created_at: now,
            last_touched_at: now,
            counters: FlowCounters::default(),
        }
    }

    /// Derive an entry from a flow-mod, stamped with the current time.
    pub fn from_flow_mod(fm: &FlowMod, now: u64) -> Self {
        Self::new(
            fm.priority,
            fm.cookie,
            fm.pattern.clone(),
            fm.actions.clone(),
            fm.idle_timeout,
            fm.hard_timeout,
            now,
        )
    }

    /// Echo this entry back as a command of the given kind, e.g. to
    /// re-synchronize a switch from a controller's bookkeeping.
    pub fn to_flow_mod(&self, kind: FlowModKind) -> FlowMod {
        FlowMod::new(kind)
            .with_priority(self.priority)
            .with_cookie(self.cookie)
            .with_pattern(self.pattern.clone())
            .with_actions(self.actions.clone())
            .with_idle_timeout(self.idle_timeout)
            .with_hard_timeout(self.hard_timeout)
    }

    /// Account one packet of `bytes` bytes and mark the entry active at
    /// `now`.
    pub fn touch_packet(&mut self, bytes: u64, now: u64) {
        self.counters.packets += 1;
        self.counters.bytes += bytes;
        self.last_touched_at = now;
    }

    /// Expiry policy: the hard timeout fires `hard` seconds after creation
    /// regardless of activity; otherwise the idle timeout fires `idle`
    /// seconds after the last touch. Both permanent means never.
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry_reason(now).is_some()
    }

    /// Which timeout has fired at `now`, if any. `now` before creation
    /// never expires anything.
    pub fn expiry_reason(&self, now: u64) -> Option<RemovedReason> {
        if let Timeout::After(hard) = self.hard_timeout {
            if now.saturating_sub(self.created_at) >= u64::from(hard) {
                return Some(RemovedReason::HardTimeout);
            }
        }
        if let Timeout::After(idle) = self.idle_timeout {
            if now >= self.created_at
                && now.saturating_sub(self.last_touched_at) >= u64::from(idle)
            {
                return Some(RemovedReason::IdleTimeout);
            }
        }
        None
    }

    /// Build the notification a switch would emit for this entry's removal.
    pub fn to_flow_removed(&self) -> FlowRemoved {
        FlowRemoved::new(self.cookie, self.pattern.clone()).with_priority(self.priority)
    }

    /// Replace actions and timeouts from a modify command, preserving
    /// identity, timestamps, and counters.
    pub(crate) fn apply_flow_mod(&mut self, fm: &FlowMod) {
        self.actions = fm.actions.clone();
        self.idle_timeout = fm.idle_timeout;
        self.hard_timeout = fm.hard_timeout;
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn cookie(&self) -> u64 {
        self.cookie
    }

    pub fn pattern(&self) -> &FlowMatch {
        &self.pattern
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn idle_timeout(&self) -> Timeout {
        self.idle_timeout
    }

    pub fn hard_timeout(&self) -> Timeout {
        self.hard_timeout
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn last_touched_at(&self) -> u64 {
        self.last_touched_at
    }

    pub fn counters(&self) -> FlowCounters {
        self.counters
    }
}
