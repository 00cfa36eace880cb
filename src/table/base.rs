//! The base flow table.
//!
//! # Responsibilities
//! - Store entries in insertion order
//! - Remove by pattern (strict or covering) and by timeout
//! - Hand removed entries back to the caller, detached from the table
//!
//! # Design Decisions
//! - Storage order is insertion order; priority is resolved at match time,
//!   not by sorting the store
//! - `add_entry` never dedups; that policy belongs to the wrapping tables
//! - Removal returns owned entries so callers can emit notifications and
//!   no alias into the table survives

use tracing::{debug, trace};

use super::entry::TableEntry;
use crate::matching::FlowMatch;

/// An insertion-ordered collection of flow entries. Single-owner: a
/// concurrent host serializes access per table instance.
#[derive(Debug, Default, Clone)]
pub struct FlowTable {
    entries: Vec<TableEntry>,
}

impl FlowTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry unconditionally. Duplicate `(match, priority)` pairs
    /// become independent entries.
    pub fn add_entry(&mut self, entry: TableEntry) {
        trace!(
            priority = entry.priority(),
            cookie = entry.cookie(),
            "adding flow entry"
        );
        self.entries.push(entry);
    }

    /// Live entries in insertion order.
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry selected by `pattern`. Strict removal
    /// takes the entries whose match equals `pattern` exactly at exactly
    /// `priority`; non-strict removal takes every entry whose match is
    /// covered by `pattern`, ignoring priority.
    pub fn remove_matching_entries(
        &mut self,
        pattern: &FlowMatch,
        priority: u16,
        strict: bool,
    ) -> Vec<TableEntry> {
        let removed = self.remove_where(|e| {
            if strict {
                e.pattern() == pattern && e.priority() == priority
            } else {
                pattern.covers(e.pattern())
            }
        });
        if !removed.is_empty() {
            debug!(count = removed.len(), strict, "removed matching flow entries");
        }
        removed
    }

    /// Remove and return every entry expired at `now`.
    pub fn remove_expired_entries(&mut self, now: u64) -> Vec<TableEntry> {
        let removed = self.remove_where(|e| e.is_expired(now));
        for e in &removed {
            trace!(cookie = e.cookie(), now, "flow entry expired");
        }
        removed
    }

    /// Highest-priority live entry whose match covers `fingerprint`; ties
    /// go to the earliest-inserted entry. `fingerprint` is the fully
    /// concrete match of a packet, as built by a host's packet parser.
    pub fn matching_entry(&self, fingerprint: &FlowMatch) -> Option<&TableEntry> {
        let mut best: Option<&TableEntry> = None;
        for e in &self.entries {
            if e.pattern().covers(fingerprint)
                && best.map_or(true, |b| e.priority() > b.priority())
            {
                best = Some(e);
            }
        }
        best
    }

    /// Mutable walk over the live entries, for the modify path.
    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut TableEntry> {
        self.entries.iter_mut()
    }

    /// Remove and return every entry satisfying `pred`; all-or-nothing per
    /// entry, order of survivors preserved.
    pub(crate) fn remove_where(&mut self, pred: impl Fn(&TableEntry) -> bool) -> Vec<TableEntry> {
        let (removed, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| pred(e));
        self.entries = kept;
        removed
    }
}
