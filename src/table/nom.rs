//! Controller-side bookkeeping table.
//!
//! # Responsibilities
//! - Mirror a switch's flow state inside a controller's network object model
//! - Apply asynchronous flow-removed notifications from the hardware
//!
//! # Design Decisions
//! - Removal is always exact identity: cookie, exactly-equal match, and
//!   priority when the notification carries one; never a covering match
//! - A notification with no matching entry is a no-op, since the switch may
//!   report a flow the controller already forgot

use tracing::debug;

use super::base::FlowTable;
use super::entry::TableEntry;
use crate::protocol::FlowRemoved;

/// A controller's bookkeeping copy of one switch's flow table.
#[derive(Debug, Default, Clone)]
pub struct NomFlowTable {
    table: FlowTable,
}

impl NomFlowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the entries the switch reports as removed. Exact identity only;
    /// returns the dropped entries, usually zero or one.
    pub fn process_flow_removed(&mut self, fr: &FlowRemoved) -> Vec<TableEntry> {
        let removed = self.table.remove_where(|e| {
            e.cookie() == fr.cookie
                && e.pattern() == &fr.pattern
                && fr.priority.map_or(true, |p| e.priority() == p)
        });
        if !removed.is_empty() {
            debug!(cookie = fr.cookie, count = removed.len(), "processed flow removed");
        }
        removed
    }

    /// Record an entry the controller believes is installed.
    pub fn add_entry(&mut self, entry: TableEntry) {
        self.table.add_entry(entry);
    }

    /// Live entries in insertion order.
    pub fn entries(&self) -> &[TableEntry] {
        self.table.entries()
    }

    /// The wrapped base table, for lookup helpers.
    pub fn table(&self) -> &FlowTable {
        &self.table
    }
}
