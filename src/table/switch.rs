//! Switch-side flow table.
//!
//! # Responsibilities
//! - Apply inbound flow-mod commands to the base table with OpenFlow
//!   mutation semantics
//! - Report what a command did so the host can emit notifications
//!
//! # Design Decisions
//! - Dispatch over `FlowModKind` is exhaustive; a new kind fails to compile
//! - MODIFY and MODIFY_STRICT that match nothing fall back to ADD: a
//!   modification targeting empty rule space still installs the desired
//!   forwarding behavior
//! - ADD never checks for an existing duplicate

use tracing::debug;

use super::base::FlowTable;
use super::entry::TableEntry;
use crate::protocol::{FlowMod, FlowModKind};

/// What a flow-mod did to the table.
#[derive(Debug, PartialEq)]
pub enum FlowModEffect {
    /// A new entry was installed (ADD, or a modify that matched nothing).
    Added,
    /// This many existing entries had their actions/timeouts replaced.
    Modified(usize),
    /// These entries were removed; the host turns them into notifications.
    Removed(Vec<TableEntry>),
}

/// A flow table with switch-side mutation semantics layered on top.
#[derive(Debug, Default, Clone)]
pub struct SwitchFlowTable {
    table: FlowTable,
}

impl SwitchFlowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one flow-mod at `now` and report its effect.
    pub fn process_flow_mod(&mut self, fm: &FlowMod, now: u64) -> FlowModEffect {
        debug!(kind = ?fm.kind, priority = fm.priority, cookie = fm.cookie, "processing flow mod");
        match fm.kind {
            FlowModKind::Add => self.add_from(fm, now),
            FlowModKind::Modify => {
                let modified = self.modify_matching(fm, false);
                if modified == 0 {
                    self.add_from(fm, now)
                } else {
                    FlowModEffect::Modified(modified)
                }
            }
            FlowModKind::ModifyStrict => {
                let modified = self.modify_matching(fm, true);
                if modified == 0 {
                    self.add_from(fm, now)
                } else {
                    FlowModEffect::Modified(modified)
                }
            }
            FlowModKind::Delete => FlowModEffect::Removed(self.table.remove_matching_entries(
                &fm.pattern,
                fm.priority,
                false,
            )),
            FlowModKind::DeleteStrict => FlowModEffect::Removed(
                self.table
                    .remove_matching_entries(&fm.pattern, fm.priority, true),
            ),
        }
    }

    /// Remove and return every entry expired at `now`; the host drives this
    /// from its periodic sweep.
    pub fn remove_expired_entries(&mut self, now: u64) -> Vec<TableEntry> {
        self.table.remove_expired_entries(now)
    }

    /// Install an entry directly, bypassing command semantics.
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

    fn add_from(&mut self, fm: &FlowMod, now: u64) -> FlowModEffect {
        self.table.add_entry(TableEntry::from_flow_mod(fm, now));
        FlowModEffect::Added
    }

    /// Replace actions/timeouts in place on every entry the command
    /// selects; identity, timestamps, and counters are preserved.
    fn modify_matching(&mut self, fm: &FlowMod, strict: bool) -> usize {
        let mut modified = 0;
        for e in self.table.entries_mut() {
            let selected = if strict {
                e.pattern() == &fm.pattern && e.priority() == fm.priority
            } else {
                fm.pattern.covers(e.pattern())
            };
            if selected {
                e.apply_flow_mod(fm);
                modified += 1;
            }
        }
        modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{FlowMatch, IpSpec, MacAddr};
    use crate::protocol::Action;

    fn mac(last: u8) -> MacAddr {
        MacAddr([0, 0, 0, 0, 0, last])
    }

    fn table() -> SwitchFlowTable {
        let mut t = SwitchFlowTable::new();
        t.add_entry(TableEntry::new(
            6,
            0x1,
            FlowMatch::any()
                .with_dl_src(mac(1))
                .with_nw_src(IpSpec::from_cidr("1.2.3.4").unwrap()),
            vec![Action::Output(5)],
            0,
            0,
            0,
        ));
        t.add_entry(TableEntry::new(
            5,
            0x2,
            FlowMatch::any()
                .with_dl_src(mac(2))
                .with_nw_src(IpSpec::from_cidr("1.2.3.0/24").unwrap()),
            vec![Action::Output(6)],
            0,
            0,
            0,
        ));
        t.add_entry(TableEntry::new(1, 0x3, FlowMatch::any(), vec![], 0, 0, 0));
        t
    }

    fn cookies_with_action(t: &SwitchFlowTable, action: Action) -> Vec<u64> {
        t.entries()
            .iter()
            .filter(|e| e.actions() == [action])
            .map(|e| e.cookie())
            .collect()
    }

    #[test]
    fn test_process_flow_mod_add() {
        let mut t = SwitchFlowTable::new();
        let fm = FlowMod::new(FlowModKind::Add)
            .with_priority(5)
            .with_cookie(0x31415926)
            .with_actions(vec![Action::Output(5)]);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Added);
        assert_eq!(t.entries().len(), 1);
        let e = &t.entries()[0];
        assert_eq!(e.priority(), 5);
        assert_eq!(e.cookie(), 0x31415926);
        assert_eq!(e.actions(), &[Action::Output(5)]);
    }

    #[test]
    fn test_process_flow_mod_modify() {
        // wildcard modify touches every entry
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::Modify).with_actions(vec![Action::Output(1)]);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Modified(3));
        assert_eq!(cookies_with_action(&t, Action::Output(1)), vec![1, 2, 3]);
        assert_eq!(t.entries().len(), 3);

        // /16 modify touches the two entries inside the subnet
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::Modify)
            .with_pattern(FlowMatch::any().with_nw_src(IpSpec::from_cidr("1.2.0.0/16").unwrap()))
            .with_actions(vec![Action::Output(8)]);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Modified(2));
        assert_eq!(cookies_with_action(&t, Action::Output(8)), vec![1, 2]);
        assert_eq!(t.entries().len(), 3);
    }

    #[test]
    fn test_non_matching_modify_acts_as_add() {
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::Modify)
            .with_cookie(5)
            .with_pattern(FlowMatch::any().with_nw_src(IpSpec::from_cidr("2.2.0.0/16").unwrap()))
            .with_actions(vec![Action::Output(8)]);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Added);
        assert_eq!(t.entries().len(), 4);
        assert_eq!(cookies_with_action(&t, Action::Output(8)), vec![5]);
    }

    #[test]
    fn test_process_flow_mod_modify_strict() {
        // strict wildcard at priority 1 selects only the catch-all
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::ModifyStrict)
            .with_priority(1)
            .with_actions(vec![Action::Output(1)]);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Modified(1));
        assert_eq!(cookies_with_action(&t, Action::Output(1)), vec![3]);
        assert_eq!(t.entries().len(), 3);

        // strict exact identity selects only the subnet rule
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::ModifyStrict)
            .with_priority(5)
            .with_pattern(
                FlowMatch::any()
                    .with_dl_src(mac(2))
                    .with_nw_src(IpSpec::from_cidr("1.2.3.0/24").unwrap()),
            )
            .with_actions(vec![Action::Output(8)]);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Modified(1));
        assert_eq!(cookies_with_action(&t, Action::Output(8)), vec![2]);
        assert_eq!(t.entries().len(), 3);
    }

    #[test]
    fn test_delete_and_delete_strict() {
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::Delete)
            .with_pattern(FlowMatch::any().with_nw_src(IpSpec::from_cidr("1.2.3.0/24").unwrap()));
        match t.process_flow_mod(&fm, 0) {
            FlowModEffect::Removed(removed) => {
                assert_eq!(removed.iter().map(|e| e.cookie()).collect::<Vec<_>>(), [1, 2]);
            }
            other => panic!("expected removal, got {:?}", other),
        }
        assert_eq!(t.entries().len(), 1);
        assert_eq!(t.entries()[0].cookie(), 0x3);

        // strict delete with a mismatched priority is a no-op
        let mut t = table();
        let fm = FlowMod::new(FlowModKind::DeleteStrict).with_priority(0);
        assert_eq!(t.process_flow_mod(&fm, 0), FlowModEffect::Removed(vec![]));
        assert_eq!(t.entries().len(), 3);
    }

    #[test]
    fn test_modify_preserves_identity_and_counters() {
        let mut t = SwitchFlowTable::new();
        let mut e = TableEntry::new(5, 0x2, FlowMatch::any(), vec![Action::Output(6)], 0, 0, 0);
        e.touch_packet(100, 2);
        t.add_entry(e);

        let fm = FlowMod::new(FlowModKind::Modify)
            .with_cookie(0x9)
            .with_actions(vec![Action::Output(8)])
            .with_idle_timeout(30u16);
        assert_eq!(t.process_flow_mod(&fm, 10), FlowModEffect::Modified(1));

        let e = &t.entries()[0];
        // cookie, priority, and counters survive; actions and timeouts change
        assert_eq!(e.cookie(), 0x2);
        assert_eq!(e.priority(), 5);
        assert_eq!(e.counters().bytes, 100);
        assert_eq!(e.actions(), &[Action::Output(8)]);
        assert!(!e.idle_timeout().is_permanent());
    }
}
