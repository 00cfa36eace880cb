//! Shared fixtures for flow-table scenario tests.

use oftable::{Action, FlowMatch, IpSpec, MacAddr, SwitchFlowTable, TableEntry};

/// A MAC with the given last octet, like `00:00:00:00:00:01`.
pub fn mac(last: u8) -> MacAddr {
    MacAddr([0, 0, 0, 0, 0, last])
}

/// Parse CIDR text that the test knows is valid.
pub fn cidr(s: &str) -> IpSpec {
    IpSpec::from_cidr(s).unwrap()
}

/// The canonical three-entry table: a high-priority host rule, a
/// mid-priority subnet rule, and a low-priority catch-all.
pub fn three_entry_table() -> SwitchFlowTable {
    let mut t = SwitchFlowTable::new();
    t.add_entry(TableEntry::new(
        6,
        0x1,
        FlowMatch::any().with_dl_src(mac(1)).with_nw_src(cidr("1.2.3.4")),
        vec![Action::Output(5)],
        0,
        0,
        0,
    ));
    t.add_entry(TableEntry::new(
        5,
        0x2,
        FlowMatch::any().with_dl_src(mac(2)).with_nw_src(cidr("1.2.3.0/24")),
        vec![Action::Output(6)],
        0,
        0,
        0,
    ));
    t.add_entry(TableEntry::new(1, 0x3, FlowMatch::any(), vec![], 0, 0, 0));
    t
}

/// Cookies of the live entries, in insertion order.
pub fn cookies(t: &SwitchFlowTable) -> Vec<u64> {
    t.entries().iter().map(|e| e.cookie()).collect()
}

/// Initialize test logging once; safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oftable=trace".into()),
        )
        .with_test_writer()
        .try_init();
}
