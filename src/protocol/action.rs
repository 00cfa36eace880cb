//! Flow action descriptors.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::matching::MacAddr;

/// An output action applied to packets matching a flow. Already-parsed
/// structures only; wire encoding lives with the host's codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Forward out of a switch port.
    Output(u16),
    /// Set the VLAN id.
    SetVlan(u16),
    /// Strip the VLAN tag.
    StripVlan,
    /// Rewrite the Ethernet source.
    SetDlSrc(MacAddr),
    /// Rewrite the Ethernet destination.
    SetDlDst(MacAddr),
    /// Rewrite the IPv4 source.
    SetNwSrc(Ipv4Addr),
    /// Rewrite the IPv4 destination.
    SetNwDst(Ipv4Addr),
    /// Rewrite the transport source port.
    SetTpSrc(u16),
    /// Rewrite the transport destination port.
    SetTpDst(u16),
    /// Forward to a queue on a port.
    Enqueue(u16, u32),
}
