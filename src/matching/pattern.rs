//! Flow match patterns.
//!
//! # Responsibilities
//! - Hold the full OpenFlow 1.0 field set as one record of per-field specs
//! - Answer pattern-level covering (every field covers) and exact equality
//! - Provide with-style construction; patterns are immutable once attached
//!   to an entry or command
//!
//! # Design Decisions
//! - Default is match-all: every field wildcarded
//! - Covering is per-field AND semantics, like the route matchers combine
//! - Equality is structural; field specs are canonicalized at construction

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::field::{FieldSpec, IpSpec, MacAddr};

/// A wildcard-capable match over the OpenFlow 1.0 header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMatch {
    /// Ingress switch port.
    pub in_port: FieldSpec<u16>,
    /// Ethernet source address.
    pub dl_src: FieldSpec<MacAddr>,
    /// Ethernet destination address.
    pub dl_dst: FieldSpec<MacAddr>,
    /// Ethernet frame type.
    pub dl_type: FieldSpec<u16>,
    /// VLAN id.
    pub dl_vlan: FieldSpec<u16>,
    /// IP protocol.
    pub nw_proto: FieldSpec<u8>,
    /// IPv4 source, exact or prefix.
    pub nw_src: IpSpec,
    /// IPv4 destination, exact or prefix.
    pub nw_dst: IpSpec,
    /// Transport source port.
    pub tp_src: FieldSpec<u16>,
    /// Transport destination port.
    pub tp_dst: FieldSpec<u16>,
}

impl FlowMatch {
    /// A pattern with every field wildcarded; matches every flow.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_in_port(mut self, port: u16) -> Self {
        self.in_port = FieldSpec::Exact(port);
        self
    }

    pub fn with_dl_src(mut self, mac: MacAddr) -> Self {
        self.dl_src = FieldSpec::Exact(mac);
        self
    }

    pub fn with_dl_dst(mut self, mac: MacAddr) -> Self {
        self.dl_dst = FieldSpec::Exact(mac);
        self
    }

    pub fn with_dl_type(mut self, ethertype: u16) -> Self {
        self.dl_type = FieldSpec::Exact(ethertype);
        self
    }

    pub fn with_dl_vlan(mut self, vlan: u16) -> Self {
        self.dl_vlan = FieldSpec::Exact(vlan);
        self
    }

    pub fn with_nw_proto(mut self, proto: u8) -> Self {
        self.nw_proto = FieldSpec::Exact(proto);
        self
    }

    pub fn with_nw_src(mut self, spec: IpSpec) -> Self {
        self.nw_src = spec;
        self
    }

    pub fn with_nw_dst(mut self, spec: IpSpec) -> Self {
        self.nw_dst = spec;
        self
    }

    pub fn with_tp_src(mut self, port: u16) -> Self {
        self.tp_src = FieldSpec::Exact(port);
        self
    }

    pub fn with_tp_dst(mut self, port: u16) -> Self {
        self.tp_dst = FieldSpec::Exact(port);
        self
    }

    /// True iff every flow matched by `other` is also matched by `self`:
    /// `self` is equal-or-more-general on every field. Reflexive and
    /// transitive, not symmetric.
    pub fn covers(&self, other: &FlowMatch) -> bool {
        self.in_port.covers(&other.in_port)
            && self.dl_src.covers(&other.dl_src)
            && self.dl_dst.covers(&other.dl_dst)
            && self.dl_type.covers(&other.dl_type)
            && self.dl_vlan.covers(&other.dl_vlan)
            && self.nw_proto.covers(&other.nw_proto)
            && self.nw_src.covers(&other.nw_src)
            && self.nw_dst.covers(&other.nw_dst)
            && self.tp_src.covers(&other.tp_src)
            && self.tp_dst.covers(&other.tp_dst)
    }

    /// True if every field is wildcarded.
    pub fn is_any(&self) -> bool {
        self == &FlowMatch::default()
    }

    /// Exact-address convenience for the common `nw_src` case.
    pub fn with_nw_src_addr(self, addr: Ipv4Addr) -> Self {
        self.with_nw_src(IpSpec::Exact(addr))
    }
}
