//! OpenFlow flow-table matching and mutation engine.

pub mod matching;
pub mod protocol;
pub mod table;

pub use matching::{FieldSpec, FlowMatch, IpSpec, MacAddr, MatchError};
pub use protocol::{Action, FlowMod, FlowModKind, FlowRemoved, RemovedReason, Timeout};
pub use table::{FlowModEffect, FlowTable, NomFlowTable, SwitchFlowTable, TableEntry};
