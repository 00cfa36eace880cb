//! Flow-table storage and mutation semantics.
//!
//! # Data Flow
//! ```text
//! FlowMod command
//!     → switch.rs (SwitchFlowTable: add/modify/delete dispatch)
//!     → base.rs (FlowTable: ordered storage, pattern removal, expiry)
//!     → entry.rs (TableEntry: identity, counters, timeouts)
//!
//! FlowRemoved notification
//!     → nom.rs (NomFlowTable: exact-identity removal)
//!     → base.rs
//! ```
//!
//! # Design Decisions
//! - Each wrapper owns exactly one base table; no shared storage
//! - Every operation runs to completion under `&mut self`; a concurrent
//!   host puts one lock or one actor around each table instance
//! - Removal transfers ownership of the removed entries to the caller

pub mod base;
pub mod entry;
pub mod nom;
pub mod switch;

pub use base::FlowTable;
pub use entry::{FlowCounters, TableEntry};
pub use nom::NomFlowTable;
pub use switch::{FlowModEffect, SwitchFlowTable};
