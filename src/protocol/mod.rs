//! Boundary types for inbound commands and notifications.
//!
//! # Data Flow
//! ```text
//! Host codec (out of scope)
//!     → flow_mod.rs (FlowMod: add/modify/delete commands)
//!     → flow_removed.rs (FlowRemoved: hardware eviction reports)
//!     → action.rs (Action descriptors carried by both)
//!     → consumed by the table layer
//! ```
//!
//! # Design Decisions
//! - Everything here is already parsed; no wire encoding
//! - Command kinds are a closed enum, handled exhaustively downstream

pub mod action;
pub mod flow_mod;
pub mod flow_removed;

pub use action::Action;
pub use flow_mod::{FlowMod, FlowModKind, Timeout};
pub use flow_removed::{FlowRemoved, RemovedReason};
