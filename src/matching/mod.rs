//! Match predicate engine.
//!
//! # Data Flow
//! ```text
//! FlowMod / FlowRemoved / lookup fingerprint
//!     → pattern.rs (FlowMatch: covers / equality)
//!     → field.rs (per-field wildcard / exact / prefix rules)
//!     → Return: covered or not
//! ```
//!
//! # Design Decisions
//! - Wildcard is a variant, not a nullable value
//! - Prefixes are canonicalized at construction, so equality is structural
//! - Covering combines fields with AND semantics

pub mod field;
pub mod pattern;

pub use field::{FieldSpec, IpSpec, MacAddr, MatchError, MatchResult};
pub use pattern::FlowMatch;
