//! Synthesis engine
//!
//! Pure transformation of security API records into entitlements and grants:
//!
//! - [`identifier`]: content-addressed ids
//! - [`entitlements`]: Role (+ mapping) to entitlements and an id index
//! - [`grants`]: Role mapping to grants carrying expansion annotations
//! - [`matcher`]: assignment value to grant target
//! - [`context`]: per-pass index cache shared by both phases

pub mod context;
pub mod entitlements;
pub mod error;
pub mod grants;
pub mod identifier;
pub mod matcher;
pub mod types;

pub use context::PassContext;
pub use entitlements::{EntitlementIndex, synthesize_entitlements};
pub use error::SynthesisError;
pub use grants::synthesize_grants;
pub use matcher::{ExternalMatcher, UserMatchKey, WILDCARD};
pub use types::*;
