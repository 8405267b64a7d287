//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `connector_validators`: validators for the connector, HTTP and sync settings
//! - `tests`: Test suite for all validators

mod connector_validators;
mod trait_def;

pub(crate) use connector_validators::PEM_CERTIFICATE_MARKER;
pub use trait_def::Validate;
