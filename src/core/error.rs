//! Synthesis engine errors

use thiserror::Error;

/// Failures raised by the synthesis engine itself.
///
/// Both variants indicate a defect rather than an environmental condition;
/// callers abort the current Role instead of emitting a partial graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The identifier input could not be serialized
    #[error("identifier synthesis failed: {0}")]
    Identifier(String),

    /// A grant referenced an entitlement that was not declared for the same role
    #[error("role {role} references undeclared entitlement {label}")]
    DanglingEntitlement { role: String, label: String },
}
