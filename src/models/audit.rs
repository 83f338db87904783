//! Audit trail records for cost calculations.

use serde::{Deserialize, Serialize};

/// A single step in a calculation's audit trail.
///
/// Each step captures the input, output, and reasoning for one rule, so a
/// branch cost can be explained figure by figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}
