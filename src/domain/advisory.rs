//! AI advisory boundary
//!
//! The advisory provider is a black box: structured input in, structured
//! output out, fallible. Failures carry no partial results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::report::FormType;
use crate::domain::DomainResult;

/// Input for the form-suggestion operation.
#[derive(Debug, Clone, Serialize)]
pub struct FormSuggestionInput {
    pub location: String,
    pub equipment_model: String,
}

/// Suggested form plus the model's rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSuggestion {
    pub suggested_form: FormType,
    pub reasoning: String,
}

/// Input for the troubleshooting operation.
#[derive(Debug, Clone, Serialize)]
pub struct TroubleshootInput {
    pub equipment_model: String,
    pub problem_description: String,
}

/// Structured troubleshooting guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TroubleshootingGuide {
    pub potential_causes: Vec<String>,
    pub diagnostic_steps: Vec<String>,
    pub recommended_parts: Vec<String>,
}

#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    async fn suggest_form(&self, input: FormSuggestionInput) -> DomainResult<FormSuggestion>;

    async fn troubleshoot(&self, input: TroubleshootInput) -> DomainResult<TroubleshootingGuide>;
}
