use serde::Serialize;

/// Outcome of one payment attempt, as classified from the paying app's response.
///
/// Every variant keeps the raw response string for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PaymentResult {
    Success {
        approval_ref_id: Option<String>,
        raw_response: String,
    },
    /// Accepted by the app, final state not yet known.
    Submitted {
        raw_response: String,
    },
    Failed {
        reason_code: Option<String>,
        raw_response: String,
    },
    /// The response could not be classified. Never treat as success.
    Unknown {
        raw_response: String,
    },
}

impl PaymentResult {
    pub fn raw_response(&self) -> &str {
        match self {
            PaymentResult::Success { raw_response, .. }
            | PaymentResult::Submitted { raw_response }
            | PaymentResult::Failed { raw_response, .. }
            | PaymentResult::Unknown { raw_response } => raw_response,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentResult::Success { .. })
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            PaymentResult::Success { .. } => "success",
            PaymentResult::Submitted { .. } => "submitted",
            PaymentResult::Failed { .. } => "failed",
            PaymentResult::Unknown { .. } => "unknown",
        }
    }
}

/// What gets handed to the OS launcher: the deep link and an optional target package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentIntent {
    pub uri: String,
    pub package: Option<String>,
}
