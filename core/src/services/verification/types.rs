//! Types for verification service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of handing a code to the SMS collaborator.
///
/// Dispatch is best effort: none of these variants fail the issue operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Provider accepted the message
    Sent { message_id: String },
    /// Delivery is simulated in this deployment
    Simulated,
    /// Provider rejected the message or was unreachable
    DispatchFailed { reason: String },
}

impl DispatchOutcome {
    /// Stable label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Sent { .. } => "sent",
            DispatchOutcome::Simulated => "simulated",
            DispatchOutcome::DispatchFailed { .. } => "dispatch_failed",
        }
    }
}

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// Id of the stored record
    pub id: Uuid,
    /// Normalized phone number the code was issued to
    pub phone_number: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// The literal code, only when the deployment allows echoing it
    pub exposed_code: Option<String>,
    /// What happened to the SMS
    pub dispatch: DispatchOutcome,
}
