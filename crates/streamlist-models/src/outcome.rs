use serde::{Deserialize, Serialize};

use crate::notification::{Notification, Severity};

/// Result of a stream list mutation as seen by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationOutcome {
    pub fn succeeded(message: Option<String>) -> Self {
        Self { success: true, message }
    }

    pub fn failed(message: Option<String>) -> Self {
        Self { success: false, message }
    }

    /// The notification this outcome should raise, if it carries a message
    pub fn to_notification(&self) -> Option<Notification> {
        let severity = if self.success {
            Severity::Success
        } else {
            Severity::Error
        };
        self.message.as_ref().map(|message| Notification {
            message: message.clone(),
            severity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_to_notification() {
        let ok = MutationOutcome::succeeded(Some("X added to your Stream List!".to_string()));
        assert_eq!(
            ok.to_notification(),
            Some(Notification::success("X added to your Stream List!"))
        );

        let dup = MutationOutcome::failed(Some("X is already in your Stream List.".to_string()));
        assert_eq!(dup.to_notification().unwrap().severity, Severity::Error);

        assert_eq!(MutationOutcome::succeeded(None).to_notification(), None);
    }

    #[test]
    fn test_notification_serializes_with_type_tag() {
        let json = serde_json::to_value(Notification::error("boom")).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "boom");
    }
}
