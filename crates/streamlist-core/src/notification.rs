use streamlist_config::NotificationConfig;
use streamlist_models::Notification;
use tokio::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationState {
    Idle,
    Active {
        notification: Notification,
        deadline: Instant,
    },
}

/// Holds at most one live notification and the deadline that clears it.
///
/// Expiry is evaluated against the runtime clock, so a notification whose
/// deadline has passed is never reported even if nothing polled it yet.
#[derive(Debug)]
pub struct NotificationController {
    state: NotificationState,
    timeout: Duration,
}

impl NotificationController {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: NotificationState::Idle,
            timeout,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(Duration::from_millis(config.timeout_ms))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Show `notification`, replacing any live one and re-arming the deadline
    pub fn notify(&mut self, notification: Notification) {
        debug!(message = %notification.message, severity = ?notification.severity, "Notification raised");
        self.state = NotificationState::Active {
            notification,
            deadline: Instant::now() + self.timeout,
        };
    }

    /// Clear the live notification immediately, cancelling its deadline
    pub fn dismiss(&mut self) -> Option<Notification> {
        match std::mem::replace(&mut self.state, NotificationState::Idle) {
            NotificationState::Active { notification, deadline } if deadline > Instant::now() => {
                Some(notification)
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        match &self.state {
            NotificationState::Active { notification, deadline } if *deadline > Instant::now() => {
                Some(notification)
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            NotificationState::Active { deadline, .. } => Some(*deadline),
            NotificationState::Idle => None,
        }
    }

    /// Move to `Idle` if the deadline has passed. Returns true on that transition.
    pub fn poll_expiry(&mut self) -> bool {
        match self.deadline() {
            Some(deadline) if deadline <= Instant::now() => {
                self.state = NotificationState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

}

impl Default for NotificationController {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}
