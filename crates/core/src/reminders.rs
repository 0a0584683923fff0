//! Reminder lifecycle: lead-time validation, fire-time arithmetic, and the
//! status state machine.
//!
//! A reminder fires `minutes_before` minutes ahead of its program's start
//! time. The fire time is always derived, never hand-set: it is computed at
//! creation and recomputed whenever the lead time changes, from the
//! program's current start time at that moment.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Lead time
// ---------------------------------------------------------------------------

/// Minimum lead time in minutes.
pub const MIN_MINUTES_BEFORE: i32 = 1;

/// Maximum lead time in minutes (24 hours).
pub const MAX_MINUTES_BEFORE: i32 = 1440;

/// Lead time applied when the caller does not supply one.
pub const DEFAULT_MINUTES_BEFORE: i32 = 15;

/// Validate that a lead time is within the accepted range.
pub fn validate_minutes_before(minutes: i32) -> Result<(), CoreError> {
    if !(MIN_MINUTES_BEFORE..=MAX_MINUTES_BEFORE).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "minutes_before must be between {MIN_MINUTES_BEFORE} and {MAX_MINUTES_BEFORE}, \
             got {minutes}"
        )));
    }
    Ok(())
}

/// Fire time derived from the program start and the lead time.
pub fn scheduled_for(program_start: Timestamp, minutes_before: i32) -> Timestamp {
    program_start - Duration::minutes(i64::from(minutes_before))
}

// ---------------------------------------------------------------------------
// Delivery-channel hints
// ---------------------------------------------------------------------------

/// Mobile push notification.
pub const TYPE_PUSH: &str = "push";

/// In-app notification bell.
pub const TYPE_IN_APP: &str = "inapp";

/// Email delivery.
pub const TYPE_EMAIL: &str = "email";

/// SMS delivery.
pub const TYPE_SMS: &str = "sms";

/// All valid delivery-channel hints.
pub const VALID_REMINDER_TYPES: &[&str] = &[TYPE_PUSH, TYPE_IN_APP, TYPE_EMAIL, TYPE_SMS];

/// Delivery-channel hint applied when the caller does not supply one.
pub const DEFAULT_REMINDER_TYPE: &str = TYPE_PUSH;

/// Validate that a delivery-channel hint is one of the accepted values.
pub fn validate_reminder_type(reminder_type: &str) -> Result<(), CoreError> {
    if VALID_REMINDER_TYPES.contains(&reminder_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid reminder_type '{reminder_type}'. Must be one of: {}",
            VALID_REMINDER_TYPES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Lifecycle status of a reminder.
///
/// `Scheduled` is the only non-terminal state. Delivery transitions a
/// reminder to `Sent` or `Failed`; the owning user transitions it to
/// `Cancelled`. Nothing ever transitions back to `Scheduled`; a user who
/// changes their mind creates a new reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Scheduled,
    Sent,
    Cancelled,
    Failed,
}

impl ReminderStatus {
    /// Storage representation, matching the `program_reminders.status`
    /// column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// Parse a stored status value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "sent" => Ok(Self::Sent),
            "cancelled" => Ok(Self::Cancelled),
            "failed" => Ok(Self::Failed),
            other => Err(CoreError::Validation(format!(
                "Invalid reminder status '{other}'. \
                 Must be one of: scheduled, sent, cancelled, failed"
            ))),
        }
    }

    /// The set of statuses reachable from `self`.
    ///
    /// Terminal states return an empty slice because no further
    /// transitions are allowed.
    pub fn valid_transitions(self) -> &'static [Self] {
        match self {
            Self::Scheduled => &[Self::Sent, Self::Cancelled, Self::Failed],
            Self::Sent | Self::Cancelled | Self::Failed => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(self, to: Self) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// Validate a state transition, naming both states in the error.
pub fn validate_transition(from: ReminderStatus, to: ReminderStatus) -> Result<(), CoreError> {
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Invalid reminder transition: {} -> {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // -- scheduled_for --------------------------------------------------------

    #[test]
    fn fire_time_is_lead_minutes_before_start() {
        let start = Utc.with_ymd_and_hms(2026, 2, 13, 19, 30, 0).unwrap();

        assert_eq!(
            scheduled_for(start, 15),
            Utc.with_ymd_and_hms(2026, 2, 13, 19, 15, 0).unwrap()
        );
        assert_eq!(
            scheduled_for(start, 30),
            Utc.with_ymd_and_hms(2026, 2, 13, 19, 0, 0).unwrap()
        );
    }

    #[test]
    fn max_lead_time_crosses_to_previous_day() {
        let start = Utc.with_ymd_and_hms(2026, 2, 13, 12, 0, 0).unwrap();
        assert_eq!(
            scheduled_for(start, MAX_MINUTES_BEFORE),
            Utc.with_ymd_and_hms(2026, 2, 12, 12, 0, 0).unwrap()
        );
    }

    // -- validate_minutes_before ----------------------------------------------

    #[test]
    fn lead_time_bounds() {
        assert!(validate_minutes_before(1).is_ok());
        assert!(validate_minutes_before(15).is_ok());
        assert!(validate_minutes_before(1440).is_ok());
        assert!(validate_minutes_before(0).is_err());
        assert!(validate_minutes_before(1441).is_err());
        assert!(validate_minutes_before(-5).is_err());
    }

    // -- validate_reminder_type -----------------------------------------------

    #[test]
    fn known_reminder_types_accepted() {
        for t in VALID_REMINDER_TYPES {
            assert!(validate_reminder_type(t).is_ok());
        }
    }

    #[test]
    fn unknown_reminder_type_rejected() {
        assert!(validate_reminder_type("carrier-pigeon").is_err());
        assert!(validate_reminder_type("").is_err());
    }

    // -- state machine --------------------------------------------------------

    #[test]
    fn scheduled_reaches_all_terminal_states() {
        assert!(ReminderStatus::Scheduled.can_transition(ReminderStatus::Sent));
        assert!(ReminderStatus::Scheduled.can_transition(ReminderStatus::Cancelled));
        assert!(ReminderStatus::Scheduled.can_transition(ReminderStatus::Failed));
    }

    #[test]
    fn terminal_states_admit_no_transitions() {
        for status in [
            ReminderStatus::Sent,
            ReminderStatus::Cancelled,
            ReminderStatus::Failed,
        ] {
            assert!(status.is_terminal());
            assert!(status.valid_transitions().is_empty());
        }
    }

    #[test]
    fn nothing_returns_to_scheduled() {
        for status in [
            ReminderStatus::Sent,
            ReminderStatus::Cancelled,
            ReminderStatus::Failed,
        ] {
            assert!(!status.can_transition(ReminderStatus::Scheduled));
        }
    }

    #[test]
    fn invalid_transition_is_a_conflict() {
        let err = validate_transition(ReminderStatus::Sent, ReminderStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [
            ReminderStatus::Scheduled,
            ReminderStatus::Sent,
            ReminderStatus::Cancelled,
            ReminderStatus::Failed,
        ] {
            assert_eq!(ReminderStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(ReminderStatus::parse("pending").is_err());
    }
}
