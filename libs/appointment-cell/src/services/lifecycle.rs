// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

#[derive(Debug, Default, Clone, Copy)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Cancelled,
                AppointmentStatus::Completed,
            ],
            // Terminal states
            AppointmentStatus::Cancelled => vec![],
            AppointmentStatus::Completed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn follows_confirm_then_complete_path() {
        let lifecycle = AppointmentLifecycleService::new();
        for from in [AppointmentStatus::Scheduled, AppointmentStatus::Confirmed] {
            assert!(lifecycle.validate_status_transition(from, AppointmentStatus::Cancelled).is_ok());
        }
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::Confirmed)
            .is_ok());
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Confirmed, AppointmentStatus::Completed)
            .is_ok());
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::Completed)
            .is_err());
    }

    #[test]
    fn terminal_states_reject_everything() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle.get_valid_transitions(AppointmentStatus::Cancelled).is_empty());
        assert_matches!(
            lifecycle.validate_status_transition(AppointmentStatus::Completed, AppointmentStatus::Scheduled),
            Err(AppointmentError::InvalidStatusTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Scheduled,
            })
        );
    }

    #[test]
    fn confirmed_cannot_go_back_to_scheduled() {
        let lifecycle = AppointmentLifecycleService::new();
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Confirmed, AppointmentStatus::Scheduled)
            .is_err());
    }
}
