//! Status workflow
//!
//! Maps a report's current status and the acting user's role to the set of
//! permitted next statuses. `Completado` is terminal: once a report is
//! completed no role may move it again. `Cancelado` is deliberately not
//! terminal and stays editable by managing roles.

use crate::domain::profile::UserRole;
use crate::domain::report::ReportStatus;

/// Outcome of checking a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    /// The report is completed; no transition is possible for any role.
    Locked,
    /// The acting role may not mutate status at all.
    Forbidden,
    /// The requested status equals the current one; nothing to do.
    NoOp,
    /// The change is permitted.
    Allowed,
}

/// Check whether `role` may move a report from `current` to `requested`.
pub fn check_transition(
    role: UserRole,
    current: ReportStatus,
    requested: ReportStatus,
) -> TransitionDecision {
    if current.is_terminal() {
        return TransitionDecision::Locked;
    }
    if !role.can_manage_status() {
        return TransitionDecision::Forbidden;
    }
    if current == requested {
        return TransitionDecision::NoOp;
    }
    TransitionDecision::Allowed
}

/// The statuses `role` may move a report in `current` into. Empty when the
/// report is locked or the role is read-only; used by the API to tell
/// clients whether to render the status control as locked.
pub fn allowed_targets(role: UserRole, current: ReportStatus) -> Vec<ReportStatus> {
    if current.is_terminal() || !role.can_manage_status() {
        return Vec::new();
    }
    ReportStatus::ALL
        .into_iter()
        .filter(|s| *s != current)
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MANAGING: [UserRole; 3] = [UserRole::Admin, UserRole::Superuser, UserRole::Supervisor];

    #[test]
    fn completado_is_locked_for_every_role() {
        for role in [
            UserRole::Admin,
            UserRole::Superuser,
            UserRole::Supervisor,
            UserRole::Technician,
        ] {
            for target in ReportStatus::ALL {
                assert_eq!(
                    check_transition(role, ReportStatus::Completado, target),
                    TransitionDecision::Locked,
                );
            }
            assert!(allowed_targets(role, ReportStatus::Completado).is_empty());
        }
    }

    #[test]
    fn technician_is_read_only() {
        assert_eq!(
            check_transition(
                UserRole::Technician,
                ReportStatus::Pendiente,
                ReportStatus::EnProgreso,
            ),
            TransitionDecision::Forbidden,
        );
        assert!(allowed_targets(UserRole::Technician, ReportStatus::Pendiente).is_empty());
    }

    #[test]
    fn same_status_is_a_noop() {
        for role in MANAGING {
            assert_eq!(
                check_transition(role, ReportStatus::EnProgreso, ReportStatus::EnProgreso),
                TransitionDecision::NoOp,
            );
        }
    }

    #[test]
    fn managing_roles_reach_every_other_status() {
        for role in MANAGING {
            for current in ReportStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
                let targets = allowed_targets(role, current);
                assert_eq!(targets.len(), ReportStatus::ALL.len() - 1);
                assert!(!targets.contains(&current));
                assert!(targets.contains(&ReportStatus::Completado));
                assert!(targets.contains(&ReportStatus::Cancelado));
                for target in targets {
                    assert_eq!(
                        check_transition(role, current, target),
                        TransitionDecision::Allowed,
                    );
                }
            }
        }
    }

    #[test]
    fn cancelado_is_not_terminal() {
        assert_eq!(
            check_transition(
                UserRole::Admin,
                ReportStatus::Cancelado,
                ReportStatus::Pendiente,
            ),
            TransitionDecision::Allowed,
        );
    }
}
