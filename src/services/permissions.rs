use crate::database::models::Role;
use crate::services::approval::Authority;

/// Everything a caller can ask the core to do. Kept closed so the
/// (action, role) table below is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageHostels,
    ManageStudents,
    CreateEvent,
    EditEvent,
    DeleteEvent,
    ApproveEvent,
    FinalizeEvent,
    CreateTeam,
    ManageTeamMembers,
    RegisterParticipation,
    RegisterOnBehalf,
    CancelParticipation,
    UpdateResult,
    RecordScore,
    VerifyScore,
}

/// The permission table. A plain match instead of role-string comparisons
/// scattered through the handlers; adding a role or action forces every
/// combination to be considered here.
pub fn is_allowed(role: Role, action: Action) -> bool {
    use Action::*;
    use Role::*;

    match action {
        ManageHostels => matches!(role, Dsw),
        ManageStudents => matches!(role, Dsw | HostelAdmin),
        CreateEvent | EditEvent | DeleteEvent => matches!(role, Tusc | Dsw),
        ApproveEvent => matches!(role, Tusc | Dsw),
        FinalizeEvent => matches!(role, Tusc | Dsw),
        CreateTeam => matches!(role, Student | HostelAdmin),
        ManageTeamMembers => matches!(role, Student | HostelAdmin),
        RegisterParticipation => matches!(role, Student | HostelAdmin),
        RegisterOnBehalf => matches!(role, HostelAdmin),
        CancelParticipation => matches!(role, Student | HostelAdmin),
        UpdateResult => matches!(role, Tusc | Dsw | HostelAdmin),
        RecordScore => matches!(role, Tusc | Dsw | HostelAdmin),
        VerifyScore => matches!(role, Tusc | Dsw),
    }
}

/// The approval authority a role acts as, if any. Approval endpoints take
/// the authority from the caller's role rather than the request body, so
/// neither committee can sign off for the other.
pub fn authority_for(role: Role) -> Option<Authority> {
    match role {
        Role::Tusc => Some(Authority::Tusc),
        Role::Dsw => Some(Authority::Dsw),
        Role::Student | Role::HostelAdmin => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_authorities_approve_and_verify() {
        for role in [Role::Student, Role::HostelAdmin] {
            assert!(!is_allowed(role, Action::ApproveEvent));
            assert!(!is_allowed(role, Action::VerifyScore));
            assert!(!is_allowed(role, Action::FinalizeEvent));
            assert!(authority_for(role).is_none());
        }
        for role in [Role::Tusc, Role::Dsw] {
            assert!(is_allowed(role, Action::ApproveEvent));
            assert!(is_allowed(role, Action::VerifyScore));
            assert!(authority_for(role).is_some());
        }
    }

    #[test]
    fn authority_roles_map_to_their_own_committee() {
        assert_eq!(authority_for(Role::Tusc), Some(Authority::Tusc));
        assert_eq!(authority_for(Role::Dsw), Some(Authority::Dsw));
    }

    #[test]
    fn students_register_but_do_not_act_on_behalf() {
        assert!(is_allowed(Role::Student, Action::RegisterParticipation));
        assert!(!is_allowed(Role::Student, Action::RegisterOnBehalf));
        assert!(is_allowed(Role::HostelAdmin, Action::RegisterOnBehalf));
    }

    #[test]
    fn hostel_management_is_dsw_only() {
        assert!(is_allowed(Role::Dsw, Action::ManageHostels));
        for role in [Role::Student, Role::HostelAdmin, Role::Tusc] {
            assert!(!is_allowed(role, Action::ManageHostels));
        }
    }
}
