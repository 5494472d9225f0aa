use uuid::Uuid;

use crate::database::models::{EventCategory, Hostel, MemberAffiliation};
use crate::error::AppError;

/// Decide whether adding `candidate` to a team keeps its composition legal
/// under `category`. Pure check; the caller performs the insert on `Ok`.
///
/// Sports teams draw every member from one hostel; the first sports member
/// sets the precedent. Cultural teams may combine at most one boys' hostel
/// and one girls' hostel at a time.
pub fn can_add_member(
    category: EventCategory,
    candidate_student_id: Uuid,
    candidate_hostel: Option<&Hostel>,
    current_members: &[MemberAffiliation],
) -> Result<(), AppError> {
    if current_members
        .iter()
        .any(|m| m.student_id == candidate_student_id)
    {
        return Err(AppError::Conflict(
            "Student is already a member of this team".to_string(),
        ));
    }

    // Hostel identity is the basis of every composition rule; an
    // unaffiliated student cannot be classified under either of them.
    let hostel = candidate_hostel.ok_or_else(|| {
        AppError::Validation("Student has no hostel affiliation".to_string())
    })?;

    match category {
        EventCategory::Sports => {
            let mismatch = current_members
                .iter()
                .filter(|m| m.category == EventCategory::Sports)
                .any(|m| m.hostel_id != Some(hostel.id));
            if mismatch {
                return Err(AppError::Eligibility(
                    "A sports team may only draw members from a single hostel".to_string(),
                ));
            }
        }
        EventCategory::Cultural => {
            // one distinct hostel per gender partition; members whose hostel
            // is no longer on record cannot be classified and do not count
            let second_hostel = current_members
                .iter()
                .filter(|m| m.category == EventCategory::Cultural)
                .filter(|m| m.hostel_gender == Some(hostel.gender))
                .any(|m| m.hostel_id != Some(hostel.id));
            if second_hostel {
                return Err(AppError::Eligibility(format!(
                    "A cultural team may draw members from at most one {} hostel",
                    hostel.gender
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::HostelGender;
    use chrono::Utc;

    fn hostel(id: Uuid, gender: HostelGender) -> Hostel {
        Hostel {
            id,
            name: format!("hostel-{}", id),
            gender,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn member(
        student_id: Uuid,
        category: EventCategory,
        hostel: Option<&Hostel>,
    ) -> MemberAffiliation {
        MemberAffiliation {
            student_id,
            category,
            hostel_id: hostel.map(|h| h.id),
            hostel_gender: hostel.map(|h| h.gender),
        }
    }

    #[test]
    fn empty_sports_roster_accepts_any_hostel() {
        let h = hostel(Uuid::new_v4(), HostelGender::Boys);
        can_add_member(EventCategory::Sports, Uuid::new_v4(), Some(&h), &[]).unwrap();
    }

    #[test]
    fn sports_roster_rejects_second_hostel() {
        let h1 = hostel(Uuid::new_v4(), HostelGender::Boys);
        let h2 = hostel(Uuid::new_v4(), HostelGender::Boys);
        let members = vec![member(Uuid::new_v4(), EventCategory::Sports, Some(&h1))];

        let err = can_add_member(EventCategory::Sports, Uuid::new_v4(), Some(&h2), &members)
            .unwrap_err();
        assert!(matches!(err, AppError::Eligibility(_)));
    }

    #[test]
    fn sports_roster_accepts_same_hostel() {
        let h = hostel(Uuid::new_v4(), HostelGender::Girls);
        let members = vec![
            member(Uuid::new_v4(), EventCategory::Sports, Some(&h)),
            member(Uuid::new_v4(), EventCategory::Sports, Some(&h)),
        ];

        can_add_member(EventCategory::Sports, Uuid::new_v4(), Some(&h), &members).unwrap();
    }

    #[test]
    fn sports_rule_ignores_cultural_members() {
        let h1 = hostel(Uuid::new_v4(), HostelGender::Boys);
        let h2 = hostel(Uuid::new_v4(), HostelGender::Boys);
        // a cultural member from another hostel does not constrain the
        // sports roster
        let members = vec![member(Uuid::new_v4(), EventCategory::Cultural, Some(&h1))];

        can_add_member(EventCategory::Sports, Uuid::new_v4(), Some(&h2), &members).unwrap();
    }

    #[test]
    fn cultural_roster_allows_one_hostel_per_gender() {
        let boys = hostel(Uuid::new_v4(), HostelGender::Boys);
        let girls = hostel(Uuid::new_v4(), HostelGender::Girls);
        let members = vec![member(Uuid::new_v4(), EventCategory::Cultural, Some(&boys))];

        can_add_member(
            EventCategory::Cultural,
            Uuid::new_v4(),
            Some(&girls),
            &members,
        )
        .unwrap();
    }

    #[test]
    fn cultural_roster_rejects_second_hostel_within_gender() {
        let boys_a = hostel(Uuid::new_v4(), HostelGender::Boys);
        let boys_b = hostel(Uuid::new_v4(), HostelGender::Boys);
        let girls = hostel(Uuid::new_v4(), HostelGender::Girls);
        let members = vec![
            member(Uuid::new_v4(), EventCategory::Cultural, Some(&boys_a)),
            member(Uuid::new_v4(), EventCategory::Cultural, Some(&girls)),
        ];

        let err = can_add_member(
            EventCategory::Cultural,
            Uuid::new_v4(),
            Some(&boys_b),
            &members,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Eligibility(_)));
    }

    #[test]
    fn cultural_roster_accepts_repeat_of_established_hostel() {
        let boys = hostel(Uuid::new_v4(), HostelGender::Boys);
        let girls = hostel(Uuid::new_v4(), HostelGender::Girls);
        let members = vec![
            member(Uuid::new_v4(), EventCategory::Cultural, Some(&boys)),
            member(Uuid::new_v4(), EventCategory::Cultural, Some(&girls)),
        ];

        can_add_member(
            EventCategory::Cultural,
            Uuid::new_v4(),
            Some(&boys),
            &members,
        )
        .unwrap();
    }

    #[test]
    fn unaffiliated_candidate_is_rejected() {
        let err =
            can_add_member(EventCategory::Sports, Uuid::new_v4(), None, &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err =
            can_add_member(EventCategory::Cultural, Uuid::new_v4(), None, &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn existing_member_is_rejected() {
        let h = hostel(Uuid::new_v4(), HostelGender::Boys);
        let student_id = Uuid::new_v4();
        let members = vec![member(student_id, EventCategory::Sports, Some(&h))];

        let err =
            can_add_member(EventCategory::Sports, student_id, Some(&h), &members).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn sports_member_without_hostel_on_record_blocks_additions() {
        let h = hostel(Uuid::new_v4(), HostelGender::Boys);
        let members = vec![member(Uuid::new_v4(), EventCategory::Sports, None)];

        let err = can_add_member(EventCategory::Sports, Uuid::new_v4(), Some(&h), &members)
            .unwrap_err();
        assert!(matches!(err, AppError::Eligibility(_)));
    }
}
