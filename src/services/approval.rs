use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The two independent sign-off authorities. Their approvals are order-free
/// and commutative; neither can act for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Authority {
    Tusc,
    Dsw,
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authority::Tusc => write!(f, "TUSC"),
            Authority::Dsw => write!(f, "DSW"),
        }
    }
}

/// Dual-approval state machine shared by events and score records.
///
/// `finalized` is the persisted public-visibility bit: it is set only by an
/// explicit [`finalize`](Self::finalize) once both flags are true, and any
/// retraction clears it, so `finalized` implies `tusc && dsw` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DualApprovalGate {
    pub tusc: bool,
    pub dsw: bool,
    pub finalized: bool,
}

impl DualApprovalGate {
    /// Record an authority's approval. Approving twice is a no-op; returns
    /// whether the gate changed.
    pub fn approve(&mut self, authority: Authority) -> bool {
        let flag = self.flag_mut(authority);
        let changed = !*flag;
        *flag = true;
        changed
    }

    /// Retract an authority's approval. The other authority's flag is left
    /// alone, but public visibility is withdrawn with the approval.
    pub fn retract(&mut self, authority: Authority) -> bool {
        let flag = self.flag_mut(authority);
        let changed = *flag;
        *flag = false;
        if changed {
            self.finalized = false;
        }
        changed
    }

    pub fn fully_approved(&self) -> bool {
        self.tusc && self.dsw
    }

    /// Mark the governed record as publicly visible. Requires both
    /// approvals; anything less is a precondition failure, not a no-op.
    pub fn finalize(&mut self) -> Result<(), AppError> {
        if !self.fully_approved() {
            return Err(AppError::Precondition(
                "Both TUSC and DSW approval are required before finalizing".to_string(),
            ));
        }
        self.finalized = true;
        Ok(())
    }

    fn flag_mut(&mut self, authority: Authority) -> &mut bool {
        match authority {
            Authority::Tusc => &mut self.tusc,
            Authority::Dsw => &mut self.dsw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn approvals_are_independent_and_order_free() {
        let mut a = DualApprovalGate::default();
        a.approve(Authority::Tusc);
        a.approve(Authority::Dsw);

        let mut b = DualApprovalGate::default();
        b.approve(Authority::Dsw);
        b.approve(Authority::Tusc);

        assert_eq!(a, b);
        assert!(a.fully_approved());
    }

    #[test]
    fn approve_is_idempotent() {
        let mut gate = DualApprovalGate::default();
        assert!(gate.approve(Authority::Tusc));
        let snapshot = gate;
        assert!(!gate.approve(Authority::Tusc));
        assert_eq!(gate, snapshot);
    }

    #[test]
    fn finalize_requires_both_approvals() {
        let mut gate = DualApprovalGate::default();
        gate.approve(Authority::Tusc);
        assert!(matches!(
            gate.finalize(),
            Err(AppError::Precondition(_))
        ));
        assert!(!gate.finalized);

        gate.approve(Authority::Dsw);
        gate.finalize().unwrap();
        assert!(gate.finalized);
    }

    #[test]
    fn retract_clears_only_own_flag_and_finalized() {
        let mut gate = DualApprovalGate::default();
        gate.approve(Authority::Tusc);
        gate.approve(Authority::Dsw);
        gate.finalize().unwrap();

        gate.retract(Authority::Dsw);
        assert!(gate.tusc);
        assert!(!gate.dsw);
        assert!(!gate.finalized);
    }

    #[test]
    fn retract_without_prior_approval_is_a_no_op() {
        let mut gate = DualApprovalGate::default();
        gate.approve(Authority::Tusc);
        gate.approve(Authority::Dsw);
        gate.finalize().unwrap();

        // retracting a flag that is already false must not disturb finalized
        let mut probe = gate;
        probe.retract(Authority::Dsw);
        probe.approve(Authority::Dsw);
        assert!(!probe.finalized);

        let mut untouched = DualApprovalGate::default();
        assert!(!untouched.retract(Authority::Tusc));
        assert_eq!(untouched, DualApprovalGate::default());
    }

    #[test]
    fn finalized_implies_both_flags_across_any_sequence() {
        use Authority::{Dsw, Tusc};

        let sequences: &[&[(bool, Authority)]] = &[
            &[(true, Tusc), (true, Dsw), (false, Tusc)],
            &[(true, Dsw), (false, Dsw), (true, Tusc)],
            &[(true, Tusc), (true, Dsw), (false, Dsw), (true, Dsw)],
        ];

        for seq in sequences {
            let mut gate = DualApprovalGate::default();
            for (approve, authority) in *seq {
                if *approve {
                    gate.approve(*authority);
                } else {
                    gate.retract(*authority);
                }
                let _ = gate.finalize();
                assert!(!gate.finalized || (gate.tusc && gate.dsw));
            }
        }
    }
}
