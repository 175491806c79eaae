use serde::{Deserialize, Serialize};

/// Outcome of screening a person against the medical and program rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    EligibleNow,
    NotEligibleYet,
    OutOfProgram,
    ClinicianReview,
    Defer,
    DeferPregnancy,
    GirlsOnlyMale,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::EligibleNow => "eligible_now",
            EligibilityStatus::NotEligibleYet => "not_eligible_yet",
            EligibilityStatus::OutOfProgram => "out_of_program",
            EligibilityStatus::ClinicianReview => "clinician_review",
            EligibilityStatus::Defer => "defer",
            EligibilityStatus::DeferPregnancy => "defer_pregnancy",
            EligibilityStatus::GirlsOnlyMale => "girls_only_male",
        }
    }

    /// Copy shown to the family once the status is known.
    pub const fn message(self) -> &'static str {
        match self {
            EligibilityStatus::EligibleNow => {
                "You're eligible to get the HPV vaccine. Next: find a location."
            }
            EligibilityStatus::NotEligibleYet => {
                "Not eligible yet. Check again when you are older."
            }
            EligibilityStatus::OutOfProgram => {
                "You may not be in this program's age range. Contact a clinic to ask about options."
            }
            EligibilityStatus::GirlsOnlyMale => {
                "This program currently targets girls. Contact a clinic to ask about options."
            }
            EligibilityStatus::Defer => {
                "Please wait until you feel better before getting vaccinated."
            }
            EligibilityStatus::DeferPregnancy => "Delay vaccination until after pregnancy.",
            EligibilityStatus::ClinicianReview => {
                "Please consult with a healthcare provider before getting vaccinated."
            }
        }
    }

    /// Temporary holds that should be re-screened later.
    pub const fn is_deferral(self) -> bool {
        matches!(
            self,
            EligibilityStatus::Defer | EligibilityStatus::DeferPregnancy
        )
    }

    /// Whether the family can go on to pick a clinic.
    pub const fn can_proceed(self) -> bool {
        matches!(self, EligibilityStatus::EligibleNow)
    }
}
