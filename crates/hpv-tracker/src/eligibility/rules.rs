use super::domain::{ScreeningAnswers, Sex};
use super::policy::EligibilityStatus;
use crate::program::{ProgramConfig, SexEligibility};

/// One step of a first-match-wins cascade.
pub(crate) struct Rule<F> {
    pub name: &'static str,
    pub applies: fn(&F) -> bool,
    pub status: EligibilityStatus,
}

pub(crate) fn first_match<'r, F>(rules: &'r [Rule<F>], facts: &F) -> Option<&'r Rule<F>> {
    rules.iter().find(|rule| (rule.applies)(facts))
}

/// Medical-safety rules; these outrank every age and program rule.
pub(crate) const SCREENING_RULES: [Rule<ScreeningAnswers>; 3] = [
    Rule {
        name: "allergy_contraindication",
        applies: has_allergy_contraindication,
        status: EligibilityStatus::ClinicianReview,
    },
    Rule {
        name: "acute_fever",
        applies: has_acute_fever,
        status: EligibilityStatus::Defer,
    },
    Rule {
        name: "pregnancy",
        applies: is_pregnant,
        status: EligibilityStatus::DeferPregnancy,
    },
];

/// Applied when no age can be resolved from the profile.
pub(crate) const UNRESOLVED_AGE_RULE: Rule<()> = Rule {
    name: "age_unresolved",
    applies: always,
    status: EligibilityStatus::ClinicianReview,
};

/// Age and sex rules, evaluated once an age is known.
pub(crate) const PROGRAM_RULES: [Rule<ProgramFacts>; 3] = [
    Rule {
        name: "below_minimum_age",
        applies: is_below_minimum_age,
        status: EligibilityStatus::NotEligibleYet,
    },
    Rule {
        name: "beyond_catchup_age",
        applies: is_beyond_program_ages,
        status: EligibilityStatus::OutOfProgram,
    },
    Rule {
        name: "female_only_program",
        applies: is_excluded_by_sex,
        status: EligibilityStatus::GirlsOnlyMale,
    },
];

pub(crate) const ELIGIBLE_RULE: Rule<ProgramFacts> = Rule {
    name: "program_criteria_met",
    applies: always,
    status: EligibilityStatus::EligibleNow,
};

/// The slice of profile and configuration the program rules read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProgramFacts {
    pub age: u32,
    pub sex: Option<Sex>,
    pub min_age_years: u32,
    pub routine_age_max_years: u32,
    pub catchup_age_max_years: u32,
    pub sex_eligibility: SexEligibility,
}

impl ProgramFacts {
    pub fn new(age: u32, sex: Option<Sex>, config: &ProgramConfig) -> Self {
        Self {
            age,
            sex,
            min_age_years: config.min_age_years,
            routine_age_max_years: config.routine_age_max_years,
            catchup_age_max_years: config.allow_catchup_age_max_years,
            sex_eligibility: config.sex_eligibility,
        }
    }
}

fn always<F>(_: &F) -> bool {
    true
}

fn has_allergy_contraindication(screening: &ScreeningAnswers) -> bool {
    screening.anaphylaxis || screening.yeast_allergy
}

fn has_acute_fever(screening: &ScreeningAnswers) -> bool {
    screening.very_sick_fever
}

fn is_pregnant(screening: &ScreeningAnswers) -> bool {
    screening.pregnant == Some(true)
}

fn is_below_minimum_age(facts: &ProgramFacts) -> bool {
    facts.age < facts.min_age_years
}

// Past routine age but within catch-up is still in the program.
fn is_beyond_program_ages(facts: &ProgramFacts) -> bool {
    facts.age > facts.routine_age_max_years && facts.age > facts.catchup_age_max_years
}

fn is_excluded_by_sex(facts: &ProgramFacts) -> bool {
    facts.sex_eligibility == SexEligibility::FemaleOnly && facts.sex == Some(Sex::Male)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(age: u32) -> ProgramFacts {
        ProgramFacts::new(age, Some(Sex::Female), &ProgramConfig::standard())
    }

    #[test]
    fn screening_rules_are_ordered_by_severity() {
        let names: Vec<_> = SCREENING_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names, ["allergy_contraindication", "acute_fever", "pregnancy"]);
    }

    #[test]
    fn yeast_allergy_alone_triggers_contraindication() {
        let screening = ScreeningAnswers {
            yeast_allergy: true,
            ..ScreeningAnswers::default()
        };
        let rule = first_match(&SCREENING_RULES, &screening).expect("rule matches");
        assert_eq!(rule.name, "allergy_contraindication");
    }

    #[test]
    fn pregnancy_not_asked_does_not_defer() {
        let screening = ScreeningAnswers {
            pregnant: None,
            ..ScreeningAnswers::default()
        };
        assert!(first_match(&SCREENING_RULES, &screening).is_none());

        let declined = ScreeningAnswers {
            pregnant: Some(false),
            ..ScreeningAnswers::default()
        };
        assert!(first_match(&SCREENING_RULES, &declined).is_none());
    }

    #[test]
    fn catchup_window_requires_both_maximums_exceeded() {
        assert!(!is_beyond_program_ages(&facts(14)));
        assert!(!is_beyond_program_ages(&facts(30)));
        assert!(!is_beyond_program_ages(&facts(45)));
        assert!(is_beyond_program_ages(&facts(46)));
    }

    #[test]
    fn sex_rule_ignores_unknown_sex() {
        let mut config = ProgramConfig::standard();
        config.sex_eligibility = SexEligibility::FemaleOnly;

        assert!(is_excluded_by_sex(&ProgramFacts::new(12, Some(Sex::Male), &config)));
        assert!(!is_excluded_by_sex(&ProgramFacts::new(12, None, &config)));
        assert!(!is_excluded_by_sex(&ProgramFacts::new(12, Some(Sex::Female), &config)));
    }
}
