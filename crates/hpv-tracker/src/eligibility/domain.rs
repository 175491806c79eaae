use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

/// Demographic facts about a vaccinee, as collected during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// ISO `YYYY-MM-DD` as entered. Parsed only once age is needed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub is_self: bool,
}

impl Profile {
    pub fn with_age(age_years: u32) -> Self {
        Self {
            age_years: Some(age_years),
            ..Self::default()
        }
    }

    pub fn with_date_of_birth(date_of_birth: impl Into<String>) -> Self {
        Self {
            date_of_birth: Some(date_of_birth.into()),
            ..Self::default()
        }
    }
}

/// Medical-safety questionnaire answers. Every flag must be answered except
/// `pregnant`, which is `None` when the question was not asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningAnswers {
    pub anaphylaxis: bool,
    pub yeast_allergy: bool,
    pub very_sick_fever: bool,
    pub immunocompromised: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnant: Option<bool>,
}
