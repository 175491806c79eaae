use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Vaccination site a family can be referred to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: String,
    pub name: String,
    pub area_tags: Vec<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicDirectoryError {
    #[error("failed to read clinic directory at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("clinic directory must be a JSON array of clinics: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("clinic at position {index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("clinic id '{0}' appears more than once")]
    DuplicateId(String),
}

/// Validated list of clinics, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClinicDirectory {
    clinics: Vec<Clinic>,
}

impl ClinicDirectory {
    pub fn new(clinics: Vec<Clinic>) -> Result<Self, ClinicDirectoryError> {
        let mut seen = HashSet::new();

        for (index, clinic) in clinics.iter().enumerate() {
            let missing = [
                ("id", &clinic.id),
                ("name", &clinic.name),
                ("phone", &clinic.phone),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

            if let Some((field, _)) = missing {
                return Err(ClinicDirectoryError::MissingField { index, field });
            }

            if !seen.insert(clinic.id.as_str()) {
                return Err(ClinicDirectoryError::DuplicateId(clinic.id.clone()));
            }
        }

        Ok(Self { clinics })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ClinicDirectoryError> {
        let clinics: Vec<Clinic> =
            serde_json::from_str(raw).map_err(ClinicDirectoryError::Parse)?;
        Self::new(clinics)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClinicDirectoryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ClinicDirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn clinics(&self) -> &[Clinic] {
        &self.clinics
    }

    pub fn len(&self) -> usize {
        self.clinics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clinics.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Clinic> {
        self.clinics.iter().find(|clinic| clinic.id == id)
    }

    /// Clinics tagged with `area`, compared case-insensitively.
    pub fn in_area(&self, area: &str) -> Vec<&Clinic> {
        let area = area.trim();
        self.clinics
            .iter()
            .filter(|clinic| {
                clinic
                    .area_tags
                    .iter()
                    .any(|tag| tag.trim().eq_ignore_ascii_case(area))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLINICS: &str = r#"[
        {
            "id": "kib-01",
            "name": "Kibera Health Centre",
            "area_tags": ["Kibera", "Nairobi"],
            "phone": "+254700000001",
            "hours": "Mon-Fri 08:00-17:00"
        },
        {
            "id": "wes-02",
            "name": "Westlands Clinic",
            "area_tags": ["Westlands", "nairobi"],
            "phone": "+254700000002",
            "whatsapp": "+254700000002"
        }
    ]"#;

    #[test]
    fn loads_and_filters_by_area() {
        let directory = ClinicDirectory::from_json_str(CLINICS).expect("directory loads");
        assert_eq!(directory.len(), 2);

        let nairobi = directory.in_area("NAIROBI");
        assert_eq!(nairobi.len(), 2);

        let kibera = directory.in_area("kibera");
        assert_eq!(kibera.len(), 1);
        assert_eq!(kibera[0].id, "kib-01");
        assert!(directory.in_area("Mombasa").is_empty());
    }

    #[test]
    fn rejects_non_array_document() {
        assert!(matches!(
            ClinicDirectory::from_json_str(r#"{"clinics": []}"#),
            Err(ClinicDirectoryError::Parse(_))
        ));
    }

    #[test]
    fn rejects_blank_phone() {
        let mut clinics: Vec<Clinic> = serde_json::from_str(CLINICS).expect("fixture parses");
        clinics[1].phone = "  ".to_string();

        match ClinicDirectory::new(clinics) {
            Err(ClinicDirectoryError::MissingField { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "phone");
            }
            other => panic!("expected missing phone, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = CLINICS.replace("wes-02", "kib-01");
        match ClinicDirectory::from_json_str(&raw) {
            Err(ClinicDirectoryError::DuplicateId(id)) => assert_eq!(id, "kib-01"),
            other => panic!("expected duplicate id, got {other:?}"),
        }
    }
}
