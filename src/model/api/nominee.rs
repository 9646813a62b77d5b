use serde::{Deserialize, Serialize};

use crate::config::ValidationMode;
use crate::model::{
    api::id::ApiId,
    common::category::Category,
    db::nominee::{NewNominee, Nominee},
};

/// A nominee as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineeSpec {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub vote_count: i64,
}

impl NomineeSpec {
    /// Describe what, if anything, makes this record unacceptable under strict validation.
    fn strict_violation(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name must not be empty")
        } else if self.vote_count < 0 {
            Some("vote_count must not be negative")
        } else {
            None
        }
    }
}

impl From<NomineeSpec> for NewNominee {
    fn from(spec: NomineeSpec) -> Self {
        Self {
            name: spec.name,
            category: spec.category,
            vote_count: spec.vote_count,
        }
    }
}

/// Check a creation batch against the configured strictness.
///
/// Returns a message naming the first offending record, if any.
pub fn validate_batch(specs: &[NomineeSpec], mode: ValidationMode) -> Result<(), String> {
    if mode == ValidationMode::Lenient {
        return Ok(());
    }
    specs
        .iter()
        .enumerate()
        .find_map(|(index, spec)| {
            spec.strict_violation()
                .map(|problem| format!("Invalid nominee at index {index}: {problem}"))
        })
        .map_or(Ok(()), Err)
}

/// API-friendly representation of a nominee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineeDescription {
    pub id: ApiId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub vote_count: i64,
}

impl From<Nominee> for NomineeDescription {
    fn from(nominee: Nominee) -> Self {
        Self {
            id: nominee.id.into(),
            name: nominee.nominee.name,
            category: nominee.nominee.category,
            vote_count: nominee.nominee.vote_count,
        }
    }
}

/// Acknowledgement of a bulk creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineesCreated {
    pub message: String,
    /// The created nominees. Named for compatibility with existing clients.
    pub voters: Vec<NomineeDescription>,
}

impl NomineesCreated {
    pub fn new(nominees: Vec<Nominee>) -> Self {
        Self {
            message: "Voters added".to_string(),
            voters: nominees.into_iter().map(Into::into).collect(),
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl NomineeSpec {
        pub fn example(name: &str, category: Category, vote_count: i64) -> Self {
            Self {
                name: name.to_string(),
                category,
                vote_count,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json::{self, json};

    use super::*;

    #[test]
    fn lenient_accepts_anything_that_parsed() {
        let specs = vec![
            NomineeSpec::example("", Category::Fitness, 0),
            NomineeSpec::example("Negative", Category::Clinics, -4),
        ];
        assert_eq!(validate_batch(&specs, ValidationMode::Lenient), Ok(()));
    }

    #[test]
    fn strict_names_first_offender() {
        let specs = vec![
            NomineeSpec::example("Fine", Category::Fitness, 1),
            NomineeSpec::example("Negative", Category::Clinics, -4),
            NomineeSpec::example("   ", Category::Clinics, 0),
        ];
        assert_eq!(
            validate_batch(&specs, ValidationMode::Strict),
            Err("Invalid nominee at index 1: vote_count must not be negative".to_string())
        );

        let specs = vec![NomineeSpec::example("   ", Category::Innovations, 0)];
        assert_eq!(
            validate_batch(&specs, ValidationMode::Strict),
            Err("Invalid nominee at index 0: name must not be empty".to_string())
        );
    }

    #[test]
    fn strict_accepts_well_formed_batch() {
        let specs = vec![
            NomineeSpec::example("Anna", Category::Fitness, 0),
            NomineeSpec::example("Northside Clinic", Category::Clinics, 10),
        ];
        assert_eq!(validate_batch(&specs, ValidationMode::Strict), Ok(()));
        assert_eq!(validate_batch(&[], ValidationMode::Strict), Ok(()));
    }

    #[test]
    fn spec_defaults_missing_fields() {
        let spec: NomineeSpec = serde_json::from_value(json!({ "type": "innovations" })).unwrap();
        assert_eq!(spec, NomineeSpec::example("", Category::Innovations, 0));

        assert!(serde_json::from_value::<NomineeSpec>(json!({ "name": "Anna" })).is_err());
        assert!(
            serde_json::from_value::<NomineeSpec>(json!({ "name": "Anna", "type": "sports" }))
                .is_err()
        );
    }
}
