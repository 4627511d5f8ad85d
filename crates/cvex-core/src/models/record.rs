//! Applicant data extracted from a resume.

use serde::{Deserialize, Serialize};

/// Structured applicant details returned by the extraction service.
///
/// A record is only ever constructed with all four required fields present;
/// a payload missing any of them is rejected during deserialization, so no
/// partial records exist. `source_file` is set only for records that came
/// from a PDF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Applicant's full name.
    pub name: String,

    /// Contact email address, as the service reported it.
    pub email: String,

    /// Skills in the order the service listed them; may be empty.
    pub skills: Vec<String>,

    /// Total years of professional experience, integer or fractional.
    pub experience_years: f64,

    /// Originating document name, for records extracted from a PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl ResumeRecord {
    /// Tag the record with the document it came from.
    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source_file = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_service_payload() {
        let payload = r#"{
            "name": "Jane Doe",
            "email": "jane.doe@example.com",
            "skills": ["Python", "SQL", "AWS"],
            "experience_years": 7.5
        }"#;

        let record: ResumeRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email, "jane.doe@example.com");
        assert_eq!(record.skills, vec!["Python", "SQL", "AWS"]);
        assert_eq!(record.experience_years, 7.5);
        assert_eq!(record.source_file, None);
    }

    #[test]
    fn test_integer_experience_is_accepted() {
        let payload = r#"{"name":"A","email":"a@b.c","skills":[],"experience_years":6}"#;
        let record: ResumeRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.experience_years, 6.0);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // No partial records: a payload without `email` must fail to parse.
        let payload = r#"{"name":"A","skills":["Go"],"experience_years":2}"#;
        assert!(serde_json::from_str::<ResumeRecord>(payload).is_err());
    }

    #[test]
    fn test_source_file_absent_when_none() {
        let record = ResumeRecord {
            name: "A".to_string(),
            email: "a@b.c".to_string(),
            skills: vec![],
            experience_years: 1.0,
            source_file: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("source_file"));

        let tagged = record.with_source("cv_001.pdf");
        let json = serde_json::to_string(&tagged).unwrap();
        assert!(json.contains("\"source_file\":\"cv_001.pdf\""));
    }
}
