use serde::{Deserialize, Serialize};

/// Structured skill / experience / education signals extracted from one text.
///
/// Produced once per resume or job description and regenerated whenever the
/// owning text changes. `skills` is an ordered set: no two entries share a
/// lowercase form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub skills: Vec<String>,
    pub experience_statements: Vec<String>,
    pub education_statements: Vec<String>,
    pub raw_text: String,
}

impl ExtractedProfile {
    /// Raw text when it carries any content; blank text counts as absent.
    pub fn text(&self) -> Option<&str> {
        if self.raw_text.trim().is_empty() {
            None
        } else {
            Some(&self.raw_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_raw_text_is_absent() {
        let profile = ExtractedProfile {
            raw_text: "  \n\t".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.text(), None);
    }

    #[test]
    fn test_profile_deserializes_snake_case() {
        let json = r#"{
            "skills": ["Rust", "SQL"],
            "experience_statements": ["5 years of experience"],
            "education_statements": ["Bachelor"],
            "raw_text": "Rust and SQL"
        }"#;
        let profile: ExtractedProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills, vec!["Rust", "SQL"]);
        assert_eq!(profile.text(), Some("Rust and SQL"));
    }
}
