//! Improvement suggestions and learning resources derived from a computed match.

const NEEDS_IMPROVEMENT: &str =
    "Your resume needs significant improvements to match this job requirement";
const ADD_TECHNICAL_SKILLS: &str = "Consider adding more relevant technical skills to your resume";
const HIGHLIGHT_TOP_SKILLS: &str = "Highlight your most relevant skills at the top of your resume";
const WELL_ALIGNED: &str = "Your resume looks well-aligned with the job requirements!";
const NO_RESOURCES_NEEDED: &str = "No specific learning resources needed. Your skills match well!";

/// Rules run in order and are independent; the positive message only appears
/// when no other rule fired.
pub fn generate_suggestions(overall_score: f64, skills_score: f64, missing_skills: &[String]) -> Vec<String> {
    let mut suggestions = Vec::new();

    if overall_score < 0.5 {
        suggestions.push(NEEDS_IMPROVEMENT.to_string());
    }
    if skills_score < 0.5 {
        suggestions.push(ADD_TECHNICAL_SKILLS.to_string());
    }
    if skills_score < 0.7 {
        suggestions.push(HIGHLIGHT_TOP_SKILLS.to_string());
    }
    for skill in missing_skills {
        suggestions.push(format!(
            "Consider adding {skill} to your skills section or gaining experience with it"
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(WELL_ALIGNED.to_string());
    }
    suggestions
}

/// Four catalog entries per missing skill, in order.
pub fn generate_learning_resources(missing_skills: &[String]) -> Vec<String> {
    if missing_skills.is_empty() {
        return vec![NO_RESOURCES_NEEDED.to_string()];
    }

    missing_skills
        .iter()
        .flat_map(|skill| {
            [
                format!("LinkedIn Learning: {skill} courses"),
                format!("Coursera: {skill} specialization"),
                format!("Udemy: {skill} tutorials"),
                format!("YouTube: {skill} tutorial videos"),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_aligned_is_the_only_message_for_a_strong_match() {
        let suggestions = generate_suggestions(0.7, 0.7, &[]);
        assert_eq!(suggestions, vec![WELL_ALIGNED]);
    }

    #[test]
    fn test_low_scores_fire_all_threshold_rules_in_order() {
        let missing = vec!["Kafka".to_string(), "Go".to_string()];
        let suggestions = generate_suggestions(0.2, 0.3, &missing);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], NEEDS_IMPROVEMENT);
        assert_eq!(suggestions[1], ADD_TECHNICAL_SKILLS);
        assert_eq!(suggestions[2], HIGHLIGHT_TOP_SKILLS);
        assert!(suggestions[3].contains("Kafka"));
        assert!(suggestions[4].contains("Go"));
    }

    #[test]
    fn test_highlight_fires_without_add_skills_between_thresholds() {
        let suggestions = generate_suggestions(0.8, 0.6, &[]);
        assert_eq!(suggestions, vec![HIGHLIGHT_TOP_SKILLS]);
    }

    #[test]
    fn test_missing_skill_alone_suppresses_positive_message() {
        let suggestions = generate_suggestions(0.9, 0.9, &["Terraform".to_string()]);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("Consider adding Terraform"));
    }

    #[test]
    fn test_four_resources_per_missing_skill() {
        let missing = vec!["Rust".to_string(), "SQL".to_string()];
        let resources = generate_learning_resources(&missing);
        assert_eq!(resources.len(), 8);
        assert_eq!(resources[0], "LinkedIn Learning: Rust courses");
        assert_eq!(resources[3], "YouTube: Rust tutorial videos");
        assert_eq!(resources[4], "LinkedIn Learning: SQL courses");
    }

    #[test]
    fn test_no_missing_skills_yields_single_resource_message() {
        assert_eq!(generate_learning_resources(&[]), vec![NO_RESOURCES_NEEDED]);
    }
}
