//! Dictionary / regex vocabulary for skill, experience and education signals.
//!
//! This is dictionary lookup, not entity recognition. The vocabulary and the
//! group order decide scoring outcomes system-wide; change them deliberately.

use once_cell::sync::Lazy;
use regex::Regex;

/// Skill groups, scanned in this order: languages/frameworks, web/data
/// technologies, ML/data-science terms, soft skills.
const SKILL_GROUPS: &[&str] = &[
    r"(?i)\b(Java|Python|JavaScript|React|Angular|Vue|Node\.js|Spring|Hibernate|MySQL|PostgreSQL|MongoDB|AWS|Azure|Docker|Kubernetes|Git|Jenkins|Maven|Gradle)\b",
    r"(?i)\b(HTML|CSS|SQL|REST|API|JSON|XML|GraphQL|Microservices|Agile|Scrum|DevOps|CI/CD)\b",
    r"(?i)\b(Machine Learning|AI|Data Science|Statistics|R|TensorFlow|PyTorch|Scikit-learn|Pandas|NumPy|Matplotlib)\b",
    r"(?i)\b(Project Management|Leadership|Communication|Problem Solving|Analytical|Critical Thinking|Teamwork|Time Management)\b",
];

/// "N years of experience", "worked as ...", "senior ..."; the last two run
/// to the end of the line.
const EXPERIENCE_FAMILIES: &[&str] = &[
    r"(?i)\b\d+\s*(?:years?|yrs?)\s*(?:of\s+)?(?:experience|exp)\b",
    r"(?i)\b(?:worked|experience)[ \t]+(?:as|in)[ \t]+[^\r\n]+",
    r"(?i)\b(?:senior|junior|lead|principal|staff)[ \t]+[^\r\n]+",
];

/// Degree keywords, fields of study, institution types.
const EDUCATION_FAMILIES: &[&str] = &[
    r"(?i)\b(?:Bachelor|Master|PhD|BSc|MSc|MBA|Associate|Diploma|Certificate)\b",
    r"(?i)\b(?:Computer Science|Engineering|Information Technology|Business|Management|Marketing|Finance)\b",
    r"(?i)\b(?:University|College|Institute|School)\b",
];

pub static SKILL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(SKILL_GROUPS));
pub static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(EXPERIENCE_FAMILIES));
pub static EDUCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(EDUCATION_FAMILIES));

// The sources are constants; a pattern that fails to compile is dropped and
// covered by the tests below.
fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!("Invalid extraction pattern {source}: {e}");
                None
            }
        })
        .collect()
}

/// Runs each pattern over `text` in order and collects every matched span.
pub fn scan<'t>(patterns: &[Regex], text: &'t str) -> Vec<&'t str> {
    patterns
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().trim_end()))
        .collect()
}
