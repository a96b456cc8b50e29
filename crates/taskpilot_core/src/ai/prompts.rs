//! Prompt templates, fixed fallback values and response cleanup.

use super::snapshot::ActivitySnapshot;

pub const TOPIC_PROMPT: &str = "Suggest a specific, practical study topic for a programmer \
in one short sentence. It can be about languages, frameworks, methodologies, or advanced concepts.";

/// Used when the service is unavailable or returns nothing.
pub const FALLBACK_TOPICS: [&str; 5] = [
    "Microservices architecture",
    "Building RESTful APIs with Python",
    "Advanced data structures",
    "DevOps principles and CI/CD",
    "Machine learning with TensorFlow",
];

pub const ANALYSIS_EMPTY_MESSAGE: &str = "The AI did not provide an analysis. Try again.";
pub const ANALYSIS_ERROR_PREFIX: &str = "Error generating the AI analysis: ";
pub const ANALYSIS_UNAVAILABLE_MESSAGE: &str =
    "Could not connect to the AI. Check your API key and internet connection.";

/// Maximum characters of task notes included in the analysis prompt.
pub const NOTES_EXCERPT_CHARS: usize = 50;

/// Removes emphasis markup and surrounding whitespace.
pub fn strip_emphasis(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

pub fn build_analysis_prompt(snapshot: &ActivitySnapshot) -> String {
    let tasks = snapshot
        .tasks
        .iter()
        .map(|task| {
            format!(
                "{} (Importance: {}, Completed: {}, Notes: {}...)",
                task.name,
                task.importance.label(),
                if task.completed { "yes" } else { "no" },
                task.notes_excerpt
            )
        })
        .collect::<Vec<_>>();

    format!(
        "Analyze my programming activity based on the following data:\n\
         - Reminders ({}): {}\n\
         - Lists ({}): {}\n\
         - Tasks ({}): {}\n\n\
         Give me a concise summary of my progress, identify possible areas of improvement \
         or productivity patterns, and offer 1-2 practical, professional tips. \
         Prioritize action and efficiency.",
        snapshot.reminders.len(),
        render_section(&snapshot.reminders),
        snapshot.list_titles.len(),
        render_section(&snapshot.list_titles),
        tasks.len(),
        render_section(&tasks),
    )
}

fn render_section(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        format!("{items:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::snapshot::TaskDigest;
    use crate::model::task::Importance;

    #[test]
    fn strip_emphasis_removes_asterisks_and_trims() {
        assert_eq!(strip_emphasis("  **Rust** *lifetimes*\n"), "Rust lifetimes");
        assert_eq!(strip_emphasis("***"), "");
    }

    #[test]
    fn analysis_prompt_reports_counts_and_empty_sections() {
        let snapshot = ActivitySnapshot {
            reminders: Vec::new(),
            list_titles: vec!["Groceries".to_string()],
            tasks: vec![TaskDigest {
                name: "Write spec".to_string(),
                importance: Importance::High,
                completed: false,
                notes_excerpt: "draft".to_string(),
            }],
        };

        let prompt = build_analysis_prompt(&snapshot);
        assert!(prompt.contains("- Reminders (0): None"));
        assert!(prompt.contains("- Lists (1): [\"Groceries\"]"));
        assert!(prompt.contains("Write spec (Importance: High, Completed: no, Notes: draft...)"));
    }

    #[test]
    fn fallback_topics_are_non_empty() {
        assert!(FALLBACK_TOPICS.iter().all(|topic| !topic.trim().is_empty()));
    }
}
