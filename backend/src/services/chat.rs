//! Keyword-routed classroom assistant.

/// What a message is about. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    LessonPlanning,
    Observations,
    Materials,
    Progress,
    General,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,
}

const KEYWORDS: [(Topic, &[&str]); 4] = [
    (Topic::LessonPlanning, &["lesson", "plan"]),
    (Topic::Observations, &["observ"]),
    (Topic::Materials, &["material"]),
    (Topic::Progress, &["progress", "report", "newsletter"]),
];

pub fn classify(message: &str) -> Topic {
    let lower = message.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::General)
}

pub fn reply(message: &str) -> Result<String, ChatError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    let text = match classify(message) {
        Topic::LessonPlanning => "Happy to help plan a lesson. Tell me the curriculum area and \
             the age group, and I can suggest a presentation sequence and follow-up work."
            .to_string(),
        Topic::Observations => "When observing, note what the child chooses, how long they \
             stay with it, which actions repeat and how they interact with others. \
             I can draft an observation template if that helps."
            .to_string(),
        Topic::Materials => "Good materials are accessible, self-correcting and presented \
             from concrete to abstract. Which area are you preparing materials for?"
            .to_string(),
        Topic::Progress => "I can help with progress reports and weekly newsletters. \
             Would you like one for a single student or for the whole class?"
            .to_string(),
        Topic::General => format!(
            "Good question about '{}'. I can help with lesson planning, observations, \
             progress tracking and parent communication. What would you like to explore?",
            message
        ),
    };
    Ok(text)
}
