//! Modal text input, the replacement for browser `prompt()`.

/// Ask the user for one line of text.
pub trait Prompt {
    /// `None` when the user cancels.
    fn ask(&mut self, title: &str) -> Option<String>;
}

/// Normalise a prompt answer: cancelled, empty, and blank all mean "no".
pub fn accepted(answer: Option<String>) -> Option<String> {
    answer
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}
