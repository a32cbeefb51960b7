use std::collections::VecDeque;

/// Question asked before inserting a link.
pub const LINK_URL_PROMPT: &str = "Enter URL:";
/// First question asked before inserting an image.
pub const IMAGE_URL_PROMPT: &str = "Enter image URL:";
/// Second question asked before inserting an image.
pub const IMAGE_ALT_PROMPT: &str = "Enter alt text (optional):";

/// Source of answers for link and image insertion.
///
/// `None` means the user cancelled.
pub trait LinkPrompt {
    fn ask(&mut self, prompt_text: &str) -> Option<String>;
}

/// Answers prompts from a queue and remembers what was asked.
///
/// Once the queue runs dry every further question is treated as cancelled.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// A prompt that answers every question with `answer`, in order.
    pub fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(answers.into_iter().map(|a| Some(a.into())))
    }

    /// Questions asked so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl LinkPrompt for ScriptedPrompt {
    fn ask(&mut self, prompt_text: &str) -> Option<String> {
        self.asked.push(prompt_text.to_string());
        self.answers.pop_front().flatten()
    }
}

/// Cancels every question.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclinePrompt;

impl LinkPrompt for DeclinePrompt {
    fn ask(&mut self, _prompt_text: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_answers_in_order_then_cancels() {
        let mut prompt = ScriptedPrompt::answering(["a", "b"]);
        assert_eq!(prompt.ask("one"), Some("a".to_string()));
        assert_eq!(prompt.ask("two"), Some("b".to_string()));
        assert_eq!(prompt.ask("three"), None);
        assert_eq!(prompt.asked(), ["one", "two", "three"]);
    }

    #[test]
    fn test_scripted_prompt_replays_cancellation() {
        let mut prompt = ScriptedPrompt::new([None, Some("x".to_string())]);
        assert_eq!(prompt.ask("q"), None);
        assert_eq!(prompt.ask("q"), Some("x".to_string()));
    }

    #[test]
    fn test_decline_prompt_always_cancels() {
        assert_eq!(DeclinePrompt.ask(LINK_URL_PROMPT), None);
    }
}
