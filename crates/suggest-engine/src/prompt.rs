//! Prompt mode selection
//!
//! The trailing character of the user's input decides whether the model
//! should predict a fresh next word or complete a partially-typed one.

/// Temperature when predicting a fresh next word
pub const NEXT_WORD_TEMPERATURE: f32 = 0.5;
/// Higher temperature to diversify completions of a partial word
pub const WORD_COMPLETION_TEMPERATURE: f32 = 0.9;

/// Few-shot examples for the word-completion instruction
const COMPLETION_EXAMPLES: [&str; 5] = [
    "Sentence: At the movie we should get some c\nWord: candy",
    "Sentence: I am pretty tir\nWord: tired",
    "Sentence: My favorite book series is Harry P\nWord: Potter",
    "Sentence: I am going to a concert. We are seeing the classic rock band the Roll\nWord: Rolling",
    "Sentence: I'll have chicken noodl\nWord: noodle",
];

/// What the model is being asked to predict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Predict a fresh token starting after the prompt
    NextWord,
    /// Predict the completed form of the final partial word
    CompleteWord,
}

/// A prompt prepared for the model, with its sampling temperature and the
/// partial word candidates must extend (empty in [`PromptMode::NextWord`])
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrompt {
    pub mode: PromptMode,
    pub text: String,
    pub temperature: f32,
    pub partial_word: String,
}

/// Select the prompt mode for a non-empty input.
///
/// A trailing space or punctuation character means the last word is
/// finished, so the prompt is passed through (minus trailing whitespace)
/// at low temperature. Otherwise the final whitespace-delimited token is a
/// partial word and the model gets the few-shot completion instruction.
/// The partial word is lowercased to match cleaned candidate tokens.
pub fn select_mode(prompt: &str) -> ModelPrompt {
    let ends_finished = prompt
        .chars()
        .last()
        .map(|c| c.is_ascii_punctuation() || c == ' ')
        .unwrap_or(false);

    if ends_finished {
        ModelPrompt {
            mode: PromptMode::NextWord,
            text: prompt.trim().to_string(),
            temperature: NEXT_WORD_TEMPERATURE,
            partial_word: String::new(),
        }
    } else {
        let partial_word = prompt
            .split_whitespace()
            .last()
            .unwrap_or("")
            .to_lowercase();
        ModelPrompt {
            mode: PromptMode::CompleteWord,
            text: word_completion_instruction(prompt),
            temperature: WORD_COMPLETION_TEMPERATURE,
            partial_word,
        }
    }
}

/// Build the few-shot instruction asking the model to complete the final
/// partial word of `prompt`
pub fn word_completion_instruction(prompt: &str) -> String {
    format!(
        "Instruction: Predict the completed last word in the sentence. \n\n{}\n\nSentence: {}\nWord: ",
        COMPLETION_EXAMPLES.join("\n\n"),
        prompt
    )
}
