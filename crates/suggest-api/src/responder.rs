//! Conversational response generation
//!
//! Produces three candidate replies for the user to pick from, one per
//! tone adjective. The adjectives themselves come from a few-shot chat
//! request; if that reply cannot be parsed, a fixed fallback triple is
//! used so response generation never fails on a malformed model answer.

use std::sync::Arc;

use tracing::{debug, warn};

use suggest_providers::{ChatGenerator, ChatMessage, ProviderError};

/// Fallback tones when the adjective request returns something unusable
pub const FALLBACK_ADJECTIVES: [&str; 3] = ["positive", "negative", "neutral"];

const ADJECTIVE_TEMPERATURE: f32 = 0.7;
const RESPONSE_TEMPERATURE: f32 = 0.2;

const ADJECTIVE_INSTRUCTION: &str = "Your job is to return three adjectives to describe how a \
     person in this conversation could respond to the user. The first adjective should be \
     positive, the second should be negative, and the third should be neutral or a wild card. \
     Respond only with the three adjectives, separated by commas (,).";

/// Few-shot (user message, adjective triple) pairs for the tone request
const ADJECTIVE_EXAMPLES: [(&str, &str); 4] = [
    (
        "Your outfit looks fantastic today!",
        "passionate,negative,unaffected",
    ),
    (
        "What do you think about the latest movie?",
        "positive,negative,neutral",
    ),
    ("I'm sorry for being late.", "forgiving,offended,empathetic"),
    (
        "I've always wanted to learn how to play the guitar.",
        "supportive,disinterested,curious",
    ),
];

/// Three candidate replies and the tone adjectives that shaped them,
/// index-aligned
#[derive(Debug, Clone)]
pub struct GeneratedResponses {
    pub responses: Vec<String>,
    pub adjectives: Vec<String>,
}

/// Generates persona replies over a chat-capable model
pub struct ResponseGenerator {
    chat: Arc<dyn ChatGenerator>,
    user_name: String,
}

impl ResponseGenerator {
    pub fn new(chat: Arc<dyn ChatGenerator>, user_name: String) -> Self {
        Self { chat, user_name }
    }

    /// Generate three tone-varied replies to the conversation so far
    pub async fn generate(
        &self,
        history: &[ChatMessage],
    ) -> Result<GeneratedResponses, ProviderError> {
        let adjectives = self.adjectives(history).await?;
        debug!("Response tones: {:?}", adjectives);

        let mut responses = Vec::with_capacity(adjectives.len());
        for adjective in &adjectives {
            let reply = self
                .chat
                .chat(&self.persona_prompt(adjective), history, RESPONSE_TEMPERATURE)
                .await?;
            responses.push(strip_emphasis(&reply));
        }

        Ok(GeneratedResponses {
            responses,
            adjectives,
        })
    }

    /// Ask the model for a positive/negative/wildcard adjective triple.
    ///
    /// Only the latest user message is sent, appended after the fixed
    /// few-shot examples rather than the real conversation history.
    async fn adjectives(&self, history: &[ChatMessage]) -> Result<Vec<String>, ProviderError> {
        let mut shots: Vec<ChatMessage> = ADJECTIVE_EXAMPLES
            .iter()
            .flat_map(|(user, reply)| {
                [ChatMessage::user(*user), ChatMessage::assistant(*reply)]
            })
            .collect();
        if let Some(latest) = history.last() {
            shots.push(latest.clone());
        }

        let raw = self
            .chat
            .chat(ADJECTIVE_INSTRUCTION, &shots, ADJECTIVE_TEMPERATURE)
            .await?;

        Ok(parse_adjectives(&raw).unwrap_or_else(|| {
            warn!("Unparseable adjective reply {:?}, using fallback", raw);
            FALLBACK_ADJECTIVES.iter().map(|a| a.to_string()).collect()
        }))
    }

    fn persona_prompt(&self, adjective: &str) -> String {
        format!(
            "Respond as if you are a person named {}, engaged in live conversation with the \
             user. Your response should be short (max 100 characters), and generally {}.",
            self.user_name, adjective
        )
    }
}

/// Exactly three non-empty comma-separated adjectives, or `None`
fn parse_adjectives(raw: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = strip_emphasis(raw)
        .split(',')
        .map(|p| p.trim().to_string())
        .collect();
    if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
        Some(parts)
    } else {
        None
    }
}

/// Models sometimes wrap replies in markdown emphasis; drop the markers
fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}
