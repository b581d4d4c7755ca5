//! Intent classification: decide from free text whether live weather data is
//! needed, and for which location.

use crate::{
    error::AgentError,
    llm::{SYSTEM_PROMPT, TextGenerator},
    model::IntentDecision,
};

/// Result of best-effort parsing of the classifier's raw output.
///
/// Malformed output is never an error at this layer: it degrades the query
/// to the general (non-augmented) path. Only failures of the underlying
/// model call propagate.
#[derive(Debug)]
pub enum Outcome {
    Parsed(IntentDecision),
    Unparseable,
}

/// Ask the model whether `query` needs live weather data.
pub async fn classify(llm: &dyn TextGenerator, query: &str) -> Result<Outcome, AgentError> {
    let prompt = classification_prompt(query);
    let raw = llm.generate(&prompt, Some(SYSTEM_PROMPT)).await?;

    Ok(parse_outcome(&raw))
}

pub fn classification_prompt(query: &str) -> String {
    format!(
        "Analyze this user query and decide whether live weather data is needed:\n\
         \n\
         Query: \"{query}\"\n\
         \n\
         Respond STRICTLY with JSON in this exact format, with no extra text:\n\
         {{\n\
             \"needs_weather\": boolean,\n\
             \"location\": \"extracted location or empty string\",\n\
             \"confidence\": number between 0 and 1\n\
         }}"
    )
}

/// Parse the raw reply, salvaging JSON embedded in surrounding prose.
fn parse_outcome(raw: &str) -> Outcome {
    let trimmed = raw.trim();

    if let Ok(decision) = serde_json::from_str::<IntentDecision>(trimmed) {
        return Outcome::Parsed(decision);
    }

    // Models often wrap the JSON in prose or a code fence. Try the span from
    // the first `{` to the last `}` before giving up.
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(decision) = serde_json::from_str::<IntentDecision>(&trimmed[start..=end]) {
                return Outcome::Parsed(decision);
            }
        }
    }

    Outcome::Unparseable
}
