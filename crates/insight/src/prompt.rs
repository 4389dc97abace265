//! Request construction and response parsing for the synopsis call

use crate::error::{InsightError, InsightResult};
use auralis_core::{AiInsight, MAX_INSIGHT_ITEMS};
use serde::Deserialize;
use serde_json::{json, Value};

/// Upper bound on the summary length requested from the model
pub const SUMMARY_MAX_CHARS: usize = 300;

/// Builds the instruction sent to the model
pub fn build_prompt(title: &str, author: &str, language: &str) -> String {
    format!(
        "Provide a concise analysis of the audiobook \"{}\" by {}. \
         Include a short summary, a list of key themes and the main characters. \
         Answer in {}.",
        title, author, language
    )
}

/// JSON schema the model must follow
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": format!("A concise plot summary (max {} characters).", SUMMARY_MAX_CHARS)
            },
            "themes": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Up to {} key themes.", MAX_INSIGHT_ITEMS)
            },
            "characters": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Top {} main characters.", MAX_INSIGHT_ITEMS)
            }
        },
        "required": ["summary", "themes", "characters"]
    })
}

/// Full `generateContent` request body in JSON response mode
pub fn request_body(title: &str, author: &str, language: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": build_prompt(title, author, language) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireInsight {
    summary: String,
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default)]
    characters: Vec<String>,
}

/// Pulls the generated text out of a `generateContent` response
pub fn extract_text(response: &str) -> InsightResult<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(response)?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(InsightError::EmptyResponse);
    }
    Ok(text)
}

/// Parses the model's JSON answer into a normalized synopsis
pub fn parse_insight(text: &str) -> InsightResult<AiInsight> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InsightError::EmptyResponse);
    }
    let wire: WireInsight = serde_json::from_str(text)?;
    Ok(AiInsight {
        summary: wire.summary,
        themes: wire.themes,
        characters: wire.characters,
    }
    .normalized())
}

/// Extracts the service's error message from an error body, if present
pub fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .pointer("/error/message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_book_and_language() {
        let prompt = build_prompt("Frankenstein", "Mary Shelley", "Spanish");
        assert!(prompt.contains("\"Frankenstein\" by Mary Shelley"));
        assert!(prompt.ends_with("Answer in Spanish."));
    }

    #[test]
    fn test_request_body_uses_json_mode() {
        let body = request_body("Emma", "Jane Austen", "English");
        assert_eq!(
            body.pointer("/generationConfig/responseMimeType"),
            Some(&json!("application/json"))
        );
        assert_eq!(
            body.pointer("/generationConfig/responseSchema/required"),
            Some(&json!(["summary", "themes", "characters"]))
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response = r#"{"candidates":[{"content":{"parts":[{"text":"{\"summary\":"},{"text":"\"x\"}"}]}}]}"#;
        assert_eq!(extract_text(response).unwrap(), r#"{"summary":"x"}"#);
    }

    #[test]
    fn test_extract_text_without_candidates_is_empty() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(InsightError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"promptFeedback":{}}"#),
            Err(InsightError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_insight_normalizes_lists() {
        let text = r#"{"summary":" A monster. ","themes":["ambition","","isolation","science","nature"],"characters":["Victor"]}"#;
        let insight = parse_insight(text).unwrap();
        assert_eq!(insight.summary, "A monster.");
        assert_eq!(insight.themes, vec!["ambition", "isolation", "science"]);
        assert_eq!(insight.characters, vec!["Victor"]);
    }

    #[test]
    fn test_parse_insight_rejects_garbage() {
        assert!(matches!(parse_insight("not json"), Err(InsightError::Parse(_))));
        assert!(matches!(parse_insight("  "), Err(InsightError::EmptyResponse)));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid."}}"#;
        assert_eq!(api_error_message(body).as_deref(), Some("API key not valid."));
        assert_eq!(api_error_message("<html>"), None);
    }
}
