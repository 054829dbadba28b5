//! Text assist backed by the Gemini `generateContent` endpoint.
//!
//! The request asks for a JSON response constrained by a schema covering the
//! fields a note usually mentions. Identity numbers, certificate number and
//! signing details are left out on purpose: they come from paperwork, not
//! from a nurse's note.

use super::{Proposal, TextAssist};
use crate::config::AssistConfig;
use crate::error::{Result, SklError};
use crate::model::Field;
use reqwest::blocking::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;

const PROPOSABLE: [Field; 15] = [
    Field::Day,
    Field::Date,
    Field::Time,
    Field::Gender,
    Field::BirthType,
    Field::BirthOrder,
    Field::GestationAge,
    Field::Weight,
    Field::HeadCircumference,
    Field::Length,
    Field::ChestCircumference,
    Field::BabyName,
    Field::MotherName,
    Field::FatherName,
    Field::Address,
];

fn field_hint(field: Field) -> Option<String> {
    match field {
        Field::Date => Some("Format: DD MMMM YYYY".to_string()),
        Field::Time => Some("Format: HH:mm".to_string()),
        Field::Gender | Field::BirthType => Some(field.choices().join(", ")),
        Field::Weight => Some("Grams, digits only".to_string()),
        Field::HeadCircumference | Field::Length | Field::ChestCircumference => {
            Some("Centimetres, digits only".to_string())
        }
        _ => None,
    }
}

fn response_schema() -> Value {
    let mut properties = Map::new();
    for field in PROPOSABLE {
        let mut prop = json!({ "type": "STRING" });
        if let Some(hint) = field_hint(field) {
            prop["description"] = Value::String(hint);
        }
        properties.insert(field.key().to_string(), prop);
    }
    json!({ "type": "OBJECT", "properties": properties })
}

/// Request payload for one note.
pub fn request_body(free_text: &str) -> Value {
    let prompt = format!(
        "Extract the birth record from this Indonesian note into JSON. \
         Leave out anything the note does not state.\n\nNote: \"{}\"",
        free_text
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

/// Pulls the generated text out of a `generateContent` response.
pub fn extract_text(payload: &Value) -> Result<String> {
    if let Some(reason) = payload
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(SklError::Assist(format!("request blocked: {}", reason)));
    }

    let parts = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| SklError::Assist("response has no candidates".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err(SklError::Assist("response is empty".to_string()));
    }
    Ok(text)
}

pub struct GeminiAssist {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiAssist {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SklError::Assist(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AssistConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SklError::Config(
                    "No text assist API key configured (set GEMINI_API_KEY or assist.api_key)"
                        .to_string(),
                )
            })?;
        Self::new(
            api_key,
            config.model.clone(),
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl TextAssist for GeminiAssist {
    fn propose(&self, free_text: &str) -> Result<Proposal> {
        tracing::debug!(model = %self.model, chars = free_text.len(), "requesting text assist");
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(free_text))
            .send()
            .map_err(|e| SklError::Assist(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(SklError::Assist(format!("HTTP {}: {}", status, snippet)));
        }

        let payload: Value = response
            .json()
            .map_err(|e| SklError::Assist(e.to_string()))?;
        Proposal::from_json_text(&extract_text(&payload)?)
    }
}
