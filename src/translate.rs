//! Client for a Google-Translate-compatible endpoint.

use std::time::Duration;

use serde_json::Value;

use crate::errors::{BotError, BotResult};

pub const TARGET_LANGUAGE: &str = "en";

const REQUEST_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Detected source language, if the service reported one
    pub source_language: Option<String>,
}

#[derive(Clone)]
pub struct Translator {
    client: reqwest::Client,
    api_url: String,
}

impl Translator {
    pub fn new(api_url: impl Into<String>) -> BotResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .user_agent("school-bot/0.1")
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Translate `text` to English, source language is auto-detected
    pub async fn translate(&self, text: &str) -> BotResult<Translation> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", TARGET_LANGUAGE),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        parse_response(&body)
    }
}

/// The response looks like `[[["Hello","Привет",...], ...], null, "ru", ...]`:
/// translated segments first, detected language third.
pub fn parse_response(body: &Value) -> BotResult<Translation> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| BotError::translation_error("response has no segments"))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(BotError::translation_error("empty translation"));
    }

    let source_language = body.get(2).and_then(Value::as_str).map(str::to_string);

    Ok(Translation {
        text,
        source_language,
    })
}
