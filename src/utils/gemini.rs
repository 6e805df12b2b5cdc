use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::interfaces::generative_model::{
    GenerateRequest, GenerativeModelInterface, InlineImage,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, `None` when it is missing or blank.
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn body_of(request: &GenerateRequest) -> GenerateContentBody<'_> {
    let mut parts = vec![];
    if let Some(InlineImage { mime_type, data }) = &request.inline_image {
        parts.push(Part::InlineData(InlineData { mime_type, data }));
    }
    parts.push(Part::Text(&request.prompt));
    GenerateContentBody {
        contents: vec![Content { parts }],
        generation_config: request.json_response.then(|| GenerationConfig {
            response_mime_type: "application/json".to_string(),
        }),
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, api_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl GenerativeModelInterface for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, String> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body_of(&request))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!(
                "Gemini request failed with {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(body.text())
    }
}
