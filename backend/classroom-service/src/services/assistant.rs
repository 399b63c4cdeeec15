/// Course assistant backed by a language model collaborator.
///
/// The provider is selected at startup from configuration. Without an API
/// key the service falls back to offline answers composed from the course
/// material, so the chat surface keeps working in development.
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::AssistantSettings;
use crate::error::{AppError, Result};
use crate::models::Course;

const OFFLINE_SNIPPET_MAX_CHARS: usize = 400;

#[async_trait]
pub trait CourseAssistant: Send + Sync {
    /// Answer a question grounded in the course's context material.
    async fn answer(&self, course: &Course, question: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &str;
}

/// Build the prompt sent to the model collaborator.
fn build_prompt(course: &Course, question: &str) -> String {
    format!(
        r#"You are a teaching assistant for the course "{name}".

Course description:
{description}

Course material:
{context}

Answer the student's question using the course material above. If the
material does not cover the question, say so briefly.

Student question: {question}"#,
        name = course.name,
        description = course.description,
        context = course.context,
        question = question,
    )
}

// ============================================
// OpenAI Provider
// ============================================

pub struct OpenAiAssistant {
    client: HttpClient,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiAssistant {
    pub fn new(api_key: &str, model: &str, max_tokens: u32) -> Self {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[derive(Serialize)]
struct OpenAiCompletionRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiCompletionResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

#[async_trait]
impl CourseAssistant for OpenAiAssistant {
    async fn answer(&self, course: &Course, question: &str) -> Result<String> {
        let request = OpenAiCompletionRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: build_prompt(course, question),
            }],
            max_tokens: self.max_tokens,
            temperature: 0.3,
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("OpenAI API error: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "OpenAI API error: {}",
                error_text
            )));
        }

        let result: OpenAiCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Parse error: {}", e)))?;

        Ok(result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ============================================
// Offline Fallback
// ============================================

/// Deterministic assistant used when no API key is configured.
/// Answers are composed from the course material itself.
pub struct OfflineAssistant;

#[async_trait]
impl CourseAssistant for OfflineAssistant {
    async fn answer(&self, course: &Course, _question: &str) -> Result<String> {
        let source = if course.context.trim().is_empty() {
            course.description.trim()
        } else {
            course.context.trim()
        };

        let mut snippet: String = source.chars().take(OFFLINE_SNIPPET_MAX_CHARS).collect();
        if snippet.is_empty() {
            snippet = "no course material has been provided yet".to_string();
        }

        Ok(format!(
            "Based on the material for '{}': {}",
            course.name, snippet
        ))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Select the assistant provider from configuration.
pub fn from_settings(settings: &AssistantSettings) -> Arc<dyn CourseAssistant> {
    let assistant: Arc<dyn CourseAssistant> = match settings.api_key.as_deref() {
        Some(key) if !key.is_empty() => match settings.provider.as_str() {
            "openai" => Arc::new(OpenAiAssistant::new(key, &settings.model, settings.max_tokens)),
            other => {
                warn!(provider = %other, "Unknown assistant provider, using offline answers");
                Arc::new(OfflineAssistant)
            }
        },
        _ => {
            info!("No assistant API key configured, using offline answers");
            Arc::new(OfflineAssistant)
        }
    };

    info!(
        provider = assistant.name(),
        model = %settings.model,
        "Course assistant initialized"
    );

    assistant
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn course_with(context: &str, description: &str) -> Course {
        Course {
            id: Uuid::new_v4(),
            instructor_id: Uuid::new_v4(),
            name: "Operating Systems".to_string(),
            description: description.to_string(),
            context: context.to_string(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_offline_answers_from_context() {
        let course = course_with("Scheduling, paging and file systems.", "Kernel basics");
        let answer = OfflineAssistant
            .answer(&course, "What does this course cover?")
            .await
            .unwrap();

        assert!(answer.contains("Operating Systems"));
        assert!(answer.contains("Scheduling"));
    }

    #[tokio::test]
    async fn test_offline_falls_back_to_description() {
        let course = course_with("   ", "Kernel basics");
        let answer = OfflineAssistant
            .answer(&course, "Anything?")
            .await
            .unwrap();

        assert!(answer.contains("Kernel basics"));
    }

    #[tokio::test]
    async fn test_offline_handles_empty_course_material() {
        let course = course_with("", "");
        let answer = OfflineAssistant.answer(&course, "Hello?").await.unwrap();

        assert!(answer.contains("no course material"));
    }

    #[test]
    fn test_prompt_carries_course_material_and_question() {
        let course = course_with("Week 1: processes. Week 2: threads.", "Kernel basics");
        let prompt = build_prompt(&course, "What is in week 2?");

        assert!(prompt.contains("Operating Systems"));
        assert!(prompt.contains("Week 2: threads."));
        assert!(prompt.contains("What is in week 2?"));
    }

    #[test]
    fn test_from_settings_without_key_is_offline() {
        let settings = AssistantSettings {
            provider: "openai".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 512,
        };

        assert_eq!(from_settings(&settings).name(), "offline");
    }

    #[test]
    fn test_from_settings_with_key_is_openai() {
        let settings = AssistantSettings {
            provider: "openai".to_string(),
            api_key: Some("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 512,
        };

        assert_eq!(from_settings(&settings).name(), "openai");
    }
}
