use anyhow::*;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;

use crate::llm::prompt;
use crate::llm::{EvaluationResult, GenerationParams, Generator, Grader, SubmittedAnswer};


const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EVALUATION_MODEL: &str = "gpt-4o";

const GENERATION_TEMPERATURE: f32 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 1000;
// Lower temperature for more consistent evaluation
const EVALUATION_TEMPERATURE: f32 = 0.3;
const EVALUATION_MAX_TOKENS: u32 = 2500;

const FALLBACK_SCORE: u32 = 50;
const FALLBACK_FEEDBACK: &str =
    "Unable to provide detailed feedback at this time. Please try again.";

lazy_static! {
    static ref JSON_ARRAY: Regex = Regex::new(r"(?s)\[.*\]").unwrap();
}

pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    api_base: String,
    generation_model: String,
    evaluation_model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        OpenAiClient {
            client: reqwest::blocking::Client::new(),
            api_key,
            api_base: env::var("QGEN_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_owned()),
            generation_model: env::var("QGEN_GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_owned()),
            evaluation_model: env::var("QGEN_EVALUATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_EVALUATION_MODEL.to_owned()),
        }
    }

    fn chat(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .context("Chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Chat completion returned status {}", status);
        }

        let response: ChatResponse = response
            .json()
            .context("Chat completion body was not valid JSON")?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .context("Chat completion contained no content")?;

        Ok(content.trim().to_owned())
    }
}

impl Generator for OpenAiClient {
    fn generate(&self, topic: &str, params: &GenerationParams) -> Result<String> {
        info!(
            "Generating {} questions ({}, {})",
            params.mode.name(),
            params.difficulty.name(),
            params.language
        );
        let system_prompt = prompt::generation_system_prompt(params);
        let user_prompt = prompt::generation_user_prompt(topic);
        let completion = self.chat(
            &self.generation_model,
            &system_prompt,
            user_prompt,
            GENERATION_TEMPERATURE,
            GENERATION_MAX_TOKENS,
        )?;
        info!("Successfully generated questions");
        Ok(completion)
    }
}

impl Grader for OpenAiClient {
    fn evaluate(&self, source: &str, answers: &[SubmittedAnswer]) -> Result<Vec<EvaluationResult>> {
        ensure!(!answers.is_empty(), "No answers to evaluate");
        info!("Evaluating {} answer(s)", answers.len());
        let user_prompt = prompt::evaluation_prompt(source, answers);
        let completion = self.chat(
            &self.evaluation_model,
            prompt::EVALUATION_SYSTEM_PROMPT,
            user_prompt,
            EVALUATION_TEMPERATURE,
            EVALUATION_MAX_TOKENS,
        )?;
        Ok(parse_evaluation(&completion, answers))
    }
}

/// The grader is asked for a bare JSON array but models routinely wrap it in
/// prose, so locate the first array-shaped substring. When nothing in the
/// completion parses, grading degrades to a neutral score per question rather
/// than losing the submission.
fn parse_evaluation(completion: &str, answers: &[SubmittedAnswer]) -> Vec<EvaluationResult> {
    let parsed = JSON_ARRAY.find(completion).and_then(|array| {
        serde_json::from_str::<Vec<EvaluationResult>>(array.as_str()).ok()
    });

    match parsed {
        Some(results) => results,
        None => {
            warn!("Could not parse evaluation results, falling back to neutral scores");
            answers
                .iter()
                .enumerate()
                .map(|(index, answer)| EvaluationResult {
                    question_index: index,
                    user_answer: answer.user_answer.clone(),
                    feedback: FALLBACK_FEEDBACK.to_owned(),
                    is_correct: false,
                    score: FALLBACK_SCORE,
                })
                .collect()
        }
    }
}
