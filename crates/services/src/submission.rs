use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{
    ChoiceLabel, QuestionId, QuestionOutcome, QuizId, SubmissionResult, SubmittedAnswer,
};

use crate::error::SubmissionError;

/// Everything the scoring collaborator needs for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub quiz_id: QuizId,
    /// Answers in payload question order, with explicit `None` for
    /// unanswered questions.
    pub answers: Vec<SubmittedAnswer>,
    pub time_taken_secs: u32,
}

/// Boundary to the external service that scores answers.
///
/// Serialization is the implementation's concern; the session engine treats
/// this as an abstract request/response contract.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Score the accumulated answers.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::Transient` for transport/service failures
    /// and `SubmissionError::Rejected` when the collaborator refuses the
    /// submission or returns an unusable response.
    async fn submit(&self, request: &SubmissionRequest)
    -> Result<SubmissionResult, SubmissionError>;
}

#[derive(Clone, Debug)]
pub struct SubmissionConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
}

impl SubmissionConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("QUIZ_API_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let bearer_token = env::var("QUIZ_API_TOKEN").ok().filter(|t| !t.is_empty());
        Some(Self {
            base_url,
            bearer_token,
        })
    }
}

/// HTTP implementation of the submission boundary.
#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    config: SubmissionConfig,
}

impl HttpSubmissionClient {
    #[must_use]
    pub fn new(config: SubmissionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn submit_url(&self, quiz_id: QuizId) -> String {
        format!(
            "{}/api/quiz/{}/submit",
            self.config.base_url.trim_end_matches('/'),
            quiz_id
        )
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResult, SubmissionError> {
        let body = SubmitBody::from_request(request);

        let mut builder = self.client.post(self.submit_url(request.quiz_id)).json(&body);
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SubmissionError::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(SubmissionError::Transient(format!("http status {status}")));
        }
        if !status.is_success() {
            return Err(SubmissionError::Rejected(format!("http status {status}")));
        }

        let wire: ResultWire = response
            .json()
            .await
            .map_err(|e| SubmissionError::Rejected(format!("malformed response: {e}")))?;
        wire.into_result()
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct SubmitBody {
    /// Answered questions only; the collaborator treats absent keys as
    /// unanswered and chokes on explicit nulls.
    answers: BTreeMap<String, &'static str>,
    time_taken: u32,
}

impl SubmitBody {
    fn from_request(request: &SubmissionRequest) -> Self {
        let answers = request
            .answers
            .iter()
            .filter_map(|answer| {
                answer
                    .selected
                    .map(|choice| (answer.question_id.to_string(), choice.as_str()))
            })
            .collect();
        Self {
            answers,
            time_taken: request.time_taken_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultWire {
    score: f64,
    correct_count: u32,
    total_questions: u32,
    time_taken: u32,
    #[serde(default)]
    passed: Option<bool>,
    results: Vec<OutcomeWire>,
}

#[derive(Debug, Deserialize)]
struct OutcomeWire {
    question_id: u64,
    #[serde(default)]
    user_answer: Option<String>,
    correct_answer: String,
    is_correct: bool,
    #[serde(default)]
    explanation: Option<String>,
}

impl ResultWire {
    fn into_result(self) -> Result<SubmissionResult, SubmissionError> {
        let mut outcomes = Vec::with_capacity(self.results.len());
        for wire in self.results {
            outcomes.push(wire.into_outcome()?);
        }
        SubmissionResult::from_parts(
            self.score,
            self.correct_count,
            self.total_questions,
            self.time_taken,
            self.passed,
            outcomes,
        )
        .map_err(|e| SubmissionError::Rejected(e.to_string()))
    }
}

impl OutcomeWire {
    fn into_outcome(self) -> Result<QuestionOutcome, SubmissionError> {
        let selected = match self.user_answer.as_deref() {
            None | Some("") => None,
            Some(label) => Some(parse_label(label)?),
        };
        let correct = parse_label(&self.correct_answer)?;
        Ok(QuestionOutcome {
            question_id: QuestionId::new(self.question_id),
            selected,
            correct,
            is_correct: self.is_correct,
            explanation: self.explanation.filter(|text| !text.is_empty()),
        })
    }
}

fn parse_label(raw: &str) -> Result<ChoiceLabel, SubmissionError> {
    ChoiceLabel::from_str(raw).map_err(|e| SubmissionError::Rejected(e.to_string()))
}
