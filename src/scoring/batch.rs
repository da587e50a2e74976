//! Batch question answering and scoring
//!
//! Parses and validates the batch input files, drives the agent once per
//! question, and aggregates per-question scores into summary metrics.
//! Validation is fail-fast: malformed files are rejected before any
//! generation work begins.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{RagError, Result};
use crate::qa::agent::RagAgent;
use crate::scoring::similarity::similarity_score;

/// Quality tier derived from a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Excellent,
    Good,
    Poor,
}

impl Tier {
    /// Bucket a similarity score: >= 0.8 excellent, >= 0.6 good, else poor
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Tier::Excellent
        } else if score >= 0.6 {
            Tier::Good
        } else {
            Tier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Poor => "poor",
        }
    }
}

/// Batch questions input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsFile {
    pub questions: Vec<QuestionEntry>,
}

/// A single batch question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
}

/// Expected answers input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswersFile {
    pub answers: Vec<ExpectedAnswer>,
}

/// A single expected reference answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedAnswer {
    pub id: String,
    pub expected_answer: String,
}

impl QuestionsFile {
    /// Parse and validate a questions document
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RagError::MalformedBatchInput(format!("invalid questions file: {}", e)))
    }

    /// Read and validate a questions file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

impl AnswersFile {
    /// Parse and validate an expected-answers document
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            RagError::MalformedBatchInput(format!("invalid expected answers file: {}", e))
        })
    }

    /// Read and validate an expected-answers file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

/// Per-question result of a batch answering run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnswer {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub confidence: f64,
    pub source_count: usize,
}

/// Result of a batch answering run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub answers: Vec<BatchAnswer>,
    pub total_questions: usize,
}

/// Per-question result of a batch scoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub id: String,
    pub question: String,
    pub expected_answer: String,
    pub rag_answer: String,
    pub score: f64,
    pub status: Tier,
    pub confidence: f64,
}

/// Aggregate metrics over a batch scoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMetrics {
    pub total_questions: usize,
    pub average_score: f64,
    pub excellent_count: usize,
    pub good_count: usize,
    pub poor_count: usize,
    /// Percentage of answers rated good or better
    pub pass_rate: f64,
}

impl ScoreMetrics {
    fn from_scored(scored: &[ScoredAnswer]) -> Self {
        let total = scored.len();
        let average = scored.iter().map(|s| s.score).sum::<f64>() / total as f64;

        let excellent = scored.iter().filter(|s| s.status == Tier::Excellent).count();
        let good = scored.iter().filter(|s| s.status == Tier::Good).count();
        let poor = scored.iter().filter(|s| s.status == Tier::Poor).count();

        let pass_rate = (excellent + good) as f64 / total as f64 * 100.0;

        Self {
            total_questions: total,
            average_score: (average * 1000.0).round() / 1000.0,
            excellent_count: excellent,
            good_count: good,
            poor_count: poor,
            pass_rate: (pass_rate * 10.0).round() / 10.0,
        }
    }
}

/// Result of a batch scoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scored_answers: Vec<ScoredAnswer>,
    pub metrics: ScoreMetrics,
}

/// Answer every question in a batch against the loaded document
///
/// Questions without text are skipped; ids default to `q_{n}` by position.
pub async fn answer_batch(agent: &RagAgent, questions: &QuestionsFile) -> Result<BatchReport> {
    let mut answers = Vec::new();

    for (i, entry) in questions.questions.iter().enumerate() {
        let question = entry.question.trim();
        if question.is_empty() {
            continue;
        }

        let result = agent.answer_question(question).await?;
        answers.push(BatchAnswer {
            id: entry_id(entry, i),
            question: question.to_string(),
            answer: result.answer,
            confidence: result.confidence,
            source_count: result.source_count,
        });
    }

    info!(answered = answers.len(), "batch answering complete");
    Ok(BatchReport {
        total_questions: answers.len(),
        answers,
    })
}

/// Answer and score every question that has an expected reference answer
///
/// Questions lacking a matching expected answer (or text) are skipped. Fails
/// with `MalformedBatchInput` when the inputs yield no scorable pair.
pub async fn score_batch(
    agent: &RagAgent,
    questions: &QuestionsFile,
    expected: &AnswersFile,
) -> Result<ScoreReport> {
    let expected_map: HashMap<&str, &str> = expected
        .answers
        .iter()
        .map(|answer| (answer.id.as_str(), answer.expected_answer.as_str()))
        .collect();

    let mut scored = Vec::new();
    for (i, entry) in questions.questions.iter().enumerate() {
        let id = entry_id(entry, i);
        let question = entry.question.trim();

        let expected_answer = match expected_map.get(id.as_str()) {
            Some(answer) if !answer.is_empty() && !question.is_empty() => *answer,
            _ => continue,
        };

        let response = agent.answer_question(question).await?;
        let score = similarity_score(expected_answer, &response.answer);

        scored.push(ScoredAnswer {
            id,
            question: question.to_string(),
            expected_answer: expected_answer.to_string(),
            rag_answer: response.answer,
            score,
            status: Tier::from_score(score),
            confidence: response.confidence,
        });
    }

    if scored.is_empty() {
        return Err(RagError::MalformedBatchInput(
            "no valid question-answer pairs found".to_string(),
        ));
    }

    let metrics = ScoreMetrics::from_scored(&scored);
    info!(
        total = metrics.total_questions,
        average = metrics.average_score,
        pass_rate = metrics.pass_rate,
        "batch scoring complete"
    );

    Ok(ScoreReport {
        scored_answers: scored,
        metrics,
    })
}

fn entry_id(entry: &QuestionEntry, position: usize) -> String {
    entry
        .id
        .clone()
        .unwrap_or_else(|| format!("q_{}", position + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_score(1.0), Tier::Excellent);
        assert_eq!(Tier::from_score(0.8), Tier::Excellent);
        assert_eq!(Tier::from_score(0.7999), Tier::Good);
        assert_eq!(Tier::from_score(0.6), Tier::Good);
        assert_eq!(Tier::from_score(0.5999), Tier::Poor);
        assert_eq!(Tier::from_score(0.0), Tier::Poor);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Tier::Excellent).unwrap(),
            "\"excellent\""
        );
        assert_eq!(Tier::Poor.as_str(), "poor");
    }

    #[test]
    fn test_parse_valid_questions() {
        let file = QuestionsFile::parse(
            r#"{"questions": [{"id": "q1", "question": "What?"}, {"question": "And?"}]}"#,
        )
        .unwrap();
        assert_eq!(file.questions.len(), 2);
        assert_eq!(file.questions[0].id.as_deref(), Some("q1"));
        assert!(file.questions[1].id.is_none());
    }

    #[test]
    fn test_questions_missing_question_key_rejected() {
        let err = QuestionsFile::parse(r#"{"questions": [{"id": "q1"}]}"#).unwrap_err();
        assert!(matches!(err, RagError::MalformedBatchInput(_)));
    }

    #[test]
    fn test_questions_missing_list_rejected() {
        let err = QuestionsFile::parse(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, RagError::MalformedBatchInput(_)));
    }

    #[test]
    fn test_answers_missing_expected_answer_rejected() {
        let err = AnswersFile::parse(r#"{"answers": [{"id": "q1"}]}"#).unwrap_err();
        assert!(matches!(err, RagError::MalformedBatchInput(_)));
    }

    #[test]
    fn test_parse_valid_answers() {
        let file = AnswersFile::parse(
            r#"{"answers": [{"id": "q1", "expected_answer": "Paris"}]}"#,
        )
        .unwrap();
        assert_eq!(file.answers.len(), 1);
        assert_eq!(file.answers[0].expected_answer, "Paris");
    }

    #[test]
    fn test_metrics_aggregation() {
        let scored = vec![
            scored_answer("q1", 0.9),
            scored_answer("q2", 0.7),
            scored_answer("q3", 0.2),
        ];
        let metrics = ScoreMetrics::from_scored(&scored);

        assert_eq!(metrics.total_questions, 3);
        assert_eq!(metrics.average_score, 0.6);
        assert_eq!(metrics.excellent_count, 1);
        assert_eq!(metrics.good_count, 1);
        assert_eq!(metrics.poor_count, 1);
        assert_eq!(metrics.pass_rate, 66.7);
    }

    fn scored_answer(id: &str, score: f64) -> ScoredAnswer {
        ScoredAnswer {
            id: id.to_string(),
            question: "q".to_string(),
            expected_answer: "e".to_string(),
            rag_answer: "a".to_string(),
            score,
            status: Tier::from_score(score),
            confidence: 0.5,
        }
    }
}
