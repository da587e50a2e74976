//! Answer quality scoring against reference answers

pub mod batch;
pub mod similarity;

pub use batch::{
    answer_batch, score_batch, AnswersFile, BatchAnswer, BatchReport, ExpectedAnswer,
    QuestionEntry, QuestionsFile, ScoreMetrics, ScoreReport, ScoredAnswer, Tier,
};
pub use similarity::{clean_text, sequence_ratio, similarity_score};
