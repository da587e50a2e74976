//! Command-line argument parsing for pdfqa
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pdfqa - Ask questions of any PDF with a local Ollama model
#[derive(Parser, Debug)]
#[command(name = "pdfqa")]
#[command(version = "0.1.0")]
#[command(about = "Ask questions of any PDF with a local Ollama model", long_about = None)]
pub struct Args {
    /// Ollama model to use for generation
    #[arg(short, long, default_value = "llama3.2")]
    pub model: String,

    /// Ollama host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Ollama port
    #[arg(long, default_value_t = 11434)]
    pub port: u16,

    /// Number of chunks retrieved per question
    #[arg(long, default_value_t = 3)]
    pub top_k: usize,

    /// Verbosity level: default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except results)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question about a PDF
    Ask {
        /// PDF document to query
        pdf: PathBuf,
        /// The question to answer
        question: String,
    },

    /// Answer a batch of questions from a JSON file
    Batch {
        /// PDF document to query
        pdf: PathBuf,
        /// Questions file: {"questions": [{"id": "...", "question": "..."}]}
        questions: PathBuf,
    },

    /// Answer a batch of questions and score them against expected answers
    Score {
        /// PDF document to query
        pdf: PathBuf,
        /// Questions file: {"questions": [{"id": "...", "question": "..."}]}
        questions: PathBuf,
        /// Expected answers file: {"answers": [{"id": "...", "expected_answer": "..."}]}
        expected: PathBuf,
    },

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Get Ollama base URL
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Verbosity {
    /// Check if progress output should be shown
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> Args {
        Args {
            model: "llama3.2".to_string(),
            host: "127.0.0.1".to_string(),
            port: 11434,
            top_k: 3,
            verbose,
            quiet,
            command: Commands::Config,
        }
    }

    #[test]
    fn test_verbosity_normal() {
        assert_eq!(args_with(0, false).verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        assert_eq!(args_with(1, false).verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_quiet_wins() {
        assert_eq!(args_with(2, true).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_ollama_url() {
        let mut args = args_with(0, false);
        args.host = "localhost".to_string();
        args.port = 8080;
        assert_eq!(args.ollama_url(), "http://localhost:8080");
    }

    #[test]
    fn test_parse_ask_command() {
        let args = Args::parse_from(["pdfqa", "ask", "report.pdf", "What is the revenue?"]);
        match args.command {
            Commands::Ask { pdf, question } => {
                assert_eq!(pdf, PathBuf::from("report.pdf"));
                assert_eq!(question, "What is the revenue?");
            }
            _ => panic!("expected ask command"),
        }
    }

    #[test]
    fn test_parse_score_command() {
        let args = Args::parse_from([
            "pdfqa",
            "--model",
            "mistral",
            "score",
            "report.pdf",
            "questions.json",
            "expected.json",
        ]);
        assert_eq!(args.model, "mistral");
        assert!(matches!(args.command, Commands::Score { .. }));
    }

    #[test]
    fn test_show_progress() {
        assert!(Verbosity::Normal.show_progress());
        assert!(Verbosity::Verbose.show_progress());
        assert!(!Verbosity::Quiet.show_progress());
    }
}
