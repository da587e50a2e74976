//! pdfqa - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use pdfqa::cli::{Args, Commands, Verbosity};
use pdfqa::config::Config;
use pdfqa::embedding::MiniLmEmbedder;
use pdfqa::generation::OllamaGenerator;
use pdfqa::qa::RagAgent;
use pdfqa::scoring::{answer_batch, score_batch, AnswersFile, QuestionsFile};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    match &args.command {
        Commands::Config => show_config(&args),
        command => run(&args, command).await,
    }
}

fn init_logging(args: &Args) {
    let default_filter = match args.verbosity() {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info,pdfqa=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args, command: &Commands) -> Result<()> {
    let verbosity = args.verbosity();

    // Check Ollama is reachable before any expensive work
    let generator = OllamaGenerator::with_config(&args.ollama_url(), &args.model)?;
    if !generator.health_check().await {
        eprintln!(
            "{} Ollama is not reachable at {}",
            "error:".red().bold(),
            args.ollama_url()
        );
        eprintln!("Start it with: ollama serve");
        std::process::exit(2);
    }

    let config = Config::load().unwrap_or_default();
    let mut agent_config = config.agent_config();
    agent_config.top_k = args.top_k;

    let spinner = start_spinner(verbosity, "Loading embedding model...");
    let embedder = MiniLmEmbedder::new()?;
    finish_spinner(spinner);

    let mut agent = RagAgent::with_config(Arc::new(embedder), Arc::new(generator), agent_config);

    match command {
        Commands::Ask { pdf, question } => {
            index_document(&mut agent, pdf, verbosity)?;

            let answer = agent.answer_question(question).await?;
            let result = serde_json::json!({
                "question": question.trim(),
                "answer": answer.answer,
                "confidence": answer.confidence,
                "source_count": answer.source_count,
                "sources": answer.sources,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Batch { pdf, questions } => {
            // Validate the input file before indexing anything
            let questions = QuestionsFile::from_path(questions)?;
            index_document(&mut agent, pdf, verbosity)?;

            let report = answer_batch(&agent, &questions).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Score {
            pdf,
            questions,
            expected,
        } => {
            let questions = QuestionsFile::from_path(questions)?;
            let expected = AnswersFile::from_path(expected)?;
            index_document(&mut agent, pdf, verbosity)?;

            let report = score_batch(&agent, &questions, &expected).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if verbosity.show_progress() {
                eprintln!(
                    "{} {} questions scored, pass rate {}%",
                    "✓".green(),
                    report.metrics.total_questions,
                    report.metrics.pass_rate
                );
            }
        }

        Commands::Config => unreachable!("handled in main"),
    }

    Ok(())
}

fn index_document(agent: &mut RagAgent, pdf: &Path, verbosity: Verbosity) -> Result<()> {
    let spinner = start_spinner(verbosity, "Indexing document...");
    let summary = agent.load_document(pdf)?;
    finish_spinner(spinner);

    if verbosity.show_progress() {
        eprintln!(
            "{} Indexed {} ({} pages, {} chunks)",
            "✓".green(),
            summary.source,
            summary.pages,
            summary.chunks
        );
    }

    Ok(())
}

fn start_spinner(verbosity: Verbosity, message: &str) -> Option<ProgressBar> {
    if !verbosity.show_progress() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}

fn show_config(args: &Args) -> Result<()> {
    let config = Config::load()?;

    println!("Configuration ({})", Config::config_path()?.display());
    println!();
    println!("Ollama:");
    println!("  URL:   {}", args.ollama_url());
    println!("  Model: {}", args.model);
    println!();
    println!("Retrieval:");
    println!("  Chunk size:    {}", config.retrieval.chunk_size);
    println!("  Chunk overlap: {}", config.retrieval.chunk_overlap);
    println!("  Top-k:         {}", args.top_k);

    Ok(())
}
