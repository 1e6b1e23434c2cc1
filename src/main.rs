use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use yeneta_cli::{
    ConversationState, ReplCommand, display_banner, print_help, print_settings,
    read_line_with_history, render_answer, render_error, render_sources,
};
use yeneta_core::{Difficulty, Language, RagConfig, RetrievalFallback, SessionStore};
use yeneta_groq::GroqClient;
use yeneta_rag::{
    HashEmbedder, InMemorySessionStore, JsonlSessionStore, LocalContentStore, PassageIngestor,
    TutorAnswer, TutorPipeline, document_from_file, sample_documents,
};

type Pipeline = TutorPipeline<HashEmbedder, LocalContentStore, GroqClient, dyn SessionStore>;

#[derive(Parser)]
#[command(name = "yeneta")]
#[command(about = "AI study assistant that answers from your course material", long_about = None)]
struct Cli {
    /// Ask one question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Answer language code (en, am, om, ti, yo, sw) or "auto"
    #[arg(short, long, default_value = "auto")]
    language: String,

    /// Learning level: beginner, intermediate or advanced
    #[arg(long, default_value = "beginner")]
    level: String,

    /// Only use material from this subject
    #[arg(long)]
    subject: Option<String>,

    /// Passages kept after ranking
    #[arg(long)]
    top_k: Option<usize>,

    /// Weight of the semantic score, between 0 and 1
    #[arg(long)]
    weight: Option<f32>,

    /// Character budget for the composed prompt
    #[arg(long)]
    max_prompt_chars: Option<usize>,

    /// Behaviour when semantic retrieval fails: abort, lexical-only or no-context
    #[arg(long)]
    fallback: Option<String>,

    /// Text or markdown files to add to the course material
    #[arg(long, num_args = 1..)]
    ingest: Vec<PathBuf>,

    /// Subject tag for ingested files
    #[arg(long, default_value = "general")]
    ingest_subject: String,

    /// Skip the built-in sample material
    #[arg(long)]
    no_samples: bool,

    /// Append conversation records to this JSON-lines file
    #[arg(long)]
    session_log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

/// Apply command-line overrides to the environment settings, then validate once
fn rag_config(cli: &Cli, mut config: RagConfig) -> Result<RagConfig> {
    if let Some(top_k) = cli.top_k {
        config.top_k = top_k;
    }
    if let Some(weight) = cli.weight {
        config.semantic_weight = weight;
    }
    if let Some(max_prompt_chars) = cli.max_prompt_chars {
        config.max_prompt_chars = max_prompt_chars;
    }
    if let Some(ref fallback) = cli.fallback {
        config.fallback = fallback.parse::<RetrievalFallback>()?;
    }
    config.validate()?;
    Ok(config)
}

fn parse_language(code: &str) -> Result<Option<Language>> {
    if code.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    Ok(Some(Language::from_code(code)?))
}

async fn load_content(
    cli: &Cli,
    embedder: Arc<HashEmbedder>,
    store: Arc<LocalContentStore>,
    difficulty: Difficulty,
) -> Result<()> {
    let ingestor = PassageIngestor::new(embedder, store.clone());

    if !cli.no_samples {
        let report = ingestor.ingest_all(&sample_documents()).await?;
        tracing::info!(stored = report.passages_stored, "sample material loaded");
    }

    for path in &cli.ingest {
        let document = document_from_file(path, &cli.ingest_subject, difficulty).await?;
        let report = ingestor.ingest(&document).await?;
        println!(
            "{} Ingested {} ({} passages)",
            "✅".green(),
            path.display(),
            report.passages_stored
        );
        for error in &report.errors {
            println!("  {} {}", "⚠️".yellow(), error);
        }
    }

    if store.count()? == 0 {
        println!(
            "{}",
            "⚠️  No course material loaded; answers will come from general knowledge.".yellow()
        );
    }
    Ok(())
}

async fn ask(
    pipeline: &Pipeline,
    state: &ConversationState,
    text: &str,
) -> yeneta_core::Result<TutorAnswer> {
    let query = state.query(text)?;
    pipeline.ask(&query).await
}

async fn run_repl(pipeline: &Pipeline, mut state: ConversationState) -> Result<()> {
    display_banner();
    print_settings(&state);
    println!();

    let mut history = Vec::new();

    loop {
        let Some(input) = read_line_with_history(&mut history)? else {
            break;
        };

        let command = match ReplCommand::parse(&input) {
            Ok(command) => command,
            Err(e) => {
                render_error(&e);
                continue;
            }
        };

        match command {
            ReplCommand::Empty => continue,
            ReplCommand::Help => print_help(),
            ReplCommand::Exit => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            ReplCommand::Sources => render_sources(state.last_sources()),
            ReplCommand::Ask(text) => {
                println!("{} Thinking...", "🤖".blue());
                match ask(pipeline, &state, &text).await {
                    Ok(answer) => {
                        render_answer(&answer);
                        state.record(&text, &answer.answer, answer.cited_sources());
                    }
                    Err(e) => render_error(&e),
                }
            }
            settings => {
                state.apply(&settings);
                print_settings(&state);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = rag_config(&cli, RagConfig::parse_env()?)?;
    let language = parse_language(&cli.language)?;
    let difficulty = Difficulty::from_code(&cli.level)?;

    // Initialize components
    let groq = Arc::new(GroqClient::from_env()?);
    let embedder = Arc::new(HashEmbedder::default());
    let store = Arc::new(LocalContentStore::new());
    load_content(&cli, embedder.clone(), store.clone(), difficulty).await?;

    let sessions: Arc<dyn SessionStore> = match cli.session_log {
        Some(ref path) => Arc::new(JsonlSessionStore::new(path.clone())),
        None => Arc::new(InMemorySessionStore::new()),
    };

    let pipeline: Pipeline = TutorPipeline::new(embedder, store, groq, sessions, config)?;
    let state = ConversationState::new(language, difficulty, cli.subject.clone());

    // Handle a single question
    if let Some(ref question) = cli.question {
        let answer = ask(&pipeline, &state, question).await?;
        render_answer(&answer);
        return Ok(());
    }

    run_repl(&pipeline, state).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_zero_top_k() -> RagConfig {
        RagConfig::parse_lookup(|key| (key == "YENETA_TOP_K").then(|| "0".to_string())).unwrap()
    }

    #[test]
    fn test_flag_overrides_invalid_env_value() {
        let cli = Cli::parse_from(["yeneta", "--top-k", "3"]);
        let config = rag_config(&cli, env_with_zero_top_k()).unwrap();
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_invalid_env_value_without_override_rejected() {
        let cli = Cli::parse_from(["yeneta"]);
        assert!(rag_config(&cli, env_with_zero_top_k()).is_err());
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let cli = Cli::parse_from(["yeneta", "--weight", "1.5"]);
        assert!(rag_config(&cli, RagConfig::default()).is_err());
    }
}
