//! Prediction Market Unifier CLI
//!
//! Four commands: `run` scrapes live sources and writes all artifacts,
//! `demo` does the same over the bundled sample data, `ask` answers one
//! question over previously generated artifacts, and `chat` opens an
//! interactive question loop.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unifier_core::Site;
use unifier_match::{MatchEngine, SimilarityAlgo, SimilarityScorer, MATCH_THRESHOLD};
use unifier_query::{answer_question, KnowledgeBase};
use unifier_services::{
    sample_records, ExecutionSummary, PipelineConfig, ScrapeService, SourceSpec, UnifierPipeline,
};

#[derive(Parser, Debug)]
#[command(
    name = "unifier",
    about = "Unify prediction market products across sites"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the market sites and write all artifacts
    Run(RunArgs),
    /// Run the pipeline over the bundled sample data, no network needed
    Demo {
        /// Directory for generated artifacts
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Answer one question over previously generated artifacts
    Ask {
        /// Question about the unified products
        question: String,
        /// Directory holding the generated artifacts
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Interactive question loop over previously generated artifacts
    Chat {
        /// Directory holding the generated artifacts
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Polymarket catalog URL override
    #[arg(long)]
    polymarket_url: Option<String>,

    /// Kalshi catalog URL override
    #[arg(long)]
    kalshi_url: Option<String>,

    /// Generic market site URL override
    #[arg(long)]
    market_url: Option<String>,

    /// Extra page to harvest with the browser-style text scraper
    #[arg(long)]
    page_url: Option<String>,

    /// Directory for generated artifacts
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Similarity score required to join an existing group
    #[arg(long, default_value_t = MATCH_THRESHOLD)]
    threshold: f64,

    /// Similarity algorithm: partial-ratio or sequence-ratio
    #[arg(long, default_value_t = SimilarityAlgo::PartialRatio)]
    similarity: SimilarityAlgo,

    /// Question answered over the generated artifacts
    #[arg(long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Demo { output_dir } => demo(output_dir),
        Command::Ask {
            question,
            output_dir,
        } => {
            ask(&output_dir, &question);
            Ok(())
        }
        Command::Chat { output_dir } => chat(&output_dir),
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    info!("Starting unifier run");

    let engine =
        MatchEngine::new(SimilarityScorer::new(args.similarity)).with_threshold(args.threshold);

    let scraper =
        ScrapeService::from_overrides(args.polymarket_url, args.kalshi_url, args.market_url);

    let mut sources = vec![
        SourceSpec::new(Site::Polymarket),
        SourceSpec::new(Site::Kalshi),
        SourceSpec::new(Site::PredictionMarket),
    ];
    if let Some(url) = args.page_url {
        sources.push(SourceSpec::new(Site::Browser).with_url(url));
    }

    let mut config = PipelineConfig {
        output_dir: args.output_dir,
        ..Default::default()
    };
    if let Some(question) = args.question {
        config.question = question;
    }

    let summary = UnifierPipeline::new(config)
        .with_engine(engine)
        .run_remote(&scraper, &sources)
        .await?;

    println!(
        "Run complete: {} records unified into {} groups",
        summary.counts.raw_products, summary.counts.unified_groups
    );
    print_output_files(&summary);
    Ok(())
}

fn demo(output_dir: PathBuf) -> anyhow::Result<()> {
    info!("Running demo over the bundled sample data");

    let config = PipelineConfig {
        output_dir,
        ..Default::default()
    };
    let summary = UnifierPipeline::new(config).run(sample_records())?;

    println!(
        "Demo complete: {} records unified into {} groups, {} arbitrage opportunities",
        summary.counts.raw_products,
        summary.counts.unified_groups,
        summary.counts.arbitrage_opportunities
    );
    print_output_files(&summary);
    Ok(())
}

fn ask(output_dir: &Path, question: &str) {
    let knowledge = KnowledgeBase::load(output_dir);
    println!("{}", answer_question(&knowledge, question));
}

fn chat(output_dir: &Path) -> anyhow::Result<()> {
    println!("Chat interface for the Prediction Market Unifier");
    println!("Ask questions about the unified products. Type 'quit' to exit.");
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("You: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            println!("\nGoodbye!");
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }

        println!("\nSearching through your data...");
        let knowledge = KnowledgeBase::load(output_dir);
        println!("\n{}", answer_question(&knowledge, question));
        println!("\n{}\n", "-".repeat(50));
    }
    Ok(())
}

fn print_output_files(summary: &ExecutionSummary) {
    for (name, path) in &summary.output_files {
        println!("  {}: {}", name, path);
    }
}
