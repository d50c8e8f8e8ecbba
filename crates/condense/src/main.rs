// ABOUTME: CLI binary for condense.
// ABOUTME: Summarizes a URL, inline text, a file, or stdin and prints the summary or a JSON report.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use condense::{Input, InferenceConfig, Pipeline, PipelineConfig, Response};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "condense")]
#[command(about = "Extract an article's main text and summarize it")]
struct Args {
    /// Page to fetch and summarize
    #[arg(long, conflicts_with_all = ["text", "file"])]
    url: Option<String>,

    /// Text to summarize directly
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text to summarize from a file ("-" for stdin)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Sentences to keep in the extractive summary
    #[arg(
        short = 'k',
        long = "sentences",
        default_value_t = condense_summary::DEFAULT_SUMMARY_SENTENCES
    )]
    sentences: usize,

    /// Reject inputs with fewer words than this
    #[arg(long, default_value_t = condense::MIN_SUMMARY_WORDS)]
    min_words: usize,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Allow fetching from private/local networks
    #[arg(long)]
    allow_private_networks: bool,

    /// Abstractive summarization endpoint (Hugging Face inference format)
    #[arg(long, env = "CONDENSE_ABSTRACTIVE_URL")]
    abstractive_url: Option<Url>,

    /// Bearer token for the abstractive endpoint
    #[arg(long, env = "CONDENSE_ABSTRACTIVE_TOKEN", hide_env_values = true)]
    abstractive_token: Option<String>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Compact JSON instead of pretty (implies --json)
    #[arg(long)]
    compact: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long)]
    timing: bool,
}

fn read_input(args: &Args) -> anyhow::Result<Input> {
    if let Some(url) = &args.url {
        return Ok(Input::Url(url.clone()));
    }
    if let Some(text) = &args.text {
        return Ok(Input::Text(text.clone()));
    }

    let mut buf = String::new();
    match &args.file {
        Some(path) if path.as_os_str() != "-" => {
            buf = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        }
        _ => {
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
        }
    }
    Ok(Input::Text(buf))
}

fn build_config(args: &Args) -> PipelineConfig {
    let abstractive = args.abstractive_url.clone().map(|endpoint| {
        let mut inference = InferenceConfig::new(endpoint);
        inference.token = args.abstractive_token.clone();
        inference
    });

    PipelineConfig::builder()
        .summary_sentences(args.sentences)
        .min_words(args.min_words)
        .fetch_timeout(Duration::from_secs(args.timeout_secs))
        .allow_private_networks(args.allow_private_networks)
        .abstractive(abstractive)
        .build()
}

fn format_output(response: &Response, json: bool, compact: bool) -> anyhow::Result<String> {
    if json || compact {
        return Ok(if compact {
            serde_json::to_string(response)?
        } else {
            serde_json::to_string_pretty(response)?
        });
    }

    Ok(match response {
        Response::Success(report) => format!(
            "{}\n\n[{} of {} sentences, {} of {} words]",
            report.extractive_summary,
            report.extractive_stats.sentence_count,
            report.original_stats.sentence_count,
            report.extractive_stats.word_count,
            report.original_stats.word_count,
        ),
        Response::Failure(body) => body.error.clone(),
    })
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("condense=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    condense_summary::init();
    let args = Args::parse();

    let input = match read_input(&args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let pipeline = match Pipeline::new(build_config(&args)) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let start = Instant::now();
    let response = pipeline.respond(input).await;
    let elapsed = start.elapsed();

    match format_output(&response, args.json, args.compact) {
        Ok(out) if response.is_success() || args.json || args.compact => println!("{}", out),
        Ok(out) => eprintln!("error: {}", out),
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
