use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vid_digest::llm::t5::T5SummarizationModel;
use vid_digest::llm::whisper::WhisperSpeechModel;
use vid_digest::tracing::init_tracing_subscriber;
use vid_digest::yt::fetcher::YtDlpFetcher;
use vid_digest::{PipelineBuilder, SummaryBounds, SummaryResult};

#[derive(Parser)]
#[command(name = "vid-digest", about = "Offline YouTube video summarizer")]
struct Cli {
    /// YouTube video URL
    url: String,

    /// Whisper model size; larger models are more accurate but slower
    #[arg(long, env = "WHISPER_MODEL", default_value = "base")]
    whisper_model: WhisperModelSize,

    /// HuggingFace repo with quantized T5 summarization weights
    #[arg(long, env = "SUMMARIZER_MODEL", default_value = T5SummarizationModel::DEFAULT_REPO)]
    summarizer_model: String,

    /// Force a transcription language (ISO code, e.g. "en"); auto-detect when unset
    #[arg(long)]
    language: Option<String>,

    /// Maximum summary length, in model tokens
    #[arg(long, default_value = "142")]
    max_length: usize,

    /// Minimum summary length, in model tokens
    #[arg(long, default_value = "56")]
    min_length: usize,

    /// Output file path for the results (default: print to stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Render the results as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Directory for temporary downloads
    #[arg(long, default_value = "downloads")]
    output_dir: PathBuf,

    /// Keep downloaded audio files after processing
    #[arg(long)]
    no_cleanup: bool,

    /// Only transcribe, do not summarize
    #[arg(long)]
    transcript_only: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WhisperModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl WhisperModelSize {
    fn as_str(self) -> &'static str {
        match self {
            WhisperModelSize::Tiny => "tiny",
            WhisperModelSize::Base => "base",
            WhisperModelSize::Small => "small",
            WhisperModelSize::Medium => "medium",
            WhisperModelSize::Large => "large",
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if !cli.url.starts_with("http://") && !cli.url.starts_with("https://") {
        anyhow::bail!("Invalid URL '{}': expected an http(s) YouTube URL", cli.url);
    }

    let fetcher = YtDlpFetcher::new(&cli.output_dir);
    let speech = WhisperSpeechModel::from_size(cli.whisper_model.as_str(), cli.language.clone())?;
    let summarizer = T5SummarizationModel::new(&cli.summarizer_model);

    let mut pipeline = PipelineBuilder::new(&cli.output_dir)
        .fetcher(fetcher)
        .speech_model(speech)
        .summarization_model(summarizer)
        .summary_bounds(SummaryBounds {
            max_length: cli.max_length,
            min_length: cli.min_length,
        })
        .cleanup(!cli.no_cleanup)
        .transcript_only(cli.transcript_only)
        .build();

    let result = pipeline.run(&cli.url).await?;
    let rendered = if cli.json {
        serde_json::to_string_pretty(&result)?
    } else {
        render_result(&result, cli.transcript_only)
    };

    match cli.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, rendered)?;
            tracing::info!(path = %path.display(), "Results saved");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_result(result: &SummaryResult, transcript_only: bool) -> String {
    let rule = "=".repeat(60);
    let mut out = format!(
        "\n{rule}\nYouTube Video Summary\n{rule}\nURL: {}\n\n{rule}\nTRANSCRIPT\n{rule}\n{}\n",
        result.url, result.transcript
    );
    if !transcript_only {
        out.push_str(&format!("\n{rule}\nSUMMARY\n{rule}\n{}\n", result.summary));
    }
    out
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_tracing_subscriber(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let outcome = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, exiting");
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        tracing::error!(error = ?e, "Failed to process video");
        std::process::exit(1);
    }
}
