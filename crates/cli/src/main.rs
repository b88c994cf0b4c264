use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use fediscan_core::{
    ChatClient, Classifier, ClassifierConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, FetchConfig, JsonConfig, PostExtractor,
    PostRecord, TextConfig, convert_to_json, convert_to_text, fetch_stdin,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Characters of content shown in verbose mode
const PREVIEW_CHARS: usize = 100;

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Analyze a Mastodon/Fediverse post for scam or phishing content
#[derive(Parser, Debug)]
#[command(name = "fediscan")]
#[command(version)]
#[command(about = "Analyze a Mastodon/Fediverse post for scam or phishing content", long_about = None)]
struct Args {
    /// URL of the post to analyze, or the post text with --text
    #[arg(value_name = "INPUT", required_unless_present_any = ["stdin", "completions"])]
    input: Option<String>,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Model to use for analysis
    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_MODEL, value_name = "MODEL")]
    model: String,

    /// Base URL of the OpenAI-compatible chat API
    #[arg(long, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    output: OutputFormat,

    /// Print only the analysis object as JSON
    #[arg(long)]
    json: bool,

    /// Treat INPUT as the post text instead of a URL
    #[arg(long, conflicts_with = "stdin")]
    text: bool,

    /// Read the post text from standard input
    #[arg(long, conflicts_with = "input")]
    stdin: bool,

    /// HTTP timeout in seconds for fetching the post
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for fetching the post
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,fediscan_core=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            echo::print_error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "fediscan", &mut io::stdout());
        return Ok(());
    }

    let api_key = args
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .context("OpenRouter API key is required. Set OPENROUTER_API_KEY environment variable or use --api-key option.")?
        .to_string();

    if args.verbose {
        echo::print_banner();
    }

    let input = args.input.clone().unwrap_or_default();
    let record = load_record(&args, &input).await?;

    if args.verbose {
        if record.instance.is_empty() {
            echo::print_detail("Source", "direct text");
        } else {
            echo::print_detail("Extracted post from", &record.instance);
        }
        echo::print_detail("Author", if record.author.is_empty() { "unknown" } else { record.author.as_str() });
        echo::print_detail("Content preview", &format!("{}...", record.preview(PREVIEW_CHARS)));
        eprintln!();
        echo::print_step(2, 3, &format!("Analyzing with {}", args.model.bright_white()));
    }

    let client = ChatClient::new(api_key)
        .context("Failed to configure the analysis client")?
        .with_base_url(args.base_url.as_str());
    let classifier = Classifier::new(client, ClassifierConfig { model: args.model.clone(), ..Default::default() });

    let start = Instant::now();
    let analysis = classifier.classify(&record).await;

    if args.verbose {
        echo::print_timing("Analysis", start.elapsed());
        match &analysis.error {
            Some(error) => echo::print_warning(error),
            None => echo::print_success("Analysis complete"),
        }
        eprintln!();
        echo::print_step(3, 3, "Writing output");
    }

    let output = if args.json || args.output == OutputFormat::Json {
        let config = JsonConfig { analysis_only: args.json, pretty: true };
        format!("{}\n", convert_to_json(&record, &analysis, &config).context("Failed to serialize results")?)
    } else {
        convert_to_text(&record, &analysis, &TextConfig { colored: io::stdout().is_terminal() })
    };

    print!("{}", output);

    Ok(())
}

/// Builds the post record from a URL, the INPUT text, or stdin.
async fn load_record(args: &Args, input: &str) -> anyhow::Result<PostRecord> {
    if args.stdin {
        if args.verbose {
            echo::print_step(1, 3, "Reading post text from stdin");
        }
        let text = fetch_stdin().context("Failed to read from stdin")?;
        if args.verbose {
            echo::print_detail("Size", &echo::format_size(text.len()));
        }
        return Ok(PostRecord::from_text(&text));
    }

    if args.text {
        if args.verbose {
            echo::print_step(1, 3, "Using direct text input");
        }
        return Ok(PostRecord::from_text(input));
    }

    if args.verbose {
        echo::print_step(1, 3, &format!("Analyzing URL: {}", input.bright_white().underline()));
    }

    let config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };

    let start = Instant::now();
    let extractor = PostExtractor::new(config).context("Failed to build HTTP client")?;
    let record = extractor
        .extract(input)
        .await
        .context("Could not extract post data from URL")?;

    if args.verbose {
        echo::print_timing("Extraction", start.elapsed());
    }

    Ok(record)
}
