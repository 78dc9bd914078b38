use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};

use revgate_core::{LlmConfig, RevgateConfig};
use revgate_git::DiffSource;
use revgate_reduce::{reduce_with_observer, ReduceOptions, Stage};
use revgate_review::gate::run_review;
use revgate_review::llm::LlmClient;

#[derive(Parser)]
#[command(
    name = "revgate",
    version,
    about = "AI pre-commit review gate",
    long_about = "Revgate reduces a git diff to fit an LLM budget, sends it for review, and\n\
                   exits 0 on a pass verdict or 1 on a fail verdict, making it suitable as\n\
                   a pre-commit hook.\n\n\
                   Examples:\n  \
                     revgate                            Review working-tree changes\n  \
                     revgate --staged                   Review staged changes\n  \
                     revgate --branch main              Review the diff against main\n  \
                     revgate --diff-file changes.patch  Review a saved patch\n  \
                     revgate --init                     Create a .revgate.toml config file"
)]
struct Cli {
    /// Diff content to review, passed directly
    #[arg(long)]
    diff: Option<String>,

    /// Read diff content from a file
    #[arg(long)]
    diff_file: Option<PathBuf>,

    /// Review staged changes (git diff --cached)
    #[arg(long)]
    staged: bool,

    /// Review the difference against a branch (git diff <branch>)
    #[arg(long)]
    branch: Option<String>,

    /// Review the changes of a revision (git diff <commit>)
    #[arg(long)]
    commit: Option<String>,

    /// Repository path (default: current directory)
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Path to configuration file (default: .revgate.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API key (overrides config file and OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Full chat-completions URL
    #[arg(long)]
    api_url: Option<String>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// Maximum tokens the model may generate
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,

    /// Context lines passed to git diff (-U<n>)
    #[arg(long, short = 'c')]
    context: Option<u32>,

    /// Commit message content, as passed by a commit-msg hook
    #[arg(long)]
    commit_msg: Option<String>,

    /// File extensions to keep, comma-separated (e.g. ".py,.rs")
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,

    /// Disable the lexical compression stage
    #[arg(long)]
    no_compress: bool,

    /// Create a default .revgate.toml configuration file and exit
    #[arg(long)]
    init: bool,

    /// Print per-stage diagnostics to stderr
    #[arg(long, short)]
    verbose: bool,
}

const DEFAULT_CONFIG: &str = r#"# Revgate Configuration
# See: https://github.com/revgate/revgate

[llm]
# api_key = "your-api-key-here"
# api_url = "https://api.openai.com/v1/chat/completions"
# model = "gpt-4o-mini"
# max_tokens = 1000
# temperature = 0.1

[reduce]
# file_extensions = [".py", ".rs", ".go"]
# max_new_file_lines = 200
# max_diff_lines = 500
# priority_patterns = ['^\s*def\s+\w+\(', '^\s*class\s+\w+', '^\s*@\w+']
# enable_compression = true

[git]
# context_lines = 10

[settings]
# verbose = false
"#;

/// Placeholder from the config template; treated the same as no key.
const PLACEHOLDER_KEY: &str = "your-api-key-here";

fn resolve_api_key(cli_key: Option<&str>, config: &LlmConfig) -> Option<String> {
    if let Some(key) = cli_key {
        return Some(key.to_string());
    }
    if let Some(key) = &config.api_key {
        if key != PLACEHOLDER_KEY {
            return Some(key.clone());
        }
    }
    std::env::var("OPENAI_API_KEY").ok()
}

fn acquire_diff(cli: &Cli, context_lines: u32) -> Result<String> {
    if let Some(diff) = &cli.diff {
        return Ok(diff.clone());
    }

    if let Some(path) = &cli.diff_file {
        return std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display()));
    }

    let source = if cli.staged {
        DiffSource::Staged
    } else if let Some(branch) = &cli.branch {
        DiffSource::Branch(branch.clone())
    } else if let Some(commit) = &cli.commit {
        DiffSource::Commit(commit.clone())
    } else {
        DiffSource::WorkingTree
    };

    let diff =
        revgate_git::collect_diff(&cli.repo, &source, context_lines).into_diagnostic()?;

    if diff.trim().is_empty() {
        let hint = match source {
            DiffSource::Staged => "nothing is staged; run 'git add' first",
            DiffSource::WorkingTree => "the working tree is clean; try --staged for staged changes",
            _ => "no changes detected for that revision",
        };
        return Err(miette::miette!(
            help = format!("{hint}, or provide diff content with --diff / --diff-file"),
            "No diff content to review ({source})"
        ));
    }

    Ok(diff)
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    if cli.init {
        let path = std::path::Path::new(".revgate.toml");
        if path.exists() {
            return Err(miette::miette!(
                help = "remove the existing file first, or edit it in place",
                ".revgate.toml already exists"
            ));
        }
        std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
        println!("Created .revgate.toml with default configuration");
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => RevgateConfig::from_file(path)
            .into_diagnostic()
            .wrap_err(format!("loading {}", path.display()))?,
        None => {
            let default_path = std::path::Path::new(".revgate.toml");
            if default_path.exists() {
                RevgateConfig::from_file(default_path)
                    .into_diagnostic()
                    .wrap_err("loading .revgate.toml")?
            } else {
                RevgateConfig::default()
            }
        }
    };

    // CLI flags override config file values.
    if let Some(url) = &cli.api_url {
        config.llm.api_url = url.clone();
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.llm.max_tokens = max_tokens;
    }
    if let Some(temperature) = cli.temperature {
        config.llm.temperature = temperature;
    }
    if !cli.extensions.is_empty() {
        config.reduce.file_extensions = cli.extensions.clone();
    }
    if cli.no_compress {
        config.reduce.enable_compression = false;
    }

    let verbose = cli.verbose || config.settings.verbose;
    let context_lines = cli.context.unwrap_or(config.git.context_lines);

    let raw_diff = acquire_diff(&cli, context_lines)?;
    if verbose {
        eprintln!(
            "acquired diff: {} bytes, {} lines",
            raw_diff.len(),
            raw_diff.lines().count()
        );
    }

    let options = ReduceOptions::from_config(&config.reduce).into_diagnostic()?;
    let observer = |stage: Stage, out: &str| {
        eprintln!(
            "stage {stage}: {} bytes, {} lines",
            out.len(),
            out.lines().count()
        );
    };
    let reduced = reduce_with_observer(
        &raw_diff,
        &options,
        if verbose { Some(&observer) } else { None },
    );

    let Some(api_key) = resolve_api_key(cli.api_key.as_deref(), &config.llm) else {
        return Err(miette::miette!(
            help = "provide a key one of three ways:\n  \
                    1. add api_key under [llm] in .revgate.toml (run 'revgate --init')\n  \
                    2. pass --api-key YOUR_KEY\n  \
                    3. export OPENAI_API_KEY=YOUR_KEY",
            "No API key configured"
        ));
    };
    config.llm.api_key = Some(api_key);

    if verbose {
        eprintln!("endpoint: {}", config.llm.api_url);
        eprintln!("model: {}", config.llm.model);
    }

    let client = LlmClient::new(&config.llm).into_diagnostic()?;

    let spinner = if std::io::stderr().is_terminal() {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
                .into_diagnostic()?,
        );
        pb.set_message(format!("Reviewing with {}...", client.model()));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let result = run_review(&client, &reduced, cli.commit_msg.as_deref()).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let outcome = result.into_diagnostic()?;

    println!("===== Review Result =====");
    println!("{}", outcome.report);
    println!("=========================");

    if outcome.verdict.is_pass() {
        println!("Review passed, commit allowed");
        Ok(())
    } else {
        println!("Review failed, fix the findings or bypass with 'confirm commit'");
        std::process::exit(1);
    }
}
