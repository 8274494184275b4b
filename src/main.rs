use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use revmate_analysis::analyze::{analyze, AnalysisOutcome, SkipReason};
use revmate_analysis::repo::GitBackend;
use revmate_core::{NullTrace, OutputFormat, RevmateConfig, StderrTrace, TraceSink};

#[derive(Parser)]
#[command(
    name = "revmate",
    version,
    about = "Review effort estimation and reviewer suggestions from git history",
    long_about = "Revmate sizes up a commit and tells you how to review it: how many sessions,\n\
                   how long each should be, how many reviewers to invite, and which developers\n\
                   know the touched files best, based on who most recently modified them.\n\n\
                   Examples:\n  \
                     revmate analyze                     Analyze HEAD against its parent\n  \
                     revmate analyze --rev v1.4.2        Analyze a tagged commit\n  \
                     revmate analyze --format json       Machine-readable report\n  \
                     revmate init                        Write a default .revmate.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .revmate.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable report (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Write analysis trace lines to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate review effort and suggest reviewers for a commit
    #[command(long_about = "Estimate review effort and suggest reviewers for a commit.\n\n\
        Diffs the commit against its single parent, converts the changed-line count\n\
        into review sessions and a minimum reviewer count, then walks first-parent\n\
        history to find who most recently touched the modified files.\n\n\
        Root and merge commits are skipped, as are runs gated by --trigger-env when\n\
        the variable is unset. A skipped or failed analysis never exits non-zero.\n\n\
        Examples:\n  revmate analyze --repo .\n  revmate analyze --rev HEAD~3 --format markdown\n  revmate analyze --trigger-env GERRIT_EVENT_TYPE")]
    Analyze {
        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Revision to analyze (default: HEAD)
        #[arg(long, default_value = "HEAD")]
        rev: String,

        /// Only analyze when this environment variable is set
        #[arg(long)]
        trigger_env: Option<String>,
    },
    /// Write a default .revmate.toml to the current directory
    Init,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

const DEFAULT_CONFIG: &str = r#"# revmate configuration

[walk]
# Maximum commits visited when attributing files to recent modifiers
max_depth = 100
# Most recent modifiers recorded per file
per_file_cap = 4
# Author email prefixes that never attribute (service accounts)
author_blacklist_prefixes = ["jenkins"]

[report]
# Changed-line count above which a commit is flagged as large
size_threshold = 200
"#;

fn main() -> Result<()> {
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

    let config = match &cli.config {
        Some(path) => RevmateConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".revmate.toml");
            if default_path.exists() {
                RevmateConfig::from_file(default_path).into_diagnostic()?
            } else {
                RevmateConfig::default()
            }
        }
    };

    match cli.command {
        None => {
            Cli::command().print_help().into_diagnostic()?;
        }
        Some(Command::Analyze {
            ref repo,
            ref rev,
            ref trigger_env,
        }) => {
            let stderr_trace = StderrTrace;
            let null_trace = NullTrace;
            let trace: &dyn TraceSink = if cli.verbose {
                &stderr_trace
            } else {
                &null_trace
            };

            let triggered = match trigger_env {
                Some(var) => std::env::var_os(var).is_some(),
                None => true,
            };

            // A failed or skipped analysis must never fail the invoking
            // workflow, so every path below exits zero.
            let outcome = match GitBackend::open(repo) {
                Ok(backend) => analyze(&backend, &config, triggered, rev, trace),
                Err(err) => {
                    trace.line(&format!("analysis abandoned: {err}"));
                    AnalysisOutcome::Skipped {
                        reason: SkipReason::BackendFailure,
                    }
                }
            };

            print_outcome(&outcome, cli.format, &config)?;
        }
        Some(Command::Init) => {
            let path = std::path::Path::new(".revmate.toml");
            if path.exists() {
                miette::bail!(".revmate.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .revmate.toml with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "revmate", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn print_outcome(
    outcome: &AnalysisOutcome,
    format: OutputFormat,
    config: &RevmateConfig,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(outcome).into_diagnostic()?
        );
        return Ok(());
    }

    match outcome {
        AnalysisOutcome::Report(report) => match format {
            OutputFormat::Markdown => {
                print!(
                    "{}",
                    revmate_report::render_markdown(report, &config.report)
                );
            }
            _ => print!("{}", revmate_report::render_text(report, &config.report)),
        },
        AnalysisOutcome::Skipped { reason } => {
            println!("No analysis performed: {reason}.");
        }
    }
    Ok(())
}
