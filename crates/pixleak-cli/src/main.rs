//! pixleak: ECB header-recovery demonstrator CLI
//!
//! Commands:
//!   recover      - brute-force published header digests, reassemble candidate
//!                  images, and resolve them interactively
//!   encrypt      - hash headers and ECB-encrypt raw PPM images into a
//!                  demonstration corpus
//!   config show  - display the active configuration

mod operator;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use pixleak_core::config::PixleakConfig;
use pixleak_recover::ProgressFn;

use crate::operator::ConsoleOperator;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "pixleak",
    version,
    about = "ECB header-recovery demonstrator",
    long_about = "pixleak: recover stripped PPM headers from published SHA-256 digests \
                  by exhaustive search, and rebuild viewable images from ECB ciphertexts"
)]
struct Cli {
    /// Path to pixleak.toml configuration file
    #[arg(long, short = 'c', env = "PIXLEAK_CONFIG", default_value = "pixleak.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PIXLEAK_LOG", default_value = "info")]
    log: String,

    /// Log format (json, text)
    #[arg(long, env = "PIXLEAK_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Brute-force published header digests and reassemble candidate images
    ///
    /// Each reconstructed candidate is shown to you for a y/N verdict;
    /// accepted images stay in the output directory, rejected ones are
    /// deleted on the spot.
    Recover {
        /// Directory of header-less ECB-encrypted images
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// File with one hex-encoded header digest per line
        #[arg(long, short = 'd')]
        digests: PathBuf,

        /// Directory for accepted reconstructed images
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Fixed search bound, overriding the size-derived heuristic
        #[arg(long)]
        bound: Option<u32>,

        /// Viewer command run on each candidate (overrides config)
        #[arg(long)]
        viewer: Option<String>,

        /// Never spawn a viewer; print candidate paths instead
        #[arg(long, conflicts_with = "viewer")]
        no_viewer: bool,
    },

    /// Hash headers and ECB-encrypt raw PPM images into a demonstration corpus
    Encrypt {
        /// Directory of plaintext raw PPM images
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Directory for the corpus (ciphertexts, digest list, key file)
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log, &cli.log_format);

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Recover {
            input,
            digests,
            output,
            bound,
            viewer,
            no_viewer,
        } => cmd_recover(config, &input, &digests, &output, bound, viewer, no_viewer),
        Commands::Encrypt { input, output } => cmd_encrypt(&config, &input, &output),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<PixleakConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing config {}: {e}", path.display()))
    } else {
        Ok(PixleakConfig::default())
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}

// ── Progress bar helpers ──────────────────────────────────────────────────────

fn make_progress_bar(total: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ── `pixleak recover` ─────────────────────────────────────────────────────────

fn cmd_recover(
    mut config: PixleakConfig,
    input: &Path,
    digests: &Path,
    output: &Path,
    bound: Option<u32>,
    viewer: Option<String>,
    no_viewer: bool,
) -> Result<()> {
    if bound.is_some() {
        config.search.bound = bound;
    }
    let viewer_command = if no_viewer {
        None
    } else {
        viewer.or_else(|| config.viewer.command.clone())
    };

    let pb = make_progress_bar(0, "search");
    let pb_clone = pb.clone();
    let progress: ProgressFn = Box::new(move |done, total, msg| {
        pb_clone.set_length(total);
        pb_clone.set_position(done);
        pb_clone.set_message(msg.to_string());
        if done == total {
            // the interactive prompts start right after the last row reports
            pb_clone.finish_and_clear();
        }
    });

    let mut operator = ConsoleOperator::new(viewer_command);
    let summary = pixleak_recover::run(
        input,
        digests,
        output,
        &config,
        &mut operator,
        Some(&progress),
    )?;
    pb.finish_and_clear();

    println!(
        "Recovered {} header(s); {} image(s) accepted, {} digest(s) unclaimed.",
        summary.recovered,
        summary.accepted.len(),
        summary.unresolved.len(),
    );
    for accepted in &summary.accepted {
        println!(
            "  {} → {}",
            accepted.source.display(),
            accepted.artifact.display()
        );
    }
    Ok(())
}

// ── `pixleak encrypt` ─────────────────────────────────────────────────────────

fn cmd_encrypt(config: &PixleakConfig, input: &Path, output: &Path) -> Result<()> {
    let template = config.header.template();
    let summary = pixleak_producer::produce(input, output, &template)?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "corpus written"
    );
    println!(
        "Encrypted {} image(s) ({} skipped) into {}",
        summary.processed,
        summary.skipped,
        summary.encrypted_dir.display(),
    );
    println!("  digest list: {}", summary.digest_list.display());
    Ok(())
}

// ── `pixleak config show` ─────────────────────────────────────────────────────

fn cmd_config_show(config: &PixleakConfig, config_path: &Path) -> Result<()> {
    println!("# active configuration ({})", config_path.display());
    let rendered = toml::to_string_pretty(config)?;
    print!("{rendered}");
    Ok(())
}
