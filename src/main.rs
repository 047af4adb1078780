// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use signgloss::app_config::{self, Config, ExporterKind};
use signgloss::gloss::{GlossPlan, GlossResolution};
use signgloss::Controller;

/// CLI Wrapper for ExporterKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExporter {
    Ffmpeg,
    Manifest,
}

impl From<CliExporter> for ExporterKind {
    fn from(cli_exporter: CliExporter) -> Self {
        match cli_exporter {
            CliExporter::Ffmpeg => ExporterKind::Ffmpeg,
            CliExporter::Manifest => ExporterKind::Manifest,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a phrase and render it
    Translate {
        /// English phrase to translate
        #[arg(value_name = "PHRASE")]
        phrase: String,

        /// Output file (named automatically when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the gloss sequence and coverage without rendering
    Gloss {
        /// English phrase to translate
        #[arg(value_name = "PHRASE")]
        phrase: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fingerspell text letter by letter
    Spell {
        /// Text to spell
        #[arg(value_name = "TEXT")]
        text: String,

        /// Output file (named automatically when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate every line of a file concurrently
    Batch {
        /// File with one phrase per line (`#` starts a comment)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check the dataset layout and tooling
    Check,

    /// Generate shell completions for signgloss
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// signgloss - English to sign-language gloss translation
///
/// Converts English phrases into sign-language gloss sequences and renders
/// them from a sign clip dataset, fingerspelling words without a clip.
#[derive(Parser, Debug)]
#[command(name = "signgloss")]
#[command(version)]
#[command(about = "English to sign-language gloss translation")]
#[command(long_about = "signgloss turns English phrases into sign-language gloss sequences and renders them.

EXAMPLES:
    signgloss translate \"I go to school\"           # Render to asl_outputs/
    signgloss translate \"thank you\" -o thanks.mp4  # Explicit output file
    signgloss gloss \"where do you live?\"          # Show glosses and coverage only
    signgloss spell \"Anna\"                        # Fingerspell a name
    signgloss --exporter manifest batch lines.txt # Write JSON clip lists
    signgloss check                               # Verify the dataset layout
    signgloss completions bash > signgloss.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Coverage threshold for the partial coverage warning (0-1)
    #[arg(long, global = true)]
    coverage_threshold: Option<f32>,

    /// Exporter to render with
    #[arg(short, long, value_enum, global = true)]
    exporter: Option<CliExporter>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let CommandLineOptions {
        command,
        config: config_path,
        log_level,
        coverage_threshold,
        exporter,
    } = CommandLineOptions::parse();

    if let Commands::Completions { shell } = command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "signgloss", &mut std::io::stdout());
        return Ok(());
    }

    // Load or create the configuration, apply CLI overrides, then validate
    let mut config = Config::load_or_create(&config_path)?;
    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }
    if let Some(threshold) = coverage_threshold {
        config.engine.coverage_threshold = threshold;
    }
    if let Some(exporter) = exporter {
        config.export.exporter = exporter.into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    run_command(command, &controller).await
}

async fn run_command(command: Commands, controller: &Controller) -> Result<()> {
    match command {
        Commands::Translate { phrase, output } => {
            let outcome = controller.translate_phrase(&phrase, output).await?;
            println!("{}", outcome.glosses.join(" "));
            println!("{}", outcome.coverage.summary());
            println!("{}", outcome.artifact.display());
        }
        Commands::Gloss { phrase, json } => {
            let plan = controller.gloss_phrase(&phrase)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        Commands::Spell { text, output } => {
            let outcome = controller.spell(&text, output).await?;
            println!("{}", outcome.coverage.summary());
            println!("{}", outcome.artifact.display());
        }
        Commands::Batch { file } => {
            let report = controller.run_batch_file(&file).await?;
            for item in &report.items {
                match &item.result {
                    Ok(outcome) => println!(
                        "{:>3}. {} -> {} ({:.0}%)",
                        item.index + 1,
                        item.phrase,
                        outcome.artifact.display(),
                        outcome.coverage.fraction * 100.0
                    ),
                    Err(e) => println!("{:>3}. {} -> failed: {}", item.index + 1, item.phrase, e),
                }
            }
            if report.failed() > 0 {
                return Err(anyhow!("{} of {} phrases failed", report.failed(), report.items.len()));
            }
        }
        Commands::Check => {
            let report = controller.check_setup().await;
            println!("{}", report);
            if !report.is_ready() {
                error!("Setup incomplete: no usable vocabulary");
                return Err(anyhow!("Setup check failed"));
            }
            if !report.can_render_video() {
                warn!("ffmpeg not found; use --exporter manifest to write clip lists instead");
            }
            info!("Setup looks good");
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn print_plan(plan: &GlossPlan) {
    println!("{}", plan.glosses.join(" "));
    for gloss in &plan.resolved.glosses {
        let how = match &gloss.resolution {
            GlossResolution::Exact => "exact".to_string(),
            GlossResolution::Normalized { key } => format!("as {:?}", key),
            GlossResolution::Fingerspelled { missing } if missing.is_empty() => "fingerspelled".to_string(),
            GlossResolution::Fingerspelled { missing } => format!(
                "fingerspelled, missing {}",
                missing.iter().collect::<String>()
            ),
            GlossResolution::Pause => "pause".to_string(),
        };
        println!("  {:<20} {}", gloss.gloss, how);
    }
    println!("{}", plan.coverage().summary());
}
