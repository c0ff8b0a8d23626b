// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use vttedit::app_config::{Config, LogLevel};
use vttedit::app_controller::{Controller, EditEvent};
use vttedit::file_utils::FileManager;
use vttedit::prompt::FixedPrompt;
use vttedit::session::{self, EditorSession};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Edit a caption file interactively (default command)
    Edit {
        /// Caption file to load
        #[arg(value_name = "FILE")]
        input_path: Option<PathBuf>,
    },

    /// Print the blocks of a caption file
    Show {
        /// Caption file to read
        #[arg(value_name = "FILE")]
        input_path: PathBuf,
    },

    /// Merge a contiguous range of blocks and save the result
    Merge {
        /// Caption file to read
        #[arg(value_name = "FILE")]
        input_path: PathBuf,

        /// First block to merge (0-based)
        #[arg(long)]
        from: usize,

        /// Last block to merge (0-based, inclusive)
        #[arg(long)]
        to: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Add a tag to one block and save the result
    Tag {
        /// Caption file to read
        #[arg(value_name = "FILE")]
        input_path: PathBuf,

        /// Block to tag (0-based)
        #[arg(short, long)]
        block: usize,

        /// Tag to add, without '#'
        #[arg(short, long)]
        tag: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions for vttedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file (defaults to the configured file name next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// vttedit - editor for WebVTT-like caption files
///
/// Loads caption files with an optional YAML header, lets you edit, tag and
/// merge cue blocks, and exports the result.
#[derive(Parser, Debug)]
#[command(name = "vttedit")]
#[command(version)]
#[command(about = "Editor for WebVTT-like caption files with YAML front matter")]
#[command(long_about = "vttedit loads caption files, lets you edit, tag and merge cue blocks, and saves them back.

EXAMPLES:
    vttedit interview.vtt                          # Edit interactively
    vttedit show interview.vtt                     # Print all blocks
    vttedit merge interview.vtt --from 2 --to 4    # Merge blocks 2..=4 into edited.vtt
    vttedit tag interview.vtt -b 0 -t intro        # Tag block 0 with #intro
    vttedit completions bash > vttedit.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Caption file to edit when no subcommand is given
    #[arg(value_name = "FILE")]
    input_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
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
            let (emoji, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "vttedit", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config);

    match cli.command {
        Some(Commands::Edit { input_path }) => run_edit(controller, input_path).await,
        Some(Commands::Show { input_path }) => run_show(controller, &input_path).await,
        Some(Commands::Merge { input_path, from, to, output }) => {
            run_merge(controller, &input_path, from, to, &output).await
        }
        Some(Commands::Tag { input_path, block, tag, output }) => {
            run_tag(controller, &input_path, block, tag, &output).await
        }
        Some(Commands::Completions { .. }) => Ok(()),
        None => run_edit(controller, cli.input_path).await,
    }
}

// @loads: Config file, CLI overrides, log level
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Just update the max level without reinitializing the logger
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

async fn run_edit(mut controller: Controller, input_path: Option<PathBuf>) -> Result<()> {
    let output_dir = match &input_path {
        Some(path) => {
            controller.load_file(path).await?;
            session::output_dir_for(path)
        }
        None => PathBuf::new(),
    };

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = EditorSession::new(controller, input, std::io::stdout(), output_dir);
    session.run().await
}

async fn run_show(mut controller: Controller, input_path: &Path) -> Result<()> {
    controller.load_file(input_path).await?;
    print!("{}", controller.view());
    Ok(())
}

async fn run_merge(mut controller: Controller, input_path: &Path, from: usize, to: usize, output: &OutputArgs) -> Result<()> {
    if from >= to {
        return Err(anyhow!("--from ({}) must be lower than --to ({})", from, to));
    }

    controller.load_file(input_path).await?;
    for index in from..=to {
        controller.apply(EditEvent::ToggleSelection(index))?;
    }

    if controller.merge_selected().is_none() {
        warn!("Nothing merged");
        return Ok(());
    }

    save_output(&controller, input_path, output).await
}

async fn run_tag(mut controller: Controller, input_path: &Path, block: usize, tag: String, output: &OutputArgs) -> Result<()> {
    controller.load_file(input_path).await?;
    controller.apply(EditEvent::ToggleSelection(block))?;

    let mut prompt = FixedPrompt::new(Some(tag));
    if !controller.add_tag(&mut prompt).await? {
        warn!("Empty tag, nothing to do");
        return Ok(());
    }

    save_output(&controller, input_path, output).await
}

async fn save_output(controller: &Controller, input_path: &Path, output: &OutputArgs) -> Result<()> {
    let output_path = output.output.clone().unwrap_or_else(|| {
        FileManager::generate_output_path(input_path, &controller.config().output_file_name)
    });

    if FileManager::file_exists(&output_path) && !output.force_overwrite {
        warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
        return Ok(());
    }

    controller.save(&output_path).await?;
    info!("Success: {:?}", output_path);
    Ok(())
}
