// Command-line harness for the DDE execute bridge.

use clap::{Args, Parser, Subcommand};
use ddeclient::{BridgeConfig, CommandContext, PresetRegistry, Status, ViewerAction};
use log::{error, info};
use std::process::ExitCode;

/// Exit code for harness errors (bad presets file, unknown preset). 0-3 are bridge statuses.
const EXIT_HARNESS_ERROR: u8 = 4;

#[derive(Parser)]
#[command(
    name = "dde-exec",
    version,
    about = "Send a DDE execute command to a running Windows application"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a raw command to a server/topic pair
    Send {
        #[arg(long)]
        server: String,
        #[arg(long)]
        topic: String,
        /// Command text, e.g. [DocOpen("C:\test.pdf")]
        command: String,
    },
    /// Send a viewer preset's view command
    View(PresetArgs),
    /// Send a viewer preset's close command
    Close(PresetArgs),
    /// Print the known viewer presets as JSON
    Presets,
}

#[derive(Args)]
struct PresetArgs {
    /// Preset name (sumatra, acrobat, or one from DDECLIENT_PRESETS)
    preset: String,
    /// Value for %file
    #[arg(long)]
    file: Option<String>,
    /// Value for %fullfile
    #[arg(long)]
    full_file: Option<String>,
    /// Value for %texfile
    #[arg(long)]
    tex_file: Option<String>,
    /// Value for %fulltexfile
    #[arg(long)]
    full_tex_file: Option<String>,
    /// Value for %line
    #[arg(long)]
    line: Option<u32>,
}

impl PresetArgs {
    fn context(&self) -> CommandContext {
        CommandContext {
            file: self.file.clone(),
            full_file: self.full_file.clone(),
            tex_file: self.tex_file.clone(),
            full_tex_file: self.full_tex_file.clone(),
            line: self.line,
        }
    }
}

fn main() -> ExitCode {
    // Load or ignore .env file
    let _ = dotenvy::dotenv();

    let config = BridgeConfig::from_env();
    ddeclient::logging::init_logger(&config);
    ddeclient::logging::init_crash_logger(&config);

    let cli = Cli::parse();

    match run(cli.command, &config) {
        Ok(Some(status)) => {
            info!("[DDE-EXEC] {}", status);
            if !status.is_success() {
                eprintln!("dde-exec: {}", status);
            }
            ExitCode::from(status.code() as u8)
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[DDE-EXEC] {}", e);
            eprintln!("dde-exec: {}", e);
            ExitCode::from(EXIT_HARNESS_ERROR)
        }
    }
}

fn run(
    command: Commands,
    config: &BridgeConfig,
) -> Result<Option<Status>, Box<dyn std::error::Error>> {
    match command {
        Commands::Send {
            server,
            topic,
            command,
        } => Ok(Some(ddeclient::execute(&server, &topic, &command))),
        Commands::View(args) => send_preset(config, &args, ViewerAction::View).map(Some),
        Commands::Close(args) => send_preset(config, &args, ViewerAction::Close).map(Some),
        Commands::Presets => {
            let registry = PresetRegistry::from_config(config)?;
            println!("{}", serde_json::to_string_pretty(registry.presets())?);
            Ok(None)
        }
    }
}

fn send_preset(
    config: &BridgeConfig,
    args: &PresetArgs,
    action: ViewerAction,
) -> Result<Status, Box<dyn std::error::Error>> {
    let registry = PresetRegistry::from_config(config)?;
    let target = registry.target(&args.preset, action)?;
    Ok(target.send(&args.context()))
}
