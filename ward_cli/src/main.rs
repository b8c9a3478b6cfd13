use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use ward_core::*;

mod shell;

use shell::Shell;

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "In-memory hospital patient flow registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive admission menu (default)
    Menu {
        /// Write the archive as CSV to this path on exit
        #[arg(long)]
        export_csv: Option<PathBuf>,

        /// Write a JSON snapshot of the registry to this path on exit
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Write both exports into the configured export directory on exit
        #[arg(long)]
        export: bool,
    },

    /// Write a config file populated with defaults
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_config_path);
    let config = match &cli.config {
        Some(path) if path.exists() => Config::load_from(path)?,
        Some(_) => Config::default(),
        None => Config::load()?,
    };

    // Initialize logging
    ward_core::logging::init_with_level(&config.logging.level);

    match cli.command {
        Some(Commands::Menu {
            export_csv,
            export_json,
            export,
        }) => cmd_menu(&config, export_csv, export_json, export),
        Some(Commands::InitConfig { force }) => cmd_init_config(&config_path, force),
        None => {
            // Default to the menu
            cmd_menu(&config, None, None, false)
        }
    }
}

fn cmd_menu(
    config: &Config,
    export_csv: Option<PathBuf>,
    export_json: Option<PathBuf>,
    export: bool,
) -> Result<()> {
    let scheduler = AdmissionScheduler::with_config(&config.triage);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let scheduler = Shell::new(stdin.lock(), stdout.lock(), scheduler).run()?;

    let (export_csv, export_json) = if export {
        (
            export_csv.or_else(|| Some(config.export.dir.join("archive.csv"))),
            export_json.or_else(|| Some(config.export.dir.join("snapshot.json"))),
        )
    } else {
        (export_csv, export_json)
    };

    if let Some(path) = export_csv {
        let count = write_archive_csv(&path, scheduler.archive())?;
        println!("✓ Exported {} archived patients to {}", count, path.display());
    }

    if let Some(path) = export_json {
        write_snapshot_json(&path, &scheduler)?;
        println!("✓ Exported registry snapshot to {}", path.display());
    }

    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }

    Config::default().save_to(path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
