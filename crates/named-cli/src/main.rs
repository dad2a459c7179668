//! namedctl
//!
//! Command-line caller of the named.conf typed model: inspect, check,
//! reformat and edit a configuration while leaving everything outside the
//! modeled blocks untouched.

mod cli;
mod commands;
mod context;
mod error;
mod settings;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, ZoneAction};
use error::Result;
use settings::Settings;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so JSON output stays clean
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(true);
    if cli.verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    } else {
        tracing::subscriber::set_global_default(
            builder.with_env_filter(EnvFilter::from_default_env()).finish(),
        )
        .expect("Failed to set tracing subscriber");
    }

    let Some(command) = cli.command else {
        println!("{} named.conf editor", "namedctl".green().bold());
        println!();
        println!("Run {} for available commands.", "namedctl --help".cyan());
        return Ok(());
    };

    let mut settings = Settings::load(cli.overrides.config.as_deref())?;
    cli.overrides.apply(&mut settings);

    execute_command(command, settings)
}

fn execute_command(cmd: Commands, settings: Settings) -> Result<()> {
    match cmd {
        Commands::Show { file, json } => commands::run_show(&file, settings, json),
        Commands::Check { file } => commands::run_check(&file, settings),
        Commands::Fmt { file, dry_run } => commands::run_fmt(&file, settings, dry_run),
        Commands::Zone { action } => match action {
            ZoneAction::List { file, view } => {
                commands::run_zone_list(&file, settings, view.as_deref())
            }
            ZoneAction::Add {
                file,
                name,
                zone_type,
                zone_file,
                view,
            } => commands::run_zone_add(
                &file,
                settings,
                &name,
                zone_type,
                zone_file.as_deref(),
                view.as_deref(),
            ),
            ZoneAction::Remove { file, name, view } => {
                commands::run_zone_remove(&file, settings, &name, view.as_deref())
            }
        },
        Commands::Recursion {
            file,
            enabled,
            view,
        } => commands::run_recursion(&file, settings, enabled, view.as_deref()),
    }
}
