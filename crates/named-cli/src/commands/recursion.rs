//! Recursion command implementation

use std::path::Path;

use colored::Colorize;

use crate::context::Session;
use crate::error::{CliError, Result};
use crate::settings::Settings;

pub fn run_recursion(path: &Path, settings: Settings, enabled: bool, view: Option<&str>) -> Result<()> {
    let mut session = Session::open(path, settings)?;

    match view {
        Some(name) => {
            let view = session
                .config
                .find_view_mut(name)
                .ok_or_else(|| CliError::user(format!("View '{name}' not found")))?;
            view.recursion = Some(enabled);
        }
        None => session.config.set_recursion(enabled),
    }
    session.save()?;

    let state = if enabled { "yes".green() } else { "no".red() };
    match view {
        Some(name) => println!("{} recursion {state} in view {}", "Set".bold(), name.cyan()),
        None => println!("{} recursion {state}", "Set".bold()),
    }
    Ok(())
}
