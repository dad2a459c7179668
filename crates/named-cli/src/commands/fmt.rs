//! Fmt command implementation

use std::path::Path;

use colored::Colorize;
use similar::TextDiff;

use crate::context::Session;
use crate::error::Result;
use crate::settings::Settings;

/// Rebuild every modeled block and write the file back.
///
/// With `dry_run`, print a unified diff instead of writing.
pub fn run_fmt(path: &Path, settings: Settings, dry_run: bool) -> Result<()> {
    let mut session = Session::open(path, settings)?;
    let formatted = session.render()?;

    if formatted == session.text {
        println!("{} {} is already formatted", "OK".green().bold(), path.display());
        return Ok(());
    }

    if dry_run {
        print_diff(&session.text, &formatted, path);
        return Ok(());
    }

    session.save()?;
    println!("{} {}", "Formatted".green().bold(), path.display());
    Ok(())
}

fn print_diff(old: &str, new: &str, path: &Path) {
    let name = path.display().to_string();
    let diff = TextDiff::from_lines(old, new);
    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header(&name, &name)
        .to_string();

    for line in unified.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}
