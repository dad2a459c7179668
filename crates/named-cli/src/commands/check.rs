//! Check command implementation
//!
//! Verifies that a configuration renders back byte for byte, and that
//! rebuilding its modeled blocks is stable.

use std::path::Path;

use colored::Colorize;

use crate::context::Session;
use crate::error::{CliError, Result};
use crate::settings::Settings;

/// Outcome of checking one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Parsing and rendering reproduces the file exactly
    pub lossless: bool,
    /// Rebuilding a rebuilt file changes nothing
    pub stable: bool,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.lossless && self.stable
    }
}

pub fn check(path: &Path, settings: Settings) -> Result<CheckReport> {
    let session = Session::open(path, settings.clone())?;
    let lossless = session
        .file()
        .is_some_and(|file| file.render() == session.text);

    let first = session.render()?;
    let second = Session::from_text(path, first.clone(), settings)?.render()?;

    Ok(CheckReport {
        lossless,
        stable: first == second,
    })
}

/// Run the check command; fails when any check fails.
pub fn run_check(path: &Path, settings: Settings) -> Result<()> {
    let report = check(path, settings)?;

    print_line("lossless rendering", report.lossless);
    print_line("stable rebuild", report.stable);

    if report.passed() {
        println!();
        println!("{} {}", "OK".green().bold(), path.display());
        Ok(())
    } else {
        Err(CliError::user(format!("Check failed for {}", path.display())))
    }
}

fn print_line(label: &str, ok: bool) {
    let mark = if ok { "ok".green() } else { "FAILED".red().bold() };
    println!("  {label:<20} {mark}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use named_test_utils::TestConf;

    #[test]
    fn test_fixture_passes() {
        let conf = TestConf::with_fixture("full.conf");
        let report = check(&conf.path(), Settings::default()).unwrap();
        assert!(report.passed());
    }

    #[test]
    fn test_parse_error_propagates() {
        let conf = TestConf::with_text("options { recursion yes;\n");
        assert!(check(&conf.path(), Settings::default()).is_err());
    }
}
