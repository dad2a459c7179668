//! Zone command implementations

use std::path::Path;

use colored::Colorize;
use named_config::{Zone, ZoneType};

use crate::context::Session;
use crate::error::{CliError, Result};
use crate::settings::Settings;

/// List zones, one per line, prefixed by their view.
pub fn run_zone_list(path: &Path, settings: Settings, view: Option<&str>) -> Result<()> {
    let session = Session::open(path, settings)?;
    let config = &session.config;

    let mut rows: Vec<(Option<&str>, &Zone)> = Vec::new();
    match view {
        Some(name) => {
            let view = config
                .find_view(name)
                .ok_or_else(|| CliError::user(format!("View '{name}' not found")))?;
            rows.extend(view.zones.iter().map(|z| (Some(view.name.as_str()), z)));
        }
        None => {
            rows.extend(config.zones.iter().map(|z| (None, z)));
            for view in &config.views {
                rows.extend(view.zones.iter().map(|z| (Some(view.name.as_str()), z)));
            }
        }
    }

    if rows.is_empty() {
        println!("{}", "No zones.".dimmed());
        return Ok(());
    }

    for (view, zone) in rows {
        let kind = zone.zone_type.map(|t| t.to_string()).unwrap_or_else(|| "-".into());
        let prefix = view.map(|v| format!("{v}/")).unwrap_or_default();
        match &zone.file {
            Some(file) => println!("{}{}  {}  {}", prefix.dimmed(), zone.name.cyan(), kind, file),
            None => println!("{}{}  {}", prefix.dimmed(), zone.name.cyan(), kind),
        }
    }
    Ok(())
}

/// Add or replace a zone and save.
pub fn run_zone_add(
    path: &Path,
    settings: Settings,
    name: &str,
    zone_type: ZoneType,
    zone_file: Option<&str>,
    view: Option<&str>,
) -> Result<()> {
    let mut session = Session::open(path, settings)?;

    let mut zone = Zone::new(name, zone_type);
    zone.file = zone_file.map(str::to_string);
    match view {
        Some(view) => session.config.upsert_zone_in_view(view, zone),
        None => session.config.upsert_zone(zone),
    }
    session.save()?;

    println!("{} zone {} ({zone_type})", "Added".green().bold(), name.cyan());
    Ok(())
}

/// Remove a zone and save.
pub fn run_zone_remove(path: &Path, settings: Settings, name: &str, view: Option<&str>) -> Result<()> {
    let mut session = Session::open(path, settings)?;

    let removed = match view {
        Some(view) => session.config.remove_zone_in_view(view, name),
        None => session.config.remove_zone(name),
    };
    if !removed {
        return Err(CliError::user(format!("Zone '{name}' not found")));
    }
    session.save()?;

    println!("{} zone {}", "Removed".green().bold(), name.cyan());
    Ok(())
}
