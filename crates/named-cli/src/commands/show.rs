//! Show command implementation

use std::path::Path;

use colored::Colorize;
use named_config::Config;

use crate::context::Session;
use crate::error::Result;
use crate::settings::Settings;

/// Print a summary of the configuration, or its JSON projection.
pub fn run_show(path: &Path, settings: Settings, json: bool) -> Result<()> {
    let session = Session::open(path, settings)?;

    if json {
        println!("{}", session.config.to_json()?);
        return Ok(());
    }

    println!("{} {}", "Config".blue().bold(), path.display().to_string().yellow());
    println!();
    print_counts(&session.config);

    if !session.config.views.is_empty() {
        println!();
        println!("{}", "Views:".bold());
        for view in &session.config.views {
            println!(
                "  {} ({} zones{})",
                view.name.cyan(),
                view.zones.len(),
                recursion_note(view.recursion)
            );
        }
    }

    if !session.config.zones.is_empty() {
        println!();
        println!("{}", "Zones:".bold());
        for zone in &session.config.zones {
            let kind = zone.zone_type.map(|t| t.to_string()).unwrap_or_default();
            println!("  {} {}", zone.name.cyan(), kind.dimmed());
        }
    }

    if !session.report.is_empty() {
        println!();
        println!("{}", "Not kept by the model:".yellow().bold());
        for fragment in &session.report.dropped {
            println!("  {} {} in {}", "!".yellow(), fragment.text, fragment.scope);
        }
    }

    Ok(())
}

fn print_counts(config: &Config) {
    let counts = [
        ("includes", config.includes.len()),
        ("acls", config.acls.len()),
        ("keys", config.keys.len()),
        ("key-stores", config.key_stores.len()),
        ("remote-servers", config.remote_servers.len()),
        ("tls", config.tls.len()),
        ("http", config.http.len()),
        ("trust-anchors", config.trust_anchors.len()),
        ("views", config.views.len()),
        ("zones", config.zones.len()),
    ];
    for (label, count) in counts {
        if count > 0 {
            println!("  {label:<16} {count}");
        }
    }

    let singletons = [
        ("controls", config.controls.is_some()),
        ("logging", config.logging.is_some()),
        ("options", config.options.is_some()),
    ];
    for (label, present) in singletons {
        if present {
            println!("  {label:<16} {}", "present".green());
        }
    }

    let recursion = config.options.as_ref().and_then(|o| o.recursion);
    println!("  {:<16} {}", "recursion", yes_no(recursion));
}

fn recursion_note(recursion: Option<bool>) -> String {
    match recursion {
        Some(enabled) => format!(", recursion {}", if enabled { "yes" } else { "no" }),
        None => String::new(),
    }
}

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".green().to_string(),
        Some(false) => "no".red().to_string(),
        None => "unset".dimmed().to_string(),
    }
}
