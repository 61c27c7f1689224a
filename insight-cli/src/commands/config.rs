use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use insight_lib::settings;

use crate::CliError;

/// Show the settings file, the database in use, and the catalog seed.
pub(crate) fn run_config_show(db_override: Option<PathBuf>) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "Insight Apparatus Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if db_override.is_some() {
        "(--db)"
    } else if settings::load_path_setting(&path, "database", "path").is_some() {
        "(settings file)"
    } else {
        "(default)"
    };
    let db = settings::resolve_database_path(db_override);
    log::info!(
        "  Database:      {} {}",
        db.display(),
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );

    match settings::catalog_seed_path() {
        Some(seed) => log::info!("  Catalog seed:  {}", seed.display()),
        None => log::info!(
            "  Catalog seed:  {}",
            "not set".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

pub(crate) fn run_config_set_db(path: Option<PathBuf>) -> Result<(), CliError> {
    settings::save_database_path(path.as_deref())
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    match path {
        Some(p) => log::info!(
            "{} Database path set to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "{} Database path reset to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            settings::default_database_path().display(),
        ),
    }
    Ok(())
}

pub(crate) fn run_config_set_seed(path: Option<PathBuf>) -> Result<(), CliError> {
    settings::save_catalog_seed(path.as_deref())
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    match path {
        Some(p) => log::info!(
            "{} Catalog seed set to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "{} Catalog seed cleared",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        ),
    }
    Ok(())
}
