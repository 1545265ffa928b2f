//! faultline CLI: run seeded-defect fixtures.
//!
//! - `faultline list`: registered fixtures
//! - `faultline run [NAMES...]`: run fixtures, print reports
//! - `faultline config init [PATH]`: write the default `faultline.toml`
//!
//! Exit code is 0 when every fixture run reproduced its defect.

mod commands;
mod format;

use std::path::{Path, PathBuf};
use std::process;

use faultline_core::{Error, FaultlineConfig, OutputMode, Result, CONFIG_FILE_NAME};
use faultline_fixtures::{all_fixtures, find_fixture, Fixture, FixtureReport};
use tracing::{debug, info};

use commands::build_cli;
use format::{format_error, format_listing, format_reports};

fn main() {
    let matches = build_cli().get_matches();
    let json_flag = matches.get_flag("json");
    let fallback_mode = if json_flag {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    // `config init` runs before loading any config file.
    if let Some(("config", sub)) = matches.subcommand() {
        if let Some(("init", init)) = sub.subcommand() {
            let path = init_target(
                init.get_one::<String>("path"),
                matches.get_one::<String>("config"),
            );
            process::exit(run_config_init(&path, fallback_mode));
        }
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = match FaultlineConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e, fallback_mode));
            process::exit(1);
        }
    };

    let setup = resolve_level(matches.get_one::<String>("log-level"), &config).and_then(|level| {
        let mode = if json_flag {
            OutputMode::Json
        } else {
            config.output_mode()?
        };
        Ok((level, mode))
    });
    let (level, mode) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("{}", format_error(&e, fallback_mode));
            process::exit(1);
        }
    };
    init_tracing(level);
    debug!(config = %config_path.display(), "configuration loaded");

    let exit_code = match matches.subcommand() {
        Some(("list", _)) => {
            println!("{}", format_listing(&all_fixtures(), mode));
            0
        }
        Some(("run", sub)) => {
            let names: Vec<String> = sub
                .get_many::<String>("names")
                .map(|names| names.cloned().collect())
                .unwrap_or_default();
            run_fixtures(&names, &config, mode)
        }
        _ => run_fixtures(&[], &config, mode),
    };
    process::exit(exit_code);
}

/// Where `config init` writes: the positional path, else `--config`, else
/// `faultline.toml`.
fn init_target(path: Option<&String>, config: Option<&String>) -> PathBuf {
    path.or(config)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn resolve_level(flag: Option<&String>, config: &FaultlineConfig) -> Result<tracing::Level> {
    match flag {
        Some(level) => level
            .parse()
            .map_err(|_| Error::Config(format!("Invalid log level '{}'", level))),
        None => config.log_level(),
    }
}

fn init_tracing(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
}

/// Pick fixtures: names from the command line, else the config allow-list,
/// else the whole registry.
fn select_fixtures(names: &[String], config: &FaultlineConfig) -> Result<Vec<Box<dyn Fixture>>> {
    let names = if names.is_empty() {
        match &config.fixtures {
            Some(enabled) => enabled.as_slice(),
            None => return Ok(all_fixtures()),
        }
    } else {
        names
    };
    names.iter().map(|name| find_fixture(name)).collect()
}

fn run_fixtures(names: &[String], config: &FaultlineConfig, mode: OutputMode) -> i32 {
    let fixtures = match select_fixtures(names, config) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            return 1;
        }
    };

    let reports: Vec<FixtureReport> = fixtures
        .iter()
        .map(|fixture| {
            info!(fixture = fixture.name(), "running fixture");
            fixture.run()
        })
        .collect();
    println!("{}", format_reports(&reports, mode));

    if reports.iter().all(FixtureReport::defect_reproduced) {
        0
    } else {
        1
    }
}

fn run_config_init(path: &Path, mode: OutputMode) -> i32 {
    match FaultlineConfig::write_default_if_missing(path) {
        Ok(true) => {
            println!("Wrote {}", path.display());
            0
        }
        Ok(false) => {
            println!("{} already exists", path.display());
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn select_all_by_default() {
        let fixtures = select_fixtures(&[], &FaultlineConfig::default()).unwrap();
        assert_eq!(fixtures.len(), all_fixtures().len());
    }

    #[test]
    fn select_uses_config_allow_list() {
        let config = FaultlineConfig {
            fixtures: Some(vec!["tree_depth".to_string()]),
            ..FaultlineConfig::default()
        };
        let fixtures = select_fixtures(&[], &config).unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].name(), "tree_depth");
    }

    #[test]
    fn command_line_names_override_config() {
        let config = FaultlineConfig {
            fixtures: Some(vec!["tree_depth".to_string()]),
            ..FaultlineConfig::default()
        };
        let names = vec!["average_age".to_string(), "closure_capture".to_string()];
        let fixtures = select_fixtures(&names, &config).unwrap();
        let selected: Vec<&str> = fixtures.iter().map(|f| f.name()).collect();
        assert_eq!(selected, vec!["average_age", "closure_capture"]);
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let names = vec!["nope".to_string()];
        assert!(matches!(
            select_fixtures(&names, &FaultlineConfig::default()),
            Err(Error::UnknownFixture(_))
        ));
    }

    #[test]
    fn run_all_exits_zero() {
        assert_eq!(run_fixtures(&[], &FaultlineConfig::default(), OutputMode::Json), 0);
    }

    #[test]
    fn log_level_flag_overrides_config() {
        let config = FaultlineConfig::default();
        let flag = "debug".to_string();
        assert_eq!(
            resolve_level(Some(&flag), &config).unwrap(),
            tracing::Level::DEBUG
        );
        assert_eq!(resolve_level(None, &config).unwrap(), tracing::Level::WARN);
        let bad = "chatty".to_string();
        assert!(resolve_level(Some(&bad), &config).is_err());
    }

    #[test]
    fn config_init_falls_back_to_config_flag() {
        let matches = build_cli()
            .try_get_matches_from(["faultline", "--config", "other.toml", "config", "init"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let (_, init) = sub.subcommand().unwrap();
        assert_eq!(
            init_target(init.get_one::<String>("path"), matches.get_one::<String>("config")),
            PathBuf::from("other.toml")
        );

        let explicit = "mine.toml".to_string();
        let flag = "other.toml".to_string();
        assert_eq!(
            init_target(Some(&explicit), Some(&flag)),
            PathBuf::from("mine.toml")
        );
        assert_eq!(init_target(None, None), PathBuf::from(CONFIG_FILE_NAME));
    }

    #[test]
    fn config_init_writes_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(run_config_init(&path, OutputMode::Human), 0);
        assert!(path.exists());
        assert_eq!(run_config_init(&path, OutputMode::Human), 0);
    }
}
