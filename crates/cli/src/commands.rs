//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("faultline")
        .about("Run seeded-defect fixtures and report expected vs actual results")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: faultline.toml)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Diagnostic level on stderr: error, warn, info, debug, trace")
                .global(true),
        )
        .subcommand(Command::new("list").about("List registered fixtures"))
        .subcommand(
            Command::new("run")
                .about("Run fixtures (all enabled fixtures when none are named)")
                .arg(
                    Arg::new("names")
                        .help("Fixture names")
                        .num_args(0..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the config file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("init")
                        .about("Write the default config file if missing")
                        .arg(Arg::new("path").help("Target path (default: faultline.toml)")),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn run_collects_names() {
        let matches = build_cli()
            .try_get_matches_from(["faultline", "run", "tree_depth", "closure_capture"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "run");
        let names: Vec<&String> = sub.get_many::<String>("names").unwrap().collect();
        assert_eq!(names, ["tree_depth", "closure_capture"]);
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["faultline", "list", "--json"])
            .unwrap();
        assert!(matches.get_flag("json"));
    }

    #[test]
    fn config_requires_subcommand() {
        assert!(build_cli()
            .try_get_matches_from(["faultline", "config"])
            .is_err());
    }
}
