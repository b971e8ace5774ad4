// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod seed_file;

use anyhow::{Context, Result};
use config::Config;
use homesearch_app::{PortalState, SeedData};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        tracing::error!("{error:#}");
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    if options.print_seed {
        println!("{}", seed_file::render_builtin()?);
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `homesearch --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    if options.print_log_path {
        println!("{}", logging::current_log_file(&config.log_dir()?)?.display());
        return Ok(());
    }

    logging::init(&config)?;
    let mut state = build_state(&options, &config)?;
    if options.check_only {
        tracing::info!("config and seed are valid");
        return Ok(());
    }

    homesearch_tui::run_app(&mut state)
}

/// `--seed` wins over `[data] seed_path`; with neither, the built-in seed.
fn build_state(options: &CliOptions, config: &Config) -> Result<PortalState> {
    let seed_path = options.seed_path.clone().or_else(|| config.seed_path());
    let seed = match &seed_path {
        Some(path) => {
            config::validate_seed_path(&path.to_string_lossy())?;
            let seed = seed_file::load(path)?;
            tracing::info!(seed = %path.display(), "loaded seed file");
            seed
        }
        None => {
            tracing::info!("using built-in seed");
            SeedData::fixed()
        }
    };

    let mut state = PortalState::from_seed(seed)?;
    if let Some(name) = config.client_name() {
        state.set_client_name(name);
    }
    Ok(state)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    seed_path: Option<PathBuf>,
    print_config_path: bool,
    print_log_path: bool,
    print_example: bool,
    print_seed: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        seed_path: None,
        print_config_path: false,
        print_log_path: false,
        print_example: false,
        print_seed: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a JSON file path"))?;
                options.seed_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-log-path" => {
                options.print_log_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--print-seed" => {
                options.print_seed = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("homesearch");
    println!("  --config <path>          Use a specific config path");
    println!("  --seed <path>            Load properties, messages and documents from JSON");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-log-path         Print the current log file path");
    println!("  --print-example-config   Print a config template");
    println!("  --print-seed             Print the built-in seed as JSON");
    println!("  --check                  Validate config + seed and exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, build_state, parse_cli_args};
    use crate::config::{Config, Data, Ui};
    use anyhow::Result;
    use homesearch_app::SeedData;
    use std::path::{Path, PathBuf};

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/homesearch-config.toml")
    }

    fn write_seed(dir: &Path, file_name: &str, client_name: &str) -> Result<PathBuf> {
        let mut seed = SeedData::fixed();
        seed.client_name = client_name.to_owned();
        let path = dir.join(file_name);
        std::fs::write(&path, serde_json::to_string_pretty(&seed)?)?;
        Ok(path)
    }

    fn config_with_seed(seed_path: &Path) -> Config {
        Config {
            data: Data {
                seed_path: Some(seed_path.to_string_lossy().into_owned()),
            },
            ..Config::default()
        }
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                seed_path: None,
                print_config_path: false,
                print_log_path: false,
                print_example: false,
                print_seed: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_and_seed_paths() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml", "--seed", "seeds/demo.json"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(options.seed_path, Some(PathBuf::from("seeds/demo.json")));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--seed"], default_options_path())
            .expect_err("missing seed value should fail");
        assert!(error.to_string().contains("--seed requires a JSON file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--print-config-path",
                "--print-example-config",
                "--print-seed",
                "--check",
            ],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(!options.print_log_path);
        assert!(options.print_example);
        assert!(options.print_seed);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_log_path_flag() -> Result<()> {
        let options = parse_cli_args(vec!["--print-log-path"], default_options_path())?;
        assert!(options.print_log_path);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn seed_flag_takes_priority_over_config_seed() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let flag_seed = write_seed(temp.path(), "flag.json", "Flag Client")?;
        let config_seed = write_seed(temp.path(), "config.json", "Config Client")?;

        let flag_arg = flag_seed.to_string_lossy().into_owned();
        let options = parse_cli_args(vec!["--seed", flag_arg.as_str()], default_options_path())?;
        let state = build_state(&options, &config_with_seed(&config_seed))?;
        assert_eq!(state.client_name(), "Flag Client");
        Ok(())
    }

    #[test]
    fn config_seed_is_used_without_seed_flag() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config_seed = write_seed(temp.path(), "config.json", "Config Client")?;

        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        let state = build_state(&options, &config_with_seed(&config_seed))?;
        assert_eq!(state.client_name(), "Config Client");
        Ok(())
    }

    #[test]
    fn builtin_seed_is_used_without_any_seed_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        let state = build_state(&options, &Config::default())?;
        assert_eq!(state.client_name(), "John");
        assert_eq!(state.properties(), SeedData::fixed().properties.as_slice());
        Ok(())
    }

    #[test]
    fn configured_client_name_overrides_seed_name() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config_seed = write_seed(temp.path(), "config.json", "Config Client")?;
        let config = Config {
            ui: Ui {
                client_name: Some("Dana".to_owned()),
            },
            ..config_with_seed(&config_seed)
        };

        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        let state = build_state(&options, &config)?;
        assert_eq!(state.client_name(), "Dana");
        Ok(())
    }

    #[test]
    fn uri_seed_flag_is_rejected() -> Result<()> {
        let options = parse_cli_args(
            vec!["--seed", "https://example.com/seed.json"],
            default_options_path(),
        )?;
        let error = build_state(&options, &Config::default())
            .expect_err("URI seed flag should fail");
        assert!(error.to_string().contains("looks like a URI"));
        Ok(())
    }
}
