// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;

const LOG_ENV: &str = "HOMESEARCH_LOG";
const LOG_FILE_PREFIX: &str = "homesearch";
const LOG_FILE_SUFFIX: &str = "log";

/// Installs the global subscriber. The TUI owns the terminal, so events go
/// to a daily rolling file. `HOMESEARCH_LOG` overrides `[log].level`.
pub fn init(config: &Config) -> Result<()> {
    let log_dir = config.log_dir()?;
    let file_appender = file_appender(&log_dir)?;
    let env_filter = resolve_filter(std::env::var(LOG_ENV).ok(), config.log_level())?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("install log subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "homesearch starting");
    Ok(())
}

fn file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .with_context(|| format!("open log file in {}", log_dir.display()))
}

fn resolve_filter(env_value: Option<String>, configured: &str) -> Result<EnvFilter> {
    match env_value.filter(|value| !value.trim().is_empty()) {
        Some(value) => EnvFilter::try_new(&value)
            .with_context(|| format!("{LOG_ENV}={value:?} is not a valid log filter")),
        None => EnvFilter::try_new(configured)
            .with_context(|| format!("log level {configured:?} is not a valid log filter")),
    }
}

/// Today's file as named by the daily appender, which rolls on UTC dates.
pub fn current_log_file(log_dir: &Path) -> Result<PathBuf> {
    log_file_for(log_dir, OffsetDateTime::now_utc().date())
}

fn log_file_for(log_dir: &Path, date: Date) -> Result<PathBuf> {
    let stamp = date
        .format(format_description!("[year]-[month]-[day]"))
        .context("format log file date")?;
    Ok(log_dir.join(format!("{LOG_FILE_PREFIX}.{stamp}.{LOG_FILE_SUFFIX}")))
}
