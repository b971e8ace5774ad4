// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use homesearch_app::SeedData;
use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> Result<SeedData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read seed file {}", path.display()))?;
    let seed: SeedData = serde_json::from_str(&raw).with_context(|| {
        format!(
            "parse seed JSON {}; run `homesearch --print-seed` for the expected shape",
            path.display()
        )
    })?;
    seed.validate()
        .with_context(|| format!("validate seed {}", path.display()))?;
    Ok(seed)
}

pub fn render_builtin() -> Result<String> {
    serde_json::to_string_pretty(&SeedData::fixed()).context("encode built-in seed")
}
