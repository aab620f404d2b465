use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};

use crate::config::{
    Configuration, ConfigurationError, PartialConfig, DEFAULT_BASE_URL, DEFAULT_END_HOUR,
    DEFAULT_START_HOUR,
};

#[derive(Debug)]
pub struct Collected {
    pub config: Configuration,
    /// Whether any field had to be asked for interactively.  Used by the
    /// binary to decide whether to write the answers back as new defaults.
    pub prompted: bool,
}

/// Fills the gaps in `partial` (persisted defaults already merged with CLI
/// flags) by asking on `writer` and reading answers from `reader`, then
/// validates the result.  Fields that are already present are not asked for.
pub fn complete_configuration(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    partial: PartialConfig,
) -> Result<Collected> {
    let mut prompted = false;

    let workspace_id = require_string(
        reader,
        writer,
        "Clockify workspace id",
        partial.workspace_id,
        &mut prompted,
    )?;
    let project_id = require_string(
        reader,
        writer,
        "Clockify project id",
        partial.project_id,
        &mut prompted,
    )?;
    let auth_token = require_string(
        reader,
        writer,
        "Clockify auth token",
        partial.auth_token,
        &mut prompted,
    )?;
    let description = require_string(
        reader,
        writer,
        "Entry description",
        partial.description,
        &mut prompted,
    )?;
    let start_hour = require_hour(
        reader,
        writer,
        "Start hour (0-23)",
        partial.start_hour,
        DEFAULT_START_HOUR,
        &mut prompted,
    )?;
    let end_hour = require_hour(
        reader,
        writer,
        "End hour (0-23)",
        partial.end_hour,
        DEFAULT_END_HOUR,
        &mut prompted,
    )?;

    let config = Configuration {
        workspace_id,
        project_id,
        auth_token,
        description,
        start_hour,
        end_hour,
        lunch_break: partial.lunch_break.unwrap_or(true),
        base_url: partial.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into()),
    };
    config.validate()?;

    Ok(Collected { config, prompted })
}

fn require_string(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    label: &'static str,
    present: Option<String>,
    prompted: &mut bool,
) -> Result<String> {
    if let Some(value) = present.filter(|value| !value.trim().is_empty()) {
        return Ok(value);
    }
    *prompted = true;
    read_answer(reader, writer, label, None)?
        .ok_or_else(|| ConfigurationError::MissingField(label).into())
}

fn require_hour(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    label: &'static str,
    present: Option<u32>,
    default: u32,
    prompted: &mut bool,
) -> Result<u32> {
    if let Some(value) = present {
        return Ok(value);
    }
    *prompted = true;
    let answer = read_answer(reader, writer, label, Some(&default.to_string()))?;
    match answer {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| anyhow!("{label} must be a number, got {text:?}")),
    }
}

/// Prints a `label [default]: ` prompt and reads one trimmed line.  An empty
/// answer yields `None` so the caller can fall back to its default.
fn read_answer(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    label: &str,
    default: Option<&str>,
) -> Result<Option<String>> {
    match default {
        Some(default) => write!(writer, "{label} [{default}]: ")?,
        None => write!(writer, "{label}: ")?,
    }
    writer.flush()?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .with_context(|| format!("could not read answer for {label}"))?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}
