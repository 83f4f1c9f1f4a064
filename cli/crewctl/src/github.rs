//! GitHub Actions step outputs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

const DELIMITER: &str = "CREW_EOF";

/// Append `key=value` to the step output file.
pub fn write_step_output(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file {:?}", path))?;

    file.write_all(format_step_output(key, value).as_bytes())
        .with_context(|| format!("Failed to write step output to {:?}", path))
}

/// Single-line values use `key=value`; anything else uses the heredoc form
/// with a delimiter that does not occur in the value.
fn format_step_output(key: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{key}={value}\n");
    }

    let mut delimiter = DELIMITER.to_string();
    while value.lines().any(|line| line == delimiter) {
        delimiter.push('_');
    }
    format!("{key}<<{delimiter}\n{value}\n{delimiter}\n")
}
