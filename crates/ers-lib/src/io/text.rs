use anyhow::{Context, Result};
use std::path::Path;

/// Parse a newline-delimited sample series, ignoring blank and comment lines.
pub fn parse_series(text: &str) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let value: f64 = trimmed
            .parse()
            .with_context(|| format!("line {} is not a sample value: {}", idx + 1, trimmed))?;
        out.push(value);
    }
    if out.is_empty() {
        anyhow::bail!("no numeric samples found");
    }
    Ok(out)
}

/// Read a newline-delimited sample series from disk.
pub fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_series(&text)
}
