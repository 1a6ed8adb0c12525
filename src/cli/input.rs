//! Line-oriented input helpers for the console front end.

use crate::error::{StoreError, StoreResult};
use std::io::{self, BufRead, Write};

/// Read lines until one whose trimmed content equals `sentinel`, or EOF.
/// The sentinel line itself is not included.
pub fn read_code_block<R: BufRead>(reader: &mut R, sentinel: &str) -> io::Result<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim() == sentinel {
            break;
        }
        lines.push(content.to_string());
    }

    Ok(lines.join("\n"))
}

/// Print `label` and read one line. Returns `None` at end of input.
pub fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Blank means "no filter"
pub fn parse_year(input: &str) -> StoreResult<Option<i32>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<i32>()
        .map(Some)
        .map_err(|_| StoreError::InvalidInput(format!("'{input}' is not a valid year")))
}

/// Blank means "no filter"; otherwise 1..=12
pub fn parse_month(input: &str) -> StoreResult<Option<u32>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(Some(month)),
        _ => Err(StoreError::InvalidInput(format!(
            "'{input}' is not a month between 1 and 12"
        ))),
    }
}

/// Blank input becomes `None`
pub fn optional(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
