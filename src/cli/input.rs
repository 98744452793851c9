//! Interactive prompts for values not given on the command line

use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead, Write};

/// Print `label` and read one line from stdin, without the trailing newline
pub fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label.bright_white());
    io::stdout().flush().context("Failed to flush stdout")?;

    let stdin = io::stdin();
    read_answer(&mut stdin.lock())
}

/// Read one answer line from `reader`; end of input is an error
pub fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    if read == 0 {
        anyhow::bail!("No input available");
    }
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Use `given` when present, otherwise prompt for it
pub fn value_or_prompt(given: Option<String>, label: &str) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt_line(label),
    }
}
