//! Parse command.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use testcluster::parse_start_report;

use super::member_table;

/// Parses a start report from `file`, or stdin, and prints the members.
pub fn run(file: Option<&str>) -> Result<()> {
    let report = match file {
        Some(file) => {
            fs::read_to_string(file).with_context(|| format!("Failed to read {file}"))?
        }
        None => {
            let mut report = String::new();
            io::stdin()
                .read_to_string(&mut report)
                .context("Failed to read start report from stdin")?;
            report
        }
    };

    let members = parse_start_report(&report).context("Invalid start report")?;

    println!("{}", member_table(&members));
    println!("{} member(s)", members.len());

    Ok(())
}
