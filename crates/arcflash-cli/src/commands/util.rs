use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use tabwriter::TabWriter;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output to JSON")?;
    println!("{json}");
    Ok(())
}

/// Writes tab-separated rows as an aligned table on stdout.
pub fn print_table(header: &str, rows: &[String]) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout()).padding(2);
    writeln!(writer, "{header}")?;
    for row in rows {
        writeln!(writer, "{row}")?;
    }
    writer.flush().context("writing table")?;
    Ok(())
}
