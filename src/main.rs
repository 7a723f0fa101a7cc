use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime};
use clap::Parser;
use ftp_listing::logging::init_logging;
use ftp_listing::{DirEntry, FixedClock, ParseError, ParserRegistry, UnixParser};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

/// Parse Unix-style FTP LIST output into structured entries
#[derive(Parser, Debug)]
#[command(name = "ftp-listing", version, about)]
struct Cli {
    /// File containing LIST output; stdin when omitted
    input: Option<PathBuf>,

    /// Emit one JSON object per entry
    #[arg(long)]
    json: bool,

    /// Resolve year-less dates against this time instead of the clock
    /// (RFC 3339 or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Exit successfully even if some lines are not Unix listings
    #[arg(long)]
    skip_unmatched: bool,
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("expected RFC 3339 or YYYY-MM-DDTHH:MM:SS: {}", e))
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render(entry: &DirEntry) -> String {
    let mut line = format!(
        "{:<9} {} {:<8} {:<8} {:>10} {} {}",
        format!("{:?}", entry.kind).to_lowercase(),
        entry.permissions,
        entry.owner,
        entry.group,
        entry.size,
        entry.modified_at.format("%Y-%m-%d %H:%M"),
        entry.basename
    );
    if let Some(target) = entry.symlink_target.as_deref().filter(|t| !t.is_empty()) {
        line.push_str(" -> ");
        line.push_str(target);
    }
    line
}

fn main() -> Result<()> {
    init_logging("warn");
    let cli = Cli::parse();

    let mut registry = ParserRegistry::empty();
    match cli.now {
        Some(now) => registry.register(UnixParser::with_clock(FixedClock(now))),
        None => registry.register(UnixParser::new()),
    }

    let text = read_input(cli.input.as_ref())?;
    let mut parsed = 0usize;
    let mut unmatched = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }

        match registry.parse(raw) {
            Ok(entry) => {
                parsed += 1;
                if cli.json {
                    println!("{}", serde_json::to_string(&entry)?);
                } else {
                    println!("{}", render(&entry));
                }
            }
            Err(ParseError::NoMatch) => {
                unmatched += 1;
                warn!(line = idx + 1, raw, "unrecognized listing line");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("line {}: {}", idx + 1, raw));
            }
        }
    }

    info!(parsed, unmatched, "done");

    if unmatched > 0 && !cli.skip_unmatched {
        bail!("{} line(s) did not match the Unix listing format", unmatched);
    }

    Ok(())
}
