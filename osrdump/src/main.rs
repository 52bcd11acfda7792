//! # CLI
//!
//! The command line version of the library. Given a file path argument, it will ingest all the
//! data into memory, and attempt parsing. If the parsing is successful, JSON (or a short summary)
//! is written to stdout, else the chain of errors is printed to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use osrkit::{frames, ParserBuilder, Replay};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "osrdump", about = "Parses an osu! replay file and outputs JSON")]
struct Opt {
    /// decode the cursor and key frames and include them in the output
    #[arg(short = 'f', long = "frames")]
    frames: bool,

    /// pretty print the JSON output
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,

    /// print a human readable summary instead of JSON
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// decode the frames, compress them again, and write the resulting replay to this path
    #[arg(long = "recompress", value_name = "OUT")]
    recompress: Option<PathBuf>,

    /// osu! replay file
    input: PathBuf,
}

fn parse_file(input: &Path, frames: bool) -> Result<Replay> {
    let data = fs::read(input).with_context(|| format!("Unable to read {}", input.display()))?;
    info!(path = %input.display(), bytes = data.len(), "read replay");

    let builder = ParserBuilder::new(&data);
    let builder = if frames {
        builder.must_parse_frames()
    } else {
        builder.never_parse_frames()
    };

    builder
        .parse()
        .with_context(|| format!("Unable to parse {}", input.display()))
}

fn recompress(replay: &Replay, out: &Path) -> Result<()> {
    let decoded = match replay.frames.as_ref() {
        Some(x) => x.clone(),
        None => frames::decode_frames(&replay.replay_data)?,
    };

    let mut rewritten = replay.clone();
    rewritten.replay_data = frames::encode_frames(&decoded)?;
    let data = rewritten.to_bytes()?;
    fs::write(out, &data).with_context(|| format!("Unable to write {}", out.display()))?;

    info!(
        path = %out.display(),
        frames = decoded.len(),
        before = replay.replay_data.len(),
        after = rewritten.replay_data.len(),
        "recompressed replay data"
    );
    Ok(())
}

fn run() -> Result<()> {
    let opt = Opt::parse();
    let replay = parse_file(&opt.input, opt.frames)?;

    if let Some(out) = opt.recompress.as_ref() {
        recompress(&replay, out)?;
    }

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    if opt.summary {
        write!(lock, "{}", replay)?;
    } else if opt.pretty {
        serde_json::to_writer_pretty(&mut lock, &replay)?;
        writeln!(lock)?;
    } else {
        serde_json::to_writer(&mut lock, &replay)?;
        writeln!(lock)?;
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
