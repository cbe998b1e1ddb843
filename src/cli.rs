use crate::config::load_config;
use crate::dump::{LayoutDump, write_layout_dump};
use crate::layout::layout;
use crate::model::Person;
use crate::normalize::normalize_and_link;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kintree", version, about = "Family-tree consistency engine and layered layout")]
pub struct Args {
    /// Input node file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config overrides (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Emit the canonical node collection instead of layout geometry
    #[arg(long = "normalized")]
    pub normalized: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let raw = parse_nodes(&input)?;
    let nodes = normalize_and_link(raw);

    if args.normalized {
        let json = serde_json::to_string_pretty(&nodes)?;
        return write_output(&json, args.output.as_deref());
    }

    let result = layout(&nodes, &config);
    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &result),
        None => {
            let json = serde_json::to_string_pretty(&LayoutDump::from_layout(&result))?;
            write_output(&json, None)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Node files are user-edited; fall back to JSON5 so comments and trailing
/// commas do not kill an import.
fn parse_nodes(input: &str) -> Result<Vec<Person>> {
    match serde_json::from_str(input) {
        Ok(nodes) => Ok(nodes),
        Err(json_err) => json5::from_str(input)
            .map_err(|_| anyhow::anyhow!("input is neither valid JSON nor JSON5: {json_err}")),
    }
}

fn write_output(contents: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
