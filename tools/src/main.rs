use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use log::{info, warn};
use wld_tools::{
    decode_sections, format_inspect_report, format_world_summary, inspect_world, parse_sections,
    roundtrip_world,
};

#[derive(Parser)]
#[command(
    name = "wld-tools",
    version,
    about = "World file inspection and verification tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the file-format header and section layout.
    Inspect {
        /// A world file, or a directory of them.
        world_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Decode sections into structured output.
    Decode {
        /// Path to the world file.
        world_file: PathBuf,
        /// Comma-separated section names; all sections when omitted.
        #[arg(long)]
        sections: Option<String>,
        /// Continue past sections that end away from the next pointer.
        #[arg(long)]
        ignore_pointers: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Load, save and load again, reporting sections that change.
    Roundtrip {
        /// A world file, or a directory of them.
        world_path: PathBuf,
        /// Optional glob filter when checking a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Write the re-encoded bytes here (single files only).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            world_path,
            glob,
            format,
        } => {
            for path in world_files(&world_path, glob.as_deref())? {
                let bytes = read_world(&path)?;
                let report = inspect_world(&bytes, &codec::FormatLimits::default())
                    .with_context(|| format!("inspect {}", path.display()))?;
                match format {
                    OutputFormat::Json => {
                        let json =
                            serde_json::to_string_pretty(&report).context("serialize json")?;
                        println!("{json}");
                    }
                    OutputFormat::Pretty => {
                        println!("== {} ==", path.display());
                        print!("{}", format_inspect_report(&report));
                    }
                }
            }
        }
        Command::Decode {
            world_file,
            sections,
            ignore_pointers,
            format,
        } => {
            let bytes = read_world(&world_file)?;
            let sections = parse_sections(sections.as_deref())?;
            let world = decode_sections(&bytes, sections, ignore_pointers)?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&world).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => print!("{}", format_world_summary(&world)),
            }
        }
        Command::Roundtrip {
            world_path,
            glob,
            out,
        } => {
            if out.is_some() && world_path.is_dir() {
                bail!("--out needs a single world file");
            }
            let mut failures = 0usize;
            for path in world_files(&world_path, glob.as_deref())? {
                let bytes = read_world(&path)?;
                let (report, encoded) = match roundtrip_world(&bytes) {
                    Ok(result) => result,
                    Err(err) => {
                        warn!("{}: {err:#}", path.display());
                        failures += 1;
                        continue;
                    }
                };
                if report.is_clean() {
                    println!(
                        "{}: ok ({} -> {} bytes)",
                        path.display(),
                        report.original_len,
                        report.encoded_len
                    );
                } else {
                    failures += 1;
                    println!(
                        "{}: sections differ: {}",
                        path.display(),
                        report.differing.join(", ")
                    );
                }
                if let Some(out) = &out {
                    fs::write(out, &encoded)
                        .with_context(|| format!("write {}", out.display()))?;
                    info!("wrote {} bytes to {}", encoded.len(), out.display());
                }
            }
            if failures > 0 {
                bail!("{failures} world(s) failed the roundtrip check");
            }
        }
    }
    Ok(())
}

fn read_world(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read world {}", path.display()))
}

/// Expands `path` to the world files it names, sorted by path.
fn world_files(path: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("read dir {}", path.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let keep = match &pattern {
            Some(pattern) => {
                pattern.matches_path(&path)
                    || path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| pattern.matches(name))
            }
            None => path.extension().is_some_and(|ext| ext == "wld"),
        };
        if keep {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
