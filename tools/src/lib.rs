//! Inspection and verification tools for world files.
//!
//! This crate provides utilities for looking inside `.wld` saves:
//!
//! - Report the file-format header and where each section lives
//! - Decode chosen sections into JSON or a text summary
//! - Load, save and load again to find sections that do not survive
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what the codec is doing.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{
    decode_world, decode_world_with, encode_world, CodecLimits, DecodeOptions, FormatLimits,
    Magic, Npc, SectionKind, SectionSet, World,
};
use serde::Serialize;

/// Where one section sits in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpan {
    pub name: &'static str,
    pub start: usize,
    pub len: usize,
}

/// The framing of a world file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub version: i32,
    pub platform: &'static str,
    pub revision: u32,
    pub favorite: bool,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub file_len: usize,
    pub sections: Vec<SectionSpan>,
}

/// Reads the headers of a world file and measures its sections.
///
/// Section sizes are the distance between consecutive pointers; the last
/// section runs to the end of the buffer.
pub fn inspect_world(bytes: &[u8], limits: &FormatLimits) -> Result<InspectReport> {
    let options = DecodeOptions::new()
        .sections(SectionSet::empty())
        .format_limits(limits.clone());
    let world = decode_world_with(bytes, options).context("decode world headers")?;
    let ffh = &world.file_format_header;
    let (width, height) = world.header.dimensions().unwrap_or_default();

    let layout = SectionKind::layout(ffh.version);
    let starts: Vec<usize> = std::iter::once(0)
        .chain(ffh.pointers.iter().map(|&pointer| pointer as usize))
        .take(layout.len())
        .collect();
    let sections = layout
        .iter()
        .zip(&starts)
        .enumerate()
        .map(|(index, (kind, &start))| {
            let end = starts.get(index + 1).copied().unwrap_or(bytes.len());
            SectionSpan {
                name: kind.name(),
                start,
                len: end.saturating_sub(start),
            }
        })
        .collect();

    Ok(InspectReport {
        version: ffh.version,
        platform: match ffh.magic {
            Magic::Desktop => "desktop",
            Magic::Mobile => "mobile",
        },
        revision: ffh.revision,
        favorite: ffh.favorite,
        name: world.header.map_name().unwrap_or_default().to_owned(),
        width,
        height,
        file_len: bytes.len(),
        sections,
    })
}

/// Formats an [`InspectReport`] for the terminal.
pub fn format_inspect_report(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "version: {} platform: {} revision: {} favorite: {}",
        report.version, report.platform, report.revision, report.favorite
    );
    let _ = writeln!(
        out,
        "world: {:?} ({}x{} tiles, {} bytes)",
        report.name, report.width, report.height, report.file_len
    );
    let _ = writeln!(out, "sections:");
    for section in &report.sections {
        let _ = writeln!(
            out,
            "  {:<24} @ {:>10} ({} bytes)",
            section.name, section.start, section.len
        );
    }
    out
}

/// Parses a comma-separated list of section names.
///
/// An empty list selects every section.
pub fn parse_sections(list: Option<&str>) -> Result<SectionSet> {
    let Some(list) = list.filter(|list| !list.trim().is_empty()) else {
        return Ok(SectionSet::all());
    };
    SectionSet::from_names(list.split(',')).context("parse section list")
}

/// Decodes the chosen sections of a world file.
pub fn decode_sections(bytes: &[u8], sections: SectionSet, ignore_pointers: bool) -> Result<World> {
    let options = DecodeOptions::new()
        .sections(sections)
        .ignore_pointers(ignore_pointers)
        .limits(CodecLimits::default());
    decode_world_with(bytes, options).context("decode world")
}

/// Summarises a decoded world in a few lines.
pub fn format_world_summary(world: &World) -> String {
    let mut out = String::new();
    let ffh = &world.file_format_header;
    let _ = writeln!(
        out,
        "{:?} (version {}, {} header fields)",
        world.header.map_name().unwrap_or_default(),
        ffh.version,
        world.header.len()
    );
    if let Some(tiles) = &world.tiles {
        let _ = writeln!(
            out,
            "tiles: {}x{}, {} not air",
            tiles.width(),
            tiles.height(),
            tiles.count_non_air()
        );
    }
    if let Some(chests) = &world.chests {
        let items: usize = chests.iter().map(|chest| chest.items.len()).sum();
        let _ = writeln!(out, "chests: {} holding {items} stacks", chests.len());
    }
    if let Some(signs) = &world.signs {
        let _ = writeln!(out, "signs: {}", signs.len());
    }
    if let Some(npcs) = &world.npcs {
        let town = npcs.iter().filter(|npc| matches!(npc, Npc::Town(_))).count();
        let _ = writeln!(out, "npcs: {town} town, {} pillars", npcs.len() - town);
    }
    if let Some(entities) = &world.tile_entities {
        let _ = writeln!(out, "tile entities: {}", entities.len());
    }
    if let Some(plates) = &world.pressure_plates {
        let _ = writeln!(out, "pressure plates: {}", plates.len());
    }
    if let Some(rooms) = &world.rooms {
        let _ = writeln!(out, "rooms: {}", rooms.len());
    }
    if let Some(bestiary) = &world.bestiary {
        let _ = writeln!(
            out,
            "bestiary: {} kills, {} sightings, {} chats",
            bestiary.kills.len(),
            bestiary.sightings.len(),
            bestiary.chats.len()
        );
    }
    if let Some(powers) = &world.creative_powers {
        let _ = writeln!(
            out,
            "creative powers: time rate {}, difficulty {}",
            powers.time_rate, powers.difficulty
        );
    }
    out
}

/// Result of a load-save-load check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundtripReport {
    pub original_len: usize,
    pub encoded_len: usize,
    pub differing: Vec<&'static str>,
}

impl RoundtripReport {
    /// Returns `true` if every section survived.
    pub fn is_clean(&self) -> bool {
        self.differing.is_empty()
    }
}

/// Decodes, re-encodes and decodes again, comparing the two models.
///
/// Returns the report and the re-encoded bytes.
pub fn roundtrip_world(bytes: &[u8]) -> Result<(RoundtripReport, Vec<u8>)> {
    let first = decode_world(bytes).context("decode original")?;
    let encoded = encode_world(&first).context("re-encode")?;
    let second = decode_world(&encoded).context("decode re-encoded")?;
    let differing = first
        .differing_sections(&second)
        .into_iter()
        .map(SectionKind::name)
        .collect();
    let report = RoundtripReport {
        original_len: bytes.len(),
        encoded_len: encoded.len(),
        differing,
    };
    Ok((report, encoded))
}
