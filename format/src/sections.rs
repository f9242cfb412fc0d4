//! Section kinds, their on-disk order and caller-selected subsets.

use std::fmt;

use crate::error::{FormatError, FormatResult};
use crate::versions;

/// A section of a world file, in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SectionKind {
    FileFormatHeader = 0,
    Header = 1,
    Tiles = 2,
    Chests = 3,
    Signs = 4,
    Npcs = 5,
    TileEntities = 6,
    PressurePlates = 7,
    Rooms = 8,
    Bestiary = 9,
    CreativePowers = 10,
    Footer = 11,
}

static FULL_LAYOUT: [SectionKind; 12] = SectionKind::ALL;

static LEGACY_LAYOUT: [SectionKind; 10] = [
    SectionKind::FileFormatHeader,
    SectionKind::Header,
    SectionKind::Tiles,
    SectionKind::Chests,
    SectionKind::Signs,
    SectionKind::Npcs,
    SectionKind::TileEntities,
    SectionKind::PressurePlates,
    SectionKind::Rooms,
    SectionKind::Footer,
];

impl SectionKind {
    /// Every section, in on-disk order.
    pub const ALL: [Self; 12] = [
        Self::FileFormatHeader,
        Self::Header,
        Self::Tiles,
        Self::Chests,
        Self::Signs,
        Self::Npcs,
        Self::TileEntities,
        Self::PressurePlates,
        Self::Rooms,
        Self::Bestiary,
        Self::CreativePowers,
        Self::Footer,
    ];

    /// Returns the section's name as used by the world format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FileFormatHeader => "fileFormatHeader",
            Self::Header => "header",
            Self::Tiles => "tiles",
            Self::Chests => "chests",
            Self::Signs => "signs",
            Self::Npcs => "NPCs",
            Self::TileEntities => "tileEntities",
            Self::PressurePlates => "weightedPressurePlates",
            Self::Rooms => "rooms",
            Self::Bestiary => "bestiary",
            Self::CreativePowers => "creativePowers",
            Self::Footer => "footer",
        }
    }

    /// Looks a section up by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns the sections present at `version`, in on-disk order.
    ///
    /// Bestiary and creative powers are absent before the bestiary version,
    /// which moves the footer up to index 9.
    #[must_use]
    pub fn layout(version: i32) -> &'static [Self] {
        if version >= versions::BESTIARY {
            &FULL_LAYOUT
        } else {
            &LEGACY_LAYOUT
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of entries in the pointer table written for `version`.
///
/// Before the bestiary version the table keeps ten slots even though only
/// nine sections follow the file-format header; the last one stays zero.
#[must_use]
pub const fn pointer_count(version: i32) -> usize {
    if version >= versions::BESTIARY {
        11
    } else {
        10
    }
}

/// A set of sections selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionSet(u16);

impl SectionSet {
    /// Creates a set holding every section.
    #[must_use]
    pub const fn all() -> Self {
        Self((1 << SectionKind::ALL.len()) - 1)
    }

    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy with `kind` added.
    #[must_use]
    pub const fn with(self, kind: SectionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns a copy with `kind` removed.
    #[must_use]
    pub const fn without(self, kind: SectionKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    /// Returns `true` if `kind` is selected.
    #[must_use]
    pub const fn contains(self, kind: SectionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Builds a set from section names, ignoring ASCII case.
    pub fn from_names<I, S>(names: I) -> FormatResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Self::empty(), |set, name| {
            let name = name.as_ref();
            SectionKind::from_name(name)
                .map(|kind| set.with(kind))
                .ok_or_else(|| FormatError::UnknownSection {
                    name: name.to_owned(),
                })
        })
    }

    /// Iterates over the selected sections in on-disk order.
    pub fn iter(self) -> impl Iterator<Item = SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for SectionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<SectionKind> for SectionSet {
    fn from_iter<T: IntoIterator<Item = SectionKind>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
