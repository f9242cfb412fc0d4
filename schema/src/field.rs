//! Field kinds and version-gated field definitions.

use crate::gate::VersionGate;

/// The on-disk representation of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    /// One byte, non-zero is `true`.
    Bool,
    /// Unsigned byte.
    U8,
    /// Little-endian `i16`.
    I16,
    /// Little-endian `i32`.
    I32,
    /// Little-endian `f32`.
    F32,
    /// Little-endian `f64`.
    F64,
    /// Length-prefixed UTF-8 string.
    Str,
    /// Opaque bytes of a fixed length.
    Bytes(usize),
    /// A fixed number of `i32` values with no count.
    I32Array(usize),
    /// An `i32` count followed by that many `i32` values.
    I32List,
    /// An `i16` count followed by that many `i32` values.
    I32ShortList,
    /// An `i32` count followed by that many strings.
    StrList,
    /// A moon style byte whose accepted range widens with the version.
    MoonType,
}

impl FieldKind {
    /// Returns a short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 | Self::MoonType => "u8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "string",
            Self::Bytes(_) => "bytes",
            Self::I32Array(_) | Self::I32List | Self::I32ShortList => "i32 list",
            Self::StrList => "string list",
        }
    }

    /// Returns the fixed element count of sized kinds.
    #[must_use]
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            Self::Bytes(len) | Self::I32Array(len) => Some(len),
            _ => None,
        }
    }
}

/// A header field: its name, representation and the versions storing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub gate: VersionGate,
}

impl FieldDef {
    /// Creates a field stored at every version.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            gate: VersionGate::Always,
        }
    }

    /// Creates a boolean field stored at every version.
    #[must_use]
    pub const fn flag(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Restricts the field to `version >= n`.
    #[must_use]
    pub const fn since(self, n: i32) -> Self {
        self.gate(VersionGate::Since(n))
    }

    /// Restricts the field to `version > n`.
    #[must_use]
    pub const fn after(self, n: i32) -> Self {
        self.gate(VersionGate::After(n))
    }

    /// Restricts the field to `version == n`.
    #[must_use]
    pub const fn exactly(self, n: i32) -> Self {
        self.gate(VersionGate::Exactly(n))
    }

    /// Restricts the field to `since <= version < before`.
    #[must_use]
    pub const fn between(self, since: i32, before: i32) -> Self {
        self.gate(VersionGate::Between { since, before })
    }

    /// Sets the gate for a field definition.
    #[must_use]
    pub const fn gate(mut self, gate: VersionGate) -> Self {
        self.gate = gate;
        self
    }

    /// Returns `true` if the field is stored at `version`.
    #[must_use]
    pub const fn is_present(&self, version: i32) -> bool {
        self.gate.admits(version)
    }
}
