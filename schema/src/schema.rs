//! A validated, version-aware view over a field table.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDef, FieldKind};
use crate::world_header::WORLD_HEADER;

/// An ordered field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    fields: &'static [FieldDef],
}

impl Schema {
    /// Wraps a table after checking it over `versions`.
    pub fn new(fields: &'static [FieldDef], versions: RangeInclusive<i32>) -> SchemaResult<Self> {
        let schema = Self { fields };
        schema.validate(versions)?;
        Ok(schema)
    }

    /// The world header table.
    #[must_use]
    pub const fn world_header() -> Self {
        Self {
            fields: WORLD_HEADER,
        }
    }

    /// Returns every field regardless of version.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Iterates over the fields stored at `version`, in stored order.
    pub fn fields_at(&self, version: i32) -> impl Iterator<Item = &'static FieldDef> {
        self.fields
            .iter()
            .filter(move |field| field.is_present(version))
    }

    /// Returns the field named `name` stored at `version`.
    #[must_use]
    pub fn field(&self, name: &str, version: i32) -> Option<&'static FieldDef> {
        self.fields_at(version).find(|field| field.name == name)
    }

    /// Checks the table at every version in `versions`.
    ///
    /// A name may appear more than once in the table, but at most one of
    /// its definitions may be stored at any version.
    pub fn validate(&self, versions: RangeInclusive<i32>) -> SchemaResult<()> {
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyName { index });
            }
            if field.kind.fixed_len() == Some(0) {
                return Err(SchemaError::EmptyFixedField { name: field.name });
            }
        }

        let mut seen = HashSet::new();
        for version in versions {
            seen.clear();
            for field in self.fields_at(version) {
                if !seen.insert(field.name) {
                    return Err(SchemaError::DuplicateField {
                        name: field.name,
                        version,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the number of fixed-size bytes stored at `version`, or `None`
    /// if any stored field has a variable length.
    #[must_use]
    pub fn fixed_size(&self, version: i32) -> Option<usize> {
        self.fields_at(version)
            .map(|field| match field.kind {
                FieldKind::Bool | FieldKind::U8 | FieldKind::MoonType => Some(1),
                FieldKind::I16 => Some(2),
                FieldKind::I32 | FieldKind::F32 => Some(4),
                FieldKind::F64 => Some(8),
                FieldKind::Bytes(len) => Some(len),
                FieldKind::I32Array(len) => Some(len * 4),
                FieldKind::Str | FieldKind::I32List | FieldKind::I32ShortList | FieldKind::StrList => {
                    None
                }
            })
            .sum()
    }
}
