//! Caller-facing decode and encode configuration.

use std::fmt;

use format::{Limits, SectionSet};

use crate::limits::CodecLimits;

/// Options for [`decode_world_with`](crate::decode_world_with).
///
/// The file-format header and the world header are always decoded; the
/// section set filters everything after them.
#[derive(Default)]
pub struct DecodeOptions<'a> {
    pub sections: SectionSet,
    pub ignore_pointers: bool,
    pub limits: CodecLimits,
    pub format_limits: Limits,
    pub on_progress: Option<&'a mut dyn FnMut(u8)>,
}

impl<'a> DecodeOptions<'a> {
    /// Creates options decoding every section with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the sections to decode.
    #[must_use]
    pub const fn sections(mut self, sections: SectionSet) -> Self {
        self.sections = sections;
        self
    }

    /// Tolerates sections that end away from the next recorded pointer.
    #[must_use]
    pub const fn ignore_pointers(mut self, ignore: bool) -> Self {
        self.ignore_pointers = ignore;
        self
    }

    /// Sets section limits.
    #[must_use]
    pub fn limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets file-format header limits.
    #[must_use]
    pub const fn format_limits(mut self, limits: Limits) -> Self {
        self.format_limits = limits;
        self
    }

    /// Receives whole percentages of the buffer read.
    #[must_use]
    pub fn on_progress(mut self, callback: &'a mut dyn FnMut(u8)) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

impl fmt::Debug for DecodeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("sections", &self.sections)
            .field("ignore_pointers", &self.ignore_pointers)
            .field("limits", &self.limits)
            .field("format_limits", &self.format_limits)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

/// Options for [`encode_world_with`](crate::encode_world_with).
///
/// Sections left out of the set, or absent from the model, are written in
/// their empty form so the output always loads.
#[derive(Default)]
pub struct EncodeOptions<'a> {
    pub sections: SectionSet,
    pub limits: CodecLimits,
    pub on_progress: Option<&'a mut dyn FnMut(u8)>,
}

impl<'a> EncodeOptions<'a> {
    /// Creates options encoding every section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the sections written from the model.
    #[must_use]
    pub const fn sections(mut self, sections: SectionSet) -> Self {
        self.sections = sections;
        self
    }

    /// Sets section limits.
    #[must_use]
    pub fn limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Receives whole percentages of tile columns written.
    #[must_use]
    pub fn on_progress(mut self, callback: &'a mut dyn FnMut(u8)) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

impl fmt::Debug for EncodeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("sections", &self.sections)
            .field("limits", &self.limits)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
