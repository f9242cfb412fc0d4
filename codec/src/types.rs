//! Small value types shared by the section models.

/// A pair of coordinates.
///
/// Tile positions are integral; NPC positions are world pixels stored as
/// `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position<T> {
    pub x: T,
    pub y: T,
}

impl<T> Position<T> {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Position<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_from_tuple() {
        let pos: Position<i32> = (4, -2).into();
        assert_eq!(pos, Position::new(4, -2));
    }

    #[test]
    fn position_default_is_origin() {
        assert_eq!(Position::<i16>::default(), Position::new(0, 0));
    }
}
