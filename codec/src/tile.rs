//! The tile model.

/// Sprite frame coordinates of a multi-tile block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    pub x: i16,
    pub y: i16,
}

/// A foreground block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    pub id: u16,
    /// Only stored for ids marked important in the file-format header.
    pub frame: Option<Frame>,
    pub paint: Option<u8>,
}

impl Block {
    /// Creates an unpainted block without a frame.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            frame: None,
            paint: None,
        }
    }
}

/// A background wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Wall {
    pub id: u16,
    pub paint: Option<u8>,
}

impl Wall {
    /// Creates an unpainted wall.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self { id, paint: None }
    }
}

/// Liquid kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LiquidKind {
    Water,
    Lava,
    Honey,
    Shimmer,
}

impl LiquidKind {
    /// The two-bit code stored in the first flag byte.
    ///
    /// Shimmer shares the water code and is told apart by a bit in the
    /// third flag byte.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Water | Self::Shimmer => 1,
            Self::Lava => 2,
            Self::Honey => 3,
        }
    }

    /// Decodes a two-bit liquid code. Code 0 means no liquid.
    #[must_use]
    pub const fn from_code(code: u8, shimmer: bool) -> Option<Self> {
        match code {
            0 => None,
            _ if shimmer => Some(Self::Shimmer),
            1 => Some(Self::Water),
            2 => Some(Self::Lava),
            _ => Some(Self::Honey),
        }
    }
}

/// Liquid in a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Liquid {
    pub kind: LiquidKind,
    pub amount: u8,
}

/// Block slope shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Slope {
    Half,
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Slope {
    /// The three-bit code stored in the second flag byte.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Half => 1,
            Self::TopRight => 2,
            Self::TopLeft => 3,
            Self::BottomRight => 4,
            Self::BottomLeft => 5,
        }
    }

    /// Decodes a slope code. Codes 0, 6 and 7 mean no slope.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Half),
            2 => Some(Self::TopRight),
            3 => Some(Self::TopLeft),
            4 => Some(Self::BottomRight),
            5 => Some(Self::BottomLeft),
            _ => None,
        }
    }
}

/// Wire colors running through a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Wiring {
    pub red: bool,
    pub blue: bool,
    pub green: bool,
    pub yellow: bool,
}

impl Wiring {
    /// Returns `true` if no wire is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.red || self.blue || self.green || self.yellow)
    }
}

/// Invisibility and full-brightness coatings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coatings {
    pub invisible_block: bool,
    pub invisible_wall: bool,
    pub fullbright_block: bool,
    pub fullbright_wall: bool,
}

impl Coatings {
    /// Returns `true` if no coating is applied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.invisible_block || self.invisible_wall || self.fullbright_block || self.fullbright_wall)
    }
}

/// One cell of the world grid. The default tile is air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tile {
    pub block: Option<Block>,
    pub wall: Option<Wall>,
    pub liquid: Option<Liquid>,
    pub slope: Option<Slope>,
    pub wiring: Wiring,
    pub actuator: bool,
    pub actuated: bool,
    pub coatings: Coatings,
}

impl Tile {
    /// Creates a tile holding only `block`.
    #[must_use]
    pub const fn with_block(id: u16) -> Self {
        Self {
            block: Some(Block::new(id)),
            wall: None,
            liquid: None,
            slope: None,
            wiring: Wiring {
                red: false,
                blue: false,
                green: false,
                yellow: false,
            },
            actuator: false,
            actuated: false,
            coatings: Coatings {
                invisible_block: false,
                invisible_wall: false,
                fullbright_block: false,
                fullbright_wall: false,
            },
        }
    }

    /// Returns `true` if nothing is stored in the tile.
    #[must_use]
    pub fn is_air(&self) -> bool {
        *self == Self::default()
    }
}
