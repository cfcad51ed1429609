use std::fmt;

/// Unique identifier for any entity known to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// `y` grows downward, matching screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Tile distance: the larger of the two axis deltas.
    pub fn distance(self, other: GridCell) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Four-way facing used for movement and sprite selection.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Orientation {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

impl Orientation {
    /// Facing required to look from `from` toward `to`.
    ///
    /// Axis checks run in the fixed order Left, Right, Up, Down and the first
    /// match wins, so a diagonal delta always resolves to its horizontal part.
    /// Returns `None` when both cells are equal.
    pub fn between(from: GridCell, to: GridCell) -> Option<Self> {
        if to.x < from.x {
            Some(Self::Left)
        } else if to.x > from.x {
            Some(Self::Right)
        } else if to.y < from.y {
            Some(Self::Up)
        } else if to.y > from.y {
            Some(Self::Down)
        } else {
            None
        }
    }

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}
