use strum::VariantArray;

use crate::location::Location;

/// The four cardinal steps available on a rectangular board.
///
/// Variant order is load-bearing: [`Board::neighbors`](crate::Board::neighbors) enumerates
/// successors in declaration order, which fixes the order in which the solver expands branches
/// and therefore which solution it finds first.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    Right,
    Down,
    Left,
    Up,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the
    /// resultant [`Location`].
    ///
    /// Steps off the top or left edge wrap to an enormous coordinate and fail any subsequent
    /// bounds check.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Right => location.offset_by((0, 1)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Up => location.offset_by((-1, 0)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
        }
    }

    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Self::attempt_from)
    /// until one works. Returns [`None`] if the two locations are not adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
