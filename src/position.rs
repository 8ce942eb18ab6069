/// A discrete grid coordinate. Copied, never aliased.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True when `other` shares neither a row nor a column with `self`.
    pub fn is_diagonal_to(&self, other: &Position) -> bool {
        self.x != other.x && self.y != other.y
    }

    pub fn chebyshev_distance_to(&self, other: &Position) -> usize {
        let dx = if self.x > other.x {
            self.x - other.x
        } else {
            other.x - self.x
        };
        let dy = if self.y > other.y {
            self.y - other.y
        } else {
            other.y - self.y
        };

        dx.max(dy)
    }
}
