use std::fmt;

/// A grid coordinate. Signed so input adapters can hand over raw,
/// possibly negative, coordinates and let the board reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The 8 Moore neighbours, unclipped. Callers filter by board bounds.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    None
                } else {
                    Some(Position::new(self.row + dr, self.col + dc))
                }
            })
        })
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
