use crate::{GameError, Result};

/// Board parameters for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Number of mines, must stay below `rows * cols`
    pub mines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 15,
            mines: 38,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Self {
        Self { rows, cols, mines }
    }

    pub fn beginner() -> Self {
        Self::new(9, 9, 10)
    }

    pub fn intermediate() -> Self {
        Self::new(16, 16, 40)
    }

    pub fn expert() -> Self {
        Self::new(16, 30, 99)
    }

    /// Looks up a preset by name, case-insensitively.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::beginner()),
            "intermediate" => Some(Self::intermediate()),
            "expert" => Some(Self::expert()),
            "classic" | "default" => Some(Self::default()),
            _ => None,
        }
    }

    /// Total cell count, checked for overflow and empty boards.
    pub fn total_cells(&self) -> Result<usize> {
        if self.rows == 0 || self.cols == 0 {
            return Err(self.invalid_dimensions());
        }
        let total = self
            .rows
            .checked_mul(self.cols)
            .ok_or_else(|| self.invalid_dimensions())?;
        // Positions are i32 on the public surface.
        if self.rows > i32::MAX as usize || self.cols > i32::MAX as usize {
            return Err(self.invalid_dimensions());
        }
        Ok(total)
    }

    pub fn validate(&self) -> Result<()> {
        let total = self.total_cells()?;
        if self.mines >= total {
            return Err(GameError::TooManyMines {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    fn invalid_dimensions(&self) -> GameError {
        GameError::InvalidDimensions {
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::new(15, 15, 38));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GameConfig::preset("Beginner"), Some(GameConfig::new(9, 9, 10)));
        assert_eq!(GameConfig::preset("expert"), Some(GameConfig::new(16, 30, 99)));
        assert_eq!(GameConfig::preset("classic"), Some(GameConfig::default()));
        assert_eq!(GameConfig::preset("nightmare"), None);
    }

    #[test]
    fn test_validate_rejects_full_board() {
        assert_eq!(
            GameConfig::new(5, 5, 25).validate(),
            Err(GameError::TooManyMines {
                rows: 5,
                cols: 5,
                mines: 25
            })
        );
        assert!(GameConfig::new(5, 5, 24).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_overflowing_dimensions() {
        assert_eq!(
            GameConfig::new(0, 4, 0).validate(),
            Err(GameError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(matches!(
            GameConfig::new(usize::MAX, 2, 1).validate(),
            Err(GameError::InvalidDimensions { .. })
        ));
    }
}
