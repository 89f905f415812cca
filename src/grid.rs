//! Bounded table top the robot moves on

use crate::{Result, SimError};

/// Fixed width x height surface. Valid positions satisfy
/// `0 <= x < width` and `0 <= y < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Create a grid, rejecting zero-sized dimensions
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::Config(format!(
                "Grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the robot would not fall when standing on `(x, y)`
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        let in_range = |value: i32, limit: u32| u32::try_from(value).is_ok_and(|v| v < limit);
        in_range(x, self.width) && in_range(y, self.height)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self { width: 5, height: 5 }
    }
}
