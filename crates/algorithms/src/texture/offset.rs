//! Co-occurrence offsets
//!
//! An offset `(dx, dy)` pairs the pixel at `(row, col)` with the pixel at
//! `(row + dy, col + dx)`. Only the four canonical GLCM directions are legal.

use haralick_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Spatial displacement between a pixel and its co-occurrence neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Column displacement
    pub dx: i32,
    /// Row displacement
    pub dy: i32,
}

impl Offset {
    /// 0°: right neighbor
    pub const DEG_0: Offset = Offset { dx: 1, dy: 0 };
    /// 45°
    pub const DEG_45: Offset = Offset { dx: 1, dy: 1 };
    /// 90°: neighbor below
    pub const DEG_90: Offset = Offset { dx: 0, dy: 1 };
    /// 135°
    pub const DEG_135: Offset = Offset { dx: -1, dy: 1 };

    /// Every legal offset, in the order (1,0), (0,1), (1,1), (-1,1)
    pub const ALL: [Offset; 4] = [Self::DEG_0, Self::DEG_90, Self::DEG_45, Self::DEG_135];

    /// Build a legal offset
    pub fn new(dx: i32, dy: i32) -> Result<Self> {
        let offset = Offset { dx, dy };
        offset.validate()?;
        Ok(offset)
    }

    pub fn is_legal(&self) -> bool {
        Self::ALL.contains(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_legal() {
            Ok(())
        } else {
            Err(Error::InvalidOffset {
                dx: self.dx,
                dy: self.dy,
            })
        }
    }

    /// Validate a whole offset set before any work is done on it
    pub fn validate_all(offsets: &[Offset]) -> Result<()> {
        if offsets.is_empty() {
            return Err(Error::EmptyOffsetSet);
        }
        offsets.iter().try_for_each(Offset::validate)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.dx, self.dy)
    }
}

impl FromStr for Offset {
    type Err = Error;

    /// Parses `"dx,dy"`, optionally wrapped in parentheses
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parse_err = || Error::InvalidParameter {
            name: "offset",
            value: s.to_string(),
            reason: "expected 'dx,dy'".into(),
        };

        let (dx, dy) = trimmed.split_once(',').ok_or_else(parse_err)?;
        let dx: i32 = dx.trim().parse().map_err(|_| parse_err())?;
        let dy: i32 = dy.trim().parse().map_err(|_| parse_err())?;
        Offset::new(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_offsets() {
        for (dx, dy) in [(1, 0), (0, 1), (1, 1), (-1, 1)] {
            assert!(Offset::new(dx, dy).is_ok());
        }
    }

    #[test]
    fn test_illegal_offsets() {
        for (dx, dy) in [(2, 0), (-1, 0), (0, -1), (1, -1), (-1, -1), (0, 0)] {
            assert!(matches!(
                Offset::new(dx, dy),
                Err(Error::InvalidOffset { .. })
            ));
        }
    }

    #[test]
    fn test_validate_all() {
        assert!(matches!(Offset::validate_all(&[]), Err(Error::EmptyOffsetSet)));
        assert!(Offset::validate_all(&Offset::ALL).is_ok());
        let mixed = [Offset::DEG_0, Offset { dx: 2, dy: 0 }];
        assert!(matches!(
            Offset::validate_all(&mixed),
            Err(Error::InvalidOffset { dx: 2, dy: 0 })
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!("1,0".parse::<Offset>().unwrap(), Offset::DEG_0);
        assert_eq!(" (-1, 1) ".parse::<Offset>().unwrap(), Offset::DEG_135);
        assert!(matches!("2,0".parse::<Offset>(), Err(Error::InvalidOffset { .. })));
        assert!(matches!(
            "east".parse::<Offset>(),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Offset::DEG_135.to_string(), "(-1,1)");
    }
}
