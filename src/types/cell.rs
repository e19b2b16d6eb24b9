//! Cell types
use crate::types::Error;
use std::fmt;
use std::str::FromStr;

/// The type of a reference cell
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A point
    Point = 0,
    /// A line interval
    Interval = 1,
    /// A triangle
    Triangle = 2,
    /// A quadrilateral
    Quadrilateral = 3,
    /// A tetrahedron (whose faces are all triangles)
    Tetrahedron = 4,
    /// A hexahedron (whose faces are all quadrilaterals)
    Hexahedron = 5,
    /// A triangular prism
    Prism = 6,
    /// A square-based pyramid
    Pyramid = 7,
}

impl ReferenceCellType {
    /// Create a reference cell type from a u8
    pub fn from(i: u8) -> Option<ReferenceCellType> {
        match i {
            0 => Some(ReferenceCellType::Point),
            1 => Some(ReferenceCellType::Interval),
            2 => Some(ReferenceCellType::Triangle),
            3 => Some(ReferenceCellType::Quadrilateral),
            4 => Some(ReferenceCellType::Tetrahedron),
            5 => Some(ReferenceCellType::Hexahedron),
            6 => Some(ReferenceCellType::Prism),
            7 => Some(ReferenceCellType::Pyramid),
            _ => None,
        }
    }

    /// The name of the cell
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceCellType::Point => "point",
            ReferenceCellType::Interval => "interval",
            ReferenceCellType::Triangle => "triangle",
            ReferenceCellType::Quadrilateral => "quadrilateral",
            ReferenceCellType::Tetrahedron => "tetrahedron",
            ReferenceCellType::Hexahedron => "hexahedron",
            ReferenceCellType::Prism => "prism",
            ReferenceCellType::Pyramid => "pyramid",
        }
    }
}

impl fmt::Display for ReferenceCellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ReferenceCellType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(ReferenceCellType::Point),
            "interval" => Ok(ReferenceCellType::Interval),
            "triangle" => Ok(ReferenceCellType::Triangle),
            "quadrilateral" => Ok(ReferenceCellType::Quadrilateral),
            "tetrahedron" => Ok(ReferenceCellType::Tetrahedron),
            "hexahedron" => Ok(ReferenceCellType::Hexahedron),
            "prism" => Ok(ReferenceCellType::Prism),
            "pyramid" => Ok(ReferenceCellType::Pyramid),
            _ => Err(Error::UnsupportedCell(s.to_string())),
        }
    }
}
