use crate::types::coordinate::Coordinate;

/// A named location from a region catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEntry {
    pub name: String,
    pub coordinate: Coordinate,
}

impl RegionEntry {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}
