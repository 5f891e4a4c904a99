//! Floor table for id and height lookup.

use heapless::{String, Vec};

use crate::config::{ElevatorConfig, FloorConfig, Millimeters, MAX_FLOORS};

/// Index into the floor table, 0 = lowest floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FloorId(pub usize);

/// A served floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    /// Floor name.
    pub name: String<16>,
    /// Platform height at this floor.
    pub height: Millimeters,
}

/// Ordered, immutable floor-to-height mapping fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorTable {
    floors: Vec<Floor, MAX_FLOORS>,
}

impl FloorTable {
    /// Build from validated floor configurations (lowest first).
    pub fn from_floors(floors: &[FloorConfig]) -> Self {
        let floors = floors
            .iter()
            .take(MAX_FLOORS)
            .map(|f| Floor {
                name: f.name.clone(),
                height: f.height_mm,
            })
            .collect();
        Self { floors }
    }

    /// Build from the system configuration.
    pub fn from_config(config: &ElevatorConfig) -> Self {
        Self::from_floors(&config.floors)
    }

    /// Number of floors.
    #[inline]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Whether the table has no floors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Get a floor by id.
    pub fn get(&self, id: FloorId) -> Option<&Floor> {
        self.floors.get(id.0)
    }

    /// Height of a floor.
    pub fn height(&self, id: FloorId) -> Option<Millimeters> {
        self.get(id).map(|f| f.height)
    }

    /// Find a floor by name.
    pub fn find(&self, name: &str) -> Option<FloorId> {
        self.floors
            .iter()
            .position(|f| f.name.as_str() == name)
            .map(FloorId)
    }

    /// Floor whose height is exactly `height`.
    pub fn at_height(&self, height: Millimeters) -> Option<FloorId> {
        self.floors
            .iter()
            .position(|f| f.height == height)
            .map(FloorId)
    }

    /// Floor closest to `height`.
    pub fn nearest(&self, height: Millimeters) -> Option<FloorId> {
        self.floors
            .iter()
            .enumerate()
            .min_by_key(|(_, f)| f.height.distance_to(height))
            .map(|(i, _)| FloorId(i))
    }

    /// Highest floor height (top of travel).
    pub fn max_height(&self) -> Millimeters {
        self.floors
            .last()
            .map(|f| f.height)
            .unwrap_or(Millimeters::ZERO)
    }

    /// Iterate floors lowest first.
    pub fn iter(&self) -> impl Iterator<Item = (FloorId, &Floor)> {
        self.floors.iter().enumerate().map(|(i, f)| (FloorId(i), f))
    }
}
