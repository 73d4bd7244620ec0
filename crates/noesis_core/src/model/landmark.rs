//! Landmark reference model.

use serde::{Deserialize, Serialize};

/// Stable identifier of a landmark in the memory map.
pub type LandmarkId = String;

/// Life area a landmark (and its entries) belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Business,
    Finance,
    Thinking,
    Communication,
    Health,
    Relationships,
    Career,
    #[default]
    Other,
}

impl Category {
    /// All categories in map legend order.
    pub const ALL: [Category; 8] = [
        Category::Business,
        Category::Finance,
        Category::Thinking,
        Category::Communication,
        Category::Health,
        Category::Relationships,
        Category::Career,
        Category::Other,
    ];

    /// Returns the wire name used in persisted JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Finance => "finance",
            Self::Thinking => "thinking",
            Self::Communication => "communication",
            Self::Health => "health",
            Self::Relationships => "relationships",
            Self::Career => "career",
            Self::Other => "other",
        }
    }

    /// Parses a wire name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}

/// Layout coordinates on the memory map, in percent of the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

/// Static "location" on the memory map that groups entries.
///
/// Only `id` and `category` carry semantics for the store; the rest is
/// presentational metadata forwarded to renderers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub id: LandmarkId,
    pub name: String,
    pub short_name: String,
    pub category: Category,
    pub position: MapPosition,
    pub color: String,
    pub icon: String,
}
