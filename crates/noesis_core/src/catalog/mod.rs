//! Static landmark catalog.
//!
//! # Responsibility
//! - Hold the fixed, ordered list of memory-map landmarks.
//! - Provide lookup-by-id and enumeration.
//!
//! # Invariants
//! - A catalog is never empty and never contains duplicate ids.
//! - The catalog is immutable once built.

use crate::model::landmark::{Category, Landmark, MapPosition};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static BUILTIN_CATALOG: Lazy<LandmarkCatalog> = Lazy::new(|| LandmarkCatalog {
    landmarks: builtin_landmarks(),
});

/// Failure while loading a catalog from static configuration.
#[derive(Debug)]
pub enum CatalogError {
    InvalidJson(serde_json::Error),
    Empty,
    DuplicateId(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid landmark catalog json: {err}"),
            Self::Empty => write!(f, "landmark catalog must contain at least one landmark"),
            Self::DuplicateId(id) => write!(f, "duplicate landmark id `{id}`"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::Empty | Self::DuplicateId(_) => None,
        }
    }
}

/// Ordered, read-only set of landmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkCatalog {
    landmarks: Vec<Landmark>,
}

impl LandmarkCatalog {
    /// Returns the process-wide built-in catalog.
    pub fn builtin() -> &'static LandmarkCatalog {
        &BUILTIN_CATALOG
    }

    /// Builds a catalog from an explicit landmark list.
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Result<Self, CatalogError> {
        if landmarks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for landmark in &landmarks {
            if !seen.insert(landmark.id.as_str()) {
                return Err(CatalogError::DuplicateId(landmark.id.clone()));
            }
        }

        Ok(Self { landmarks })
    }

    /// Loads a catalog from a JSON array of landmarks.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let landmarks: Vec<Landmark> =
            serde_json::from_str(json).map_err(CatalogError::InvalidJson)?;
        Self::from_landmarks(landmarks)
    }

    /// All landmarks in catalog order.
    pub fn enumerate(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn lookup(&self, id: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|landmark| landmark.id == id)
    }

    /// First landmark in catalog order; used as the initial selection.
    pub fn first(&self) -> &Landmark {
        // Non-empty by construction.
        &self.landmarks[0]
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Landmark> {
        self.landmarks
            .iter()
            .filter(move |landmark| landmark.category == category)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

fn landmark(
    id: &str,
    name: &str,
    short_name: &str,
    category: Category,
    (x, y): (f32, f32),
    color: &str,
    icon: &str,
) -> Landmark {
    Landmark {
        id: id.to_string(),
        name: name.to_string(),
        short_name: short_name.to_string(),
        category,
        position: MapPosition { x, y },
        color: color.to_string(),
        icon: icon.to_string(),
    }
}

fn builtin_landmarks() -> Vec<Landmark> {
    vec![
        landmark(
            "business-tower",
            "Business Tower",
            "Business",
            Category::Business,
            (22.0, 28.0),
            "#4F7CFF",
            "briefcase",
        ),
        landmark(
            "finance-vault",
            "Finance Vault",
            "Finance",
            Category::Finance,
            (48.0, 18.0),
            "#2FB67C",
            "coins",
        ),
        landmark(
            "thinking-lighthouse",
            "Thinking Lighthouse",
            "Thinking",
            Category::Thinking,
            (74.0, 26.0),
            "#9B6BFF",
            "lightbulb",
        ),
        landmark(
            "communication-square",
            "Communication Square",
            "Communication",
            Category::Communication,
            (18.0, 58.0),
            "#FF9F43",
            "message-circle",
        ),
        landmark(
            "health-garden",
            "Health Garden",
            "Health",
            Category::Health,
            (44.0, 52.0),
            "#FF5C7A",
            "heart-pulse",
        ),
        landmark(
            "relationships-bridge",
            "Relationships Bridge",
            "Relationships",
            Category::Relationships,
            (70.0, 60.0),
            "#F368E0",
            "users",
        ),
        landmark(
            "career-summit",
            "Career Summit",
            "Career",
            Category::Career,
            (32.0, 82.0),
            "#00B8D9",
            "mountain",
        ),
        landmark(
            "open-archive",
            "Open Archive",
            "Other",
            Category::Other,
            (62.0, 84.0),
            "#8395A7",
            "archive",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, LandmarkCatalog};
    use crate::model::landmark::Category;

    #[test]
    fn builtin_catalog_covers_every_category_once() {
        let catalog = LandmarkCatalog::builtin();
        assert_eq!(catalog.len(), Category::ALL.len());
        for category in Category::ALL {
            assert_eq!(catalog.by_category(category).count(), 1, "{category:?}");
        }
        assert_eq!(catalog.first().id, "business-tower");
    }

    #[test]
    fn lookup_returns_none_for_unknown_id() {
        let catalog = LandmarkCatalog::builtin();
        assert!(catalog.lookup("health-garden").is_some());
        assert!(catalog.lookup("nowhere").is_none());
    }

    #[test]
    fn from_landmarks_rejects_empty_and_duplicates() {
        assert!(matches!(
            LandmarkCatalog::from_landmarks(Vec::new()),
            Err(CatalogError::Empty)
        ));

        let first = LandmarkCatalog::builtin().first().clone();
        let err = LandmarkCatalog::from_landmarks(vec![first.clone(), first]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "business-tower"));
    }

    #[test]
    fn from_json_reads_camel_case_fields() {
        let json = r##"[{
            "id": "dojo",
            "name": "Focus Dojo",
            "shortName": "Dojo",
            "category": "thinking",
            "position": { "x": 10.0, "y": 20.0 },
            "color": "#000000",
            "icon": "target"
        }]"##;

        let catalog = LandmarkCatalog::from_json(json).unwrap();
        let dojo = catalog.lookup("dojo").unwrap();
        assert_eq!(dojo.short_name, "Dojo");
        assert_eq!(dojo.category, Category::Thinking);
    }
}
