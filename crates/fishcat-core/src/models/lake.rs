use serde::{Deserialize, Serialize};

use super::geometry::Geometry;

/// Unique identifier for a lake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LakeId(pub i64);

/// A lookup record for lakes where projects run and management units are
/// located. Both the two-letter abbreviation and the full name are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lake {
    pub id: LakeId,

    /// Two-letter lake abbreviation, e.g. "HU"
    pub abbrev: String,

    /// Full lake name, e.g. "Lake Huron"
    pub lake_name: String,

    /// Digitized lake boundary, if available
    pub boundary: Option<Geometry>,
}

impl Lake {
    /// The lake name without the leading "Lake ". A shorter version of the
    /// name to save space when needed.
    pub fn label(&self) -> String {
        self.lake_name.replace("Lake ", "")
    }
}

impl std::fmt::Display for Lake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.lake_name, self.abbrev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn huron() -> Lake {
        Lake {
            id: LakeId(1),
            abbrev: "HU".to_string(),
            lake_name: "Lake Huron".to_string(),
            boundary: None,
        }
    }

    #[test]
    fn test_label_strips_lake_prefix() {
        assert_eq!(huron().label(), "Huron");
    }

    #[test]
    fn test_display_includes_abbrev() {
        assert_eq!(huron().to_string(), "Lake Huron (HU)");
    }
}
