//! Static category and profile configuration.
//!
//! A [`Catalog`] is an explicit value handed to the loader and the rating
//! engine at construction, never ambient global state, so tests can run
//! several independent configurations side by side. The built-in catalog
//! mirrors the amenity groups and life-case profiles the application ships
//! with; a JSON file with the same shape can replace it at startup.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One OSM tag condition, e.g. `shop=supermarket`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TagPair {
    pub key: String,
    pub value: String,
}

impl TagPair {
    pub fn new(key: &str, value: &str) -> Self {
        TagPair {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// A named class of amenities defined by a set of qualifying tag pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmenityCategory {
    pub name: String,
    pub label: String,
    pub tags: Vec<TagPair>,
}

/// A named ordered list of category names whose ratings are averaged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingProfile {
    pub name: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub categories: Vec<AmenityCategory>,
    pub profiles: Vec<RatingProfile>,
}

impl Catalog {
    /// Parse a catalog from its JSON file format and validate it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Category and profile names must be unique, every category needs at
    /// least one tag pair, and every profile's category names must resolve.
    pub fn validate(&self) -> Result<()> {
        let mut category_names = HashSet::new();
        for category in &self.categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate category name: {}",
                    category.name
                )));
            }
            if category.tags.is_empty() {
                return Err(AppError::Config(format!(
                    "Category {} has no tag pairs",
                    category.name
                )));
            }
        }

        let mut profile_names = HashSet::new();
        for profile in &self.profiles {
            if !profile_names.insert(profile.name.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate profile name: {}",
                    profile.name
                )));
            }
            for name in &profile.categories {
                if !category_names.contains(name.as_str()) {
                    return Err(AppError::Config(format!(
                        "Profile {} references unknown category {}",
                        profile.name, name
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&AmenityCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn profile(&self, name: &str) -> Option<&RatingProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// All categories whose tag-pair list contains `(key, value)`. A single
    /// tag may qualify a feature for several categories at once.
    pub fn matching_categories(&self, key: &str, value: &str) -> Vec<&AmenityCategory> {
        self.categories
            .iter()
            .filter(|c| c.tags.iter().any(|t| t.key == key && t.value == value))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let category = |name: &str, label: &str, tags: &[(&str, &str)]| AmenityCategory {
            name: name.to_string(),
            label: label.to_string(),
            tags: tags.iter().map(|(k, v)| TagPair::new(k, v)).collect(),
        };
        let profile = |name: &str, categories: &[&str]| RatingProfile {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        };

        Catalog {
            categories: vec![
                category(
                    "grocery",
                    "Groceries and markets",
                    &[
                        ("shop", "convenience"),
                        ("shop", "supermarket"),
                        ("amenity", "marketplace"),
                    ],
                ),
                category(
                    "pharmacy",
                    "Pharmacies",
                    &[("amenity", "pharmacy"), ("healthcare", "pharmacy")],
                ),
                category(
                    "food",
                    "Cafes and fast food",
                    &[("amenity", "fast_food"), ("amenity", "cafe")],
                ),
                category("kindergarten", "Kindergartens", &[("amenity", "kindergarten")]),
                category("school", "Schools", &[("amenity", "school")]),
                category(
                    "clinic",
                    "Clinics and hospitals",
                    &[
                        ("amenity", "clinic"),
                        ("amenity", "hospital"),
                        ("amenity", "doctor"),
                        ("amenity", "doctors"),
                        ("healthcare", "clinic"),
                        ("healthcare", "hospital"),
                        ("healthcare", "doctor"),
                        ("healthcare", "doctors"),
                        ("healthcare", "centre"),
                    ],
                ),
                category("hairdresser", "Hairdressers", &[("shop", "hairdresser")]),
                category("cinema", "Cinemas", &[("amenity", "cinema")]),
                category(
                    "pub",
                    "Pubs and bars",
                    &[("amenity", "pub"), ("amenity", "bar")],
                ),
                category("nightclub", "Nightclubs", &[("amenity", "nightclub")]),
            ],
            profiles: vec![
                profile(
                    "family",
                    &[
                        "grocery",
                        "pharmacy",
                        "clinic",
                        "kindergarten",
                        "school",
                        "hairdresser",
                    ],
                ),
                profile(
                    "diligent_student",
                    &["grocery", "pharmacy", "clinic", "food"],
                ),
                profile(
                    "carefree_student",
                    &[
                        "grocery",
                        "pharmacy",
                        "clinic",
                        "food",
                        "cinema",
                        "pub",
                        "nightclub",
                    ],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.categories.len(), 10);
        assert_eq!(catalog.profiles.len(), 3);
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::default();
        assert!(catalog.category("grocery").is_some());
        assert!(catalog.category("spaceport").is_none());
        assert_eq!(catalog.profile("family").unwrap().categories.len(), 6);
    }

    #[test]
    fn test_matching_categories() {
        let catalog = Catalog::default();

        let matches = catalog.matching_categories("amenity", "pharmacy");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "pharmacy");

        // healthcare: pharmacy also qualifies for the pharmacy category
        let matches = catalog.matching_categories("healthcare", "pharmacy");
        assert_eq!(matches.len(), 1);

        assert!(catalog.matching_categories("amenity", "fountain").is_empty());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut catalog = Catalog::default();
        catalog.categories.push(AmenityCategory {
            name: "grocery".to_string(),
            label: "Duplicate".to_string(),
            tags: vec![TagPair::new("shop", "mall")],
        });
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_unresolved_profile_rejected() {
        let mut catalog = Catalog::default();
        catalog.profiles.push(RatingProfile {
            name: "broken".to_string(),
            categories: vec!["nonexistent".to_string()],
        });
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_empty_tag_list_rejected() {
        let mut catalog = Catalog::default();
        catalog.categories.push(AmenityCategory {
            name: "empty".to_string(),
            label: "Empty".to_string(),
            tags: vec![],
        });
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}
