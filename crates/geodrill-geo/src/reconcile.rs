//! Reconciliation of geometry labels with canonical backend names
//!
//! Boundary files spell regions in many ways ("Orissa", "J&K", "NCT of Delhi").
//! The table maps every known spelling to the single name the backend uses.
//! Lookups never fail: unknown labels pass through unchanged.

use geodrill_core::error::{GeodrillError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Legacy and alternate spellings found in boundary data, with their canonical targets
const ALIASES: &[(&str, &str)] = &[
    ("Andaman & Nicobar Island", "Andaman and Nicobar Islands"),
    ("Andaman & Nicobar Islands", "Andaman and Nicobar Islands"),
    ("Arunanchal Pradesh", "Arunachal Pradesh"),
    ("Dadra and Nagar Haveli", "Dadra and Nagar Haveli and Daman and Diu"),
    ("Daman and Diu", "Dadra and Nagar Haveli and Daman and Diu"),
    ("Jammu & Kashmir", "Jammu and Kashmir"),
    ("J&K", "Jammu and Kashmir"),
    ("Orissa", "Odisha"),
    ("Uttaranchal", "Uttarakhand"),
    ("Pondicherry", "Puducherry"),
    ("Laksheedweep", "Lakshadweep"),
    ("NCT of Delhi", "Delhi"),
    ("Telengana", "Telangana"),
    ("Chhatisgarh", "Chhattisgarh"),
];

/// Canonical state and union territory names as stored by the backend
const CANONICAL: &[&str] = &[
    "Andaman and Nicobar Islands",
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chandigarh",
    "Chhattisgarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Ladakh",
    "Lakshadweep",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Puducherry",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// Many-to-one mapping from raw labels to canonical names
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    entries: HashMap<String, String>,
    /// Lowercased key -> original key, for case-insensitive fallback
    folded: HashMap<String, String>,
}

/// TOML mapping asset layout
#[derive(Debug, Deserialize)]
struct MappingFile {
    names: BTreeMap<String, String>,
}

impl NameTable {
    /// Build a table from `(raw label, canonical name)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::default();
        for (raw, canonical) in pairs {
            table.insert(raw, canonical);
        }
        table
    }

    /// The Indian state table: every alias plus a self-mapping for each canonical name
    pub fn builtin() -> Self {
        let mut table = Self::from_pairs(ALIASES.iter().copied());
        for name in CANONICAL {
            table.insert(*name, *name);
        }
        table
    }

    /// Load a mapping asset.
    ///
    /// `.json` files hold a flat object of `label: canonical`; anything else is
    /// read as TOML with a `[names]` table.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GeodrillError::MappingLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let names: BTreeMap<String, String> = if is_json {
            serde_json::from_str(&content).map_err(|e| GeodrillError::MappingLoad {
                path: path.to_path_buf(),
                reason: format!("Failed to parse JSON: {}", e),
            })?
        } else {
            toml::from_str::<MappingFile>(&content)
                .map_err(|e| GeodrillError::MappingLoad {
                    path: path.to_path_buf(),
                    reason: format!("Failed to parse TOML: {}", e),
                })?
                .names
        };

        tracing::debug!(path = %path.display(), entries = names.len(), "Loaded name mapping");
        Ok(Self::from_pairs(names))
    }

    /// Add or replace one mapping
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        let raw = raw.into().trim().to_string();
        let canonical = canonical.into().trim().to_string();
        self.folded.insert(raw.to_lowercase(), raw.clone());
        self.entries.insert(raw, canonical);
    }

    /// Canonical name for a raw label.
    ///
    /// Exact matches win, then a case-insensitive match; otherwise the trimmed
    /// label itself is returned.
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        let trimmed = label.trim();
        if let Some(canonical) = self.entries.get(trimmed) {
            return canonical;
        }
        self.folded
            .get(&trimmed.to_lowercase())
            .and_then(|key| self.entries.get(key))
            .map(String::as_str)
            .unwrap_or(trimmed)
    }

    /// True when the label is a known canonical name
    pub fn is_canonical(&self, name: &str) -> bool {
        self.entries.get(name).map(|c| c == name).unwrap_or(false)
    }

    /// Mappings whose target is not itself a self-mapped key, as `(label, canonical)`
    pub fn closure_defects(&self) -> Vec<(String, String)> {
        let mut defects: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|(_, canonical)| !self.is_canonical(canonical))
            .map(|(raw, canonical)| (raw.clone(), canonical.clone()))
            .collect();
        defects.sort();
        defects
    }

    /// Fail with the first closure defect, if any
    pub fn validate(&self) -> Result<()> {
        match self.closure_defects().into_iter().next() {
            Some((label, canonical)) => Err(GeodrillError::MappingInvalid { label, canonical }),
            None => Ok(()),
        }
    }

    /// Distinct canonical names, sorted
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|(raw, canonical)| raw == canonical)
            .map(|(raw, _)| raw.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_builtin_resolves_aliases() {
        let table = NameTable::builtin();
        assert_eq!(table.resolve("Orissa"), "Odisha");
        assert_eq!(table.resolve("Uttaranchal"), "Uttarakhand");
        assert_eq!(table.resolve("NCT of Delhi"), "Delhi");
        assert_eq!(table.resolve("Daman and Diu"), "Dadra and Nagar Haveli and Daman and Diu");
        assert_eq!(table.resolve("J&K"), "Jammu and Kashmir");
    }

    #[test]
    fn test_builtin_satisfies_closure() {
        let table = NameTable::builtin();
        assert!(table.closure_defects().is_empty());
        assert!(table.validate().is_ok());
        assert_eq!(table.canonical_names().len(), CANONICAL.len());
    }

    #[test]
    fn test_unknown_label_passes_through() {
        let table = NameTable::builtin();
        assert_eq!(table.resolve("Atlantis"), "Atlantis");
        assert_eq!(table.resolve("  Atlantis "), "Atlantis");
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let table = NameTable::builtin();
        assert_eq!(table.resolve("ORISSA"), "Odisha");
        assert_eq!(table.resolve("tamil nadu"), "Tamil Nadu");
    }

    #[test]
    fn test_resolve_is_idempotent_on_builtin() {
        let table = NameTable::builtin();
        for (raw, _) in ALIASES {
            let once = table.resolve(raw);
            assert_eq!(table.resolve(once), once);
        }
    }

    #[test]
    fn test_missing_self_mapping_is_reported() {
        // Target of the alias is never registered as a key
        let table = NameTable::from_pairs([
            ("Andaman & Nicobar Island", "Andaman and Nicobar Islands"),
            ("Goa", "Goa"),
        ]);

        let defects = table.closure_defects();
        assert_eq!(
            defects,
            vec![("Andaman & Nicobar Island".to_string(), "Andaman and Nicobar Islands".to_string())]
        );
        assert!(matches!(table.validate(), Err(GeodrillError::MappingInvalid { .. })));
        // Still resolves leniently
        assert_eq!(table.resolve("Andaman & Nicobar Island"), "Andaman and Nicobar Islands");
    }

    #[test]
    fn test_from_path_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[names]
"Bombay" = "Mumbai"
"Mumbai" = "Mumbai"
"#
        )
        .unwrap();

        let table = NameTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("Bombay"), "Mumbai");
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_from_path_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"Madras": "Chennai", "Chennai": "Chennai"}}"#).unwrap();

        let table = NameTable::from_path(file.path()).unwrap();
        assert_eq!(table.resolve("Madras"), "Chennai");
        assert!(table.is_canonical("Chennai"));
        assert!(!table.is_canonical("Madras"));
    }

    #[test]
    fn test_from_path_invalid() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "names = 3").unwrap();

        let result = NameTable::from_path(file.path());
        assert!(matches!(result, Err(GeodrillError::MappingLoad { .. })));
    }
}
