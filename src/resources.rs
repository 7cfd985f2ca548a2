//! Resource tables
//!
//! Two tables are loaded once and never mutated: the ordered prefix table
//! (`prefix<TAB>phonemes`, both hyphenated, first match wins) and the
//! homograph-heterophone table (`form|key|phonemes`, one alternative per
//! line, duplicates merged in file order). Default copies are compiled in;
//! both can also be loaded from a path, and malformed content fails with
//! [`Error::ResourceLoad`].

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};

static PREFIXES_TXT: &str = include_str!("../resources/prefixes.txt");
static HOMOGRAPHS_TXT: &str = include_str!("../resources/homographs_heterophones.txt");

/// Ordered list of `(prefix, phonemes)` pairs.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    entries: Vec<(String, String)>,
}

impl PrefixTable {
    /// Parse the tab-separated table, keeping file order.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split('\t');
            let prefix = parts.next().unwrap_or_default();
            let phones = parts.next().ok_or_else(|| {
                Error::ResourceLoad(format!("prefix table line {}: missing phonemes field", n + 1))
            })?;
            entries.push((prefix.to_string(), phones.to_string()));
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ResourceLoad(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// First entry whose prefix starts the hyphenated form.
    pub fn find(&self, syllables: &str) -> Option<&(String, String)> {
        self.entries.iter().find(|(p, _)| syllables.starts_with(p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Word form to `|`-joined IPA alternatives.
#[derive(Debug, Clone)]
pub struct HomographTable {
    map: HashMap<String, String>,
}

impl HomographTable {
    /// Parse the `|`-separated table. Repeated forms accumulate their
    /// phoneme alternatives; an alternative already present is skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut map: HashMap<String, String> = HashMap::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('|').collect();
            if fields.len() < 3 {
                return Err(Error::ResourceLoad(format!(
                    "homograph table line {}: expected form|key|phonemes",
                    n + 1
                )));
            }
            let form = fields[0];
            let phones = fields[2];
            match map.get_mut(form) {
                Some(existing) if !existing.contains(phones) => {
                    existing.push('|');
                    existing.push_str(phones);
                }
                Some(_) => {}
                None => {
                    map.insert(form.to_string(), phones.to_string());
                }
            }
        }
        Ok(Self { map })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ResourceLoad(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }

    pub fn get(&self, form: &str) -> Option<&str> {
        self.map.get(form).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Both tables together.
pub struct Tables {
    pub prefixes: PrefixTable,
    pub homographs: HomographTable,
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let prefixes = PrefixTable::parse(PREFIXES_TXT)
        .unwrap_or_else(|e| panic!("embedded prefix table is malformed: {}", e));
    let homographs = HomographTable::parse(HOMOGRAPHS_TXT)
        .unwrap_or_else(|e| panic!("embedded homograph table is malformed: {}", e));
    Tables {
        prefixes,
        homographs,
    }
});

/// The embedded tables, parsed once.
pub fn tables() -> &'static Tables {
    &TABLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables_parse() {
        let t = tables();
        assert!(!t.prefixes.is_empty());
        assert!(!t.homographs.is_empty());
    }

    #[test]
    fn test_prefix_order_wins() {
        let table = PrefixTable::parse("e-co\tɛ-kɔ\ne-co-no\te-ko-no\n").unwrap();
        let hit = table.find("e-co-no-mi-a").unwrap();
        assert_eq!(hit.0, "e-co");
        assert_eq!(hit.1, "ɛ-kɔ");
    }

    #[test]
    fn test_prefix_missing_field_is_error() {
        assert!(PrefixTable::parse("e-co ɛ-kɔ\n").is_err());
    }

    #[test]
    fn test_homograph_merge_keeps_order() {
        let text = "molho|substantivo|ˈmo.ʎʊ\nmolho|verbo|ˈmɔ.ʎʊ\nmolho|repetido|ˈmo.ʎʊ\n";
        let table = HomographTable::parse(text).unwrap();
        assert_eq!(table.get("molho"), Some("ˈmo.ʎʊ|ˈmɔ.ʎʊ"));
    }

    #[test]
    fn test_homograph_short_line_is_error() {
        assert!(HomographTable::parse("molho|ˈmo.ʎʊ\n").is_err());
    }

    #[test]
    fn test_round_trip_reload_is_identical() {
        let a = HomographTable::parse(HOMOGRAPHS_TXT).unwrap();
        let b = HomographTable::parse(HOMOGRAPHS_TXT).unwrap();
        assert_eq!(a.len(), b.len());
        for (form, phones) in &a.map {
            assert_eq!(b.get(form), Some(phones.as_str()));
        }
    }
}
