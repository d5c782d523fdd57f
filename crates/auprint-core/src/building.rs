//! Building code ↔ building name table.
//!
//! Printer share names start with the numeric code of the building they
//! stand in (`5341-12` is printer 12 in building 5341). People know the
//! buildings by name, so the shell accepts either form.

use indexmap::IndexMap;

/// Codes and names of the buildings with printers on the AU print server.
pub const DEFAULT_BUILDINGS: &[(&str, &str)] = &[
    ("1530", "matematik"),
    ("5335", "nygaard"),
    ("5340", "babbage"),
    ("5341", "turing"),
    ("5342", "ada"),
    ("5343", "bush"),
    ("5344", "benjamin"),
    ("5345", "dreyer"),
    ("5346", "hopper"),
    ("5347", "wiener"),
];

/// Bidirectional lookup between building codes and names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingTable {
    by_code: IndexMap<String, String>,
    by_name: IndexMap<String, String>,
}

impl Default for BuildingTable {
    fn default() -> Self {
        DEFAULT_BUILDINGS.iter().copied().collect()
    }
}

impl BuildingTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            by_code: IndexMap::new(),
            by_name: IndexMap::new(),
        }
    }

    /// Add or replace an entry. Replacing a code drops its old name from
    /// the reverse index.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into();
        let name = name.into();
        if let Some(old) = self.by_code.insert(code.clone(), name.clone()) {
            self.by_name.shift_remove(&old);
        }
        self.by_name.insert(name, code);
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Turn user input into a code prefix: a known building name maps to
    /// its code, anything else is taken literally.
    pub fn resolve_code<'a>(&'a self, input: &'a str) -> &'a str {
        self.code_for(input).unwrap_or(input)
    }

    /// Turn a code into a display name, passing unknown codes through.
    pub fn resolve_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.name_for(code).unwrap_or(code)
    }

    /// Friendly install name for a share: `5341-12` becomes `turing-12`.
    ///
    /// Only the first two hyphen-separated fields are used. Names without
    /// a hyphen are returned unchanged.
    pub fn pretty_name(&self, share: &str) -> String {
        let mut parts = share.split('-');
        let (Some(code), Some(number)) = (parts.next(), parts.next()) else {
            return share.to_owned();
        };
        format!("{}-{number}", self.resolve_name(code))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl<C: Into<String>, N: Into<String>> Extend<(C, N)> for BuildingTable {
    fn extend<I: IntoIterator<Item = (C, N)>>(&mut self, iter: I) {
        for (code, name) in iter {
            self.insert(code, name);
        }
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for BuildingTable {
    fn from_iter<I: IntoIterator<Item = (C, N)>>(iter: I) -> Self {
        let mut table = Self::empty();
        table.extend(iter);
        table
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lookup_is_bidirectional() {
        let table = BuildingTable::default();
        for (code, name) in DEFAULT_BUILDINGS {
            assert_eq!(table.code_for(name), Some(*code));
            assert_eq!(table.name_for(code), Some(*name));
        }
    }

    #[test]
    fn unknown_input_passes_through() {
        let table = BuildingTable::default();
        assert_eq!(table.resolve_code("turing"), "5341");
        assert_eq!(table.resolve_code("5341"), "5341");
        assert_eq!(table.resolve_code("9999"), "9999");
        assert_eq!(table.resolve_name("5341"), "turing");
        assert_eq!(table.resolve_name("hogwarts"), "hogwarts");
    }

    #[test]
    fn pretty_name_substitutes_building() {
        let table = BuildingTable::default();
        assert_eq!(table.pretty_name("5341-12"), "turing-12");
        assert_eq!(table.pretty_name("9999-01"), "9999-01");
    }

    #[test]
    fn pretty_name_single_token_unchanged() {
        let table = BuildingTable::default();
        assert_eq!(table.pretty_name("noHyphen"), "noHyphen");
    }

    #[test]
    fn pretty_name_ignores_extra_fields() {
        let table = BuildingTable::default();
        assert_eq!(table.pretty_name("5342-03-color"), "ada-03");
    }

    #[test]
    fn override_replaces_reverse_entry() {
        let mut table = BuildingTable::default();
        table.insert("5341", "shannon");
        assert_eq!(table.name_for("5341"), Some("shannon"));
        assert_eq!(table.code_for("shannon"), Some("5341"));
        assert_eq!(table.code_for("turing"), None);
        assert_eq!(table.len(), DEFAULT_BUILDINGS.len());
    }
}
