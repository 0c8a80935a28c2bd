//! A single curated table entry

use std::fmt::Display;

use serde::Serialize;

use crate::types::{Codepoints, GlyphName};

/// How a curated name may be used, as marked by its prefix in the table.
///
/// - no prefix: production name, also usable as friendly and alternate
/// - `>`: friendly and alternate name
/// - `<`: alternate name only
/// - `!`: synonym
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntryRole {
    Production,
    FriendlyAndAlternate,
    AlternateOnly,
    Synonym,
}

impl EntryRole {
    /// Split a raw table name into its role and the bare name.
    pub fn split_prefix(raw: &str) -> (EntryRole, &str) {
        if let Some(name) = raw.strip_prefix('>') {
            (EntryRole::FriendlyAndAlternate, name)
        } else if let Some(name) = raw.strip_prefix('<') {
            (EntryRole::AlternateOnly, name)
        } else if let Some(name) = raw.strip_prefix('!') {
            (EntryRole::Synonym, name)
        } else {
            (EntryRole::Production, raw)
        }
    }

    /// The marker written before a name with this role
    pub fn prefix(self) -> &'static str {
        match self {
            EntryRole::Production => "",
            EntryRole::FriendlyAndAlternate => ">",
            EntryRole::AlternateOnly => "<",
            EntryRole::Synonym => "!",
        }
    }
}

impl Display for EntryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryRole::Production => f.write_str("production"),
            EntryRole::FriendlyAndAlternate => f.write_str("friendly"),
            EntryRole::AlternateOnly => f.write_str("alternate"),
            EntryRole::Synonym => f.write_str("synonym"),
        }
    }
}

/// One `(codepoints, name, role)` entry from a curated table.
///
/// Records can only be constructed through [`Record::new`], so a record
/// always has at least one codepoint and a non-empty name without whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    codepoints: Codepoints,
    name: GlyphName,
    role: EntryRole,
}

impl Record {
    pub fn new(
        codepoints: impl Into<Codepoints>,
        name: impl Into<GlyphName>,
        role: EntryRole,
    ) -> Result<Record, RecordError> {
        let codepoints = codepoints.into();
        let name = name.into();
        if codepoints.is_empty() {
            return Err(RecordError::NoCodepoints(name));
        }
        if name.as_str().is_empty() {
            return Err(RecordError::EmptyName(codepoints));
        }
        if name.as_str().contains(char::is_whitespace) {
            return Err(RecordError::Whitespace {
                codepoints,
                name,
            });
        }
        Ok(Record {
            codepoints,
            name,
            role,
        })
    }

    /// Create a record from a name that may carry a role prefix, e.g. `>Ohm`.
    pub fn from_prefixed(
        codepoints: impl Into<Codepoints>,
        raw_name: &str,
    ) -> Result<Record, RecordError> {
        let (role, name) = EntryRole::split_prefix(raw_name);
        Record::new(codepoints, name, role)
    }

    pub fn codepoints(&self) -> &Codepoints {
        &self.codepoints
    }

    pub fn name(&self) -> &GlyphName {
        &self.name
    }

    pub fn role(&self) -> EntryRole {
        self.role
    }

    pub(crate) fn into_parts(self) -> (Codepoints, GlyphName, EntryRole) {
        (self.codepoints, self.name, self.role)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}{}", self.codepoints, self.role.prefix(), self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("entry '{0}' has no codepoints")]
    NoCodepoints(GlyphName),
    #[error("entry for {0} has an empty name")]
    EmptyName(Codepoints),
    #[error("name '{name}' for {codepoints} contains whitespace")]
    Whitespace { codepoints: Codepoints, name: GlyphName },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("twosuperior", EntryRole::Production, "twosuperior")]
    #[case::friendly(">Ohm", EntryRole::FriendlyAndAlternate, "Ohm")]
    #[case::alternate("<Omega", EntryRole::AlternateOnly, "Omega")]
    #[case::synonym("!ohm", EntryRole::Synonym, "ohm")]
    // only the first marker is a prefix
    #[case::double_marker(">!x", EntryRole::FriendlyAndAlternate, "!x")]
    fn split_prefix(#[case] raw: &str, #[case] role: EntryRole, #[case] name: &str) {
        assert_eq!((role, name), EntryRole::split_prefix(raw));
        assert_eq!(format!("{}{name}", role.prefix()), raw);
    }

    #[test]
    fn valid_record() {
        let record = Record::from_prefixed('\u{2126}', ">Ohm").unwrap();
        assert_eq!(record.codepoints(), &Codepoints::from('\u{2126}'));
        assert_eq!(record.name(), &GlyphName::new("Ohm"));
        assert_eq!(record.role(), EntryRole::FriendlyAndAlternate);
        assert_eq!(record.to_string(), "0x2126 >Ohm");
    }

    #[test]
    fn ligature_record() {
        let record = Record::new(['f', 'f', 'i'], "f_f_i", EntryRole::Production).unwrap();
        assert!(record.codepoints().is_ligature());
    }

    #[test]
    fn no_codepoints() {
        assert_eq!(
            Record::new(Codepoints::default(), "a", EntryRole::Production),
            Err(RecordError::NoCodepoints("a".into()))
        );
    }

    #[test]
    fn bare_prefix_is_empty_name() {
        assert_eq!(
            Record::from_prefixed('a', "!"),
            Err(RecordError::EmptyName('a'.into()))
        );
    }

    #[test]
    fn whitespace_in_name() {
        assert_eq!(
            Record::new('a', "a b", EntryRole::Synonym),
            Err(RecordError::Whitespace {
                codepoints: 'a'.into(),
                name: "a b".into(),
            })
        );
    }
}
