//! Data quality findings collected while building a [`TableIndex`]
//!
//! None of these are fatal: the index is always built, and resolution uses
//! the first-seen entry wherever the table disagrees with itself.
//!
//! [`TableIndex`]: crate::TableIndex

use std::fmt::Display;

use serde::Serialize;

use crate::types::Codepoints;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ConflictKind {
    /// A key has more than one unprefixed (production) name
    DuplicateProductionCandidate,
    /// A name was already assigned to another key
    NameReusedForDifferentKey,
    /// The same name appears for a key under two different roles
    RoleContradiction,
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::DuplicateProductionCandidate => f.write_str("duplicate production name"),
            ConflictKind::NameReusedForDifferentKey => f.write_str("name reused"),
            ConflictKind::RoleContradiction => f.write_str("role contradiction"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// The key of the entry that triggered the conflict
    pub key: Codepoints,
    pub kind: ConflictKind,
    pub detail: String,
}

impl Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}: {}", self.kind, self.key, self.detail)
    }
}

/// Conflicts in the order they were detected
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictReport(Vec<Conflict>);

impl ConflictReport {
    pub(crate) fn push(&mut self, key: Codepoints, kind: ConflictKind, detail: String) {
        self.0.push(Conflict { key, kind, detail });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conflict> + '_ {
        self.0.iter()
    }

    /// Conflicts of one kind, in detection order
    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &Conflict> + '_ {
        self.0.iter().filter(move |conflict| conflict.kind == kind)
    }

    pub fn count(&self, kind: ConflictKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl<'a> IntoIterator for &'a ConflictReport {
    type Item = &'a Conflict;
    type IntoIter = std::slice::Iter<'a, Conflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_by_kind() {
        let mut report = ConflictReport::default();
        report.push(
            'A'.into(),
            ConflictKind::NameReusedForDifferentKey,
            "'A' already maps to 0x0391".into(),
        );
        report.push(
            'B'.into(),
            ConflictKind::RoleContradiction,
            "whatever".into(),
        );
        assert_eq!(report.len(), 2);
        assert_eq!(report.count(ConflictKind::RoleContradiction), 1);
        assert_eq!(report.count(ConflictKind::DuplicateProductionCandidate), 0);
        assert_eq!(
            report
                .of_kind(ConflictKind::NameReusedForDifferentKey)
                .next()
                .unwrap()
                .to_string(),
            "name reused for 0x0041: 'A' already maps to 0x0391"
        );
    }
}
