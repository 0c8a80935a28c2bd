//! The immutable index over a curated name table

use indexmap::IndexMap;
use log::{debug, log_enabled, warn};
use serde::Serialize;

use crate::{
    conflict::{ConflictKind, ConflictReport},
    record::{EntryRole, Record},
    types::{Codepoints, GlyphName},
};

/// A curated name for some key, with its role
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: GlyphName,
    pub role: EntryRole,
}

/// Forward and reverse lookups over one version of a curated table.
///
/// An index is built once with [`TableIndex::build`] and is read-only
/// afterwards; a new table version means a new index. It owns all of its
/// data, so it can be shared across threads by reference or in an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct TableIndex {
    // per key, entries in insertion order
    by_codepoints: IndexMap<Codepoints, Vec<Entry>>,
    // first-seen key for each name
    by_name: IndexMap<GlyphName, Codepoints>,
}

impl TableIndex {
    /// Build an index from a batch of records.
    ///
    /// This never fails. Entries that disagree with what was already seen
    /// are reported as conflicts and skipped:
    ///
    /// - a name already mapped to a different key keeps its first key for
    ///   reverse lookup, but is still indexed under the new key
    /// - a name repeated for the same key with a different role keeps its
    ///   first role
    ///
    /// Keys with several production names are reported but keep all of
    /// them; the first one inserted is the one used for resolution.
    pub fn build(records: impl IntoIterator<Item = Record>) -> (TableIndex, ConflictReport) {
        let mut index = TableIndex::default();
        let mut report = ConflictReport::default();
        for record in records {
            index.insert(record, &mut report);
        }
        index.check_production_candidates(&mut report);

        if log_enabled!(log::Level::Warn) {
            for conflict in report.iter() {
                warn!("{conflict}");
            }
        }
        debug!(
            "Indexed {} names for {} keys with {} conflicts",
            index.by_name.len(),
            index.by_codepoints.len(),
            report.len()
        );
        (index, report)
    }

    fn insert(&mut self, record: Record, report: &mut ConflictReport) {
        let (codepoints, name, role) = record.into_parts();
        if let Some(prior) = self
            .entries(&codepoints)
            .iter()
            .find(|entry| entry.name == name)
        {
            if prior.role != role {
                let detail = format!("'{name}' is both {} and {role}", prior.role);
                report.push(codepoints, ConflictKind::RoleContradiction, detail);
            } else {
                debug!("Skipping repeated entry {codepoints} {}{name}", role.prefix());
            }
            return;
        }
        // the reverse map keeps the first key; the forward map keeps every entry
        let reused_from = self
            .by_name
            .get(&name)
            .filter(|existing| **existing != codepoints)
            .cloned();
        match reused_from {
            Some(existing) => {
                let detail = format!("'{name}' already maps to {existing}");
                report.push(
                    codepoints.clone(),
                    ConflictKind::NameReusedForDifferentKey,
                    detail,
                );
            }
            None => {
                self.by_name.insert(name.clone(), codepoints.clone());
            }
        }
        self.by_codepoints
            .entry(codepoints)
            .or_default()
            .push(Entry { name, role });
    }

    fn check_production_candidates(&self, report: &mut ConflictReport) {
        for (key, entries) in self.by_codepoints.iter() {
            let candidates = entries
                .iter()
                .filter(|entry| entry.role == EntryRole::Production)
                .map(|entry| entry.name.as_str())
                .collect::<Vec<_>>();
            if candidates.len() > 1 {
                let detail = format!(
                    "{} production names ({}), using '{}'",
                    candidates.len(),
                    candidates.join(", "),
                    candidates[0]
                );
                report.push(
                    key.clone(),
                    ConflictKind::DuplicateProductionCandidate,
                    detail,
                );
            }
        }
    }

    /// The curated entries for a key, in insertion order.
    ///
    /// Empty if the key has no curated entries.
    pub fn entries(&self, codepoints: &Codepoints) -> &[Entry] {
        self.by_codepoints
            .get(codepoints)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first key a name was recorded for, if any
    pub fn codepoints_for_name(&self, name: &str) -> Option<&Codepoints> {
        self.by_name.get(name)
    }

    /// All keys with curated entries, in order of first insertion
    pub fn keys(&self) -> impl Iterator<Item = &Codepoints> + '_ {
        self.by_codepoints.keys()
    }

    /// The reverse (name to key) table, in insertion order
    pub fn name_table(&self) -> &IndexMap<GlyphName, Codepoints> {
        &self.by_name
    }

    /// The number of keys with curated entries
    pub fn len(&self) -> usize {
        self.by_codepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_codepoints.is_empty()
    }
}
