//! Resolving the name to use for a codepoint sequence
//!
//! Every precedence rule lives in [`NameRole::eligible`]; everything else
//! here is lookup plus the algorithmic fallback.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Display,
    str::FromStr,
};

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    algorithmic::{algorithmic_name, parse_algorithmic_name},
    error::ResolveError,
    index::{Entry, TableIndex},
    record::EntryRole,
    types::{Codepoints, GlyphName},
};

/// The kind of name a caller is asking for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NameRole {
    #[default]
    Production,
    Friendly,
    Alternate,
    Synonym,
}

impl NameRole {
    /// Curated roles that can answer a request for this role, most preferred first.
    ///
    /// Within a role, earlier entries win.
    fn eligible(self) -> &'static [EntryRole] {
        match self {
            NameRole::Production => &[EntryRole::Production],
            NameRole::Friendly => &[EntryRole::Production, EntryRole::FriendlyAndAlternate],
            NameRole::Alternate => &[
                EntryRole::Production,
                EntryRole::FriendlyAndAlternate,
                EntryRole::AlternateOnly,
            ],
            NameRole::Synonym => &[EntryRole::Synonym],
        }
    }

    fn candidates(self, entries: &[Entry]) -> impl Iterator<Item = &GlyphName> + '_ {
        self.eligible()
            .iter()
            .flat_map(move |role| entries.iter().filter(move |entry| entry.role == *role))
            .map(|entry| &entry.name)
    }
}

impl Display for NameRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameRole::Production => f.write_str("production"),
            NameRole::Friendly => f.write_str("friendly"),
            NameRole::Alternate => f.write_str("alternate"),
            NameRole::Synonym => f.write_str("synonym"),
        }
    }
}

impl FromStr for NameRole {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static ERR_MSG: &str = "expected one of 'production', 'friendly', 'alternate', 'synonym'";
        match s.to_ascii_lowercase().trim() {
            "production" => Ok(Self::Production),
            "friendly" => Ok(Self::Friendly),
            "alternate" | "alternative" => Ok(Self::Alternate),
            "synonym" => Ok(Self::Synonym),
            _ => Err(ERR_MSG),
        }
    }
}

/// The answer to a [`Resolver::resolve`] query.
///
/// Production, friendly and alternate requests always produce a single name;
/// synonym requests produce every curated synonym, possibly none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Name(GlyphName),
    Synonyms(Vec<GlyphName>),
}

impl Resolution {
    pub fn name(&self) -> Option<&GlyphName> {
        match self {
            Resolution::Name(name) => Some(name),
            Resolution::Synonyms(_) => None,
        }
    }

    /// All resolved names; a single name is a slice of one
    pub fn names(&self) -> &[GlyphName] {
        match self {
            Resolution::Name(name) => std::slice::from_ref(name),
            Resolution::Synonyms(names) => names,
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, name) in self.names().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name.as_str())?;
        }
        Ok(())
    }
}

/// Every name known for one key, in precedence order.
///
/// `production` is always present (curated or algorithmic); the other lists
/// only hold curated names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameSet {
    pub production: GlyphName,
    pub friendly: Vec<GlyphName>,
    pub alternate: Vec<GlyphName>,
    pub synonym: Vec<GlyphName>,
}

/// A glyph whose name maps to a different codepoint than the one the font
/// assigns it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub glyph: GlyphName,
    pub cmap: Codepoints,
    pub curated: Codepoints,
}

/// The outcome of [`Resolver::plan_production_renames`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    /// old name to new name, in glyph order
    pub renames: IndexMap<GlyphName, GlyphName>,
    /// glyphs left alone because the table disagrees with the cmap
    pub mismatches: Vec<Mismatch>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// The glyph order after applying the renames
    pub fn apply<'a>(
        &self,
        glyph_order: impl IntoIterator<Item = &'a GlyphName>,
    ) -> Vec<GlyphName> {
        glyph_order
            .into_iter()
            .map(|name| self.renames.get(name).unwrap_or(name).clone())
            .collect()
    }
}

/// A suggested codepoint that was already mapped to another glyph
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CmapDuplicate {
    pub codepoint: char,
    /// the glyph the codepoint was suggested for
    pub glyph: GlyphName,
    /// the glyph that keeps it
    pub existing: GlyphName,
}

/// The outcome of [`Resolver::plan_cmap_additions`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CmapPlan {
    /// the cmap with every addition applied
    pub cmap: BTreeMap<char, GlyphName>,
    /// newly mapped glyphs, in glyph order
    pub additions: Vec<(GlyphName, char)>,
    pub duplicates: Vec<CmapDuplicate>,
}

impl CmapPlan {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }
}

/// Stateless queries over a [`TableIndex`].
///
/// A resolver is just a borrowed view, so it is `Copy` and can be used from
/// any number of threads at once.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    index: &'a TableIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a TableIndex) -> Self {
        Resolver { index }
    }

    /// Resolve the name for `codepoints` in the requested role.
    ///
    /// Fails only if `codepoints` is empty.
    pub fn resolve(
        &self,
        codepoints: &Codepoints,
        role: NameRole,
    ) -> Result<Resolution, ResolveError> {
        match role {
            NameRole::Synonym => self.synonyms(codepoints).map(Resolution::Synonyms),
            _ => self.single(codepoints, role).map(Resolution::Name),
        }
    }

    /// The curated production name, or the algorithmic name.
    pub fn production(&self, codepoints: &Codepoints) -> Result<GlyphName, ResolveError> {
        self.single(codepoints, NameRole::Production)
    }

    /// The first production or friendly name (production preferred), or the
    /// algorithmic name.
    pub fn friendly(&self, codepoints: &Codepoints) -> Result<GlyphName, ResolveError> {
        self.single(codepoints, NameRole::Friendly)
    }

    /// The most preferred alternate-eligible name, or the algorithmic name.
    pub fn alternate(&self, codepoints: &Codepoints) -> Result<GlyphName, ResolveError> {
        self.single(codepoints, NameRole::Alternate)
    }

    /// Every curated alternate-eligible name, in precedence order.
    ///
    /// Unlike [`Resolver::alternate`] there is no fallback, so this may be empty.
    pub fn alternates(&self, codepoints: &Codepoints) -> Result<Vec<GlyphName>, ResolveError> {
        self.all(codepoints, NameRole::Alternate)
    }

    /// Every curated synonym, in insertion order. May be empty.
    pub fn synonyms(&self, codepoints: &Codepoints) -> Result<Vec<GlyphName>, ResolveError> {
        self.all(codepoints, NameRole::Synonym)
    }

    fn single(&self, codepoints: &Codepoints, role: NameRole) -> Result<GlyphName, ResolveError> {
        if codepoints.is_empty() {
            return Err(ResolveError::InvalidInput);
        }
        Ok(role
            .candidates(self.index.entries(codepoints))
            .next()
            .cloned()
            .unwrap_or_else(|| algorithmic_name(codepoints)))
    }

    fn all(
        &self,
        codepoints: &Codepoints,
        role: NameRole,
    ) -> Result<Vec<GlyphName>, ResolveError> {
        if codepoints.is_empty() {
            return Err(ResolveError::InvalidInput);
        }
        Ok(role
            .candidates(self.index.entries(codepoints))
            .cloned()
            .collect())
    }

    /// The key a curated name was first recorded for.
    pub fn name_to_codepoints(&self, name: &str) -> Option<&'a Codepoints> {
        self.index.codepoints_for_name(name)
    }

    /// Best guess at the codepoints for a glyph name: the curated mapping,
    /// else the decoded algorithmic name.
    pub fn suggest_codepoints(&self, name: &str) -> Option<Codepoints> {
        self.name_to_codepoints(name)
            .cloned()
            .or_else(|| parse_algorithmic_name(name))
    }

    /// All names for a key.
    pub fn names_for(&self, codepoints: &Codepoints) -> Result<NameSet, ResolveError> {
        Ok(NameSet {
            production: self.production(codepoints)?,
            friendly: self.all(codepoints, NameRole::Friendly)?,
            alternate: self.alternates(codepoints)?,
            synonym: self.synonyms(codepoints)?,
        })
    }

    /// The full resolved table, keyed in order of first insertion.
    pub fn export(&self) -> IndexMap<Codepoints, NameSet> {
        self.index
            .keys()
            .filter_map(|key| Some((key.clone(), self.names_for(key).ok()?)))
            .collect()
    }

    /// Work out which glyphs of a font should be renamed to their production names.
    ///
    /// `cmap` maps codepoints to glyph names; a glyph reachable from several
    /// codepoints is named after the lowest. A glyph keeps its name if it is
    /// not in the cmap, if the table maps its current name to a different
    /// codepoint (reported as a mismatch), or if its production name is
    /// already taken by another glyph.
    pub fn plan_production_renames(
        &self,
        glyph_order: &[GlyphName],
        cmap: &BTreeMap<char, GlyphName>,
    ) -> RenamePlan {
        let mut reverse_cmap = HashMap::new();
        // ascending iteration, so the first insert is the lowest codepoint
        for (c, name) in cmap {
            reverse_cmap.entry(name).or_insert(*c);
        }

        // current names stay taken even if renamed, so a plan can be applied in any order
        let mut taken = glyph_order.iter().cloned().collect::<HashSet<_>>();
        let mut plan = RenamePlan::default();
        for glyph in glyph_order {
            let Some(c) = reverse_cmap.get(glyph).copied() else {
                continue;
            };
            let codepoints = Codepoints::from(c);
            if let Some(curated) = self.name_to_codepoints(glyph.as_str()) {
                if *curated != codepoints {
                    plan.mismatches.push(Mismatch {
                        glyph: glyph.clone(),
                        cmap: codepoints,
                        curated: curated.clone(),
                    });
                    continue;
                }
            }
            let Ok(production) = self.production(&codepoints) else {
                continue;
            };
            if production == *glyph || !taken.insert(production.clone()) {
                continue;
            }
            plan.renames.insert(glyph.clone(), production);
        }
        plan
    }

    /// Suggest codepoints for glyphs from their names.
    ///
    /// By default the plan starts from `cmap` and only looks at glyphs that
    /// are not mapped yet. With `remap_all` it starts from an empty cmap and
    /// looks at every glyph in `glyph_order`.
    ///
    /// Only single-codepoint suggestions are used. When a suggested codepoint
    /// is already mapped, the existing glyph keeps it and the clash is
    /// recorded in [`CmapPlan::duplicates`].
    pub fn plan_cmap_additions(
        &self,
        glyph_order: &[GlyphName],
        cmap: &BTreeMap<char, GlyphName>,
        remap_all: bool,
    ) -> CmapPlan {
        let mut plan = CmapPlan::default();
        if !remap_all {
            plan.cmap = cmap.clone();
        }
        let mapped = plan.cmap.values().cloned().collect::<HashSet<_>>();
        for glyph in glyph_order.iter().filter(|glyph| !mapped.contains(*glyph)) {
            let Some(suggestion) = self.suggest_codepoints(glyph.as_str()) else {
                continue;
            };
            let mut chars = suggestion.iter();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                continue;
            };
            if let Some(existing) = plan.cmap.get(&c) {
                plan.duplicates.push(CmapDuplicate {
                    codepoint: c,
                    glyph: glyph.clone(),
                    existing: existing.clone(),
                });
                continue;
            }
            plan.cmap.insert(c, glyph.clone());
            plan.additions.push((glyph.clone(), c));
        }
        plan
    }
}
