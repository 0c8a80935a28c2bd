//! Resolve the glyph names a font should use for unicode codepoints.
//!
//! Names come from a curated table of role-tagged entries (see [`nam`]),
//! indexed once into an immutable [`TableIndex`]. A [`Resolver`] answers
//! production, friendly, alternate and synonym queries against the index,
//! falling back to algorithmic `uniXXXX`/`uXXXXX` names for anything the
//! table does not cover.
//!
//! ```
//! use glyphnames::{parse_nam, Codepoints, NameRole, Resolver, TableIndex};
//!
//! let records = parse_nam("0x00B2 twosuperior\n0x2126 >Ohm\n").unwrap();
//! let (index, conflicts) = TableIndex::build(records);
//! assert!(conflicts.is_empty());
//!
//! let resolver = Resolver::new(&index);
//! let ohm = Codepoints::from('\u{2126}');
//! assert_eq!(resolver.production(&ohm).unwrap(), "uni2126");
//! assert_eq!(resolver.friendly(&ohm).unwrap(), "Ohm");
//! ```

pub mod algorithmic;
#[cfg(feature = "cli")]
pub mod cli;
mod conflict;
mod error;
mod index;
pub mod nam;
mod record;
mod resolver;
mod types;

pub use algorithmic::{algorithmic_name, is_algorithmic_name, parse_algorithmic_name};
pub use conflict::{Conflict, ConflictKind, ConflictReport};
pub use error::{Error, ResolveError};
pub use index::{Entry, TableIndex};
pub use nam::{parse_nam, NamError};
pub use record::{EntryRole, Record, RecordError};
pub use resolver::{
    CmapDuplicate, CmapPlan, Mismatch, NameRole, NameSet, RenamePlan, Resolution, Resolver,
};
pub use types::{CodepointError, Codepoints, GlyphName};
