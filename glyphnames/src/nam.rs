//! Reading `.nam` glyph name tables
//!
//! A table is plain text with one entry per line:
//!
//! ```text
//! % comment
//! 0x00B2 twosuperior
//! 0x2126 >Ohm
//! 0x0066 0x0066 0x0069 f_f_i
//! ```
//!
//! One or more `0x` codepoints form the key, followed by a name that may be
//! prefixed with a role marker (see [`EntryRole`]). A trailing `%` starts a
//! comment. Entries with algorithmic names (`uni00B5`, `u1F63C`) carry no
//! information beyond their codepoint and are dropped here.
//!
//! [`EntryRole`]: crate::EntryRole

use log::debug;
use smol_str::SmolStr;

use crate::{
    algorithmic::is_algorithmic_name,
    record::{Record, RecordError},
    types::{parse_hex_codepoint, CodepointError, Codepoints},
};

/// Parse the records out of the text of a `.nam` table.
pub fn parse_nam(text: &str) -> Result<Vec<Record>, NamError> {
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let record = parse_line(line).map_err(|kind| NamError { line: i + 1, kind })?;
        records.extend(record);
    }
    debug!("Parsed {} curated entries", records.len());
    Ok(records)
}

fn parse_line(line: &str) -> Result<Option<Record>, NamErrorKind> {
    let line = line.split_once('%').map(|(a, _)| a).unwrap_or(line);
    let mut codepoints = Vec::new();
    let mut name = None;
    for token in line.split_whitespace() {
        if name.is_some() {
            return Err(NamErrorKind::TrailingData(token.into()));
        }
        match token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            Some(digits) => codepoints.push(parse_hex_codepoint(digits)?),
            None => name = Some(token),
        }
    }

    let Some(raw_name) = name else {
        if codepoints.is_empty() {
            // blank or comment
            return Ok(None);
        }
        return Err(NamErrorKind::MissingName);
    };
    if codepoints.is_empty() {
        return Err(NamErrorKind::MissingCodepoint(raw_name.into()));
    }

    let record = Record::from_prefixed(Codepoints::new(codepoints), raw_name)?;
    if is_algorithmic_name(record.name().as_str()) {
        debug!("Skipping algorithmic entry '{record}'");
        return Ok(None);
    }
    Ok(Some(record))
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct NamError {
    /// 1-based
    pub line: usize,
    pub kind: NamErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NamErrorKind {
    #[error("missing glyph name")]
    MissingName,
    #[error("no codepoint for '{0}'")]
    MissingCodepoint(SmolStr),
    #[error("unexpected '{0}' after glyph name")]
    TrailingData(SmolStr),
    #[error(transparent)]
    Codepoint(#[from] CodepointError),
    #[error(transparent)]
    Record(#[from] RecordError),
}
