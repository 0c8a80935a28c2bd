//! Basic types shared by the table index and the resolver.

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{Serialize, Serializer};
use smol_str::SmolStr;

/// The name of a glyph, as it appears in a curated table or a font.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GlyphName(SmolStr);

impl GlyphName {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for GlyphName {
    fn from(value: String) -> Self {
        GlyphName(value.into())
    }
}

impl From<&str> for GlyphName {
    fn from(value: &str) -> Self {
        GlyphName(value.into())
    }
}

impl Debug for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// lets maps keyed by GlyphName be queried with a &str
impl std::borrow::Borrow<str> for GlyphName {
    fn borrow(&self) -> &str {
        self.0.borrow()
    }
}

impl PartialEq<&str> for GlyphName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// An ordered sequence of unicode scalar values identifying a glyph.
///
/// A regular glyph has a single codepoint; a ligature (such as `f_f_i`) has
/// one codepoint per component. Logically this is an array of `char`, stored
/// as a `SmolStr` so that keys are cheap to clone and hash.
///
/// Formats as space separated `0xXXXX` values.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codepoints(SmolStr);

impl Codepoints {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        chars.into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// The number of codepoints (not bytes) in the sequence
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_ligature(&self) -> bool {
        self.0.chars().nth(1).is_some()
    }

    /// The sequence as a string of its characters
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromIterator<char> for Codepoints {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Codepoints(iter.into_iter().collect())
    }
}

impl From<char> for Codepoints {
    fn from(value: char) -> Self {
        Codepoints::new([value])
    }
}

impl From<&[char]> for Codepoints {
    fn from(value: &[char]) -> Self {
        Codepoints::new(value.iter().copied())
    }
}

impl<const N: usize> From<[char; N]> for Codepoints {
    fn from(value: [char; N]) -> Self {
        Codepoints::new(value)
    }
}

impl Display for Codepoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "0x{:04X}", c as u32)?;
        }
        Ok(())
    }
}

impl Debug for Codepoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{self}]")
    }
}

// serialized in the same form as it displays, so it can key json objects
impl Serialize for Codepoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a sequence like `0x0066+0x0069`, `00B5` or `0066,0069`.
impl FromStr for Codepoints {
    type Err = CodepointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codepoints = s
            .split(|c: char| c == '+' || c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| parse_hex_codepoint(strip_hex_prefix(token)))
            .collect::<Result<Codepoints, _>>()?;
        if codepoints.is_empty() {
            return Err(CodepointError::Empty(s.into()));
        }
        Ok(codepoints)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodepointError {
    #[error("'{0}' is not a hexadecimal codepoint")]
    InvalidHex(SmolStr),
    #[error("0x{0:04X} is not a unicode scalar value")]
    NotAScalarValue(u32),
    #[error("no codepoints in '{0}'")]
    Empty(SmolStr),
}

pub(crate) fn strip_hex_prefix(token: &str) -> &str {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token)
}

/// Parse bare hex digits (no `0x`) into a `char`.
pub(crate) fn parse_hex_codepoint(digits: &str) -> Result<char, CodepointError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CodepointError::InvalidHex(digits.into()));
    }
    let raw =
        u32::from_str_radix(digits, 16).map_err(|_| CodepointError::InvalidHex(digits.into()))?;
    char::from_u32(raw).ok_or(CodepointError::NotAScalarValue(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codepoints_display() {
        assert_eq!(Codepoints::from('\u{B5}').to_string(), "0x00B5");
        assert_eq!(
            Codepoints::from(['f', 'f', 'i']).to_string(),
            "0x0066 0x0066 0x0069"
        );
        assert_eq!(Codepoints::from('\u{1F63C}').to_string(), "0x1F63C");
    }

    #[test]
    fn codepoints_len_counts_chars() {
        let lig = Codepoints::from(['\u{1F63C}', 'a']);
        assert_eq!(lig.len(), 2);
        assert!(lig.is_ligature());
        assert!(!Codepoints::from('a').is_ligature());
        assert!(Codepoints::default().is_empty());
    }

    #[test]
    fn parse_codepoints() {
        assert_eq!("00B5".parse(), Ok(Codepoints::from('\u{B5}')));
        assert_eq!("0x2126".parse(), Ok(Codepoints::from('\u{2126}')));
        assert_eq!("0066+0X0069".parse(), Ok(Codepoints::from(['f', 'i'])));
        assert_eq!("0066, 0066".parse(), Ok(Codepoints::from(['f', 'f'])));
    }

    #[test]
    fn parse_bad_codepoints() {
        assert_eq!(
            "".parse::<Codepoints>(),
            Err(CodepointError::Empty("".into()))
        );
        assert_eq!(
            "00G5".parse::<Codepoints>(),
            Err(CodepointError::InvalidHex("00G5".into()))
        );
        assert_eq!(
            "D800".parse::<Codepoints>(),
            Err(CodepointError::NotAScalarValue(0xD800))
        );
        assert_eq!(
            "+1F6".parse::<Codepoints>(),
            Ok(Codepoints::from('\u{1F6}'))
        );
        assert!("FFFFFFFFFF".parse::<Codepoints>().is_err());
    }

    #[test]
    fn glyph_name_borrows_as_str() {
        let mut names = std::collections::HashSet::new();
        names.insert(GlyphName::new("twosuperior"));
        assert!(names.contains("twosuperior"));
        assert_eq!(GlyphName::from("Ohm"), "Ohm");
    }

    #[test]
    fn serialize_codepoints_as_display() {
        let json = serde_json::to_string(&Codepoints::from(['f', 'l'])).unwrap();
        assert_eq!(json, "\"0x0066 0x006C\"");
    }
}
