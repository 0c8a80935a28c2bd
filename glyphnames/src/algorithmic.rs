//! Algorithmic `uniXXXX` / `uXXXXX` glyph names
//!
//! These are the names used for codepoints that have no curated entry. They
//! follow the conventions of the [Adobe Glyph List Specification][aglspec]:
//! BMP codepoints are written as `uni` plus four uppercase hex digits, others
//! as `u` plus five or six digits, and ligatures join their components
//! with `_`.
//!
//! [aglspec]: https://github.com/adobe-type-tools/agl-specification

use smol_str::{format_smolstr, SmolStr};

use crate::types::{Codepoints, GlyphName};

/// Generate the algorithmic name for a codepoint sequence.
///
/// This never consults a curated table and never fails. An empty sequence
/// produces an empty name; callers are expected to reject empty input first.
pub fn algorithmic_name(codepoints: &Codepoints) -> GlyphName {
    let mut components = codepoints.iter().map(component_name);
    let Some(first) = components.next() else {
        return GlyphName::new("");
    };
    components
        .fold(first.to_string(), |mut name, component| {
            name.push('_');
            name.push_str(&component);
            name
        })
        .into()
}

fn component_name(c: char) -> SmolStr {
    let raw = c as u32;
    if raw <= 0xFFFF {
        format_smolstr!("uni{raw:04X}")
    } else {
        format_smolstr!("u{raw:05X}")
    }
}

/// Returns `true` if `name` is an algorithmic name that decodes to codepoints.
pub fn is_algorithmic_name(name: &str) -> bool {
    parse_algorithmic_name(name).is_some()
}

/// Decode an algorithmic name back into its codepoints.
///
/// Accepts `uniXXXX` (including several concatenated groups of four digits,
/// like `uni00660069`), `uXXXX` through `uXXXXXX`, and `_`-joined sequences
/// of those. Hex digits must be uppercase, and every value must be a unicode
/// scalar value; anything else returns `None`.
pub fn parse_algorithmic_name(name: &str) -> Option<Codepoints> {
    let mut codepoints = Vec::new();
    for component in name.split('_') {
        decode_component(component, &mut codepoints)?;
    }
    Some(Codepoints::new(codepoints))
}

fn decode_component(component: &str, out: &mut Vec<char>) -> Option<()> {
    if let Some(digits) = component.strip_prefix("uni") {
        if digits.is_empty() || digits.len() % 4 != 0 {
            return None;
        }
        for group in digits.as_bytes().chunks(4) {
            out.push(scalar_from_hex(std::str::from_utf8(group).ok()?)?);
        }
        return Some(());
    }
    let digits = component.strip_prefix('u')?;
    if !(4..=6).contains(&digits.len()) {
        return None;
    }
    out.push(scalar_from_hex(digits)?);
    Some(())
}

// uppercase digits only; char::from_u32 rejects surrogates and anything past 0x10FFFF
fn scalar_from_hex(digits: &str) -> Option<char> {
    if !digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
        return None;
    }
    char::from_u32(u32::from_str_radix(digits, 16).ok()?)
}
