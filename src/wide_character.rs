//! Wide character (Mathematical Alphanumeric Symbols) support
//!
//! Maps plain Latin letters, Greek letters and digits to the styled
//! code points of Unicode block U+1D400 to U+1D7FF (plus the letterlike
//! symbols that fill its holes, e.g. U+210E PLANCK CONSTANT for italic h).
//!
//! Data derived from https://www.unicode.org/charts/PDF/U1D400.pdf

use crate::types::FontStyle;

/// Start code points of one style. `None` means the style has no
/// dedicated glyphs for that class and falls back to the default style.
struct StyleBlock {
    upper: u32,
    lower: u32,
    upper_greek: Option<u32>,
    lower_greek: Option<u32>,
    greek_symbols: Option<u32>,
    digits: Option<u32>,
}

const ITALIC: StyleBlock = StyleBlock {
    upper: 0x1D434,
    lower: 0x1D44E,
    upper_greek: Some(0x1D6E2),
    lower_greek: Some(0x1D6FC),
    greek_symbols: Some(0x1D716),
    digits: None,
};

const BOLD: StyleBlock = StyleBlock {
    upper: 0x1D400,
    lower: 0x1D41A,
    upper_greek: Some(0x1D6A8),
    lower_greek: Some(0x1D6C2),
    greek_symbols: Some(0x1D6DC),
    digits: Some(0x1D7CE),
};

const BOLD_ITALIC: StyleBlock = StyleBlock {
    upper: 0x1D468,
    lower: 0x1D482,
    upper_greek: Some(0x1D71C),
    lower_greek: Some(0x1D736),
    greek_symbols: Some(0x1D750),
    // No bold italic digits exist; bold is the closest.
    digits: Some(0x1D7CE),
};

const TYPEWRITER: StyleBlock = StyleBlock {
    upper: 0x1D670,
    lower: 0x1D68A,
    upper_greek: None,
    lower_greek: None,
    greek_symbols: None,
    digits: Some(0x1D7F6),
};

const SANS_SERIF: StyleBlock = StyleBlock {
    upper: 0x1D5A0,
    lower: 0x1D5BA,
    upper_greek: None,
    lower_greek: None,
    greek_symbols: None,
    digits: Some(0x1D7E2),
};

const FRAKTUR: StyleBlock = StyleBlock {
    upper: 0x1D504,
    lower: 0x1D51E,
    upper_greek: None,
    lower_greek: None,
    greek_symbols: None,
    digits: None,
};

const BLACKBOARD: StyleBlock = StyleBlock {
    upper: 0x1D538,
    lower: 0x1D552,
    upper_greek: None,
    lower_greek: None,
    greek_symbols: None,
    digits: Some(0x1D7D8),
};

/// Greek symbol variants in the order the styled blocks list them:
/// epsilon, theta, kappa, phi, rho, pi.
const GREEK_SYMBOLS: [u32; 6] = [0x03F5, 0x03D1, 0x03F0, 0x03D5, 0x03F1, 0x03D6];

/// Letters of the styled blocks that live in Letterlike Symbols instead.
const ITALIC_EXCEPTIONS: [(char, u32); 1] = [('h', 0x210E)];

const CALIGRAPHIC_EXCEPTIONS: [(char, u32); 11] = [
    ('B', 0x212C),
    ('E', 0x2130),
    ('F', 0x2131),
    ('H', 0x210B),
    ('I', 0x2110),
    ('L', 0x2112),
    ('M', 0x2133),
    ('R', 0x211B),
    ('e', 0x212F),
    ('g', 0x210A),
    ('o', 0x2134),
];

const FRAKTUR_EXCEPTIONS: [(char, u32); 5] = [
    ('C', 0x212D),
    ('H', 0x210C),
    ('I', 0x2111),
    ('R', 0x211C),
    ('Z', 0x2128),
];

const BLACKBOARD_EXCEPTIONS: [(char, u32); 7] = [
    ('C', 0x2102),
    ('H', 0x210D),
    ('N', 0x2115),
    ('P', 0x2119),
    ('Q', 0x211A),
    ('R', 0x211D),
    ('Z', 0x2124),
];

const fn is_upper_greek(ch: char) -> bool {
    matches!(ch, '\u{0391}'..='\u{03A9}')
}

const fn is_lower_greek(ch: char) -> bool {
    matches!(ch, '\u{03B1}'..='\u{03C9}')
}

fn greek_symbol_index(ch: char) -> Option<u32> {
    GREEK_SYMBOLS
        .iter()
        .position(|&cp| cp == ch as u32)
        .and_then(|i| u32::try_from(i).ok())
}

fn exception(table: &[(char, u32)], ch: char) -> Option<char> {
    table
        .iter()
        .find(|(plain, _)| *plain == ch)
        .and_then(|&(_, cp)| char::from_u32(cp))
}

fn offset(start: u32, base: char, ch: char) -> Option<char> {
    char::from_u32(start + (ch as u32 - base as u32))
}

/// Map `ch` through `block`, or `None` when the block has no glyph for it.
fn from_block(block: &StyleBlock, ch: char) -> Option<char> {
    match ch {
        'A'..='Z' => offset(block.upper, 'A', ch),
        'a'..='z' => offset(block.lower, 'a', ch),
        '0'..='9' => block.digits.and_then(|start| offset(start, '0', ch)),
        _ if is_upper_greek(ch) => block
            .upper_greek
            .and_then(|start| offset(start, '\u{0391}', ch)),
        _ if is_lower_greek(ch) => block
            .lower_greek
            .and_then(|start| offset(start, '\u{03B1}', ch)),
        _ => {
            let index = greek_symbol_index(ch)?;
            block
                .greek_symbols
                .and_then(|start| char::from_u32(start + index))
        }
    }
}

fn italic(ch: char) -> char {
    exception(&ITALIC_EXCEPTIONS, ch)
        .or_else(|| from_block(&ITALIC, ch))
        .unwrap_or(ch)
}

/// Default math style: letters and lowercase Greek in italic, digits and
/// capital Greek upright.
fn default_style(ch: char) -> char {
    if ch.is_ascii_alphabetic() || is_lower_greek(ch) || greek_symbol_index(ch).is_some() {
        italic(ch)
    } else {
        ch
    }
}

/// The styled form of `ch` in `style`.
///
/// Characters with no styled form in `style` fall back to the default
/// style; characters with no styled form at all are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use mathlayout::types::FontStyle;
/// use mathlayout::wide_character::styled_char;
///
/// assert_eq!(styled_char('x', FontStyle::Default), '\u{1D465}');
/// assert_eq!(styled_char('R', FontStyle::Blackboard), '\u{211D}');
/// assert_eq!(styled_char('2', FontStyle::Default), '2');
/// ```
#[must_use]
pub fn styled_char(ch: char, style: FontStyle) -> char {
    match style {
        FontStyle::Default => default_style(ch),
        FontStyle::Roman => ch,
        FontStyle::Italic => italic(ch),
        FontStyle::Bold => from_block(&BOLD, ch).unwrap_or(ch),
        FontStyle::BoldItalic => from_block(&BOLD_ITALIC, ch).unwrap_or(ch),
        FontStyle::Caligraphic => exception(&CALIGRAPHIC_EXCEPTIONS, ch)
            .or_else(|| ch.is_ascii_uppercase().then(|| offset(0x1D49C, 'A', ch)).flatten())
            .unwrap_or_else(|| default_style(ch)),
        FontStyle::Typewriter => from_block(&TYPEWRITER, ch).unwrap_or_else(|| default_style(ch)),
        FontStyle::SansSerif => from_block(&SANS_SERIF, ch).unwrap_or_else(|| default_style(ch)),
        FontStyle::Fraktur => exception(&FRAKTUR_EXCEPTIONS, ch)
            .or_else(|| from_block(&FRAKTUR, ch))
            .unwrap_or_else(|| default_style(ch)),
        FontStyle::Blackboard => exception(&BLACKBOARD_EXCEPTIONS, ch)
            .or_else(|| from_block(&BLACKBOARD, ch))
            .unwrap_or_else(|| default_style(ch)),
    }
}

/// Restyle every character of `text`.
#[must_use]
pub fn change_font(text: &str, style: FontStyle) -> String {
    text.chars().map(|ch| styled_char(ch, style)).collect()
}
