//! An in-memory math font for unit tests.
//!
//! [`TestBackend`] answers glyph queries from a fixed glyph list and
//! [`TableBytes`] writes a binary `MATH` table, so tests exercise the
//! real decoder.

use alloc::sync::Arc;

use strum::IntoEnumIterator as _;

use super::backend::{BoundingBox, GlyphBackend, GlyphId};
use super::constants::{MathConstant, RecordFormat};
use super::font::MathFont;
use super::math_table::{GlyphPartRecord, MathTable};
use crate::types::FontStyle;
use crate::wide_character::styled_char;

pub const UNITS_PER_EM: u16 = 1000;

#[derive(Debug, Clone)]
struct TestGlyph {
    ch: Option<char>,
    name: String,
    advance: i32,
    bbox: BoundingBox,
}

#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    glyphs: Vec<TestGlyph>,
}

impl TestBackend {
    pub fn add(&mut self, ch: Option<char>, name: &str, advance: i32, bbox: BoundingBox) -> GlyphId {
        self.glyphs.push(TestGlyph {
            ch,
            name: name.to_owned(),
            advance,
            bbox,
        });
        GlyphId::try_from(self.glyphs.len()).unwrap()
    }

    fn add_char(&mut self, ch: char) -> GlyphId {
        if let Some(existing) = self.glyphs.iter().position(|g| g.ch == Some(ch)) {
            return GlyphId::try_from(existing + 1).unwrap();
        }
        let bbox = match ch {
            '(' | ')' | '[' | ']' | '{' | '}' | '|' => BoundingBox::new(50.0, -250.0, 300.0, 750.0),
            '\u{2211}' | '\u{220F}' => BoundingBox::new(50.0, -250.0, 850.0, 750.0),
            '\u{222B}' => BoundingBox::new(0.0, -300.0, 450.0, 800.0),
            '\u{221A}' => BoundingBox::new(50.0, -350.0, 800.0, 650.0),
            '\u{0302}' | '\u{20D7}' | '\u{0303}' => BoundingBox::new(-300.0, 550.0, -50.0, 700.0),
            'g' | 'p' | 'q' | 'y' | 'j' => BoundingBox::new(20.0, -200.0, 480.0, 450.0),
            '+' | '=' | '\u{2212}' => BoundingBox::new(50.0, 50.0, 700.0, 450.0),
            _ => BoundingBox::new(20.0, 0.0, 480.0, 700.0),
        };
        let advance = match ch {
            '+' | '=' | '\u{2212}' => 778,
            '\u{2211}' | '\u{220F}' => 900,
            '(' | ')' | '[' | ']' | '|' => 350,
            '\u{0302}' | '\u{20D7}' | '\u{0303}' => 0,
            _ => 500,
        };
        self.add(Some(ch), &format!("uni{:04X}", ch as u32), advance, bbox)
    }

    pub fn glyph(&self, name: &str) -> GlyphId {
        self.glyph_for_name(name)
    }
}

impl GlyphBackend for TestBackend {
    fn units_per_em(&self) -> u16 {
        UNITS_PER_EM
    }

    fn glyph_for_char(&self, ch: char) -> GlyphId {
        self.glyphs
            .iter()
            .position(|g| g.ch == Some(ch))
            .map_or(0, |i| GlyphId::try_from(i + 1).unwrap())
    }

    fn glyph_name(&self, glyph: GlyphId) -> Option<String> {
        let index = usize::from(glyph).checked_sub(1)?;
        self.glyphs.get(index).map(|g| g.name.clone())
    }

    fn glyph_for_name(&self, name: &str) -> GlyphId {
        self.glyphs
            .iter()
            .position(|g| g.name == name)
            .map_or(0, |i| GlyphId::try_from(i + 1).unwrap())
    }

    fn advance(&self, glyph: GlyphId) -> i32 {
        usize::from(glyph)
            .checked_sub(1)
            .and_then(|i| self.glyphs.get(i))
            .map_or(0, |g| g.advance)
    }

    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox> {
        let index = usize::from(glyph).checked_sub(1)?;
        self.glyphs.get(index).map(|g| g.bbox)
    }
}

type Construction = (GlyphId, Vec<GlyphId>, Option<Vec<GlyphPartRecord>>);

/// Writes a version 1.0 `MATH` table. Coverage tables use format 1.
#[derive(Debug, Clone, Default)]
pub struct TableBytes {
    pub constants: Vec<(MathConstant, i16)>,
    pub italic_corrections: Vec<(GlyphId, i16)>,
    pub top_accents: Vec<(GlyphId, i16)>,
    pub vertical: Vec<Construction>,
    pub horizontal: Vec<Construction>,
    pub min_connector_overlap: u16,
}

fn push16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn set16(out: &mut [u8], at: usize, value: usize) {
    let value = u16::try_from(value).unwrap();
    out[at..at + 2].copy_from_slice(&value.to_be_bytes());
}

fn push_coverage(out: &mut Vec<u8>, glyphs: &[GlyphId]) {
    push16(out, 1);
    push16(out, u16::try_from(glyphs.len()).unwrap());
    for &glyph in glyphs {
        push16(out, glyph);
    }
}

fn push_matched(out: &mut Vec<u8>, info_start: usize, slot: usize, records: &[(GlyphId, i16)]) {
    if records.is_empty() {
        return;
    }
    let mut records = records.to_vec();
    records.sort_by_key(|&(glyph, _)| glyph);
    let start = out.len();
    set16(out, slot, start - info_start);
    push16(out, 0);
    push16(out, u16::try_from(records.len()).unwrap());
    for &(_, value) in &records {
        out.extend_from_slice(&value.to_be_bytes());
        push16(out, 0);
    }
    let coverage = out.len();
    set16(out, start, coverage - start);
    let glyphs: Vec<GlyphId> = records.iter().map(|&(glyph, _)| glyph).collect();
    push_coverage(out, &glyphs);
}

impl TableBytes {
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0x0001_0000_u32.to_be_bytes());
        push16(&mut out, 10);
        push16(&mut out, 0);
        push16(&mut out, 0);

        for constant in MathConstant::iter() {
            let value = self
                .constants
                .iter()
                .find(|(c, _)| *c == constant)
                .map_or(0, |&(_, v)| v);
            out.extend_from_slice(&value.to_be_bytes());
            if constant.format() == RecordFormat::MathValueRecord {
                push16(&mut out, 0);
            }
        }

        let info_start = out.len();
        set16(&mut out, 6, info_start);
        for _ in 0..4 {
            push16(&mut out, 0);
        }
        push_matched(&mut out, info_start, info_start, &self.italic_corrections);
        push_matched(&mut out, info_start, info_start + 2, &self.top_accents);

        let variants_start = out.len();
        set16(&mut out, 8, variants_start);
        let mut vertical = self.vertical.clone();
        vertical.sort_by_key(|c| c.0);
        let mut horizontal = self.horizontal.clone();
        horizontal.sort_by_key(|c| c.0);
        push16(&mut out, self.min_connector_overlap);
        push16(&mut out, 0);
        push16(&mut out, 0);
        push16(&mut out, u16::try_from(vertical.len()).unwrap());
        push16(&mut out, u16::try_from(horizontal.len()).unwrap());
        let slots = out.len();
        for _ in 0..vertical.len() + horizontal.len() {
            push16(&mut out, 0);
        }
        for (i, (_, variants, assembly)) in vertical.iter().chain(&horizontal).enumerate() {
            let start = out.len();
            set16(&mut out, slots + 2 * i, start - variants_start);
            push16(&mut out, 0);
            push16(&mut out, u16::try_from(variants.len()).unwrap());
            for &variant in variants {
                push16(&mut out, variant);
                push16(&mut out, 0);
            }
            if let Some(parts) = assembly {
                let assembly_start = out.len();
                set16(&mut out, start, assembly_start - start);
                push16(&mut out, 0);
                push16(&mut out, 0);
                push16(&mut out, u16::try_from(parts.len()).unwrap());
                for part in parts {
                    push16(&mut out, part.glyph);
                    push16(&mut out, part.start_connector_length);
                    push16(&mut out, part.end_connector_length);
                    push16(&mut out, part.full_advance);
                    push16(&mut out, part.part_flags);
                }
            }
        }
        for (slot, list) in [(2, &vertical), (4, &horizontal)] {
            if list.is_empty() {
                continue;
            }
            let coverage = out.len();
            set16(&mut out, variants_start + slot, coverage - variants_start);
            let glyphs: Vec<GlyphId> = list.iter().map(|c| c.0).collect();
            push_coverage(&mut out, &glyphs);
        }
        out
    }
}

/// Constants close to Latin Modern Math, in thousandths of an em.
pub const CONSTANTS: [(MathConstant, i16); 56] = [
    (MathConstant::ScriptPercentScaleDown, 70),
    (MathConstant::ScriptScriptPercentScaleDown, 50),
    (MathConstant::DelimitedSubFormulaMinHeight, 1300),
    (MathConstant::DisplayOperatorMinHeight, 1300),
    (MathConstant::MathLeading, 154),
    (MathConstant::AxisHeight, 250),
    (MathConstant::AccentBaseHeight, 450),
    (MathConstant::FlattenedAccentBaseHeight, 664),
    (MathConstant::SubscriptShiftDown, 247),
    (MathConstant::SubscriptTopMax, 344),
    (MathConstant::SubscriptBaselineDropMin, 200),
    (MathConstant::SuperscriptShiftUp, 363),
    (MathConstant::SuperscriptShiftUpCramped, 289),
    (MathConstant::SuperscriptBottomMin, 108),
    (MathConstant::SuperscriptBaselineDropMax, 250),
    (MathConstant::SubSuperscriptGapMin, 160),
    (MathConstant::SuperscriptBottomMaxWithSubscript, 344),
    (MathConstant::SpaceAfterScript, 56),
    (MathConstant::UpperLimitGapMin, 200),
    (MathConstant::UpperLimitBaselineRiseMin, 111),
    (MathConstant::LowerLimitGapMin, 167),
    (MathConstant::LowerLimitBaselineDropMin, 600),
    (MathConstant::StackTopShiftUp, 444),
    (MathConstant::StackTopDisplayStyleShiftUp, 677),
    (MathConstant::StackBottomShiftDown, 345),
    (MathConstant::StackBottomDisplayStyleShiftDown, 686),
    (MathConstant::StackGapMin, 120),
    (MathConstant::StackDisplayStyleGapMin, 280),
    (MathConstant::StretchStackTopShiftUp, 111),
    (MathConstant::StretchStackBottomShiftDown, 600),
    (MathConstant::StretchStackGapAboveMin, 200),
    (MathConstant::StretchStackGapBelowMin, 167),
    (MathConstant::FractionNumeratorShiftUp, 394),
    (MathConstant::FractionNumeratorDisplayStyleShiftUp, 677),
    (MathConstant::FractionDenominatorShiftDown, 345),
    (MathConstant::FractionDenominatorDisplayStyleShiftDown, 686),
    (MathConstant::FractionNumeratorGapMin, 40),
    (MathConstant::FractionNumDisplayStyleGapMin, 120),
    (MathConstant::FractionRuleThickness, 40),
    (MathConstant::FractionDenominatorGapMin, 40),
    (MathConstant::FractionDenomDisplayStyleGapMin, 120),
    (MathConstant::SkewedFractionHorizontalGap, 350),
    (MathConstant::SkewedFractionVerticalGap, 96),
    (MathConstant::OverbarVerticalGap, 120),
    (MathConstant::OverbarRuleThickness, 40),
    (MathConstant::OverbarExtraAscender, 40),
    (MathConstant::UnderbarVerticalGap, 120),
    (MathConstant::UnderbarRuleThickness, 40),
    (MathConstant::UnderbarExtraDescender, 40),
    (MathConstant::RadicalVerticalGap, 50),
    (MathConstant::RadicalDisplayStyleVerticalGap, 148),
    (MathConstant::RadicalRuleThickness, 40),
    (MathConstant::RadicalExtraAscender, 40),
    (MathConstant::RadicalKernBeforeDegree, 278),
    (MathConstant::RadicalKernAfterDegree, -556),
    (MathConstant::RadicalDegreeBottomRaisePercent, 60),
];

const SYMBOLS: [char; 34] = [
    '\u{2212}', '\u{00D7}', '\u{00F7}', '\u{22C5}', '\u{00B1}', '\u{2213}', '\u{2211}',
    '\u{220F}', '\u{222B}', '\u{221A}', '\u{221E}', '\u{2192}', '\u{2264}', '\u{2265}',
    '\u{2260}', '\u{2248}', '\u{2261}', '\u{2208}', '\u{2202}', '\u{2207}', '\u{2032}',
    '\u{27E8}', '\u{27E9}', '\u{230A}', '\u{230B}', '\u{2308}', '\u{2309}', '\u{2016}',
    '\u{0302}', '\u{0303}', '\u{20D7}', '\u{2218}', '\u{22EF}', '\u{2026}',
];

/// Backend and table bytes of the test font.
pub fn test_font_parts() -> (TestBackend, Vec<u8>) {
    let mut backend = TestBackend::default();
    for ch in (0x21_u8..0x7F).map(char::from) {
        backend.add_char(ch);
    }
    let letters = ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain('\u{03B1}'..='\u{03C9}')
        .chain('\u{0391}'..='\u{03A9}');
    for ch in letters {
        for style in FontStyle::iter() {
            backend.add_char(styled_char(ch, style));
        }
    }
    for ch in SYMBOLS {
        backend.add_char(ch);
    }

    let mut table = TableBytes {
        constants: CONSTANTS.to_vec(),
        min_connector_overlap: 20,
        ..TableBytes::default()
    };

    // Display-size operators.
    for (ch, width) in [('\u{2211}', 1300.0), ('\u{220F}', 1200.0), ('\u{222B}', 500.0)] {
        let base = backend.glyph_for_char(ch);
        let name = format!("uni{:04X}", ch as u32);
        let large = backend.add(
            None,
            &format!("{name}.v1"),
            1400,
            BoundingBox::new(50.0, -850.0, width, 1350.0),
        );
        table.vertical.push((base, vec![base, large], None));
    }
    let integral = backend.glyph_for_char('\u{222B}');
    let large_integral = backend.glyph("uni222B.v1");
    table.italic_corrections.push((integral, 150));
    table.italic_corrections.push((large_integral, 300));

    // Growing delimiters and the radical sign, with an assembly.
    for ch in ['(', ')', '|', '\u{221A}'] {
        let base = backend.glyph_for_char(ch);
        let name = format!("uni{:04X}", ch as u32);
        let mut variants = vec![base];
        for step in 1..=3_u8 {
            let half = 500.0 * (1.0 + f32::from(step) * 0.5);
            variants.push(backend.add(
                None,
                &format!("{name}.v{step}"),
                if ch == '\u{221A}' { 850 } else { 400 },
                BoundingBox::new(50.0, 250.0 - half, 350.0, 250.0 + half),
            ));
        }
        let bottom = backend.add(None, &format!("{name}.bt"), 400, BoundingBox::new(50.0, 0.0, 350.0, 600.0));
        let extender = backend.add(None, &format!("{name}.ex"), 400, BoundingBox::new(50.0, 0.0, 350.0, 400.0));
        let top = backend.add(None, &format!("{name}.tp"), 400, BoundingBox::new(50.0, 0.0, 350.0, 600.0));
        let part = |glyph, start, end, advance, flags| GlyphPartRecord {
            glyph,
            start_connector_length: start,
            end_connector_length: end,
            full_advance: advance,
            part_flags: flags,
        };
        let assembly = vec![
            part(bottom, 0, 200, 600, 0),
            part(extender, 200, 200, 400, 1),
            part(top, 200, 0, 600, 0),
        ];
        table.vertical.push((base, variants, Some(assembly)));
    }

    // Wider accents.
    let hat = backend.glyph_for_char('\u{0302}');
    let wide_hat = backend.add(None, "uni0302.h1", 0, BoundingBox::new(-600.0, 550.0, -50.0, 720.0));
    let wider_hat = backend.add(None, "uni0302.h2", 0, BoundingBox::new(-900.0, 550.0, -50.0, 740.0));
    table.horizontal.push((hat, vec![hat, wide_hat, wider_hat], None));
    table.top_accents.push((hat, -175));

    let italic_f = backend.glyph_for_char('\u{1D453}');
    table.italic_corrections.push((italic_f, 60));
    table.top_accents.push((italic_f, 300));

    (backend, table.build())
}

/// The test font at `size` points.
pub fn test_font(size: f32) -> MathFont {
    let (backend, bytes) = test_font_parts();
    let table = MathTable::parse(&bytes).unwrap();
    MathFont::from_parts("test-math", Arc::new(backend), Arc::new(table), size)
}
