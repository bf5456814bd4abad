//! Decoder for the OpenType `MATH` table
//!
//! Only the parts the typesetter needs are decoded: the constants, the
//! italic corrections and top accent attachments of `MathGlyphInfo`, and
//! the glyph variants and assemblies of `MathVariants`. All values stay in
//! font design units; [`super::MathFont`] scales them on read.
//!
//! Layout reference: <https://learn.microsoft.com/typography/opentype/spec/math>

use std::collections::HashMap;

use log::trace;
use strum::{EnumCount as _, IntoEnumIterator as _};
use thiserror::Error;

use super::backend::GlyphId;
use super::constants::{MathConstant, RecordFormat};

/// Version 1.0 of the table, the only one defined.
const MATH_TABLE_VERSION: u32 = 0x0001_0000;

/// Errors raised while decoding a `MATH` table.
///
/// Any error aborts the whole decode: a font whose table cannot be read
/// completely is not used for layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathTableError {
    /// A read ran past the end of the table data.
    #[error("MATH table truncated: needed {needed} bytes at offset {offset}")]
    UnexpectedEof {
        /// Offset of the read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },
    /// The table header announces a version other than 1.0.
    #[error("unsupported MATH table version {version:#010x}")]
    UnsupportedVersion {
        /// The version found.
        version: u32,
    },
    /// A coverage table uses a format other than 1 or 2.
    #[error("invalid coverage format {format}")]
    UnsupportedCoverageFormat {
        /// The format found.
        format: u16,
    },
}

/// One part of a glyph assembly, in design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPartRecord {
    /// Glyph drawn for this part.
    pub glyph: GlyphId,
    /// Length of the connector at the start (bottom or left) of the part.
    pub start_connector_length: u16,
    /// Length of the connector at the end (top or right) of the part.
    pub end_connector_length: u16,
    /// Full advance of the part along the growth direction.
    pub full_advance: u16,
    /// Part flags; bit 0 marks an extender.
    pub part_flags: u16,
}

impl GlyphPartRecord {
    /// Returns `true` for parts that may be repeated.
    #[must_use]
    pub const fn is_extender(&self) -> bool {
        self.part_flags & 1 == 1
    }
}

/// Variants and optional assembly recorded for one glyph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphConstruction {
    /// Pre-built variants in increasing size.
    pub variants: Vec<GlyphId>,
    /// Parts to build arbitrarily large versions from, bottom to top.
    pub assembly: Option<Vec<GlyphPartRecord>>,
}

/// Decoded `MATH` table.
///
/// Immutable once parsed; [`super::MathFont`] shares one instance between
/// all of its sizes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MathTable {
    constants: Vec<i32>,
    italic_corrections: HashMap<GlyphId, i16>,
    top_accent_attachments: HashMap<GlyphId, i16>,
    vertical: HashMap<GlyphId, GlyphConstruction>,
    horizontal: HashMap<GlyphId, GlyphConstruction>,
    min_connector_overlap: u16,
}

/// Big-endian cursor over the table bytes.
struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    const fn seek(&mut self, position: usize) {
        self.position = position;
    }

    fn bytes<const N: usize>(&mut self) -> Result<[u8; N], MathTableError> {
        let eof = MathTableError::UnexpectedEof {
            offset: self.position,
            needed: N,
        };
        let end = self.position.checked_add(N).ok_or_else(|| eof.clone())?;
        let slice = self.data.get(self.position..end).ok_or(eof)?;
        let mut out = [0; N];
        out.copy_from_slice(slice);
        self.position = end;
        Ok(out)
    }

    fn u16(&mut self) -> Result<u16, MathTableError> {
        self.bytes::<2>().map(u16::from_be_bytes)
    }

    fn i16(&mut self) -> Result<i16, MathTableError> {
        self.bytes::<2>().map(i16::from_be_bytes)
    }

    fn u32(&mut self) -> Result<u32, MathTableError> {
        self.bytes::<4>().map(u32::from_be_bytes)
    }

    /// An Offset16, relative to `base`.
    fn offset(&mut self, base: usize) -> Result<usize, MathTableError> {
        Ok(base + usize::from(self.u16()?))
    }

    /// A MathValueRecord; the device table is not used.
    fn value_record(&mut self) -> Result<i16, MathTableError> {
        let value = self.i16()?;
        self.u16()?;
        Ok(value)
    }
}

impl MathTable {
    /// Decode the raw bytes of a `MATH` table.
    ///
    /// # Errors
    /// [`MathTableError::UnexpectedEof`] when an offset or record points
    /// outside `data`, [`MathTableError::UnsupportedVersion`] for a header
    /// other than 1.0, and [`MathTableError::UnsupportedCoverageFormat`]
    /// for coverage tables that are neither format 1 nor 2.
    pub fn parse(data: &[u8]) -> Result<Self, MathTableError> {
        let mut reader = Reader::new(data);
        let version = reader.u32()?;
        if version != MATH_TABLE_VERSION {
            return Err(MathTableError::UnsupportedVersion { version });
        }
        let constants_offset = reader.offset(0)?;
        let glyph_info_offset = reader.offset(0)?;
        let variants_offset = reader.offset(0)?;

        let mut table = Self {
            constants: read_constants(&mut reader, constants_offset)?,
            ..Self::default()
        };

        reader.seek(glyph_info_offset);
        let italic_offset = reader.u16()?;
        let top_accent_offset = reader.u16()?;
        // A null offset means the subtable is absent.
        if italic_offset != 0 {
            table.italic_corrections =
                read_matched_table(&mut reader, glyph_info_offset + usize::from(italic_offset))?;
        }
        if top_accent_offset != 0 {
            table.top_accent_attachments =
                read_matched_table(&mut reader, glyph_info_offset + usize::from(top_accent_offset))?;
        }

        table.read_variants(&mut reader, variants_offset)?;

        trace!(
            "MATH table: {} italic corrections, {} top accents, {} vertical and {} horizontal constructions",
            table.italic_corrections.len(),
            table.top_accent_attachments.len(),
            table.vertical.len(),
            table.horizontal.len()
        );
        Ok(table)
    }

    fn read_variants(&mut self, reader: &mut Reader<'_>, base: usize) -> Result<(), MathTableError> {
        reader.seek(base);
        self.min_connector_overlap = reader.u16()?;
        let vertical_coverage_offset = reader.offset(base)?;
        let horizontal_coverage_offset = reader.offset(base)?;
        let vertical_count = usize::from(reader.u16()?);
        let horizontal_count = usize::from(reader.u16()?);
        let records_start = reader.position;

        let vertical_coverage = if vertical_count == 0 {
            Vec::new()
        } else {
            read_coverage(reader, vertical_coverage_offset)?
        };
        let horizontal_coverage = if horizontal_count == 0 {
            Vec::new()
        } else {
            read_coverage(reader, horizontal_coverage_offset)?
        };

        let mut constructions = Vec::with_capacity(vertical_count + horizontal_count);
        for i in 0..vertical_count + horizontal_count {
            reader.seek(records_start + 2 * i);
            let offset = reader.offset(base)?;
            constructions.push(read_construction(reader, offset)?);
        }
        let horizontal = constructions.split_off(vertical_count);

        self.vertical = vertical_coverage.into_iter().zip(constructions).collect();
        self.horizontal = horizontal_coverage.into_iter().zip(horizontal).collect();
        Ok(())
    }

    /// Raw value of `constant`: design units, or parts per hundred for
    /// percent constants.
    #[must_use]
    pub fn constant(&self, constant: MathConstant) -> i32 {
        self.constants
            .get(constant as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Italic correction of `glyph` in design units; 0 when not covered.
    #[must_use]
    pub fn italic_correction(&self, glyph: GlyphId) -> i16 {
        self.italic_corrections
            .get(&glyph)
            .copied()
            .unwrap_or_default()
    }

    /// Top accent attachment of `glyph` in design units, if covered.
    #[must_use]
    pub fn top_accent_attachment(&self, glyph: GlyphId) -> Option<i16> {
        self.top_accent_attachments.get(&glyph).copied()
    }

    /// Vertical variants of `glyph`. A glyph without variants is its own
    /// only variant.
    #[must_use]
    pub fn vertical_variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        variants_of(&self.vertical, glyph)
    }

    /// Horizontal variants of `glyph`. A glyph without variants is its own
    /// only variant.
    #[must_use]
    pub fn horizontal_variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        variants_of(&self.horizontal, glyph)
    }

    /// Parts of the vertical assembly of `glyph`, if the font defines one.
    #[must_use]
    pub fn vertical_assembly(&self, glyph: GlyphId) -> Option<&[GlyphPartRecord]> {
        self.vertical
            .get(&glyph)
            .and_then(|construction| construction.assembly.as_deref())
    }

    /// Minimum overlap of connecting parts, in design units.
    #[must_use]
    pub const fn min_connector_overlap(&self) -> u16 {
        self.min_connector_overlap
    }
}

fn variants_of(table: &HashMap<GlyphId, GlyphConstruction>, glyph: GlyphId) -> Vec<GlyphId> {
    match table.get(&glyph) {
        Some(construction) if !construction.variants.is_empty() => construction.variants.clone(),
        _ => vec![glyph],
    }
}

fn read_constants(reader: &mut Reader<'_>, offset: usize) -> Result<Vec<i32>, MathTableError> {
    reader.seek(offset);
    let mut constants = Vec::with_capacity(MathConstant::COUNT);
    for constant in MathConstant::iter() {
        let value = match constant.format() {
            RecordFormat::Int16 => i32::from(reader.i16()?),
            RecordFormat::Uint16 => i32::from(reader.u16()?),
            RecordFormat::MathValueRecord => i32::from(reader.value_record()?),
        };
        constants.push(value);
    }
    Ok(constants)
}

/// Read the glyph ids listed by a coverage table, in coverage index order.
fn read_coverage(reader: &mut Reader<'_>, offset: usize) -> Result<Vec<GlyphId>, MathTableError> {
    reader.seek(offset);
    let format = reader.u16()?;
    match format {
        1 => {
            let count = reader.u16()?;
            (0..count).map(|_| reader.u16()).collect()
        }
        2 => {
            let range_count = reader.u16()?;
            let mut glyphs = Vec::new();
            for _ in 0..range_count {
                let start = reader.u16()?;
                let end = reader.u16()?;
                let start_index = usize::from(reader.u16()?);
                for (i, glyph) in (start..=end).enumerate() {
                    let index = start_index + i;
                    if glyphs.len() <= index {
                        glyphs.resize(index + 1, 0);
                    }
                    glyphs[index] = glyph;
                }
            }
            Ok(glyphs)
        }
        format => Err(MathTableError::UnsupportedCoverageFormat { format }),
    }
}

/// Read a coverage-keyed table of MathValueRecords (italic corrections or
/// top accent attachments).
fn read_matched_table(
    reader: &mut Reader<'_>,
    offset: usize,
) -> Result<HashMap<GlyphId, i16>, MathTableError> {
    reader.seek(offset);
    let coverage_offset = reader.offset(offset)?;
    let count = usize::from(reader.u16()?);
    let records_start = reader.position;
    let coverage = read_coverage(reader, coverage_offset)?;

    reader.seek(records_start);
    let mut table = HashMap::with_capacity(count);
    for glyph in coverage.into_iter().take(count) {
        table.insert(glyph, reader.value_record()?);
    }
    Ok(table)
}

fn read_construction(
    reader: &mut Reader<'_>,
    offset: usize,
) -> Result<GlyphConstruction, MathTableError> {
    reader.seek(offset);
    let assembly_offset = reader.u16()?;
    let variant_count = reader.u16()?;
    let mut variants = Vec::with_capacity(usize::from(variant_count));
    for _ in 0..variant_count {
        variants.push(reader.u16()?);
        // advance measurement
        reader.u16()?;
    }
    let assembly = if assembly_offset == 0 {
        None
    } else {
        Some(read_assembly(reader, offset + usize::from(assembly_offset))?)
    };
    Ok(GlyphConstruction { variants, assembly })
}

fn read_assembly(
    reader: &mut Reader<'_>,
    offset: usize,
) -> Result<Vec<GlyphPartRecord>, MathTableError> {
    reader.seek(offset);
    // italics correction of the assembly
    reader.value_record()?;
    let part_count = reader.u16()?;
    let mut parts = Vec::with_capacity(usize::from(part_count));
    for _ in 0..part_count {
        parts.push(GlyphPartRecord {
            glyph: reader.u16()?,
            start_connector_length: reader.u16()?,
            end_connector_length: reader.u16()?,
            full_advance: reader.u16()?,
            part_flags: reader.u16()?,
        });
    }
    Ok(parts)
}
