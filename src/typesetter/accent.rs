//! Math accents (TeXbook rule 12).

use super::{LayoutError, Typesetter};
use crate::display::{AccentDisplay, Display};
use crate::font_metrics::{GlyphId, MathConstant};
use crate::math_list::{Atom, AtomType, MathList};
use crate::types::Point;
use crate::wide_character::change_font;

/// Returns `true` if the accent sits on one plain character without
/// scripts, the case where the font's attachment points apply.
fn is_single_char_accentee(list: &MathList) -> bool {
    let [atom] = list.atoms() else {
        return false;
    };
    atom.nucleus.chars().count() == 1 && !atom.has_scripts()
}

/// The character an atom's nucleus is drawn with.
fn drawn_char(atom: &Atom) -> Option<char> {
    match atom.atom_type() {
        AtomType::Variable | AtomType::Number => change_font(&atom.nucleus, atom.font_style).chars().next(),
        _ => atom.nucleus.chars().next(),
    }
}

impl Typesetter {
    /// Horizontal offset of the accent from the accentee's origin.
    fn accent_skew(&self, list: &MathList, accentee_width: f32, accent_glyph: GlyphId) -> f32 {
        let accent_adjustment = self.style_font.top_accent_adjustment(accent_glyph);
        let accentee_adjustment = match list.atoms().first().and_then(drawn_char) {
            Some(ch) if is_single_char_accentee(list) => {
                self.style_font.top_accent_adjustment(self.style_font.glyph_for_char(ch))
            }
            _ => accentee_width / 2.0,
        };
        accentee_adjustment - accent_adjustment
    }

    /// Lay out `atom`, an accent over `list`.
    ///
    /// Scripts on an accented single character move onto the character;
    /// the returned flag tells whether that happened.
    pub(super) fn make_accent(&self, atom: &Atom, list: &MathList) -> Result<(Display, bool), LayoutError> {
        let mut accentee = self.sub_line(list, self.style, true, false)?;
        let Some(accent_char) = atom.nucleus.chars().next() else {
            return Ok((accentee, false));
        };

        let accent_glyph = self.style_font.glyph_for_char(accent_char);
        let accent = self.find_variant_glyph(accent_glyph, accentee.width);
        let delta = f32::min(accentee.ascent, self.constant(MathConstant::AccentBaseHeight));
        let skew = self.accent_skew(list, accentee.width, accent.glyph);
        let accent_offset = Point::new(skew, accentee.ascent - delta);
        let accent_display = Display::glyph(
            accent.glyph,
            self.style_font.clone(),
            accent.ascent,
            accent.descent,
            accent.width,
            atom.index_range,
        );

        let scripts_moved = is_single_char_accentee(list) && atom.has_scripts();
        if scripts_moved && let Some(base) = list.atoms().first() {
            let mut base = base.clone();
            base.set_superscript(atom.superscript().cloned());
            base.set_subscript(atom.subscript().cloned());
            // Cramping does not change a single character's height, so the
            // accent keeps its place.
            accentee = self.sub_line(&MathList::from_atoms(vec![base]), self.style, self.cramped, false)?;
        }

        let ascent = f32::max(accentee.ascent, accentee.ascent - delta + accent.ascent);
        let display = Display::accent(
            AccentDisplay {
                accentee,
                accent: accent_display,
                accent_offset,
            },
            ascent,
            atom.index_range,
        );
        Ok((display, scripts_moved))
    }
}
