//! Superscripts and subscripts (TeXbook rules 18a-f).

use super::{LayoutError, Typesetter};
use crate::display::{DisplayKind, LinePosition};
use crate::font_metrics::MathConstant;
use crate::math_list::{Atom, AtomKind};
use crate::types::Point;

impl Typesetter {
    fn superscript_shift_up(&self) -> f32 {
        if self.cramped {
            self.constant(MathConstant::SuperscriptShiftUpCramped)
        } else {
            self.constant(MathConstant::SuperscriptShiftUp)
        }
    }

    /// Lay out the scripts of `atom` after its nucleus, the display at
    /// `nucleus` in the current line. The cursor must already be past the
    /// nucleus. `delta` is the italic correction of the nucleus: it moves
    /// the superscript right when both scripts are present.
    pub(super) fn make_scripts(
        &mut self,
        atom: &Atom,
        nucleus: Option<usize>,
        delta: f32,
    ) -> Result<(), LayoutError> {
        let mut superscript_shift_up = 0.0;
        let mut subscript_shift_down = 0.0;

        if let Some(index) = nucleus {
            let display = &mut self.displays[index];
            display.has_script = true;
            // Text keeps its scripts at the standard shifts; boxes drop them
            // relative to their own extent.
            if !matches!(display.kind, DisplayKind::TextRun(_)) {
                let (ascent, descent) = (display.ascent, display.descent);
                let script_font = self.font.with_size(self.font.style_size(self.style.script()));
                superscript_shift_up = ascent - script_font.constant(MathConstant::SuperscriptBaselineDropMax);
                subscript_shift_down = descent + script_font.constant(MathConstant::SubscriptBaselineDropMin);
            }
        }

        // Scripts are numbered after the last character of a text nucleus.
        let script_index = if matches!(atom.kind(), AtomKind::Plain) {
            atom.index_range.max_range().saturating_sub(1)
        } else {
            atom.index_range.location
        };
        let script_style = self.style.script();
        let space_after_script = self.constant(MathConstant::SpaceAfterScript);

        let Some(superscript) = atom.superscript() else {
            let Some(subscript) = atom.subscript() else {
                return Ok(());
            };
            let mut subscript = self.sub_line(subscript, script_style, true, false)?;
            subscript.set_line_position(LinePosition::Subscript, Some(script_index));
            subscript_shift_down = f32::max(subscript_shift_down, self.constant(MathConstant::SubscriptShiftDown));
            subscript_shift_down = f32::max(
                subscript_shift_down,
                subscript.ascent - self.constant(MathConstant::SubscriptTopMax),
            );
            subscript.set_position(Point::new(self.cursor, -subscript_shift_down));
            self.cursor += subscript.width + space_after_script;
            self.displays.push(subscript);
            return Ok(());
        };

        let mut superscript = self.sub_line(superscript, script_style, self.cramped, false)?;
        superscript.set_line_position(LinePosition::Superscript, Some(script_index));
        superscript_shift_up = f32::max(superscript_shift_up, self.superscript_shift_up());
        superscript_shift_up = f32::max(
            superscript_shift_up,
            superscript.descent + self.constant(MathConstant::SuperscriptBottomMin),
        );

        let Some(subscript) = atom.subscript() else {
            superscript.set_position(Point::new(self.cursor, superscript_shift_up));
            self.cursor += superscript.width + space_after_script;
            self.displays.push(superscript);
            return Ok(());
        };

        let mut subscript = self.sub_line(subscript, script_style, true, false)?;
        subscript.set_line_position(LinePosition::Subscript, Some(script_index));
        subscript_shift_down = f32::max(subscript_shift_down, self.constant(MathConstant::SubscriptShiftDown));

        // Rule 18e: keep a minimum gap between the two scripts, raising the
        // superscript as far as its bottom limit allows.
        let gap = (superscript_shift_up - superscript.descent) + (subscript_shift_down - subscript.ascent);
        let gap_min = self.constant(MathConstant::SubSuperscriptGapMin);
        if gap < gap_min {
            subscript_shift_down += gap_min - gap;
            let bottom_delta = self.constant(MathConstant::SuperscriptBottomMaxWithSubscript)
                - (superscript_shift_up - superscript.descent);
            if bottom_delta > 0.0 {
                superscript_shift_up += bottom_delta;
                subscript_shift_down -= bottom_delta;
            }
        }

        superscript.set_position(Point::new(self.cursor + delta, superscript_shift_up));
        subscript.set_position(Point::new(self.cursor, -subscript_shift_down));
        self.cursor += f32::max(superscript.width + delta, subscript.width) + space_after_script;
        self.displays.push(superscript);
        self.displays.push(subscript);
        Ok(())
    }
}
