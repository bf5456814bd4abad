//! Line styles and the transitions between them
//!
//! TeX lays out a formula in one of four styles. Each style shrinks the
//! font relative to the previous one, and sub-formulas such as scripts and
//! fraction parts move to a tighter style than their parent.

use strum::{AsRefStr, EnumIter};

/// The rendering scale of a math list.
///
/// Ordered from largest to smallest, so `style >= LineStyle::Script`
/// reads as "script size or smaller".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LineStyle {
    /// Display style, used for formulas set on their own line.
    Display,
    /// Text style, used for inline formulas.
    #[default]
    Text,
    /// Script style, for first-level sub- and superscripts.
    Script,
    /// ScriptScript style, for second-level scripts and beyond.
    ScriptScript,
}

impl LineStyle {
    /// Get the style of a superscript or subscript given a base in the
    /// current style.
    #[must_use]
    pub const fn script(self) -> Self {
        match self {
            Self::Display | Self::Text => Self::Script,
            Self::Script | Self::ScriptScript => Self::ScriptScript,
        }
    }

    /// Get the style of a fraction numerator or denominator given the
    /// fraction in the current style.
    #[must_use]
    pub const fn fraction(self) -> Self {
        match self {
            Self::Display => Self::Text,
            Self::Text => Self::Script,
            Self::Script | Self::ScriptScript => Self::ScriptScript,
        }
    }

    /// Return true if this style is tightly spaced
    /// (scriptstyle/scriptscriptstyle)
    #[must_use]
    pub const fn is_tight(self) -> bool {
        matches!(self, Self::Script | Self::ScriptScript)
    }

    /// The LaTeX command selecting this style, without the backslash.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Display => "displaystyle",
            Self::Text => "textstyle",
            Self::Script => "scriptstyle",
            Self::ScriptScript => "scriptscriptstyle",
        }
    }
}
