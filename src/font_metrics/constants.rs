//! Named records of the OpenType `MathConstants` table.

use strum::{AsRefStr, EnumCount, EnumIter};

/// One record of the `MathConstants` table, in table order.
///
/// The discriminant is the record's position in the table, so
/// `constant as usize` indexes the decoded values. Names follow the
/// OpenType MATH specification.
///
/// # Cross-references
/// - Decoded by [`super::MathTable::parse`].
/// - Read in points through [`super::MathFont::constant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, AsRefStr)]
#[allow(missing_docs)]
pub enum MathConstant {
    ScriptPercentScaleDown,
    ScriptScriptPercentScaleDown,
    DelimitedSubFormulaMinHeight,
    DisplayOperatorMinHeight,
    MathLeading,
    AxisHeight,
    AccentBaseHeight,
    FlattenedAccentBaseHeight,
    SubscriptShiftDown,
    SubscriptTopMax,
    SubscriptBaselineDropMin,
    SuperscriptShiftUp,
    SuperscriptShiftUpCramped,
    SuperscriptBottomMin,
    SuperscriptBaselineDropMax,
    SubSuperscriptGapMin,
    SuperscriptBottomMaxWithSubscript,
    SpaceAfterScript,
    UpperLimitGapMin,
    UpperLimitBaselineRiseMin,
    LowerLimitGapMin,
    LowerLimitBaselineDropMin,
    StackTopShiftUp,
    StackTopDisplayStyleShiftUp,
    StackBottomShiftDown,
    StackBottomDisplayStyleShiftDown,
    StackGapMin,
    StackDisplayStyleGapMin,
    StretchStackTopShiftUp,
    StretchStackBottomShiftDown,
    StretchStackGapAboveMin,
    StretchStackGapBelowMin,
    FractionNumeratorShiftUp,
    FractionNumeratorDisplayStyleShiftUp,
    FractionDenominatorShiftDown,
    FractionDenominatorDisplayStyleShiftDown,
    FractionNumeratorGapMin,
    FractionNumDisplayStyleGapMin,
    FractionRuleThickness,
    FractionDenominatorGapMin,
    FractionDenomDisplayStyleGapMin,
    SkewedFractionHorizontalGap,
    SkewedFractionVerticalGap,
    OverbarVerticalGap,
    OverbarRuleThickness,
    OverbarExtraAscender,
    UnderbarVerticalGap,
    UnderbarRuleThickness,
    UnderbarExtraDescender,
    RadicalVerticalGap,
    RadicalDisplayStyleVerticalGap,
    RadicalRuleThickness,
    RadicalExtraAscender,
    RadicalKernBeforeDegree,
    RadicalKernAfterDegree,
    RadicalDegreeBottomRaisePercent,
}

/// Binary encoding of a constant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A bare signed 16-bit value.
    Int16,
    /// A bare unsigned 16-bit value.
    Uint16,
    /// A signed value followed by a device table offset.
    MathValueRecord,
}

impl RecordFormat {
    /// Bytes occupied by one record.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Int16 | Self::Uint16 => 2,
            Self::MathValueRecord => 4,
        }
    }
}

impl MathConstant {
    /// How this record is stored in the table.
    #[must_use]
    pub const fn format(self) -> RecordFormat {
        match self {
            Self::ScriptPercentScaleDown | Self::ScriptScriptPercentScaleDown => RecordFormat::Int16,
            Self::DelimitedSubFormulaMinHeight
            | Self::DisplayOperatorMinHeight
            | Self::RadicalDegreeBottomRaisePercent => RecordFormat::Uint16,
            _ => RecordFormat::MathValueRecord,
        }
    }

    /// Returns `true` for the constants stored as parts per hundred rather
    /// than design units.
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(
            self,
            Self::ScriptPercentScaleDown
                | Self::ScriptScriptPercentScaleDown
                | Self::RadicalDegreeBottomRaisePercent
        )
    }
}
