#![allow(dead_code)]

#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;
use std::panic::{UnwindSafe, catch_unwind};
use std::sync::OnceLock;

#[cfg(feature = "backtrace")]
use btparse::deserialize;
use strum::IntoEnumIterator as _;

use mathlayout::{
    ParseError, ParseErrorKind, RenderError, Settings,
    display::Display,
    font_metrics::{BoundingBox, FontCache, GlyphBackend, GlyphId, MathConstant, RecordFormat},
    latex::to_latex,
    math_list::MathList,
    parser::build,
    render,
    symbols::SymbolTable,
    types::FontStyle,
    wide_character::styled_char,
};

static SYMBOLS: OnceLock<SymbolTable> = OnceLock::new();
static FONTS: OnceLock<FontCache> = OnceLock::new();

pub fn symbols() -> &'static SymbolTable {
    SYMBOLS.get_or_init(SymbolTable::new)
}

/// A cache holding the fake font under the default font name.
pub fn fonts() -> &'static FontCache {
    FONTS.get_or_init(|| {
        let mut fonts = FontCache::new();
        fonts
            .register(mathlayout::types::DEFAULT_FONT_NAME, FakeBackend::new(), &math_table())
            .unwrap();
        fonts
    })
}

/// Every glyph is 500 units wide and 700 tall; operators and fences are
/// a little different so that spacing and delimiter tests are readable.
#[derive(Debug)]
pub struct FakeBackend {
    chars: Vec<char>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let mut chars: Vec<char> = (0x20_u8..0x7F).map(char::from).collect();
        let letters = ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain('\u{03B1}'..='\u{03C9}')
            .chain('\u{0391}'..='\u{03A9}');
        for ch in letters {
            for style in FontStyle::iter() {
                let styled = styled_char(ch, style);
                if !chars.contains(&styled) {
                    chars.push(styled);
                }
            }
        }
        chars.extend([
            '\u{2212}', '\u{00D7}', '\u{00B1}', '\u{2211}', '\u{220F}', '\u{222B}', '\u{221A}',
            '\u{221E}', '\u{2192}', '\u{2264}', '\u{2265}', '\u{2260}', '\u{2208}', '\u{2202}',
            '\u{27E8}', '\u{27E9}', '\u{0302}', '\u{0303}', '\u{20D7}', '\u{22C5}',
        ]);
        Self { chars }
    }

    fn char_of(&self, glyph: GlyphId) -> Option<char> {
        let index = usize::from(glyph).checked_sub(1)?;
        self.chars.get(index).copied()
    }
}

impl GlyphBackend for FakeBackend {
    fn units_per_em(&self) -> u16 {
        1000
    }

    fn glyph_for_char(&self, ch: char) -> GlyphId {
        self.chars
            .iter()
            .position(|&c| c == ch)
            .map_or(0, |i| GlyphId::try_from(i + 1).unwrap())
    }

    fn glyph_name(&self, glyph: GlyphId) -> Option<String> {
        self.char_of(glyph).map(|ch| format!("uni{:04X}", ch as u32))
    }

    fn glyph_for_name(&self, name: &str) -> GlyphId {
        name.strip_prefix("uni")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32)
            .map_or(0, |ch| self.glyph_for_char(ch))
    }

    fn advance(&self, glyph: GlyphId) -> i32 {
        match self.char_of(glyph) {
            None => 0,
            Some('+' | '=' | '\u{2212}') => 778,
            Some('\u{2211}' | '\u{220F}') => 900,
            Some('(' | ')' | '[' | ']' | '|') => 350,
            Some('\u{0302}' | '\u{0303}' | '\u{20D7}') => 0,
            Some(_) => 500,
        }
    }

    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox> {
        let bbox = match self.char_of(glyph)? {
            ' ' => return None,
            '(' | ')' | '[' | ']' | '|' => BoundingBox::new(50.0, -250.0, 300.0, 750.0),
            '\u{2211}' | '\u{220F}' => BoundingBox::new(50.0, -250.0, 850.0, 750.0),
            '\u{221A}' => BoundingBox::new(50.0, -350.0, 800.0, 650.0),
            '\u{0302}' | '\u{0303}' | '\u{20D7}' => BoundingBox::new(-300.0, 550.0, -50.0, 700.0),
            '+' | '=' | '\u{2212}' => BoundingBox::new(50.0, 50.0, 700.0, 450.0),
            _ => BoundingBox::new(20.0, 0.0, 480.0, 700.0),
        };
        Some(bbox)
    }
}

fn constant_value(constant: MathConstant) -> i16 {
    match constant {
        MathConstant::ScriptPercentScaleDown => 70,
        MathConstant::ScriptScriptPercentScaleDown => 50,
        MathConstant::DelimitedSubFormulaMinHeight | MathConstant::DisplayOperatorMinHeight => 1300,
        MathConstant::AxisHeight => 250,
        MathConstant::AccentBaseHeight => 450,
        MathConstant::SubscriptShiftDown => 247,
        MathConstant::SubscriptTopMax | MathConstant::SuperscriptBottomMaxWithSubscript => 344,
        MathConstant::SuperscriptShiftUp => 363,
        MathConstant::SuperscriptShiftUpCramped => 289,
        MathConstant::SuperscriptBottomMin => 108,
        MathConstant::SubSuperscriptGapMin => 160,
        MathConstant::SpaceAfterScript => 56,
        MathConstant::UpperLimitGapMin => 200,
        MathConstant::LowerLimitGapMin => 167,
        MathConstant::StackTopShiftUp | MathConstant::FractionNumeratorShiftUp => 394,
        MathConstant::StackTopDisplayStyleShiftUp | MathConstant::FractionNumeratorDisplayStyleShiftUp => 677,
        MathConstant::StackBottomShiftDown | MathConstant::FractionDenominatorShiftDown => 345,
        MathConstant::StackBottomDisplayStyleShiftDown
        | MathConstant::FractionDenominatorDisplayStyleShiftDown => 686,
        MathConstant::StackGapMin => 120,
        MathConstant::StackDisplayStyleGapMin => 280,
        MathConstant::FractionNumeratorGapMin | MathConstant::FractionDenominatorGapMin => 40,
        MathConstant::FractionNumDisplayStyleGapMin | MathConstant::FractionDenomDisplayStyleGapMin => 120,
        MathConstant::FractionRuleThickness
        | MathConstant::OverbarRuleThickness
        | MathConstant::UnderbarRuleThickness
        | MathConstant::RadicalRuleThickness => 40,
        MathConstant::OverbarVerticalGap | MathConstant::UnderbarVerticalGap => 120,
        MathConstant::RadicalVerticalGap => 50,
        MathConstant::RadicalDisplayStyleVerticalGap => 148,
        MathConstant::RadicalExtraAscender => 40,
        MathConstant::RadicalKernBeforeDegree => 278,
        MathConstant::RadicalKernAfterDegree => -556,
        MathConstant::RadicalDegreeBottomRaisePercent => 60,
        _ => 0,
    }
}

/// A `MATH` table with constants only: no glyph info and no variants.
pub fn math_table() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000_u32.to_be_bytes());
    let constants_offset: u16 = 10;
    let constants_len: usize = MathConstant::iter().map(|c| c.format().size()).sum();
    let glyph_info_offset = u16::try_from(10 + constants_len).unwrap();
    out.extend_from_slice(&constants_offset.to_be_bytes());
    out.extend_from_slice(&glyph_info_offset.to_be_bytes());
    out.extend_from_slice(&(glyph_info_offset + 4).to_be_bytes());
    for constant in MathConstant::iter() {
        out.extend_from_slice(&constant_value(constant).to_be_bytes());
        if constant.format() == RecordFormat::MathValueRecord {
            out.extend_from_slice(&[0, 0]);
        }
    }
    // Glyph info: no italic corrections, no accent attachments.
    out.extend_from_slice(&[0; 4]);
    // Variants: connector overlap, two coverage offsets, two counts.
    out.extend_from_slice(&[0; 10]);
    out
}

pub struct TestExpr {
    pub expr: String,
    pub file: &'static str,
    pub line: u32,
    pub code: &'static str,
}

impl TestExpr {
    pub fn parsed(&self) -> Result<MathList, ParseError> {
        build(symbols(), &self.expr)
    }

    pub fn to_parse(self) -> Result<(), RenderError> {
        self.parsed()?;
        Ok(())
    }

    pub fn not_to_parse(self) -> Result<(), RenderError> {
        match self.parsed() {
            Ok(list) => panic!(
                "{} ({}:{}) parsed to {list:?}",
                self.code, self.file, self.line
            ),
            Err(_) => Ok(()),
        }
    }

    pub fn to_fail_with(self, expected: &ParseErrorKind) -> Result<(), RenderError> {
        match self.parsed() {
            Ok(list) => panic!(
                "{} ({}:{}) parsed to {list:?}",
                self.code, self.file, self.line
            ),
            Err(err) => {
                assert_eq!(&*err.kind, expected, "{} ({}:{})", self.code, self.file, self.line);
                Ok(())
            }
        }
    }

    pub fn to_parse_like(self, other: &str) -> Result<(), RenderError> {
        let left = self.parsed()?;
        let right = build(symbols(), other)?;
        assert_eq!(
            left, right,
            "Math lists do not match between '{}' and '{other}'",
            self.expr
        );
        Ok(())
    }

    /// Serialize, then parse the LaTeX again; the list must survive.
    pub fn to_round_trip(self) -> Result<String, RenderError> {
        let list = self.parsed()?;
        let latex = to_latex(symbols(), &list);
        let reparsed = build(symbols(), &latex)?;
        assert_eq!(list, reparsed, "'{}' was written as '{latex}'", self.expr);
        Ok(latex)
    }

    pub fn to_latex(self) -> Result<String, RenderError> {
        Ok(to_latex(symbols(), &self.parsed()?))
    }

    pub fn to_render(self, settings: &Settings) -> Result<Display, RenderError> {
        render(symbols(), fonts(), &self.expr, settings)
    }
}

pub fn expect_impl(expr: &str, file: &'static str, line: u32, code: &'static str) -> TestExpr {
    TestExpr {
        expr: expr.to_owned(),
        file,
        line,
        code,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::setup::expect_impl($e, file!(), line!(), stringify!($e))
    };
}

#[cfg(feature = "backtrace")]
fn format_backtrace(bt_serialized: &Backtrace) -> String {
    let mut traces = Vec::new();
    let Ok(backtrace) = deserialize(bt_serialized) else {
        return String::new();
    };
    for frame in backtrace.frames {
        let function = frame.function;
        if function.starts_with("mathlayout::types::parse_error::ParseError")
            || function.starts_with("core::ops::function::FnOnce")
        {
            continue;
        }
        if function.starts_with("std::panicking") {
            break;
        }
        let loc = match (frame.file, frame.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file,
            _ => "<unknown>".to_owned(),
        };
        traces.push(format!("at {function} ({loc})"));
    }
    traces.join("\n")
}

#[cfg(feature = "backtrace")]
fn error_trace(err: &RenderError) -> String {
    match err {
        RenderError::Parse(err) => format_backtrace(&err.backtrace),
        _ => String::new(),
    }
}

#[cfg(not(feature = "backtrace"))]
fn error_trace(_: &RenderError) -> String {
    "<enable the backtrace feature>".to_owned()
}

pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), RenderError> + UnwindSafe,
{
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            panic!(
                "Test '{desc}' failed with Result::Err: {e}\nBacktrace:\n{}",
                error_trace(&e)
            );
        }
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

pub fn text_settings() -> Settings {
    Settings::builder().font_size(10.0).build()
}

pub fn display_settings() -> Settings {
    Settings::builder().font_size(10.0).display_mode(true).build()
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
