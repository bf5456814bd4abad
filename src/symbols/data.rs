//! Static command tables.
//!
//! Non-ASCII nuclei are written as `\u{..}` escapes so the tables can be
//! audited against the Unicode charts.

use phf::{Map, phf_map};

use crate::math_list::AtomType;
use crate::style::LineStyle;
use crate::types::FontStyle;

/// Prototype of the atom a command produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolDef {
    /// A plain atom with the given type and nucleus.
    Atom(AtomType, &'static str),
    /// A large operator; the flag selects limits in display style.
    LargeOperator(&'static str, bool),
    /// Fixed space in math units.
    Space(f32),
    /// A line-style switch.
    Style(LineStyle),
}

/// Nucleus of `\times`.
pub const MULTIPLICATION: &str = "\u{00D7}";
/// Nucleus of `\div`.
pub const DIVISION: &str = "\u{00F7}";
/// Nucleus of placeholder atoms.
pub const WHITE_SQUARE: &str = "\u{25A1}";
/// Nucleus the parser gives to `-`.
pub const MINUS: &str = "\u{2212}";
/// Nucleus the parser gives to `:`.
pub const RATIO: &str = "\u{2236}";

use AtomType::{
    BinaryOperator as Bin, Close, Open, Ordinary, Placeholder, Punctuation as Punct,
    Relation as Rel, Variable as Var,
};
use SymbolDef::{Atom as A, LargeOperator as Op, Space, Style};

/// Every command that maps directly to an atom.
pub static SYMBOLS: Map<&'static str, SymbolDef> = phf_map! {
    "square" => A(Placeholder, WHITE_SQUARE),

    // Greek
    "alpha" => A(Var, "\u{03B1}"),
    "beta" => A(Var, "\u{03B2}"),
    "gamma" => A(Var, "\u{03B3}"),
    "delta" => A(Var, "\u{03B4}"),
    "varepsilon" => A(Var, "\u{03B5}"),
    "zeta" => A(Var, "\u{03B6}"),
    "eta" => A(Var, "\u{03B7}"),
    "theta" => A(Var, "\u{03B8}"),
    "iota" => A(Var, "\u{03B9}"),
    "kappa" => A(Var, "\u{03BA}"),
    "lambda" => A(Var, "\u{03BB}"),
    "mu" => A(Var, "\u{03BC}"),
    "nu" => A(Var, "\u{03BD}"),
    "xi" => A(Var, "\u{03BE}"),
    "omicron" => A(Var, "\u{03BF}"),
    "pi" => A(Var, "\u{03C0}"),
    "rho" => A(Var, "\u{03C1}"),
    "varsigma" => A(Var, "\u{03C2}"),
    "sigma" => A(Var, "\u{03C3}"),
    "tau" => A(Var, "\u{03C4}"),
    "upsilon" => A(Var, "\u{03C5}"),
    "varphi" => A(Var, "\u{03C6}"),
    "chi" => A(Var, "\u{03C7}"),
    "psi" => A(Var, "\u{03C8}"),
    "omega" => A(Var, "\u{03C9}"),
    "vartheta" => A(Var, "\u{03D1}"),
    "phi" => A(Var, "\u{03D5}"),
    "varpi" => A(Var, "\u{03D6}"),
    "varkappa" => A(Var, "\u{03F0}"),
    "varrho" => A(Var, "\u{03F1}"),
    "epsilon" => A(Var, "\u{03F5}"),
    "Gamma" => A(Var, "\u{0393}"),
    "Delta" => A(Var, "\u{0394}"),
    "Theta" => A(Var, "\u{0398}"),
    "Lambda" => A(Var, "\u{039B}"),
    "Xi" => A(Var, "\u{039E}"),
    "Pi" => A(Var, "\u{03A0}"),
    "Sigma" => A(Var, "\u{03A3}"),
    "Upsilon" => A(Var, "\u{03A5}"),
    "Phi" => A(Var, "\u{03A6}"),
    "Psi" => A(Var, "\u{03A8}"),
    "Omega" => A(Var, "\u{03A9}"),

    "lceil" => A(Open, "\u{2308}"),
    "lfloor" => A(Open, "\u{230A}"),
    "langle" => A(Open, "\u{27E8}"),
    "lgroup" => A(Open, "\u{27EE}"),
    "rceil" => A(Close, "\u{2309}"),
    "rfloor" => A(Close, "\u{230B}"),
    "rangle" => A(Close, "\u{27E9}"),
    "rgroup" => A(Close, "\u{27EF}"),

    // Arrows
    "leftarrow" => A(Rel, "\u{2190}"),
    "uparrow" => A(Rel, "\u{2191}"),
    "rightarrow" => A(Rel, "\u{2192}"),
    "downarrow" => A(Rel, "\u{2193}"),
    "leftrightarrow" => A(Rel, "\u{2194}"),
    "updownarrow" => A(Rel, "\u{2195}"),
    "nwarrow" => A(Rel, "\u{2196}"),
    "nearrow" => A(Rel, "\u{2197}"),
    "searrow" => A(Rel, "\u{2198}"),
    "swarrow" => A(Rel, "\u{2199}"),
    "mapsto" => A(Rel, "\u{21A6}"),
    "Leftarrow" => A(Rel, "\u{21D0}"),
    "Uparrow" => A(Rel, "\u{21D1}"),
    "Rightarrow" => A(Rel, "\u{21D2}"),
    "Downarrow" => A(Rel, "\u{21D3}"),
    "Leftrightarrow" => A(Rel, "\u{21D4}"),
    "Updownarrow" => A(Rel, "\u{21D5}"),
    "longleftarrow" => A(Rel, "\u{27F5}"),
    "longrightarrow" => A(Rel, "\u{27F6}"),
    "longleftrightarrow" => A(Rel, "\u{27F7}"),
    "Longleftarrow" => A(Rel, "\u{27F8}"),
    "Longrightarrow" => A(Rel, "\u{27F9}"),
    "Longleftrightarrow" => A(Rel, "\u{27FA}"),

    // Relations
    "leq" => A(Rel, "\u{2264}"),
    "geq" => A(Rel, "\u{2265}"),
    "neq" => A(Rel, "\u{2260}"),
    "in" => A(Rel, "\u{2208}"),
    "notin" => A(Rel, "\u{2209}"),
    "ni" => A(Rel, "\u{220B}"),
    "propto" => A(Rel, "\u{221D}"),
    "mid" => A(Rel, "\u{2223}"),
    "parallel" => A(Rel, "\u{2225}"),
    "sim" => A(Rel, "\u{223C}"),
    "simeq" => A(Rel, "\u{2243}"),
    "cong" => A(Rel, "\u{2245}"),
    "approx" => A(Rel, "\u{2248}"),
    "asymp" => A(Rel, "\u{224D}"),
    "doteq" => A(Rel, "\u{2250}"),
    "equiv" => A(Rel, "\u{2261}"),
    "ll" => A(Rel, "\u{226A}"),
    "gg" => A(Rel, "\u{226B}"),
    "prec" => A(Rel, "\u{227A}"),
    "succ" => A(Rel, "\u{227B}"),
    "subset" => A(Rel, "\u{2282}"),
    "supset" => A(Rel, "\u{2283}"),
    "subseteq" => A(Rel, "\u{2286}"),
    "supseteq" => A(Rel, "\u{2287}"),
    "sqsubset" => A(Rel, "\u{228F}"),
    "sqsupset" => A(Rel, "\u{2290}"),
    "sqsubseteq" => A(Rel, "\u{2291}"),
    "sqsupseteq" => A(Rel, "\u{2292}"),
    "models" => A(Rel, "\u{22A7}"),
    "perp" => A(Rel, "\u{27C2}"),

    // Binary operators
    "times" => A(Bin, MULTIPLICATION),
    "div" => A(Bin, DIVISION),
    "pm" => A(Bin, "\u{00B1}"),
    "dagger" => A(Bin, "\u{2020}"),
    "ddagger" => A(Bin, "\u{2021}"),
    "mp" => A(Bin, "\u{2213}"),
    "setminus" => A(Bin, "\u{2216}"),
    "ast" => A(Bin, "\u{2217}"),
    "circ" => A(Bin, "\u{2218}"),
    "bullet" => A(Bin, "\u{2219}"),
    "wedge" => A(Bin, "\u{2227}"),
    "vee" => A(Bin, "\u{2228}"),
    "cap" => A(Bin, "\u{2229}"),
    "cup" => A(Bin, "\u{222A}"),
    "wr" => A(Bin, "\u{2240}"),
    "uplus" => A(Bin, "\u{228E}"),
    "sqcap" => A(Bin, "\u{2293}"),
    "sqcup" => A(Bin, "\u{2294}"),
    "oplus" => A(Bin, "\u{2295}"),
    "ominus" => A(Bin, "\u{2296}"),
    "otimes" => A(Bin, "\u{2297}"),
    "oslash" => A(Bin, "\u{2298}"),
    "odot" => A(Bin, "\u{2299}"),
    "star" => A(Bin, "\u{22C6}"),
    "cdot" => A(Bin, "\u{22C5}"),
    "amalg" => A(Bin, "\u{2A3F}"),

    // Named functions
    "log" => Op("log", false),
    "lg" => Op("lg", false),
    "ln" => Op("ln", false),
    "sin" => Op("sin", false),
    "arcsin" => Op("arcsin", false),
    "sinh" => Op("sinh", false),
    "cos" => Op("cos", false),
    "arccos" => Op("arccos", false),
    "cosh" => Op("cosh", false),
    "tan" => Op("tan", false),
    "arctan" => Op("arctan", false),
    "tanh" => Op("tanh", false),
    "cot" => Op("cot", false),
    "coth" => Op("coth", false),
    "sec" => Op("sec", false),
    "csc" => Op("csc", false),
    "arg" => Op("arg", false),
    "ker" => Op("ker", false),
    "dim" => Op("dim", false),
    "hom" => Op("hom", false),
    "exp" => Op("exp", false),
    "deg" => Op("deg", false),
    "lim" => Op("lim", true),
    "limsup" => Op("lim sup", true),
    "liminf" => Op("lim inf", true),
    "max" => Op("max", true),
    "min" => Op("min", true),
    "sup" => Op("sup", true),
    "inf" => Op("inf", true),
    "det" => Op("det", true),
    "Pr" => Op("Pr", true),
    "gcd" => Op("gcd", true),

    // Large operators
    "prod" => Op("\u{220F}", true),
    "coprod" => Op("\u{2210}", true),
    "sum" => Op("\u{2211}", true),
    "int" => Op("\u{222B}", false),
    "oint" => Op("\u{222E}", false),
    "bigwedge" => Op("\u{22C0}", true),
    "bigvee" => Op("\u{22C1}", true),
    "bigcap" => Op("\u{22C2}", true),
    "bigcup" => Op("\u{22C3}", true),
    "bigodot" => Op("\u{2A00}", true),
    "bigoplus" => Op("\u{2A01}", true),
    "bigotimes" => Op("\u{2A02}", true),
    "biguplus" => Op("\u{2A04}", true),
    "bigsqcup" => Op("\u{2A06}", true),

    // Escaped control characters
    "{" => A(Open, "{"),
    "}" => A(Close, "}"),
    "$" => A(Ordinary, "$"),
    "&" => A(Ordinary, "&"),
    "#" => A(Ordinary, "#"),
    "%" => A(Ordinary, "%"),
    "_" => A(Ordinary, "_"),
    " " => A(Ordinary, " "),
    "backslash" => A(Ordinary, "\\"),

    // `\colon` is punctuation, a bare `:` is a relation.
    "colon" => A(Punct, ":"),
    "cdotp" => A(Punct, "\u{00B7}"),

    "degree" => A(Ordinary, "\u{00B0}"),
    "neg" => A(Ordinary, "\u{00AC}"),
    "angstrom" => A(Ordinary, "\u{00C5}"),
    "|" => A(Ordinary, "\u{2016}"),
    "vert" => A(Ordinary, "|"),
    "ldots" => A(Ordinary, "\u{2026}"),
    "prime" => A(Ordinary, "\u{2032}"),
    "hbar" => A(Ordinary, "\u{210F}"),
    "Im" => A(Ordinary, "\u{2111}"),
    "ell" => A(Ordinary, "\u{2113}"),
    "wp" => A(Ordinary, "\u{2118}"),
    "Re" => A(Ordinary, "\u{211C}"),
    "mho" => A(Ordinary, "\u{2127}"),
    "aleph" => A(Ordinary, "\u{2135}"),
    "forall" => A(Ordinary, "\u{2200}"),
    "exists" => A(Ordinary, "\u{2203}"),
    "emptyset" => A(Ordinary, "\u{2205}"),
    "nabla" => A(Ordinary, "\u{2207}"),
    "infty" => A(Ordinary, "\u{221E}"),
    "angle" => A(Ordinary, "\u{2220}"),
    "top" => A(Ordinary, "\u{22A4}"),
    "bot" => A(Ordinary, "\u{22A5}"),
    "vdots" => A(Ordinary, "\u{22EE}"),
    "cdots" => A(Ordinary, "\u{22EF}"),
    "ddots" => A(Ordinary, "\u{22F1}"),
    "triangle" => A(Ordinary, "\u{25B3}"),
    // Outside the BMP
    "imath" => A(Ordinary, "\u{1D6A4}"),
    "jmath" => A(Ordinary, "\u{1D6A5}"),
    "partial" => A(Ordinary, "\u{1D6F5}"),

    // Spacing, in mu
    "," => Space(3.0),
    ">" => Space(4.0),
    ";" => Space(5.0),
    "!" => Space(-3.0),
    "quad" => Space(18.0),
    "qquad" => Space(36.0),

    "displaystyle" => Style(LineStyle::Display),
    "textstyle" => Style(LineStyle::Text),
    "scriptstyle" => Style(LineStyle::Script),
    "scriptscriptstyle" => Style(LineStyle::ScriptScript),
};

/// Alternative spellings resolved before a symbol lookup.
pub static ALIASES: Map<&'static str, &'static str> = phf_map! {
    "lnot" => "neg",
    "land" => "wedge",
    "lor" => "vee",
    "ne" => "neq",
    "le" => "leq",
    "ge" => "geq",
    "lbrace" => "{",
    "rbrace" => "}",
    "Vert" => "|",
    "gets" => "leftarrow",
    "to" => "rightarrow",
    "iff" => "Longleftrightarrow",
    "AA" => "angstrom",
};

/// Accent commands and the combining character each one places.
pub static ACCENTS: Map<&'static str, &'static str> = phf_map! {
    "grave" => "\u{0300}",
    "acute" => "\u{0301}",
    "hat" => "\u{0302}",
    "tilde" => "\u{0303}",
    "bar" => "\u{0304}",
    "breve" => "\u{0306}",
    "dot" => "\u{0307}",
    "ddot" => "\u{0308}",
    "check" => "\u{030C}",
    "vec" => "\u{20D7}",
    "widehat" => "\u{0302}",
    "widetilde" => "\u{0303}",
};

/// Delimiter names accepted after `\left` and `\right`. `.` is the empty
/// delimiter.
pub static DELIMITERS: Map<&'static str, &'static str> = phf_map! {
    "." => "",
    "(" => "(",
    ")" => ")",
    "[" => "[",
    "]" => "]",
    "<" => "\u{2329}",
    ">" => "\u{232A}",
    "/" => "/",
    "\\" => "\\",
    "|" => "|",
    "lgroup" => "\u{27EE}",
    "rgroup" => "\u{27EF}",
    "||" => "\u{2016}",
    "Vert" => "\u{2016}",
    "vert" => "|",
    "uparrow" => "\u{2191}",
    "downarrow" => "\u{2193}",
    "updownarrow" => "\u{2195}",
    "Uparrow" => "\u{21D1}",
    "Downarrow" => "\u{21D3}",
    "Updownarrow" => "\u{21D5}",
    "backslash" => "\\",
    "rangle" => "\u{232A}",
    "langle" => "\u{2329}",
    "rbrace" => "}",
    "}" => "}",
    "{" => "{",
    "lbrace" => "{",
    "lceil" => "\u{2308}",
    "rceil" => "\u{2309}",
    "lfloor" => "\u{230A}",
    "rfloor" => "\u{230B}",
};

/// Font-style commands.
pub static FONT_STYLES: Map<&'static str, FontStyle> = phf_map! {
    "mathnormal" => FontStyle::Default,
    "mathrm" => FontStyle::Roman,
    "textrm" => FontStyle::Roman,
    "rm" => FontStyle::Roman,
    "mathbf" => FontStyle::Bold,
    "bf" => FontStyle::Bold,
    "textbf" => FontStyle::Bold,
    "mathcal" => FontStyle::Caligraphic,
    "cal" => FontStyle::Caligraphic,
    "mathtt" => FontStyle::Typewriter,
    "texttt" => FontStyle::Typewriter,
    "mathit" => FontStyle::Italic,
    "textit" => FontStyle::Italic,
    "mit" => FontStyle::Italic,
    "mathsf" => FontStyle::SansSerif,
    "textsf" => FontStyle::SansSerif,
    "mathfrak" => FontStyle::Fraktur,
    "frak" => FontStyle::Fraktur,
    "mathbb" => FontStyle::Blackboard,
    "mathbfit" => FontStyle::BoldItalic,
    "bm" => FontStyle::BoldItalic,
    "text" => FontStyle::Roman,
};
