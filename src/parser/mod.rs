//! LaTeX math parser
//!
//! A hand-written recursive-descent reader over the characters of the
//! input. It never backtracks by more than one character. Each nested read
//! runs in one of three [`ReadMode`]s that decide when it returns control to
//! its caller.
//!
//! The parser produces a *raw* [`MathList`]; run [`MathList::finalized`]
//! before typesetting.

use core::mem;

use log::debug;

use crate::math_list::{Atom, AtomKind, AtomType, Fraction, Inner, MathList};
use crate::symbols::SymbolTable;
use crate::types::{FontStyle, ParseError, ParseErrorKind};

pub mod environment;

/// Result alias used throughout the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Commands made of a single non-letter character, e.g. `\{` or `\,`.
const SINGLE_CHAR_COMMANDS: &[char] = &[
    '{', '}', '$', '#', '%', '_', '|', ' ', ',', '>', ';', '!', '\\',
];

/// When a nested read hands control back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadMode {
    /// Read until the input is exhausted.
    Normal,
    /// Read a single atom, or a single braced group. `^ } _ &` are left
    /// unconsumed for the caller.
    OneChar,
    /// Read until the given character, which is consumed.
    Until(char),
}

/// State of the innermost `\begin .. \end` (or implicit) table.
#[derive(Debug, Clone, Default)]
struct EnvState {
    name: Option<String>,
    ended: bool,
    num_rows: usize,
}

/// Builds a raw [`MathList`] from a LaTeX string.
///
/// # Grammar
///
/// - `^` and `_` attach a one-atom script to the previous atom, inserting
///   an empty ordinary atom when there is none or it cannot take one.
/// - `{ .. }` groups; `\left .. \right` builds an inner atom.
/// - `\frac`, `\binom`, `\sqrt[n]`, `\overline`, `\underline`, accents,
///   `\color`, `\textcolor` and the font-style commands take one-atom
///   arguments.
/// - `\over`, `\atop`, `\choose`, `\brack` and `\brace` turn everything read
///   so far into a numerator.
/// - `&`, `\\` and `\cr` separate cells and rows; outside an environment
///   they start an implicit table.
///
/// # Error Handling
///
/// The first error aborts the whole build and is returned with the
/// character position at which it was detected.
///
/// # Cross-references
/// - [`SymbolTable`] resolves commands and characters.
/// - [`environment::table_with_environment`] shapes finished tables.
pub struct MathListBuilder<'a> {
    symbols: &'a SymbolTable,
    input: &'a str,
    chars: Vec<char>,
    position: usize,
    current_inner: Option<Inner>,
    current_env: Option<EnvState>,
    font_style: FontStyle,
    spaces_allowed: bool,
}

impl<'a> MathListBuilder<'a> {
    /// A builder over `input`.
    #[must_use]
    pub fn new(symbols: &'a SymbolTable, input: &'a str) -> Self {
        Self {
            symbols,
            input,
            chars: input.chars().collect(),
            position: 0,
            current_inner: None,
            current_env: None,
            font_style: FontStyle::Default,
            spaces_allowed: false,
        }
    }

    /// Parse the whole input.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] encountered, or
    /// [`ParseErrorKind::MismatchedBraces`] if input remains after the top
    /// level list is complete.
    pub fn build(mut self) -> ParseResult<MathList> {
        let list = self.build_internal(ReadMode::Normal)?;
        if self.has_characters() {
            return Err(self.error(ParseErrorKind::MismatchedBraces));
        }
        Ok(list)
    }

    fn error<K: Into<ParseErrorKind>>(&self, kind: K) -> ParseError {
        ParseError::at(kind, self.input, self.position)
    }

    const fn has_characters(&self) -> bool {
        self.position < self.chars.len()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.get(self.position).copied()?;
        self.position += 1;
        Some(ch)
    }

    const fn unget(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn build_internal(&mut self, mode: ReadMode) -> ParseResult<MathList> {
        let mut list = MathList::new();
        // Whether the last atom of `list` is the one a script or a limits
        // modifier applies to.
        let mut prev_is_last = false;

        while let Some(ch) = self.next_char() {
            if mode == ReadMode::OneChar && matches!(ch, '^' | '}' | '_' | '&') {
                self.unget();
                return Ok(list);
            }
            if mode == ReadMode::Until(ch) {
                return Ok(list);
            }

            let mut atom = match ch {
                '^' | '_' => {
                    let superscript = ch == '^';
                    let occupied = list.last().filter(|_| prev_is_last).is_none_or(|prev| {
                        !prev.scripts_allowed()
                            || if superscript {
                                prev.superscript().is_some()
                            } else {
                                prev.subscript().is_some()
                            }
                    });
                    if occupied {
                        list.add_atom(Atom::new(AtomType::Ordinary, ""));
                    }
                    let script = self.build_internal(ReadMode::OneChar)?;
                    let prev = list
                        .last_mut()
                        .ok_or_else(|| self.error("script without a base atom"))?;
                    if superscript {
                        prev.set_superscript(Some(script));
                    } else {
                        prev.set_subscript(Some(script));
                    }
                    prev_is_last = true;
                    continue;
                }
                '{' => {
                    let group = self.build_internal(ReadMode::Until('}'))?;
                    prev_is_last = !group.is_empty();
                    list.append(group);
                    if mode == ReadMode::OneChar {
                        return Ok(list);
                    }
                    continue;
                }
                '}' => {
                    self.unget();
                    return Err(self.error(ParseErrorKind::MismatchedBraces));
                }
                '\\' => {
                    let command = self.read_command();
                    if self.stop_command(&command, &mut list, mode)? {
                        return Ok(list);
                    }
                    let prev = if prev_is_last { list.last_mut() } else { None };
                    if self.apply_modifier(&command, prev)? {
                        continue;
                    }
                    if let Some(style) = self.symbols.font_style_for_name(&command) {
                        let group = self.read_styled(style, command == "text")?;
                        prev_is_last = !group.is_empty();
                        list.append(group);
                        if mode == ReadMode::OneChar {
                            return Ok(list);
                        }
                        continue;
                    }
                    self.atom_for_command(&command)?
                }
                '&' => {
                    if self.current_env.is_some() {
                        return Ok(list);
                    }
                    let table = self.build_table(None, Some(list), false)?;
                    return Ok(MathList::from_atoms(vec![table]));
                }
                ' ' if self.spaces_allowed => self
                    .symbols
                    .atom_for_command(" ")
                    .ok_or_else(|| self.error("missing space symbol"))?,
                _ => match self.symbols.atom_for_character(ch) {
                    Some(atom) => atom,
                    None => continue,
                },
            };

            atom.font_style = self.font_style;
            list.add_atom(atom);
            prev_is_last = true;
            if mode == ReadMode::OneChar {
                return Ok(list);
            }
        }

        match mode {
            ReadMode::Until('}') => Err(self.error(ParseErrorKind::MismatchedBraces)),
            ReadMode::Until(expected) => {
                Err(self.error(ParseErrorKind::CharacterNotFound { expected }))
            }
            ReadMode::Normal | ReadMode::OneChar => Ok(list),
        }
    }

    /// Read one argument with `style` as the font style; `\text` also
    /// allows literal spaces.
    fn read_styled(&mut self, style: FontStyle, spaces_allowed: bool) -> ParseResult<MathList> {
        let old_spaces = mem::replace(&mut self.spaces_allowed, spaces_allowed);
        let old_style = mem::replace(&mut self.font_style, style);
        let group = self.build_internal(ReadMode::OneChar);
        self.font_style = old_style;
        self.spaces_allowed = old_spaces;
        group
    }

    /// A run of ASCII letters.
    fn read_string(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.next_char() {
            if ch.is_ascii_alphabetic() {
                out.push(ch);
            } else {
                self.unget();
                break;
            }
        }
        out
    }

    fn read_command(&mut self) -> String {
        if let Some(ch) = self.next_char() {
            if SINGLE_CHAR_COMMANDS.contains(&ch) {
                return ch.to_string();
            }
            self.unget();
        }
        self.read_string()
    }

    /// Skip spaces, control characters and anything outside printable
    /// ASCII.
    fn skip_spaces(&mut self) {
        while let Some(ch) = self.next_char() {
            if !matches!(ch, '\u{21}'..='\u{7E}') {
                continue;
            }
            self.unget();
            return;
        }
    }

    /// Consume `expected` after optional spaces. Returns `false`, consuming
    /// nothing but the spaces, if another character follows.
    fn expect_character(&mut self, expected: char) -> bool {
        self.skip_spaces();
        match self.next_char() {
            Some(ch) if ch == expected => true,
            Some(_) => {
                self.unget();
                false
            }
            None => false,
        }
    }

    fn require_character(&mut self, expected: char) -> ParseResult<()> {
        if self.expect_character(expected) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::CharacterNotFound { expected }))
        }
    }

    /// `{name}` of `\begin` and `\end`.
    fn read_environment(&mut self) -> ParseResult<String> {
        self.require_character('{')?;
        self.skip_spaces();
        let name = self.read_string();
        self.require_character('}')?;
        Ok(name)
    }

    /// `{color}` of `\color` and `\textcolor`: a hex string or a name.
    fn read_color(&mut self) -> ParseResult<String> {
        self.require_character('{')?;
        self.skip_spaces();
        let mut color = String::new();
        while let Some(ch) = self.next_char() {
            if ch == '#' || ch.is_ascii_alphanumeric() {
                color.push(ch);
            } else {
                self.unget();
                break;
            }
        }
        self.require_character('}')?;
        Ok(color)
    }

    /// The delimiter after `\left` or `\right`. A `\|` is reported as `||`
    /// to tell it apart from a plain `|`.
    fn read_delimiter(&mut self) -> Option<String> {
        self.skip_spaces();
        let ch = self.next_char()?;
        if ch == '\\' {
            let command = self.read_command();
            if command == "|" {
                return Some("||".to_owned());
            }
            return Some(command);
        }
        Some(ch.to_string())
    }

    fn boundary_atom(&mut self, command: &str) -> ParseResult<Atom> {
        let Some(delimiter) = self.read_delimiter() else {
            return Err(self.error(ParseErrorKind::MissingDelimiter {
                command: command.to_owned(),
            }));
        };
        self.symbols
            .boundary_for_delimiter_name(&delimiter)
            .ok_or_else(|| {
                self.error(ParseErrorKind::InvalidDelimiter {
                    command: command.to_owned(),
                    delimiter,
                })
            })
    }

    fn atom_for_command(&mut self, command: &str) -> ParseResult<Atom> {
        if let Some(atom) = self.symbols.atom_for_command(command) {
            return Ok(atom);
        }
        if let Some(accent) = self.symbols.accent_for_name(command) {
            let body = self.build_internal(ReadMode::OneChar)?;
            return Ok(Atom::accent(accent.nucleus, body));
        }

        match command {
            "frac" | "binom" => {
                let numerator = self.build_internal(ReadMode::OneChar)?;
                let denominator = self.build_internal(ReadMode::OneChar)?;
                let fraction = if command == "frac" {
                    Fraction {
                        numerator,
                        denominator,
                        ..Fraction::default()
                    }
                } else {
                    Fraction {
                        numerator,
                        denominator,
                        has_rule: false,
                        left_delimiter: Some("(".to_owned()),
                        right_delimiter: Some(")".to_owned()),
                    }
                };
                Ok(Atom::fraction(fraction))
            }
            "sqrt" => {
                let degree = match self.next_char() {
                    Some('[') => Some(self.build_internal(ReadMode::Until(']'))?),
                    Some(_) => {
                        self.unget();
                        None
                    }
                    None => None,
                };
                let radicand = self.build_internal(ReadMode::OneChar)?;
                Ok(Atom::radical(radicand, degree))
            }
            "left" => {
                let left = self.boundary_atom("left")?;
                let mut inner = Inner::default();
                inner.set_left_boundary(Some(left));
                let outer = self.current_inner.replace(inner);
                let inner_list = self.build_internal(ReadMode::Normal)?;
                let inner = mem::replace(&mut self.current_inner, outer);
                match inner {
                    Some(mut inner) if inner.right_boundary().is_some() => {
                        inner.inner_list = inner_list;
                        Ok(Atom::inner(inner))
                    }
                    _ => Err(self.error(ParseErrorKind::MissingRight)),
                }
            }
            "overline" => Ok(Atom::overline(self.build_internal(ReadMode::OneChar)?)),
            "underline" => Ok(Atom::underline(self.build_internal(ReadMode::OneChar)?)),
            "begin" => {
                let env = self.read_environment()?;
                if env.is_empty() {
                    return Err(self.error(ParseErrorKind::InvalidEnvironment {
                        message: "Unknown environment: ".to_owned(),
                    }));
                }
                self.build_table(Some(env), None, false)
            }
            "color" | "textcolor" => {
                let color = self.read_color()?;
                let body = self.build_internal(ReadMode::OneChar)?;
                Ok(Atom::color(color, body, command == "textcolor"))
            }
            _ => Err(self.error(ParseErrorKind::InvalidCommand {
                name: command.to_owned(),
            })),
        }
    }

    /// Handle commands that end the list being read. Returns `true` when
    /// `list` (possibly replaced) must be returned to the caller.
    fn stop_command(
        &mut self,
        command: &str,
        list: &mut MathList,
        mode: ReadMode,
    ) -> ParseResult<bool> {
        match command {
            "right" => {
                if self.current_inner.is_none() {
                    return Err(self.error(ParseErrorKind::MissingLeft));
                }
                let right = self.boundary_atom("right")?;
                if let Some(inner) = self.current_inner.as_mut() {
                    inner.set_right_boundary(Some(right));
                }
                Ok(true)
            }
            "over" | "atop" | "choose" | "brack" | "brace" => {
                let (left, right) = match command {
                    "choose" => (Some("("), Some(")")),
                    "brack" => (Some("["), Some("]")),
                    "brace" => (Some("{"), Some("}")),
                    _ => (None, None),
                };
                let denominator_mode = match mode {
                    ReadMode::Until(stop) => ReadMode::Until(stop),
                    ReadMode::Normal | ReadMode::OneChar => ReadMode::Normal,
                };
                let numerator = mem::take(list);
                let denominator = self.build_internal(denominator_mode)?;
                let fraction = Fraction {
                    numerator,
                    denominator,
                    has_rule: command == "over",
                    left_delimiter: left.map(str::to_owned),
                    right_delimiter: right.map(str::to_owned),
                };
                list.add_atom(Atom::fraction(fraction));
                Ok(true)
            }
            "\\" | "cr" => {
                if let Some(env) = self.current_env.as_mut() {
                    env.num_rows += 1;
                } else {
                    let first = mem::take(list);
                    let table = self.build_table(None, Some(first), true)?;
                    list.add_atom(table);
                }
                Ok(true)
            }
            "end" => {
                let Some(expected) = self.current_env.as_ref().map(|env| env.name.clone()) else {
                    return Err(self.error(ParseErrorKind::MissingBegin));
                };
                let name = self.read_environment()?;
                if expected.as_deref() != Some(name.as_str()) {
                    return Err(self.error(ParseErrorKind::InvalidEnvironment {
                        message: format!(
                            "Begin environment name {} does not match end name: {name}",
                            expected.unwrap_or_default()
                        ),
                    }));
                }
                if let Some(env) = self.current_env.as_mut() {
                    env.ended = true;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Apply `\limits` / `\nolimits` to the previous atom. Returns `false`
    /// for any other command.
    fn apply_modifier(&self, command: &str, prev: Option<&mut Atom>) -> ParseResult<bool> {
        let limits = match command {
            "limits" => true,
            "nolimits" => false,
            _ => return Ok(false),
        };
        match prev.map(Atom::kind_mut) {
            Some(AtomKind::LargeOperator { has_limits }) => {
                *has_limits = limits;
                Ok(true)
            }
            _ => Err(self.error(ParseErrorKind::InvalidLimitsPlacement {
                command: command.to_owned(),
            })),
        }
    }

    /// Read table rows until the environment ends or the input runs out.
    /// `first_list`, when given, is the first cell (or the whole first row
    /// if `is_row`).
    fn build_table(
        &mut self,
        name: Option<String>,
        first_list: Option<MathList>,
        is_row: bool,
    ) -> ParseResult<Atom> {
        let outer = self.current_env.replace(EnvState {
            name: name.clone(),
            ..EnvState::default()
        });

        let mut rows: Vec<Vec<MathList>> = vec![Vec::new()];
        let mut current_row = 0;
        if let Some(first) = first_list {
            rows[0].push(first);
            if is_row {
                if let Some(env) = self.current_env.as_mut() {
                    env.num_rows += 1;
                }
                current_row = 1;
                rows.push(Vec::new());
            }
        }

        while self.has_characters() && !self.current_env.as_ref().is_some_and(|env| env.ended) {
            let cell = self.build_internal(ReadMode::Normal)?;
            rows[current_row].push(cell);
            let num_rows = self.current_env.as_ref().map_or(0, |env| env.num_rows);
            if num_rows > current_row {
                current_row = num_rows;
                rows.resize_with(current_row + 1, Vec::new);
            }
        }

        let state = mem::replace(&mut self.current_env, outer).unwrap_or_default();
        if !state.ended
            && let Some(env) = name
        {
            return Err(self.error(ParseErrorKind::MissingEnd { env }));
        }

        environment::table_with_environment(self.symbols, state.name.as_deref(), rows)
            .map_err(|kind| self.error(kind))
    }
}

/// Parse `latex` into a raw math list.
///
/// Returns the list together with an error value whose kind is
/// [`ParseErrorKind::None`] on success. An empty input yields no list and
/// no error.
///
/// # Examples
///
/// ```rust
/// use mathlayout::parser::parse;
/// use mathlayout::symbols::SymbolTable;
///
/// let symbols = SymbolTable::new();
/// let (list, error) = parse(&symbols, r"\frac{1}{2}");
/// assert!(error.is_none());
/// assert_eq!(list.unwrap().len(), 1);
/// ```
#[must_use]
pub fn parse(symbols: &SymbolTable, latex: &str) -> (Option<MathList>, ParseError) {
    if latex.is_empty() {
        return (None, ParseError::none());
    }
    match MathListBuilder::new(symbols, latex).build() {
        Ok(list) => (Some(list), ParseError::none()),
        Err(error) => {
            debug!("failed to parse {latex:?}: {error}");
            (None, error)
        }
    }
}

/// Parse `latex`, returning the first error as `Err`.
///
/// # Errors
/// See [`MathListBuilder::build`].
pub fn build(symbols: &SymbolTable, latex: &str) -> ParseResult<MathList> {
    MathListBuilder::new(symbols, latex).build()
}
