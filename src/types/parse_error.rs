//! Parse error handling for the LaTeX math parser
//!
//! The taxonomy is closed: every failure the parser can report is one
//! [`ParseErrorKind`]. The error also remembers where in the input the
//! problem was detected, so the message can show the surrounding text.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;
use thiserror::Error;

/// Error returned when a LaTeX string cannot be turned into a math list.
///
/// A successful parse is reported with a [`ParseErrorKind::None`] error so
/// that callers of [`crate::parser::parse`] always receive a value; use
/// [`ParseError::is_none`] to distinguish.
#[derive(Debug, Error)]
#[error("math parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// Character index at which the parser detected the problem.
    pub position: Option<usize>,
    /// Source excerpt rendered after the message.
    context: ParseErrorContext,
    /// Backtrace of the error stack
    #[cfg(feature = "backtrace")]
    pub backtrace: Box<Backtrace>,
}

impl ParseError {
    /// Create a new ParseError with the given kind and no location
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self::from_kind(kind.into(), ParseErrorContext::None, None)
    }

    /// Create a ParseError pointing at `position` (a character index) of
    /// `input`.
    pub fn at<T: Into<ParseErrorKind>>(kind: T, input: &str, position: usize) -> Self {
        let context = ParseErrorContext::Location {
            input: input.into(),
            position,
        };
        Self::from_kind(kind.into(), context, Some(position))
    }

    /// The "no error" value reported alongside a successful parse.
    #[must_use]
    pub fn none() -> Self {
        Self::new(ParseErrorKind::None)
    }

    /// Returns `true` when this value reports success.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(*self.kind, ParseErrorKind::None)
    }

    fn from_kind(kind: ParseErrorKind, context: ParseErrorContext, position: Option<usize>) -> Self {
        Self {
            kind: Box::new(kind),
            position,
            context,
            #[cfg(feature = "backtrace")]
            backtrace: Box::new(Backtrace::force_capture()),
        }
    }
}

/// Describes the specific reason for a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Not an error: the parse succeeded.
    #[error("no error")]
    None,
    /// A `{` without its `}`, a stray `}`, or trailing unconsumed input.
    #[error("Mismatched braces")]
    MismatchedBraces,
    /// `\name` is not a known command.
    #[error(r"Invalid command \{name}")]
    InvalidCommand {
        /// The command name without the backslash.
        name: String,
    },
    /// A required character was not found.
    #[error("Missing {expected}")]
    CharacterNotFound {
        /// The character that was expected.
        expected: char,
    },
    /// `\left`, `\right` or a delimiter argument was not followed by a
    /// delimiter.
    #[error(r"Missing delimiter for \{command}")]
    MissingDelimiter {
        /// The command that required the delimiter.
        command: String,
    },
    /// The delimiter is not one of the known delimiters.
    #[error("Invalid delimiter for {command}: {delimiter}")]
    InvalidDelimiter {
        /// The command that read the delimiter.
        command: String,
        /// The delimiter as written.
        delimiter: String,
    },
    /// A `\left` group ended without `\right`.
    #[error(r"Missing \right")]
    MissingRight,
    /// `\right` appeared without an open `\left`.
    #[error(r"Missing \left")]
    MissingLeft,
    /// Unknown environment, or `\end` names a different environment.
    #[error("{message}")]
    InvalidEnvironment {
        /// Human readable description.
        message: String,
    },
    /// `\begin{}` named no environment.
    #[error(r"Missing environment name for \begin")]
    MissingEnvironmentContext,
    /// `\end` without a matching `\begin`.
    #[error(r"Missing \begin")]
    MissingBegin,
    /// `\begin{env}` without a matching `\end{env}`.
    #[error(r"Missing \end for \begin{{{env}}}")]
    MissingEnd {
        /// The environment left open.
        env: String,
    },
    /// The environment does not accept the number of columns given.
    #[error("{env} environment can only have {expected} columns")]
    InvalidColumnCount {
        /// The environment name.
        env: String,
        /// Description of the accepted column count.
        expected: &'static str,
    },
    /// `\limits` or `\nolimits` not directly after a large operator.
    #[error(r"\{command} can only be applied to an operator")]
    InvalidLimitsPlacement {
        /// `limits` or `nolimits`.
        command: String,
    },
    /// The parser reached a state it cannot handle.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the inconsistency.
        message: String,
    },
}

impl From<&str> for ParseErrorKind {
    fn from(message: &str) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
enum ParseErrorContext {
    None,
    Location { input: String, position: usize },
}

impl fmt::Display for ParseErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location { input, position } => {
                let chars: Vec<char> = input.chars().collect();
                let position = (*position).min(chars.len());
                if position == chars.len() {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", position + 1)?;
                }

                let prefix_start = position.saturating_sub(15);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                for c in &chars[prefix_start..position] {
                    write!(f, "{c}")?;
                }
                if let Some(c) = chars.get(position) {
                    write!(f, "{c}\u{0332}")?;
                }
                let suffix_start = (position + 1).min(chars.len());
                let suffix_end = (position + 16).min(chars.len());
                for c in &chars[suffix_start..suffix_end] {
                    write!(f, "{c}")?;
                }
                if suffix_end < chars.len() {
                    write!(f, "\u{2026}")?;
                }
                Ok(())
            }
        }
    }
}
