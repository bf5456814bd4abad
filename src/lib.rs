//! mathlayout - TeX-quality math layout from LaTeX strings
//!
//! The pipeline turns a LaTeX math string into a tree of positioned boxes
//! ready for drawing:
//!
//! 1. [`parser`] builds a [`math_list::MathList`] of atoms.
//! 2. [`math_list::MathList::finalized`] normalizes it (unary operators,
//!    number fusion, source ranges).
//! 3. [`typesetter::layout`] applies the TeX layout rules with the metrics
//!    of an OpenType `MATH` font ([`font_metrics`]), producing a
//!    [`display::Display`] tree.
//!
//! [`render`] runs all three steps. [`latex::to_latex`] turns a list back
//! into LaTeX.
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;

pub mod color;
pub mod core;
pub mod display;
pub mod font_metrics;
pub mod latex;
pub mod math_list;
pub mod parser;
pub mod spacing_data;
pub mod style;
pub mod symbols;
pub mod types;
pub mod typesetter;
pub mod wide_character;

/// Parses and lays out a LaTeX math expression.
///
/// Runs the parser, the finalizer and the typesetter with the font that
/// `settings` names, then applies the settings' text color to the root of
/// the tree.
///
/// # Examples
///
/// ```rust,no_run
/// use mathlayout::font_metrics::{FontCache, GlyphBackend};
/// use mathlayout::symbols::SymbolTable;
/// use mathlayout::{RenderError, Settings, render};
///
/// fn run<B>(backend: B, math_table: &[u8]) -> Result<(), RenderError>
/// where
///     B: GlyphBackend + 'static,
/// {
///     let symbols = SymbolTable::new();
///     let mut fonts = FontCache::new();
///     fonts
///         .register("latinmodern-math", backend, math_table)
///         .expect("valid MATH table");
///     let settings = Settings::builder().display_mode(true).build();
///     let display = render(&symbols, &fonts, r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}", &settings)?;
///     assert!(display.width > 0.0);
///     Ok(())
/// }
/// ```
pub use crate::core::render;

/// Errors returned by [`render`].
pub use crate::core::RenderError;

/// Re-exported for the common entry points.
pub use crate::types::{ParseError, ParseErrorKind, Settings};
