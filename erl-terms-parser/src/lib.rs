//! # Erl Terms Parser
//!
//! Compiles Erlang term syntax into [`erl_terms::Term`] values and formats
//! terms into text with `io:format`-style directives.
//!
//! - [`parse`] / [`parse_with`] compile a single term, such as
//!   `{ok, [1, 2 | T]}` or `#{name => "x"}`, substituting caller-supplied
//!   terms for `~w`-style directives.
//! - [`parse_mfa`] / [`parse_mfa_with`] compile a `Module:Function(Args)`
//!   call into an [`Mfa`].
//! - [`parse_all`] compiles a sequence of `.`-terminated terms.
//! - [`TermParser`] reads terms one at a time from an arbitrary offset.
//! - [`format()`] renders a format string with term arguments.
//!
//! ## Example
//! ```rust
//! # use erl_terms::Term;
//! # use erl_terms_parser::{format, parse, parse_with};
//! let pattern = parse("{reply, Ref::reference(), Value}").unwrap();
//! let subject = parse_with("{reply, ~w, [1, 2]}", &[Term::Ref(
//!     erl_terms::Reference::from_id("node@host", 7, 1),
//! )])
//! .unwrap();
//! let binding = pattern.match_term(&subject).unwrap();
//! assert_eq!(format("got ~w", &[binding.get("Value").unwrap().clone()]).unwrap(), "got [1,2]");
//! ```
//!
//! ## License
//!
//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod error;
pub mod format;
pub mod parser;
mod scanner;

pub use error::TermParserError;
pub use format::format;
pub use parser::{
    parse, parse_all, parse_mfa, parse_mfa_with, parse_with, Mfa, TermParser, MAX_DEPTH,
};
