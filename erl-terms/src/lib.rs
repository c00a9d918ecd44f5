//! # Erl Terms
//!
//! An owned, immutable representation of Erlang-style terms.
//!
//! This crate provides the [`Term`] type, a closed set of value kinds
//! (atoms, booleans, bytes, integers, floats, strings, binaries, pids,
//! ports, references, tuples, lists, maps and pattern variables) together
//! with the operations needed to exchange such values with a runtime that
//! speaks the Erlang term format:
//!
//! - a structural total order across all kinds ([`Kind`] rank first, then
//!   payload), consistent with equality and hashing;
//! - explicit coercions to host types (`as_int`, `as_string`,
//!   `as_datetime`, ...) failing with [`TermError`];
//! - rendering in Erlang surface syntax via [`std::fmt::Display`];
//! - one-sided pattern matching into a [`Binding`], substitution of bound
//!   variables and a generic fold over term trees;
//! - a concurrent [`MonitorRegistry`] correlating minted references with
//!   monitored pids.
//!
//! Text is compiled into terms by the companion `erl-terms-parser` crate.
//!
//! ## Example
//! ```rust
//! # use erl_terms::{list, tuple, Kind, Term};
//! let subject = tuple!(Term::atom("ok"), list![1, 2, 3]);
//! let pattern = tuple!(Term::atom("ok"), Term::typed_var("Xs", Kind::List));
//!
//! let binding = pattern.match_term(&subject).unwrap();
//! assert_eq!(binding.get("Xs"), Some(&list![1, 2, 3]));
//! assert_eq!(subject.to_string(), "{ok,[1,2,3]}");
//! assert_eq!(pattern.subst(&binding).into_owned(), subject);
//! ```
//!
//! ## License
//!
//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod convert;
mod display;
mod error;
mod ident;
mod monitor;
mod order;
mod pattern;
mod subst;
mod term;

pub use error::TermError;
pub use ident::{Atom, Pid, Port, Reference, CREATION_MASK, ID_MASK, REF_ID_MASK};
pub use monitor::{MonitorRegistry, NodeRefs, RefMinter};
pub use pattern::Binding;
pub use term::{Kind, List, Term, Var, TYPE_ALIASES};
