//! Renders [`Term`] values in Erlang surface syntax.
//!
//! The output is accepted by the term parser, so atoms, booleans, bytes,
//! integers, finite floats, strings, binaries, tuples, lists, maps and
//! variables survive a render/parse round trip.  Pids, ports and references
//! are rendered in the `#Pid<node.id.creation>` style, which is for reading
//! only.

use crate::Term;
use std::borrow::Cow;
use std::fmt;

/// Writes `ch` with backslash escapes for backslash and control characters.
/// Quote characters are left to the caller.
pub(crate) fn write_escaped_char(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    match ch {
        '\\' => f.write_str("\\\\"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\t' => f.write_str("\\t"),
        '\u{0B}' => f.write_str("\\v"),
        '\u{0C}' => f.write_str("\\f"),
        '\u{08}' => f.write_str("\\b"),
        '\u{1B}' => f.write_str("\\e"),
        c if c.is_control() => write!(f, "\\x{:02X}", c as u32),
        c => write!(f, "{c}"),
    }
}

fn write_str_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            other => write_escaped_char(f, other)?,
        }
    }
    f.write_str("\"")
}

fn write_byte(f: &mut fmt::Formatter<'_>, b: u8) -> fmt::Result {
    f.write_str("$")?;
    match b {
        b' ' => f.write_str("\\s"),
        0x21..=0x7E => write_escaped_char(f, char::from(b)),
        0x08..=0x0D | 0x1B => write_escaped_char(f, char::from(b)),
        _ => write!(f, "\\x{b:02X}"),
    }
}

/// Floats always carry a `.` so they read back as floats.
fn write_float(f: &mut fmt::Formatter<'_>, r: f64) -> fmt::Result {
    if !r.is_finite() {
        return write!(f, "{r}");
    }
    // `Debug` is the shortest exact representation, using an exponent for
    // very large and very small magnitudes.
    let repr = format!("{r:?}");
    match repr.find('e') {
        Some(pos) if !repr[..pos].contains('.') => {
            write!(f, "{}.0{}", &repr[..pos], &repr[pos..])
        }
        _ => f.write_str(&repr),
    }
}

fn write_binary(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("<<")?;
    if !bytes.is_empty() && bytes.iter().all(|b| (0x20..=0x7E).contains(b)) {
        f.write_str("\"")?;
        for &b in bytes {
            match b {
                b'"' => f.write_str("\\\"")?,
                b'\\' => f.write_str("\\\\")?,
                _ => write!(f, "{}", char::from(b))?,
            }
        }
        return f.write_str("\">>");
    }
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{b}")?;
    }
    f.write_str(">>")
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, t) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

/// Writes the term in Erlang surface syntax.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Byte(b) => write_byte(f, *b),
            Term::Int(i) => write!(f, "{i}"),
            Term::Float(r) => write_float(f, *r),
            Term::Bool(b) => write!(f, "{b}"),
            Term::Atom(a) => write!(f, "{a}"),
            Term::Ref(r) => write!(f, "{r}"),
            Term::Port(p) => write!(f, "{p}"),
            Term::Pid(p) => write!(f, "{p}"),
            Term::Tuple(elems) => {
                f.write_str("{")?;
                write_seq(f, elems)?;
                f.write_str("}")
            }
            Term::Map(map) => {
                f.write_str("#{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Term::Str(s) => write_str_quoted(f, s),
            Term::List(list) => {
                f.write_str("[")?;
                write_seq(f, list.elems())?;
                if let Some(tail) = list.tail() {
                    write!(f, "|{tail}")?;
                }
                f.write_str("]")
            }
            Term::Binary(bytes) => write_binary(f, bytes),
            Term::Var(v) => write!(f, "{v}"),
        }
    }
}

impl Term {
    /// Returns the default textual rendering: the raw value of a string,
    /// the raw name of an atom, and the [`fmt::Display`] form otherwise.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Term::Str(s) => Cow::Borrowed(s),
            Term::Atom(a) => Cow::Borrowed(a.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }
}
