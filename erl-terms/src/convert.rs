//! Explicit coercions from [`Term`] to host types.
//!
//! Every accessor either returns the value or a [`TermError`] naming the
//! term's actual kind and the requested target.  Narrowing conversions are
//! range-checked instead of truncated.

use crate::{Atom, List, Pid, Port, Reference, Term, TermError, Var};
use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

const MICROS_PER_SEC: i64 = 1_000_000;

impl Term {
    /// Reads an integer or byte as `i32`.
    ///
    /// # Errors
    /// [`TermError::OutOfRange`] if the integer does not fit into `i32`,
    /// [`TermError::IncompatibleType`] for any other kind.
    pub fn as_int(&self) -> Result<i32, TermError> {
        match self {
            Term::Byte(b) => Ok(i32::from(*b)),
            Term::Int(i) => i32::try_from(*i).map_err(|_| TermError::OutOfRange {
                value: i128::from(*i),
                target: "i32",
            }),
            other => Err(TermError::incompatible(other.kind(), "i32")),
        }
    }

    /// Reads an integer or byte as `i64`.
    pub fn as_long(&self) -> Result<i64, TermError> {
        match self {
            Term::Byte(b) => Ok(i64::from(*b)),
            Term::Int(i) => Ok(*i),
            other => Err(TermError::incompatible(other.kind(), "i64")),
        }
    }

    /// Reads a number as `f64`.  Integers and bytes widen.
    pub fn as_double(&self) -> Result<f64, TermError> {
        match self {
            Term::Byte(b) => Ok(f64::from(*b)),
            Term::Int(i) => Ok(*i as f64),
            Term::Float(r) => Ok(*r),
            other => Err(TermError::incompatible(other.kind(), "f64")),
        }
    }

    /// Reads the text of a string, the name of an atom or a UTF-8 binary.
    pub fn as_string(&self) -> Result<&str, TermError> {
        match self {
            Term::Str(s) => Ok(s),
            Term::Atom(a) => Ok(a.as_str()),
            Term::Binary(bytes) => {
                core::str::from_utf8(bytes).map_err(|e| TermError::InvalidValue {
                    target: "string",
                    reason: e.to_string(),
                })
            }
            other => Err(TermError::incompatible(other.kind(), "string")),
        }
    }

    /// Reads a boolean, accepting the atoms `true` and `false` as well.
    pub fn as_bool(&self) -> Result<bool, TermError> {
        match self {
            Term::Bool(b) => Ok(*b),
            Term::Atom(a) if a.as_str() == "true" => Ok(true),
            Term::Atom(a) if a.as_str() == "false" => Ok(false),
            other => Err(TermError::incompatible(other.kind(), "bool")),
        }
    }

    /// Reads a byte, or an integer that is a Unicode scalar value, as `char`.
    pub fn as_char(&self) -> Result<char, TermError> {
        match self {
            Term::Byte(b) => Ok(char::from(*b)),
            Term::Int(i) => u32::try_from(*i)
                .ok()
                .and_then(char::from_u32)
                .ok_or(TermError::OutOfRange {
                    value: i128::from(*i),
                    target: "char",
                }),
            other => Err(TermError::incompatible(other.kind(), "char")),
        }
    }

    /// Reads a byte as `u8`.
    pub fn as_byte(&self) -> Result<u8, TermError> {
        match self {
            Term::Byte(b) => Ok(*b),
            Term::Int(i) => u8::try_from(*i).map_err(|_| TermError::OutOfRange {
                value: i128::from(*i),
                target: "u8",
            }),
            other => Err(TermError::incompatible(other.kind(), "u8")),
        }
    }

    /// Reads the bytes of a binary, or the UTF-8 bytes of a string.
    pub fn as_bytes(&self) -> Result<&[u8], TermError> {
        match self {
            Term::Binary(bytes) => Ok(bytes),
            Term::Str(s) => Ok(s.as_bytes()),
            other => Err(TermError::incompatible(other.kind(), "bytes")),
        }
    }

    /// Reads a timestamp.
    ///
    /// An integer is taken as microseconds since the Unix epoch.  A tuple
    /// `{MegaSecs, Secs, MicroSecs}` is read the way `erlang:timestamp()`
    /// reports time.
    pub fn as_datetime(&self) -> Result<DateTime<Utc>, TermError> {
        const TARGET: &str = "datetime";
        let micros = match self {
            Term::Int(us) => *us,
            Term::Tuple(elems) if elems.len() == 3 => {
                let mega = elems[0].as_long()?;
                let secs = elems[1].as_long()?;
                let micro = elems[2].as_long()?;
                mega.checked_mul(MICROS_PER_SEC)
                    .and_then(|s| s.checked_add(secs))
                    .and_then(|s| s.checked_mul(MICROS_PER_SEC))
                    .and_then(|us| us.checked_add(micro))
                    .ok_or_else(|| TermError::InvalidValue {
                        target: TARGET,
                        reason: format!("timestamp {self} overflows"),
                    })?
            }
            other => return Err(TermError::incompatible(other.kind(), TARGET)),
        };
        DateTime::from_timestamp_micros(micros).ok_or(TermError::OutOfRange {
            value: i128::from(micros),
            target: TARGET,
        })
    }

    /// Reads a duration: an integer number of microseconds or a float
    /// number of seconds.
    pub fn as_timespan(&self) -> Result<TimeDelta, TermError> {
        const TARGET: &str = "timespan";
        match self {
            Term::Int(us) => Ok(TimeDelta::microseconds(*us)),
            Term::Float(secs) => {
                let us = (secs * MICROS_PER_SEC as f64).round();
                if !us.is_finite() || us < i64::MIN as f64 || us > i64::MAX as f64 {
                    return Err(TermError::InvalidValue {
                        target: TARGET,
                        reason: format!("{secs} seconds is not representable"),
                    });
                }
                Ok(TimeDelta::microseconds(us as i64))
            }
            other => Err(TermError::incompatible(other.kind(), TARGET)),
        }
    }

    /// Reads an exact decimal from an integer, byte, float or decimal string.
    pub fn as_decimal(&self) -> Result<Decimal, TermError> {
        const TARGET: &str = "decimal";
        match self {
            Term::Byte(b) => Ok(Decimal::from(*b)),
            Term::Int(i) => Ok(Decimal::from(*i)),
            Term::Float(r) => Decimal::try_from(*r).map_err(|e| TermError::InvalidValue {
                target: TARGET,
                reason: e.to_string(),
            }),
            Term::Str(s) => s.trim().parse::<Decimal>().map_err(|e| TermError::InvalidValue {
                target: TARGET,
                reason: e.to_string(),
            }),
            other => Err(TermError::incompatible(other.kind(), TARGET)),
        }
    }

    pub fn as_atom(&self) -> Result<&Atom, TermError> {
        match self {
            Term::Atom(a) => Ok(a),
            other => Err(TermError::incompatible(other.kind(), "atom")),
        }
    }

    pub fn as_pid(&self) -> Result<&Pid, TermError> {
        match self {
            Term::Pid(p) => Ok(p),
            other => Err(TermError::incompatible(other.kind(), "pid")),
        }
    }

    pub fn as_port(&self) -> Result<&Port, TermError> {
        match self {
            Term::Port(p) => Ok(p),
            other => Err(TermError::incompatible(other.kind(), "port")),
        }
    }

    pub fn as_reference(&self) -> Result<&Reference, TermError> {
        match self {
            Term::Ref(r) => Ok(r),
            other => Err(TermError::incompatible(other.kind(), "reference")),
        }
    }

    /// Reads the elements of a tuple.
    pub fn as_tuple(&self) -> Result<&[Term], TermError> {
        match self {
            Term::Tuple(elems) => Ok(elems),
            other => Err(TermError::incompatible(other.kind(), "tuple")),
        }
    }

    pub fn as_list(&self) -> Result<&List, TermError> {
        match self {
            Term::List(list) => Ok(list),
            other => Err(TermError::incompatible(other.kind(), "list")),
        }
    }

    pub fn as_map(&self) -> Result<&IndexMap<Term, Term>, TermError> {
        match self {
            Term::Map(map) => Ok(map),
            other => Err(TermError::incompatible(other.kind(), "map")),
        }
    }

    pub fn as_var(&self) -> Result<&Var, TermError> {
        match self {
            Term::Var(v) => Ok(v),
            other => Err(TermError::incompatible(other.kind(), "var")),
        }
    }
}
