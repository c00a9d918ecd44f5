//! Defines the core [`Term`] type, its [`Kind`] tag and related constructors.
//!
//! A term is an immutable Erlang-style value.  The set of kinds is closed:
//! every operation over terms is one exhaustive `match`, so adding a kind
//! makes the compiler point at every place that has to learn about it.

use crate::{Atom, Pid, Port, Reference};
use core::fmt;
use indexmap::IndexMap;
use smartstring::alias::String as SmallString;

/// The kind of a [`Term`].
///
/// The declaration order is the fixed cross-kind rank (`TypeOrder`) used to
/// compare terms of different kinds: any byte sorts before any integer, any
/// integer before any float, and so on up to variables, which sort last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Kind {
    Byte = 0,
    Int = 1,
    Float = 2,
    Bool = 3,
    Atom = 4,
    Ref = 5,
    Port = 6,
    Pid = 7,
    Tuple = 8,
    Map = 9,
    Str = 10,
    List = 11,
    Binary = 12,
    Var = 13,
}

/// Variable type annotations accepted in `Name::type()` and the kind each
/// one constrains the variable to.  `None` leaves the variable unconstrained.
pub const TYPE_ALIASES: &[(&str, Option<Kind>)] = &[
    ("int", Some(Kind::Int)),
    ("long", Some(Kind::Int)),
    ("integer", Some(Kind::Int)),
    ("str", Some(Kind::Str)),
    ("string", Some(Kind::Str)),
    ("float", Some(Kind::Float)),
    ("double", Some(Kind::Float)),
    ("bool", Some(Kind::Bool)),
    ("boolean", Some(Kind::Bool)),
    ("byte", Some(Kind::Byte)),
    ("char", Some(Kind::Byte)),
    ("ref", Some(Kind::Ref)),
    ("reference", Some(Kind::Ref)),
    ("atom", Some(Kind::Atom)),
    ("binary", Some(Kind::Binary)),
    ("bin", Some(Kind::Binary)),
    ("bytes", Some(Kind::Binary)),
    ("pid", Some(Kind::Pid)),
    ("port", Some(Kind::Port)),
    ("tuple", Some(Kind::Tuple)),
    ("list", Some(Kind::List)),
    ("map", Some(Kind::Map)),
    ("term", None),
    ("any", None),
];

impl Kind {
    /// Every kind in rank order.
    pub const ALL: [Kind; 14] = [
        Kind::Byte,
        Kind::Int,
        Kind::Float,
        Kind::Bool,
        Kind::Atom,
        Kind::Ref,
        Kind::Port,
        Kind::Pid,
        Kind::Tuple,
        Kind::Map,
        Kind::Str,
        Kind::List,
        Kind::Binary,
        Kind::Var,
    ];

    /// Returns the fixed cross-kind rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns the canonical type name, as written in a variable annotation.
    pub const fn type_name(self) -> &'static str {
        match self {
            Kind::Byte => "byte",
            Kind::Int => "integer",
            Kind::Float => "float",
            Kind::Bool => "boolean",
            Kind::Atom => "atom",
            Kind::Ref => "reference",
            Kind::Port => "port",
            Kind::Pid => "pid",
            Kind::Tuple => "tuple",
            Kind::Map => "map",
            Kind::Str => "string",
            Kind::List => "list",
            Kind::Binary => "binary",
            Kind::Var => "var",
        }
    }

    /// Looks up a variable type alias in [`TYPE_ALIASES`].
    ///
    /// Returns `None` for an unknown alias and `Some(None)` for an alias that
    /// accepts any kind.
    pub fn from_alias(alias: &str) -> Option<Option<Kind>> {
        TYPE_ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, kind)| *kind)
    }

    /// Returns `true` for the atomic kinds, `false` for tuples, lists and maps.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Kind::Tuple | Kind::List | Kind::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A pattern variable: a name plus an optional kind constraint.
///
/// The variable named `_` is anonymous: it matches without binding.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Var {
    name: SmallString,
    kind: Option<Kind>,
}

impl Var {
    /// Creates an unconstrained variable.
    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: SmallString::from(name.as_ref()),
            kind: None,
        }
    }

    /// Creates a variable that only binds to terms of the given kind.
    #[inline]
    pub fn typed(name: impl AsRef<str>, kind: Kind) -> Self {
        Self {
            name: SmallString::from(name.as_ref()),
            kind: Some(kind),
        }
    }

    /// Creates a variable with an optional constraint.
    #[inline]
    pub fn with_kind(name: impl AsRef<str>, kind: Option<Kind>) -> Self {
        Self {
            name: SmallString::from(name.as_ref()),
            kind,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the kind constraint, if any.
    #[inline]
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// Returns `true` for the anonymous variable `_`.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.name == "_"
    }

    /// Returns `true` if the constraint admits `term`.
    #[inline]
    pub fn accepts(&self, term: &Term) -> bool {
        self.kind.map_or(true, |kind| term.kind() == kind)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "Var({}::{})", self.name, kind),
            None => write!(f, "Var({})", self.name),
        }
    }
}

/// Writes `Name` or `Name::type()`.
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(kind) = self.kind {
            write!(f, "::{}()", kind.type_name())?;
        }
        Ok(())
    }
}

/// The payload of a list term: its elements and an optional improper tail.
///
/// A tail is never itself a list: constructors fold a list tail into the
/// element vector, so `[1 | [2, 3]]` and `[1, 2, 3]` are the same value.
/// A list with a tail always has at least one element.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    elems: Vec<Term>,
    tail: Option<Box<Term>>,
}

impl List {
    /// Creates a proper list, taking ownership of `elems`.
    #[inline]
    pub fn new(elems: Vec<Term>) -> Self {
        Self { elems, tail: None }
    }

    /// Creates a list with the given tail, folding list tails into the
    /// elements.  Callers guarantee `elems` is non-empty when `tail` is not
    /// a list.
    pub(crate) fn with_tail(mut elems: Vec<Term>, tail: Term) -> Self {
        match tail {
            Term::List(rest) => {
                elems.extend(rest.elems);
                Self {
                    elems,
                    tail: rest.tail,
                }
            }
            other => Self {
                elems,
                tail: Some(Box::new(other)),
            },
        }
    }

    /// Returns the elements (without the tail).
    #[inline]
    pub fn elems(&self) -> &[Term] {
        &self.elems
    }

    /// Returns the improper tail, if any.
    #[inline]
    pub fn tail(&self) -> Option<&Term> {
        self.tail.as_deref()
    }

    /// Returns `true` if the list has no improper tail.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.tail.is_none()
    }

    /// Returns the number of elements, not counting the tail.
    #[inline]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns `true` for the empty list `[]`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty() && self.tail.is_none()
    }

    /// Splits the list into its elements and tail.
    #[inline]
    pub fn into_parts(self) -> (Vec<Term>, Option<Term>) {
        (self.elems, self.tail.map(|t| *t))
    }
}

/// An immutable Erlang-style value.
///
/// Composite kinds own their children; [`Clone`] therefore produces an
/// independent deep copy.  Equality, ordering and hashing are structural
/// (see the `order` module); two terms of different kinds are never equal.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Term {
    /// A byte or character in `0..=255`.
    Byte(u8),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// `true` or `false`.
    Bool(bool),
    Atom(Atom),
    Ref(Reference),
    Port(Port),
    Pid(Pid),
    /// A fixed-arity sequence.
    Tuple(Vec<Term>),
    /// An insertion-ordered key/value mapping.
    Map(IndexMap<Term, Term>),
    /// A UTF-8 string.
    Str(String),
    /// A possibly improper list.
    List(List),
    /// A byte sequence.
    Binary(Vec<u8>),
    /// A pattern variable.  Only meaningful inside patterns.
    Var(Var),
}

impl Term {
    /// Returns the kind of this term.
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Term::Byte(_) => Kind::Byte,
            Term::Int(_) => Kind::Int,
            Term::Float(_) => Kind::Float,
            Term::Bool(_) => Kind::Bool,
            Term::Atom(_) => Kind::Atom,
            Term::Ref(_) => Kind::Ref,
            Term::Port(_) => Kind::Port,
            Term::Pid(_) => Kind::Pid,
            Term::Tuple(_) => Kind::Tuple,
            Term::Map(_) => Kind::Map,
            Term::Str(_) => Kind::Str,
            Term::List(_) => Kind::List,
            Term::Binary(_) => Kind::Binary,
            Term::Var(_) => Kind::Var,
        }
    }

    /// Returns `true` for atomic kinds and `false` for tuples, lists and maps.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    /// Construct an atom term.
    #[inline]
    pub fn atom(name: impl AsRef<str>) -> Self {
        Term::Atom(Atom::new(name))
    }

    /// Construct a string term.
    #[inline]
    pub fn str(s: impl Into<String>) -> Self {
        Term::Str(s.into())
    }

    /// Construct a binary term.
    #[inline]
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Term::Binary(bytes.into())
    }

    /// Construct an unconstrained variable.
    #[inline]
    pub fn var(name: impl AsRef<str>) -> Self {
        Term::Var(Var::new(name))
    }

    /// Construct a variable constrained to `kind`.
    #[inline]
    pub fn typed_var(name: impl AsRef<str>, kind: Kind) -> Self {
        Term::Var(Var::typed(name, kind))
    }

    /// Constructs a tuple, taking ownership of `elems` without copying.
    #[inline]
    pub fn tuple(elems: Vec<Term>) -> Self {
        Term::Tuple(elems)
    }

    /// Constructs a tuple from borrowed elements, cloning each one.
    #[inline]
    pub fn tuple_from(elems: &[Term]) -> Self {
        Term::Tuple(elems.to_vec())
    }

    /// Constructs a proper list, taking ownership of `elems` without copying.
    #[inline]
    pub fn list(elems: Vec<Term>) -> Self {
        Term::List(List::new(elems))
    }

    /// Constructs a proper list from borrowed elements, cloning each one.
    #[inline]
    pub fn list_from(elems: &[Term]) -> Self {
        Term::List(List::new(elems.to_vec()))
    }

    /// Constructs `[E1, ..., En | Tail]`.  A list tail is folded into the
    /// elements; with no elements the result is the tail itself.
    pub fn list_with_tail(elems: Vec<Term>, tail: Term) -> Self {
        if elems.is_empty() {
            return tail;
        }
        Term::List(List::with_tail(elems, tail))
    }

    /// The empty list `[]`.
    #[inline]
    pub fn nil() -> Self {
        Term::List(List::new(Vec::new()))
    }

    /// Constructs a map from key/value pairs.  Later duplicates of a key
    /// replace the value but keep the key's first position.
    pub fn map(entries: impl IntoIterator<Item = (Term, Term)>) -> Self {
        Term::Map(entries.into_iter().collect())
    }

    /// Returns `true` if the term is a byte.
    #[inline]
    pub fn is_byte(&self) -> bool {
        matches!(self, Term::Byte(_))
    }

    /// Returns `true` if the term is an integer.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Term::Int(_))
    }

    /// Returns `true` if the term is a float.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Term::Float(_))
    }

    /// Returns `true` for bytes, integers and floats.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Term::Byte(_) | Term::Int(_) | Term::Float(_))
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Term::Bool(_))
    }

    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, Term::Atom(_))
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Term::Str(_))
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Term::Binary(_))
    }

    #[inline]
    pub fn is_pid(&self) -> bool {
        matches!(self, Term::Pid(_))
    }

    #[inline]
    pub fn is_port(&self) -> bool {
        matches!(self, Term::Port(_))
    }

    #[inline]
    pub fn is_ref(&self) -> bool {
        matches!(self, Term::Ref(_))
    }

    #[inline]
    pub fn is_tuple(&self) -> bool {
        matches!(self, Term::Tuple(_))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Term::List(_))
    }

    /// Returns `true` for the empty list `[]`.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::List(l) if l.is_empty())
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Term::Map(_))
    }

    #[inline]
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Returns the number of children: tuple arity, list length (without
    /// the tail) or map size.  Scalars have no children.
    pub fn arity(&self) -> usize {
        match self {
            Term::Tuple(elems) => elems.len(),
            Term::List(list) => list.len(),
            Term::Map(map) => map.len(),
            Term::Byte(_)
            | Term::Int(_)
            | Term::Float(_)
            | Term::Bool(_)
            | Term::Atom(_)
            | Term::Ref(_)
            | Term::Port(_)
            | Term::Pid(_)
            | Term::Str(_)
            | Term::Binary(_)
            | Term::Var(_) => 0,
        }
    }

    /// Returns the element slice of a tuple or list.
    #[inline]
    pub fn elements(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(elems) => Some(elems),
            Term::List(list) => Some(list.elems()),
            _ => None,
        }
    }
}

impl Default for Term {
    /// The empty list.
    fn default() -> Self {
        Term::nil()
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Byte(b) => f.debug_tuple("Byte").field(b).finish(),
            Term::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Term::Float(r) => f.debug_tuple("Float").field(r).finish(),
            Term::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Term::Atom(a) => fmt::Debug::fmt(a, f),
            Term::Ref(r) => fmt::Debug::fmt(r, f),
            Term::Port(p) => fmt::Debug::fmt(p, f),
            Term::Pid(p) => fmt::Debug::fmt(p, f),
            Term::Tuple(elems) => f.debug_tuple("Tuple").field(elems).finish(),
            Term::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Term::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Term::List(list) => match list.tail() {
                None => f.debug_tuple("List").field(&list.elems()).finish(),
                Some(tail) => f
                    .debug_tuple("List")
                    .field(&list.elems())
                    .field(tail)
                    .finish(),
            },
            Term::Binary(bytes) => f.debug_tuple("Binary").field(bytes).finish(),
            Term::Var(v) => fmt::Debug::fmt(v, f),
        }
    }
}

macro_rules! impl_from_integers_for_term {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Term {
            #[inline]
            fn from(v: $t) -> Self { Term::Int(v as i64) }
        }
    )*};
}
impl_from_integers_for_term!(i8, i16, i32, i64, u16, u32);

macro_rules! impl_from_floats_for_term {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Term {
            #[inline]
            fn from(v: $t) -> Self { Term::Float(v as f64) }
        }
    )*};
}
impl_from_floats_for_term!(f32, f64);

macro_rules! impl_from_payload_for_term {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl From<$t> for Term {
            #[inline]
            fn from(v: $t) -> Self { Term::$variant(v) }
        }
    )*};
}
impl_from_payload_for_term!(
    u8 => Byte,
    bool => Bool,
    String => Str,
    Atom => Atom,
    Reference => Ref,
    Port => Port,
    Pid => Pid,
    List => List,
    Vec<u8> => Binary,
    Var => Var,
);

impl From<&str> for Term {
    #[inline]
    fn from(s: &str) -> Self {
        Term::Str(s.to_owned())
    }
}

impl From<&[u8]> for Term {
    #[inline]
    fn from(bytes: &[u8]) -> Self {
        Term::Binary(bytes.to_vec())
    }
}

impl From<Vec<Term>> for Term {
    /// A vector of terms becomes a proper list.
    #[inline]
    fn from(elems: Vec<Term>) -> Self {
        Term::list(elems)
    }
}

impl From<&Term> for Term {
    #[inline]
    fn from(t: &Term) -> Self {
        t.clone()
    }
}

/// Convenience macros to construct tuples, lists, atoms and variables.
///
/// Arguments are converted with [`Term::from`], so plain Rust values can be
/// mixed with terms.
#[macro_export]
macro_rules! tuple {
    ($($arg:expr),* $(,)?) => {
        $crate::Term::tuple(::std::vec![$($crate::Term::from($arg)),*])
    };
}

#[macro_export]
macro_rules! list {
    // with tail
    ($($arg:expr),+ ; $tail:expr) => {
        $crate::Term::list_with_tail(
            ::std::vec![$($crate::Term::from($arg)),+],
            $crate::Term::from($tail),
        )
    };
    // proper list
    ($($arg:expr),* $(,)?) => {
        $crate::Term::list(::std::vec![$($crate::Term::from($arg)),*])
    };
}

#[macro_export]
macro_rules! atom {
    ($name:expr) => {
        $crate::Term::atom($name)
    };
}

#[macro_export]
macro_rules! var {
    ($name:expr) => {
        $crate::Term::var($name)
    };
    ($name:expr, $kind:ident) => {
        $crate::Term::typed_var($name, $crate::Kind::$kind)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_rank_matches_declaration_order() {
        for pair in Kind::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].rank() + 1, pair[1].rank());
        }
    }

    #[test]
    fn scalar_kinds() {
        assert!(Term::Int(1).is_scalar());
        assert!(Term::atom("ok").is_scalar());
        assert!(Term::var("X").is_scalar());
        assert!(Term::binary(vec![1, 2]).is_scalar());
        assert!(!tuple!(1, 2).is_scalar());
        assert!(!list![1].is_scalar());
        assert!(!Term::nil().is_scalar());
        assert!(!Term::map([]).is_scalar());
    }

    #[test]
    fn type_aliases_resolve() {
        assert_eq!(Kind::from_alias("int"), Some(Some(Kind::Int)));
        assert_eq!(Kind::from_alias("long"), Some(Some(Kind::Int)));
        assert_eq!(Kind::from_alias("integer"), Some(Some(Kind::Int)));
        assert_eq!(Kind::from_alias("str"), Some(Some(Kind::Str)));
        assert_eq!(Kind::from_alias("double"), Some(Some(Kind::Float)));
        assert_eq!(Kind::from_alias("boolean"), Some(Some(Kind::Bool)));
        assert_eq!(Kind::from_alias("char"), Some(Some(Kind::Byte)));
        assert_eq!(Kind::from_alias("ref"), Some(Some(Kind::Ref)));
        assert_eq!(Kind::from_alias("term"), Some(None));
        assert_eq!(Kind::from_alias("nope"), None);
    }

    #[test]
    fn canonical_type_names_are_aliases() {
        for kind in Kind::ALL.iter().filter(|k| **k != Kind::Var) {
            assert_eq!(
                Kind::from_alias(kind.type_name()),
                Some(Some(*kind)),
                "kind={kind:?}"
            );
        }
    }

    #[test]
    fn list_tail_is_folded() {
        let l = Term::list_with_tail(vec![Term::Int(1)], list![2, 3]);
        assert_eq!(l, list![1, 2, 3]);
        let Term::List(inner) = &l else {
            panic!("expected list");
        };
        assert!(inner.is_proper());

        let improper = Term::list_with_tail(
            vec![Term::Int(1)],
            Term::list_with_tail(vec![Term::Int(2)], Term::var("T")),
        );
        let Term::List(inner) = &improper else {
            panic!("expected list");
        };
        assert_eq!(inner.len(), 2);
        assert_eq!(inner.tail(), Some(&Term::var("T")));
    }

    #[test]
    fn list_with_tail_and_no_elements_is_the_tail() {
        assert_eq!(Term::list_with_tail(vec![], Term::var("T")), Term::var("T"));
    }

    #[test]
    fn macros_build_terms() {
        let t = tuple!(atom!("ok"), list![1, 2, 3]);
        assert_eq!(t.arity(), 2);
        assert_eq!(t.elements().map(|e| e.len()), Some(2));
        let l = list![1, 2; var!("T")];
        assert!(l.is_list());
        assert_eq!(l.arity(), 2);
        assert_eq!(var!("X", Int), Term::typed_var("X", Kind::Int));
    }

    #[test]
    fn from_conversions() {
        assert_eq!(Term::from(5i32), Term::Int(5));
        assert_eq!(Term::from(5u8), Term::Byte(5));
        assert_eq!(Term::from(1.5f64), Term::Float(1.5));
        assert_eq!(Term::from("x"), Term::Str("x".into()));
        assert_eq!(Term::from(true), Term::Bool(true));
        assert_eq!(Term::from(vec![Term::Int(1)]), list![1]);
        assert_eq!(Term::from(&b"ab"[..]), Term::Binary(vec![b'a', b'b']));
    }

    #[test]
    fn predicates() {
        assert!(Term::nil().is_nil());
        assert!(!list![1].is_nil());
        assert!(Term::Byte(1).is_number());
        assert!(Term::Float(1.0).is_number());
        assert!(!Term::atom("a").is_number());
        assert!(Term::map([(Term::atom("a"), Term::Int(1))]).is_map());
        assert_eq!(Term::map([(Term::atom("a"), Term::Int(1))]).arity(), 1);
    }

    #[test]
    fn var_accepts_only_its_kind() {
        let v = Var::typed("X", Kind::Int);
        assert!(v.accepts(&Term::Int(1)));
        assert!(!v.accepts(&Term::atom("foo")));
        assert!(Var::new("Y").accepts(&Term::atom("foo")));
        assert!(Var::new("_").is_anonymous());
        assert!(!Var::new("_X").is_anonymous());
    }

    #[test]
    fn clone_is_deep() {
        let t = tuple!(list![1, 2], "abc");
        let c = t.clone();
        assert_eq!(t, c);
        let (Term::Tuple(a), Term::Tuple(b)) = (&t, &c) else {
            panic!("expected tuples");
        };
        assert!(!std::ptr::eq(a.as_ptr(), b.as_ptr()));
    }
}
