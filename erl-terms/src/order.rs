//! Structural equality, total ordering and hashing for [`Term`].
//!
//! Terms of different kinds compare by [`Kind`] rank.  Terms of the same
//! kind compare by payload:
//!
//! - numbers by magnitude, floats with [`f64::total_cmp`];
//! - atoms, strings and binaries bytewise;
//! - pids, ports and references by `(node, id, creation)`;
//! - tuples element by element, then the shorter one first;
//! - lists like tuples, then by tail (a proper list sorts before an
//!   improper one with the same elements);
//! - maps entry by entry in insertion order, then the smaller one first;
//! - variables by name, then constraint.
//!
//! Equality agrees with the ordering and with hashing, so terms can be used
//! as keys of hash maps and B-tree maps alike.

use crate::{Kind, List, Term};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use indexmap::IndexMap;

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match (self, other) {
            (Term::Byte(a), Term::Byte(b)) => a == b,
            (Term::Int(a), Term::Int(b)) => a == b,
            // Bitwise identity, in line with `total_cmp` and the hash.
            (Term::Float(a), Term::Float(b)) => a.to_bits() == b.to_bits(),
            (Term::Bool(a), Term::Bool(b)) => a == b,
            (Term::Atom(a), Term::Atom(b)) => a == b,
            (Term::Ref(a), Term::Ref(b)) => a == b,
            (Term::Port(a), Term::Port(b)) => a == b,
            (Term::Pid(a), Term::Pid(b)) => a == b,
            (Term::Tuple(a), Term::Tuple(b)) => a == b,
            (Term::Map(a), Term::Map(b)) => map_eq(a, b),
            (Term::Str(a), Term::Str(b)) => a == b,
            (Term::List(a), Term::List(b)) => a.elems() == b.elems() && a.tail() == b.tail(),
            (Term::Binary(a), Term::Binary(b)) => a == b,
            (Term::Var(a), Term::Var(b)) => a == b,
            _ => unreachable!(),
        }
    }
}

impl Eq for Term {}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_kind = Kind::compare_kinds(self, other);
        if by_kind != Ordering::Equal {
            return by_kind;
        }
        match (self, other) {
            (Term::Byte(a), Term::Byte(b)) => a.cmp(b),
            (Term::Int(a), Term::Int(b)) => a.cmp(b),
            (Term::Float(a), Term::Float(b)) => a.total_cmp(b),
            (Term::Bool(a), Term::Bool(b)) => a.cmp(b),
            (Term::Atom(a), Term::Atom(b)) => a.cmp(b),
            (Term::Ref(a), Term::Ref(b)) => a.cmp(b),
            (Term::Port(a), Term::Port(b)) => a.cmp(b),
            (Term::Pid(a), Term::Pid(b)) => a.cmp(b),
            // Slices already compare lexicographically, shorter first.
            (Term::Tuple(a), Term::Tuple(b)) => a.as_slice().cmp(b.as_slice()),
            (Term::Map(a), Term::Map(b)) => map_cmp(a, b),
            (Term::Str(a), Term::Str(b)) => a.cmp(b),
            (Term::List(a), Term::List(b)) => list_cmp(a, b),
            (Term::Binary(a), Term::Binary(b)) => a.cmp(b),
            (Term::Var(a), Term::Var(b)) => a.cmp(b),
            _ => unreachable!(),
        }
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.kind().rank());
        match self {
            Term::Byte(b) => b.hash(state),
            Term::Int(i) => i.hash(state),
            Term::Float(r) => r.to_bits().hash(state),
            Term::Bool(b) => b.hash(state),
            Term::Atom(a) => a.hash(state),
            Term::Ref(r) => r.hash(state),
            Term::Port(p) => p.hash(state),
            Term::Pid(p) => p.hash(state),
            Term::Tuple(elems) => elems.hash(state),
            Term::Map(map) => {
                state.write_usize(map.len());
                for (k, v) in map {
                    k.hash(state);
                    v.hash(state);
                }
            }
            Term::Str(s) => s.hash(state),
            Term::List(list) => {
                list.elems().hash(state);
                list.tail().hash(state);
            }
            Term::Binary(bytes) => bytes.hash(state),
            Term::Var(v) => v.hash(state),
        }
    }
}

/// Lists compare by elements, then length, then tail.
fn list_cmp(a: &List, b: &List) -> Ordering {
    a.elems()
        .cmp(b.elems())
        .then_with(|| a.tail().cmp(&b.tail()))
}

/// Maps are equal when they hold the same entries in the same order.
fn map_eq(a: &IndexMap<Term, Term>, b: &IndexMap<Term, Term>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

fn map_cmp(a: &IndexMap<Term, Term>, b: &IndexMap<Term, Term>) -> Ordering {
    for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
        let ord = ka.cmp(kb).then_with(|| va.cmp(vb));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

impl Kind {
    /// Compares two terms by kind rank only.
    #[inline]
    pub fn compare_kinds(a: &Term, b: &Term) -> Ordering {
        a.kind().cmp(&b.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, tuple, Atom, Pid, Port, Reference};
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(t: &Term) -> u64 {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    }

    fn one_of_each_kind() -> Vec<Term> {
        vec![
            Term::Byte(200),
            Term::Int(-5),
            Term::Float(-1e9),
            Term::Bool(false),
            Term::atom("a"),
            Term::Ref(Reference::from_id("n", 1, 0)),
            Term::Port(Port::new("n", 1, 0)),
            Term::Pid(Pid::new("n", 1, 0)),
            tuple!(),
            Term::map([]),
            Term::str(""),
            Term::nil(),
            Term::binary(Vec::new()),
            Term::var("A"),
        ]
    }

    #[test]
    fn cross_kind_order_follows_rank() {
        let terms = one_of_each_kind();
        for pair in terms.windows(2) {
            assert!(pair[0] < pair[1], "{:?} < {:?}", pair[0], pair[1]);
        }
        // Payload never overrides rank.
        assert!(Term::Byte(255) < Term::Int(i64::MIN));
        assert!(Term::Int(i64::MAX) < Term::Float(f64::MIN));
        assert!(Term::Bool(true) < Term::atom(""));
    }

    #[test]
    fn tuple_order_is_lexicographic_then_length() {
        assert!(tuple!(1, 2) < tuple!(1, 3));
        assert!(tuple!(1, 2) < tuple!(1, 2, 0));
        assert!(tuple!(2) > tuple!(1, 9, 9));
        assert_eq!(tuple!(1, "a").cmp(&tuple!(1, "a")), Ordering::Equal);
    }

    #[test]
    fn list_order_compares_tail_last() {
        assert!(list![1, 2] < list![1, 2, 3]);
        assert!(list![1, 2] < list![1, 2; Term::var("T")]);
        assert!(list![1; Term::atom("a")] < list![1; Term::atom("b")]);
        assert!(list![1; Term::atom("a")] < list![2]);
    }

    #[test]
    fn map_order_and_equality_use_insertion_order() {
        let a = Term::map([
            (Term::atom("x"), Term::Int(1)),
            (Term::atom("y"), Term::Int(2)),
        ]);
        let b = Term::map([
            (Term::atom("y"), Term::Int(2)),
            (Term::atom("x"), Term::Int(1)),
        ]);
        assert_ne!(a, b);
        assert!(a < b);
        let c = Term::map([(Term::atom("x"), Term::Int(1))]);
        assert!(c < a);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn floats_use_total_order() {
        assert!(Term::Float(-0.0) < Term::Float(0.0));
        assert_ne!(Term::Float(-0.0), Term::Float(0.0));
        assert_eq!(Term::Float(f64::NAN), Term::Float(f64::NAN));
        assert!(Term::Float(f64::INFINITY) < Term::Float(f64::NAN));
    }

    #[test]
    fn different_kinds_are_never_equal() {
        assert_ne!(Term::Int(65), Term::Byte(65));
        assert_ne!(Term::Int(1), Term::Float(1.0));
        assert_ne!(Term::atom("abc"), Term::str("abc"));
        assert_ne!(Term::str("abc"), Term::binary(*b"abc"));
        assert_ne!(Term::atom("true"), Term::Bool(true));
    }

    #[test]
    fn variables_order_by_name_then_constraint() {
        assert!(Term::var("A") < Term::var("B"));
        assert!(Term::var("X") < Term::typed_var("X", Kind::Int));
        assert!(Term::typed_var("X", Kind::Int) < Term::typed_var("X", Kind::Atom));
    }

    #[test]
    fn terms_work_as_hash_keys() {
        let mut set = HashSet::new();
        for t in one_of_each_kind() {
            assert!(set.insert(t.clone()));
            assert!(!set.insert(t));
        }
        assert_eq!(hash_of(&tuple!(1, list![2])), hash_of(&tuple!(1, list![2])));
        assert_eq!(set.len(), Kind::ALL.len());
    }

    #[test]
    fn atoms_compare_by_name() {
        assert!(Atom::new("abc") < Atom::new("abd"));
        assert!(Term::atom("Z") < Term::atom("a"));
    }

    #[test]
    fn compare_kinds_ignores_payload() {
        assert_eq!(
            Kind::compare_kinds(&Term::Int(100), &Term::Int(-1)),
            Ordering::Equal
        );
        assert_eq!(
            Kind::compare_kinds(&Term::Int(100), &Term::Float(-1.0)),
            Ordering::Less
        );
    }

    fn arb_scalar() -> impl Strategy<Value = Term> {
        prop_oneof![
            any::<u8>().prop_map(Term::Byte),
            any::<i64>().prop_map(Term::Int),
            any::<f64>().prop_map(Term::Float),
            any::<bool>().prop_map(Term::Bool),
            "[a-z][a-z0-9_]{0,6}".prop_map(Term::atom),
            ".{0,8}".prop_map(Term::str),
            proptest::collection::vec(any::<u8>(), 0..6).prop_map(Term::Binary),
            "[A-Z][a-z]{0,3}".prop_map(Term::var),
        ]
    }

    fn arb_term() -> impl Strategy<Value = Term> {
        arb_scalar().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Term::tuple),
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Term::list),
                (proptest::collection::vec(inner.clone(), 1..3), inner.clone())
                    .prop_map(|(elems, tail)| Term::list_with_tail(elems, tail)),
                proptest::collection::vec((inner.clone(), inner), 0..3).prop_map(Term::map),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn clone_is_equal_and_hashes_alike(t in arb_term()) {
            let c = t.clone();
            prop_assert_eq!(&t, &c);
            prop_assert_eq!(t.cmp(&c), Ordering::Equal);
            prop_assert_eq!(hash_of(&t), hash_of(&c));
        }

        #[test]
        fn order_is_antisymmetric(a in arb_term(), b in arb_term()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
        }

        #[test]
        fn order_is_transitive(a in arb_term(), b in arb_term(), c in arb_term()) {
            let mut v = [a, b, c];
            v.sort();
            prop_assert!(v[0] <= v[1]);
            prop_assert!(v[1] <= v[2]);
            prop_assert!(v[0] <= v[2]);
        }

        #[test]
        fn tuple_prefix_sorts_first(
            elems in proptest::collection::vec(arb_scalar(), 0..4),
            extra in arb_scalar(),
        ) {
            let short = Term::tuple(elems.clone());
            let mut longer = elems;
            longer.push(extra);
            prop_assert!(short < Term::tuple(longer));
        }
    }
}
