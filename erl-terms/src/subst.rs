//! Variable substitution and generic traversal of term trees.

use crate::{Binding, Term, Var};
use std::borrow::Cow;

impl Term {
    /// Replaces every variable bound in `binding` with its bound term.
    ///
    /// Children are substituted before their parents and unbound variables
    /// are left in place.  Returns [`Cow::Borrowed`] when nothing changed, in
    /// which case no new term is allocated; [`Cow::Owned`] otherwise.
    ///
    /// ```
    /// # use erl_terms::{tuple, Binding, Term};
    /// # use std::borrow::Cow;
    /// let t = tuple!(Term::var("X"), Term::var("Y"));
    /// let mut b = Binding::new();
    /// b.bind("X", Term::Int(1));
    /// assert_eq!(t.subst(&b).into_owned(), tuple!(1, Term::var("Y")));
    /// assert!(matches!(Term::Int(1).subst(&b), Cow::Borrowed(_)));
    /// ```
    pub fn subst(&self, binding: &Binding) -> Cow<'_, Term> {
        match self {
            Term::Var(var) if !var.is_anonymous() => match binding.get(var.name()) {
                Some(bound) => Cow::Owned(bound.clone()),
                None => Cow::Borrowed(self),
            },
            Term::Tuple(elems) => match subst_seq(elems, binding) {
                Some(elems) => Cow::Owned(Term::Tuple(elems)),
                None => Cow::Borrowed(self),
            },
            Term::List(list) => {
                let elems = subst_seq(list.elems(), binding);
                let tail = list.tail().map(|t| t.subst(binding));
                let tail_changed = matches!(tail, Some(Cow::Owned(_)));
                if elems.is_none() && !tail_changed {
                    return Cow::Borrowed(self);
                }
                let elems = elems.unwrap_or_else(|| list.elems().to_vec());
                Cow::Owned(match tail {
                    // A bound tail may be a list; fold it back in.
                    Some(tail) => Term::list_with_tail(elems, tail.into_owned()),
                    None => Term::list(elems),
                })
            }
            Term::Map(map) => {
                let entries: Vec<_> = map
                    .iter()
                    .map(|(k, v)| (k.subst(binding), v.subst(binding)))
                    .collect();
                let changed = entries
                    .iter()
                    .any(|(k, v)| matches!(k, Cow::Owned(_)) || matches!(v, Cow::Owned(_)));
                if !changed {
                    return Cow::Borrowed(self);
                }
                Cow::Owned(Term::map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k.into_owned(), v.into_owned())),
                ))
            }
            _ => Cow::Borrowed(self),
        }
    }

    /// Folds `f` over the scalar leaves of the term, left to right.
    ///
    /// Tuples and lists visit their elements and then the list tail.  Maps
    /// visit their entries in insertion order as if each entry were a
    /// `{Key, Value}` tuple.  `f` is never called on a tuple, list or map.
    pub fn visit<A, F>(&self, acc: A, f: &mut F) -> A
    where
        F: FnMut(A, &Term) -> A,
    {
        match self {
            Term::Tuple(elems) => elems.iter().fold(acc, |acc, e| e.visit(acc, f)),
            Term::List(list) => {
                let acc = list.elems().iter().fold(acc, |acc, e| e.visit(acc, f));
                match list.tail() {
                    Some(tail) => tail.visit(acc, f),
                    None => acc,
                }
            }
            Term::Map(map) => map.iter().fold(acc, |acc, (k, v)| {
                let acc = k.visit(acc, f);
                v.visit(acc, f)
            }),
            scalar => f(acc, scalar),
        }
    }

    /// Returns the named variables of the term in order of first occurrence.
    /// The anonymous variable is not included.
    pub fn vars(&self) -> Vec<Var> {
        self.visit(Vec::new(), &mut |mut acc: Vec<Var>, t: &Term| {
            if let Term::Var(v) = t {
                if !v.is_anonymous() && !acc.iter().any(|seen| seen.name() == v.name()) {
                    acc.push(v.clone());
                }
            }
            acc
        })
    }

    /// Returns `true` if the term contains no variables.
    pub fn is_ground(&self) -> bool {
        self.visit(true, &mut |acc, t: &Term| acc && !t.is_var())
    }
}

/// Substitutes each element; `None` if no element changed.
fn subst_seq(elems: &[Term], binding: &Binding) -> Option<Vec<Term>> {
    let substituted: Vec<Cow<'_, Term>> = elems.iter().map(|e| e.subst(binding)).collect();
    if substituted.iter().all(|t| matches!(t, Cow::Borrowed(_))) {
        return None;
    }
    Some(substituted.into_iter().map(Cow::into_owned).collect())
}
