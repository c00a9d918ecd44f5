//! One-sided pattern matching of terms with variable binding.
//!
//! A pattern is a [`Term`] that may contain [`Var`](crate::Var)s; the
//! subject is matched against it structurally.  A variable binds on its
//! first occurrence and must match an equal term on every later one, so
//! `{X, X}` matches `{5, 5}` but not `{5, 6}`.
//!
//! Matching is not transactional.  When a tuple or list fails partway,
//! bindings made by the elements that did match stay in the caller's
//! [`Binding`].  [`Term::match_term`] starts from a fresh binding and
//! discards it on failure, so only [`Term::match_binding`] callers can
//! observe this.

use crate::Term;
use core::fmt;
use indexmap::IndexMap;
use smartstring::alias::String;

/// Variable bindings collected by a match, in binding order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binding {
    vars: IndexMap<String, Term>,
}

impl Binding {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the term bound to `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.vars.get(name)
    }

    /// Binds `name` to `term`, returning the previous binding if any.
    pub fn bind(&mut self, name: impl AsRef<str>, term: Term) -> Option<Term> {
        self.vars.insert(String::from(name.as_ref()), term)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over `(name, term)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Adds every binding of `other` that is not already present.
    ///
    /// Returns `false`, leaving `self` untouched, if a name is bound to
    /// different terms in the two bindings.
    pub fn merge(&mut self, other: &Binding) -> bool {
        let conflict = other
            .iter()
            .any(|(name, term)| self.get(name).is_some_and(|bound| bound != term));
        if conflict {
            return false;
        }
        for (name, term) in other.iter() {
            if !self.contains(name) {
                self.bind(name, term.clone());
            }
        }
        true
    }

    #[inline]
    pub fn into_inner(self) -> IndexMap<String, Term> {
        self.vars
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, term)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {term}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Binding {
    type Item = (String, Term);
    type IntoIter = indexmap::map::IntoIter<String, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<'a> IntoIterator for &'a Binding {
    type Item = (&'a String, &'a Term);
    type IntoIter = indexmap::map::Iter<'a, String, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

impl FromIterator<(String, Term)> for Binding {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl Term {
    /// Matches `subject` against this pattern, returning the bindings on
    /// success.
    pub fn match_term(&self, subject: &Term) -> Option<Binding> {
        let mut binding = Binding::new();
        self.match_binding(subject, &mut binding).then_some(binding)
    }

    /// Matches `subject` against this pattern, extending `binding` in place.
    /// Variables already bound in `binding` must match equal terms.
    pub fn match_binding(&self, subject: &Term, binding: &mut Binding) -> bool {
        let ok = match_into(self, subject, binding);
        if !ok {
            log::trace!("pattern {self} does not match {subject}");
        }
        ok
    }

    /// Returns `true` if `subject` matches this pattern.  For a pattern
    /// without variables this is equality, except for non-empty maps.
    #[inline]
    pub fn matches(&self, subject: &Term) -> bool {
        match_into(self, subject, &mut Binding::new())
    }
}

fn match_into(pattern: &Term, subject: &Term, binding: &mut Binding) -> bool {
    match (pattern, subject) {
        (Term::Var(var), _) => {
            if !var.accepts(subject) {
                log::trace!("{var} rejects {} {subject}", subject.kind());
                return false;
            }
            if var.is_anonymous() {
                return true;
            }
            match binding.get(var.name()) {
                Some(bound) => bound == subject,
                None => {
                    binding.bind(var.name(), subject.clone());
                    true
                }
            }
        }
        (Term::Tuple(ps), Term::Tuple(ss)) => ps.len() == ss.len() && match_all(ps, ss, binding),
        (Term::List(p), Term::List(s)) => match p.tail() {
            None => {
                s.is_proper()
                    && p.len() == s.len()
                    && match_all(p.elems(), s.elems(), binding)
            }
            Some(tail) => {
                if s.len() < p.len() {
                    return false;
                }
                let (head, rest) = s.elems().split_at(p.len());
                if !match_all(p.elems(), head, binding) {
                    return false;
                }
                let rest = Term::list_with_tail(
                    rest.to_vec(),
                    s.tail().cloned().unwrap_or_else(Term::nil),
                );
                match_into(tail, &rest, binding)
            }
        },
        // TODO: match map patterns by key once subset semantics are settled.
        (Term::Map(p), Term::Map(s)) => p.is_empty() && s.is_empty(),
        _ => pattern == subject,
    }
}

/// Matches pairwise, stopping at the first failure.
fn match_all(patterns: &[Term], subjects: &[Term], binding: &mut Binding) -> bool {
    patterns
        .iter()
        .zip(subjects)
        .all(|(p, s)| match_into(p, s, binding))
}
