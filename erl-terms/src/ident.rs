//! Defines [`Atom`] and the node-scoped identifiers [`Pid`], [`Port`] and
//! [`Reference`].
//!
//! Identifiers are triples of an owning node atom, a numeric id and a
//! creation number.  Out-of-range ids and creations are masked to the widths
//! used by the Erlang distribution format, never rejected.

use core::fmt;
use core::hash::Hash;
use smartstring::alias::String;

/// Mask applied to pid and port ids (28 bits).
pub const ID_MASK: u32 = 0x0FFF_FFFF;

/// Mask applied to the first word of a reference id (18 bits).
pub const REF_ID_MASK: u32 = 0x0003_FFFF;

/// Mask applied to every creation number (2 bits).
pub const CREATION_MASK: u8 = 0x03;

/// An interned-style atom name.
///
/// Atoms shorter than 24 bytes are stored inline, longer ones on the heap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom(String);

impl Atom {
    /// Creates an atom with the given name.
    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(String::from(name.as_ref()))
    }

    /// Returns the name of the atom.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns `true` if the atom can be written without quotes, i.e. it
    /// matches `[a-z][A-Za-z0-9_@]*` and is not one of the boolean literals.
    pub fn is_bare(&self) -> bool {
        let s = self.as_str();
        if s == "true" || s == "false" {
            return false;
        }
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<std::string::String> for Atom {
    fn from(s: std::string::String) -> Self {
        Self(String::from(s))
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Atom").field(&self.as_str()).finish()
    }
}

/// Writes the atom in Erlang surface syntax, quoting it when necessary.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str(self.as_str());
        }
        f.write_str("'")?;
        for ch in self.as_str().chars() {
            match ch {
                '\'' => f.write_str("\\'")?,
                other => crate::display::write_escaped_char(f, other)?,
            }
        }
        f.write_str("'")
    }
}

/// A process identifier: `(node, id, creation)`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pid {
    node: Atom,
    id: u32,
    creation: u8,
}

impl Pid {
    /// Creates a pid, masking `id` to 28 bits and `creation` to 2 bits.
    pub fn new(node: impl Into<Atom>, id: u32, creation: u8) -> Self {
        Self {
            node: node.into(),
            id: id & ID_MASK,
            creation: creation & CREATION_MASK,
        }
    }

    /// Returns the owning node.
    #[inline]
    pub fn node(&self) -> &Atom {
        &self.node
    }

    /// Returns the masked id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the masked creation number.
    #[inline]
    pub fn creation(&self) -> u8 {
        self.creation
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pid({}.{}.{})", self.node.as_str(), self.id, self.creation)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#Pid<{}.{}.{}>", self.node.as_str(), self.id, self.creation)
    }
}

/// A port identifier: `(node, id, creation)`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port {
    node: Atom,
    id: u32,
    creation: u8,
}

impl Port {
    /// Creates a port, masking `id` to 28 bits and `creation` to 2 bits.
    pub fn new(node: impl Into<Atom>, id: u32, creation: u8) -> Self {
        Self {
            node: node.into(),
            id: id & ID_MASK,
            creation: creation & CREATION_MASK,
        }
    }

    #[inline]
    pub fn node(&self) -> &Atom {
        &self.node
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn creation(&self) -> u8 {
        self.creation
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Port({}.{}.{})", self.node.as_str(), self.id, self.creation)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#Port<{}.{}.{}>", self.node.as_str(), self.id, self.creation)
    }
}

/// A node-scoped reference.
///
/// The id is kept in the three-word layout of the Erlang external format,
/// most significant word last.  Ordering compares the node, then the words
/// from most to least significant, then the creation.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    node: Atom,
    ids: [u32; 3],
    creation: u8,
}

impl Reference {
    /// Creates a reference from its three id words.  The first word is
    /// masked to 18 bits and `creation` to 2 bits.
    pub fn new(node: impl Into<Atom>, ids: [u32; 3], creation: u8) -> Self {
        Self {
            node: node.into(),
            ids: [ids[0] & REF_ID_MASK, ids[1], ids[2]],
            creation: creation & CREATION_MASK,
        }
    }

    /// Creates a reference from a 64-bit serial.  Distinct serials always
    /// produce distinct references.
    pub fn from_id(node: impl Into<Atom>, id: u64, creation: u8) -> Self {
        let w0 = (id as u32) & REF_ID_MASK;
        let w1 = (id >> 18) as u32;
        let w2 = (id >> 50) as u32;
        Self::new(node, [w0, w1, w2], creation)
    }

    #[inline]
    pub fn node(&self) -> &Atom {
        &self.node
    }

    /// Returns the id words, least significant first.
    #[inline]
    pub fn ids(&self) -> [u32; 3] {
        self.ids
    }

    /// Returns the 64-bit serial this reference was built from with
    /// [`Reference::from_id`].
    pub fn id(&self) -> u64 {
        (self.ids[0] as u64) | ((self.ids[1] as u64) << 18) | ((self.ids[2] as u64) << 50)
    }

    #[inline]
    pub fn creation(&self) -> u8 {
        self.creation
    }
}

impl PartialOrd for Reference {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reference {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.node
            .cmp(&other.node)
            .then_with(|| self.ids[2].cmp(&other.ids[2]))
            .then_with(|| self.ids[1].cmp(&other.ids[1]))
            .then_with(|| self.ids[0].cmp(&other.ids[0]))
            .then_with(|| self.creation.cmp(&other.creation))
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ref({}.{}.{}.{})",
            self.node.as_str(),
            self.ids[2],
            self.ids[1],
            self.ids[0]
        )
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#Ref<{}.{}.{}.{}>",
            self.node.as_str(),
            self.ids[2],
            self.ids[1],
            self.ids[0]
        )
    }
}
