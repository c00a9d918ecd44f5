//! Concurrent registry correlating monitor references with monitored pids.
//!
//! References are minted by a [`RefMinter`].  The registry itself is a
//! sharded [`DashMap`]; every operation is atomic per key and callers never
//! lock anything themselves.

use crate::{Atom, Pid, Reference};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of fresh node-scoped references.
pub trait RefMinter: Send + Sync {
    /// Returns a reference never returned before by this minter.
    fn create_reference(&self) -> Reference;
}

impl<T: RefMinter + ?Sized> RefMinter for Arc<T> {
    fn create_reference(&self) -> Reference {
        (**self).create_reference()
    }
}

/// Mints references for one node from an atomic 64-bit serial.
#[derive(Debug)]
pub struct NodeRefs {
    node: Atom,
    creation: u8,
    next: AtomicU64,
}

impl NodeRefs {
    pub fn new(node: impl Into<Atom>, creation: u8) -> Self {
        Self {
            node: node.into(),
            creation,
            next: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn node(&self) -> &Atom {
        &self.node
    }
}

impl RefMinter for NodeRefs {
    fn create_reference(&self) -> Reference {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        Reference::from_id(self.node.clone(), id, self.creation)
    }
}

/// Maps monitor references to the pids they monitor.
#[derive(Debug)]
pub struct MonitorRegistry<M: RefMinter = NodeRefs> {
    minter: M,
    monitors: DashMap<Reference, Pid>,
}

impl MonitorRegistry<NodeRefs> {
    /// Creates a registry minting references for `node`.
    pub fn for_node(node: impl Into<Atom>, creation: u8) -> Self {
        Self::new(NodeRefs::new(node, creation))
    }
}

impl<M: RefMinter> MonitorRegistry<M> {
    pub fn new(minter: M) -> Self {
        Self {
            minter,
            monitors: DashMap::new(),
        }
    }

    /// Mints a fresh reference and records it as monitoring `pid`.
    pub fn add(&self, pid: Pid) -> Reference {
        let reference = self.minter.create_reference();
        log::debug!("monitor {reference} -> {pid}");
        if let Some(old) = self.monitors.insert(reference.clone(), pid) {
            log::warn!("minted reference {reference} was already monitoring {old}");
        }
        reference
    }

    /// Records `reference` as monitoring `pid`.
    ///
    /// Returns `true` if the reference was not registered before.  A racing
    /// insert for the same reference overwrites it; exactly one of the
    /// racing callers sees `true`.
    pub fn insert(&self, reference: Reference, pid: Pid) -> bool {
        let previous = self.monitors.insert(reference.clone(), pid);
        if let Some(old) = &previous {
            log::debug!("monitor {reference} overwrote {old}");
        }
        previous.is_none()
    }

    /// Removes `reference`, returning whether it was registered.
    pub fn remove(&self, reference: &Reference) -> bool {
        self.take(reference).is_some()
    }

    /// Removes `reference` and returns the pid it monitored.
    pub fn take(&self, reference: &Reference) -> Option<Pid> {
        let removed = self.monitors.remove(reference).map(|(_, pid)| pid);
        if removed.is_some() {
            log::debug!("demonitor {reference}");
        }
        removed
    }

    /// Returns the pid monitored by `reference`.
    pub fn get(&self, reference: &Reference) -> Option<Pid> {
        self.monitors.get(reference).map(|entry| entry.value().clone())
    }

    #[inline]
    pub fn contains(&self, reference: &Reference) -> bool {
        self.monitors.contains_key(reference)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Copies out the current `(reference, pid)` pairs.  Concurrent
    /// updates may or may not be reflected.
    pub fn snapshot(&self) -> Vec<(Reference, Pid)> {
        self.monitors
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn clear(&self) {
        self.monitors.clear();
    }

    #[inline]
    pub fn minter(&self) -> &M {
        &self.minter
    }
}
