//! Persistent event log for immutable aggregates.
//!
//! An [`EventList`] is a singly-linked cons list built newest-first. Pushing
//! allocates one node that points at the unchanged previous list, so every
//! derived aggregate shares its history with the instance it came from. Nodes
//! are never mutated after construction.

use std::sync::Arc;

use crate::commit::materialize;
use crate::{Commit, CommitBuilder, CommitLocation, DomainEvent, EventLocation, IdGenerator};

/// Pending events of one immutable aggregate instance.
///
/// An empty list is the root; every other list is a node holding one event and
/// the list it was pushed onto.
pub struct EventList<E> {
    head: Option<Arc<EventListNode<E>>>,
}

struct EventListNode<E> {
    event: E,
    previous: EventList<E>,
    len: usize,
}

impl<E> EventList<E> {
    /// Creates the root of a new list.
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Returns a new list with `event` recorded after every event of `self`.
    ///
    /// `self` is left untouched and shared by the returned list.
    pub fn push(&self, event: E) -> Self {
        let node = EventListNode {
            event,
            previous: self.clone(),
            len: self.len() + 1,
        };
        Self {
            head: Some(Arc::new(node)),
        }
    }

    /// Returns true for the root list.
    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |node| node.len)
    }

    /// The most recently pushed event.
    pub fn last(&self) -> Option<&E> {
        self.head.as_ref().map(|node| &node.event)
    }

    /// The list this one was pushed onto, or `None` for the root.
    pub fn previous(&self) -> Option<&EventList<E>> {
        self.head.as_ref().map(|node| &node.previous)
    }

    /// Iterates newest to oldest.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter { current: self }
    }

    /// Returns the events oldest first.
    pub fn to_vec(&self) -> Vec<&E> {
        let mut events: Vec<&E> = self.iter().collect();
        events.reverse();
        events
    }

    /// Returns true if both lists are the same node (or both the root).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<E> Clone for EventList<E> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<E> Default for EventList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for EventList<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

// Unlinks uniquely owned nodes one at a time so long chains do not recurse.
impl<E> Drop for EventList<E> {
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            head = match Arc::try_unwrap(node) {
                Ok(mut node) => node.previous.head.take(),
                Err(_) => None,
            };
        }
    }
}

/// Iterator over an [`EventList`], newest event first.
pub struct Iter<'a, E> {
    current: &'a EventList<E>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.head.as_deref()?;
        self.current = &node.previous;
        Some(&node.event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.current.len();
        (len, Some(len))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<'a, E> IntoIterator for &'a EventList<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: DomainEvent> CommitBuilder for EventList<E> {
    type Event = E;

    // Emission order is restored by walking back to the root first.
    fn build_commit_with(
        &self,
        commit_location: CommitLocation,
        start: EventLocation,
        ids: &dyn IdGenerator,
    ) -> Commit<E> {
        materialize(commit_location, &start, self.to_vec(), ids)
    }
}
