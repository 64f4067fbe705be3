//! Recency-ordered doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a `SlotArena` and link to each other by `SlotId`, so the list
//! owns every `prev`/`next` link and callers only ever hold opaque handles.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_0   │ { value: C, prev: Some(id_1), next: None }  │
//!   │ id_1   │ { value: B, prev: Some(id_2), next: id_0 }  │
//!   │ id_2   │ { value: A, prev: None, next: Some(id_1) }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   youngest ─► [id_2] ◄──► [id_1] ◄──► [id_0] ◄── oldest
//! ```
//!
//! ## Operations
//! - `push_front(value)`: allocate a node as the new youngest
//! - `move_to_front(id)`: unlink + relink at the head, O(1)
//! - `back_id()`: the eviction candidate
//!
//! Nodes are never removed; a full cache overwrites the oldest node's value
//! through `get_mut` and then moves it to the front.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked recency list; the front is youngest, the back is oldest.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the youngest node's id.
    #[cfg(test)]
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the oldest node's id.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Allocates a node at the front and returns its `SlotId`.
    ///
    /// The first node pushed into an empty list is both youngest and oldest.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => {
                if let Some(node) = self.arena.get_mut(head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Makes `id` the youngest node; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.arena.get(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.unlink(id);
        self.link_front(id);
        true
    }

    /// Returns ids from youngest to oldest.
    pub fn iter_ids(&self) -> RecencyIds<'_, T> {
        RecencyIds {
            list: self,
            current: self.head,
            forward: true,
        }
    }

    /// Returns ids from oldest to youngest.
    pub fn iter_ids_rev(&self) -> RecencyIds<'_, T> {
        RecencyIds {
            list: self,
            current: self.tail,
            forward: false,
        }
    }

    // Unlinking the oldest node makes its predecessor the new oldest.
    fn unlink(&mut self, id: SlotId) {
        let Some((prev, next)) = self.arena.get(id).map(|node| (node.prev, node.next)) else {
            return;
        };

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }
    }

    fn link_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the list in both directions and checks every link.
    ///
    /// Verifies that both walks visit exactly `len()` distinct nodes, that each
    /// `next` is mirrored by the following node's `prev`, and that the head has
    /// no `prev` and the tail no `next`.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new(
                    "exactly one of youngest/oldest is set",
                ));
            }
            if !self.is_empty() {
                return Err(InvariantError::new(format!(
                    "list has no ends but {} nodes",
                    self.len()
                )));
            }
            return Ok(());
        }

        let mut seen = vec![false; self.len()];
        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("dangling link to slot {}", id.index()))
            })?;
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(InvariantError::new(format!(
                    "slot {} visited twice walking forward",
                    id.index()
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} prev link does not match its predecessor",
                    id.index()
                )));
            }
            prev = Some(id);
            current = node.next;
            count += 1;
        }
        if prev != self.tail {
            return Err(InvariantError::new("forward walk did not end at oldest"));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "forward walk visited {count} of {} nodes",
                self.len()
            )));
        }

        let backward = self.iter_ids_rev().take(self.len() + 1).count();
        if backward != self.len() {
            return Err(InvariantError::new(format!(
                "backward walk visited {backward} of {} nodes",
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `SlotId`s in recency order.
pub struct RecencyIds<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
    forward: bool,
}

impl<T> Iterator for RecencyIds<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = if self.forward { node.next } else { node.prev };
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter_ids()
            .filter_map(|id| list.get(id).copied())
            .collect()
    }

    #[test]
    fn recency_list_first_push_is_both_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(a));
        assert_eq!(list.len(), 1);
        list.check_links().unwrap();
    }

    #[test]
    fn recency_list_push_front_orders_youngest_first() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(values(&list), vec![3, 2, 1]);
        list.check_links().unwrap();
    }

    #[test]
    fn recency_list_move_oldest_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "c", "b"]);
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(b));
        list.check_links().unwrap();

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!["c", "a", "b"]);
        list.check_links().unwrap();
    }

    #[test]
    fn recency_list_move_middle_to_front() {
        let mut list = RecencyList::new();
        list.push_front(1);
        let mid = list.push_front(2);
        list.push_front(3);

        assert!(list.move_to_front(mid));
        assert_eq!(values(&list), vec![2, 3, 1]);
        list.check_links().unwrap();
    }

    #[test]
    fn recency_list_move_head_is_noop() {
        let mut list = RecencyList::new();
        list.push_front(1);
        let head = list.push_front(2);
        assert!(list.move_to_front(head));
        assert_eq!(values(&list), vec![2, 1]);
    }

    #[test]
    fn recency_list_move_unknown_id_fails() {
        let mut list: RecencyList<u8> = RecencyList::new();
        assert!(!list.move_to_front(SlotId(7)));
        list.check_links().unwrap();
    }

    #[test]
    fn recency_list_reverse_walk_matches_forward() {
        let mut list = RecencyList::with_capacity(4);
        let ids: Vec<_> = (0..4).map(|i| list.push_front(i)).collect();
        list.move_to_front(ids[1]);
        let mut forward: Vec<_> = list.iter_ids().collect();
        forward.reverse();
        let backward: Vec<_> = list.iter_ids_rev().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn recency_list_recycle_oldest_in_place() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");
        let oldest = list.back_id().unwrap();
        *list.get_mut(oldest).unwrap() = "c";
        list.move_to_front(oldest);
        assert_eq!(values(&list), vec!["c", "b"]);
        assert_eq!(list.len(), 2);
        list.check_links().unwrap();
    }

    #[test]
    fn recency_list_detects_corrupted_link() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        if let Some(node) = list.arena.get_mut(a) {
            node.prev = None;
        }
        assert!(list.check_links().is_err());
    }
}
