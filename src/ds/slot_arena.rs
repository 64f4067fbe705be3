//! Dense, append-only node storage addressed by stable `SlotId` handles.
//!
//! Slots are never freed individually: a bounded cache recycles its oldest
//! node in place once full, so the arena only grows until it reaches the
//! cache capacity and is dropped as a whole.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<T>,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Reserves room for `capacity` slots up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        self.slots.push(value);
        SlotId(self.slots.len() - 1)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_assigns_dense_ids() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
    }

    #[test]
    fn slot_arena_get_mut_overwrites_in_place() {
        let mut arena = SlotArena::with_capacity(4);
        let id = arena.insert(10);
        if let Some(value) = arena.get_mut(id) {
            *value = 20;
        }
        assert_eq!(arena.get(id), Some(&20));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn slot_arena_unknown_id_is_absent() {
        let arena: SlotArena<u8> = SlotArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.get(SlotId(0)), None);
        assert_eq!(arena.get(SlotId(3)), None);
    }
}
