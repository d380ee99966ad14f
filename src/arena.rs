use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

/// Slot index of the head sentinel. The entry after it is the most recently used.
pub(crate) const HEAD: usize = 0;
/// Slot index of the tail sentinel. The entry before it is the least recently used.
pub(crate) const TAIL: usize = 1;

/// Upper bound on how many slots are reserved up front.
///
/// Larger caches grow the arena on demand, so a huge capacity does not
/// allocate memory it may never use.
pub(crate) const PREALLOCATE_LIMIT: usize = 4096;

/// A slot in the arena.
///
/// Holds an optional value and the indices of its neighbours in the list.
/// Sentinel slots and slots on the free list carry no value.
struct Slot<T> {
    val: Option<T>,
    /// Neighbour towards the head (more recently used).
    prev: usize,
    /// Neighbour towards the tail (less recently used).
    next: usize,
}

impl<T> Slot<T> {
    fn sentinel() -> Self {
        Slot {
            val: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// A doubly linked list whose nodes live in a flat `Vec` and link to each
/// other by index.
///
/// Two sentinel slots ([`HEAD`] and [`TAIL`]) are allocated at construction
/// and never removed, so linking and unlinking never branch on the list
/// boundaries. Slots vacated by [`remove`](Arena::remove) are pushed onto a
/// free list and reused by the next [`push_front`](Arena::push_front), which
/// keeps the arena at `2 + peak length` slots.
///
/// Indices handed out by `push_front` stay valid until that entry is removed
/// or the arena is cleared.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Creates an empty list, reserving room for up to `expected` entries.
    pub(crate) fn new(expected: usize) -> Self {
        let reserve = expected.min(PREALLOCATE_LIMIT).saturating_add(2);
        let mut slots = Vec::with_capacity(reserve);
        slots.push(Slot::sentinel());
        slots.push(Slot::sentinel());
        Arena {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots allocated, sentinels and free slots included.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Index of the most recently used entry.
    #[inline]
    pub(crate) fn front(&self) -> Option<usize> {
        let idx = self.slots[HEAD].next;
        (idx != TAIL).then_some(idx)
    }

    /// Index of the least recently used entry.
    #[inline]
    pub(crate) fn back(&self) -> Option<usize> {
        let idx = self.slots[TAIL].prev;
        (idx != HEAD).then_some(idx)
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).and_then(|slot| slot.val.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx).and_then(|slot| slot.val.as_mut())
    }

    /// Inserts `val` right after the head sentinel and returns its index.
    pub(crate) fn push_front(&mut self, val: T) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx].val = Some(val);
                idx
            }
            None => {
                self.slots.push(Slot {
                    val: Some(val),
                    prev: HEAD,
                    next: TAIL,
                });
                self.slots.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        idx
    }

    /// Moves an occupied slot to the front of the list.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if !self.is_occupied(idx) || self.slots[HEAD].next == idx {
            return;
        }
        self.detach(idx);
        self.attach(idx);
    }

    /// Swaps the value stored at `idx`, returning the previous one.
    pub(crate) fn replace(&mut self, idx: usize, val: T) -> Option<T> {
        if !self.is_occupied(idx) {
            return None;
        }
        self.slots[idx].val.replace(val)
    }

    /// Unlinks the entry at `idx`, frees its slot and returns the value.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<T> {
        if !self.is_occupied(idx) {
            return None;
        }
        self.detach(idx);
        self.len -= 1;
        self.free.push(idx);
        self.slots[idx].val.take()
    }

    /// Removes the least recently used entry.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let idx = self.back()?;
        self.remove(idx)
    }

    /// Drops every entry and releases all non-sentinel slots.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    /// Iterates from the most to the least recently used entry.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: self,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }

    #[inline]
    fn is_occupied(&self, idx: usize) -> bool {
        idx != HEAD && idx != TAIL && self.get(idx).is_some()
    }

    /// Links a detached slot right after the head sentinel.
    fn attach(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    /// Unlinks a slot from its neighbours. The slot's own links go stale.
    fn detach(&mut self, idx: usize) {
        let Slot { prev, next, .. } = self.slots[idx];
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Iterator over list entries in recency order.
pub(crate) struct Iter<'a, T> {
    arena: &'a Arena<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.arena.slots[self.front];
        self.front = slot.next;
        self.remaining -= 1;
        slot.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.arena.slots[self.back];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.val.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect(arena: &Arena<u32>) -> Vec<u32> {
        arena.iter().copied().collect()
    }

    #[test]
    fn test_new_arena_links_sentinels() {
        let arena: Arena<u32> = Arena::new(4);
        assert!(arena.is_empty());
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(arena.front(), None);
        assert_eq!(arena.back(), None);
        assert_eq!(arena.iter().next(), None);
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut arena = Arena::new(4);
        arena.push_front(1);
        arena.push_front(2);
        arena.push_front(3);
        assert_eq!(arena.len(), 3);
        assert_eq!(collect(&arena), [3, 2, 1]);
        assert_eq!(arena.iter().rev().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_move_to_front() {
        let mut arena = Arena::new(4);
        let a = arena.push_front(1);
        let b = arena.push_front(2);
        arena.push_front(3);

        arena.move_to_front(a);
        assert_eq!(collect(&arena), [1, 3, 2]);

        // Already at the front
        arena.move_to_front(a);
        assert_eq!(collect(&arena), [1, 3, 2]);

        arena.move_to_front(b);
        assert_eq!(collect(&arena), [2, 1, 3]);
        assert_eq!(arena.get(arena.back().unwrap()), Some(&3));
    }

    #[test]
    fn test_sentinels_are_not_entries() {
        let mut arena = Arena::new(2);
        arena.push_front(7);
        assert_eq!(arena.get(HEAD), None);
        assert_eq!(arena.get(TAIL), None);
        assert_eq!(arena.remove(HEAD), None);
        assert_eq!(arena.remove(TAIL), None);
        arena.move_to_front(TAIL);
        assert_eq!(collect(&arena), [7]);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_remove_reuses_slots() {
        let mut arena = Arena::new(2);
        let a = arena.push_front(1);
        let b = arena.push_front(2);
        assert_eq!(arena.slot_count(), 4);

        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.remove(a), None);
        let c = arena.push_front(3);
        assert_eq!(c, a);
        assert_eq!(arena.slot_count(), 4);
        assert_eq!(collect(&arena), [3, 2]);

        assert_eq!(arena.remove_last(), Some(2));
        assert_eq!(arena.get(b), None);
        assert_eq!(collect(&arena), [3]);
    }

    #[test]
    fn test_replace() {
        let mut arena = Arena::new(2);
        let a = arena.push_front(1);
        assert_eq!(arena.replace(a, 10), Some(1));
        assert_eq!(arena.get(a), Some(&10));
        assert_eq!(arena.replace(HEAD, 5), None);
    }

    #[test]
    fn test_clear_resets_to_sentinels() {
        let mut arena = Arena::new(8);
        for i in 0..8 {
            arena.push_front(i);
        }
        arena.remove_last();
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(arena.front(), None);
        arena.push_front(42);
        assert_eq!(collect(&arena), [42]);
    }

    #[test]
    fn test_iter_from_both_ends_meets_in_middle() {
        let mut arena = Arena::new(4);
        for i in 1..=4 {
            arena.push_front(i);
        }
        let mut iter = arena.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&4));
        assert_eq!(iter.next_back(), Some(&1));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }
}
