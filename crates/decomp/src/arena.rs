use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Typed handle that can address an [`Arena`] slot.
pub trait ArenaId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

/// A flat table of entities addressed by typed ids.
///
/// Ids are handed out in increasing order and never reused: removing an
/// entity leaves an empty slot, so a stale id can never alias a newer
/// entity.  Iteration visits live entities in id order.
#[derive(Clone, Debug)]
pub struct Arena<K, T> {
    slots: Vec<Option<T>>,
    live:  usize,
    _key:  PhantomData<K>,
}

impl<K: ArenaId, T> Default for Arena<K, T> {
    fn default() -> Self { Self::new() }
}

impl<K: ArenaId, T> Arena<K, T> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), live: 0, _key: PhantomData }
    }

    /// Number of live entities.
    #[inline] pub fn len(&self) -> usize { self.live }
    #[inline] pub fn is_empty(&self) -> bool { self.live == 0 }

    /// Store `value` under a fresh id.
    pub fn insert(&mut self, value: T) -> K {
        self.insert_with(|_| value)
    }

    /// Store the value built from its own (fresh) id.
    pub fn insert_with(&mut self, build: impl FnOnce(K) -> T) -> K {
        let id = K::from_index(self.slots.len());
        self.slots.push(Some(build(id)));
        self.live += 1;
        id
    }

    pub fn remove(&mut self, id: K) -> Option<T> {
        let value = self.slots.get_mut(id.index())?.take();
        if value.is_some() { self.live -= 1; }
        value
    }

    #[inline]
    pub fn contains(&self, id: K) -> bool { self.get(id).is_some() }

    #[inline]
    pub fn get(&self, id: K) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Live `(id, entity)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (K::from_index(i), v)))
    }

    /// Live ids in increasing order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

impl<K: ArenaId, T> Index<K> for Arena<K, T> {
    type Output = T;

    /// Panics on a removed or never-issued id; holding such an id across a
    /// mutation is a caller contract violation.
    fn index(&self, id: K) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale or unknown id {}", id.index()),
        }
    }
}

impl<K: ArenaId, T> IndexMut<K> for Arena<K, T> {
    fn index_mut(&mut self, id: K) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale or unknown id {}", id.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PointId;

    #[test]
    fn ids_are_never_reused() {
        let mut arena: Arena<PointId, &str> = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));
        let c = arena.insert("c");
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(arena.len(), 2);
        assert!(!arena.contains(a));
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn insert_with_sees_its_id() {
        let mut arena: Arena<PointId, PointId> = Arena::new();
        arena.insert(PointId(99));
        let id = arena.insert_with(|id| id);
        assert_eq!(arena[id], id);
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena: Arena<PointId, u8> = Arena::new();
        let a = arena.insert(1);
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "stale or unknown id")]
    fn indexing_a_removed_id_panics() {
        let mut arena: Arena<PointId, u8> = Arena::new();
        let a = arena.insert(1);
        arena.remove(a);
        let _ = arena[a];
    }
}
