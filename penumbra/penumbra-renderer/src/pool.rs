//! Free-list pool for per-pass working records. Items move out on fetch and back on release,
//! so no two users ever alias one item.

/// Clears an item back to its empty state while keeping its allocations.
pub trait Reset {
    fn reset(&mut self);
}

pub struct Pool<T> {
    free: Vec<T>,
    /// Maximum number of idle items kept between fetches.
    capacity: usize,
    created: usize,
}

impl<T: Default + Reset> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
            created: 0,
        }
    }

    /// Take an idle item, or create one. The item is always reset.
    pub fn fetch(&mut self) -> T {
        let mut item = match self.free.pop() {
            Some(item) => item,
            None => {
                self.created += 1;
                T::default()
            }
        };
        item.reset();
        item
    }

    /// Return an item. Dropped if the pool already holds `capacity` idle items.
    pub fn release(&mut self, item: T) {
        if self.free.len() < self.capacity {
            self.free.push(item);
        }
    }

    pub fn idle(&self) -> usize { self.free.len() }
    pub fn created(&self) -> usize { self.created }
    pub fn capacity(&self) -> usize { self.capacity }
}
