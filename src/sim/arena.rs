//! Generational slot arena
//!
//! Dense storage for short-lived entities. Removed slots go on a free-list
//! and are reused; the generation bump keeps stale ids from reaching the
//! new occupant.

use serde::{Deserialize, Serialize};

/// Handle to an arena slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

#[derive(Debug, Clone)]
pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store a value, reusing a vacant slot when one exists
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        while let Some(index) = self.free.pop() {
            let Some(entry) = self.entries.get_mut(index as usize) else {
                continue;
            };
            if let Entry::Vacant { generation } = *entry {
                *entry = Entry::Occupied { generation, value };
                return SlotId { index, generation };
            }
        }

        let index = self.entries.len() as u32;
        self.entries.push(Entry::Occupied {
            generation: 0,
            value,
        });
        SlotId {
            index,
            generation: 0,
        }
    }

    /// Take a value out; `None` if the id is stale or already removed
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let entry = self.entries.get_mut(id.index as usize)?;
        let generation = match entry {
            Entry::Occupied { generation, .. } if *generation == id.generation => *generation,
            _ => return None,
        };
        let old = std::mem::replace(
            entry,
            Entry::Vacant {
                generation: generation.wrapping_add(1),
            },
        );
        self.free.push(id.index);
        self.len -= 1;
        match old {
            Entry::Occupied { value, .. } => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.entries.get(id.index as usize)? {
            Entry::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.entries.get_mut(id.index as usize)? {
            Entry::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Occupied slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    SlotId {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Vacant { .. } => None,
            })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    SlotId {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Vacant { .. } => None,
            })
    }
}
