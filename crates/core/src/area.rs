use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AreaError {
    #[error("area is full ({0} slots)")]
    Full(usize),
    #[error("no card at index {0}")]
    InvalidIndex(usize),
    #[error("index {0} selected twice")]
    DuplicateIndex(usize),
}

/// Ordered slots owned by value. Other areas refer to a card only by its
/// index here; moving a card is a take followed by a push or replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardArea<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<T> CardArea<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    pub fn push(&mut self, item: T) -> Result<usize, AreaError> {
        if self.is_full() {
            return Err(AreaError::Full(self.capacity));
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn take(&mut self, index: usize) -> Result<T, AreaError> {
        if index >= self.items.len() {
            return Err(AreaError::InvalidIndex(index));
        }
        Ok(self.items.remove(index))
    }

    /// Removes every listed slot and returns the items in ascending index
    /// order. Nothing is removed if any index is bad.
    pub fn take_many(&mut self, indices: &[usize]) -> Result<Vec<T>, AreaError> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(AreaError::DuplicateIndex(pair[0]));
            }
        }
        if let Some(&bad) = sorted.iter().find(|&&idx| idx >= self.items.len()) {
            return Err(AreaError::InvalidIndex(bad));
        }
        let mut taken: Vec<T> = sorted
            .iter()
            .rev()
            .map(|&idx| self.items.remove(idx))
            .collect();
        taken.reverse();
        Ok(taken)
    }

    /// Swaps the item at `index` for `item`, returning the previous occupant.
    pub fn replace(&mut self, index: usize, item: T) -> Result<T, AreaError> {
        let slot = self
            .items
            .get_mut(index)
            .ok_or(AreaError::InvalidIndex(index))?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(items: &[u8], capacity: usize) -> CardArea<u8> {
        let mut area = CardArea::with_capacity(capacity);
        for item in items {
            area.push(*item).expect("push");
        }
        area
    }

    #[test]
    fn push_respects_capacity() {
        let mut slots = area(&[1, 2], 2);
        assert_eq!(slots.push(3), Err(AreaError::Full(2)));
        assert_eq!(slots.free_slots(), 0);
    }

    #[test]
    fn take_many_returns_in_index_order() {
        let mut slots = area(&[10, 11, 12, 13], 8);
        assert_eq!(slots.take_many(&[3, 0]), Ok(vec![10, 13]));
        assert_eq!(slots.as_slice(), &[11, 12]);
    }

    #[test]
    fn take_many_is_all_or_nothing() {
        let mut slots = area(&[10, 11], 8);
        assert_eq!(slots.take_many(&[0, 5]), Err(AreaError::InvalidIndex(5)));
        assert_eq!(slots.take_many(&[1, 1]), Err(AreaError::DuplicateIndex(1)));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn replace_keeps_position() {
        let mut slots = area(&[1, 2, 3], 3);
        assert_eq!(slots.replace(1, 9), Ok(2));
        assert_eq!(slots.as_slice(), &[1, 9, 3]);
        assert_eq!(slots.replace(3, 9), Err(AreaError::InvalidIndex(3)));
    }
}
