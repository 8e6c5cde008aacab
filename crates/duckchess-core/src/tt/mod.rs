//! Transposition table
//!
//! A fixed-size array of single-entry buckets indexed by `hash % capacity`.
//! Entries remember the search window they were computed under, because a
//! duck-merged score is only reusable when the stored window covers the
//! current one; the caller decides that, the table only stores and matches.
//!
//! An occupied bucket is replaced by a deeper result, or by an equally deep
//! result computed under bounds at least as tight as the stored ones.

use crate::types::Value;
use crate::zobrist::ZobristHash;

/// Default bucket count (~2M entries).
pub const DEFAULT_ENTRIES: usize = 1 << 21;

#[derive(Debug, Clone, Copy)]
pub struct Entry<T> {
    pub hash: ZobristHash,
    pub remaining_depth: i32,
    pub alpha: Value,
    pub beta: Value,
    pub eval: T,
}

pub struct TranspositionTable<T> {
    buckets: Vec<Option<Entry<T>>>,
}

impl<T: Copy> TranspositionTable<T> {
    pub fn new() -> TranspositionTable<T> {
        TranspositionTable::with_entries(DEFAULT_ENTRIES)
    }

    /// `entries` is clamped to at least one bucket.
    pub fn with_entries(entries: usize) -> TranspositionTable<T> {
        TranspositionTable { buckets: vec![None; entries.max(1)] }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn clear(&mut self) {
        self.buckets.fill(None);
    }

    #[inline]
    fn index(&self, hash: ZobristHash) -> usize {
        (hash.value() % self.buckets.len() as u64) as usize
    }

    /// The stored entry for this exact position, if its bucket holds one.
    pub fn get(&self, hash: ZobristHash) -> Option<&Entry<T>> {
        self.buckets[self.index(hash)]
            .as_ref()
            .filter(|entry| entry.hash == hash)
    }

    pub fn set(
        &mut self,
        hash: ZobristHash,
        remaining_depth: i32,
        eval: T,
        alpha: Value,
        beta: Value,
    ) {
        let index = self.index(hash);
        let replace = match &self.buckets[index] {
            None => true,
            Some(stored) => {
                remaining_depth > stored.remaining_depth
                    || (remaining_depth == stored.remaining_depth
                        && alpha >= stored.alpha
                        && beta <= stored.beta)
            }
        };
        if replace {
            self.buckets[index] = Some(Entry { hash, remaining_depth, alpha, beta, eval });
        }
    }
}

impl<T: Copy> Default for TranspositionTable<T> {
    fn default() -> Self {
        TranspositionTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::initial_position;
    use crate::zobrist;

    fn full_window() -> (Value, Value) {
        (Value::MIN_BOUND, Value::MAX_BOUND)
    }

    #[test]
    fn test_store_and_fetch() {
        let mut table: TranspositionTable<i32> = TranspositionTable::with_entries(64);
        let hash = initial_position().hash();
        let (alpha, beta) = full_window();

        assert!(table.get(hash).is_none());
        table.set(hash, 9, 42, alpha, beta);
        let entry = table.get(hash).unwrap();
        assert_eq!(entry.eval, 42);
        assert_eq!(entry.remaining_depth, 9);
    }

    #[test]
    fn test_deeper_result_replaces_shallower() {
        let mut table: TranspositionTable<i32> = TranspositionTable::with_entries(64);
        let hash = initial_position().hash();
        let (alpha, beta) = full_window();

        table.set(hash, 9, 1, alpha, beta);
        table.set(hash, 6, 2, alpha, beta);
        assert_eq!(table.get(hash).unwrap().eval, 1);

        table.set(hash, 12, 3, alpha, beta);
        assert_eq!(table.get(hash).unwrap().eval, 3);
    }

    #[test]
    fn test_equal_depth_prefers_tighter_bounds() {
        let mut table: TranspositionTable<i32> = TranspositionTable::with_entries(64);
        let hash = initial_position().hash();

        table.set(hash, 9, 1, Value::new(-50), Value::new(50));
        // Tighter bounds at the same depth supersede the stored entry.
        table.set(hash, 9, 2, Value::new(-10), Value::new(10));
        assert_eq!(table.get(hash).unwrap().eval, 2);
        // Wider bounds do not.
        table.set(hash, 9, 3, Value::new(-60), Value::new(60));
        assert_eq!(table.get(hash).unwrap().eval, 2);
    }

    #[test]
    fn test_colliding_position_does_not_alias() {
        let mut table: TranspositionTable<i32> = TranspositionTable::with_entries(1);
        let (alpha, beta) = full_window();
        let first = initial_position().hash();
        let second = zobrist::empty_board_hash();
        assert_ne!(first, second);

        table.set(first, 9, 1, alpha, beta);
        // Single bucket: the other position maps there too but must not hit.
        assert!(table.get(second).is_none());
        table.set(second, 12, 2, alpha, beta);
        assert!(table.get(first).is_none());
        assert_eq!(table.get(second).unwrap().eval, 2);
    }
}
