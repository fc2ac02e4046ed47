//! Prime sequence used for strand values and list identifiers.
//!
//! The sequence starts at 1, so index 0 contributes a unit and index 1 the
//! first true prime: `1, 2, 3, 5, 7, 11, ...`. Row `y` of a glyph maps to
//! the prime at index `y`.

use crate::{RivError, RivResult};

/// Lazily grown table of the prime sequence.
#[derive(Debug, Clone, Default)]
pub struct PrimeTable {
    primes: Vec<u64>,
}

impl PrimeTable {
    pub fn new() -> Self {
        Self { primes: vec![1, 2] }
    }

    /// A table pre-grown to hold at least `n` entries.
    pub fn with_len(n: usize) -> Self {
        let mut table = Self::new();
        table.grow_to(n);
        table
    }

    /// The prime at index `i`, growing the table as needed.
    pub fn get(&mut self, i: usize) -> u64 {
        self.grow_to(i + 1);
        self.primes[i]
    }

    /// Like [`get`](Self::get), but for a signed index as produced by
    /// vertical-displacement arithmetic. Negative indexes are an engine
    /// defect.
    pub fn get_signed(&mut self, i: i64) -> RivResult<u64> {
        let idx = usize::try_from(i)
            .map_err(|_| RivError::internal(format!("negative prime index {i}")))?;
        Ok(self.get(idx))
    }

    fn grow_to(&mut self, n: usize) {
        if self.primes.is_empty() {
            self.primes = vec![1, 2];
        }
        while self.primes.len() < n {
            let mut candidate = self.primes[self.primes.len() - 1] + 1;
            loop {
                // Skip the leading 1 when trial-dividing.
                if self.primes[1..]
                    .iter()
                    .take_while(|&&p| p * p <= candidate)
                    .all(|&p| candidate % p != 0)
                {
                    break;
                }
                candidate += 1;
            }
            self.primes.push(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut table = PrimeTable::new();
        let first_eight: Vec<u64> = (0..8).map(|i| table.get(i)).collect();
        assert_eq!(first_eight, vec![1, 2, 3, 5, 7, 11, 13, 17]);
    }

    #[test]
    fn test_with_len_pregrows() {
        let mut table = PrimeTable::with_len(6);
        assert_eq!(table.get(5), 11);
    }

    #[test]
    fn test_signed_index() {
        let mut table = PrimeTable::new();
        assert_eq!(table.get_signed(3).unwrap(), 5);
        assert!(table.get_signed(-1).is_err());
    }

    #[test]
    fn test_larger_primes() {
        let mut table = PrimeTable::new();
        assert_eq!(table.get(24), 89);
        assert_eq!(table.get(25), 97);
    }
}
