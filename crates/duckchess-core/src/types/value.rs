//! Search scores
//!
//! Scores are centipawn-scale integers from the perspective of some side.
//! Values near `WIN` are reserved for decided games; the magnitude of a
//! decisive score decays by one per ply as it propagates toward the root, so
//! faster wins compare as better.

/// A signed search score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    pub const ZERO: Value = Value(0);
    pub const DRAW: Value = Value(0);
    /// Score of a just-won game, before any per-ply decay.
    pub const WIN: Value = Value(100_000);
    /// Full-window alpha/beta bounds.
    pub const MIN_BOUND: Value = Value(-99_999);
    pub const MAX_BOUND: Value = Value(99_999);
    /// Sentinel below every reachable score ("nothing recorded yet").
    pub const FLOOR: Value = Value(i32::MIN + 10);
    /// Sentinel above every reachable score.
    pub const CEILING: Value = Value(i32::MAX - 10);

    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// A score close enough to `WIN` that the game outcome is settled.
    #[inline]
    pub const fn is_decisive(self) -> bool {
        self.0.abs() > 95_000
    }

    /// Plies until the win/loss a decisive score encodes.
    #[inline]
    pub const fn plies_to_end(self) -> i32 {
        Value::WIN.0 - self.0.abs()
    }

    /// Negamax fold of a child score into its parent.
    ///
    /// Plain negation, except that a decisive magnitude shrinks by one so
    /// that mates further from the root score worse.
    #[inline]
    pub const fn neg_score(self) -> Value {
        match self.0 {
            s if s > 0 => Value(1 - s),
            s if s < 0 => Value(-1 - s),
            _ => self,
        }
    }

    /// Negamax transfer of a bound from parent to child.
    ///
    /// Inverse direction of [`Value::neg_score`]: the magnitude grows by one,
    /// so that `x.neg_forward().neg_score() == x`.
    #[inline]
    pub const fn neg_forward(self) -> Value {
        match self.0 {
            s if s > 0 => Value(-(s + 1)),
            s if s < 0 => Value(-s + 1),
            _ => self,
        }
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}

impl std::ops::Add<i32> for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: i32) -> Value {
        Value(self.0 + rhs)
    }
}

impl std::ops::Sub<i32> for Value {
    type Output = Value;

    #[inline]
    fn sub(self, rhs: i32) -> Value {
        Value(self.0 - rhs)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decisive() {
        assert!(Value::WIN.is_decisive());
        assert!((-Value::WIN).is_decisive());
        assert!(Value::new(95_001).is_decisive());
        assert!(!Value::new(95_000).is_decisive());
        assert!(!Value::ZERO.is_decisive());
    }

    #[test]
    fn test_neg_score_decays_decisive_magnitude() {
        assert_eq!(Value::WIN.neg_score(), Value::new(-99_999));
        assert_eq!(Value::new(-99_999).neg_score(), Value::new(99_998));
        assert_eq!(Value::ZERO.neg_score(), Value::ZERO);
        assert_eq!(Value::new(30).neg_score(), Value::new(-29));
    }

    #[test]
    fn test_neg_forward_is_inverse() {
        for raw in [-99_999, -120, -1, 0, 1, 75, 99_999] {
            let v = Value::new(raw);
            assert_eq!(v.neg_forward().neg_score(), v);
        }
    }

    #[test]
    fn test_plies_to_end() {
        assert_eq!(Value::WIN.plies_to_end(), 0);
        assert_eq!(Value::WIN.neg_score().plies_to_end(), 1);
        assert_eq!(Value::WIN.neg_score().neg_score().plies_to_end(), 2);
    }
}
