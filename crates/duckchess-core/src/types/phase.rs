//! Turn phases and game results
//!
//! A full round of Duck Chess is four half-steps: each side moves a piece and
//! then relocates the shared duck.

/// One half-step of a round, cycling in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    WhitePieceMove = 0,
    WhiteDuckMove = 1,
    BlackPieceMove = 2,
    BlackDuckMove = 3,
}

impl Phase {
    /// Number of phases.
    pub const NUM: usize = 4;

    /// The phase that follows this one.
    #[inline]
    pub const fn next(self) -> Phase {
        match self {
            Phase::WhitePieceMove => Phase::WhiteDuckMove,
            Phase::WhiteDuckMove => Phase::BlackPieceMove,
            Phase::BlackPieceMove => Phase::BlackDuckMove,
            Phase::BlackDuckMove => Phase::WhitePieceMove,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_duck_phase(self) -> bool {
        matches!(self, Phase::WhiteDuckMove | Phase::BlackDuckMove)
    }
}

/// Outcome of a game; a side wins by capturing the enemy king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Undecided,
    WhiteWon,
    BlackWon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        let mut phase = Phase::WhitePieceMove;
        for _ in 0..4 {
            phase = phase.next();
        }
        assert_eq!(phase, Phase::WhitePieceMove);
    }

    #[test]
    fn test_duck_phases() {
        assert!(Phase::WhiteDuckMove.is_duck_phase());
        assert!(Phase::BlackDuckMove.is_duck_phase());
        assert!(!Phase::WhitePieceMove.is_duck_phase());
        assert!(!Phase::BlackPieceMove.is_duck_phase());
    }
}
