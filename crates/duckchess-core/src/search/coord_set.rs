//! Duck placement scoreboard
//!
//! A min-heap over candidate duck squares. Each entry holds the best score
//! the mover has secured so far assuming the opponent's duck stands on that
//! square. The heap minimum is therefore the placement the opponent would
//! pick, and [`ScoredCoordSet::bottom_two`] yields the node's value together
//! with the runner-up square the mover falls back to when the best one is
//! taken.
//!
//! `update` raises whole groups of squares at once and skips any subtree
//! whose minimum already meets the new floor.

use smallvec::SmallVec;

use crate::moves::Move;
use crate::search::BoardEval;
use crate::types::{Coord, Value};

#[derive(Debug, Clone, Copy)]
struct Entry {
    coord: Coord,
    score: Value,
    selected_move: Option<Move>,
    selected_duck_move: Option<Coord>,
}

pub struct ScoredCoordSet {
    entries: SmallVec<[Entry; Coord::NUM]>,
}

impl ScoredCoordSet {
    /// One entry per square matching `include`, all starting at `initial`.
    /// Equal scores mean the array is already a valid heap.
    pub fn new(mut include: impl FnMut(Coord) -> bool, initial: Value) -> ScoredCoordSet {
        let mut entries = SmallVec::new();
        Coord::for_each(|coord| {
            if include(coord) {
                entries.push(Entry {
                    coord,
                    score: initial,
                    selected_move: None,
                    selected_duck_move: None,
                });
            }
        });
        ScoredCoordSet { entries }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Raises every `permitted` square to at least `at_least`, recording the
    /// move pair that achieves it. Subtrees whose minimum already meets the
    /// floor are skipped untouched.
    pub fn update(
        &mut self,
        at_least: Value,
        mut permitted: impl FnMut(Coord) -> bool,
        selected_move: Move,
        duck_move: Coord,
    ) {
        self.update_rec(0, at_least, &mut permitted, selected_move, duck_move);
    }

    fn update_rec<F: FnMut(Coord) -> bool>(
        &mut self,
        i: usize,
        at_least: Value,
        permitted: &mut F,
        selected_move: Move,
        duck_move: Coord,
    ) {
        if i >= self.entries.len() || self.entries[i].score >= at_least {
            return;
        }

        self.update_rec(i * 2 + 1, at_least, permitted, selected_move, duck_move);
        self.update_rec(i * 2 + 2, at_least, permitted, selected_move, duck_move);

        if permitted(self.entries[i].coord) {
            let entry = &mut self.entries[i];
            entry.score = at_least;
            entry.selected_move = Some(selected_move);
            entry.selected_duck_move = Some(duck_move);
            self.bubble_down(i);
        }
    }

    fn bubble_down(&mut self, mut i: usize) {
        loop {
            let left = i * 2 + 1;
            let right = left + 1;
            if left >= self.entries.len() {
                return;
            }
            let next = if right >= self.entries.len()
                || self.entries[left].score < self.entries[right].score
            {
                left
            } else {
                right
            };
            if self.entries[next].score < self.entries[i].score {
                self.entries.swap(i, next);
                i = next;
            } else {
                return;
            }
        }
    }

    /// The two weakest squares: the node value (opponent's placement pick)
    /// and the mover's fallback alternative.
    pub fn bottom_two(&self) -> BoardEval {
        match self.entries.len() {
            0 => BoardEval {
                score_a: Value::CEILING,
                duck_a: Coord::A1,
                score_b: Value::CEILING,
                duck_b: Coord::A1,
                move_a: None,
                duck_move_a: Coord::A1,
                move_b: None,
            },
            1 => {
                let only = &self.entries[0];
                BoardEval {
                    score_a: only.score,
                    duck_a: only.coord,
                    score_b: only.score,
                    duck_b: only.coord,
                    move_a: only.selected_move,
                    duck_move_a: only.selected_duck_move.unwrap_or(Coord::A1),
                    move_b: None,
                }
            }
            len => {
                let best = &self.entries[0];
                let second = if len == 2 || self.entries[1].score < self.entries[2].score {
                    &self.entries[1]
                } else {
                    &self.entries[2]
                };
                BoardEval {
                    score_a: best.score,
                    duck_a: best.coord,
                    score_b: second.score,
                    duck_b: second.coord,
                    move_a: best.selected_move,
                    duck_move_a: best.selected_duck_move.unwrap_or(Coord::A1),
                    move_b: second.selected_move,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_over(coords: &[Coord]) -> ScoredCoordSet {
        ScoredCoordSet::new(|c| coords.contains(&c), Value::FLOOR)
    }

    fn any_move() -> Move {
        Move::KingSlide { from: Coord::E1, to: Coord::E2 }
    }

    #[test]
    fn test_initial_bottom_two() {
        let set = set_over(&[Coord::A1, Coord::B1, Coord::C1]);
        assert_eq!(set.len(), 3);
        let eval = set.bottom_two();
        assert_eq!(eval.score_a, Value::FLOOR);
        assert_eq!(eval.score_b, Value::FLOOR);
        assert_eq!(eval.move_a, None);
    }

    #[test]
    fn test_update_raises_minimum() {
        let mut set = set_over(&[Coord::A1, Coord::B1, Coord::C1]);
        set.update(Value::new(10), |_| true, any_move(), Coord::H8);
        let eval = set.bottom_two();
        assert_eq!(eval.score_a, Value::new(10));
        assert_eq!(eval.score_b, Value::new(10));
        assert_eq!(eval.move_a, Some(any_move()));
        assert_eq!(eval.duck_move_a, Coord::H8);
    }

    #[test]
    fn test_excluded_square_becomes_the_minimum() {
        let mut set = set_over(&[Coord::A1, Coord::B1, Coord::C1]);
        // B1 blocks the move, so it keeps its old (lower) score and floats
        // to the top of the heap.
        set.update(Value::new(10), |c| c != Coord::B1, any_move(), Coord::H8);
        let eval = set.bottom_two();
        assert_eq!(eval.duck_a, Coord::B1);
        assert_eq!(eval.score_a, Value::FLOOR);
        assert_eq!(eval.score_b, Value::new(10));
    }

    #[test]
    fn test_update_never_lowers() {
        let mut set = set_over(&[Coord::A1, Coord::B1]);
        set.update(Value::new(30), |_| true, any_move(), Coord::H8);
        set.update(Value::new(20), |_| true, any_move(), Coord::G8);
        let eval = set.bottom_two();
        assert_eq!(eval.score_a, Value::new(30));
        assert_eq!(eval.duck_move_a, Coord::H8);
    }

    #[test]
    fn test_two_square_set() {
        let mut set = set_over(&[Coord::D4, Coord::E4]);
        set.update(Value::new(5), |c| c != Coord::E4, any_move(), Coord::H8);
        let eval = set.bottom_two();
        assert_eq!(eval.duck_a, Coord::E4);
        assert_eq!(eval.score_a, Value::FLOOR);
        assert_eq!(eval.duck_b, Coord::D4);
        assert_eq!(eval.score_b, Value::new(5));
    }

    #[test]
    fn test_progressive_updates_track_best_per_square() {
        let mut set = set_over(&[Coord::A1, Coord::B1, Coord::C1, Coord::D1]);
        let first = Move::KnightSlide { from: Coord::B1, to: Coord::C3 };
        let second = Move::KnightSlide { from: Coord::G1, to: Coord::F3 };
        set.update(Value::new(40), |c| c != Coord::C1, first, Coord::H8);
        set.update(Value::new(60), |c| c != Coord::D1, second, Coord::G8);

        let eval = set.bottom_two();
        // C1 was excluded from the first raise, D1 from the second; C1 then
        // got lifted to 60, leaving D1 at 40 as the opponent's pick.
        assert_eq!(eval.duck_a, Coord::D1);
        assert_eq!(eval.score_a, Value::new(40));
        assert_eq!(eval.move_a, Some(first));
        assert_eq!(eval.score_b, Value::new(60));
    }
}
