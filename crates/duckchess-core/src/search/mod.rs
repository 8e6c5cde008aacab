//! Duck-merged negamax search
//!
//! A round of duck chess is a piece move plus a duck placement, and searching
//! the placement as its own ply would square the branching factor. Instead a
//! node folds the placement in: a [`ScoredCoordSet`] tracks, per square the
//! opponent's duck could occupy, the best score the mover has secured. A
//! child returns its two cheapest placements ([`BoardEval`]), two because the
//! mover's best duck square may coincide with where the duck already stands.
//!
//! Depth is counted in thirds of a ply (`HORIZON_DEPTH` units per move), so
//! captures and promotions near the horizon can be extended by fractional
//! amounts. The driver deepens iteratively with an aspiration window and
//! re-checks the deadline only above the horizon band.

mod coord_set;
mod ordering;

use std::time::{Duration, Instant};

use log::{debug, info};
use smallvec::SmallVec;
use thiserror::Error;

use crate::board::Board;
use crate::eval::Evaluator;
use crate::movegen;
use crate::moves::Move;
use crate::tt::TranspositionTable;
use crate::types::{Coord, GameResult, Phase, Piece, Value};
use crate::zobrist::ZobristHash;
use coord_set::ScoredCoordSet;
use ordering::move_strength_estimation;

/// Depth units spent by a full move away from the horizon.
pub const HORIZON_DEPTH: i32 = 3;

const ASPIRATION_MARGIN: i32 = 75;
const CACHED_BEST_MOVE_BOOST: i32 = 1000;
const CACHED_SECOND_MOVE_BOOST: i32 = 300;

/// A node's value: the opponent's two cheapest duck placements, each with the
/// score the mover still secures under it, plus the move pair achieving the
/// primary line. `move_b` backs up move ordering when `move_a` gets blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardEval {
    pub score_a: Value,
    pub duck_a: Coord,
    pub score_b: Value,
    pub duck_b: Coord,
    pub move_a: Option<Move>,
    pub duck_move_a: Coord,
    pub move_b: Option<Move>,
}

impl BoardEval {
    /// Value of a node whose game is already decided: the mover's king is
    /// gone, every placement scores the same loss.
    fn just_lost() -> BoardEval {
        BoardEval {
            score_a: -Value::WIN,
            duck_a: Coord::A1,
            score_b: -Value::WIN,
            duck_b: Coord::B1,
            move_a: None,
            duck_move_a: Coord::A1,
            move_b: None,
        }
    }

    /// Sentinel passed to the root: bounds no cutoff can meet.
    fn unbounded() -> BoardEval {
        BoardEval {
            score_a: Value::FLOOR,
            duck_a: Coord::A1,
            score_b: Value::FLOOR,
            duck_b: Coord::A1,
            move_a: None,
            duck_move_a: Coord::A1,
            move_b: None,
        }
    }
}

/// A complete round choice: piece move, duck placement, and what the search
/// thought of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMove {
    pub mv: Move,
    pub duck_to: Coord,
    pub score: Value,
    pub depth: i32,
}

impl SelectedMove {
    pub fn text(&self, board: &Board) -> String {
        format!(
            "{}{}{} score: {}, depth: {}",
            self.mv.text(board),
            Piece::DUCK.letter(),
            self.duck_to.text(),
            self.score,
            self.depth
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The deadline expired before any depth finished.
    #[error("search stopped by its deadline")]
    Stopped,
    /// The side to move has no move, or the game is already decided.
    #[error("no move available in this position")]
    NoMove,
}

/// Call-stack frame used for repetition detection; links to the parent so a
/// node can walk its ancestors without owning them.
struct Frame<'a> {
    parent: Option<&'a Frame<'a>>,
    hash: ZobristHash,
    entered_reversible: bool,
}

type ScoredMoves = SmallVec<[(Move, i32); movegen::MAX_MOVES]>;

pub struct Searcher {
    evaluator: Evaluator,
    table: TranspositionTable<BoardEval>,
    deadline: Option<Instant>,
    visited_nodes: u64,
}

impl Searcher {
    pub fn new() -> Searcher {
        Searcher::with_table_entries(crate::tt::DEFAULT_ENTRIES)
    }

    pub fn with_table_entries(entries: usize) -> Searcher {
        Searcher {
            evaluator: Evaluator::new(),
            table: TranspositionTable::with_entries(entries),
            deadline: None,
            visited_nodes: 0,
        }
    }

    pub fn visited_nodes(&self) -> u64 {
        self.visited_nodes
    }

    pub fn evaluated_positions(&self) -> u64 {
        self.evaluator.evaluated_positions()
    }

    /// Iterative deepening driver. Deepens from 3 until the budget, the depth
    /// limit, or a proven result stops it; always returns the deepest
    /// completed choice. The first pass runs without a deadline so there is
    /// always one.
    pub fn best_move(
        &mut self,
        board: &Board,
        budget: Duration,
        max_depth: i32,
    ) -> Result<SelectedMove, SearchError> {
        let start = Instant::now();
        let mut selected: Option<SelectedMove> = None;
        let mut depth = max_depth.min(3).max(1);

        loop {
            let depth_start = Instant::now();
            self.deadline = selected.is_some().then(|| start + budget);

            match self.select_move_at_depth(board, depth, selected) {
                Ok(choice) => {
                    info!(
                        "best move at depth {depth}: {} after {:?}",
                        choice.text(board),
                        start.elapsed()
                    );
                    selected = Some(choice);

                    if choice.score.is_decisive() && choice.score.plies_to_end() <= depth + 1 {
                        info!("game solved at depth {depth}");
                        return Ok(choice);
                    }
                    if depth >= max_depth {
                        return Ok(choice);
                    }

                    let depth_duration = depth_start.elapsed();
                    depth += 1;
                    if Instant::now() + depth_duration / 4 > start + budget {
                        info!("giving up on depth {depth}, the budget would not cover it");
                        return Ok(choice);
                    }
                }
                Err(SearchError::Stopped) => {
                    info!("out of time at depth {depth}");
                    // The first pass runs undeadlined, so there is a result.
                    return selected.ok_or(SearchError::Stopped);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One full-window search at a fixed depth, with no deadline.
    pub fn search_to_depth(
        &mut self,
        board: &Board,
        depth: i32,
    ) -> Result<SelectedMove, SearchError> {
        self.deadline = None;
        self.search_root(board, depth, None, Value::MIN_BOUND, Value::MAX_BOUND)
    }

    fn select_move_at_depth(
        &mut self,
        board: &Board,
        depth: i32,
        previous: Option<SelectedMove>,
    ) -> Result<SelectedMove, SearchError> {
        if let Some(previous) = previous {
            if !previous.score.is_decisive() {
                let alpha = previous.score - ASPIRATION_MARGIN;
                let beta = previous.score + ASPIRATION_MARGIN;
                debug!("aspiration search at depth {depth} in ({alpha}, {beta})");
                let choice = self.search_root(board, depth, None, alpha, beta)?;
                if choice.score > alpha && choice.score < beta {
                    return Ok(choice);
                }
                debug!("aspiration window missed with score {}", choice.score);
            }
        }
        debug!("full-window search at depth {depth}");
        self.search_root(board, depth, previous.map(|p| p.mv), Value::MIN_BOUND, Value::MAX_BOUND)
    }

    fn search_root(
        &mut self,
        board: &Board,
        depth: i32,
        previous_best: Option<Move>,
        alpha: Value,
        beta: Value,
    ) -> Result<SelectedMove, SearchError> {
        let mut root = board.clone();
        let frame =
            Frame { parent: None, hash: root.hash(), entered_reversible: true };
        let eval = self
            .node(
                &mut root,
                &frame,
                depth * HORIZON_DEPTH,
                alpha,
                beta,
                BoardEval::unbounded(),
                previous_best,
            )?
            .ok_or(SearchError::NoMove)?;
        let mv = eval.move_a.ok_or(SearchError::NoMove)?;
        Ok(SelectedMove { mv, duck_to: eval.duck_move_a, score: eval.score_a, depth })
    }

    /// Evaluates one node. `Ok(None)` means the subtree was cut off against
    /// the parent's `immediate` bound and carries no usable score.
    fn node(
        &mut self,
        board: &mut Board,
        frame: &Frame<'_>,
        remaining: i32,
        alpha_arg: Value,
        beta: Value,
        immediate: BoardEval,
        previous_best: Option<Move>,
    ) -> Result<Option<BoardEval>, SearchError> {
        self.visited_nodes += 1;

        if board.result() != GameResult::Undecided {
            return Ok(Some(BoardEval::just_lost()));
        }
        if remaining <= 0 {
            return Ok(Some(self.static_eval(board)));
        }
        if remaining > HORIZON_DEPTH {
            self.check_deadline()?;
        }
        if seen_in_call_stack(frame) {
            return Ok(Some(draw_eval(board)));
        }

        let hash = frame.hash;
        let mut cached_best = None;
        let mut cached_second = None;
        if let Some(entry) = self.table.get(hash) {
            if entry.remaining_depth >= remaining {
                let eval = entry.eval;
                let covers_window = entry.alpha <= alpha_arg && entry.beta >= beta;
                let score_inside_bounds =
                    eval.score_a > entry.alpha && eval.score_b < entry.beta;
                let proves_cutoff = eval.score_a > beta
                    && eval.score_b > beta
                    && eval.score_b > entry.beta;
                if covers_window || score_inside_bounds || proves_cutoff {
                    return Ok(Some(eval));
                }
            }
            cached_best = entry.eval.move_a;
            cached_second = entry.eval.move_b;
        }

        let white = match board.phase() {
            Phase::WhitePieceMove => true,
            Phase::BlackPieceMove => false,
            phase => unreachable!("piece search reached duck phase {phase:?}"),
        };

        // Placement candidates: the actual duck square when the board still
        // carries one (only the root does), every empty square otherwise.
        let mut set = if board.duck_position().is_some() {
            ScoredCoordSet::new(|c| board.get(c) == Piece::DUCK, Value::FLOOR)
        } else {
            ScoredCoordSet::new(|c| board.get(c) == Piece::EMPTY, Value::FLOOR)
        };

        let mut moves: ScoredMoves = SmallVec::new();
        movegen::generate_moves(board, &mut |mv| {
            let mut strength = move_strength_estimation(mv, board, white);
            if Some(mv) == cached_best {
                strength += CACHED_BEST_MOVE_BOOST;
            } else if Some(mv) == cached_second {
                strength += CACHED_SECOND_MOVE_BOOST;
            }
            moves.push((mv, strength));
        });
        moves.sort_by(|a, b| b.1.cmp(&a.1));

        // Children see the board with the duck lifted; their own coord sets
        // account for where it may be put down.
        let duck = board.remove_duck();
        let mut previous_best_analysed = false;
        let outcome = self.analyse_moves(
            board,
            frame,
            &mut set,
            &moves,
            remaining,
            alpha_arg,
            beta,
            immediate,
            white,
            previous_best,
            &mut previous_best_analysed,
            hash,
        );
        board.restore_duck(duck);

        match outcome {
            Err(SearchError::Stopped)
                if previous_best.is_some() && previous_best_analysed && duck.is_some() =>
            {
                info!("deadline hit after the previous best move was re-analysed");
                Ok(Some(set.bottom_two()))
            }
            other => other,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn analyse_moves(
        &mut self,
        board: &mut Board,
        frame: &Frame<'_>,
        set: &mut ScoredCoordSet,
        moves: &[(Move, i32)],
        remaining: i32,
        alpha_arg: Value,
        beta: Value,
        immediate: BoardEval,
        white: bool,
        previous_best: Option<Move>,
        previous_best_analysed: &mut bool,
        hash: ZobristHash,
    ) -> Result<Option<BoardEval>, SearchError> {
        let mut current = set.bottom_two();
        let mut alpha = alpha_arg;
        let next_phase = if white { Phase::BlackPieceMove } else { Phase::WhitePieceMove };

        for &(mv, _) in moves {
            // Duck-aware cutoffs against the parent's standing bound: the
            // parent won't pick a line we already match on its best square,
            // nor one whose fallback beats it when the best squares collide.
            if current.score_a >= -immediate.score_a {
                return Ok(None);
            }
            if current.duck_a == immediate.duck_a && current.score_b > -immediate.score_a {
                return Ok(None);
            }

            let undo = mv.apply(board);
            board.set_phase(next_phase);

            let next_remaining = if remaining == 1 {
                0
            } else if remaining <= HORIZON_DEPTH && mv.is_tactical() {
                remaining - 1
            } else {
                (remaining - HORIZON_DEPTH).max(0)
            };

            let child_frame = Frame {
                parent: Some(frame),
                hash: board.hash(),
                entered_reversible: mv.is_reversible(),
            };
            let child = self.node(
                board,
                &child_frame,
                next_remaining,
                beta.neg_forward(),
                alpha.neg_forward(),
                current,
                None,
            );
            mv.undo(board, undo);
            let child = child?;

            if let Some(child) = child {
                let cap = beta + 1;
                set.update(
                    child.score_a.neg_score().min(cap),
                    |c| c != child.duck_a && !mv.blocked_by_duck_at(c),
                    mv,
                    child.duck_a,
                );
                set.update(
                    child.score_b.neg_score().min(cap),
                    |c| c != child.duck_b && !mv.blocked_by_duck_at(c),
                    mv,
                    child.duck_b,
                );
                current = set.bottom_two();
                alpha = alpha.max(current.score_a);
            }

            if previous_best == Some(mv) {
                *previous_best_analysed = true;
            }

            if alpha > beta {
                let mut pruned = set.bottom_two();
                pruned.score_a = alpha;
                pruned.score_b = alpha;
                self.table.set(hash, remaining, pruned, alpha_arg, beta);
                return Ok(Some(pruned));
            }
        }

        let result = set.bottom_two();
        self.table.set(hash, remaining, result, alpha_arg, beta);
        Ok(Some(result))
    }

    fn static_eval(&mut self, board: &Board) -> BoardEval {
        let score = self.evaluator.side_relative(board);
        let (duck_a, duck_b) = first_two_empties(board);
        BoardEval {
            score_a: score,
            duck_a,
            score_b: score,
            duck_b,
            move_a: None,
            duck_move_a: Coord::A1,
            move_b: None,
        }
    }

    fn check_deadline(&self) -> Result<(), SearchError> {
        match self.deadline {
            Some(deadline) if Instant::now() > deadline => Err(SearchError::Stopped),
            _ => Ok(()),
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new()
    }
}

/// A position repeats if it already occurred in this line of the search, with
/// only reversible moves (by both sides) in between.
fn seen_in_call_stack(frame: &Frame<'_>) -> bool {
    let current = frame.hash;
    let mut node = frame;
    loop {
        if !node.entered_reversible {
            return false;
        }
        let Some(parent) = node.parent else { return false };
        if !parent.entered_reversible {
            return false;
        }
        let Some(grandparent) = parent.parent else { return false };
        node = grandparent;
        if node.hash == current {
            return true;
        }
    }
}

fn draw_eval(board: &Board) -> BoardEval {
    let (duck_a, duck_b) = first_two_empties(board);
    BoardEval {
        score_a: Value::DRAW,
        duck_a,
        score_b: Value::DRAW,
        duck_b,
        move_a: None,
        duck_move_a: Coord::A1,
        move_b: None,
    }
}

fn first_two_empties(board: &Board) -> (Coord, Coord) {
    let mut first = None;
    let mut second = None;
    Coord::for_each(|coord| {
        if board.get(coord) == Piece::EMPTY && second.is_none() {
            if first.is_none() {
                first = Some(coord);
            } else {
                second = Some(coord);
            }
        }
    });
    (first.unwrap_or(Coord::A1), second.unwrap_or(Coord::B1))
}
