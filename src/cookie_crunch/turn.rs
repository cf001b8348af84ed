use crate::cookie_crunch::prelude::*;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Won  => write!(f, "won"),
            GameOutcome::Lost => write!(f, "lost"),
        }
    }
}

/// Where a game is in its turn cycle.
///
/// `AwaitingInput -> SwapValidated -> Resolving { step } -> ... -> AwaitingInput`, or into
/// `Finished` when the turn that just ended decided the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the player to propose a swap.
    AwaitingInput,
    /// The swap was legal and has been performed; the cascade has not started.
    SwapValidated(Swap),
    /// The cascade has resolved this many steps and may continue.
    Resolving { step: usize },
    /// The game is over; only a restart is possible.
    Finished(GameOutcome),
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::AwaitingInput     => write!(f, "awaiting input"),
            TurnPhase::SwapValidated(_)  => write!(f, "swap validated"),
            TurnPhase::Resolving { step } => write!(f, "resolving step {step}"),
            TurnPhase::Finished(outcome) => write!(f, "finished ({outcome})"),
        }
    }
}

/// The answer to a proposed swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap was performed; holds the cookies at their new positions.
    Accepted(Swap),
    /// The swap would not make a chain. Nothing changed and no move was spent.
    Rejected(Swap),
}

/// One pass of a cascade: the chains removed, then what fell and what was created to replace them.
#[derive(Clone, Debug)]
pub struct CascadeStep {
    pub step: usize,
    pub chains: Vec<Chain>,
    pub score: u32,
    pub fallen: Vec<Vec<Cookie>>,
    pub created: Vec<Vec<Cookie>>,
}

/// How a turn ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    pub steps: usize,
    pub turn_score: u32,
    pub moves_left: u32,
    pub possible_swaps: usize,
    pub outcome: Option<GameOutcome>,
}

/// The result of a single call to `Game::resolve_step`.
#[derive(Clone, Debug)]
pub enum Cascade {
    Step(CascadeStep),
    Stable(TurnSummary),
}

/// A whole turn, from the performed swap to the stable board.
#[derive(Clone, Debug)]
pub struct TurnReport {
    pub swap: Swap,
    pub steps: Vec<CascadeStep>,
    pub summary: TurnSummary,
}

/// A level being played: the board plus score, moves and the turn state machine.
///
/// Each step of the cycle is its own call so a caller can animate between them; `play_turn` runs
/// a whole turn at once for callers that do not.
#[derive(Clone, Debug)]
pub struct Game<R = StdRng> {
    board: Board<R>,
    level: LevelDescriptor,
    score: u32,
    moves_left: u32,
    turn_score: u32,
    phase: TurnPhase,
}

impl<R: Rng> Game<R> {
    /// Starts a game on the level with a freshly shuffled board.
    pub fn new(level: LevelDescriptor, rng: R) -> Result<Game<R>> {
        let board = Board::new(&level, rng)?;
        let mut game = Game {
            board,
            moves_left: level.moves,
            level,
            score: 0,
            turn_score: 0,
            phase: TurnPhase::AwaitingInput,
        };
        game.restart()?;
        Ok(game)
    }

    /// Starts a game on a board that is already set up, leaving its cookies where they are.
    pub fn with_board(mut board: Board<R>, target_score: u32, moves: u32) -> Result<Game<R>> {
        let level = board.descriptor(target_score, moves);
        level.validate()?;
        if board.possible_swaps().is_none() {
            board.detect_possible_swaps();
        }
        board.reset_combo_multiplier();
        Ok(Game { board, level, score: 0, moves_left: moves, turn_score: 0, phase: TurnPhase::AwaitingInput })
    }

    /// Plays the level again from the start: a new shuffle, all moves back, no score.
    pub fn restart(&mut self) -> Result<CookieSet> {
        self.board.populate(&self.level)?;
        let cookies = self.board.shuffle()?;
        self.score = 0;
        self.turn_score = 0;
        self.moves_left = self.level.moves;
        self.phase = TurnPhase::AwaitingInput;
        log::info!(
            "started a {}x{} level: {} points in {} moves",
            self.board.width(),
            self.board.height(),
            self.level.target_score,
            self.level.moves
        );
        Ok(cookies)
    }

    /// Proposes a swap. A legal swap is performed and starts the turn; an illegal one is rejected
    /// without any change to the game.
    pub fn try_swap(&mut self, swap: &Swap) -> Result<SwapOutcome> {
        if self.phase != TurnPhase::AwaitingInput {
            bail!("cannot swap while {}", self.phase);
        }
        if !self.board.is_possible_swap(swap) {
            log::debug!("rejected {swap}");
            return Ok(SwapOutcome::Rejected(*swap));
        }

        self.board.reset_combo_multiplier();
        let performed = self.board.perform_swap(swap)?;
        self.turn_score = 0;
        self.phase = TurnPhase::SwapValidated(performed);
        log::debug!("accepted {swap}");
        Ok(SwapOutcome::Accepted(performed))
    }

    /// Runs one cascade step: remove and score the chains, let the rest fall, refill.
    ///
    /// Once a step finds no chains the turn ends: a move is spent, possible swaps are detected
    /// for the next turn, the combo is reset and the game is checked for a result.
    pub fn resolve_step(&mut self) -> Result<Cascade> {
        let step = match self.phase {
            TurnPhase::SwapValidated(_) => 1,
            TurnPhase::Resolving { step } => step + 1,
            _ => bail!("cannot resolve a cascade while {}", self.phase),
        };

        let chains = self.board.remove_matches();
        if chains.is_empty() {
            return Ok(Cascade::Stable(self.end_turn(step - 1)));
        }

        let score = chains.iter().map(Chain::score).sum::<u32>();
        self.score += score;
        self.turn_score += score;
        let fallen = self.board.fill_holes();
        let created = self.board.top_up_cookies();
        self.phase = TurnPhase::Resolving { step };

        log::debug!("cascade step {step}: {} chains for {score} points", chains.len());
        Ok(Cascade::Step(CascadeStep { step, chains, score, fallen, created }))
    }

    /// Proposes a swap and, if it is accepted, resolves the whole cascade.
    ///
    /// Returns `None` for a rejected swap.
    pub fn play_turn(&mut self, swap: &Swap) -> Result<Option<TurnReport>> {
        let SwapOutcome::Accepted(performed) = self.try_swap(swap)? else {
            return Ok(None);
        };

        let mut steps = vec![];
        loop {
            match self.resolve_step()? {
                Cascade::Step(step) => steps.push(step),
                Cascade::Stable(summary) => return Ok(Some(TurnReport { swap: performed, steps, summary })),
            }
        }
    }

    /// Reshuffles the board at the cost of one move.
    pub fn shuffle(&mut self) -> Result<CookieSet> {
        if self.phase != TurnPhase::AwaitingInput {
            bail!("cannot shuffle while {}", self.phase);
        }
        let cookies = self.board.shuffle()?;
        self.moves_left = self.moves_left.saturating_sub(1);
        self.board.reset_combo_multiplier();
        self.settle();
        Ok(cookies)
    }

    /// Whether the player is stuck: it is their turn, but no swap would make a chain.
    pub fn needs_shuffle(&self) -> bool {
        self.phase == TurnPhase::AwaitingInput && self.board.possible_swaps().is_none_or(|swaps| swaps.is_empty())
    }

    /// The result the game has reached, if any.
    pub fn evaluate(&self) -> Option<GameOutcome> {
        if self.score >= self.level.target_score {
            Some(GameOutcome::Won)
        } else if self.moves_left == 0 {
            Some(GameOutcome::Lost)
        } else {
            None
        }
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn level(&self) -> &LevelDescriptor {
        &self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.level.target_score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Points scored so far in the current (or most recent) turn.
    pub fn turn_score(&self) -> u32 {
        self.turn_score
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            TurnPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn end_turn(&mut self, steps: usize) -> TurnSummary {
        self.moves_left = self.moves_left.saturating_sub(1);
        let possible_swaps = self.board.detect_possible_swaps().len();
        self.board.reset_combo_multiplier();
        self.settle();

        TurnSummary {
            steps,
            turn_score: self.turn_score,
            moves_left: self.moves_left,
            possible_swaps,
            outcome: self.outcome(),
        }
    }

    /// Returns to waiting for input, or finishes the game if it has been decided.
    fn settle(&mut self) {
        self.phase = match self.evaluate() {
            Some(outcome) => {
                log::info!("game {outcome} with {} of {} points", self.score, self.level.target_score);
                TurnPhase::Finished(outcome)
            }
            None => TurnPhase::AwaitingInput,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only swapping the bottom-left pair makes a chain: a column of three croissants.
    const ONE_SWAP: &str = "
        CUD
        CNM
        UCS
    ";

    fn game(target_score: u32, moves: u32, seed: u64) -> Game {
        let layout = ONE_SWAP.parse::<LayoutString>().unwrap();
        let board = Board::from_layout(&layout, CookieCatalog::default(), StdRng::seed_from_u64(seed)).unwrap();
        Game::with_board(board, target_score, moves).unwrap()
    }

    fn legal_swap(game: &Game) -> Swap {
        game.board().swap_between(&Coord::new(0, 0), &Coord::new(1, 0)).unwrap()
    }

    #[test]
    fn new_games_start_ready() {
        let game = Game::new(LevelDescriptor::filled(9, 9, 1000, 15), StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(game.phase(), TurnPhase::AwaitingInput);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves_left(), 15);
        assert_eq!(game.target_score(), 1000);
        assert!(!game.needs_shuffle());
        assert!(game.board().detect_matches().is_empty());
        assert_eq!(game.board().cookies().len(), 81);
    }

    #[test]
    fn rejected_swaps_cost_nothing() {
        let mut game = game(10_000, 5, 0);
        let before = game.board().pretty();
        let swap = game.board().swap_between(&Coord::new(1, 0), &Coord::new(2, 0)).unwrap();

        assert_eq!(game.try_swap(&swap).unwrap(), SwapOutcome::Rejected(swap));
        assert_eq!(game.phase(), TurnPhase::AwaitingInput);
        assert_eq!(game.moves_left(), 5);
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().pretty(), before);
        assert!(game.play_turn(&swap).unwrap().is_none());
    }

    #[test]
    fn turns_step_through_the_state_machine() {
        let mut game = game(10_000, 5, 3);
        assert!(game.resolve_step().is_err());

        let SwapOutcome::Accepted(performed) = game.try_swap(&legal_swap(&game)).unwrap() else {
            panic!("the legal swap was rejected");
        };
        assert_eq!(game.phase(), TurnPhase::SwapValidated(performed));
        assert!(game.try_swap(&performed).is_err());
        assert!(game.shuffle().is_err());

        let Cascade::Step(first) = game.resolve_step().unwrap() else {
            panic!("the swap made no chain");
        };
        assert_eq!(first.step, 1);
        assert_eq!(first.chains.len(), 1);
        assert_eq!(first.chains[0].chain_type(), ChainType::Vertical);
        assert_eq!(first.score, 60);
        assert_eq!(game.phase(), TurnPhase::Resolving { step: 1 });

        let mut total = first.score;
        let summary = loop {
            match game.resolve_step().unwrap() {
                Cascade::Step(step) => {
                    total += step.score;
                    assert_eq!(game.board().cookies().len(), 9);
                }
                Cascade::Stable(summary) => break summary,
            }
        };
        assert_eq!(summary.turn_score, total);
        assert_eq!(game.score(), total);
        assert_eq!(summary.moves_left, 4);
        assert_eq!(summary.outcome, None);
        assert_eq!(game.phase(), TurnPhase::AwaitingInput);
        assert_eq!(game.board().combo_multiplier(), 1);
        assert_eq!(summary.possible_swaps, game.board().possible_swaps().unwrap().len());
        assert!(game.board().detect_matches().is_empty());
    }

    #[test]
    fn the_first_step_refills_the_chain() {
        let mut game = game(10_000, 5, 1);
        let report = game.play_turn(&legal_swap(&game)).unwrap().unwrap();
        let first = &report.steps[0];
        assert_eq!(first.fallen.iter().map(Vec::len).sum::<usize>(), 0);
        assert_eq!(first.created.len(), 1);
        assert_eq!(first.created[0].len(), 3);
        assert!(first.created[0].iter().all(|c| c.column() == 0));
        assert_eq!(report.summary.steps, report.steps.len());
    }

    #[test]
    fn reaching_the_target_wins() {
        let mut game = game(60, 5, 0);
        let report = game.play_turn(&legal_swap(&game)).unwrap().unwrap();
        assert_eq!(report.summary.outcome, Some(GameOutcome::Won));
        assert_eq!(game.phase(), TurnPhase::Finished(GameOutcome::Won));
        assert!(game.try_swap(&legal_swap(&game)).is_err());
        assert!(game.shuffle().is_err());
    }

    #[test]
    fn running_out_of_moves_loses() {
        let mut game = game(1_000_000, 1, 0);
        let report = game.play_turn(&legal_swap(&game)).unwrap().unwrap();
        assert_eq!(report.summary.moves_left, 0);
        assert_eq!(game.outcome(), Some(GameOutcome::Lost));
    }

    #[test]
    fn shuffling_costs_a_move() {
        let mut game = Game::new(LevelDescriptor::filled(6, 6, 1000, 2), StdRng::seed_from_u64(5)).unwrap();
        game.shuffle().unwrap();
        assert_eq!(game.moves_left(), 1);
        assert_eq!(game.phase(), TurnPhase::AwaitingInput);
        assert!(!game.needs_shuffle());

        game.shuffle().unwrap();
        assert_eq!(game.outcome(), Some(GameOutcome::Lost));
    }

    #[test]
    fn restart_resets_the_session() {
        let mut game = Game::new(LevelDescriptor::filled(9, 9, 1000, 3), StdRng::seed_from_u64(13)).unwrap();
        game.shuffle().unwrap();
        game.restart().unwrap();
        assert_eq!(game.moves_left(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), TurnPhase::AwaitingInput);
    }

    #[test]
    fn dead_boards_need_a_shuffle() {
        let layout = "CU/DN".parse::<LayoutString>().unwrap();
        let board = Board::from_layout(&layout, CookieCatalog::default(), StdRng::seed_from_u64(0)).unwrap();
        let game = Game::with_board(board, 100, 3).unwrap();
        assert!(game.needs_shuffle());
    }

    #[test]
    fn whole_games_keep_the_board_consistent() {
        for seed in 0..20 {
            let mut game = Game::new(LevelDescriptor::filled(9, 9, 3000, 10), StdRng::seed_from_u64(seed)).unwrap();
            while game.outcome().is_none() {
                if game.needs_shuffle() {
                    game.shuffle().unwrap();
                    continue;
                }
                let swaps = game.board().possible_swaps().unwrap().clone();
                let swap = swaps.iter().next().unwrap();
                let report = game.play_turn(&swap).unwrap().unwrap();

                assert!(!report.steps.is_empty());
                assert_eq!(game.board().cookies().len(), 81);
                assert!(game.board().detect_matches().is_empty());
                let scores: Vec<u32> = report.steps.iter().flat_map(|s| s.chains.iter().map(|c| c.score())).collect();
                assert!(scores.iter().all(|&s| s > 0));
            }
            assert!(game.moves_left() == 0 || game.score() >= 3000);
        }
    }
}
