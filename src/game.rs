//! Game session: score keeping, terminal flags and the recent-run history
//! around the board transformation.

use std::{collections::VecDeque, time::SystemTime};

use crate::{
    board::{Board, Direction, IdAllocator, TileId},
    config::{ConfigError, GameConfig},
    input::{Input, NewGameReason},
    spawn::{self, RandomSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Target reached. Moves are still accepted.
    Won,
    /// No move left. Moves are ignored until a new game.
    GameOver,
}

/// What an input did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The board changed and a tile spawned.
    Moved { gained: u32 },
    /// The swipe changed nothing.
    Unchanged,
    /// The round is over, the input was dropped.
    Ignored,
    /// A new round started.
    NewGame,
}

/// A finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub score: u32,
    pub timestamp: SystemTime,
    pub triggered_by: NewGameReason,
}

/// Most recent runs first, oldest evicted past capacity.
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    records: VecDeque<RunRecord>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: RunRecord) {
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RunRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&RunRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

pub struct GameSession<R> {
    config: GameConfig,
    rng: R,
    ids: IdAllocator,
    board: Board,
    score: u32,
    best_score: u32,
    has_won: bool,
    game_over: bool,
    history: History,
}

impl<R: RandomSource> GameSession<R> {
    /// Start a session on a fresh board of two tiles.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let mut ids = IdAllocator::new();
        let board = spawn::fresh_board(&mut ids, &mut rng, config.four_probability);

        Ok(Self::assemble(config, rng, ids, board))
    }

    /// Start a session on a given layout. New ids continue after the largest
    /// id on the board.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn with_board(config: GameConfig, rng: R, board: Board) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let last = board
            .tiles()
            .iter()
            .map(|tile| tile.id)
            .max()
            .unwrap_or(TileId(0));

        Ok(Self::assemble(config, rng, IdAllocator::after(last), board))
    }

    fn assemble(config: GameConfig, rng: R, ids: IdAllocator, board: Board) -> Self {
        let history = History::new(config.history_capacity);
        let has_won = board.contains_target_tile(config.win_target);
        let game_over = !board.has_available_moves();

        Self {
            config,
            rng,
            ids,
            board,
            score: 0,
            best_score: 0,
            has_won,
            game_over,
            history,
        }
    }

    /// Swipe the board. Spawns a tile and updates score and flags when the
    /// board changed; does nothing otherwise.
    pub fn play(&mut self, direction: Direction) -> Turn {
        if self.game_over {
            log::trace!("Ignoring {direction:?}, game is over");
            return Turn::Ignored;
        }

        let outcome = self.board.swipe(direction);
        if !outcome.moved {
            log::trace!("{direction:?} changed nothing");
            return Turn::Unchanged;
        }

        self.board = spawn::spawn_tile(
            &outcome.board,
            &mut self.ids,
            &mut self.rng,
            self.config.four_probability,
        );
        self.score += outcome.score;
        self.best_score = self.best_score.max(self.score);
        self.has_won |= self.board.contains_target_tile(self.config.win_target);
        self.game_over = !self.board.has_available_moves();

        log::debug!(
            "{direction:?}: +{} (score {}, best {}), status {:?}",
            outcome.score,
            self.score,
            self.best_score,
            self.status()
        );

        Turn::Moved {
            gained: outcome.score,
        }
    }

    /// Record the round in the history if it scored, then start over.
    pub fn new_game(&mut self, reason: NewGameReason) {
        if self.score > 0 {
            self.history.push(RunRecord {
                score: self.score,
                timestamp: SystemTime::now(),
                triggered_by: reason,
            });
        }

        log::debug!("New game ({reason}), previous score {}", self.score);

        self.ids.reset();
        self.board = spawn::fresh_board(
            &mut self.ids,
            &mut self.rng,
            self.config.four_probability,
        );
        self.score = 0;
        self.has_won = false;
        self.game_over = false;
    }

    pub fn handle(&mut self, input: Input) -> Turn {
        match input {
            Input::Move(direction) => self.play(direction),
            Input::NewGame(reason) => {
                self.new_game(reason);
                Turn::NewGame
            }
        }
    }

    /// Apply inputs in order, calling `on_turn` after each one. Runs until
    /// the iterator ends, so a channel receiver drives it until every sender
    /// hangs up.
    pub fn run<I, F>(&mut self, inputs: I, mut on_turn: F)
    where
        I: IntoIterator<Item = Input>,
        F: FnMut(&Self, Turn),
    {
        for input in inputs {
            let turn = self.handle(input);
            on_turn(&*self, turn);
        }
    }
}

impl<R> GameSession<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.has_won {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
