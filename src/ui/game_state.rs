//! Game state management for the Gomoku GUI

use crate::{AIEngine, Board, EngineConfig, GomokuError, MoveResult, Outcome, Pos, Stone};
use log::warn;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Who opens the game. The opener plays black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    HumanFirst,
    /// Engine opens in the centre
    EngineFirst,
}

impl GameMode {
    pub fn first_player(self) -> Stone {
        match self {
            GameMode::HumanFirst => Stone::Human,
            GameMode::EngineFirst => Stone::Ai,
        }
    }
}

/// AI computation state.
///
/// While thinking, the engine itself lives on the worker thread and comes
/// back with its answer.
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<(AIEngine, Result<Pos, GomokuError>)>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    /// Snapshot of the engine's board, for rendering
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub outcome: Outcome,
    pub winning_line: Option<[Pos; 5]>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    pub stats: EngineStats,

    engine: Option<AIEngine>,
    config: EngineConfig,
}

/// Engine figures shown in the debug card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub board_value: i64,
    pub frontier_size: usize,
    pub tt_entries: usize,
    pub tt_hits: u64,
}

impl EngineStats {
    fn capture(engine: &AIEngine) -> Self {
        let tt = engine.tt_stats();
        Self {
            board_value: engine.board_value(),
            frontier_size: engine.frontier().len(),
            tt_entries: tt.entries,
            tt_hits: tt.hits,
        }
    }
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

impl GameState {
    pub fn new(mode: GameMode, config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_turn: mode.first_player(),
            outcome: Outcome::Ongoing,
            winning_line: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            message: None,
            stats: EngineStats::default(),
            engine: Some(AIEngine::with_config(config)),
            config,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.mode, self.config);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether `stone` is drawn black
    pub fn is_black(&self, stone: Stone) -> bool {
        stone == self.mode.first_player()
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Ongoing
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.current_turn == Stone::Human
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.current_turn == Stone::Ai
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a human stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let engine = self.engine.as_mut().ok_or_else(|| "Engine unavailable".to_string())?;
        engine
            .apply_human_move(pos.row.into(), pos.col.into())
            .map_err(|err| err.to_string())?;

        self.record_move(pos, Stone::Human);
        Ok(())
    }

    /// Refresh the snapshot after a stone was applied to the engine
    fn record_move(&mut self, pos: Pos, stone: Stone) {
        if let Some(engine) = &self.engine {
            self.board = engine.board().clone();
            self.outcome = engine.check_result();
            self.stats = EngineStats::capture(engine);
        }

        self.move_history.push((pos, stone));
        self.last_move = Some(pos);
        self.move_timer.stop();
        self.message = None;

        match self.outcome {
            Outcome::Win(winner) => self.winning_line = self.find_winning_line(pos, winner),
            Outcome::Draw => {}
            Outcome::Ongoing => {
                self.current_turn = stone.opponent();
                self.move_timer.start();
            }
        }
    }

    /// Find the winning line through `pos`, if any
    fn find_winning_line(&self, pos: Pos, stone: Stone) -> Option<[Pos; 5]> {
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dr, dc) in directions {
            let mut start = pos;
            while let Some(prev) = start.offset(dr, dc, -1) {
                if self.board.get(prev) != stone {
                    break;
                }
                start = prev;
            }

            let line: Vec<Pos> = (0..)
                .map_while(|step| start.offset(dr, dc, step))
                .take_while(|&p| self.board.get(p) == stone)
                .take(5)
                .collect();

            if let [a, b, c, d, e] = line[..] {
                return Some([a, b, c, d, e]);
            }
        }

        None
    }

    /// Hand the engine to a worker thread to pick its move
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.propose_move();
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let received = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(received) => Some((received, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    // Engine went down with the worker; rebuild it from the record
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    let moves = std::mem::take(&mut self.move_history);
                    self.replay(moves);
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some(((mut engine, result), elapsed)) = received else {
            return;
        };
        self.ai_state = AiState::Idle;
        self.move_timer.set_ai_time(elapsed);

        let applied = result.and_then(|pos| {
            engine.apply_engine_move(pos.row.into(), pos.col.into())?;
            Ok(pos)
        });
        self.last_ai_result = engine.last_search().copied();
        self.engine = Some(engine);

        match applied {
            Ok(pos) => self.record_move(pos, Stone::Ai),
            Err(err) => self.message = Some(format!("AI could not move: {err}")),
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Cells the engine would search first from the current position
    pub fn candidates(&self) -> Vec<Pos> {
        match &self.engine {
            Some(engine) if !self.is_over() => engine
                .frontier()
                .select_top(engine.board(), self.config.candidate_limit)
                .into_iter()
                .map(|(pos, _)| pos)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Take back the last human move and everything after it
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let mut moves = std::mem::take(&mut self.move_history);
        while let Some((_, stone)) = moves.pop() {
            if stone == Stone::Human {
                break;
            }
        }
        self.replay(moves);
    }

    /// Rebuild a fresh engine from a move record
    fn replay(&mut self, moves: Vec<(Pos, Stone)>) {
        let last_ai_result = self.last_ai_result.take();
        *self = Self::new(self.mode, self.config);
        self.last_ai_result = last_ai_result;

        for (pos, stone) in moves {
            let Some(engine) = self.engine.as_mut() else {
                return;
            };
            let (row, col) = (pos.row.into(), pos.col.into());
            let applied = match stone {
                Stone::Human => engine.apply_human_move(row, col),
                _ => engine.apply_engine_move(row, col),
            };
            if let Err(err) = applied {
                warn!("dropping move ({}, {}) from replay: {err}", pos.row, pos.col);
                continue;
            }
            self.record_move(pos, stone);
        }
        self.move_timer.start();
    }
}
