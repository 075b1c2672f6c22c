//! The top-level game: session state and the finite state machine.
//!
//! Commands arrive from the input router, already normalized; each
//! state accepts its own small set and discards the rest.  Per-frame
//! work happens in [`Game::advance_frame`]; movement runs only on the
//! frames where the tick counter reaches the level's interval, which is
//! how the game speeds up without touching the 60 Hz cadence.

pub mod direction;
pub mod food;
pub mod grid;
pub mod sim;
pub mod snake;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, warn};

use crate::audio::{AudioRequest, MusicSequencer, SoundEffect, TrackId};
use crate::config::{
    self, BASE_MOVE_INTERVAL, BONUS_FOOD_POINTS, DEATH_BURST_PARTICLES, FOOD_BURST_PARTICLES,
    GAME_OVER_DELAY_FRAMES, INITIAL_LIVES, LEVEL_COMPLETE_AUTO_FRAMES, MAX_LIVES, NAME_LEN,
    RAINBOW_BURST_PARTICLES, REGULAR_FOOD_POINTS,
};
use crate::input::Command;
use crate::particles::{ParticleKind, ParticleSystem};
use crate::score::ScoreBoard;

use self::direction::Direction;
use self::food::FoodKind;
use self::grid::Cell;
use self::sim::{SimEvent, World};

// ── States ───────────────────────────────────────────────────────────────────

/// The single source of truth for what updates and draws each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    HighScoreEntry,
    HighScoreDisplay,
}

// ── Session ──────────────────────────────────────────────────────────────────

/// One play-through: created on start, discarded back at the menu.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Frames spent in `Playing`.
    pub frames_played: u64,
    /// Frames spent in `Paused`.
    pub frames_paused: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: INITIAL_LIVES,
            level: 1,
            frames_played: 0,
            frames_paused: 0,
        }
    }

    pub fn award(&mut self, points: u32) {
        self.score += points;
    }

    /// Spend a life; true when none remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Advance to the next level and grant the capped bonus life.
    pub fn complete_level(&mut self) {
        self.level += 1;
        self.lives = (self.lives + 1).min(MAX_LIVES);
    }

    pub fn score_multiplier(&self) -> u32 {
        config::score_multiplier(self.level)
    }

    pub fn move_interval(&self) -> u32 {
        config::move_interval(self.level)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

// ── Menu & name entry ────────────────────────────────────────────────────────

/// Main-menu options, top to bottom.
pub const MENU_OPTIONS: [&str; 3] = ["Start Game", "High Scores", "Quit"];

/// Hints shown while a high score is being signed.
pub const ENTRY_HINTS: [&str; 5] = [
    "Your level multiplies every point!",
    "Bonus worms are worth five regular ones!",
    "The snake speeds up every other level!",
    "Reach length 50 to clear the level!",
    "Clearing a level grants an extra life!",
];

/// Characters Up/Down cycle through in a name slot.
const NAME_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// In-progress high-score name.
#[derive(Debug, Clone)]
pub struct NameEntry {
    pub chars: [char; NAME_LEN],
    pub cursor: usize,
    pub hint: &'static str,
}

impl NameEntry {
    fn new(hint: &'static str) -> Self {
        Self {
            chars: ['A'; NAME_LEN],
            cursor: 0,
            hint,
        }
    }

    pub fn name(&self) -> String {
        self.chars.iter().collect()
    }

    fn put(&mut self, c: char) {
        self.chars[self.cursor] = c;
        if self.cursor < NAME_LEN - 1 {
            self.cursor += 1;
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars[self.cursor] = 'A';
        }
    }

    fn move_cursor(&mut self, step: i32) {
        let next = self.cursor as i32 + step;
        self.cursor = next.clamp(0, NAME_LEN as i32 - 1) as usize;
    }

    /// Step the current slot through the charset, wrapping.
    fn cycle(&mut self, step: i32) {
        let current = self.chars[self.cursor];
        let index = NAME_CHARSET
            .iter()
            .position(|&b| b as char == current)
            .unwrap_or(0) as i32;
        let len = NAME_CHARSET.len() as i32;
        let next = (index + step).rem_euclid(len) as usize;
        self.chars[self.cursor] = NAME_CHARSET[next] as char;
    }
}

// ── The game ─────────────────────────────────────────────────────────────────

/// The whole game: current state, live session, simulation world,
/// effects, soundtrack and the persisted score table.
#[derive(Debug)]
pub struct Game<R: Rng = ThreadRng> {
    state: GameState,
    session: Option<GameSession>,
    world: Option<World>,
    scoreboard: ScoreBoard,
    particles: ParticleSystem,
    music: MusicSequencer,
    audio: Vec<AudioRequest>,
    name_entry: Option<NameEntry>,
    menu_cursor: usize,
    /// Counts frames toward the next movement tick.
    move_timer: u32,
    /// Countdown used by the game-over hold and level-complete screens.
    state_timer: u32,
    /// Total frames since launch; drives sprite animation.
    frame: u64,
    should_quit: bool,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new(scoreboard: ScoreBoard) -> Self {
        Self::with_rng(scoreboard, rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Build with an injected RNG so tests are deterministic.
    pub fn with_rng(scoreboard: ScoreBoard, rng: R) -> Self {
        Self {
            state: GameState::MainMenu,
            session: None,
            world: None,
            scoreboard,
            particles: ParticleSystem::new(),
            music: MusicSequencer::new(),
            audio: Vec::new(),
            name_entry: None,
            menu_cursor: 0,
            move_timer: 0,
            state_timer: 0,
            frame: 0,
            should_quit: false,
            rng,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Mutable access to the live world, for scripted scenarios.
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn name_entry(&self) -> Option<&NameEntry> {
        self.name_entry.as_ref()
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn state_timer(&self) -> u32 {
        self.state_timer
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether letters should currently arrive as text commands.
    pub fn wants_text_input(&self) -> bool {
        self.state == GameState::HighScoreEntry
    }

    // ── Audio plumbing ───────────────────────────────────────────────────────

    /// Requests queued since the last drain, in order.
    pub fn drain_audio(&mut self) -> Vec<AudioRequest> {
        std::mem::take(&mut self.audio)
    }

    /// Start the soundtrack rotation; called once at launch.
    pub fn begin_soundtrack(&mut self) {
        if let Some(track) = self.music.pick_next(&mut self.rng) {
            self.audio.push(AudioRequest::PlayTrack(track));
        }
    }

    /// The sink reports the current track ended naturally.
    pub fn notify_track_finished(&mut self) {
        if let Some(track) = self.music.on_track_finished(&mut self.rng) {
            self.audio.push(AudioRequest::PlayTrack(track));
        }
    }

    /// The sink could not play `track`; rotate past it.
    pub fn notify_track_unavailable(&mut self, track: TrackId) {
        if let Some(next) = self.music.on_track_unavailable(track, &mut self.rng) {
            self.audio.push(AudioRequest::PlayTrack(next));
        }
    }

    fn sfx(&mut self, effect: SoundEffect) {
        self.audio.push(AudioRequest::PlayEffect(effect));
    }

    // ── Command dispatch ─────────────────────────────────────────────────────

    /// Feed one normalized command into the machine.  Commands outside
    /// the current state's accepted set are discarded.
    pub fn apply(&mut self, command: Command) {
        match (self.state, command) {
            // Main menu.
            (GameState::MainMenu, Command::Up) => {
                self.menu_cursor = (self.menu_cursor + MENU_OPTIONS.len() - 1) % MENU_OPTIONS.len();
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::MainMenu, Command::Down) => {
                self.menu_cursor = (self.menu_cursor + 1) % MENU_OPTIONS.len();
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::MainMenu, Command::Confirm | Command::Pause) => {
                self.select_menu_option();
            }
            (GameState::MainMenu, Command::Cancel) => {
                self.should_quit = true;
            }

            // Playing: steering plus pause.
            (GameState::Playing, Command::Up) => self.steer(Direction::Up),
            (GameState::Playing, Command::Down) => self.steer(Direction::Down),
            (GameState::Playing, Command::Left) => self.steer(Direction::Left),
            (GameState::Playing, Command::Right) => self.steer(Direction::Right),
            (GameState::Playing, Command::Pause | Command::Confirm) => {
                debug!("paused");
                self.state = GameState::Paused;
                self.sfx(SoundEffect::MenuBlip);
            }

            (GameState::Paused, Command::Pause | Command::Confirm) => {
                debug!("resumed");
                self.state = GameState::Playing;
                self.sfx(SoundEffect::MenuBlip);
            }

            (GameState::LevelComplete, Command::Confirm | Command::Pause) => {
                self.next_level();
            }

            // Game over accepts input only once the hold expires.
            (GameState::GameOver, Command::Confirm | Command::Pause) if self.state_timer == 0 => {
                self.to_main_menu();
            }

            // Name entry.
            (GameState::HighScoreEntry, Command::TextChar(c)) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.put(c);
                }
                self.sfx(SoundEffect::SelectLetter);
            }
            (GameState::HighScoreEntry, Command::Backspace) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.backspace();
                }
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::HighScoreEntry, Command::Left) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.move_cursor(-1);
                }
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::HighScoreEntry, Command::Right) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.move_cursor(1);
                }
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::HighScoreEntry, Command::Up) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.cycle(-1);
                }
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::HighScoreEntry, Command::Down) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.cycle(1);
                }
                self.sfx(SoundEffect::MenuBlip);
            }
            (GameState::HighScoreEntry, Command::Confirm) => {
                self.commit_name_entry();
            }

            (GameState::HighScoreDisplay, Command::Confirm | Command::Cancel | Command::Pause) => {
                self.sfx(SoundEffect::MenuBlip);
                self.to_main_menu();
            }

            // Everything else is outside the state's accepted set.
            _ => {}
        }
    }

    fn steer(&mut self, direction: Direction) {
        if let Some(world) = self.world.as_mut() {
            world.snake.steer(direction);
        }
    }

    fn select_menu_option(&mut self) {
        match self.menu_cursor {
            0 => self.start_session(),
            1 => {
                self.sfx(SoundEffect::MenuBlip);
                self.state = GameState::HighScoreDisplay;
            }
            _ => self.should_quit = true,
        }
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// One frame of work.  Movement happens only when the tick counter
    /// reaches the level's interval; everything else runs every frame.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        self.particles.advance();

        match self.state {
            GameState::Playing => {
                if let Some(session) = self.session.as_mut() {
                    session.frames_played += 1;
                }
                if let Some(world) = self.world.take() {
                    self.world = Some(sim::age_bonus(&world));
                }
                self.move_timer += 1;
                let interval = self
                    .session
                    .as_ref()
                    .map_or(BASE_MOVE_INTERVAL, |s| s.move_interval());
                if self.move_timer >= interval {
                    self.move_timer = 0;
                    self.tick();
                }
            }
            GameState::Paused => {
                if let Some(session) = self.session.as_mut() {
                    session.frames_paused += 1;
                }
            }
            GameState::GameOver => {
                if self.state_timer > 0 {
                    self.state_timer -= 1;
                    if self.state_timer == 0 {
                        let score = self.session.as_ref().map_or(0, |s| s.score);
                        if self.scoreboard.qualifies(score) {
                            self.enter_high_score_entry();
                        }
                        // Otherwise hold for a confirm back to the menu.
                    }
                }
            }
            GameState::LevelComplete => {
                if self.state_timer > 0 {
                    self.state_timer -= 1;
                    if self.state_timer == 0 {
                        self.next_level();
                    }
                }
            }
            GameState::MainMenu | GameState::HighScoreEntry | GameState::HighScoreDisplay => {}
        }
    }

    /// Run one movement tick and fold its events into the session.
    fn tick(&mut self) {
        let Some(world) = self.world.take() else {
            return;
        };
        let outcome = sim::step(&world, &mut self.rng);
        self.world = Some(outcome.world);
        for event in outcome.events {
            self.handle_sim_event(event);
        }
    }

    fn handle_sim_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::AteFood(kind) => {
                let multiplier = self.session.as_ref().map_or(1, |s| s.score_multiplier());
                let (base, effect, particle, count) = match kind {
                    FoodKind::Regular => (
                        REGULAR_FOOD_POINTS,
                        SoundEffect::EatFruit,
                        ParticleKind::FoodBurst,
                        FOOD_BURST_PARTICLES,
                    ),
                    FoodKind::Bonus => (
                        BONUS_FOOD_POINTS,
                        SoundEffect::PowerUp,
                        ParticleKind::Rainbow,
                        RAINBOW_BURST_PARTICLES,
                    ),
                };
                if let Some(session) = self.session.as_mut() {
                    session.award(base * multiplier);
                }
                self.sfx(effect);
                if let Some(world) = self.world.as_ref() {
                    let (x, y) = world.snake.head().center_px();
                    self.particles.spawn(particle, x, y, count, &mut self.rng);
                }
            }

            SimEvent::Collided => {
                self.sfx(SoundEffect::Die);
                let segments: Vec<Cell> = self
                    .world
                    .as_ref()
                    .map(|w| w.snake.body().iter().copied().collect())
                    .unwrap_or_default();
                for cell in segments {
                    let (x, y) = cell.center_px();
                    self.particles.spawn(
                        ParticleKind::Collision,
                        x,
                        y,
                        DEATH_BURST_PARTICLES,
                        &mut self.rng,
                    );
                }

                let out_of_lives = self.session.as_mut().map_or(true, |s| s.lose_life());
                if out_of_lives {
                    debug!("out of lives, game over");
                    self.sfx(SoundEffect::OutOfLives);
                    self.audio.push(AudioRequest::PlayTrack(TrackId::GameOver));
                    self.music.suspend();
                    self.state = GameState::GameOver;
                    self.state_timer = GAME_OVER_DELAY_FRAMES;
                } else {
                    // Life lost: fresh snake and food, same level and score.
                    self.world = Some(World::new(&mut self.rng));
                    self.move_timer = 0;
                }
            }

            SimEvent::LevelComplete => {
                self.sfx(SoundEffect::LevelUp);
                self.state = GameState::LevelComplete;
                self.state_timer = LEVEL_COMPLETE_AUTO_FRAMES;
            }
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    fn start_session(&mut self) {
        debug!("starting new session");
        self.sfx(SoundEffect::StartGame);
        self.resume_music();
        self.session = Some(GameSession::new());
        self.world = Some(World::new(&mut self.rng));
        self.particles.clear();
        self.move_timer = 0;
        self.state_timer = 0;
        self.state = GameState::Playing;
    }

    fn next_level(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.complete_level();
            debug!(level = session.level, "level up");
        }
        self.world = Some(World::new(&mut self.rng));
        self.particles.clear();
        self.move_timer = 0;
        self.state_timer = 0;
        self.state = GameState::Playing;
    }

    fn enter_high_score_entry(&mut self) {
        let hint = ENTRY_HINTS[self.rng.gen_range(0..ENTRY_HINTS.len())];
        self.name_entry = Some(NameEntry::new(hint));
        self.state = GameState::HighScoreEntry;
    }

    fn commit_name_entry(&mut self) {
        let Some(entry) = self.name_entry.take() else {
            return;
        };
        let score = self.session.as_ref().map_or(0, |s| s.score);
        self.sfx(SoundEffect::SelectLetter);
        if let Some(rank) = self.scoreboard.insert(&entry.name(), score) {
            debug!(rank, name = %entry.name(), score, "high score recorded");
            if let Err(err) = self.scoreboard.persist() {
                warn!(%err, "could not write score file, table kept in memory");
            }
        }
        self.state = GameState::HighScoreDisplay;
    }

    fn to_main_menu(&mut self) {
        self.session = None;
        self.world = None;
        self.name_entry = None;
        self.particles.clear();
        self.resume_music();
        self.menu_cursor = 0;
        self.state_timer = 0;
        self.state = GameState::MainMenu;
    }

    /// Restart the rotation after game-over music suspended it.
    fn resume_music(&mut self) {
        if self.music.is_suspended() {
            self.music.resume();
            if let Some(track) = self.music.pick_next(&mut self.rng) {
                self.audio.push(AudioRequest::PlayTrack(track));
            }
        }
    }
}
