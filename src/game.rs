//! Screen flow around the round simulation
//!
//! `Game` owns the settings, the high score table and the active round, and
//! moves between menus and play in response to `MenuAction`s. Menus
//! themselves are drawn and navigated by the host; only their outcomes
//! arrive here.

use glam::IVec2;
use rand::Rng;

use crate::audio::{AudioSink, Music, sound_for_event};
use crate::consts::SIM_DT;
use crate::highscores::HighScores;
use crate::settings::{OptionKind, Settings};
use crate::sim::{GameEvent, GameState, Outcome, RoundConfig, TickInput, tick};

/// Frame time is clamped to this many fixed steps
const MAX_SUBSTEPS: u32 = 6;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    OptionsMenu,
    Playing,
    GameOverMenu,
}

/// Menu selections delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    OpenOptions,
    /// Step a tunable while in the options menu
    Adjust(OptionKind, i32),
    BackToMainMenu,
    /// Play again from the game over screen
    Restart,
    Exit,
}

pub struct Game {
    screen: Screen,
    pub settings: Settings,
    pub high_scores: HighScores,
    round: Option<GameState>,
    screen_size: IVec2,
    audio: Box<dyn AudioSink>,
    last_outcome: Option<Outcome>,
    accumulator: f32,
    /// Input not yet consumed by a fixed step
    pending_input: TickInput,
    running: bool,
}

impl Game {
    pub fn new(
        screen_width: i32,
        screen_height: i32,
        settings: Settings,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let mut game = Self {
            screen: Screen::MainMenu,
            settings,
            high_scores: HighScores::new(),
            round: None,
            screen_size: IVec2::new(screen_width, screen_height),
            audio,
            last_outcome: None,
            accumulator: 0.0,
            pending_input: TickInput::default(),
            running: true,
        };
        game.to_main_menu();
        game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut GameState> {
        self.round.as_mut()
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// False once the player chose Exit
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Heading for the game over screen
    pub fn title(&self) -> Option<&'static str> {
        match (self.screen, self.last_outcome) {
            (Screen::GameOverMenu, Some(outcome)) if outcome.is_win() => Some("YOU WIN!"),
            (Screen::GameOverMenu, Some(_)) => Some("GAME OVER"),
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: MenuAction) {
        match (self.screen, action) {
            (_, MenuAction::Exit) => {
                log::info!("Exit requested");
                self.running = false;
            }
            (Screen::MainMenu, MenuAction::StartGame)
            | (Screen::GameOverMenu, MenuAction::StartGame | MenuAction::Restart) => {
                self.start_round();
            }
            (Screen::MainMenu | Screen::GameOverMenu, MenuAction::OpenOptions) => {
                self.set_screen(Screen::OptionsMenu);
                self.audio.stop_music();
            }
            (Screen::OptionsMenu, MenuAction::Adjust(kind, delta)) => {
                self.settings.adjust(kind, delta);
            }
            (Screen::OptionsMenu | Screen::GameOverMenu, MenuAction::BackToMainMenu) => {
                self.to_main_menu();
            }
            (screen, action) => {
                log::debug!("Ignoring {action:?} on {screen:?}");
            }
        }
    }

    /// Start a round with a fresh seed
    pub fn start_round(&mut self) {
        let seed: u64 = rand::rng().random();
        self.start_round_with_seed(seed);
    }

    /// Start a round; on a grid that cannot fit the screen, fall back to
    /// the main menu.
    pub fn start_round_with_seed(&mut self, seed: u64) {
        let config = RoundConfig::from(&self.settings);
        match GameState::new(config, self.screen_size.x, self.screen_size.y, seed) {
            Ok(state) => {
                log::info!(
                    "Round started: seed {seed}, {} enemies, speed {}",
                    state.enemies.len(),
                    config.player_speed
                );
                self.round = Some(state);
                self.last_outcome = None;
                self.accumulator = 0.0;
                self.pending_input = TickInput::default();
                self.set_screen(Screen::Playing);
                self.audio.play_music(Music::InGame);
            }
            Err(e) => {
                log::error!("Could not start round: {e}");
                self.round = None;
                self.to_main_menu();
            }
        }
    }

    /// Advance play by a variable frame time in fixed steps.
    ///
    /// `input` is queued and handed to the next step that runs, which may be
    /// in a later call when the frame is shorter than a step. Does nothing
    /// outside `Screen::Playing`.
    pub fn update(&mut self, frame_dt: f32, input: &TickInput) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        self.pending_input.keys.extend_from_slice(&input.keys);
        self.pending_input.place_bomb |= input.place_bomb;

        self.accumulator += frame_dt.min(SIM_DT * MAX_SUBSTEPS as f32);
        let mut over = false;

        while self.accumulator >= SIM_DT {
            let step_input = std::mem::take(&mut self.pending_input);
            tick(round, &step_input, SIM_DT);
            self.accumulator -= SIM_DT;

            for event in round.drain_events() {
                if let Some(effect) = sound_for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::RoundOver { .. } = event {
                    over = true;
                }
            }
            if over {
                break;
            }
        }

        if over {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let outcome = round.outcome();
        if let Some(outcome) = outcome {
            self.high_scores
                .add_score(round.score, outcome, round.time_remaining);
            log::info!(
                "{}: final score {}, high score {}",
                outcome.as_str(),
                round.score,
                self.high_scores.best().unwrap_or(0)
            );
        }
        self.last_outcome = outcome;
        self.accumulator = 0.0;
        self.pending_input = TickInput::default();
        self.audio.stop_music();
        self.set_screen(Screen::GameOverMenu);
    }

    fn to_main_menu(&mut self) {
        self.set_screen(Screen::MainMenu);
        self.audio.stop_music();
        self.audio.play_music(Music::Menu);
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::debug!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }
}
