use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::game::{GameLayer, GameState, Hud};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The score/lives mirror and overlay flags the game layer notifies and
/// the renderer reads.
#[derive(Debug, Default, Clone)]
pub struct HudState {
    pub score: u32,
    pub lives: i32,
    pub game_over: bool,
    pub game_won: bool,
}

impl Hud for HudState {
    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn update_lives(&mut self, lives: i32) {
        self.lives = lives;
    }

    fn show_game_over(&mut self) {
        self.game_over = true;
    }

    fn show_game_won(&mut self) {
        self.game_won = true;
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    game: GameLayer,
    hud: HudState,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    last_frame_time: Instant,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        let mut hud = HudState::default();
        let game = GameLayer::new(&mut hud);
        Self {
            running: true,
            game_state: GameState::Playing,
            game,
            hud,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::default(),
            last_frame_time: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            // Cap dt so a stall (resize, suspend) doesn't teleport everything
            let dt = now
                .duration_since(self.last_frame_time)
                .as_secs_f32()
                .min(0.1);
            self.last_frame_time = now;

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game_state,
                    game: &self.game,
                    hud: &self.hud,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(&self.game_state)?;
            let actions: Vec<InputAction> = self.input_manager.actions().to_vec();
            for action in actions {
                self.process_action(action);
            }

            if self.game_state == GameState::Playing {
                self.step_game(dt);
            }

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    fn process_action(&mut self, action: InputAction) {
        match action {
            InputAction::Quit => {
                self.running = false;
            }
            InputAction::Pause => {
                self.game_state = GameState::Paused;
            }
            InputAction::Resume => {
                self.game_state = GameState::Playing;
            }
            InputAction::Restart => {
                *self = Self::new();
            }
        }
    }

    /// Advances the game one frame and reacts to what happened in it.
    fn step_game(&mut self, dt: f32) {
        let input = self.input_manager.player_input();
        let shot_before = self.game.player_shot.is_some();
        let score_before = self.game.score;

        self.game.update(dt, &input, &mut self.hud);

        if !shot_before && self.game.player_shot.is_some() {
            self.audio_manager.play_fire();
        }
        if self.game.score > score_before {
            self.audio_manager.play_explosion();
        }

        if self.hud.game_over {
            self.game_state = GameState::GameOver;
        } else if self.hud.game_won {
            self.game_state = GameState::GameWon;
        }
    }
}
