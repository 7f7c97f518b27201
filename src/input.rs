use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::game::GameState;

/// Held-key snapshot sampled once per frame and handed to the game layer.
/// Latest state wins when several events for the same key arrive within
/// one frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// One-shot actions that fire on key press, independent of held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Manages input polling and translates raw key events into held state and
/// one-shot actions.
pub struct InputManager {
    keys: InputState,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            keys: InputState::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Drains all pending events without blocking. Call once per frame
    /// before reading actions or the held-key state.
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, game_state),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        Ok(())
    }

    /// The held keys the player actor reads this frame.
    pub fn player_input(&self) -> InputState {
        self.keys
    }

    /// One-shot actions collected by the last `poll_events` call.
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::Playing => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Pause);
                    return;
                }
            }
            GameState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Resume);
                    return;
                }
            }
            GameState::GameOver | GameState::GameWon => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.oneshot_actions.push(InputAction::Restart);
                    return;
                }
            }
        }

        // Held keys only matter while playing
        if *game_state == GameState::Playing {
            match key_event.code {
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.keys.left = true;
                    self.keys.right = false;
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.keys.right = true;
                    self.keys.left = false;
                }
                KeyCode::Char(' ') => {
                    self.keys.fire = true;
                }
                _ => {}
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.keys.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.keys.right = false;
            }
            KeyCode::Char(' ') => {
                self.keys.fire = false;
            }
            _ => {}
        }
    }
}
