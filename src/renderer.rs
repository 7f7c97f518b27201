use glam::Vec2;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::HudState;
use crate::entities::{Actor, AlienKind};
use crate::game::{FIELD_HEIGHT, FIELD_WIDTH, GameLayer, GameState};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub game: &'a GameLayer,
    pub hud: &'a HudState,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_end_screen(frame, view, "GAME OVER", Color::Red),
            GameState::GameWon => self.render_end_screen(frame, view, "YOU WON!", Color::Green),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        // Top and bottom rows are reserved for the HUD
        let field = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };

        let buffer = frame.buffer_mut();

        draw_sprite(
            buffer,
            field,
            view.game.player.position(),
            "<=A=>",
            Color::Green,
        );

        for alien in view.game.alien_group.iter() {
            let (glyph, color) = match alien.kind {
                AlienKind::Squid => ("/oo\\", Color::Magenta),
                AlienKind::Crab => ("<mm>", Color::Cyan),
                AlienKind::Octopus => ("{@@}", Color::Red),
            };
            draw_sprite(buffer, field, alien.position(), glyph, color);
        }

        if let Some(shot) = &view.game.player_shot {
            draw_sprite(buffer, field, shot.position(), "|", Color::Yellow);
        }
        for shot in &view.game.alien_shots {
            draw_sprite(buffer, field, shot.position(), "!", Color::Magenta);
        }
        for ship in &view.game.mystery_ships {
            draw_sprite(buffer, field, ship.position(), "<O-O>", Color::LightRed);
        }

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.hud.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.hud.lives),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Aliens: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.game.alien_group.alien_count()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: (area.width / 2).saturating_sub(15),
            y: (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    fn render_end_screen(&self, frame: &mut Frame, view: &RenderView, title: &str, color: Color) {
        let area = view.area;
        let text = vec![
            Line::from(""),
            Line::from(title.to_string())
                .centered()
                .fg(color)
                .bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.hud.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Draws a one-row glyph centered on a world position, skipping anything
/// that projects outside the field area.
fn draw_sprite(buffer: &mut Buffer, field: Rect, pos: Vec2, glyph: &str, color: Color) {
    let Some((x, y)) = project(field, pos, glyph.len() as u16) else {
        return;
    };
    buffer.set_string(
        x,
        y,
        glyph,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    );
}

/// Maps a world position (y-up, FIELD_WIDTH x FIELD_HEIGHT) to the top-left
/// cell of a `width`-cell glyph centered on it. None when off-screen.
fn project(field: Rect, pos: Vec2, width: u16) -> Option<(u16, u16)> {
    if field.width == 0 || field.height == 0 {
        return None;
    }
    let fx = pos.x / FIELD_WIDTH;
    let fy = pos.y / FIELD_HEIGHT;
    if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
        return None;
    }
    let cx = (fx * f32::from(field.width - 1)) as u16;
    let cy = (fy * f32::from(field.height - 1)) as u16;
    let x = (field.x + cx).saturating_sub(width / 2);
    if x + width > field.x + field.width {
        return None;
    }
    // World y grows upward, terminal rows grow downward
    let y = field.y + field.height - 1 - cy;
    Some((x, y))
}
