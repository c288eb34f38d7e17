//! # Display Management
//!
//! Draws the playfield, a status panel and the message log with macroquad.

use crate::game::{EntityKind, GameState, Position, Tile};
use macroquad::prelude::*;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// Left margin in pixels
    pub margin_x: f32,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    pub fn new() -> Self {
        Self {
            tile_size: 14.0,
            margin_x: 2.0 * 14.0,
            messages: Vec::new(),
            max_messages: 100,
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, game_state: &GameState) {
        clear_background(BLACK);

        self.render_map(game_state);
        self.render_ui(game_state);
        self.render_messages();
    }

    /// Renders terrain with entities drawn over it.
    fn render_map(&self, game_state: &GameState) {
        let grid = &game_state.grid;
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = Position::new(x, y);
                let (screen_x, screen_y) = self.to_screen(pos);

                if grid.tile(pos) == Some(Tile::Wall) {
                    draw_rectangle(screen_x, screen_y, self.tile_size, self.tile_size, DARKGRAY);
                }
            }
        }

        for (pos, kind) in game_state.registry.iter_row_major() {
            let (screen_x, screen_y) = self.to_screen(pos);
            draw_text(
                &kind.glyph().to_string(),
                screen_x + 2.0,
                screen_y + self.tile_size - 2.0,
                self.tile_size + 4.0,
                entity_color(kind),
            );
        }
    }

    /// Renders the status line under the map.
    fn render_ui(&self, game_state: &GameState) {
        let line_y = self.map_bottom() + 20.0;
        let pursuer = match game_state.navigator.current_target {
            Some(target) => format!(
                "pursuer at ({}, {}), {} steps planned",
                target.x,
                target.y,
                game_state.navigator.current_path.len()
            ),
            None => "no pursuer".to_string(),
        };

        draw_text(
            &format!(
                "Wave {}   Hostiles {}   {}",
                game_state.wave,
                game_state.hostiles_remaining(),
                pursuer
            ),
            self.margin_x,
            line_y,
            20.0,
            WHITE,
        );
        draw_text(
            "WASD/arrows: move   E: new wave   Q/Esc: quit",
            self.margin_x,
            line_y + 20.0,
            16.0,
            GRAY,
        );
    }

    /// Renders the last few messages.
    fn render_messages(&self) {
        let message_area_y = self.map_bottom() + 70.0;
        let message_count = 3;
        let line_height = 18.0;

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, self.margin_x, y, 16.0, WHITE);
        }
    }

    fn to_screen(&self, pos: Position) -> (f32, f32) {
        (
            self.margin_x + pos.x as f32 * self.tile_size,
            pos.y as f32 * self.tile_size,
        )
    }

    fn map_bottom(&self) -> f32 {
        crate::config::GAME_FIELD_HEIGHT as f32 * self.tile_size
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}

/// Color each entity kind is drawn in.
fn entity_color(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Player => BLUE,
        EntityKind::Enemy => YELLOW,
        EntityKind::Merchant => SKYBLUE,
        EntityKind::MiniBoss => MAGENTA,
        EntityKind::Boss => RED,
    }
}
