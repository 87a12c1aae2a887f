//! Scene drawing: menu, running round, end screen

use glam::Vec2;

use super::{Color, Surface, colors};
use crate::config::GameConfig;
use crate::level::LevelChoice;
use crate::sim::{BonusKind, Brick, BrickShape, Rect, RoundPhase, RoundState};

const HUD_MARGIN: f32 = 10.0;
const MENU_X: f32 = 200.0;
const MENU_LINE_SPACING: f32 = 50.0;

fn screen_rect(config: &GameConfig) -> Rect {
    Rect::new(0.0, 0.0, config.screen_width, config.screen_height)
}

/// Brick colour by remaining durability
fn brick_color(brick: &Brick) -> Color {
    let idx = (brick.durability().max(1) as usize - 1).min(colors::BRICK.len() - 1);
    colors::BRICK[idx]
}

fn bonus_color(kind: BonusKind) -> Color {
    match kind {
        BonusKind::ExtraLife => colors::BONUS_EXTRA_LIFE,
        BonusKind::MultiBall => colors::BONUS_MULTI_BALL,
        BonusKind::SmallPlatform => colors::BONUS_SMALL_PLATFORM,
    }
}

/// Level-selection screen
pub fn draw_menu(surface: &mut impl Surface, config: &GameConfig, choices: &[LevelChoice]) {
    surface.fill_rect(&screen_rect(config), colors::BACKGROUND);
    surface.draw_text(
        "Select Level and Brick Shape:",
        Vec2::new(MENU_X, 150.0),
        colors::TITLE,
    );
    for (i, choice) in choices.iter().enumerate() {
        let y = 200.0 + i as f32 * MENU_LINE_SPACING;
        surface.draw_text(&choice.label(), Vec2::new(MENU_X, y), colors::TEXT);
    }
    surface.draw_text(
        "Arrows move the paddle, q quits",
        Vec2::new(MENU_X, 200.0 + choices.len() as f32 * MENU_LINE_SPACING + 30.0),
        colors::TEXT.dimmed(0.6),
    );
}

/// One frame of a running round
pub fn draw_round(surface: &mut impl Surface, state: &RoundState) {
    let config = &state.config;
    surface.fill_rect(&screen_rect(config), colors::BACKGROUND);

    for brick in state.bricks.iter().filter(|b| !b.is_destroyed()) {
        let color = brick_color(brick);
        match brick.shape {
            BrickShape::Rectangular => surface.fill_rect(&brick.rect, color),
            BrickShape::Triangular | BrickShape::Hexagonal => {
                surface.fill_polygon(&brick.outline(), color)
            }
        }
    }

    let paddle_color = if state.paddle.is_small() {
        colors::PADDLE_SMALL
    } else {
        colors::PADDLE
    };
    surface.fill_rect(&state.paddle.rect(), paddle_color);

    for ball in &state.balls {
        surface.fill_circle(ball.pos, ball.radius, colors::BALL);
    }

    for bonus in &state.bonuses {
        surface.fill_rect(&bonus.rect(), bonus_color(bonus.kind));
    }

    let lives = format!("Lives: {}", state.lives);
    let size = surface.measure_text(&lives);
    surface.draw_text(
        &lives,
        Vec2::new(
            config.screen_width - size.x - HUD_MARGIN,
            config.screen_height - size.y - HUD_MARGIN,
        ),
        colors::TEXT,
    );

    let score = format!("Score: {}", state.score);
    let size = surface.measure_text(&score);
    surface.draw_text(
        &score,
        Vec2::new(HUD_MARGIN, config.screen_height - size.y - HUD_MARGIN),
        colors::TEXT,
    );
}

/// Result screen after a round that ended in a win or a loss
pub fn draw_end_screen(surface: &mut impl Surface, config: &GameConfig, phase: RoundPhase, score: i64) {
    surface.fill_rect(&screen_rect(config), colors::BACKGROUND);
    let headline = match phase {
        RoundPhase::Won => "You Won!",
        _ => "Game Over!",
    };
    surface.draw_text(headline, Vec2::new(350.0, 200.0), colors::TITLE);
    surface.draw_text(&format!("Score: {score}"), Vec2::new(350.0, 250.0), colors::TEXT);
    surface.draw_text(
        "Press Enter to play again",
        Vec2::new(300.0, 300.0),
        colors::TEXT,
    );
}
