use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    GridGeometry, BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_OBSTACLE, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD_EAST, GLYPH_SNAKE_HEAD_NORTH, GLYPH_SNAKE_HEAD_SOUTH, GLYPH_SNAKE_HEAD_WEST,
    GLYPH_SNAKE_TAIL, TERMINAL_COLUMNS_PER_CELL,
};
use crate::direction::Direction;
use crate::game::{GamePhase, GameState};
use crate::geometry::Position;
use crate::snake::SegmentRole;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, hud_info);

    let theme = hud_info.theme;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_obstacles(frame, inner, state, hud_info);
    render_foods(frame, inner, state);
    render_snake(frame, inner, state, hud_info);

    match state.phase {
        GamePhase::NotStarted => render_start_menu(
            frame,
            play_area,
            state.level,
            state.high_score.unwrap_or(0),
            theme,
        ),
        GamePhase::Paused => render_pause_menu(frame, play_area, state.score),
        GamePhase::GameOver => render_game_over_menu(
            frame,
            play_area,
            state.score,
            state.high_score.unwrap_or(0),
            state.death_reason,
        ),
        GamePhase::Running => {}
    }
}

/// Color used for a food asset key.
#[must_use]
pub fn food_color(asset_key: &str) -> Color {
    match asset_key {
        "apple" => Color::Red,
        "egg" => Color::LightGreen,
        "banana" => Color::Yellow,
        "pear" => Color::Cyan,
        "strawberry" => Color::Magenta,
        "stone" => Color::DarkGray,
        "medicine" => Color::Rgb(0, 128, 128),
        _ => Color::White,
    }
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, state: &GameState, info: &HudInfo<'_>) {
    let geometry = state.geometry();
    let buffer = frame.buffer_mut();
    for block in &state.obstacles {
        if let Some((x, y)) = board_to_terminal(inner, geometry, block.position) {
            buffer.set_string(x, y, GLYPH_OBSTACLE, Style::new().fg(info.theme.obstacle));
        }
    }
}

fn render_foods(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let geometry = state.geometry();
    let buffer = frame.buffer_mut();
    for food in &state.foods {
        if let Some((x, y)) = board_to_terminal(inner, geometry, food.position) {
            let color = food_color(food.kind.asset_key());
            buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(color));
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, info: &HudInfo<'_>) {
    let geometry = state.geometry();
    let theme = info.theme;
    let buffer = frame.buffer_mut();

    // Tail first so the head wins if segments ever overlap.
    for segment in state.snake.segments().collect::<Vec<_>>().into_iter().rev() {
        let Some((x, y)) = board_to_terminal(inner, geometry, segment.position) else {
            continue;
        };

        let (glyph, mut style) = match segment.role {
            SegmentRole::Head => (
                head_glyph(segment.heading),
                Style::new().fg(theme.snake_head).add_modifier(Modifier::BOLD),
            ),
            SegmentRole::Body => (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body)),
            SegmentRole::Tail => (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail)),
        };
        if segment.just_ate {
            style = style.add_modifier(Modifier::REVERSED);
        }

        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::North => GLYPH_SNAKE_HEAD_NORTH,
        Direction::South => GLYPH_SNAKE_HEAD_SOUTH,
        Direction::East => GLYPH_SNAKE_HEAD_EAST,
        Direction::West => GLYPH_SNAKE_HEAD_WEST,
    }
}

fn board_to_terminal(
    inner: Rect,
    geometry: GridGeometry,
    position: Position,
) -> Option<(u16, u16)> {
    if !position.is_within_bounds(geometry) {
        return None;
    }

    let (column, row) = position.cell(geometry);
    let x_offset = u16::try_from(column)
        .ok()?
        .checked_mul(TERMINAL_COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
