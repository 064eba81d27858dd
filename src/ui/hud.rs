use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    /// Total number of levels with a defined layout.
    pub level_count: u32,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let score_area = inset_horizontal(score_area, HUD_MARGIN_X);
    let status_area = inset_horizontal(status_area, HUD_MARGIN_X);

    frame.render_widget(
        Paragraph::new(top_info_line(
            state.snake.len(),
            state.level,
            state.score,
            state.high_score.unwrap_or(0),
            usize::from(score_area.width),
            info.theme,
        ))
        .alignment(Alignment::Right),
        score_area,
    );

    let geometry = state.geometry();
    let bottom = format!(
        "{side}x{side}{SEPARATOR}food: {}{SEPARATOR}levels: 1-{}",
        state.foods.len(),
        info.level_count,
        side = geometry.cells_per_side(),
    );
    frame.render_widget(
        Paragraph::new(Line::from(bottom))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.hud_muted)),
        status_area,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn top_info_line(
    length: usize,
    level: u32,
    score: i64,
    high_score: i64,
    available_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let compact = top_info_text(length, level, score, high_score, false).width() > available_width;
    let labels = top_info_labels(compact);

    let value_style = Style::default().fg(theme.hud_score);
    let high_score_style = if score > high_score {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(theme.hud_muted)
    };

    Line::from(vec![
        Span::raw(format!("{}: ", labels[0])),
        Span::styled(length.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[1])),
        Span::styled(level.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[2])),
        Span::styled(score.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[3])),
        Span::styled(high_score.to_string(), high_score_style),
    ])
}

fn top_info_labels(compact: bool) -> [&'static str; 4] {
    if compact {
        ["L", "V", "S", "H"]
    } else {
        ["Length", "Level", "Score", "Hi"]
    }
}

fn top_info_text(length: usize, level: u32, score: i64, high_score: i64, compact: bool) -> String {
    let values = [
        length.to_string(),
        level.to_string(),
        score.to_string(),
        high_score.to_string(),
    ];

    top_info_labels(compact)
        .iter()
        .zip(values)
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::{top_info_line, top_info_text};
    use crate::config::THEME_CLASSIC;

    #[test]
    fn wide_rows_use_full_labels() {
        let line = top_info_line(7, 1, 12, 8, 200, &THEME_CLASSIC);

        assert_eq!(line.to_string(), top_info_text(7, 1, 12, 8, false));
    }

    #[test]
    fn narrow_rows_fall_back_to_compact_labels() {
        let full_width = top_info_text(7, 2, -10, 0, false).width();
        let line = top_info_line(7, 2, -10, 0, full_width - 1, &THEME_CLASSIC);

        assert_eq!(line.to_string(), "L: 7 │ V: 2 │ S: -10 │ H: 0");
    }
}
