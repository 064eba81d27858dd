use ratatui::style::Color;
use ratatui::symbols::border;

/// Board edge length in board units.
pub const DEFAULT_BOARD_SIZE: i32 = 800;

/// Edge length of one grid cell in board units.
pub const DEFAULT_CELL_SIZE: i32 = 20;

/// Fixed tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Number of food items kept on the board at all times.
pub const DEFAULT_FOOD_COUNT: usize = 10;

/// Segment count of a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 7;

/// Shrinking never takes the snake below this many segments.
pub const MIN_SNAKE_LENGTH: usize = 3;

/// Sampling attempts before unique placement accepts an occupied cell.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Square board dimensions, expressed in board units.
///
/// Every position on the board is a multiple of `cell_size` in
/// `0..board_size` on both axes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridGeometry {
    pub board_size: i32,
    pub cell_size: i32,
}

impl GridGeometry {
    /// Returns the number of cells along one edge.
    #[must_use]
    pub fn cells_per_side(self) -> i32 {
        self.board_size / self.cell_size
    }

    /// Returns the largest legal coordinate on either axis.
    #[must_use]
    pub fn max_coordinate(self) -> i32 {
        self.board_size - self.cell_size
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        let side = usize::try_from(self.cells_per_side()).unwrap_or(0);
        side * side
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Colors applied to the terminal presentation.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub obstacle: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    obstacle: Color::Gray,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each board cell is drawn two terminal columns wide to keep it square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

pub const GLYPH_SNAKE_HEAD_NORTH: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_SOUTH: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_EAST: &str = "▶▶";
pub const GLYPH_SNAKE_HEAD_WEST: &str = "◀◀";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_OBSTACLE: &str = "##";

#[cfg(test)]
mod tests {
    use super::GridGeometry;

    #[test]
    fn default_geometry_is_forty_cells_square() {
        let geometry = GridGeometry::default();

        assert_eq!(geometry.cells_per_side(), 40);
        assert_eq!(geometry.max_coordinate(), 780);
        assert_eq!(geometry.total_cells(), 1600);
    }
}
