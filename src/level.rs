use crate::config::GridGeometry;
use crate::geometry::Position;

/// Static impassable cell belonging to a level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ObstacleBlock {
    pub position: Position,
}

/// Horizontal or vertical run of obstacle cells, in cell indices.
#[derive(Debug, Clone, Copy)]
enum Run {
    Row { row: i32, from: i32, to: i32 },
    Column { column: i32, from: i32, to: i32 },
}

// Layouts are authored for a 40x40 grid and keep row 0 free for the
// spawning snake.
const LEVEL_1: &[Run] = &[];

const LEVEL_2: &[Run] = &[
    Run::Row { row: 13, from: 8, to: 31 },
    Run::Row { row: 26, from: 8, to: 31 },
];

const LEVEL_3: &[Run] = &[
    Run::Column { column: 10, from: 5, to: 34 },
    Run::Column { column: 29, from: 5, to: 34 },
    Run::Row { row: 19, from: 14, to: 25 },
];

const LEVELS: &[&[Run]] = &[LEVEL_1, LEVEL_2, LEVEL_3];

/// Number of levels with a defined layout.
#[must_use]
pub fn level_count() -> u32 {
    u32::try_from(LEVELS.len()).unwrap_or(u32::MAX)
}

/// Returns the obstacle layout of `level` scaled to `geometry`.
///
/// Unknown levels (including 0) have no obstacles. Cells that would fall
/// outside a smaller board are dropped.
#[must_use]
pub fn obstacles_for_level(level: u32, geometry: GridGeometry) -> Vec<ObstacleBlock> {
    let Some(runs) = level
        .checked_sub(1)
        .and_then(|index| LEVELS.get(usize::try_from(index).ok()?))
    else {
        return Vec::new();
    };

    runs.iter()
        .flat_map(|run| run_cells(*run))
        .map(|(column, row)| Position {
            x: column * geometry.cell_size,
            y: row * geometry.cell_size,
        })
        .filter(|position| position.is_within_bounds(geometry))
        .map(|position| ObstacleBlock { position })
        .collect()
}

fn run_cells(run: Run) -> Vec<(i32, i32)> {
    match run {
        Run::Row { row, from, to } => (from..=to).map(|column| (column, row)).collect(),
        Run::Column { column, from, to } => (from..=to).map(|row| (column, row)).collect(),
    }
}
