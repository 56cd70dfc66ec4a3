/// The world map: an immutable 16×16 grid of wall/empty cells, queried for
/// collision and ray termination. Coordinates off the grid are "void", not
/// walls — callers bounds-check with [`WorldMap::contains`] before indexing
/// and treat void as an implicit boundary (ray terminates, move rejected).

pub const MAP_WIDTH: usize = 16;
pub const MAP_HEIGHT: usize = 16;

/// `#` = wall, `.` = empty. Row 0 is the top of the minimap.
const LAYOUT: [&str; MAP_HEIGHT] = [
    "################",
    "#..............#",
    "#........#.....#",
    "#........#.....#",
    "#..............#",
    "#.......####...#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#......##......#",
    "#......##......#",
    "#..............#",
    "#..............#",
    "#..............#",
    "################",
];

#[derive(Clone, Debug)]
pub struct WorldMap {
    cells: [bool; MAP_WIDTH * MAP_HEIGHT],
}

impl WorldMap {
    pub fn new() -> Self {
        Self::from_layout(&LAYOUT)
    }

    /// Build a map from 16 rows of `#`/`.` characters.
    pub fn from_layout(layout: &[&str; MAP_HEIGHT]) -> Self {
        let mut cells = [false; MAP_WIDTH * MAP_HEIGHT];
        for (row, line) in layout.iter().enumerate() {
            for (col, ch) in line.chars().take(MAP_WIDTH).enumerate() {
                cells[row * MAP_WIDTH + col] = ch == '#';
            }
        }
        WorldMap { cells }
    }

    /// Whether cell (col, row) is a wall. Both coordinates must be in range;
    /// callers guard with [`contains`](Self::contains) first.
    pub fn is_wall(&self, col: usize, row: usize) -> bool {
        self.cells[row * MAP_WIDTH + col]
    }

    /// Whether a continuous point lies inside the map bounds.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x < MAP_WIDTH as f32 && y >= 0.0 && y < MAP_HEIGHT as f32
    }

    /// Wall test for a continuous point already known to be in bounds.
    pub fn wall_at(&self, x: f32, y: f32) -> bool {
        self.is_wall(x as usize, y as usize)
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new()
    }
}
