use crate::error::{Error, Result};
use crate::geometry::Segment;
use macroquad::math::{vec2, Rect, Vec2};

/// Built-in 10x10 board: a walled room with a single pillar
pub const DEFAULT_MAP: &str = "\
1111111111
1000000001
1000000001
1000000001
1010000001
1000000001
1000000001
1000000001
1000000001
1111111111
";

/// Occupancy grid of uniform square cells
/// Cells are stored row-major; `true` means wall
#[derive(Clone, Debug)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<bool>,
    /// World units per cell edge
    pub cell_size: f32,
}

impl Grid {
    /// Create a new grid with all cells open
    pub fn new(rows: i32, cols: i32, cell_size: f32) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![false; (rows.max(0) * cols.max(0)) as usize],
            cell_size,
        }
    }

    /// Create a grid with specific wall cells given as (col, row)
    pub fn with_walls(rows: i32, cols: i32, cell_size: f32, walls: &[(i32, i32)]) -> Self {
        let mut grid = Self::new(rows, cols, cell_size);
        for &(col, row) in walls {
            grid.set_wall(col, row, true);
        }
        grid
    }

    /// Room enclosed by a one-cell wall ring
    pub fn bordered(rows: i32, cols: i32, cell_size: f32) -> Self {
        let mut grid = Self::new(rows, cols, cell_size);
        for row in 0..rows {
            for col in 0..cols {
                if row == 0 || col == 0 || row == rows - 1 || col == cols - 1 {
                    grid.set_wall(col, row, true);
                }
            }
        }
        grid
    }

    /// Build a grid from rows of 0/1 values
    pub fn from_rows(rows: &[Vec<u8>], cell_size: f32) -> Result<Self> {
        let expected = rows.first().map(|r| r.len()).unwrap_or(0);
        if expected == 0 {
            return Err(Error::EmptyGrid);
        }

        let mut grid = Self::new(rows.len() as i32, expected as i32, cell_size);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(Error::RaggedGrid {
                    row: row_index,
                    expected,
                    found: row.len(),
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                grid.set_wall(col_index as i32, row_index as i32, value != 0);
            }
        }

        Ok(grid)
    }

    /// Parse a text map
    /// Format:
    /// - `1`, `#`, `■`: wall
    /// - `0`, `.`, `□`: open
    /// - blank lines are skipped, trailing whitespace is ignored
    pub fn parse(text: &str, cell_size: f32) -> Result<Self> {
        let mut rows = Vec::new();

        for (row_index, line) in text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            let mut row = Vec::new();
            for (col_index, ch) in line.chars().enumerate() {
                match ch {
                    '1' | '#' | '■' => row.push(1),
                    '0' | '.' | '□' => row.push(0),
                    _ => {
                        return Err(Error::InvalidMapChar {
                            row: row_index,
                            col: col_index,
                            ch,
                        })
                    }
                }
            }
            rows.push(row);
        }

        Self::from_rows(&rows, cell_size)
    }

    /// Check if (col, row) lies inside the grid
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols && row >= 0 && row < self.rows
    }

    /// Check if the cell at (col, row) is a wall
    /// Out of bounds is not a wall; scans must test `contains` to stop at the edge
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        if !self.contains(col, row) {
            return false;
        }
        self.cells[self.get_id(col, row)]
    }

    /// Set or clear a wall; out of bounds is ignored
    pub fn set_wall(&mut self, col: i32, row: i32, wall: bool) {
        if self.contains(col, row) {
            let id = self.get_id(col, row);
            self.cells[id] = wall;
        }
    }

    /// Convert (col, row) to the row-major cell index
    pub fn get_id(&self, col: i32, row: i32) -> usize {
        (col + row * self.cols) as usize
    }

    /// Cell containing a world point
    /// Uses floor division so points left of or above the origin map to negative cells
    pub fn world_to_cell(&self, point: Vec2) -> (i32, i32) {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Check if the cell containing a world point is a wall
    pub fn is_wall_at(&self, point: Vec2) -> bool {
        let (col, row) = self.world_to_cell(point);
        self.is_wall(col, row)
    }

    /// Check if a world point lies inside the grid
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (col, row) = self.world_to_cell(point);
        self.contains(col, row)
    }

    /// Axis-aligned world rectangle covered by a cell
    pub fn cell_to_world_rect(&self, col: i32, row: i32) -> Rect {
        Rect::new(
            col as f32 * self.cell_size,
            row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// The four edges of a cell: top, left, right, bottom
    pub fn cell_edges(&self, col: i32, row: i32) -> [Segment; 4] {
        let size = self.cell_size;
        let top_left = vec2(col as f32 * size, row as f32 * size);
        let top_right = top_left + vec2(size, 0.0);
        let bottom_left = top_left + vec2(0.0, size);
        let bottom_right = top_left + vec2(size, size);

        [
            Segment::new(top_left, top_right),
            Segment::new(top_left, bottom_left),
            Segment::new(top_right, bottom_right),
            Segment::new(bottom_left, bottom_right),
        ]
    }

    /// Iterate over all wall cells as (col, row)
    pub fn wall_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &wall)| wall)
            .map(move |(id, _)| (id as i32 % self.cols, id as i32 / self.cols))
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&wall| wall).count()
    }

    pub fn world_width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    pub fn world_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// World position of the center of the grid
    pub fn center(&self) -> Vec2 {
        vec2(self.world_width() / 2.0, self.world_height() / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_open() {
        let grid = Grid::new(4, 6, 10.0);
        assert_eq!(grid.cells.len(), 24);
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_not_wall() {
        let grid = Grid::bordered(3, 3, 1.0);
        assert!(grid.is_wall(0, 0));
        assert!(!grid.is_wall(-1, 0));
        assert!(!grid.is_wall(0, 3));
        assert!(!grid.contains(3, 0));
    }

    #[test]
    fn test_world_to_cell_uses_floor() {
        let grid = Grid::new(10, 10, 60.0);
        assert_eq!(grid.world_to_cell(vec2(59.9, 60.0)), (0, 1));
        assert_eq!(grid.world_to_cell(vec2(-0.5, 0.0)), (-1, 0));
        assert_eq!(grid.world_to_cell(vec2(-60.0, -60.1)), (-1, -2));
    }

    #[test]
    fn test_cell_rect() {
        let grid = Grid::new(10, 10, 60.0);
        let rect = grid.cell_to_world_rect(2, 3);
        assert_eq!(rect.x, 120.0);
        assert_eq!(rect.y, 180.0);
        assert_eq!(rect.w, 60.0);
        assert_eq!(rect.h, 60.0);
    }

    #[test]
    fn test_cell_edges_form_square() {
        let grid = Grid::new(2, 2, 2.0);
        let edges = grid.cell_edges(1, 0);
        for edge in &edges {
            assert_eq!(edge.length(), 2.0);
        }
        assert_eq!(edges[0].start, vec2(2.0, 0.0));
        assert_eq!(edges[3].end, vec2(4.0, 2.0));
    }

    #[test]
    fn test_parse_default_map() {
        let grid = Grid::parse(DEFAULT_MAP, 60.0).unwrap();
        assert_eq!(grid.rows, 10);
        assert_eq!(grid.cols, 10);
        // Border ring plus the pillar at column 2, row 4
        assert_eq!(grid.wall_count(), 37);
        assert!(grid.is_wall(2, 4));
        assert!(!grid.is_wall(4, 2));
    }

    #[test]
    fn test_parse_symbols() {
        let grid = Grid::parse("■□\n#.\n\n", 1.0).unwrap();
        assert_eq!(grid.rows, 2);
        assert!(grid.is_wall(0, 0));
        assert!(!grid.is_wall(1, 0));
        assert!(grid.is_wall(0, 1));
        assert!(!grid.is_wall(1, 1));
    }

    #[test]
    fn test_parse_rejects_ragged_and_unknown() {
        assert!(matches!(
            Grid::parse("111\n11\n", 1.0),
            Err(Error::RaggedGrid { row: 1, expected: 3, found: 2 })
        ));
        assert!(matches!(
            Grid::parse("1x1\n", 1.0),
            Err(Error::InvalidMapChar { row: 0, col: 1, ch: 'x' })
        ));
        assert!(matches!(Grid::parse("\n\n", 1.0), Err(Error::EmptyGrid)));
    }

    #[test]
    fn test_wall_cells_iteration() {
        let grid = Grid::with_walls(3, 4, 1.0, &[(3, 0), (1, 2)]);
        let walls: Vec<_> = grid.wall_cells().collect();
        assert_eq!(walls, vec![(3, 0), (1, 2)]);
    }
}
