use crate::cell::{Cell, CellKind, Distance};
use crate::error::LayoutError;
use crate::{FxIndexMap, MARGIN, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [CellGrid] owns a fixed `columns × rows` block of [Cell]s stored in a [SimpleGrid]. Row 0 and
/// column 0 form a margin that never takes part in editing or searching, the searchable area is
/// `[MARGIN, columns - 1] × [MARGIN, rows - 1]`.
///
/// The grid keeps track of where the start and finish markers are so that at most one of each
/// exists, and maintains connected components of passable cells in a [UnionFind] structure.
#[derive(Clone, Debug)]
pub struct CellGrid {
    cells: SimpleGrid<Cell>,
    start: Option<Point>,
    finish: Option<Point>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl CellGrid {
    pub fn new(columns: usize, rows: usize) -> CellGrid {
        let mut cells = SimpleGrid::new(columns, rows, Cell::new(Point::new(0, 0)));
        for (x, y) in iproduct!(0..columns as i32, 0..rows as i32) {
            let p = Point::new(x, y);
            cells.set_point(p, Cell::new(p));
        }
        let mut grid = CellGrid {
            cells,
            start: None,
            finish: None,
            components: UnionFind::new(columns * rows),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Builds a grid from rows of glyphs (`.` free, `#` wall, `S` start, `G` finish) describing the
    /// searchable area. The margin is added in front of the first row and column. Blank lines
    /// and surrounding whitespace are ignored.
    pub fn from_layout(layout: &str) -> Result<CellGrid, LayoutError> {
        let lines = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let width = match lines.first() {
            Some(line) => line.chars().count(),
            None => return Err(LayoutError::Empty),
        };
        let margin = MARGIN as usize;
        let mut grid = CellGrid::new(width + margin, lines.len() + margin);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                let p = Point::new((column + margin) as i32, (row + margin) as i32);
                let kind = match CellKind::from_glyph(glyph) {
                    Some(kind @ (CellKind::Free | CellKind::Wall)) => kind,
                    Some(CellKind::Start) if grid.start.is_some() => {
                        return Err(LayoutError::DuplicateStart)
                    }
                    Some(CellKind::Finish) if grid.finish.is_some() => {
                        return Err(LayoutError::DuplicateFinish)
                    }
                    Some(kind @ (CellKind::Start | CellKind::Finish)) => kind,
                    _ => return Err(LayoutError::UnknownGlyph { glyph, column, row }),
                };
                grid.replace_kind(p, kind);
            }
        }
        grid.update();
        Ok(grid)
    }

    pub fn columns(&self) -> usize {
        self.cells.width()
    }
    pub fn rows(&self) -> usize {
        self.cells.height()
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn finish(&self) -> Option<Point> {
        self.finish
    }

    fn point_in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && self.cells.point_in_bounds(pos)
    }
    /// Whether `pos` lies inside the searchable area, i.e. inside the grid and outside the margin.
    pub fn in_search_area(&self, pos: Point) -> bool {
        pos.x >= MARGIN && pos.y >= MARGIN && self.cells.point_in_bounds(pos)
    }

    pub fn cell(&self, pos: Point) -> Option<&Cell> {
        if self.point_in_bounds(pos) {
            self.cells.get_point(pos)
        } else {
            None
        }
    }
    fn cell_mut(&mut self, pos: Point) -> Option<&mut Cell> {
        if self.point_in_bounds(pos) {
            self.cells.get_point_mut(pos)
        } else {
            None
        }
    }
    pub fn kind(&self, pos: Point) -> Option<CellKind> {
        self.cell(pos).map(Cell::kind)
    }
    pub fn label(&self, pos: Point) -> Option<Distance> {
        self.cell(pos).and_then(Cell::label)
    }
    pub fn is_passable(&self, pos: Point) -> bool {
        self.in_search_area(pos) && self.cell(pos).map_or(false, Cell::is_passable)
    }

    /// The searchable neighbours of `pos` in the fixed order right, down, up, left. Positions in
    /// the margin or outside the grid are never returned.
    pub fn neighbors(&self, pos: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        [
            Point::new(pos.x + 1, pos.y),
            Point::new(pos.x, pos.y + 1),
            Point::new(pos.x, pos.y - 1),
            Point::new(pos.x - 1, pos.y),
        ]
        .into_iter()
        .filter(|p| self.in_search_area(*p))
        .collect()
    }

    /// Every searchable position, column by column.
    pub fn search_positions(&self) -> impl Iterator<Item = Point> {
        let (columns, rows) = (self.columns() as i32, self.rows() as i32);
        iproduct!(MARGIN..columns, MARGIN..rows).map(|(x, y)| Point::new(x, y))
    }

    /// Every position of the grid, margin included, row by row.
    fn all_positions(&self) -> impl Iterator<Item = Point> {
        let (columns, rows) = (self.columns() as i32, self.rows() as i32);
        iproduct!(0..rows, 0..columns).map(|(y, x)| Point::new(x, y))
    }

    /// Enumerates `(position, kind)` for every cell, margin included, row by row. This is what a
    /// renderer reads once per frame.
    pub fn cells(&self) -> impl Iterator<Item = (Point, CellKind)> + '_ {
        self.all_positions()
            .filter_map(move |p| self.cell(p).map(|c| (c.position(), c.kind())))
    }

    /// Overwrites the kind at `pos` and keeps marker and component bookkeeping in sync. Returns
    /// the replaced kind, or [None] if `pos` is outside the grid.
    pub(crate) fn replace_kind(&mut self, pos: Point, kind: CellKind) -> Option<CellKind> {
        let previous = self.cell_mut(pos)?.set_kind(kind);
        match previous {
            CellKind::Start if self.start == Some(pos) => self.start = None,
            CellKind::Finish if self.finish == Some(pos) => self.finish = None,
            _ => {}
        }
        match kind {
            CellKind::Start => self.start = Some(pos),
            CellKind::Finish => self.finish = Some(pos),
            _ => {}
        }
        if previous != CellKind::Wall && kind == CellKind::Wall {
            self.components_dirty = true;
        } else if previous == CellKind::Wall && kind != CellKind::Wall {
            let p_ix = self.cells.get_ix_point(&pos);
            for n in self.neighbors(pos) {
                if self.is_passable(n) {
                    let n_ix = self.cells.get_ix_point(&n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        Some(previous)
    }

    fn edit(&mut self, x: i32, y: i32, kind: CellKind) -> bool {
        let pos = Point::new(x, y);
        if !self.in_search_area(pos) {
            debug!("Ignoring {:?} edit outside the search area at {}", kind, pos);
            return false;
        }
        if let Some(previous @ (CellKind::Start | CellKind::Finish)) = self.replace_kind(pos, kind)
        {
            if previous != kind {
                debug!("{:?} marker at {} released", previous, pos);
            }
        }
        true
    }

    /// Places a wall. Returns [false] if the position is outside the search area.
    pub fn set_wall(&mut self, x: i32, y: i32) -> bool {
        self.edit(x, y, CellKind::Wall)
    }
    /// Turns a cell back into a free cell, releasing a start or finish marker it held.
    pub fn clear_to_free(&mut self, x: i32, y: i32) -> bool {
        self.edit(x, y, CellKind::Free)
    }
    /// Places the start marker. Ignored while another start exists or when the cell holds the
    /// finish.
    pub fn set_start(&mut self, x: i32, y: i32) -> bool {
        self.set_marker(x, y, CellKind::Start)
    }
    /// Places the finish marker. Ignored while another finish exists or when the cell holds the
    /// start.
    pub fn set_finish(&mut self, x: i32, y: i32) -> bool {
        self.set_marker(x, y, CellKind::Finish)
    }
    fn set_marker(&mut self, x: i32, y: i32, marker: CellKind) -> bool {
        let pos = Point::new(x, y);
        let (held, other) = match marker {
            CellKind::Start => (self.start, CellKind::Finish),
            _ => (self.finish, CellKind::Start),
        };
        if let Some(existing) = held {
            if existing != pos {
                debug!("{:?} already at {}, ignoring {}", marker, existing, pos);
                return false;
            }
        }
        if self.kind(pos) == Some(other) {
            debug!("{} holds the {:?} marker, ignoring {:?}", pos, other, marker);
            return false;
        }
        self.edit(x, y, marker)
    }

    /// Assigns a label through [Cell::try_assign_label]. A cell that receives a new label and is
    /// neither start nor finish is recoloured [CellKind::Checked].
    pub(crate) fn try_assign_label(&mut self, pos: Point, value: Distance) -> bool {
        let Some(cell) = self.cell_mut(pos) else {
            return false;
        };
        if !cell.try_assign_label(value) {
            return false;
        }
        if !matches!(cell.kind(), CellKind::Start | CellKind::Finish) {
            cell.set_kind(CellKind::Checked);
        }
        true
    }

    /// Clears all labels and turns the marks of an earlier search back into free cells.
    pub(crate) fn reset_search(&mut self) {
        for p in self.all_positions() {
            if let Some(cell) = self.cell_mut(p) {
                cell.clear_label();
                if cell.kind().is_search_mark() {
                    cell.set_kind(CellKind::Free);
                }
            }
        }
    }

    /// Gives the finish label 0. Returns the finish position, if there is one.
    pub(crate) fn seed_finish(&mut self) -> Option<Point> {
        let finish = self.finish?;
        let cell = self.cell_mut(finish)?;
        cell.clear_label();
        cell.try_assign_label(0);
        Some(finish)
    }

    /// Labelled positions and their distances in [search_positions](Self::search_positions) order.
    pub fn distance_map(&self) -> FxIndexMap<Point, Distance> {
        self.search_positions()
            .filter_map(|p| self.label(p).map(|d| (p, d)))
            .collect()
    }

    /// Checks if two passable positions are on the same component. Components must be up to date,
    /// see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.is_passable(*start)
            && self.is_passable(*goal)
            && self
                .components
                .equiv(self.cells.get_ix_point(start), self.cells.get_ix_point(goal))
    }
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
    /// Regenerates the components if walls were placed since the last generation.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up passable neighbours to the same component.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.columns() * self.rows());
        self.components_dirty = false;
        let mut links = Vec::new();
        for p in self.search_positions() {
            if !self.is_passable(p) {
                continue;
            }
            for n in [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)] {
                if self.is_passable(n) {
                    links.push((self.cells.get_ix_point(&p), self.cells.get_ix_point(&n)));
                }
            }
        }
        for (a, b) in links {
            self.components.union(a, b);
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in MARGIN..self.rows() as i32 {
            let row = (MARGIN..self.columns() as i32)
                .filter_map(|x| self.kind(Point::new(x, y)))
                .map(CellKind::glyph)
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_excluded_from_neighbours() {
        let grid = CellGrid::new(4, 4);
        let corner = grid.neighbors(Point::new(1, 1));
        assert_eq!(corner.as_slice(), &[Point::new(2, 1), Point::new(1, 2)]);
        let far_corner = grid.neighbors(Point::new(3, 3));
        assert_eq!(far_corner.as_slice(), &[Point::new(3, 2), Point::new(2, 3)]);
        let centre = grid.neighbors(Point::new(2, 2));
        assert_eq!(
            centre.as_slice(),
            &[
                Point::new(3, 2),
                Point::new(2, 3),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn cells_know_their_position() {
        let grid = CellGrid::new(4, 3);
        assert_eq!(grid.cells().count(), 12);
        for (x, y) in iproduct!(0..4, 0..3) {
            let p = Point::new(x, y);
            assert_eq!(grid.cell(p).map(Cell::position), Some(p));
        }
        assert_eq!(
            grid.cells().nth(5).map(|(p, _)| p),
            Some(Point::new(1, 1))
        );
    }

    #[test]
    fn lookups_outside_grid_are_empty() {
        let grid = CellGrid::from_layout("S.G").unwrap();
        let inside = Point::new(1, 1);
        for outside in [
            Point::new(-1, 1),
            Point::new(1, -1),
            Point::new(4, 1),
            Point::new(1, 2),
        ] {
            assert!(grid.cell(outside).is_none());
            assert_eq!(grid.kind(outside), None);
            assert!(!grid.is_passable(outside));
            assert!(grid.unreachable(&inside, &outside));
            assert!(grid.unreachable(&outside, &inside));
        }
        assert!(grid.reachable(&inside, &Point::new(3, 1)));
    }

    #[test]
    fn edits_outside_search_area_ignored() {
        let mut grid = CellGrid::new(4, 3);
        assert!(!grid.set_wall(0, 1));
        assert!(!grid.set_wall(1, 0));
        assert!(!grid.set_start(4, 1));
        assert!(!grid.set_finish(1, 3));
        assert!(!grid.clear_to_free(-1, 2));
        assert!(grid.cells().all(|(_, kind)| kind == CellKind::Free));
    }

    #[test]
    fn markers_are_unique() {
        let mut grid = CellGrid::new(5, 5);
        assert!(grid.set_start(1, 1));
        assert!(!grid.set_start(2, 2));
        assert_eq!(grid.kind(Point::new(2, 2)), Some(CellKind::Free));
        assert!(grid.set_finish(3, 3));
        assert!(!grid.set_finish(4, 4));
        assert!(!grid.set_finish(1, 1));
        assert!(!grid.set_start(3, 3));
        assert_eq!(grid.start(), Some(Point::new(1, 1)));
        assert_eq!(grid.finish(), Some(Point::new(3, 3)));
    }

    #[test]
    fn overwriting_marker_releases_it() {
        let mut grid = CellGrid::new(5, 5);
        grid.set_start(1, 1);
        grid.set_finish(2, 2);
        grid.set_wall(1, 1);
        assert_eq!(grid.start(), None);
        grid.clear_to_free(2, 2);
        assert_eq!(grid.finish(), None);
        assert!(grid.set_start(3, 3));
        assert!(grid.set_finish(1, 1));
    }

    /// Tests whether positions are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let mut grid = CellGrid::from_layout(
            "
            .#.
            .#.
            ",
        )
        .unwrap();
        let left = Point::new(1, 1);
        let below = Point::new(1, 2);
        let wall = Point::new(2, 1);
        let right = Point::new(3, 2);
        assert!(grid.reachable(&left, &below));
        assert!(grid.unreachable(&left, &wall));
        assert!(grid.unreachable(&left, &right));
        grid.clear_to_free(2, 2);
        assert!(grid.reachable(&left, &right));
        grid.set_wall(2, 2);
        assert!(grid.components_dirty);
        grid.update();
        assert!(grid.unreachable(&left, &right));
    }

    #[test]
    fn layout_round_trips_through_display() {
        let layout = "S..#\n.#.#\n...G\n";
        let grid = CellGrid::from_layout(layout).unwrap();
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.start(), Some(Point::new(1, 1)));
        assert_eq!(grid.finish(), Some(Point::new(4, 3)));
        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn layout_errors() {
        assert_eq!(CellGrid::from_layout("  \n").unwrap_err(), LayoutError::Empty);
        assert_eq!(
            CellGrid::from_layout("...\n..").unwrap_err(),
            LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            CellGrid::from_layout("S.S").unwrap_err(),
            LayoutError::DuplicateStart
        );
        assert_eq!(
            CellGrid::from_layout("G\nG").unwrap_err(),
            LayoutError::DuplicateFinish
        );
        assert_eq!(
            CellGrid::from_layout("..@").unwrap_err(),
            LayoutError::UnknownGlyph {
                glyph: '@',
                column: 2,
                row: 0
            }
        );
    }
}
