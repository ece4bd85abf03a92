//! Translation of pointer and keyboard input into grid edits.
use grid_util::point::Point;

/// Keys the visualizer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Begins the search.
    Space,
    /// Asks the frontend to close.
    Escape,
    Other,
}

/// Input events in window pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button released: places the start, then the finish.
    Select { x: i32, y: i32 },
    /// Secondary button held: paints walls, or free cells when `erase` is set.
    Paint { x: i32, y: i32, erase: bool },
    Key(Key),
}

/// What the frontend should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Maps a pixel coordinate to the cell underneath it, or [None] if it lies outside a grid of
/// `columns × rows` cells of `cell_size` pixels.
pub fn cell_at(x: i32, y: i32, cell_size: i32, columns: usize, rows: usize) -> Option<Point> {
    if x < 0 || y < 0 || cell_size <= 0 {
        return None;
    }
    let (column, row) = (x / cell_size, y / cell_size);
    if column as usize >= columns || row as usize >= rows {
        return None;
    }
    Some(Point::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_map_to_cells() {
        assert_eq!(cell_at(0, 0, 32, 4, 3), Some(Point::new(0, 0)));
        assert_eq!(cell_at(31, 32, 32, 4, 3), Some(Point::new(0, 1)));
        assert_eq!(cell_at(127, 95, 32, 4, 3), Some(Point::new(3, 2)));
    }

    #[test]
    fn pixels_outside_rejected() {
        assert_eq!(cell_at(-1, 10, 32, 4, 3), None);
        assert_eq!(cell_at(10, -1, 32, 4, 3), None);
        assert_eq!(cell_at(128, 10, 32, 4, 3), None);
        assert_eq!(cell_at(10, 96, 32, 4, 3), None);
        assert_eq!(cell_at(10, 10, 0, 4, 3), None);
    }
}
