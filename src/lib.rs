//! # flood_walk
//!
//! The engine behind an interactive grid visualizer: the user places a start, a finish and walls,
//! then triggers a search whose progress is animated one cell per tick.
//!
//! The search runs in two phases. A
//! [flood fill](https://en.wikipedia.org/wiki/Flood_fill) labels every cell reachable from the
//! finish with its hop count to it, relaxing the whole grid in repeated sweeps until nothing
//! changes ([label_distances](search::label_distances)). A walker then follows the labels
//! downhill from the start, one cell per call ([step](search::step)), leaving a trail behind.
//! Note that this assumes an unweighted 4-connected grid and is meant for grids small enough to
//! be drawn on screen.
//!
//! [Visualizer] ties the grid and the search session to the input, timer and trigger events of a
//! frontend. Drawing is left to the frontend, which reads [CellGrid::cells] every frame.
pub mod cell;
pub mod clock;
pub mod error;
pub mod grid;
pub mod input;
pub mod render;
pub mod search;

pub use cell::{Cell, CellKind, Distance};
pub use error::{LayoutError, SearchError};
pub use grid::CellGrid;
pub use search::{ArrivalMarker, Session, StepOutcome};

use clock::FrameClock;
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use input::{cell_at, Control, InputEvent, Key};
use log::{debug, info, warn};
use render::AxisLabel;
use std::time::Duration;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Width of the margin reserved for axis labels, in cells.
pub const MARGIN: i32 = 1;
/// Default edge length of a cell in pixels.
pub const CELL_SIZE: i32 = 32;
/// Default time between two walker steps.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Inline capacity for neighbour lists, enough for a 4-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 4;

/// A [CellGrid] together with the search session running on it.
#[derive(Clone, Debug)]
pub struct Visualizer {
    grid: CellGrid,
    session: Session,
    clock: FrameClock,
    /// How the finish is coloured once the walker reaches it.
    pub arrival: ArrivalMarker,
    /// Edge length of a cell in pixels, used to translate pointer input.
    pub cell_size: i32,
}

impl Visualizer {
    pub fn new(columns: usize, rows: usize) -> Visualizer {
        Visualizer::from_grid(CellGrid::new(columns, rows))
    }

    pub fn from_grid(grid: CellGrid) -> Visualizer {
        Visualizer {
            grid,
            session: Session::Inactive,
            clock: FrameClock::new(TICK_INTERVAL),
            arrival: ArrivalMarker::default(),
            cell_size: CELL_SIZE,
        }
    }

    /// Sizes the grid to fill a window of `width × height` pixels with [CELL_SIZE] cells.
    pub fn from_window(width: u32, height: u32) -> Visualizer {
        let size = CELL_SIZE as u32;
        Visualizer::new((width / size) as usize, (height / size) as usize)
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }
    /// Direct access for edits. Editing cells while a session is active is up to the caller.
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }
    pub fn session(&self) -> Session {
        self.session
    }
    pub fn tick_interval(&self) -> Duration {
        self.clock.interval
    }
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.clock.interval = interval;
    }

    /// Labels the grid and puts the cursor on the start. Silently does nothing unless both
    /// markers are placed and no session is active.
    pub fn begin_search(&mut self) -> bool {
        match search::start_search(&mut self.grid, &mut self.session) {
            Ok(started) => started,
            Err(e) => {
                warn!("Could not start search: {}", e);
                false
            }
        }
    }

    /// Advances the cursor by one cell. Ignored while no session is active.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if !self.session.is_active() {
            return None;
        }
        match search::step(&mut self.grid, &mut self.session, self.arrival) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Search step failed: {}", e);
                None
            }
        }
    }

    /// Called every frame with the time elapsed since the frontend started. Steps the walker
    /// whenever the tick interval has passed.
    pub fn update(&mut self, now: Duration) -> Option<StepOutcome> {
        if self.clock.poll(now) {
            self.tick()
        } else {
            None
        }
    }

    fn end_session(&mut self, reason: &str) {
        if self.session.is_active() {
            info!("Search stopped: {}", reason);
            self.session = Session::Inactive;
        }
    }

    /// Applies a pointer or keyboard event.
    pub fn handle(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Select { x, y } => {
                let Some(p) = self.cell_at(x, y) else {
                    return Control::Continue;
                };
                let placed = if self.grid.start().is_none() {
                    self.grid.set_start(p.x, p.y)
                } else if self.grid.finish().is_none() {
                    self.grid.set_finish(p.x, p.y)
                } else {
                    debug!("Start and finish already placed, ignoring {}", p);
                    false
                };
                if placed {
                    self.end_session("marker placed");
                }
            }
            InputEvent::Paint { x, y, erase } => {
                let Some(p) = self.cell_at(x, y) else {
                    return Control::Continue;
                };
                let previous = self.grid.kind(p);
                let painted = if erase {
                    self.grid.clear_to_free(p.x, p.y)
                } else {
                    self.grid.set_wall(p.x, p.y)
                };
                if painted && matches!(previous, Some(CellKind::Start | CellKind::Finish)) {
                    self.end_session("marker removed");
                }
            }
            InputEvent::Key(Key::Space) => {
                self.begin_search();
            }
            InputEvent::Key(Key::Escape) => return Control::Exit,
            InputEvent::Key(Key::Other) => {}
        }
        Control::Continue
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<grid_util::point::Point> {
        cell_at(x, y, self.cell_size, self.grid.columns(), self.grid.rows())
    }

    /// Coordinate numbers for the margin, positioned for the current cell size.
    pub fn axis_labels(&self) -> Vec<AxisLabel> {
        render::axis_labels(self.grid.columns(), self.grid.rows(), self.cell_size)
    }
}

impl fmt::Display for Visualizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
