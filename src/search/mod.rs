use crate::error::SearchError;
use crate::grid::CellGrid;
use grid_util::point::Point;
use log::{debug, info};

pub mod labeler;
pub mod walker;

pub use labeler::{label_distances, LabelingStats};
pub use walker::step;

/// State carried between animation ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Inactive,
    Walking {
        /// The cell the walker currently stands on.
        cursor: Point,
        /// The cursor of the previous tick, recoloured as trail on the next one.
        previous: Option<Point>,
    },
}

impl Session {
    pub fn is_active(&self) -> bool {
        matches!(self, Session::Walking { .. })
    }
    pub fn cursor(&self) -> Option<Point> {
        match self {
            Session::Walking { cursor, .. } => Some(*cursor),
            Session::Inactive => None,
        }
    }
}

/// Result of a single walker tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cursor moved one cell closer to the finish.
    Continue,
    /// The cursor reached the finish, the session is over.
    Arrived,
    /// No labelled neighbour leads on, the session is over.
    NoPath,
}

/// How the finish cell is coloured once the walker reaches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalMarker {
    /// The finish becomes the new start, ready for another round trip once a finish is placed.
    #[default]
    Start,
    /// The finish keeps its marker.
    Finish,
}

/// Begins a search: clears the labels and trail of any earlier search, labels every reachable
/// cell with its distance to the finish and puts the cursor on the start.
///
/// Returns `Ok(false)` without touching the grid if a session is already active or either
/// marker is missing.
pub fn start_search(grid: &mut CellGrid, session: &mut Session) -> Result<bool, SearchError> {
    if session.is_active() {
        debug!("Search already in progress, ignoring trigger");
        return Ok(false);
    }
    let (Some(start), Some(_)) = (grid.start(), grid.finish()) else {
        debug!("Start and finish must both be placed before searching");
        return Ok(false);
    };
    grid.reset_search();
    let finish = grid.seed_finish().ok_or(SearchError::UnseededFinish)?;
    grid.update();
    if grid.unreachable(&start, &finish) {
        info!("{} is not reachable from {}", finish, start);
    }
    let stats = label_distances(grid)?;
    info!(
        "Labelled {} cells in {} sweeps, walking from {}",
        stats.labeled, stats.sweeps, start
    );
    *session = Session::Walking {
        cursor: start,
        previous: None,
    };
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    #[test]
    fn start_requires_both_markers() {
        let mut grid = CellGrid::new(4, 4);
        let mut session = Session::Inactive;
        assert_eq!(start_search(&mut grid, &mut session), Ok(false));
        grid.set_start(1, 1);
        assert_eq!(start_search(&mut grid, &mut session), Ok(false));
        assert!(!session.is_active());
        assert!(grid.distance_map().is_empty());
        grid.set_finish(3, 3);
        assert_eq!(start_search(&mut grid, &mut session), Ok(true));
        assert_eq!(session.cursor(), Some(Point::new(1, 1)));
    }

    #[test]
    fn start_ignored_while_active() {
        let mut grid = CellGrid::from_layout("S.G").unwrap();
        let mut session = Session::Inactive;
        assert_eq!(start_search(&mut grid, &mut session), Ok(true));
        let before = session;
        assert_eq!(start_search(&mut grid, &mut session), Ok(false));
        assert_eq!(session, before);
    }

    #[test]
    fn restart_clears_previous_trail() {
        let mut grid = CellGrid::from_layout(
            "
            S..
            ...
            ..G
            ",
        )
        .unwrap();
        let mut session = Session::Inactive;
        start_search(&mut grid, &mut session).unwrap();
        step(&mut grid, &mut session, ArrivalMarker::Start).unwrap();
        step(&mut grid, &mut session, ArrivalMarker::Start).unwrap();
        session = Session::Inactive;
        grid.set_start(1, 1);
        assert!(start_search(&mut grid, &mut session).unwrap());
        assert!(grid
            .cells()
            .all(|(_, kind)| !matches!(kind, CellKind::Current | CellKind::Stepped)));
        assert_eq!(grid.label(Point::new(1, 1)), Some(4));
    }
}
