use super::{ArrivalMarker, Session, StepOutcome};
use crate::cell::{CellKind, Distance};
use crate::error::SearchError;
use crate::grid::CellGrid;
use grid_util::point::Point;
use log::{info, warn};

/// Picks the neighbour the cursor moves to: a checked or finish cell whose label is strictly
/// smaller than the best seen so far, starting from the cursor's own label. Neighbours are seen
/// in the order right, down, up, left, so the earliest one wins a tie.
fn next_cell(grid: &CellGrid, cursor: Point) -> Option<(Point, CellKind)> {
    let mut best: Option<(Point, CellKind)> = None;
    let mut bound: Distance = grid.label(cursor)?;
    for n in grid.neighbors(cursor) {
        let (Some(kind), Some(label)) = (grid.kind(n), grid.label(n)) else {
            continue;
        };
        if kind.is_walk_target() && label < bound {
            bound = label;
            best = Some((n, kind));
        }
    }
    best
}

/// Advances the walking cursor by one cell. Meant to be called once per animation tick.
///
/// The previous cursor is recoloured [CellKind::Stepped], the chosen neighbour becomes
/// [CellKind::Current]. Reaching the finish colours it according to `arrival` and ends the
/// session, as does finding no neighbour to move to.
pub fn step(
    grid: &mut CellGrid,
    session: &mut Session,
    arrival: ArrivalMarker,
) -> Result<StepOutcome, SearchError> {
    let Session::Walking { cursor, previous } = *session else {
        return Err(SearchError::SessionNotActive);
    };
    let cursor_kind = grid.kind(cursor);
    if !matches!(cursor_kind, Some(CellKind::Start | CellKind::Current)) {
        warn!("Walking cursor at {} was overwritten, ending search", cursor);
        *session = Session::Inactive;
        return Err(SearchError::CursorLost(cursor));
    }
    if let Some(previous) = previous {
        grid.replace_kind(previous, CellKind::Stepped);
    }
    let leaving_start = cursor_kind == Some(CellKind::Start);

    let outcome = match next_cell(grid, cursor) {
        Some((finish, CellKind::Finish)) => {
            if leaving_start {
                grid.replace_kind(cursor, CellKind::Stepped);
            }
            if arrival == ArrivalMarker::Start {
                grid.replace_kind(finish, CellKind::Start);
            }
            info!("Arrived at {}", finish);
            *session = Session::Inactive;
            StepOutcome::Arrived
        }
        Some((next, _)) => {
            grid.replace_kind(next, CellKind::Current);
            if leaving_start {
                grid.replace_kind(cursor, CellKind::Stepped);
            }
            *session = Session::Walking {
                cursor: next,
                previous: Some(next),
            };
            StepOutcome::Continue
        }
        None => {
            match grid.finish() {
                Some(finish) if grid.reachable(&cursor, &finish) => {
                    warn!("No labelled neighbour at {} although {} is reachable", cursor, finish)
                }
                _ => info!("No path from {}", cursor),
            }
            *session = Session::Inactive;
            StepOutcome::NoPath
        }
    };
    Ok(outcome)
}
