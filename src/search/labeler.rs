//! Distance labelling by repeated relaxation sweeps.
//!
//! Starting from the finish (label 0), every sweep lets each cell labelled before the sweep
//! began offer `d + 1` to its neighbours. Labels are assigned once and never lowered, so the
//! sweeps stop as soon as one of them assigns nothing. Cells labelled during sweep `k` all carry
//! `k + 1`, which makes the result identical to a breadth-first search from the finish while
//! costing one full pass over the grid per distance level.
use crate::cell::Distance;
use crate::error::SearchError;
use crate::grid::CellGrid;
use log::debug;

/// Work done by one call to [label_distances].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LabelingStats {
    /// Number of sweeps, including the final one that assigned nothing.
    pub sweeps: u32,
    /// Number of cells holding a label afterwards, finish included.
    pub labeled: usize,
}

/// Labels every cell reachable from the finish with its hop count to it.
///
/// The finish must carry label 0 and no other cell may be labelled; anything else means the
/// labels of an earlier search were not cleared and is rejected rather than relaxed on top of.
pub fn label_distances(grid: &mut CellGrid) -> Result<LabelingStats, SearchError> {
    let finish = grid.finish().ok_or(SearchError::UnseededFinish)?;
    if grid.label(finish) != Some(0) {
        return Err(SearchError::UnseededFinish);
    }
    if grid
        .search_positions()
        .any(|p| p != finish && grid.label(p).is_some())
    {
        return Err(SearchError::StaleLabels);
    }

    let positions = grid.search_positions().collect::<Vec<_>>();
    let mut stats = LabelingStats {
        sweeps: 0,
        labeled: 1,
    };
    // Labels up to `frontier` were all present when the current sweep began.
    let mut frontier: Distance = 0;
    loop {
        stats.sweeps += 1;
        let mut assigned = 0;
        for &p in &positions {
            let Some(d) = grid.label(p) else {
                continue;
            };
            if d > frontier {
                continue;
            }
            for n in grid.neighbors(p) {
                if grid.try_assign_label(n, d + 1) {
                    assigned += 1;
                }
            }
        }
        debug!("Sweep {} assigned {} labels", stats.sweeps, assigned);
        if assigned == 0 {
            break;
        }
        stats.labeled += assigned;
        frontier += 1;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;
    use grid_util::point::Point;

    fn seeded(layout: &str) -> CellGrid {
        let mut grid = CellGrid::from_layout(layout).unwrap();
        grid.seed_finish();
        grid
    }

    #[test]
    fn manhattan_gradient_on_open_grid() {
        let mut grid = seeded(
            "
            S..
            ...
            ..G
            ",
        );
        let stats = label_distances(&mut grid).unwrap();
        assert_eq!(stats.labeled, 9);
        assert_eq!(stats.sweeps, 5);
        for p in grid.search_positions() {
            let expected = (3 - p.x) + (3 - p.y);
            assert_eq!(grid.label(p), Some(expected as Distance));
        }
        assert_eq!(grid.kind(Point::new(1, 1)), Some(CellKind::Start));
        assert_eq!(grid.kind(Point::new(3, 3)), Some(CellKind::Finish));
        assert_eq!(grid.kind(Point::new(2, 2)), Some(CellKind::Checked));
    }

    #[test]
    fn walls_and_enclosed_cells_stay_unlabelled() {
        let mut grid = seeded(
            "
            S#..
            ##..
            ...G
            ",
        );
        label_distances(&mut grid).unwrap();
        assert_eq!(grid.label(Point::new(1, 1)), None);
        assert_eq!(grid.kind(Point::new(1, 1)), Some(CellKind::Start));
        assert_eq!(grid.label(Point::new(2, 1)), None);
        assert_eq!(grid.kind(Point::new(2, 1)), Some(CellKind::Wall));
        assert_eq!(grid.label(Point::new(1, 3)), Some(3));
        assert_eq!(grid.label(Point::new(3, 1)), Some(3));
    }

    #[test]
    fn detour_around_wall() {
        // The direct route along the top row is blocked, the label of S counts the detour.
        let mut grid = seeded(
            "
            S#G
            ...
            ",
        );
        label_distances(&mut grid).unwrap();
        assert_eq!(grid.label(Point::new(1, 1)), Some(4));
        assert_eq!(grid.label(Point::new(2, 2)), Some(2));
    }

    #[test]
    fn second_run_rejected() {
        let mut grid = seeded("S..G");
        label_distances(&mut grid).unwrap();
        assert_eq!(label_distances(&mut grid), Err(SearchError::StaleLabels));
        assert_eq!(grid.label(Point::new(1, 1)), Some(3));
    }

    #[test]
    fn unseeded_finish_rejected() {
        let mut grid = CellGrid::from_layout("S..G").unwrap();
        assert_eq!(label_distances(&mut grid), Err(SearchError::UnseededFinish));
        let mut grid = CellGrid::from_layout("S...").unwrap();
        assert_eq!(label_distances(&mut grid), Err(SearchError::UnseededFinish));
    }
}
