use grid_util::point::Point;

/// Hop count from a cell to the finish.
pub type Distance = u32;

/// The role a [Cell] plays in the search. Kinds are compared exhaustively, a new kind has to be
/// handled everywhere a match on [CellKind] appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Free,
    Wall,
    Start,
    Finish,
    /// Labelled by the flood fill and walkable.
    Checked,
    /// The position of the walking cursor.
    Current,
    /// Part of the trail left behind by the cursor.
    Stepped,
}

impl CellKind {
    /// Character used when printing a grid. [CellGrid::from_layout](crate::CellGrid::from_layout)
    /// reads the same characters back.
    pub fn glyph(self) -> char {
        match self {
            CellKind::Free => '.',
            CellKind::Wall => '#',
            CellKind::Start => 'S',
            CellKind::Finish => 'G',
            CellKind::Checked => ':',
            CellKind::Current => '@',
            CellKind::Stepped => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<CellKind> {
        let kind = match glyph {
            '.' => CellKind::Free,
            '#' => CellKind::Wall,
            'S' => CellKind::Start,
            'G' => CellKind::Finish,
            ':' => CellKind::Checked,
            '@' => CellKind::Current,
            '*' => CellKind::Stepped,
            _ => return None,
        };
        Some(kind)
    }

    /// Kinds the walker may move onto.
    pub fn is_walk_target(self) -> bool {
        matches!(self, CellKind::Checked | CellKind::Finish)
    }

    /// Kinds left behind by a previous search which are cleared before a new one.
    pub fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellKind::Checked | CellKind::Current | CellKind::Stepped
        )
    }
}

/// A single grid unit. Only [kind](Cell::kind) and the distance label change after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Point,
    kind: CellKind,
    label: Option<Distance>,
}

impl Cell {
    pub fn new(position: Point) -> Cell {
        Cell {
            position,
            kind: CellKind::Free,
            label: None,
        }
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn kind(&self) -> CellKind {
        self.kind
    }
    /// Overwrites the kind unconditionally and hands back the one it replaced, so callers can
    /// notice that a start or finish marker was just removed.
    pub fn set_kind(&mut self, kind: CellKind) -> CellKind {
        std::mem::replace(&mut self.kind, kind)
    }
    pub fn label(&self) -> Option<Distance> {
        self.label
    }
    pub fn clear_label(&mut self) {
        self.label = None;
    }
    pub fn is_passable(&self) -> bool {
        self.kind != CellKind::Wall
    }
    /// Assigns `value` if the cell is not a wall and has no label yet. Returns [true] only for a
    /// new assignment; walls and already labelled cells both report [false].
    pub fn try_assign_label(&mut self, value: Distance) -> bool {
        if !self.is_passable() || self.label.is_some() {
            return false;
        }
        self.label = Some(value);
        true
    }
}
