use std::collections::BTreeSet;

use crate::state::GridCell;

/// Ordered sequence of cells from a start toward a destination.
///
/// The first cell is the walker's current cell (or a neighbour of it).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<GridCell>,
}

impl Path {
    pub fn from_cells(cells: Vec<GridCell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// A path shorter than two cells means the walker has already arrived.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() < 2
    }

    pub fn get(&self, index: usize) -> Option<GridCell> {
        self.cells.get(index).copied()
    }

    pub fn last(&self) -> Option<GridCell> {
        self.cells.last().copied()
    }

    pub fn pop(&mut self) -> Option<GridCell> {
        self.cells.pop()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}

impl From<Vec<GridCell>> for Path {
    fn from(cells: Vec<GridCell>) -> Self {
        Self::from_cells(cells)
    }
}

/// Grid pathfinding capability supplied by the map layer.
///
/// Implementations return `None` for unreachable destinations. That is a
/// normal outcome, not an error.
pub trait Pathfinder {
    fn find_path(&self, from: GridCell, to: GridCell) -> Option<Path>;
}

impl<F> Pathfinder for F
where
    F: Fn(GridCell, GridCell) -> Option<Path>,
{
    fn find_path(&self, from: GridCell, to: GridCell) -> Option<Path> {
        self(from, to)
    }
}

/// Open-field pathfinder: walks the x axis first, then the y axis.
///
/// Destinations listed in `blocked` are reported unreachable. Intended for
/// obstacle-free maps and headless sessions; real maps plug in their own
/// search.
#[derive(Clone, Debug, Default)]
pub struct StraightLinePathfinder {
    blocked: BTreeSet<GridCell>,
}

impl StraightLinePathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocked(blocked: impl IntoIterator<Item = GridCell>) -> Self {
        Self {
            blocked: blocked.into_iter().collect(),
        }
    }

    pub fn block(&mut self, cell: GridCell) {
        self.blocked.insert(cell);
    }
}

impl Pathfinder for StraightLinePathfinder {
    fn find_path(&self, from: GridCell, to: GridCell) -> Option<Path> {
        if self.blocked.contains(&to) {
            return None;
        }

        let mut cells = vec![from];
        let mut cursor = from;
        while cursor.x != to.x {
            cursor.x += (to.x - cursor.x).signum();
            cells.push(cursor);
        }
        while cursor.y != to.y {
            cursor.y += (to.y - cursor.y).signum();
            cells.push(cursor);
        }

        Some(Path::from_cells(cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_walks_x_then_y() {
        let path = StraightLinePathfinder::new()
            .find_path(GridCell::new(0, 0), GridCell::new(2, -1))
            .unwrap();
        assert_eq!(
            path.cells(),
            &[
                GridCell::new(0, 0),
                GridCell::new(1, 0),
                GridCell::new(2, 0),
                GridCell::new(2, -1),
            ]
        );
    }

    #[test]
    fn same_cell_yields_trivial_path() {
        let path = StraightLinePathfinder::new()
            .find_path(GridCell::new(3, 3), GridCell::new(3, 3))
            .unwrap();
        assert!(path.is_trivial());
    }

    #[test]
    fn blocked_destination_is_unreachable() {
        let finder = StraightLinePathfinder::with_blocked([GridCell::new(5, 5)]);
        assert!(finder.find_path(GridCell::ORIGIN, GridCell::new(5, 5)).is_none());
    }

    #[test]
    fn closures_act_as_pathfinders() {
        let finder = |_: GridCell, _: GridCell| None::<Path>;
        assert!(finder.find_path(GridCell::ORIGIN, GridCell::new(1, 0)).is_none());
    }
}
