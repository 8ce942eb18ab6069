use crate::{position::Position, rect::Rect};
use grid::Grid;
use log::debug;

/// Precomputed passable neighbors for every cell of a grid. Rebuilt whenever
/// the obstacle layout changes, consulted by all movement and distance logic.
#[derive(Clone)]
pub struct Adjacency {
    neighbors: Grid<Vec<Position>>,
}

impl Adjacency {
    /// Build the table, keeping only in-bounds neighbors for which `passable`
    /// holds.
    pub fn build<F>(width: usize, height: usize, passable: F) -> Self
    where
        F: Fn(Position) -> bool,
    {
        let neighbors: Vec<_> = grid_ref_iter(width, height)
            .map(|(col, row)| {
                neighbor_indexes(col, row, width, height)
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|position| passable(*position))
                    .collect::<Vec<_>>()
            })
            .collect();

        debug!(
            "Built adjacency table for a {}x{} grid ({} passable links)",
            width,
            height,
            neighbors.iter().map(Vec::len).sum::<usize>()
        );

        Self {
            neighbors: Grid::from_vec(neighbors, width),
        }
    }

    pub fn neighbors(&self, position: Position) -> &[Position] {
        self.neighbors
            .get(position.y, position.x)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub(crate) fn grid_ref_iter(cols: usize, rows: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (col, row)))
}

/// Moore neighborhood of `(col, row)`. Out-of-bounds neighbors are `None`.
fn neighbor_indexes(col: usize, row: usize, cols: usize, rows: usize) -> [Option<Position>; 8] {
    let bounds = Rect::of_grid(cols, rows);
    let at = |col: Option<usize>, row: Option<usize>| {
        col.zip(row)
            .map(|(x, y)| Position::new(x, y))
            .filter(|position| bounds.contains(position))
    };

    [
        /* nw */ at(col.checked_sub(1), row.checked_sub(1)),
        /* n  */ at(Some(col), row.checked_sub(1)),
        /* ne */ at(col.checked_add(1), row.checked_sub(1)),
        /* w  */ at(col.checked_sub(1), Some(row)),
        /* e  */ at(col.checked_add(1), Some(row)),
        /* sw */ at(col.checked_sub(1), row.checked_add(1)),
        /* s  */ at(Some(col), row.checked_add(1)),
        /* se */ at(col.checked_add(1), row.checked_add(1)),
    ]
}
