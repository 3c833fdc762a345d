//! Spatial Occupancy Grid
//!
//! A fixed `width x height` array of cells, each holding at most one vertex
//! id. The grid knows nothing about the graph; keeping the two in agreement
//! is the board's job.

use super::point::GridPoint;
use crate::error::GridError;
use crate::graph::VertexId;

/// Bounds-checked occupancy map from grid points to vertices.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,

    /// Row-major cells: index is `y * width + x`.
    cells: Vec<Option<VertexId>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows. Configs that pass
    /// [`EngineConfig::validate`](crate::config::EngineConfig::validate)
    /// never do.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if `point` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, point: GridPoint) -> bool {
        self.index(point).is_some()
    }

    /// Put `id` at `point`.
    pub fn place(&mut self, point: GridPoint, id: VertexId) -> Result<(), GridError> {
        let index = self.checked_index(point)?;
        match self.cells[index] {
            Some(occupant) => Err(GridError::Occupied { point, occupant }),
            None => {
                self.cells[index] = Some(id);
                Ok(())
            }
        }
    }

    /// Clear `point`, returning whoever was there.
    pub fn remove(&mut self, point: GridPoint) -> Result<VertexId, GridError> {
        let index = self.checked_index(point)?;
        self.cells[index].take().ok_or(GridError::EmptyCell(point))
    }

    /// The occupant of `point`. Out-of-bounds points are simply empty.
    pub fn get(&self, point: GridPoint) -> Option<VertexId> {
        self.index(point).and_then(|index| self.cells[index])
    }

    /// Every occupied cell, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (GridPoint, VertexId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|id| {
                let point = GridPoint::new((index % width) as i32, (index / width) as i32);
                (point, id)
            })
        })
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    fn index(&self, point: GridPoint) -> Option<usize> {
        let x = usize::try_from(point.x()).ok()?;
        let y = usize::try_from(point.y()).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn checked_index(&self, point: GridPoint) -> Result<usize, GridError> {
        self.index(point).ok_or(GridError::OutOfBounds {
            point,
            width: self.width,
            height: self.height,
        })
    }
}
