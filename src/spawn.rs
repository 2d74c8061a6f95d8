use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::config::TILE_COUNT;
use crate::snake::Position;

/// Placement failures. Both indicate a grid too crowded to continue.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell left on the grid")]
    NoFreeCell,
    #[error("gave up placing a wall after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

/// Cells a new entity must not land on.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    cells: HashSet<Position>,
}

impl Exclusions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every cell yielded by `cells`.
    #[must_use]
    pub fn with_cells<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        self.cells.extend(cells);
        self
    }

    /// Adds `cell` when present; absent entities exclude nothing.
    #[must_use]
    pub fn with_optional(mut self, cell: Option<Position>) -> Self {
        self.cells.extend(cell);
        self
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Returns true when no cell of `cells` is excluded.
    #[must_use]
    pub fn allows_all<'a, I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = &'a Position>,
    {
        cells.into_iter().all(|cell| !self.contains(*cell))
    }
}

/// Picks a uniformly random on-grid cell that is not excluded.
///
/// Free cells are enumerated up front, so a full grid is reported instead of
/// looping forever.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    exclusions: &Exclusions,
) -> Result<Position, SpawnError> {
    let candidates: Vec<Position> = (0..TILE_COUNT)
        .flat_map(|y| (0..TILE_COUNT).map(move |x| Position::new(x, y)))
        .filter(|position| !exclusions.contains(*position))
        .collect();

    if candidates.is_empty() {
        return Err(SpawnError::NoFreeCell);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
