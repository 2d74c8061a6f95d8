use rand::Rng;

use crate::config::{MAX_PLACEMENT_ATTEMPTS, TILE_COUNT};
use crate::snake::Position;
use crate::spawn::{Exclusions, SpawnError};

/// Cells in a static wall group added during play.
pub const SMALL_WALL_LEN: usize = 2;

/// Cells in an initial wall or the moving wall.
pub const BLOCK_WALL_LEN: usize = 3;

/// One placed obstacle: a straight run of contiguous cells.
pub type WallGroup = Vec<Position>;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Generates a straight wall of `len` cells with a uniformly chosen
/// orientation. With `keep_off_edge` every cell stays off the outer ring.
#[must_use]
pub fn generate_wall<R: Rng + ?Sized>(rng: &mut R, len: usize, keep_off_edge: bool) -> WallGroup {
    let len = i32::try_from(len).unwrap_or(TILE_COUNT).min(TILE_COUNT);
    let orientation = if rng.gen_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let margin = i32::from(keep_off_edge);

    // Inclusive upper bounds for the base cell on each axis.
    let along_max = TILE_COUNT - margin - len;
    let across_max = TILE_COUNT - margin - 1;
    let along = rng.gen_range(margin..=along_max.max(margin));
    let across = rng.gen_range(margin..=across_max);

    (0..len)
        .map(|offset| match orientation {
            Orientation::Horizontal => Position::new(along + offset, across),
            Orientation::Vertical => Position::new(across, along + offset),
        })
        .collect()
}

/// Generates a 2-cell wall anywhere on the grid. Overlaps are allowed.
#[must_use]
pub fn generate_small_wall<R: Rng + ?Sized>(rng: &mut R) -> WallGroup {
    generate_wall(rng, SMALL_WALL_LEN, false)
}

/// Generates a 3-cell block off the outer ring, re-rolling until no cell is
/// excluded.
pub fn generate_block_avoiding<R: Rng + ?Sized>(
    rng: &mut R,
    exclusions: &Exclusions,
) -> Result<WallGroup, SpawnError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = generate_wall(rng, BLOCK_WALL_LEN, true);
        if exclusions.allows_all(&candidate) {
            return Ok(candidate);
        }
    }

    Err(SpawnError::AttemptsExhausted {
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Static wall groups in the order they were placed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StaticWalls {
    groups: Vec<WallGroup>,
}

impl StaticWalls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: WallGroup) {
        self.groups.push(group);
    }

    /// Removes the most recently placed group.
    pub fn pop_latest(&mut self) -> Option<WallGroup> {
        self.groups.pop()
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells().any(|cell| cell == position)
    }

    /// Iterates over every wall cell, group by group.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.groups.iter().flatten().copied()
    }

    #[must_use]
    pub fn groups(&self) -> &[WallGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
