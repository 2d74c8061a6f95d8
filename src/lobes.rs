//! Fixed teleporter pairs ("lobes") on the grid edges.

use crate::config::LOBE_LEVEL;
use crate::snake::Position;

/// One directed teleport from `from` to `to`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LobePair {
    pub from: Position,
    pub to: Position,
}

const fn pair(from: (i32, i32), to: (i32, i32)) -> LobePair {
    LobePair {
        from: Position::new(from.0, from.1),
        to: Position::new(to.0, to.1),
    }
}

/// Four bidirectional pairs, listed as eight directed mappings.
pub const LOBE_PAIRS: [LobePair; 8] = [
    pair((10, 0), (10, 19)),
    pair((10, 19), (10, 0)),
    pair((0, 10), (19, 10)),
    pair((19, 10), (0, 10)),
    pair((0, 0), (19, 19)),
    pair((19, 19), (0, 0)),
    pair((0, 19), (19, 0)),
    pair((19, 0), (0, 19)),
];

/// Returns true once the level opens the lobes.
#[must_use]
pub fn lobes_active(level: u32) -> bool {
    level >= LOBE_LEVEL
}

/// Iterates over every teleporter source cell.
pub fn lobe_sources() -> impl Iterator<Item = Position> {
    LOBE_PAIRS.iter().map(|pair| pair.from)
}

/// Returns the destination for `head` when it sits on a source cell.
///
/// Only one hop is taken: the destination is returned as-is even though it
/// is itself a source of the reverse mapping.
#[must_use]
pub fn teleport(head: Position) -> Option<Position> {
    LOBE_PAIRS
        .iter()
        .find(|pair| pair.from == head)
        .map(|pair| pair.to)
}
