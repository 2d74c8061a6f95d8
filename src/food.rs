use crate::config::{ENERGY_FOOD_POINTS, NORMAL_FOOD_POINTS};
use crate::snake::Position;

/// Food types, in the order a head cell resolves them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Energy,
    Bomb,
}

impl FoodKind {
    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Normal => NORMAL_FOOD_POINTS,
            Self::Energy => ENERGY_FOOD_POINTS,
            Self::Bomb => 0,
        }
    }
}

/// Food entities on the board. Energy and bomb food are absent unless shown.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Foods {
    pub normal: Position,
    pub energy: Option<Position>,
    pub bomb: Option<Position>,
}

impl Foods {
    #[must_use]
    pub fn new(normal: Position) -> Self {
        Self {
            normal,
            energy: None,
            bomb: None,
        }
    }

    /// Returns the food eaten at `head`: normal first, then energy, then bomb.
    #[must_use]
    pub fn eaten_at(&self, head: Position) -> Option<FoodKind> {
        if head == self.normal {
            Some(FoodKind::Normal)
        } else if self.energy == Some(head) {
            Some(FoodKind::Energy)
        } else if self.bomb == Some(head) {
            Some(FoodKind::Bomb)
        } else {
            None
        }
    }

    /// Removes the food of `kind`. Normal food is mandatory and stays put.
    pub fn clear(&mut self, kind: FoodKind) {
        match kind {
            FoodKind::Normal => {}
            FoodKind::Energy => self.energy = None,
            FoodKind::Bomb => self.bomb = None,
        }
    }
}
