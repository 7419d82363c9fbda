//! Grid cell kinds
//!
//! Every stage classifies cells through the predicates defined here, so the
//! floor-like set used by wall derivation, obstacle adjacency and dead-end
//! lookahead is the same everywhere.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Kind of a single grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    /// Solid, never carved
    #[default]
    Empty = 0,
    Floor = 1,
    Wall = 2,
    Spawn = 3,
    Exit = 4,
    Rock = 5,
    Chest = 6,
    /// Floor grown by a dead-end branch
    DeadEnd = 7,
}

impl CellKind {
    /// Cells a character can stand on
    pub const fn is_floor_like(&self) -> bool {
        matches!(
            self,
            CellKind::Floor | CellKind::DeadEnd | CellKind::Spawn | CellKind::Exit | CellKind::Chest
        )
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, CellKind::Empty)
    }

    /// Cells a placed object may replace
    pub const fn accepts_obstacle(&self) -> bool {
        matches!(self, CellKind::Floor)
    }

    /// Get the display character for this cell kind
    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Empty => ' ',
            CellKind::Floor => '.',
            CellKind::Wall => '#',
            CellKind::Spawn => '<',
            CellKind::Exit => '>',
            CellKind::Rock => '*',
            CellKind::Chest => '$',
            CellKind::DeadEnd => ',',
        }
    }
}
