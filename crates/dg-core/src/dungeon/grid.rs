//! The shared cell grid every generation stage reads and mutates

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::CellKind;

/// Grid position as (x, y)
pub type Pos = (usize, usize);

/// Offsets of the 8-neighbourhood, row by row
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Cardinal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step (dx, dy); y grows southward
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Unit step across the direction of travel
    pub const fn perpendicular(self) -> (i32, i32) {
        match self {
            Direction::North | Direction::South => (1, 0),
            Direction::East | Direction::West => (0, 1),
        }
    }

    pub const fn flag(self) -> DirectionSet {
        match self {
            Direction::North => DirectionSet::NORTH,
            Direction::South => DirectionSet::SOUTH,
            Direction::East => DirectionSet::EAST,
            Direction::West => DirectionSet::WEST,
        }
    }
}

bitflags! {
    /// Set of cardinal directions
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct DirectionSet: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
    }
}

impl DirectionSet {
    /// Directions contained in the set, in `Direction::ALL` order
    pub fn directions(self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.contains(d.flag()))
            .collect()
    }
}

/// Offsets of a band `width` cells wide centered on the step position.
///
/// Even widths lean toward the positive side: width 2 covers {0, 1},
/// width 4 covers {-1, 0, 1, 2}.
pub fn band_offsets(width: usize) -> core::ops::RangeInclusive<i32> {
    let width = width.max(1) as i32;
    let start = -((width - 1) / 2);
    start..=start + width - 1
}

/// Rectangular grid of cell kinds, indexed `cells[x][y]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellKind>>,
}

impl Grid {
    /// Create a grid filled with `CellKind::Empty`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![CellKind::Empty; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Inside the grid and off the outer ring reserved for walls
    pub fn in_interior(&self, x: i32, y: i32) -> bool {
        x >= 1 && y >= 1 && (x as usize) + 1 < self.width && (y as usize) + 1 < self.height
    }

    pub fn on_edge(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Kind at (x, y), or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<CellKind> {
        if self.in_bounds(x, y) {
            Some(self.cells[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Kind at an in-bounds position
    pub fn kind(&self, (x, y): Pos) -> CellKind {
        self.cells[x][y]
    }

    /// Set the kind at (x, y); positions outside the grid are ignored
    pub fn set(&mut self, x: i32, y: i32, kind: CellKind) {
        if self.in_bounds(x, y) {
            self.cells[x as usize][y as usize] = kind;
        }
    }

    pub fn set_pos(&mut self, (x, y): Pos, kind: CellKind) {
        self.cells[x][y] = kind;
    }

    /// In-bounds 8-neighbours of a position
    pub fn neighbors8(&self, (x, y): Pos) -> impl Iterator<Item = Pos> + '_ {
        NEIGHBORS_8.iter().filter_map(move |&(dx, dy)| {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            self.in_bounds(nx, ny).then_some((nx as usize, ny as usize))
        })
    }

    /// Count 8-neighbours whose kind satisfies `pred`
    pub fn count_neighbors(&self, pos: Pos, pred: impl Fn(CellKind) -> bool) -> usize {
        self.neighbors8(pos).filter(|&p| pred(self.kind(p))).count()
    }

    pub fn floor_like_neighbors(&self, pos: Pos) -> usize {
        self.count_neighbors(pos, |k| k.is_floor_like())
    }

    /// All positions in scan order (row-major: y outer, x inner)
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    /// Positions whose kind satisfies `pred`, in scan order
    pub fn positions_where(&self, pred: impl Fn(CellKind) -> bool) -> Vec<Pos> {
        self.positions().filter(|&p| pred(self.kind(p))).collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells
            .iter()
            .flat_map(|col| col.iter())
            .filter(|&&k| k == kind)
            .count()
    }

    /// Render one glyph per cell, one line per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cells[x][y].symbol());
            }
            out.push('\n');
        }
        out
    }
}
