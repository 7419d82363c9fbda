//! Room rectangles

use serde::{Deserialize, Serialize};

use super::grid::Pos;

/// Axis-aligned room interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// X coordinate of room interior (left edge)
    pub x: usize,
    /// Y coordinate of room interior (top edge)
    pub y: usize,
    /// Width of room interior
    pub width: usize,
    /// Height of room interior
    pub height: usize,
}

/// Inclusive rectangle, possibly reaching past the grid on the low side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedBounds {
    pub lx: i64,
    pub ly: i64,
    pub hx: i64,
    pub hy: i64,
}

impl PaddedBounds {
    pub fn intersects(&self, other: &PaddedBounds) -> bool {
        !(self.hx < other.lx || self.lx > other.hx || self.hy < other.ly || self.ly > other.hy)
    }
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Interior expanded by `buffer` cells on every side
    pub fn padded_bounds(&self, buffer: usize) -> PaddedBounds {
        let b = buffer as i64;
        PaddedBounds {
            lx: self.x as i64 - b,
            ly: self.y as i64 - b,
            hx: (self.x + self.width) as i64 - 1 + b,
            hy: (self.y + self.height) as i64 - 1 + b,
        }
    }

    /// Check if the padded bounds of the two rooms intersect
    pub fn overlaps(&self, other: &Room, buffer: usize) -> bool {
        self.padded_bounds(buffer)
            .intersects(&other.padded_bounds(buffer))
    }

    /// Get center point of room
    pub fn center(&self) -> Pos {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if point is inside room
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Get room area (interior cells)
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Interior positions in scan order
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Index of the room containing (x, y), if any
pub fn room_at(rooms: &[Room], x: usize, y: usize) -> Option<usize> {
    rooms.iter().position(|r| r.contains(x, y))
}

/// Check whether (x, y) lies inside any room
pub fn in_any_room(rooms: &[Room], x: usize, y: usize) -> bool {
    room_at(rooms, x, y).is_some()
}
