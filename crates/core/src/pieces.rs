//! Pieces module - piece catalog and the falling piece
//!
//! The catalog is a fixed table of 13 shapes: dominoes, bars and squares in each
//! zone color, plus four two-colored variants. Catalog entries are `'static`
//! and never mutated; an [`ActivePiece`] only owns its rotation and position.

use crate::rng::SimpleRng;
use crate::types::{Color, SPAWN_X, SPAWN_Y};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Number of rotation states for every piece
pub const ROTATIONS: usize = 4;

/// Immutable piece shape definition
#[derive(Debug, PartialEq, Eq)]
pub struct PieceDefinition {
    /// Cell offsets per rotation state
    pub rotations: [&'static [CellOffset]; ROTATIONS],
    /// Color of cells without an override
    pub color: Color,
    /// Optional per-rotation, per-cell color overrides
    pub block_colors: Option<[&'static [Color]; ROTATIONS]>,
}

impl PieceDefinition {
    /// Cell offsets for a rotation state (taken modulo 4)
    pub fn cells_at(&self, rotation: u8) -> &'static [CellOffset] {
        self.rotations[rotation as usize % ROTATIONS]
    }

    /// Resolve the color of cell `index` in rotation state `rotation`
    ///
    /// Falls back to the base color when there is no override for that cell.
    pub fn color_for_cell(&self, index: usize, rotation: u8) -> Color {
        self.block_colors
            .and_then(|colors| colors[rotation as usize % ROTATIONS].get(index).copied())
            .unwrap_or(self.color)
    }

    /// Number of cells in the piece
    pub fn size(&self) -> usize {
        self.rotations[0].len()
    }

    /// Whether the piece has per-cell color overrides
    pub fn is_multicolor(&self) -> bool {
        self.block_colors.is_some()
    }
}

const DOMINO_H: &[CellOffset] = &[(0, 0), (1, 0)];
const DOMINO_V: &[CellOffset] = &[(0, 0), (0, 1)];
const BAR_H: &[CellOffset] = &[(-1, 0), (0, 0), (1, 0)];
const BAR_V: &[CellOffset] = &[(0, -1), (0, 0), (0, 1)];
const SQUARE: &[CellOffset] = &[(0, 0), (1, 0), (0, 1), (1, 1)];

const DOMINO: [&[CellOffset]; ROTATIONS] = [DOMINO_H, DOMINO_V, DOMINO_H, DOMINO_V];
const BAR: [&[CellOffset]; ROTATIONS] = [BAR_H, BAR_V, BAR_H, BAR_V];
const SQUARE_ALL: [&[CellOffset]; ROTATIONS] = [SQUARE; ROTATIONS];

use Color::{Blue as B, Green as G, Red as R};

const fn solid(rotations: [&'static [CellOffset]; ROTATIONS], color: Color) -> PieceDefinition {
    PieceDefinition {
        rotations,
        color,
        block_colors: None,
    }
}

const fn mixed(
    rotations: [&'static [CellOffset]; ROTATIONS],
    color: Color,
    block_colors: [&'static [Color]; ROTATIONS],
) -> PieceDefinition {
    PieceDefinition {
        rotations,
        color,
        block_colors: Some(block_colors),
    }
}

/// The full piece catalog
pub static CATALOG: [PieceDefinition; 13] = [
    solid(DOMINO, R),
    solid(DOMINO, B),
    solid(DOMINO, G),
    solid(BAR, R),
    solid(BAR, B),
    solid(BAR, G),
    solid(SQUARE_ALL, R),
    solid(SQUARE_ALL, B),
    solid(SQUARE_ALL, G),
    mixed(DOMINO, R, [&[R, B], &[R, B], &[B, R], &[B, R]]),
    mixed(DOMINO, B, [&[B, G], &[B, G], &[G, B], &[G, B]]),
    mixed(BAR, R, [&[R, R, B], &[R, R, B], &[B, R, R], &[B, R, R]]),
    mixed(BAR, B, [&[B, B, G], &[B, B, G], &[G, B, B], &[G, B, B]]),
];

/// Index of a definition in [`CATALOG`]
pub fn catalog_index(def: &'static PieceDefinition) -> usize {
    CATALOG
        .iter()
        .position(|entry| std::ptr::eq(entry, def))
        .unwrap_or(0)
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub definition: &'static PieceDefinition,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at the spawn anchor with rotation 0
    pub fn new(definition: &'static PieceDefinition) -> Self {
        Self {
            definition,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Cell offsets for the current rotation
    pub fn shape(&self) -> &'static [CellOffset] {
        self.definition.cells_at(self.rotation)
    }

    /// Absolute board cells with their resolved colors, in definition order
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Color)> + '_ {
        self.shape().iter().enumerate().map(move |(i, &(dx, dy))| {
            (
                self.x + dx,
                self.y + dy,
                self.definition.color_for_cell(i, self.rotation),
            )
        })
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece at the next rotation state
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % ROTATIONS as u8,
            ..*self
        }
    }
}

/// Pick a catalog entry uniformly at random and instantiate it
pub fn random_piece_instance(rng: &mut SimpleRng) -> ActivePiece {
    let index = rng.next_range(CATALOG.len() as u32) as usize;
    ActivePiece::new(&CATALOG[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_composition() {
        assert_eq!(CATALOG.len(), 13);
        let multicolor = CATALOG.iter().filter(|d| d.is_multicolor()).count();
        assert_eq!(multicolor, 4);

        for color in Color::ZONES {
            for size in [2, 3, 4] {
                assert!(
                    CATALOG
                        .iter()
                        .any(|d| !d.is_multicolor() && d.color == color && d.size() == size),
                    "missing solid {:?} piece of size {}",
                    color,
                    size
                );
            }
        }
    }

    #[test]
    fn test_rotations_keep_cell_count() {
        for def in CATALOG.iter() {
            for rot in 0..ROTATIONS as u8 {
                assert_eq!(def.cells_at(rot).len(), def.size());
                if let Some(colors) = def.block_colors {
                    assert_eq!(colors[rot as usize].len(), def.size());
                }
            }
        }
    }

    #[test]
    fn test_rotation_index_wraps() {
        let def = &CATALOG[3];
        assert_eq!(def.cells_at(5), def.cells_at(1));
        assert_eq!(def.cells_at(4), def.cells_at(0));
    }

    #[test]
    fn test_color_for_cell_override_and_fallback() {
        let mixed = &CATALOG[9];
        assert_eq!(mixed.color_for_cell(0, 0), Color::Red);
        assert_eq!(mixed.color_for_cell(1, 0), Color::Blue);
        assert_eq!(mixed.color_for_cell(0, 2), Color::Blue);
        assert_eq!(mixed.color_for_cell(1, 2), Color::Red);
        // Missing override index falls back to the base color.
        assert_eq!(mixed.color_for_cell(7, 0), Color::Red);

        let solid = &CATALOG[1];
        assert_eq!(solid.color_for_cell(0, 3), Color::Blue);
    }

    #[test]
    fn test_active_piece_rotation_does_not_touch_catalog() {
        let piece = ActivePiece::new(&CATALOG[4]);
        let rotated = piece.rotated().rotated().rotated();
        assert_eq!(rotated.rotation, 3);
        assert_eq!(piece.rotation, 0);
        assert_eq!(rotated.rotated().rotation, 0);
        assert!(std::ptr::eq(rotated.definition, &CATALOG[4]));
    }

    #[test]
    fn test_cells_are_absolute() {
        let piece = ActivePiece::new(&CATALOG[6]);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(
            cells,
            vec![
                (6, 0, Color::Red),
                (7, 0, Color::Red),
                (6, 1, Color::Red),
                (7, 1, Color::Red)
            ]
        );
    }

    #[test]
    fn test_random_piece_instance_starts_at_spawn() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..50 {
            let piece = random_piece_instance(&mut rng);
            assert_eq!(piece.rotation, 0);
            assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        }
    }

    #[test]
    fn test_catalog_index_roundtrip() {
        for (i, def) in CATALOG.iter().enumerate() {
            assert_eq!(catalog_index(def), i);
        }
    }
}
