//! Pieces module - shape catalog and rotation geometry
//!
//! Every shape is stored once as an un-rotated row-major pattern. Rotated
//! views are computed on the fly by remapping local coordinates, so a shape
//! never needs more than its base `width * height` cells.

use crate::types::{Cell, PieceKind, Rotation};

/// Pattern byte for an occupied cell
const FILLED: u8 = b'#';

/// Pattern byte for an empty cell
const EMPTY: u8 = b'.';

/// Immutable catalog entry.
///
/// `pattern` is row-major with the origin at the top-left, one byte per cell
/// (`#` occupied, `.` empty). Occupied cells carry `kind` as their label.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    name: &'static str,
    kind: PieceKind,
    base_width: u8,
    base_height: u8,
    rotation_count: u8,
    pattern: &'static [u8],
}

impl Shape {
    /// Build a shape, rejecting malformed tables at compile time when used
    /// in a `static`.
    pub const fn new(
        name: &'static str,
        kind: PieceKind,
        base_width: u8,
        base_height: u8,
        rotation_count: u8,
        pattern: &'static [u8],
    ) -> Self {
        assert!(base_width > 0 && base_height > 0, "empty bounding box");
        assert!(
            rotation_count == 1 || rotation_count == 2 || rotation_count == 4,
            "rotation count must be 1, 2 or 4"
        );
        assert!(
            pattern.len() == base_width as usize * base_height as usize,
            "pattern does not match bounding box"
        );

        let mut filled = 0;
        let mut i = 0;
        while i < pattern.len() {
            match pattern[i] {
                FILLED => filled += 1,
                EMPTY => {}
                _ => panic!("pattern bytes must be '#' or '.'"),
            }
            i += 1;
        }
        assert!(filled > 0, "shape has no occupied cell");

        Self {
            name,
            kind,
            base_width,
            base_height,
            rotation_count,
            pattern,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn base_width(&self) -> u8 {
        self.base_width
    }

    pub fn base_height(&self) -> u8 {
        self.base_height
    }

    pub fn rotation_count(&self) -> u8 {
        self.rotation_count
    }

    /// Un-rotated marker at `(x, y)`, empty outside the base box
    pub fn base_cell(&self, x: u8, y: u8) -> Cell {
        if x >= self.base_width || y >= self.base_height {
            return None;
        }
        let idx = x as usize + y as usize * self.base_width as usize;
        match self.pattern.get(idx) {
            Some(&FILLED) => Some(self.kind),
            _ => None,
        }
    }

    /// Bounding width at `rot`
    pub fn width(&self, rot: Rotation) -> u8 {
        if rot.is_sideways() {
            self.base_height
        } else {
            self.base_width
        }
    }

    /// Bounding height at `rot`
    pub fn height(&self, rot: Rotation) -> u8 {
        if rot.is_sideways() {
            self.base_width
        } else {
            self.base_height
        }
    }

    /// Marker at local `(x, y)` as seen after rotating by `rot`.
    ///
    /// Anything outside `[0, width) x [0, height)` is empty, so callers can
    /// probe whole bounding boxes (or beyond) without checking first.
    pub fn cell_at(&self, rot: Rotation, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u8, y as u8);
        if x >= self.width(rot) || y >= self.height(rot) {
            return None;
        }

        let bw = self.base_width;
        let bh = self.base_height;
        let (sx, sy) = match rot {
            Rotation::North => (x, y),
            Rotation::East => (bw - 1 - y, x),
            Rotation::South => (bw - 1 - x, bh - 1 - y),
            Rotation::West => (y, bh - 1 - x),
        };
        self.base_cell(sx, sy)
    }

    /// Following rotation state, wrapping after `rotation_count` states
    pub fn next_rotation(&self, rot: Rotation) -> Rotation {
        let next = (rot.index() + 1) % self.rotation_count;
        Rotation::from_index(next).unwrap_or_default()
    }

    /// Occupied local coordinates at `rot`, row by row
    pub fn occupied(&self, rot: Rotation) -> impl Iterator<Item = (i8, i8)> + '_ {
        let w = self.width(rot) as i8;
        let h = self.height(rot) as i8;
        (0..h)
            .flat_map(move |y| (0..w).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.cell_at(rot, x, y).is_some())
    }
}

/// Free-function form of [`Shape::width`]
pub fn width(shape: &Shape, rot: Rotation) -> u8 {
    shape.width(rot)
}

/// Free-function form of [`Shape::height`]
pub fn height(shape: &Shape, rot: Rotation) -> u8 {
    shape.height(rot)
}

/// Free-function form of [`Shape::cell_at`]
pub fn cell_at(shape: &Shape, rot: Rotation, x: i8, y: i8) -> Cell {
    shape.cell_at(rot, x, y)
}

/// Free-function form of [`Shape::next_rotation`]
pub fn next_rotation(shape: &Shape, rot: Rotation) -> Rotation {
    shape.next_rotation(rot)
}

pub static SQUARE: Shape = Shape::new(
    "square",
    PieceKind::O,
    2,
    2,
    1,
    b"##\
      ##",
);

pub static S1: Shape = Shape::new(
    "s1",
    PieceKind::Z,
    3,
    3,
    2,
    b"##.\
      .##\
      ...",
);

pub static S2: Shape = Shape::new(
    "s2",
    PieceKind::S,
    3,
    3,
    2,
    b".##\
      ##.\
      ...",
);

pub static LINE: Shape = Shape::new(
    "line",
    PieceKind::I,
    4,
    4,
    2,
    b"....\
      ####\
      ....\
      ....",
);

pub static TEE: Shape = Shape::new(
    "t",
    PieceKind::T,
    3,
    3,
    4,
    b"...\
      ###\
      .#.",
);

pub static L1: Shape = Shape::new(
    "l1",
    PieceKind::L,
    3,
    3,
    4,
    b"...\
      ###\
      #..",
);

pub static L2: Shape = Shape::new(
    "l2",
    PieceKind::J,
    3,
    3,
    4,
    b"...\
      ###\
      ..#",
);

/// Number of shapes in the catalog
pub const CATALOG_LEN: usize = 7;

/// All shapes in spawn-selection order
pub static CATALOG: [&Shape; CATALOG_LEN] = [&SQUARE, &S1, &S2, &LINE, &TEE, &L1, &L2];

/// Shape at `index` in the catalog
pub fn shape(index: usize) -> Option<&'static Shape> {
    CATALOG.get(index).copied()
}

/// Catalog shape carrying the given label
pub fn shape_of(kind: PieceKind) -> &'static Shape {
    match kind {
        PieceKind::O => &SQUARE,
        PieceKind::Z => &S1,
        PieceKind::S => &S2,
        PieceKind::I => &LINE,
        PieceKind::T => &TEE,
        PieceKind::L => &L1,
        PieceKind::J => &L2,
    }
}
