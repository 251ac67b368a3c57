//! Tiles and faces.
//!
//! A tile has two faces, A and B, each with an expression and the concept
//! label resolved from it at load time. Faces never change after creation.
//! Orientation is the only mutable property and is purely visual: it never
//! swaps which face is A and which is B.

use serde::{Deserialize, Serialize};

/// Tile identifier, dense and 0-based in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which face of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceSide {
    A,
    B,
}

impl FaceSide {
    /// The opposite face.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            FaceSide::A => FaceSide::B,
            FaceSide::B => FaceSide::A,
        }
    }
}

/// How a tile is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// One side of a tile: what is printed and what it means.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    expression: String,
    concept: String,
}

impl Face {
    /// Create a face from an expression and its resolved concept.
    pub fn new(expression: impl Into<String>, concept: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            concept: concept.into(),
        }
    }

    /// The printed expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The concept label used for matching.
    #[must_use]
    pub fn concept(&self) -> &str {
        &self.concept
    }

    /// The expression as display math.
    #[must_use]
    pub fn display(&self) -> String {
        display_expression(&self.expression)
    }
}

/// A two-faced tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    face_a: Face,
    face_b: Face,
    orientation: Orientation,
}

impl Tile {
    /// Create a horizontal tile.
    #[must_use]
    pub fn new(id: TileId, face_a: Face, face_b: Face) -> Self {
        Self {
            id,
            face_a,
            face_b,
            orientation: Orientation::Horizontal,
        }
    }

    /// Tile ID.
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Face A.
    #[must_use]
    pub fn face_a(&self) -> &Face {
        &self.face_a
    }

    /// Face B.
    #[must_use]
    pub fn face_b(&self) -> &Face {
        &self.face_b
    }

    /// The face on `side`.
    #[must_use]
    pub fn face(&self, side: FaceSide) -> &Face {
        match side {
            FaceSide::A => &self.face_a,
            FaceSide::B => &self.face_b,
        }
    }

    /// Concept on `side`.
    #[must_use]
    pub fn concept(&self, side: FaceSide) -> &str {
        self.face(side).concept()
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Toggle horizontal/vertical. Faces are untouched.
    pub fn rotate(&mut self) {
        self.orientation = self.orientation.toggled();
    }
}

/// Wrap an expression in `$$` display delimiters unless it is already math.
///
/// ```
/// use concept_domino::tiles::display_expression;
///
/// assert_eq!(display_expression(" x^2 "), "$$x^2$$");
/// assert_eq!(display_expression("$e^x$"), "$e^x$");
/// ```
#[must_use]
pub fn display_expression(expression: &str) -> String {
    let expression = expression.trim();
    if expression.starts_with('$') {
        expression.to_string()
    } else {
        format!("$${expression}$$")
    }
}
