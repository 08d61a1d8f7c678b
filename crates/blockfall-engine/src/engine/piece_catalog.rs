use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Palette, Piece, ShapeKind};

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the catalog's random number generator. The same seed
/// reproduces the same sequence of shapes, spawn rotations and colors, which
/// makes recorded command sequences replayable.
///
/// Serialized as a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parses a 32-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, String> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        _ = write!(&mut hex_str, "{num:032x}");
        hex_str
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Source of new pieces: a uniformly random shape from the seven templates,
/// a random palette color, and 1 to 3 clockwise quarter turns.
///
/// Pre-rotating varies the spawn orientation without a separate spawn path
/// per orientation.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceCatalog;
///
/// let mut catalog = PieceCatalog::new();
/// let piece = catalog.spawn(3);
/// assert_eq!(piece.x_target(), 3);
/// assert_eq!(piece.depth_target(), -(piece.size() as i32));
/// ```
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    rng: Pcg32,
    palette: Palette,
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceCatalog {
    /// Creates a catalog with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but reproducible.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            palette: Palette::DEFAULT,
        }
    }

    #[must_use]
    pub fn with_palette(self, palette: Palette) -> Self {
        Self { palette, ..self }
    }

    /// Draws a random piece placed fully above the board at `column`.
    pub fn spawn(&mut self, column: i32) -> Piece {
        let kind: ShapeKind = self.rng.random();
        let color = self.palette.sample(&mut self.rng);
        let mut piece = Piece::with_shape(kind, column, color);
        for _ in 0..self.rng.random_range(1..=3) {
            piece.rotate_clockwise();
        }
        piece
    }
}
