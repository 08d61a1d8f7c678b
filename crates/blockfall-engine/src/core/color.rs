use rand::{Rng, distr::Distribution, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

/// An RGB color assigned to a piece and copied into the settled grid on lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A fixed, non-empty set of colors to draw piece colors from.
///
/// Sampling picks one entry uniformly at random:
///
/// ```
/// use blockfall_engine::Palette;
/// use rand::Rng as _;
///
/// let color = rand::rng().sample(Palette::DEFAULT);
/// assert!(Palette::DEFAULT.colors().contains(&color));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette(&'static [Rgb]);

impl Palette {
    pub const DEFAULT: Self = Self(&[
        Rgb::new(254, 67, 101),
        Rgb::new(252, 157, 154),
        Rgb::new(249, 205, 173),
        Rgb::new(200, 200, 169),
        Rgb::new(131, 175, 155),
    ]);

    /// Creates a palette from a static color table.
    ///
    /// # Panics
    ///
    /// Panics if `colors` is empty.
    #[must_use]
    pub const fn new(colors: &'static [Rgb]) -> Self {
        assert!(!colors.is_empty(), "palette must contain at least one color");
        Self(colors)
    }

    #[must_use]
    pub const fn colors(&self) -> &'static [Rgb] {
        self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Distribution<Rgb> for Palette {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        // Non-empty by construction.
        *self.0.choose(rng).unwrap_or(&self.0[0])
    }
}
