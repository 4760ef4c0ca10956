/// Simple RGB color with components in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0).
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Red (1, 0, 0).
    pub fn red() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Blue (0, 0, 1).
    pub fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Gray with the given level.
    pub fn gray(level: f64) -> Self {
        Self::new(level, level, level)
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
