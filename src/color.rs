use palette::{Hsl, IntoColor, Srgb};

/// An 8-bit sRGB colour.
pub type Color = Srgb<u8>;

// ---------------------------------------------------------------------------
// Qualitative palette
// ---------------------------------------------------------------------------

/// Colour-blind-safe qualitative colours followed by a vivid set.
const QUALITATIVE: [(u8, u8, u8); 22] = [
    (136, 204, 238),
    (204, 102, 119),
    (221, 204, 119),
    (17, 119, 51),
    (51, 34, 136),
    (170, 68, 153),
    (68, 170, 153),
    (153, 153, 51),
    (136, 34, 85),
    (102, 17, 0),
    (136, 136, 136),
    (229, 134, 6),
    (93, 105, 177),
    (82, 188, 163),
    (153, 201, 69),
    (204, 97, 176),
    (36, 121, 108),
    (218, 165, 27),
    (47, 138, 196),
    (118, 78, 159),
    (237, 100, 90),
    (165, 170, 153),
];

const FALLBACK: Color = Srgb::new(128, 128, 128);

/// Ordered colours handed out by model position.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::qualitative()
    }
}

impl Palette {
    /// The 22-colour qualitative palette used by every chart by default.
    pub fn qualitative() -> Self {
        Self {
            colors: QUALITATIVE
                .iter()
                .map(|&(r, g, b)| Srgb::new(r, g, b))
                .collect(),
        }
    }

    /// `n` visually distinct colours using evenly spaced hues.
    pub fn evenly_spaced(n: usize) -> Self {
        let colors = (0..n)
            .map(|i| {
                let hue = (i as f32 / n as f32) * 360.0;
                let hsl = Hsl::new(hue, 0.75, 0.55);
                let rgb: Srgb = hsl.into_color();
                Srgb::new(
                    (rgb.red * 255.0) as u8,
                    (rgb.green * 255.0) as u8,
                    (rgb.blue * 255.0) as u8,
                )
            })
            .collect();
        Self { colors }
    }

    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Colour for the model at `index`, wrapping around when exhausted.
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return FALLBACK;
        }
        if index == self.colors.len() {
            log::warn!(
                "palette of {} colours exhausted, colours will repeat",
                self.colors.len()
            );
        }
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// `#rrggbb` notation, as renderers expect.
pub fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
