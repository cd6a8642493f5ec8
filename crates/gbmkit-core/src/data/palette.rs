//! Stroke colours and the palette paths cycle through.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParameterError;

/// Named colours in alphabetical order. Paths are coloured by cycling
/// through this list when no custom palette is configured.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("AliceBlue", [240, 248, 255]),
    ("AntiqueWhite", [250, 235, 215]),
    ("Aqua", [0, 255, 255]),
    ("Aquamarine", [127, 255, 212]),
    ("Azure", [240, 255, 255]),
    ("Beige", [245, 245, 220]),
    ("Bisque", [255, 228, 196]),
    ("Black", [0, 0, 0]),
    ("BlanchedAlmond", [255, 235, 205]),
    ("Blue", [0, 0, 255]),
    ("BlueViolet", [138, 43, 226]),
    ("Brown", [165, 42, 42]),
    ("BurlyWood", [222, 184, 135]),
    ("CadetBlue", [95, 158, 160]),
    ("Chartreuse", [127, 255, 0]),
    ("Chocolate", [210, 105, 30]),
    ("Coral", [255, 127, 80]),
    ("CornflowerBlue", [100, 149, 237]),
    ("Cornsilk", [255, 248, 220]),
    ("Crimson", [220, 20, 60]),
    ("Cyan", [0, 255, 255]),
    ("DarkBlue", [0, 0, 139]),
    ("DarkCyan", [0, 139, 139]),
    ("DarkGoldenrod", [184, 134, 11]),
    ("DarkGray", [169, 169, 169]),
    ("DarkGreen", [0, 100, 0]),
    ("DarkKhaki", [189, 183, 107]),
    ("DarkMagenta", [139, 0, 139]),
    ("DarkOliveGreen", [85, 107, 47]),
    ("DarkOrange", [255, 140, 0]),
    ("DarkOrchid", [153, 50, 204]),
    ("DarkRed", [139, 0, 0]),
    ("DarkSalmon", [233, 150, 122]),
    ("DarkSeaGreen", [143, 188, 143]),
    ("DarkSlateBlue", [72, 61, 139]),
    ("DarkSlateGray", [47, 79, 79]),
    ("DarkTurquoise", [0, 206, 209]),
    ("DarkViolet", [148, 0, 211]),
    ("DeepPink", [255, 20, 147]),
    ("DeepSkyBlue", [0, 191, 255]),
    ("DimGray", [105, 105, 105]),
    ("DodgerBlue", [30, 144, 255]),
    ("Firebrick", [178, 34, 34]),
    ("ForestGreen", [34, 139, 34]),
    ("Fuchsia", [255, 0, 255]),
    ("Gold", [255, 215, 0]),
    ("Goldenrod", [218, 165, 32]),
    ("Gray", [128, 128, 128]),
    ("Green", [0, 128, 0]),
    ("GreenYellow", [173, 255, 47]),
    ("HotPink", [255, 105, 180]),
    ("IndianRed", [205, 92, 92]),
    ("Indigo", [75, 0, 130]),
    ("LawnGreen", [124, 252, 0]),
    ("LightCoral", [240, 128, 128]),
    ("LightSeaGreen", [32, 178, 170]),
    ("LimeGreen", [50, 205, 50]),
    ("Magenta", [255, 0, 255]),
    ("Maroon", [128, 0, 0]),
    ("MediumBlue", [0, 0, 205]),
    ("MediumOrchid", [186, 85, 211]),
    ("MediumPurple", [147, 112, 219]),
    ("MediumSeaGreen", [60, 179, 113]),
    ("MidnightBlue", [25, 25, 112]),
    ("Navy", [0, 0, 128]),
    ("Olive", [128, 128, 0]),
    ("OliveDrab", [107, 142, 35]),
    ("Orange", [255, 165, 0]),
    ("OrangeRed", [255, 69, 0]),
    ("Orchid", [218, 112, 214]),
    ("Peru", [205, 133, 63]),
    ("Purple", [128, 0, 128]),
    ("Red", [255, 0, 0]),
    ("RoyalBlue", [65, 105, 225]),
    ("SaddleBrown", [139, 69, 19]),
    ("Salmon", [250, 128, 114]),
    ("SeaGreen", [46, 139, 87]),
    ("Sienna", [160, 82, 45]),
    ("SlateBlue", [106, 90, 205]),
    ("SteelBlue", [70, 130, 180]),
    ("Teal", [0, 128, 128]),
    ("Tomato", [255, 99, 71]),
    ("Turquoise", [64, 224, 208]),
    ("Violet", [238, 130, 238]),
    ("YellowGreen", [154, 205, 50]),
];

/// Stroke used to draw one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    /// Colour name
    pub name: String,
    /// Red, green, blue components
    pub rgb: [u8; 3],
}

impl Stroke {
    pub fn new(name: impl Into<String>, rgb: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    /// Look up a named colour, ignoring case
    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(candidate, rgb)| Self::new(*candidate, *rgb))
    }

    /// `#rrggbb` form for SVG-style renderers
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Finite, non-empty list of strokes cycled by path index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    strokes: Vec<Stroke>,
}

impl Palette {
    pub fn new(strokes: Vec<Stroke>) -> Result<Self, ParameterError> {
        if strokes.is_empty() {
            return Err(ParameterError::EmptyPalette);
        }
        Ok(Self { strokes })
    }

    /// Build a palette from colour names, failing on the first unknown name.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ParameterError> {
        let strokes = names
            .iter()
            .map(|n| {
                Stroke::named(n.as_ref())
                    .ok_or_else(|| ParameterError::UnknownColor(n.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(strokes)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Stroke for path `index`, wrapping modulo the palette size
    pub fn stroke_for(&self, index: usize) -> Stroke {
        self.strokes[index % self.strokes.len()].clone()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            strokes: NAMED_COLORS
                .iter()
                .map(|(name, rgb)| Stroke::new(*name, *rgb))
                .collect(),
        }
    }
}
