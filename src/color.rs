use crossterm::style::{Color, Stylize};
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Rainbow,
    Fire,
    Ocean,
    Forest,
    Purple,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "purple" => Ok(Self::Purple),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => {
                let known: Vec<String> = Self::all().iter().map(|c| c.to_string()).collect();
                Err(format!(
                    "Unknown color scheme: {} (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            }
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Forest => "forest",
            ColorScheme::Purple => "purple",
            ColorScheme::Monochrome => "monochrome",
        };
        f.write_str(name)
    }
}

impl ColorScheme {
    /// Get color for a given position (0.0 to 1.0) and intensity (0.0 to 1.0)
    pub fn get_color(&self, position: f32, intensity: f32) -> (u8, u8, u8) {
        let position = position.clamp(0.0, 1.0);
        let intensity = intensity.clamp(0.0, 1.0);

        let (h, s, l) = match self {
            ColorScheme::Spectrum => {
                // purple -> blue -> cyan -> green -> yellow -> red
                let hue = 270.0 - (position * 270.0);
                (hue, 0.9, 0.4 + intensity * 0.3)
            }
            ColorScheme::Rainbow => {
                let hue = position * 360.0;
                (hue, 0.85, 0.5 + intensity * 0.2)
            }
            ColorScheme::Fire => {
                // Red -> orange -> yellow
                let hue = position * 60.0;
                (hue, 0.95, 0.3 + intensity * 0.4)
            }
            ColorScheme::Ocean => {
                let hue = 180.0 + position * 60.0;
                (hue, 0.8, 0.3 + intensity * 0.35)
            }
            ColorScheme::Forest => {
                let hue = 80.0 + position * 60.0;
                (hue, 0.75, 0.25 + intensity * 0.35)
            }
            ColorScheme::Purple => {
                let hue = 270.0 + position * 60.0;
                (hue, 0.8, 0.35 + intensity * 0.3)
            }
            ColorScheme::Monochrome => (0.0, 0.0, 0.2 + intensity * 0.7),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Wrap `ch` in an ANSI foreground color picked from this scheme.
    pub fn paint(&self, ch: char, position: f32, intensity: f32) -> String {
        let (r, g, b) = self.get_color(position, intensity);
        ch.with(Color::Rgb { r, g, b }).to_string()
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Spectrum,
            ColorScheme::Rainbow,
            ColorScheme::Fire,
            ColorScheme::Ocean,
            ColorScheme::Forest,
            ColorScheme::Purple,
            ColorScheme::Monochrome,
        ]
    }
}
