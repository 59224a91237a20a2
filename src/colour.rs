use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

/// The colour space generated documents are printed in
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourType {
    #[default]
    Rgb,
    Cmyk,
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rgb` or `#rrggbb` string into an RGB colour. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Colour, RenderError> {
        let invalid = || RenderError::InvalidColour(hex.to_string());

        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse a hex colour and convert it into the colour space documents are printed in
    pub fn from_hex_for(hex: &str, colour_type: ColourType) -> Result<Colour, RenderError> {
        let colour = Colour::from_hex(hex)?;
        Ok(match colour_type {
            ColourType::Rgb => colour,
            ColourType::Cmyk => colour.to_cmyk(),
        })
    }

    /// Convert to the CMYK colour space using the naive device conversion
    pub fn to_cmyk(self) -> Colour {
        match self {
            Colour::RGB { r, g, b } => {
                let k = 1.0 - r.max(g).max(b);
                if k >= 1.0 {
                    // pure black, the chromatic channels are undefined
                    return Colour::CMYK {
                        c: 0.0,
                        m: 0.0,
                        y: 0.0,
                        k: 1.0,
                    };
                }
                Colour::CMYK {
                    c: (1.0 - r - k) / (1.0 - k),
                    m: (1.0 - g - k) / (1.0 - k),
                    y: (1.0 - b - k) / (1.0 - k),
                    k,
                }
            }
            Colour::Grey { g } => Colour::CMYK {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0 - g,
            },
            cmyk @ Colour::CMYK { .. } => cmyk,
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(
            Colour::from_hex("#ff0000").unwrap(),
            Colour::RGB {
                r: 1.0,
                g: 0.0,
                b: 0.0
            }
        );
        assert_eq!(
            Colour::from_hex("0f0").unwrap(),
            Colour::RGB {
                r: 0.0,
                g: 1.0,
                b: 0.0
            }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Colour::from_hex("#12345"),
            Err(RenderError::InvalidColour(_))
        ));
        assert!(Colour::from_hex("#gggggg").is_err());
        assert!(Colour::from_hex("").is_err());
    }

    #[test]
    fn converts_to_cmyk_for_print() {
        assert_eq!(
            Colour::from_hex_for("#000000", ColourType::Cmyk).unwrap(),
            Colour::CMYK {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0
            }
        );
        assert_eq!(
            Colour::from_hex_for("#ff0000", ColourType::Cmyk).unwrap(),
            Colour::CMYK {
                c: 0.0,
                m: 1.0,
                y: 1.0,
                k: 0.0
            }
        );
    }
}
