use anyhow::{Context, anyhow, bail};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// CSS basic keywords plus orange.
const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("gray", Rgb::new(128, 128, 128)),
    ("white", Rgb::new(255, 255, 255)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("blue", Rgb::new(0, 0, 255)),
    ("teal", Rgb::new(0, 128, 128)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("orange", Rgb::new(255, 165, 0)),
];

/// A color together with the notation it was written in.
///
/// The notation is fixed when the string is parsed, so blending never has to
/// sniff strings again. Blends keep the notation of their starting color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Color {
    /// `#rrggbb` (or `#rgb` on input)
    Hex(Rgb),
    /// `rgb(r,g,b)`
    Rgb(Rgb),
    /// CSS keyword such as `red`
    Named(&'static str, Rgb),
}

impl Color {
    pub fn rgb(&self) -> Rgb {
        match *self {
            Color::Hex(c) | Color::Rgb(c) | Color::Named(_, c) => c,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Named("red", Rgb::new(255, 0, 0))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hex(c) => write!(f, "#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
            Color::Rgb(c) => write!(f, "rgb({},{},{})", c.r, c.g, c.b),
            Color::Named(name, _) => f.write_str(name),
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix('#') {
            return parse_hex(digits)
                .map(Color::Hex)
                .with_context(|| format!("invalid hex color {s:?}"));
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            return parse_triple(body)
                .map(Color::Rgb)
                .with_context(|| format!("invalid rgb color {s:?}"));
        }
        let lower = s.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(name, rgb)| Color::Named(name, rgb))
            .ok_or_else(|| anyhow!("unknown color {s:?}"))
    }
}

// Keywords hold a `&'static str`, so the derive would demand borrowed input.
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        String::deserialize(d)?.parse().map_err(de::Error::custom)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

fn parse_hex(digits: &str) -> anyhow::Result<Rgb> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("expected hex digits");
    }
    match digits.len() {
        6 => Ok(Rgb::new(
            u8::from_str_radix(&digits[0..2], 16)?,
            u8::from_str_radix(&digits[2..4], 16)?,
            u8::from_str_radix(&digits[4..6], 16)?,
        )),
        // #rgb doubles every digit
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|n| n * 17);
            Ok(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        n => bail!("expected 3 or 6 hex digits, got {n}"),
    }
}

fn parse_triple(body: &str) -> anyhow::Result<Rgb> {
    let channels = body
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .context("channels must be integers in 0..=255")?;
    match channels[..] {
        [r, g, b] => Ok(Rgb::new(r, g, b)),
        _ => bail!("expected 3 channels, got {}", channels.len()),
    }
}

fn blend_channel(from: u8, to: u8, ratio: f32) -> u8 {
    let delta = (f32::from(to) - f32::from(from)) * ratio;
    // half-up rounding, then back into channel range
    ((delta + 0.5).floor() as i32 + i32::from(from)).clamp(0, 255) as u8
}

/// Mixes `from` towards `to`. `ratio` 0 gives `from`, 1 gives `to`'s channels.
///
/// The result is written in `from`'s notation; keywords blend into hex.
pub fn blend(from: Color, to: Color, ratio: f32) -> Color {
    let (a, b) = (from.rgb(), to.rgb());
    let mixed = Rgb::new(
        blend_channel(a.r, b.r, ratio),
        blend_channel(a.g, b.g, ratio),
        blend_channel(a.b, b.b, ratio),
    );
    match from {
        Color::Rgb(_) => Color::Rgb(mixed),
        Color::Hex(_) | Color::Named(..) => Color::Hex(mixed),
    }
}

/// Head-to-tail gradient position of segment `index`.
pub fn gradient_ratio(index: usize, length: usize) -> f32 {
    if length == 0 {
        return 0.0;
    }
    index as f32 / length as f32
}

/// Fill for the snake: one flat color or a two-stop gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteRepr", into = "PaletteRepr")]
pub enum Palette {
    Solid(Color),
    Gradient(Color, Color),
}

impl Palette {
    /// Color of segment `index` in a chain of `length`.
    pub fn color_at(&self, index: usize, length: usize) -> Color {
        match *self {
            Palette::Solid(c) => c,
            Palette::Gradient(head, tail) => blend(head, tail, gradient_ratio(index, length)),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Solid(Color::default())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PaletteRepr {
    One(Color),
    Many(Vec<Color>),
}

impl TryFrom<PaletteRepr> for Palette {
    type Error = anyhow::Error;

    fn try_from(repr: PaletteRepr) -> anyhow::Result<Self> {
        match repr {
            PaletteRepr::One(c) => Ok(Palette::Solid(c)),
            PaletteRepr::Many(list) => match list[..] {
                [c] => Ok(Palette::Solid(c)),
                [head, tail] => Ok(Palette::Gradient(head, tail)),
                _ => bail!("color list needs one or two entries, got {}", list.len()),
            },
        }
    }
}

impl From<Palette> for PaletteRepr {
    fn from(p: Palette) -> Self {
        match p {
            Palette::Solid(c) => PaletteRepr::One(c),
            Palette::Gradient(head, tail) => PaletteRepr::Many(vec![head, tail]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Color {
        s.parse().unwrap()
    }

    #[test]
    fn parses_each_notation() {
        assert_eq!(c("#ff8000"), Color::Hex(Rgb::new(255, 128, 0)));
        assert_eq!(c("#f80"), Color::Hex(Rgb::new(255, 136, 0)));
        assert_eq!(c("rgb(1, 2,3)"), Color::Rgb(Rgb::new(1, 2, 3)));
        assert_eq!(c("Red"), Color::Named("red", Rgb::new(255, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("rgb(1,2)".parse::<Color>().is_err());
        assert!("rgb(1,2,300)".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn prints_in_source_notation() {
        assert_eq!(c("#0A0b0C").to_string(), "#0a0b0c");
        assert_eq!(c("rgb( 9 ,8, 7)").to_string(), "rgb(9,8,7)");
        assert_eq!(c("red").to_string(), "red");
    }

    #[test]
    fn blend_endpoints() {
        for (a, b) in [("#102030", "#f0e0d0"), ("rgb(0,0,0)", "rgb(255,100,7)")] {
            let (a, b) = (c(a), c(b));
            assert_eq!(blend(a, b, 0.0), a);
            assert_eq!(blend(a, b, 1.0), b);
        }
    }

    #[test]
    fn blend_identical_is_identity() {
        for s in ["#123456", "rgb(10,20,30)"] {
            for ratio in [0.0, 0.25, 0.5, 0.99, 1.0] {
                assert_eq!(blend(c(s), c(s), ratio), c(s));
            }
        }
    }

    #[test]
    fn blend_rounds_half_up() {
        // 0 -> 255 at 0.5 is 127.5
        assert_eq!(blend(c("#000000"), c("#ffffff"), 0.5), c("#808080"));
        // 255 -> 0 at 0.5 is -127.5 + 255, rounds to 128
        assert_eq!(blend(c("#ffffff"), c("#000000"), 0.5), c("#808080"));
    }

    #[test]
    fn keyword_blends_into_hex() {
        assert_eq!(blend(c("red"), c("blue"), 0.5), c("#800080"));
        assert_eq!(blend(c("rgb(0,0,0)"), c("#ffffff"), 1.0), c("rgb(255,255,255)"));
    }

    #[test]
    fn gradient_ratio_is_exact_fraction() {
        assert_eq!(gradient_ratio(0, 10), 0.0);
        assert_eq!(gradient_ratio(5, 10), 0.5);
        assert_eq!(gradient_ratio(1, 3), 1.0 / 3.0);
        assert_eq!(gradient_ratio(3, 0), 0.0);
    }

    #[test]
    fn gradient_thirds_round_like_the_channel_formula() {
        let grad = Palette::Gradient(c("#000000"), c("#ffffff"));
        // 255 / 3 = 85 exactly, 510 / 3 = 170
        assert_eq!(grad.color_at(1, 3), c("#555555"));
        assert_eq!(grad.color_at(2, 3), c("#aaaaaa"));
    }

    #[test]
    fn color_deserializes_from_owned_json() {
        let json = String::from(r##"["red", "#0f0", "rgb(1,2,3)"]"##);
        let colors: Vec<Color> = serde_json::from_str(&json).unwrap();
        drop(json);
        assert_eq!(colors[0], Color::Named("red", Rgb::new(255, 0, 0)));
        assert_eq!(colors[1], Color::Hex(Rgb::new(0, 255, 0)));
        assert_eq!(colors[2], Color::Rgb(Rgb::new(1, 2, 3)));
        assert!(serde_json::from_str::<Color>(r#""nope""#).is_err());
        assert_eq!(serde_json::to_string(&colors[0]).unwrap(), r#""red""#);
    }

    #[test]
    fn palette_from_json() {
        let solid: Palette = serde_json::from_str(r##""#00ff00""##).unwrap();
        assert_eq!(solid, Palette::Solid(c("#00ff00")));
        let single: Palette = serde_json::from_str(r#"["blue"]"#).unwrap();
        assert_eq!(single, Palette::Solid(c("blue")));
        let grad: Palette = serde_json::from_str(r##"["#000000", "#ffffff"]"##).unwrap();
        assert_eq!(grad.color_at(0, 4), c("#000000"));
        assert_eq!(grad.color_at(2, 4), c("#808080"));
        assert!(serde_json::from_str::<Palette>(r#"["red", "blue", "lime"]"#).is_err());
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }
}
