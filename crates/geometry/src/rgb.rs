use super::*;
use modal_core::*;

/// A colour in RGB space, channels in `0.0..=255.0`.
///
/// Channels are kept as floats so that centroids (averages of many colours)
/// are not rounded until they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    r: f32,
    g: f32,
    b: f32,
}

impl Rgb {
    pub fn r(&self) -> f32 {
        self.r
    }
    pub fn g(&self) -> f32 {
        self.g
    }
    pub fn b(&self) -> f32 {
        self.b
    }
    /// Channels rounded and clamped to bytes.
    pub fn bytes(&self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| c.round().clamp(0., 255.) as u8)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from(bytes.map(f32::from))
    }
}

impl TryFrom<&str> for Rgb {
    type Error = Error;
    /// Parses `#rrggbb` or `rrggbb`.
    fn try_from(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || Error::InvalidParameter(format!("not a hex colour: {:?}", s));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::from([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.bytes();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Arbitrary for Rgb {
    fn random() -> Self {
        Self::from(rand::random::<[u8; 3]>())
    }
}

/// Euclidean distance in RGB space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chroma;

impl Geometry for Chroma {
    type P = Rgb;
    type S = [f64; 3];

    fn distance(&self, a: &Rgb, b: &Rgb) -> Energy {
        Space::default().distance(&(*a).into(), &(*b).into())
    }
    fn zero(&self) -> [f64; 3] {
        Space::default().zero()
    }
    fn lift(&self, p: &Rgb, weight: Weight) -> [f64; 3] {
        Space::default().lift(&(*p).into(), weight)
    }
    fn merge(&self, a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
        Space::default().merge(a, b)
    }
    fn project(&self, sum: [f64; 3], total: Weight) -> Rgb {
        Rgb::from(Space::default().project(sum, total))
    }
    fn equal(&self, a: &Rgb, b: &Rgb) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Rgb::try_from("#1a2b3c").unwrap();
        assert_eq!(c.bytes(), [0x1a, 0x2b, 0x3c]);
        assert_eq!(c.to_string(), "#1a2b3c");
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(Rgb::try_from("#12345").is_err());
        assert!(Rgb::try_from("zzzzzz").is_err());
        assert!(Rgb::try_from("#ééé").is_err());
    }

    #[test]
    fn display_rounds_and_clamps() {
        assert_eq!(Rgb::from([254.6f32, -3., 300.]).to_string(), "#ff00ff");
    }

    #[test]
    fn chroma_average_blends_channels() {
        let black = Rgb::from([0u8, 0, 0]);
        let white = Rgb::from([255u8, 255, 255]);
        let grey = Chroma.average(&[black, white]).unwrap();
        assert_eq!(grey, Rgb::from([127.5f32, 127.5, 127.5]));
    }

    #[test]
    fn random_colours_stay_in_gamut() {
        for _ in 0..64 {
            let c = Rgb::random();
            assert!([c.r(), c.g(), c.b()].iter().all(|x| (0. ..=255.).contains(x)));
        }
    }
}
