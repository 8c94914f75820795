use serde::{Deserialize, Serialize};

/// Whether a shareholder came in at formation or through a funding round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShareholderRole {
    Founder,
    Investor,
}

/// Base hues, in assignment order. Index 0 is reserved for founders and the
/// founders round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Indigo,
    Teal,
    Red,
    Yellow,
}

impl BaseColor {
    pub const ALL: [BaseColor; 9] = [
        BaseColor::Blue,
        BaseColor::Green,
        BaseColor::Purple,
        BaseColor::Orange,
        BaseColor::Pink,
        BaseColor::Indigo,
        BaseColor::Teal,
        BaseColor::Red,
        BaseColor::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseColor::Blue => "blue",
            BaseColor::Green => "green",
            BaseColor::Purple => "purple",
            BaseColor::Orange => "orange",
            BaseColor::Pink => "pink",
            BaseColor::Indigo => "indigo",
            BaseColor::Teal => "teal",
            BaseColor::Red => "red",
            BaseColor::Yellow => "yellow",
        }
    }
}

/// Shade levels, lightest first.
pub const INTENSITY_LEVELS: [u16; 5] = [100, 200, 300, 400, 500];

/// A background colour class. `None` base means the neutral gray fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSwatch {
    pub base: Option<BaseColor>,
    pub intensity: u16,
}

impl ColorSwatch {
    pub fn new(base: BaseColor, intensity: u16) -> Self {
        Self {
            base: Some(base),
            intensity,
        }
    }

    pub fn gray(intensity: u16) -> Self {
        Self {
            base: None,
            intensity,
        }
    }

    /// Utility class name, e.g. `bg-teal-300`.
    pub fn bg_class(&self) -> String {
        let hue = self.base.map(|b| b.as_str()).unwrap_or("gray");
        format!("bg-{}-{}", hue, self.intensity)
    }
}
