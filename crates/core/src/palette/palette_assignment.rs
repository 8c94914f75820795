use super::{BaseColor, ColorSwatch, ShareholderRole, INTENSITY_LEVELS};
use crate::constants::INITIAL_ROUND_ID;

use log::warn;

const FALLBACK_INTENSITY: u16 = 200;
const BADGE_INTENSITY: u16 = 100;
const FALLBACK_BADGE_INTENSITY: u16 = 50;

/// Avatar colour for a shareholder.
///
/// Founders always get the founders hue; investors get a hue hashed from their
/// id (never the founders hue). The shade is hashed from the id for both. The
/// result depends only on the arguments.
pub fn shareholder_color(shareholder_id: &str, role: ShareholderRole) -> ColorSwatch {
    if shareholder_id.is_empty() {
        warn!("shareholder_color: shareholder id is empty");
        return ColorSwatch::gray(FALLBACK_INTENSITY);
    }

    let base = match role {
        ShareholderRole::Founder => BaseColor::ALL[0],
        ShareholderRole::Investor => {
            let investor_hues = &BaseColor::ALL[1..];
            let hash = string_hash(&format!("base-{}", shareholder_id));
            investor_hues[hash.unsigned_abs() as usize % investor_hues.len()]
        }
    };

    let intensity_hash = string_hash(&format!("intensity-{}", shareholder_id));
    let intensity = INTENSITY_LEVELS[intensity_hash.unsigned_abs() as usize % INTENSITY_LEVELS.len()];

    ColorSwatch::new(base, intensity)
}

/// Badge colour: the shareholder's hue at the lightest shade.
pub fn badge_color(shareholder_id: &str, role: ShareholderRole) -> ColorSwatch {
    if shareholder_id.is_empty() {
        warn!("badge_color: shareholder id is empty");
        return ColorSwatch::gray(FALLBACK_BADGE_INTENSITY);
    }
    ColorSwatch {
        intensity: BADGE_INTENSITY,
        ..shareholder_color(shareholder_id, role)
    }
}

/// Hue for a round's UI elements.
///
/// `position` is the 1-based index of the round among funding rounds; the
/// founders round always maps to the founders hue and the others cycle through
/// the remaining hues.
pub fn round_color(round_id: &str, position: usize) -> BaseColor {
    if round_id == INITIAL_ROUND_ID {
        return BaseColor::ALL[0];
    }
    let cycle = BaseColor::ALL.len() - 1;
    BaseColor::ALL[1 + (position.max(1) - 1) % cycle]
}

/// 32-bit `h * 31 + c` hash over UTF-16 code units.
fn string_hash(value: &str) -> i32 {
    value.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}
