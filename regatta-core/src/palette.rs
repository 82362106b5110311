use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
    Green,
    Purple,
    Orange,
    DarkRed,
}

pub const PALETTE: [Color; 6] = [
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Purple,
    Color::Orange,
    Color::DarkRed,
];

/// How the fleet assigns colors once every palette entry is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    /// Every vessel gets a distinct color, registering more vessels than palette entries fails.
    #[default]
    Unique,
    /// Colors are reused in palette order.
    Cycle,
}

/// Color of the vessel registered at `index`, wrapping around the palette.
pub fn color_for(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}
