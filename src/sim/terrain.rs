//! Terrain classification
//!
//! Maps a sampled map color to the physical response of that surface.
//! Classification is a pure function of the color triple; the decision
//! table is ordered and the first match wins.

use serde::{Deserialize, Serialize};

/// Surface kind decoded from a map pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// Hole marker pixel. The hole is detected by position, not by
    /// terrain response, so it plays like fairway.
    Hole,
    /// Tee marker pixel, plays like fairway
    Start,
    /// Water hazard
    Water,
    /// Solid obstacle (wall/rock)
    Rock,
    /// Bunker
    Sand,
    /// Putting green
    Green,
    Rough,
    Fairway,
}

/// Physical response of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainProps {
    /// Per-contact lateral velocity retention, in (0, 1]
    pub roll_damping: f32,
    /// Vertical restitution on landing, in [0, 1]
    pub bounce_factor: f32,
    /// Launch speed multiplier when hitting from this surface
    pub launch_factor: f32,
    pub is_hazard: bool,
    pub is_solid: bool,
    pub is_sand: bool,
}

impl Default for TerrainProps {
    /// Fairway response
    fn default() -> Self {
        Self {
            roll_damping: 0.96,
            bounce_factor: 0.60,
            launch_factor: 1.0,
            is_hazard: false,
            is_solid: false,
            is_sand: false,
        }
    }
}

impl Surface {
    /// Classify a color triple. Total function; anything unrecognized
    /// is fairway.
    pub fn classify(rgb: [u8; 3]) -> Surface {
        let (r, g, b) = (rgb[0] as i32, rgb[1] as i32, rgb[2] as i32);

        // Near-black: hole marker
        if r < 30 && g < 30 && b < 30 {
            return Surface::Hole;
        }
        // Strongly red-dominant: start marker
        if r > 150 && r > g + 40 && r > b + 40 {
            return Surface::Start;
        }
        // Blue-dominant: water
        if b > 120 && b > g + 20 && b > r + 20 {
            return Surface::Water;
        }
        // Dark, low saturation, green not much above red: wall/rock
        if r < 70 && g < 80 && b < 70 && g <= r + 20 {
            return Surface::Rock;
        }
        // Bright tan, red ~ green, low blue: sand
        if r > 130 && g > 130 && b < 100 && (r - g).abs() < 30 && r + g > 260 && g < 200 {
            return Surface::Sand;
        }
        // Bright saturated green: putting surface
        if g > 200 && r > 80 && b < 150 && g > r && g > b {
            return Surface::Green;
        }
        // Mid-band green, moderately dominant: rough
        if (85..=170).contains(&g) && g > r + 8 && g > b + 8 && r <= 120 && b <= 120 {
            return Surface::Rough;
        }

        Surface::Fairway
    }

    /// Physical response table for this surface
    pub fn props(self) -> TerrainProps {
        let fairway = TerrainProps::default();
        match self {
            Surface::Hole | Surface::Start | Surface::Fairway => fairway,
            Surface::Water => TerrainProps {
                roll_damping: 0.92,
                bounce_factor: 0.0,
                launch_factor: 0.0,
                is_hazard: true,
                ..fairway
            },
            Surface::Rock => TerrainProps {
                roll_damping: 0.40,
                bounce_factor: 0.0,
                launch_factor: 0.40,
                is_solid: true,
                ..fairway
            },
            Surface::Sand => TerrainProps {
                roll_damping: 0.45,
                bounce_factor: 0.05,
                launch_factor: 0.35,
                is_sand: true,
                ..fairway
            },
            Surface::Green => TerrainProps {
                roll_damping: 0.98,
                bounce_factor: 0.75,
                launch_factor: 1.05,
                ..fairway
            },
            Surface::Rough => TerrainProps {
                roll_damping: 0.80,
                bounce_factor: 0.55,
                launch_factor: 0.85,
                ..fairway
            },
        }
    }
}

impl TerrainProps {
    /// Classify a color straight to its physical response
    pub fn classify(rgb: [u8; 3]) -> TerrainProps {
        Surface::classify(rgb).props()
    }
}
