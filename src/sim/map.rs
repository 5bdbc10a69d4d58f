//! Course map: an RGB pixel grid whose colors encode terrain
//!
//! The map is immutable for the duration of a hole and is shared
//! read-only by both ball simulations. World coordinates map
//! proportionally onto the pixel grid (nearest pixel, no interpolation),
//! so the pixel resolution is independent of the world size.

use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;

use super::terrain::{Surface, TerrainProps};
use crate::consts::*;

/// Immutable RGB raster describing the course
#[derive(Debug, Clone)]
pub struct CourseMap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl CourseMap {
    /// Build a map from raw pixels. Returns `None` if the buffer does
    /// not match the dimensions or either dimension is zero.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel color at clamped pixel coordinates
    pub fn color_at(&self, px: i32, py: i32) -> [u8; 3] {
        let px = px.clamp(0, self.width as i32 - 1) as u32;
        let py = py.clamp(0, self.height as i32 - 1) as u32;
        self.pixels[(py * self.width + px) as usize]
    }

    /// Surface kind at a world position
    pub fn surface_at(&self, world: Vec2) -> Surface {
        let world = crate::clamp_to_world(world);
        let px = ((world.x / WORLD_SIZE) * self.width as f32) as i32;
        let py = ((world.y / WORLD_SIZE) * self.height as f32) as i32;
        Surface::classify(self.color_at(px, py))
    }

    /// Terrain response at a world position
    pub fn terrain_at(&self, world: Vec2) -> TerrainProps {
        self.surface_at(world).props()
    }

    /// World-space center of a pixel's tile
    fn tile_center(&self, px: u32, py: u32) -> Vec2 {
        let tile_w = WORLD_SIZE / self.width as f32;
        let tile_h = WORLD_SIZE / self.height as f32;
        Vec2::new(
            px as f32 * tile_w + tile_w * 0.5,
            py as f32 * tile_h + tile_h * 0.5,
        )
    }

    fn find_marker(&self, wanted: Surface) -> Option<Vec2> {
        for py in 0..self.height {
            for px in 0..self.width {
                if Surface::classify(self.pixels[(py * self.width + px) as usize]) == wanted {
                    return Some(self.tile_center(px, py));
                }
            }
        }
        None
    }

    /// World position of the hole marker, if the map has one
    pub fn find_hole(&self) -> Option<Vec2> {
        self.find_marker(Surface::Hole)
    }

    /// World position of the tee. A map without a start marker tees off
    /// at the world center.
    pub fn find_start(&self) -> Vec2 {
        self.find_marker(Surface::Start)
            .unwrap_or(Vec2::splat(WORLD_SIZE * 0.5))
    }

    /// Load a binary P6 PPM file. The corpus carries no image-decoding
    /// crate, and PPM is the minimal raster the course pipeline emits.
    pub fn load_ppm(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = fs::read(path)?;
        parse_ppm(&data).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "not a valid P6 PPM course map")
        })
    }

    /// Load a map, falling back to the generated default course when the
    /// file is missing or malformed. Never fails.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_ppm(path) {
            Ok(map) => {
                log::info!("Loaded course map {} ({}x{})", path.display(), map.width, map.height);
                map
            }
            Err(err) => {
                log::warn!(
                    "Could not load course map {}: {err}; using generated course",
                    path.display()
                );
                Self::fallback()
            }
        }
    }

    /// Procedurally generated default course: fairway background with a
    /// start marker, hole, water hazard, bunker, and rough patches.
    pub fn fallback() -> Self {
        let size = MAP_SIZE;
        let mut pixels = vec![[100, 200, 100]; (size * size) as usize];

        let mut paint_rect = |x0: u32, y0: u32, w: u32, h: u32, color: [u8; 3]| {
            for py in y0..(y0 + h).min(size) {
                for px in x0..(x0 + w).min(size) {
                    pixels[(py * size + px) as usize] = color;
                }
            }
        };

        paint_rect(10, 10, 8, 8, [40, 80, 220]); // water
        paint_rect(15, 20, 5, 5, [180, 160, 80]); // bunker
        paint_rect(7, 7, 6, 6, [75, 105, 47]); // rough
        paint_rect(20, 12, 5, 6, [80, 140, 60]); // rough
        paint_rect(4, 24, 3, 3, [200, 40, 40]); // start
        paint_rect(24, 4, 2, 2, [0, 0, 0]); // hole

        Self {
            width: size,
            height: size,
            pixels,
        }
    }
}

fn parse_ppm(data: &[u8]) -> Option<CourseMap> {
    let mut pos = 0usize;

    // Header tokens are whitespace-separated and may carry `#` comments
    let next_token = |data: &[u8], pos: &mut usize| -> Option<String> {
        loop {
            while *pos < data.len() && data[*pos].is_ascii_whitespace() {
                *pos += 1;
            }
            if *pos < data.len() && data[*pos] == b'#' {
                while *pos < data.len() && data[*pos] != b'\n' {
                    *pos += 1;
                }
                continue;
            }
            break;
        }
        let start = *pos;
        while *pos < data.len() && !data[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        (start < *pos).then(|| String::from_utf8_lossy(&data[start..*pos]).into_owned())
    };

    if next_token(data, &mut pos)? != "P6" {
        return None;
    }
    let width: u32 = next_token(data, &mut pos)?.parse().ok()?;
    let height: u32 = next_token(data, &mut pos)?.parse().ok()?;
    let maxval: u32 = next_token(data, &mut pos)?.parse().ok()?;
    if maxval != 255 {
        return None;
    }
    // Exactly one whitespace byte separates the header from the raster
    pos += 1;

    let need = (width as usize).checked_mul(height as usize)?.checked_mul(3)?;
    let raster = data.get(pos..)?;
    if raster.len() < need {
        return None;
    }
    let pixels = raster[..need]
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    CourseMap::from_pixels(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_all_markers() {
        let map = CourseMap::fallback();
        assert!(map.find_hole().is_some());

        // Start marker exists, so the tee is not the world-center default
        let start = map.find_start();
        assert_ne!(start, Vec2::splat(WORLD_SIZE * 0.5));

        // Painted regions classify as expected
        assert_eq!(map.surface_at(map.tile_center(12, 12)), Surface::Water);
        assert_eq!(map.surface_at(map.tile_center(16, 22)), Surface::Sand);
        assert_eq!(map.surface_at(map.tile_center(9, 9)), Surface::Rough);
    }

    #[test]
    fn test_terrain_lookup_clamps_out_of_bounds() {
        let map = CourseMap::fallback();
        // Far outside the world on every side still classifies
        let a = map.terrain_at(Vec2::new(-1000.0, -1000.0));
        let b = map.terrain_at(Vec2::new(0.0, 0.0));
        assert_eq!(a, b);
        let _ = map.terrain_at(Vec2::new(1e6, 1e6));
    }

    #[test]
    fn test_resolution_independent_lookup() {
        // 2x2 map: left half water, right half sand
        let map = CourseMap::from_pixels(
            2,
            2,
            vec![
                [40, 80, 220],
                [180, 160, 80],
                [40, 80, 220],
                [180, 160, 80],
            ],
        )
        .unwrap();

        assert!(map.terrain_at(Vec2::new(100.0, 100.0)).is_hazard);
        assert!(map.terrain_at(Vec2::new(500.0, 500.0)).is_sand);
    }

    #[test]
    fn test_from_pixels_rejects_mismatch() {
        assert!(CourseMap::from_pixels(2, 2, vec![[0, 0, 0]; 3]).is_none());
        assert!(CourseMap::from_pixels(0, 4, vec![]).is_none());
    }

    #[test]
    fn test_ppm_roundtrip() {
        let map = CourseMap::fallback();
        let mut data = format!("P6\n{} {}\n255\n", map.width(), map.height()).into_bytes();
        for px in &map.pixels {
            data.extend_from_slice(px);
        }

        let parsed = parse_ppm(&data).unwrap();
        assert_eq!(parsed.width(), map.width());
        assert_eq!(parsed.pixels, map.pixels);
    }

    #[test]
    fn test_ppm_rejects_garbage() {
        assert!(parse_ppm(b"P5\n2 2\n255\n....").is_none());
        assert!(parse_ppm(b"P6\n2 2\n255\nshort").is_none());
        assert!(parse_ppm(b"").is_none());
    }
}
