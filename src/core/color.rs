use glam::Vec3;

/// Converts a `0xRRGGBB` integer into normalised RGB components.
#[must_use]
pub fn hex_color(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}
