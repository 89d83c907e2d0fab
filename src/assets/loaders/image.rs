use crate::errors::Result;
use crate::scene::TextureImage;

/// Decodes PNG/JPEG/WebP bytes into RGBA8 pixels.
pub fn decode_texture(bytes: &[u8]) -> Result<TextureImage> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    Ok(TextureImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
