/// Decoded pixel data of a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// A colour map referenced by materials.
///
/// The texture exists (and can be bound) before its pixels arrive; `image`
/// and `anisotropy` are filled in place once its own load completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub source: String,
    pub image: Option<TextureImage>,
    pub anisotropy: u16,
    version: u64,
}

impl Texture {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            image: None,
            anisotropy: 1,
            version: 0,
        }
    }

    /// Stores decoded pixels and flags the texture for re-upload.
    pub fn apply_image(&mut self, image: TextureImage, anisotropy: u16) {
        self.image = Some(image);
        self.anisotropy = anisotropy.max(1);
        self.needs_update();
    }

    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    #[inline]
    pub fn needs_update(&mut self) {
        self.version += 1;
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}
