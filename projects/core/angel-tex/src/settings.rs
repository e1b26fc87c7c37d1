//! Codec settings shared by the encode and load paths.

/// Default alpha reference used when packing 1 bit alpha.
pub const DEFAULT_ALPHA_REF: u8 = 128;

/// Settings which affect how pixels are encoded and how textures are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecSettings {
    /// Source alpha at or above this value sets the alpha bit of [`A1R5G5B5`] pixels.
    ///
    /// [`A1R5G5B5`]: crate::TextureFormat::A1R5G5B5
    pub alpha_ref: u8,

    /// Force palette alpha to 255 after loading a texture whose format has no alpha channel.
    pub remove_palette_alpha: bool,
}

impl Default for CodecSettings {
    fn default() -> Self {
        CodecSettingsBuilder::new().build()
    }
}

impl CodecSettings {
    /// Create a settings builder.
    pub fn builder() -> CodecSettingsBuilder {
        CodecSettingsBuilder::new()
    }
}

/// Builder for [`CodecSettings`] with convenient configuration methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecSettingsBuilder {
    alpha_ref: Option<u8>,
    remove_palette_alpha: Option<bool>,
}

impl CodecSettingsBuilder {
    /// Create a new settings builder.
    pub fn new() -> Self {
        Self {
            alpha_ref: None,
            remove_palette_alpha: None,
        }
    }

    /// Set the 1 bit alpha threshold.
    pub fn alpha_ref(mut self, alpha_ref: u8) -> Self {
        self.alpha_ref = Some(alpha_ref);
        self
    }

    /// Set whether palette alpha is discarded for formats without alpha on load.
    pub fn remove_palette_alpha(mut self, remove: bool) -> Self {
        self.remove_palette_alpha = Some(remove);
        self
    }

    /// Build the settings using the configured values.
    pub fn build(self) -> CodecSettings {
        CodecSettings {
            alpha_ref: self.alpha_ref.unwrap_or(DEFAULT_ALPHA_REF),
            remove_palette_alpha: self.remove_palette_alpha.unwrap_or(true),
        }
    }
}
