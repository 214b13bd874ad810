use anyhow::Context;
use image::GenericImageView;

use crate::resources::load_binary;

/// Raw pixels of a decoded image file.
///
/// `pixels` is always tightly packed RGBA8, whatever the file stored;
/// `channels` records how many channels the file itself had.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    pub fn from_image(img: &image::DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            pixels: img.to_rgba8().into_raw(),
            width,
            height,
            channels: img.color().channel_count(),
        }
    }

    /// Decode image file contents; the format is guessed from the bytes.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&img))
    }
}

/// Read and decode an image asset.
pub fn load_image(file_name: &str) -> anyhow::Result<DecodedImage> {
    let data = load_binary(file_name)?;
    let image = DecodedImage::from_bytes(&data)
        .with_context(|| format!("failed to decode texture {file_name}"))?;
    if image.width == 0 || image.height == 0 {
        anyhow::bail!("texture {file_name} has no pixels");
    }
    log::info!(
        "decoded {file_name}: {}x{}, {} channel(s)",
        image.width,
        image.height,
        image.channels
    );
    Ok(image)
}
