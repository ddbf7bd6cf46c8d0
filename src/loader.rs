//! Image collaborator: fetches and decodes the remote avatar and background
//! images the cards reference by URL.

use tracing::info;

use crate::error::BoxError;

/// A decoded image ready to be put on a surface.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: usize,
    pub height: usize,
    /// Straight (non-premultiplied) RGBA8 pixels, row-major.
    pub pixels: Vec<u8>,
}

/// Capability to load an image from a URL.
///
/// The renderers only consume this trait; how images are fetched, decoded or
/// cached is up to the implementation. A stalled load stalls the render, so
/// callers wanting bounded latency should enforce a timeout here.
pub trait ImageLoader {
    fn load(&self, url: &str) -> Result<LoadedImage, BoxError>;
}

/// Default loader: blocking HTTP fetch plus in-memory decode.
#[derive(Debug, Default)]
pub struct HttpImageLoader {
    client: reqwest::blocking::Client,
}

impl HttpImageLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, url: &str) -> Result<LoadedImage, BoxError> {
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        info!("received image from {url}");
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = (image.width() as usize, image.height() as usize);
        Ok(LoadedImage {
            width,
            height,
            pixels: image.into_raw(),
        })
    }
}
