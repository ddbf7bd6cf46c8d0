//! Card builders and the configuration value types they share.

pub mod base_card;
pub(crate) mod decor;
pub mod info_card;
pub mod rank_card;
pub mod welcome;

use std::{convert::Infallible, str::FromStr};

use image::ImageEncoder;
use piet_common::{
    kurbo::Rect, Device, Image, ImageFormat, InterpolationMode, Piet, RenderContext,
};
use serde::{Deserialize, Serialize};

use crate::{
    draw::cover_crop,
    error::{BoxError, CardError, ImageKind},
    fonts::CardFont,
    loader::ImageLoader,
};

/// One text slot on a card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextCard {
    pub content: String,
    /// Overrides the card's default text color.
    pub color: Option<String>,
    /// Overrides the card's default font.
    pub font: Option<CardFont>,
}

impl TextCard {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: None,
            font: None,
        }
    }

    pub fn with_color(content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Some(color.into()),
            font: None,
        }
    }
}

/// Truncates to `max_len` characters, ellipsis included.
pub(crate) fn truncate(content: &str, max_len: usize) -> String {
    if content.chars().count() > max_len {
        let kept: String = content.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        content.to_owned()
    }
}

/// Presence value driving the rank card status badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Idle,
    Dnd,
    #[default]
    Offline,
    Streaming,
}

impl FromStr for UserStatus {
    type Err = Infallible;

    /// Unrecognized values fall back to `Offline`, matching the badge's
    /// drawing fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "online" => Self::Online,
            "idle" => Self::Idle,
            "dnd" => Self::Dnd,
            "streaming" => Self::Streaming,
            _ => Self::Offline,
        })
    }
}

/// How the avatar border is painted on base cards. `Fill` suits transparent
/// avatars, `Stroke` draws an outline ring only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Fill,
    Stroke,
}

/// Flat background fill plus an optional decorative overlay color: waves on
/// base and info cards, bubbles on rank cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundColor {
    pub background: String,
    pub accent: Option<String>,
}

impl BackgroundColor {
    pub fn new(background: impl Into<String>, accent: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            accent: Some(accent.into()),
        }
    }

    /// A flat fill with no decorative overlay.
    pub fn plain(background: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            accent: None,
        }
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::new("#FFF", "#0CA7FF")
    }
}

/// Card regions addressable through [`DrawOptions::only`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    Background,
    MainText,
    Nickname,
    SecondText,
    AvatarBorder,
    Avatar,
    Rank,
    Lvl,
    ProgressBar,
    Xp,
}

/// How a background image is fitted onto the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    /// Stretch to the canvas dimensions.
    #[default]
    Fill,
    /// Scale preserving aspect ratio, center-cropping the overflow.
    Cover,
}

/// Options accepted by every `draw`/`build` call.
#[derive(Debug, Clone, Default)]
pub struct DrawOptions {
    /// When set, only the listed components are drawn. Components are
    /// self-contained, so partial redraws need no particular order.
    pub only: Option<Vec<Component>>,
    pub object_fit: ObjectFit,
}

impl DrawOptions {
    pub fn only(components: impl Into<Vec<Component>>) -> Self {
        Self {
            only: Some(components.into()),
            ..Self::default()
        }
    }

    pub(crate) fn wants(&self, component: Component) -> bool {
        self.only
            .as_ref()
            .map_or(true, |only| only.contains(&component))
    }
}

/// A finished card raster (premultiplied RGBA8).
#[derive(Debug, Clone)]
pub struct CardImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CardImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at (x, y), if inside the card.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels
            .get(i..i + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Encodes the card as a PNG buffer.
    pub fn to_png_buffer(&self) -> Result<Vec<u8>, CardError> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        encoder.write_image(&self.pixels, self.width, self.height, image::ColorType::Rgba8)?;
        Ok(buf)
    }
}

/// Allocates a bitmap surface of the card's fixed dimensions, runs `draw` on
/// its render context and hands the rasterized pixels back.
pub(crate) fn render<F>(width: usize, height: usize, draw: F) -> Result<CardImage, CardError>
where
    F: FnOnce(&mut Piet<'_>, f64, f64) -> Result<(), CardError>,
{
    let mut device = Device::new()?;
    let mut bitmap = device.bitmap_target(width, height, 1.0)?;
    {
        let mut rc = bitmap.render_context();
        draw(&mut rc, width as f64, height as f64)?;
        rc.finish()?;
    }
    let buf = bitmap.to_image_buf(ImageFormat::RgbaPremul)?;
    Ok(CardImage {
        width: width as u32,
        height: height as u32,
        pixels: buf.raw_pixels().to_vec(),
    })
}

/// Loads a remote image through the collaborator and puts it on the surface,
/// converting failures into the descriptive image-load error.
pub(crate) fn load_card_image(
    rc: &mut Piet<'_>,
    loader: &dyn ImageLoader,
    url: &str,
    kind: ImageKind,
) -> Result<piet_common::PietImage, CardError> {
    let image = loader.load(url).map_err(|source: BoxError| CardError::ImageLoad {
        kind,
        url: url.to_owned(),
        source,
    })?;
    Ok(rc.make_image(image.width, image.height, &image.pixels, ImageFormat::RgbaSeparate)?)
}

/// Draws the configured background image over the whole canvas, stretched or
/// center-cropped depending on the fit mode.
pub(crate) fn draw_background_image(
    rc: &mut Piet<'_>,
    loader: &dyn ImageLoader,
    url: &str,
    canvas_width: f64,
    canvas_height: f64,
    object_fit: ObjectFit,
) -> Result<(), CardError> {
    let image = load_card_image(rc, loader, url, ImageKind::Background)?;
    let dst = Rect::new(0.0, 0.0, canvas_width, canvas_height);
    match object_fit {
        ObjectFit::Cover => {
            let size = image.size();
            let src = cover_crop(size.width, size.height, canvas_width, canvas_height);
            rc.draw_image_area(&image, src, dst, InterpolationMode::Bilinear);
        }
        ObjectFit::Fill => rc.draw_image(&image, dst, InterpolationMode::Bilinear),
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::error::BoxError;
    use crate::loader::{ImageLoader, LoadedImage};

    /// Returns a solid-color square, so tests never touch the network.
    pub(crate) struct SolidLoader {
        pub rgba: [u8; 4],
        pub size: usize,
    }

    impl ImageLoader for SolidLoader {
        fn load(&self, _url: &str) -> Result<LoadedImage, BoxError> {
            Ok(LoadedImage {
                width: self.size,
                height: self.size,
                pixels: self.rgba.repeat(self.size * self.size),
            })
        }
    }

    pub(crate) struct FailingLoader;

    impl ImageLoader for FailingLoader {
        fn load(&self, url: &str) -> Result<LoadedImage, BoxError> {
            Err(format!("no such image: {url}").into())
        }
    }

    pub(crate) fn assert_close(pixel: [u8; 4], expected: [u8; 4]) {
        for (p, e) in pixel.iter().zip(expected) {
            assert!(
                (i32::from(*p) - i32::from(e)).abs() <= 3,
                "pixel {pixel:?} too far from {expected:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_content() {
        assert_eq!(truncate("WELCOME", 40), "WELCOME");
    }

    #[test]
    fn truncate_replaces_tail_with_ellipsis() {
        let long = "a".repeat(50);
        let truncated = truncate(&long, 40);
        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn user_status_parses_with_offline_fallback() {
        assert_eq!("online".parse::<UserStatus>().unwrap(), UserStatus::Online);
        assert_eq!("streaming".parse::<UserStatus>().unwrap(), UserStatus::Streaming);
        assert_eq!("invisible".parse::<UserStatus>().unwrap(), UserStatus::Offline);
    }

    #[test]
    fn draw_options_filter() {
        let all = DrawOptions::default();
        assert!(all.wants(Component::Background));
        assert!(all.wants(Component::Xp));

        let only = DrawOptions::only([Component::Background, Component::Nickname]);
        assert!(only.wants(Component::Background));
        assert!(only.wants(Component::Nickname));
        assert!(!only.wants(Component::Avatar));
    }

    #[test]
    fn card_image_pixel_indexing() {
        let card = CardImage {
            width: 2,
            height: 2,
            pixels: vec![
                1, 2, 3, 4, 5, 6, 7, 8, //
                9, 10, 11, 12, 13, 14, 15, 16,
            ],
        };
        assert_eq!(card.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(card.pixel(0, 1), Some([9, 10, 11, 12]));
        assert_eq!(card.pixel(2, 0), None);
    }
}
