use piet_common::{
    kurbo::{Point, Rect},
    FontWeight, Piet, PietText, RenderContext, Text, TextAlignment, TextAttribute, TextLayout,
    TextLayoutBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{
    decor, draw_background_image, render, truncate, BackgroundColor, CardImage, Component,
    DrawOptions, TextCard,
};
use crate::{colors, error::CardError, fonts::{self, CardFont}, loader::ImageLoader};

pub const CARD_WIDTH: usize = 1000;
pub const CARD_HEIGHT: usize = 200;

const MAIN_TEXT_MAX: usize = 80;

/// 1000x200 info banner: waves background and a single centered headline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoCardBuilder {
    pub background_color: BackgroundColor,
    pub background_img_url: Option<String>,
    pub main_text: Option<TextCard>,
}

impl InfoCardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the background color (used when no background image is set).
    pub fn background_color(mut self, background_color: BackgroundColor) -> Self {
        self.background_color = background_color;
        self
    }

    /// Sets the background image. Expected size 1000x200px.
    pub fn background_img_url(mut self, background_img_url: impl Into<String>) -> Self {
        self.background_img_url = Some(background_img_url.into());
        self
    }

    /// Sets the headline (for example, "INFO").
    pub fn main_text(mut self, main_text: TextCard) -> Self {
        self.main_text = Some(main_text);
        self
    }

    /// Draws the configured components onto a caller-supplied surface.
    #[instrument(skip(rc, loader))]
    pub fn draw(
        &self,
        rc: &mut Piet<'_>,
        canvas_width: f64,
        canvas_height: f64,
        loader: &dyn ImageLoader,
        options: &DrawOptions,
    ) -> Result<(), CardError> {
        if options.wants(Component::Background) {
            if let Some(url) = &self.background_img_url {
                draw_background_image(rc, loader, url, canvas_width, canvas_height, options.object_fit)?;
            } else {
                let rect = Rect::new(0.0, 0.0, canvas_width, canvas_height);
                rc.fill(rect, &colors::resolve(&self.background_color.background)?);
                if let Some(accent) = &self.background_color.accent {
                    decor::draw_waves(rc, decor::INFO_WAVES, accent)?;
                }
            }
            info!("background drawn");
        }

        if options.wants(Component::MainText) {
            if let Some(main) = &self.main_text {
                let mut text = PietText::new();
                let font = fonts::piet_family(&mut text, main.font.unwrap_or(CardFont::Inter));
                let color = colors::resolve(main.color.as_deref().unwrap_or("#0CA7FF"))?;
                let layout = text
                    .new_text_layout(truncate(&main.content, MAIN_TEXT_MAX))
                    .font(font, 76.0)
                    .default_attribute(TextAttribute::Weight(FontWeight::EXTRA_BOLD))
                    .text_color(color)
                    .max_width(900.0)
                    .alignment(TextAlignment::Center)
                    .build()?;
                // Middle baseline: the headline is vertically centered on the
                // card's midline.
                let origin = Point::new(50.0, canvas_height / 2.0 - layout.size().height / 2.0);
                rc.draw_text(&layout, origin);
            }
        }

        Ok(())
    }

    /// Allocates the 1000x200 surface, draws and returns the raster.
    #[instrument(skip(loader))]
    pub fn build(
        &self,
        loader: &dyn ImageLoader,
        options: &DrawOptions,
    ) -> Result<CardImage, CardError> {
        render(CARD_WIDTH, CARD_HEIGHT, |rc, width, height| {
            self.draw(rc, width, height, loader, options)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::testutil::{assert_close, SolidLoader};

    #[test]
    fn info_card_end_to_end() {
        let loader = SolidLoader {
            rgba: [0, 0, 0, 255],
            size: 1,
        };
        let card = InfoCardBuilder::new()
            .main_text(TextCard::new("Maintenance tonight"))
            .build(&loader, &DrawOptions::default())
            .unwrap();

        assert_eq!((card.width(), card.height()), (1000, 200));
        // The top-left corner sits under the opaque first wave.
        assert_close(card.pixel(10, 10).unwrap(), [0x0C, 0xA7, 0xFF, 255]);
        // The card midline between waves keeps the flat background.
        assert_close(card.pixel(500, 190).unwrap(), [255, 255, 255, 255]);
    }
}
