use piet_common::{
    kurbo::{Circle, Rect},
    FontWeight, Piet, PietText, RenderContext, Text, TextAlignment, TextAttribute,
    TextLayoutBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{
    decor, draw_background_image, load_card_image, render, truncate, BackgroundColor, BorderStyle,
    CardImage, Component, DrawOptions, TextCard,
};
use crate::{
    colors,
    draw::baseline_origin,
    error::{CardError, ImageKind},
    fonts::{self, CardFont},
    loader::ImageLoader,
};

pub const CARD_WIDTH: usize = 800;
pub const CARD_HEIGHT: usize = 350;

const MAIN_TEXT_MAX: usize = 40;
const NICKNAME_MAX: usize = 60;
const SECOND_TEXT_MAX: usize = 65;

#[derive(Debug, Clone, Copy)]
enum TextRole {
    Main,
    Nickname,
    Second,
}

/// Welcome/leave-style 800x350 card: waves background, centered text column
/// and a circular avatar with a colored border.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseCardBuilder {
    pub main_text: Option<TextCard>,
    pub nickname_text: Option<TextCard>,
    pub second_text: Option<TextCard>,
    pub background_img_url: Option<String>,
    pub background_color: BackgroundColor,
    pub avatar_img_url: Option<String>,
    pub avatar_border_color: String,
    pub avatar_border_style: BorderStyle,
    pub font_default: CardFont,
    pub color_text_default: String,
}

impl Default for BaseCardBuilder {
    fn default() -> Self {
        Self {
            main_text: None,
            nickname_text: None,
            second_text: None,
            background_img_url: None,
            background_color: BackgroundColor::default(),
            avatar_img_url: None,
            avatar_border_color: "#0CA7FF".to_owned(),
            avatar_border_style: BorderStyle::Fill,
            font_default: CardFont::Nunito,
            color_text_default: "#0CA7FF".to_owned(),
        }
    }
}

impl BaseCardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text above the nickname (for example, "WELCOME").
    pub fn main_text(mut self, main_text: TextCard) -> Self {
        self.main_text = Some(main_text);
        self
    }

    /// Sets the user's nickname.
    pub fn nickname_text(mut self, nickname_text: TextCard) -> Self {
        self.nickname_text = Some(nickname_text);
        self
    }

    /// Sets the text under the nickname.
    pub fn second_text(mut self, second_text: TextCard) -> Self {
        self.second_text = Some(second_text);
        self
    }

    /// Sets the background color (used when no background image is set).
    pub fn background_color(mut self, background_color: BackgroundColor) -> Self {
        self.background_color = background_color;
        self
    }

    /// Sets the background image. Expected size 800x350px.
    pub fn background_img_url(mut self, background_img_url: impl Into<String>) -> Self {
        self.background_img_url = Some(background_img_url.into());
        self
    }

    /// Sets the avatar image.
    pub fn avatar_img_url(mut self, avatar_img_url: impl Into<String>) -> Self {
        self.avatar_img_url = Some(avatar_img_url.into());
        self
    }

    /// Sets the outline color of the avatar.
    pub fn avatar_border_color(mut self, avatar_border_color: impl Into<String>) -> Self {
        self.avatar_border_color = avatar_border_color.into();
        self
    }

    /// Sets how the avatar border is painted (`Fill` suits transparent
    /// avatars).
    pub fn avatar_border_style(mut self, avatar_border_style: BorderStyle) -> Self {
        self.avatar_border_style = avatar_border_style;
        self
    }

    /// Sets the font used when a text slot has no font of its own.
    pub fn font_default(mut self, font_default: CardFont) -> Self {
        self.font_default = font_default;
        self
    }

    /// Sets the color used when a text slot has no color of its own.
    pub fn color_text_default(mut self, color_text_default: impl Into<String>) -> Self {
        self.color_text_default = color_text_default.into();
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
            rc.save()?;
            if let Some(url) = &self.background_img_url {
                draw_background_image(rc, loader, url, canvas_width, canvas_height, options.object_fit)?;
            } else {
                let rect = Rect::new(0.0, 0.0, canvas_width, canvas_height);
                rc.fill(rect, &colors::resolve(&self.background_color.background)?);
                if let Some(accent) = &self.background_color.accent {
                    decor::draw_waves(rc, decor::BASE_WAVES, accent)?;
                }
            }
            rc.restore()?;
            info!("background drawn");
        }

        let mut text = PietText::new();

        if options.wants(Component::MainText) {
            if let Some(main) = &self.main_text {
                self.draw_centered(rc, &mut text, main, TextRole::Main, 225.0)?;
            }
        }

        if options.wants(Component::Nickname) {
            if let Some(nickname) = &self.nickname_text {
                self.draw_centered(rc, &mut text, nickname, TextRole::Nickname, 265.0)?;
            }
        }

        if options.wants(Component::SecondText) {
            if let Some(second) = &self.second_text {
                self.draw_centered(rc, &mut text, second, TextRole::Second, 310.0)?;
            }
        }

        if options.wants(Component::AvatarBorder) {
            let border = colors::resolve(&self.avatar_border_color)?;
            match self.avatar_border_style {
                BorderStyle::Stroke => {
                    rc.stroke(Circle::new((400.0, 100.0), 77.5), &border, 5.0);
                }
                BorderStyle::Fill => {
                    rc.fill(Circle::new((400.0, 100.0), 80.0), &border);
                }
            }
        }

        // A fill-style border hides the avatar edge, so redrawing the border
        // alone must repaint the avatar on top of it as well.
        let wants_avatar = options.wants(Component::Avatar)
            || (options.wants(Component::AvatarBorder)
                && self.avatar_border_style == BorderStyle::Fill);
        if wants_avatar {
            if let Some(url) = &self.avatar_img_url {
                rc.save()?;
                rc.clip(Circle::new((400.0, 100.0), 75.0));
                let image = load_card_image(rc, loader, url, ImageKind::Avatar)?;
                rc.draw_image(
                    &image,
                    Rect::new(325.0, 25.0, 475.0, 175.0),
                    piet_common::InterpolationMode::Bilinear,
                );
                rc.restore()?;
                info!("avatar drawn");
            }
        }

        Ok(())
    }

    /// Allocates the 800x350 surface, draws and returns the raster.
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

    fn draw_centered(
        &self,
        rc: &mut Piet<'_>,
        text: &mut PietText,
        card_text: &TextCard,
        role: TextRole,
        baseline_y: f64,
    ) -> Result<(), CardError> {
        let (weight, size, max_len) = match role {
            TextRole::Main => (FontWeight::EXTRA_BOLD, 48.0, MAIN_TEXT_MAX),
            TextRole::Nickname => (FontWeight::BOLD, 35.0, NICKNAME_MAX),
            TextRole::Second => (FontWeight::SEMI_BOLD, 33.0, SECOND_TEXT_MAX),
        };
        let content = if matches!(role, TextRole::Main) {
            truncate(&card_text.content.to_uppercase(), max_len)
        } else {
            truncate(&card_text.content, max_len)
        };

        let font = fonts::piet_family(text, card_text.font.unwrap_or(self.font_default));
        let color = colors::resolve(card_text.color.as_deref().unwrap_or(&self.color_text_default))?;
        let layout = text
            .new_text_layout(content)
            .font(font, size)
            .default_attribute(TextAttribute::Weight(weight))
            .text_color(color)
            .max_width(CARD_WIDTH as f64)
            .alignment(TextAlignment::Center)
            .build()?;
        rc.draw_text(&layout, baseline_origin(&layout, 0.0, baseline_y));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::testutil::{assert_close, FailingLoader, SolidLoader};
    use crate::cards::welcome::welcome_card;

    #[test]
    fn welcome_card_end_to_end() {
        let loader = SolidLoader {
            rgba: [0, 128, 0, 255],
            size: 150,
        };
        let card = welcome_card("http://cdn.example/avatar.png", TextCard::new("Bobish"))
            .second_text(TextCard::new("welcome to the guild"))
            .build(&loader, &DrawOptions::default())
            .unwrap();

        assert_eq!((card.width(), card.height()), (800, 350));
        // The clipped avatar covers the circle center.
        assert_close(card.pixel(400, 100).unwrap(), [0, 128, 0, 255]);
        // The border ring sits between the avatar radius and border radius.
        assert_close(card.pixel(478, 100).unwrap(), [0x0C, 0xA7, 0xFF, 255]);
    }

    #[test]
    fn avatar_load_failure_names_the_avatar() {
        let card = BaseCardBuilder::new().avatar_img_url("http://cdn.example/missing.png");
        let err = card.build(&FailingLoader, &DrawOptions::default()).unwrap_err();
        match err {
            CardError::ImageLoad { kind, .. } => assert_eq!(kind, ImageKind::Avatar),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn only_background_skips_the_avatar() {
        // The loader would fail, but the background filter must never reach it.
        let card = BaseCardBuilder::new()
            .avatar_img_url("http://cdn.example/missing.png")
            .background_color(BackgroundColor::plain("#313338"))
            .build(&FailingLoader, &DrawOptions::only([Component::Background]))
            .unwrap();
        assert_close(card.pixel(400, 100).unwrap(), [0x31, 0x33, 0x38, 255]);
    }
}
