use std::f64::consts::PI;

use piet_common::{
    kurbo::{BezPath, Circle, Rect, RoundedRect},
    Color, FontWeight, Piet, PietText, PietTextLayout, RenderContext, Text, TextAttribute,
    TextLayout, TextLayoutBuilder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{
    decor, draw_background_image, load_card_image, render, BackgroundColor, CardImage, Component,
    DrawOptions, TextCard, UserStatus,
};
use crate::{
    colors,
    draw::{baseline_origin, CanvasPath},
    error::{CardError, ImageKind},
    fonts::{self, CardFont},
    loader::ImageLoader,
};

pub const CARD_WIDTH: usize = 1000;
pub const CARD_HEIGHT: usize = 250;

const CORNER_RADIUS: f64 = 30.0;
const RIGHT_MARGIN: f64 = 30.0;

const STATUS_ONLINE: &str = "#57F287";
const STATUS_IDLE: &str = "#faa61a";
const STATUS_DND: &str = "#ed4245";
const STATUS_STREAMING: &str = "#593695";
const STATUS_OFFLINE: &str = "#747f8d";

/// 1000x250 ranking card: bubbles background clipped to rounded corners,
/// notched avatar with a presence badge, pill progress bar and
/// right-justified xp/rank/level text runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCardBuilder {
    pub nickname_text: TextCard,
    pub current_lvl: u64,
    pub current_rank: u64,
    pub current_xp: u64,
    pub required_xp: u64,
    pub user_status: UserStatus,
    pub background_img_url: Option<String>,
    pub background_color: BackgroundColor,
    pub avatar_img_url: Option<String>,
    pub avatar_background_color: String,
    pub avatar_background_enable: bool,
    pub progress_bar_color: String,
    pub current_xp_color: String,
    pub required_xp_color: String,
    pub font_default: CardFont,
    pub color_text_default: String,
    pub lvl_prefix: Option<TextCard>,
    pub rank_prefix: Option<TextCard>,
}

impl RankCardBuilder {
    pub fn new(
        nickname_text: TextCard,
        current_lvl: u64,
        current_rank: u64,
        current_xp: u64,
        required_xp: u64,
        user_status: UserStatus,
    ) -> Self {
        Self {
            nickname_text,
            current_lvl,
            current_rank,
            current_xp,
            required_xp,
            user_status,
            background_img_url: None,
            background_color: BackgroundColor::default(),
            avatar_img_url: None,
            avatar_background_color: "#0CA7FF".to_owned(),
            avatar_background_enable: true,
            progress_bar_color: "#0CA7FF".to_owned(),
            current_xp_color: "#0CA7FF".to_owned(),
            required_xp_color: "#7F8384".to_owned(),
            font_default: CardFont::Nunito,
            color_text_default: "#0CA7FF".to_owned(),
            lvl_prefix: None,
            rank_prefix: None,
        }
    }

    /// Sets the background color (used when no background image is set).
    pub fn background_color(mut self, background_color: BackgroundColor) -> Self {
        self.background_color = background_color;
        self
    }

    /// Sets the background image. Expected size 1000x250px.
    pub fn background_img_url(mut self, background_img_url: impl Into<String>) -> Self {
        self.background_img_url = Some(background_img_url.into());
        self
    }

    /// Sets the avatar image.
    pub fn avatar_img_url(mut self, avatar_img_url: impl Into<String>) -> Self {
        self.avatar_img_url = Some(avatar_img_url.into());
        self
    }

    /// Sets the color of the circle behind the avatar.
    pub fn avatar_background_color(mut self, avatar_background_color: impl Into<String>) -> Self {
        self.avatar_background_color = avatar_background_color.into();
        self
    }

    /// Enables or disables the circle behind the avatar.
    pub fn avatar_background_enable(mut self, avatar_background_enable: bool) -> Self {
        self.avatar_background_enable = avatar_background_enable;
        self
    }

    /// Sets the progress bar color.
    pub fn progress_bar_color(mut self, progress_bar_color: impl Into<String>) -> Self {
        self.progress_bar_color = progress_bar_color.into();
        self
    }

    /// Sets the color of the current experience number.
    pub fn current_xp_color(mut self, current_xp_color: impl Into<String>) -> Self {
        self.current_xp_color = current_xp_color.into();
        self
    }

    /// Sets the color of the required experience number.
    pub fn required_xp_color(mut self, required_xp_color: impl Into<String>) -> Self {
        self.required_xp_color = required_xp_color.into();
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

    /// Sets the text before the level number (default "LVL").
    pub fn lvl_prefix(mut self, lvl_prefix: TextCard) -> Self {
        self.lvl_prefix = Some(lvl_prefix);
        self
    }

    /// Sets the text before the rank number (default "RANK").
    pub fn rank_prefix(mut self, rank_prefix: TextCard) -> Self {
        self.rank_prefix = Some(rank_prefix);
        self
    }

    /// Sets the user's nickname.
    pub fn nickname_text(mut self, nickname_text: TextCard) -> Self {
        self.nickname_text = nickname_text;
        self
    }

    /// Sets the user's current level.
    pub fn current_lvl(mut self, current_lvl: u64) -> Self {
        self.current_lvl = current_lvl;
        self
    }

    /// Sets the user's current rank.
    pub fn current_rank(mut self, current_rank: u64) -> Self {
        self.current_rank = current_rank;
        self
    }

    /// Sets the user's current experience.
    pub fn current_xp(mut self, current_xp: u64) -> Self {
        self.current_xp = current_xp;
        self
    }

    /// Sets the experience required for the next level.
    pub fn required_xp(mut self, required_xp: u64) -> Self {
        self.required_xp = required_xp;
        self
    }

    /// Sets the user's presence.
    pub fn user_status(mut self, user_status: UserStatus) -> Self {
        self.user_status = user_status;
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
        if self.required_xp == 0 {
            return Err(CardError::InvalidProgress {
                current_xp: self.current_xp,
                required_xp: self.required_xp,
            });
        }

        if options.wants(Component::Background) {
            rc.save()?;
            rc.clip(RoundedRect::new(
                0.0,
                0.0,
                canvas_width,
                canvas_height,
                CORNER_RADIUS,
            ));
            if let Some(url) = &self.background_img_url {
                draw_background_image(rc, loader, url, canvas_width, canvas_height, options.object_fit)?;
            } else {
                let rect = Rect::new(0.0, 0.0, canvas_width, canvas_height);
                rc.fill(rect, &colors::resolve(&self.background_color.background)?);
                if let Some(accent) = &self.background_color.accent {
                    decor::draw_bubbles(rc, decor::RANK_BUBBLES, accent)?;
                }
            }
            rc.restore()?;
            info!("background drawn");
        }

        if options.wants(Component::AvatarBorder) && self.avatar_background_enable {
            rc.fill(
                Circle::new((88.0, 101.0), 75.0),
                &colors::resolve(&self.avatar_background_color)?,
            );
        }

        if options.wants(Component::Avatar) || options.wants(Component::AvatarBorder) {
            if let Some(url) = &self.avatar_img_url {
                // The two large arcs leave a notch at the lower right where
                // the status badge sits.
                let mut clip = CanvasPath::new();
                clip.arc(105.0, 125.0, 75.0, 0.0, PI * 0.36, true);
                clip.arc(159.0, 179.0, 23.5, PI * 0.82, PI * 1.68, false);
                clip.arc(105.0, 125.0, 75.0, PI * 0.15, PI * 1.5, true);
                clip.close();

                rc.save()?;
                rc.clip(clip.finish());
                let image = load_card_image(rc, loader, url, ImageKind::Avatar)?;
                rc.draw_image(
                    &image,
                    Rect::new(30.0, 50.0, 180.0, 200.0),
                    piet_common::InterpolationMode::Bilinear,
                );
                rc.restore()?;
                info!("avatar drawn");

                let (badge, badge_color) = status_badge(self.user_status);
                rc.fill(badge, &colors::resolve(badge_color)?);
            }
        }

        if options.wants(Component::ProgressBar) {
            rc.save()?;
            let bar_color = colors::resolve(&self.progress_bar_color)?;
            let track_color = colors::resolve_with_opacity(&self.progress_bar_color, 0.5)?;

            let mut track = CanvasPath::new();
            track.arc(canvas_width - 47.5, 182.5, 17.5, PI * 1.5, PI * 0.5, false);
            track.arc(227.5, 182.5, 17.5, PI * 0.5, PI * 1.5, false);
            let track = track.finish();
            rc.fill(track.clone(), &track_color);
            rc.clip(track);

            let percent = xp_percent(self.current_xp, self.required_xp);
            if percent >= 1 {
                let one_percent = (canvas_width - RIGHT_MARGIN - 210.0) / 100.0;
                let bar_end = one_percent * percent as f64;
                let mut fill = CanvasPath::new();
                fill.arc(192.5 + bar_end, 182.5, 17.5, PI * 1.5, PI * 0.5, false);
                fill.arc(227.5, 182.5, 17.5, PI * 0.5, PI * 1.5, false);
                rc.fill(fill.finish(), &bar_color);
            }
            rc.restore()?;
        }

        let mut text = PietText::new();

        // The xp block lays out right to left from the right margin; the
        // nickname then fits into whatever width is left of it.
        let mut offset_lvl_xp = canvas_width - RIGHT_MARGIN;

        if options.wants(Component::Xp) {
            let font = fonts::piet_family(&mut text, self.font_default);
            let required_color = colors::resolve(&self.required_xp_color)?;
            let current_color = colors::resolve(&self.current_xp_color)?;

            let required = run_layout(
                &mut text,
                &font,
                format!("{} xp", self.required_xp),
                35.0,
                required_color,
            )?;
            let width = required.trailing_whitespace_width();
            rc.draw_text(&required, baseline_origin(&required, offset_lvl_xp - width, 150.0));
            offset_lvl_xp -= width + 3.0;

            let slash = run_layout(&mut text, &font, "/".to_owned(), 35.0, required_color)?;
            let width = slash.trailing_whitespace_width();
            rc.draw_text(&slash, baseline_origin(&slash, offset_lvl_xp - width, 150.0));
            // 3px on either side of the separator.
            offset_lvl_xp -= width + 3.0;

            let current = run_layout(
                &mut text,
                &font,
                self.current_xp.to_string(),
                35.0,
                current_color,
            )?;
            let width = current.trailing_whitespace_width();
            rc.draw_text(&current, baseline_origin(&current, offset_lvl_xp - width, 150.0));
            offset_lvl_xp -= width;
        }

        if options.wants(Component::Nickname) {
            let font = fonts::piet_family(
                &mut text,
                self.nickname_text.font.unwrap_or(self.font_default),
            );
            let color = colors::resolve(
                self.nickname_text
                    .color
                    .as_deref()
                    .unwrap_or(&self.color_text_default),
            )?;
            let max_width = (offset_lvl_xp - 210.0 - 15.0).max(0.0);
            let layout = text
                .new_text_layout(self.nickname_text.content.clone())
                .font(font, 35.0)
                .default_attribute(TextAttribute::Weight(FontWeight::SEMI_BOLD))
                .text_color(color)
                .max_width(max_width)
                .build()?;
            rc.draw_text(&layout, baseline_origin(&layout, 210.0, 150.0));
        }

        let mut offset_rank_x = canvas_width - RIGHT_MARGIN;

        if options.wants(Component::Rank) {
            let prefix = self.rank_prefix.as_ref();
            let font = fonts::piet_family(
                &mut text,
                prefix.and_then(|p| p.font).unwrap_or(self.font_default),
            );
            let content = prefix
                .filter(|p| !p.content.is_empty())
                .map_or("RANK", |p| p.content.as_str());
            let color = colors::resolve(
                prefix
                    .and_then(|p| p.color.as_deref())
                    .unwrap_or(&self.color_text_default),
            )?;

            let number = run_layout(
                &mut text,
                &font,
                self.current_rank.to_string(),
                60.0,
                color,
            )?;
            let width = number.trailing_whitespace_width();
            rc.draw_text(&number, baseline_origin(&number, offset_rank_x - width, 75.0));
            offset_rank_x -= width;

            let label = run_layout(&mut text, &font, format!(" {content} "), 35.0, color)?;
            let width = label.trailing_whitespace_width();
            rc.draw_text(&label, baseline_origin(&label, offset_rank_x - width, 75.0));
            offset_rank_x -= width;
        }

        if options.wants(Component::Lvl) {
            let prefix = self.lvl_prefix.as_ref();
            let font = fonts::piet_family(
                &mut text,
                prefix.and_then(|p| p.font).unwrap_or(self.font_default),
            );
            let content = prefix
                .filter(|p| !p.content.is_empty())
                .map_or("LVL", |p| p.content.as_str());
            let color = colors::resolve(
                prefix
                    .and_then(|p| p.color.as_deref())
                    .unwrap_or(&self.color_text_default),
            )?;

            let number = run_layout(&mut text, &font, self.current_lvl.to_string(), 60.0, color)?;
            let width = number.trailing_whitespace_width();
            rc.draw_text(&number, baseline_origin(&number, offset_rank_x - width, 75.0));
            offset_rank_x -= width;

            let label = run_layout(&mut text, &font, format!("{content} "), 35.0, color)?;
            let width = label.trailing_whitespace_width();
            rc.draw_text(&label, baseline_origin(&label, offset_rank_x - width, 75.0));
        }

        Ok(())
    }

    /// Allocates the 1000x250 surface, draws and returns the raster.
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

fn run_layout(
    text: &mut PietText,
    font: &piet_common::FontFamily,
    content: String,
    size: f64,
    color: Color,
) -> Result<PietTextLayout, CardError> {
    Ok(text
        .new_text_layout(content)
        .font(font.clone(), size)
        .default_attribute(TextAttribute::Weight(FontWeight::SEMI_BOLD))
        .text_color(color)
        .build()?)
}

/// Progress as a whole percentage, truncated toward zero.
fn xp_percent(current_xp: u64, required_xp: u64) -> u64 {
    ((current_xp as f64 / required_xp as f64) * 100.0).floor() as u64
}

/// Badge geometry and color for a presence value. The cut-outs rely on
/// non-zero winding: anticlockwise subpaths punch holes in the clockwise
/// outer circle.
fn status_badge(status: UserStatus) -> (BezPath, &'static str) {
    let mut path = CanvasPath::new();
    let color = match status {
        UserStatus::Online => {
            path.arc(159.0, 179.0, 17.0, 0.0, PI * 2.0, false);
            STATUS_ONLINE
        }
        UserStatus::Idle => {
            path.arc(159.0, 179.0, 17.0, PI * 0.9, PI * 1.6, true);
            path.arc(148.0, 168.0, 17.0, PI * 1.9, PI * 0.6, false);
            STATUS_IDLE
        }
        UserStatus::Dnd => {
            path.arc(151.0, 179.0, 3.5, PI * 1.5, PI * 0.5, true);
            path.arc(167.0, 179.0, 3.5, PI * 0.5, PI * 1.5, true);
            path.close();
            path.arc(159.0, 179.0, 17.0, 0.0, PI * 2.0, false);
            STATUS_DND
        }
        UserStatus::Streaming => {
            path.move_to(168.0, 179.0);
            path.line_to(154.5, 170.0);
            path.line_to(154.5, 188.0);
            path.close();
            path.arc(159.0, 179.0, 17.0, 0.0, PI * 2.0, false);
            STATUS_STREAMING
        }
        UserStatus::Offline => {
            path.arc(159.0, 179.0, 9.0, PI * 1.5, PI * 0.5, true);
            path.arc(159.0, 179.0, 9.0, PI * 0.5, PI * 1.5, true);
            path.close();
            path.arc(159.0, 179.0, 17.0, 0.0, PI * 2.0, false);
            STATUS_OFFLINE
        }
    };
    (path.finish(), color)
}

#[cfg(test)]
mod tests {
    use piet_common::kurbo::Shape;

    use super::*;
    use crate::cards::testutil::{assert_close, FailingLoader, SolidLoader};

    #[test]
    fn xp_percent_truncates_toward_zero() {
        assert_eq!(xp_percent(0, 100), 0);
        assert_eq!(xp_percent(40, 100), 40);
        assert_eq!(xp_percent(100, 100), 100);
        // Just below one percent floors to zero, which skips the fill pill.
        assert_eq!(xp_percent(9, 1000), 0);
    }

    #[test]
    fn each_status_gets_its_own_badge() {
        let statuses = [
            UserStatus::Online,
            UserStatus::Idle,
            UserStatus::Dnd,
            UserStatus::Streaming,
            UserStatus::Offline,
        ];
        let mut seen = Vec::new();
        for status in statuses {
            let (path, color) = status_badge(status);
            assert!(!path.elements().is_empty());
            // All badges stay within the notch area.
            let bbox = path.bounding_box();
            assert!(bbox.x0 >= 130.0 && bbox.x1 <= 188.0, "bbox {bbox:?} for {status:?}");
            assert!(!seen.contains(&color), "duplicate color for {status:?}");
            seen.push(color);
        }
    }

    #[test]
    fn rank_card_end_to_end() {
        tracing_subscriber::fmt().with_test_writer().try_init().ok();

        let loader = SolidLoader {
            rgba: [255, 0, 0, 255],
            size: 150,
        };
        let card = RankCardBuilder::new(
            TextCard::new("EKXZMANE"),
            5,
            3,
            40,
            100,
            UserStatus::Online,
        )
        .avatar_img_url("http://cdn.example/avatar.png")
        .build(&loader, &DrawOptions::default())
        .unwrap();

        assert_eq!((card.width(), card.height()), (1000, 250));
        // Clipped avatar fills its circle.
        assert_close(card.pixel(105, 125).unwrap(), [255, 0, 0, 255]);
        // Green presence badge in the notch.
        assert_close(card.pixel(159, 179).unwrap(), [0x57, 0xF2, 0x87, 255]);
        // 40% progress: the fill pill reaches x=496.5, so x=400 is solid bar
        // color and x=600 only has the translucent track.
        assert_close(card.pixel(400, 182).unwrap(), [0x0C, 0xA7, 0xFF, 255]);
        assert_ne!(card.pixel(600, 182).unwrap(), [0x0C, 0xA7, 0xFF, 255]);
    }

    #[test]
    fn zero_xp_draws_no_fill_pill() {
        let loader = SolidLoader {
            rgba: [255, 0, 0, 255],
            size: 150,
        };
        let card = RankCardBuilder::new(TextCard::new("user"), 1, 1, 0, 100, UserStatus::Online)
            .build(&loader, &DrawOptions::only([Component::ProgressBar]))
            .unwrap();
        // Only the half-opacity track is present at the start of the bar.
        let pixel = card.pixel(240, 182).unwrap();
        assert_ne!(pixel, [0x0C, 0xA7, 0xFF, 255]);
        assert!(pixel[3] > 0, "track should be visible");
    }

    #[test]
    fn full_xp_reaches_the_right_edge_of_the_track() {
        let loader = SolidLoader {
            rgba: [255, 0, 0, 255],
            size: 150,
        };
        let card = RankCardBuilder::new(TextCard::new("user"), 1, 1, 100, 100, UserStatus::Online)
            .build(&loader, &DrawOptions::only([Component::ProgressBar]))
            .unwrap();
        // 100%: the fill arc center sits at 192.5 + 760 = 952.5, matching the
        // track's right pill.
        assert_close(card.pixel(950, 182).unwrap(), [0x0C, 0xA7, 0xFF, 255]);
    }

    #[test]
    fn zero_required_xp_is_rejected() {
        let loader = SolidLoader {
            rgba: [0, 0, 0, 255],
            size: 1,
        };
        let err = RankCardBuilder::new(TextCard::new("user"), 1, 1, 50, 0, UserStatus::Online)
            .build(&loader, &DrawOptions::default())
            .unwrap_err();
        assert!(matches!(err, CardError::InvalidProgress { .. }));
    }

    #[test]
    fn background_load_failure_names_the_background() {
        let err = RankCardBuilder::new(TextCard::new("user"), 1, 1, 1, 100, UserStatus::Online)
            .background_img_url("http://cdn.example/missing.png")
            .build(&FailingLoader, &DrawOptions::default())
            .unwrap_err();
        match err {
            CardError::ImageLoad { kind, .. } => assert_eq!(kind, ImageKind::Background),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn only_background_leaves_other_regions_untouched() {
        let card = RankCardBuilder::new(TextCard::new("user"), 1, 1, 40, 100, UserStatus::Online)
            .background_color(BackgroundColor::plain("#313338"))
            .avatar_img_url("http://cdn.example/avatar.png")
            .build(&FailingLoader, &DrawOptions::only([Component::Background]))
            .unwrap();
        // Rounded corners stay transparent, the body takes the flat color and
        // neither badge nor progress bar was drawn over it.
        assert_eq!(card.pixel(0, 0).unwrap()[3], 0);
        assert_close(card.pixel(500, 125).unwrap(), [0x31, 0x33, 0x38, 255]);
        assert_close(card.pixel(159, 179).unwrap(), [0x31, 0x33, 0x38, 255]);
        assert_close(card.pixel(400, 182).unwrap(), [0x31, 0x33, 0x38, 255]);
    }
}
