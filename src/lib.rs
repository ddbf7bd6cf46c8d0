//! Rendering of small raster "cards": welcome/leave banners, info banners
//! and ranking cards.
//!
//! Each card is a builder holding colors, text and image URLs. `build`
//! allocates a fixed-size bitmap surface, paints background, decorative
//! shapes, avatar, status badge, progress bar and text onto it, and returns
//! the raster for the caller to encode; `draw` paints onto a caller-supplied
//! render context instead. Remote images come in through the [`ImageLoader`]
//! collaborator, fonts are registered once per process through a
//! [`FontRegistrar`].
//!
//! ```no_run
//! use card_canvas::{DrawOptions, HttpImageLoader, RankCardBuilder, TextCard, UserStatus};
//!
//! # fn main() -> Result<(), card_canvas::CardError> {
//! let loader = HttpImageLoader::new();
//! let card = RankCardBuilder::new(TextCard::new("shadow"), 5, 3, 40, 100, UserStatus::Online)
//!     .avatar_img_url("https://cdn.example.com/avatar.png")
//!     .build(&loader, &DrawOptions::default())?;
//! let png = card.to_png_buffer()?;
//! # drop(png);
//! # Ok(())
//! # }
//! ```

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

pub mod cards;
pub mod colors;
mod draw;
pub mod error;
pub mod fonts;
pub mod loader;

pub use cards::{
    base_card::BaseCardBuilder,
    info_card::InfoCardBuilder,
    rank_card::RankCardBuilder,
    welcome::{leave_card, welcome_card},
    BackgroundColor, BorderStyle, CardImage, Component, DrawOptions, ObjectFit, TextCard,
    UserStatus,
};
pub use error::{BoxError, CardError, ImageKind};
pub use fonts::{register_fonts, CardFont, FontRegistrar, FontSpec, FONT_FILES};
pub use loader::{HttpImageLoader, ImageLoader, LoadedImage};
