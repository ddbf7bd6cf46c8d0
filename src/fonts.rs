//! Font table and process-wide registration.
//!
//! The renderers only reference families by name; actually loading font
//! files into the platform font database is delegated to a [`FontRegistrar`]
//! implementation supplied by the embedding application.

use std::{
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use piet_common::{PietText, Text};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BoxError;

/// Font families the cards can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFont {
    Inter,
    Nunito,
    Manrope,
    #[serde(rename = "Open Sans")]
    OpenSans,
    Raleway,
    #[serde(rename = "Roboto Slab")]
    RobotoSlab,
    #[serde(rename = "Spectral SC")]
    SpectralSC,
    Bellota,
}

impl CardFont {
    /// Family name the font files are registered under.
    pub fn family_name(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Nunito => "Nunito",
            Self::Manrope => "Manrope",
            Self::OpenSans => "Open Sans",
            Self::Raleway => "Raleway",
            Self::RobotoSlab => "Roboto Slab",
            Self::SpectralSC => "Spectral SC",
            Self::Bellota => "Bellota",
        }
    }
}

/// One font file to register.
#[derive(Debug, Clone, Copy)]
pub struct FontSpec {
    /// Path relative to the fonts directory.
    pub file: &'static str,
    pub family: &'static str,
    pub weight: u16,
    pub style: &'static str,
}

const fn spec(file: &'static str, family: &'static str, weight: u16) -> FontSpec {
    FontSpec {
        file,
        family,
        weight,
        style: "normal",
    }
}

/// Every font file the renderers may reference.
pub const FONT_FILES: &[FontSpec] = &[
    spec("Nunito/Nunito-SemiBold.ttf", "Nunito", 600),
    spec("Nunito/Nunito-Bold.ttf", "Nunito", 700),
    spec("Nunito/Nunito-ExtraBold.ttf", "Nunito", 800),
    spec("Manrope/Manrope-SemiBold.ttf", "Manrope", 600),
    spec("Manrope/Manrope-Bold.ttf", "Manrope", 700),
    spec("Manrope/Manrope-ExtraBold.ttf", "Manrope", 800),
    spec("OpenSans/OpenSans-SemiBold.ttf", "Open Sans", 600),
    spec("OpenSans/OpenSans-Bold.ttf", "Open Sans", 700),
    spec("OpenSans/OpenSans-ExtraBold.ttf", "Open Sans", 800),
    spec("Inter/Inter-SemiBold.ttf", "Inter", 600),
    spec("Inter/Inter-Bold.ttf", "Inter", 700),
    spec("Inter/Inter-ExtraBold.ttf", "Inter", 800),
    spec("Raleway/Raleway-SemiBold.ttf", "Raleway", 600),
    spec("Raleway/Raleway-Bold.ttf", "Raleway", 700),
    spec("Raleway/Raleway-ExtraBold.ttf", "Raleway", 800),
    spec("RobotoSlab/RobotoSlab-SemiBold.ttf", "Roboto Slab", 600),
    spec("RobotoSlab/RobotoSlab-Bold.ttf", "Roboto Slab", 700),
    spec("RobotoSlab/RobotoSlab-ExtraBold.ttf", "Roboto Slab", 800),
    spec("SpectralSC/SpectralSC-SemiBold.ttf", "Spectral SC", 600),
    spec("SpectralSC/SpectralSC-Bold.ttf", "Spectral SC", 700),
    spec("SpectralSC/SpectralSC-ExtraBold.ttf", "Spectral SC", 800),
    spec("Bellota/Bellota-Bold.ttf", "Bellota", 700),
];

/// Capability that loads a font file under a family name, typically backed by
/// the platform font database.
pub trait FontRegistrar {
    fn register(
        &mut self,
        path: &Path,
        family: &str,
        weight: u16,
        style: &str,
    ) -> Result<(), BoxError>;
}

static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Registers the whole font table through `registrar`, once per process.
/// Later calls are no-ops.
pub fn register_fonts<R: FontRegistrar>(registrar: &mut R, fonts_dir: &Path) -> Result<(), BoxError> {
    if REGISTERED.load(Ordering::Acquire) {
        return Ok(());
    }
    for font in FONT_FILES {
        registrar.register(&fonts_dir.join(font.file), font.family, font.weight, font.style)?;
        debug!(family = font.family, weight = font.weight, "registered font");
    }
    REGISTERED.store(true, Ordering::Release);
    Ok(())
}

/// Resolves a card font to a piet family, falling back to the system
/// sans-serif when the family is not installed.
pub(crate) fn piet_family(text: &mut PietText, font: CardFont) -> piet_common::FontFamily {
    text.font_family(font.family_name())
        .unwrap_or(piet_common::FontFamily::SANS_SERIF)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct Recorder {
        calls: Vec<(PathBuf, String, u16)>,
    }

    impl FontRegistrar for Recorder {
        fn register(
            &mut self,
            path: &Path,
            family: &str,
            weight: u16,
            _style: &str,
        ) -> Result<(), BoxError> {
            self.calls.push((path.to_owned(), family.to_owned(), weight));
            Ok(())
        }
    }

    #[test]
    fn registration_runs_once() {
        let mut recorder = Recorder { calls: Vec::new() };
        register_fonts(&mut recorder, Path::new("fonts")).unwrap();
        register_fonts(&mut recorder, Path::new("fonts")).unwrap();
        assert_eq!(recorder.calls.len(), FONT_FILES.len());
        assert_eq!(
            recorder.calls[0],
            (
                PathBuf::from("fonts/Nunito/Nunito-SemiBold.ttf"),
                "Nunito".to_owned(),
                600
            )
        );
    }
}
