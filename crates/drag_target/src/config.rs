//! Build-time tuning for both variants of the game.

use bevy::prelude::*;
use strum::{Display, EnumString, VariantArray};
use thiserror::Error;

/// Side of the gray target box.
pub const TARGET_SIZE: f32 = 100.0;

/// Length of a countdown, in whole seconds.
pub const COUNTDOWN_SECS: u32 = 10;

pub const BACKGROUND_COLOR: Color = Color::srgb(0.96, 0.96, 0.96);
pub const TARGET_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);

pub mod square {
    pub const BASE_SIZE: f32 = 60.0;
    pub const SHRINK_STEP: f32 = 5.0;
    pub const FLOOR_SIZE: f32 = 30.0;
}

pub mod cloud {
    pub const BASE_SIZE: f32 = 120.0;
    pub const SHRINK_STEP: f32 = 5.0;
    pub const FLOOR_SIZE: f32 = 60.0;
}

/// The two flavours of the game. They only differ in sizes and looks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Variant {
    #[default]
    Square,
    Cloud,
}

/// One entry of a palette. Saturation is in `0.0..=1.0`, hue in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    pub name: &'static str,
    pub hue: f32,
    pub saturation: f32,
}

impl Swatch {
    const fn new(name: &'static str, hue: f32, saturation: f32) -> Self {
        Self {
            name,
            hue,
            saturation,
        }
    }

    /// Fill color for an object of `size` whose size floor is `floor`.
    /// Big objects are pale and darken as they shrink.
    pub fn shade(&self, size: f32, floor: f32) -> Color {
        Color::hsl(
            self.hue,
            self.saturation,
            lightness_for_size(size, floor) / 100.0,
        )
    }
}

/// Lightness percentage used by [`Swatch::shade`], always within `30..=100`.
pub fn lightness_for_size(size: f32, floor: f32) -> f32 {
    0.5f32.mul_add(size - floor, 60.0).clamp(30.0, 100.0)
}

pub const SQUARE_PALETTE: [Swatch; 5] = [
    Swatch::new("red", 0.0, 0.7),
    Swatch::new("blue", 240.0, 0.7),
    Swatch::new("green", 120.0, 0.7),
    Swatch::new("purple", 270.0, 0.7),
    Swatch::new("orange", 30.0, 0.7),
];

pub const CLOUD_PALETTE: [Swatch; 5] = [
    Swatch::new("white", 0.0, 0.0),
    Swatch::new("mist", 210.0, 0.15),
    Swatch::new("sky", 200.0, 0.6),
    Swatch::new("peach", 25.0, 0.8),
    Swatch::new("lilac", 275.0, 0.45),
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("palette has no entries")]
    EmptyPalette,
    #[error("size floor {floor} is above the base size {base}")]
    FloorAboveBase { base: f32, floor: f32 },
    #[error("{what} must be strictly positive, got {value}")]
    NonPositiveSize { what: &'static str, value: f32 },
    #[error("countdown must last at least one second")]
    ZeroCountdown,
    #[error("screen {width}x{height} has no area")]
    NonPositiveScreen { width: f32, height: f32 },
}

/// A play area must have a strictly positive width and height.
pub fn validate_screen(screen: Vec2) -> Result<Vec2, ConfigError> {
    if screen.x > 0.0 && screen.y > 0.0 {
        Ok(screen)
    } else {
        Err(ConfigError::NonPositiveScreen {
            width: screen.x,
            height: screen.y,
        })
    }
}

/// How the draggable object shrinks as the score grows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRule {
    pub base: f32,
    pub step: f32,
    pub floor: f32,
}

impl SizeRule {
    pub fn new(base: f32, step: f32, floor: f32) -> Result<Self, ConfigError> {
        if base <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "base size",
                value: base,
            });
        }
        if floor <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "size floor",
                value: floor,
            });
        }
        if step < 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "shrink step",
                value: step,
            });
        }
        if floor > base {
            return Err(ConfigError::FloorAboveBase { base, floor });
        }
        Ok(Self { base, step, floor })
    }

    /// `max(floor, base - score * step)`
    pub fn size_for(&self, score: u32) -> f32 {
        (score as f32).mul_add(-self.step, self.base).max(self.floor)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub variant: Variant,
    pub size: SizeRule,
    pub target_size: f32,
    pub countdown_secs: u32,
    pub palette: &'static [Swatch],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Square,
            size: SizeRule {
                base: square::BASE_SIZE,
                step: square::SHRINK_STEP,
                floor: square::FLOOR_SIZE,
            },
            target_size: TARGET_SIZE,
            countdown_secs: COUNTDOWN_SECS,
            palette: &SQUARE_PALETTE,
        }
    }
}

impl GameConfig {
    pub fn new(
        variant: Variant,
        size: SizeRule,
        target_size: f32,
        countdown_secs: u32,
        palette: &'static [Swatch],
    ) -> Result<Self, ConfigError> {
        if palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if target_size <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "target size",
                value: target_size,
            });
        }
        if countdown_secs == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        Ok(Self {
            variant,
            size,
            target_size,
            countdown_secs,
            palette,
        })
    }

    pub fn for_variant(variant: Variant) -> Result<Self, ConfigError> {
        let (size, palette): (_, &'static [Swatch]) = match variant {
            Variant::Square => (
                SizeRule::new(square::BASE_SIZE, square::SHRINK_STEP, square::FLOOR_SIZE)?,
                &SQUARE_PALETTE,
            ),
            Variant::Cloud => (
                SizeRule::new(cloud::BASE_SIZE, cloud::SHRINK_STEP, cloud::FLOOR_SIZE)?,
                &CLOUD_PALETTE,
            ),
        };
        Self::new(variant, size, TARGET_SIZE, COUNTDOWN_SECS, palette)
    }

    pub const fn instructions(&self) -> &'static str {
        match self.variant {
            Variant::Square => "Drag the colored square to the gray target",
            Variant::Cloud => "Drag the cloud to the gray target",
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::missing_assert_message,
    reason = "assert_eq output already shows both sides"
)]
mod tests {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn variants_parse_case_insensitively() {
        assert_eq!(Variant::from_str("square"), Ok(Variant::Square));
        assert_eq!(Variant::from_str("Cloud"), Ok(Variant::Cloud));
        assert!(Variant::from_str("triangle").is_err());
        assert_eq!(Variant::Cloud.to_string(), "cloud");
    }

    #[test]
    fn builtin_variants_are_valid() {
        for variant in Variant::VARIANTS {
            let config = GameConfig::for_variant(*variant).expect("builtin config");
            assert_eq!(config.variant, *variant);
            assert_eq!(config.countdown_secs, COUNTDOWN_SECS);
        }
        assert_eq!(
            GameConfig::for_variant(Variant::Square).expect("square"),
            GameConfig::default()
        );
    }

    #[test]
    fn size_shrinks_down_to_the_floor() {
        let rule = SizeRule::new(60.0, 5.0, 30.0).expect("valid rule");
        assert_eq!(rule.size_for(0), 60.0);
        assert_eq!(rule.size_for(1), 55.0);
        assert_eq!(rule.size_for(6), 30.0);
        assert_eq!(rule.size_for(500), 30.0);

        let mut previous = rule.size_for(0);
        for score in 1..40 {
            let size = rule.size_for(score);
            assert!(size <= previous);
            assert!(size >= rule.floor);
            previous = size;
        }
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert_eq!(
            SizeRule::new(30.0, 5.0, 60.0),
            Err(ConfigError::FloorAboveBase {
                base: 30.0,
                floor: 60.0
            })
        );
        assert!(matches!(
            SizeRule::new(0.0, 5.0, 0.0),
            Err(ConfigError::NonPositiveSize { .. })
        ));

        let size = SizeRule::new(60.0, 5.0, 30.0).expect("valid rule");
        assert_eq!(
            GameConfig::new(Variant::Square, size, TARGET_SIZE, 10, &[]),
            Err(ConfigError::EmptyPalette)
        );
        assert_eq!(
            GameConfig::new(Variant::Square, size, TARGET_SIZE, 0, &SQUARE_PALETTE),
            Err(ConfigError::ZeroCountdown)
        );
    }

    #[test]
    fn screens_without_area_are_rejected() {
        assert_eq!(
            validate_screen(Vec2::new(360.0, 640.0)),
            Ok(Vec2::new(360.0, 640.0))
        );
        assert_eq!(
            validate_screen(Vec2::new(0.0, 640.0)),
            Err(ConfigError::NonPositiveScreen {
                width: 0.0,
                height: 640.0
            })
        );
        assert!(validate_screen(Vec2::new(360.0, -1.0)).is_err());
        assert!(validate_screen(Vec2::new(f32::NAN, 640.0)).is_err());
    }

    #[test]
    fn lightness_is_clamped() {
        assert_eq!(lightness_for_size(60.0, 30.0), 75.0);
        assert_eq!(lightness_for_size(30.0, 30.0), 60.0);
        assert_eq!(lightness_for_size(500.0, 30.0), 100.0);
        assert_eq!(lightness_for_size(-200.0, 30.0), 30.0);
    }
}
