use std::path::PathBuf;

use clap::Parser;
use raylib::prelude::Color;

use crate::constants::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated background and sprite with a pixel clock", long_about = None)]
pub struct Cli {
    /// Animated background image.
    #[arg(default_value = DEFAULT_BACKGROUND_PATH)]
    pub background: PathBuf,
    /// Animated sprite drawn over the background.
    #[arg(default_value = DEFAULT_SPRITE_PATH)]
    pub sprite: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub background: PathBuf,
    pub sprite: PathBuf,
    pub sprite_scale: f64,
    pub background_slowdown: u32,
    pub label: LabelStyle,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            background: cli.background,
            sprite: cli.sprite,
            sprite_scale: DEFAULT_SPRITE_SCALE,
            background_slowdown: DEFAULT_BACKGROUND_SLOWDOWN,
            label: LabelStyle::default(),
        }
    }
}

/// Look of the clock overlay. Has no effect on what the clock shows.
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub font_size: i32,
    pub padding: i32,
    pub foreground: Color,
    pub background: Color,
    /// Right edge of the label as a fraction of window width.
    pub rel_x: f32,
    /// Top edge of the label as a fraction of window height.
    pub rel_y: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: LABEL_FONT_SIZE,
            padding: LABEL_PADDING,
            foreground: Color::new(0, 128, 0, 255),
            background: Color::BLACK,
            rel_x: LABEL_REL_X,
            rel_y: LABEL_REL_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bundled_assets() {
        let config = AppConfig::from(Cli::parse_from(["catclock"]));
        assert_eq!(config.background, PathBuf::from(DEFAULT_BACKGROUND_PATH));
        assert_eq!(config.sprite, PathBuf::from(DEFAULT_SPRITE_PATH));
        assert_eq!(config.sprite_scale, 0.6);
        assert_eq!(config.background_slowdown, 3);
    }

    #[test]
    fn positional_paths_override_defaults() {
        let config = AppConfig::from(Cli::parse_from(["catclock", "bike.gif", "cat.gif"]));
        assert_eq!(config.background, PathBuf::from("bike.gif"));
        assert_eq!(config.sprite, PathBuf::from("cat.gif"));
    }

    #[test]
    fn rejects_flags() {
        assert!(Cli::try_parse_from(["catclock", "--scale", "2"]).is_err());
    }
}
