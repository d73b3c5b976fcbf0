use std::time::Duration;

pub const WINDOW_TITLE: &str = "Pixel Cat Animation Near Bike with Clock";
pub const MAX_FRAME_WAIT: Duration = Duration::from_micros(16_667); // Longest idle sleep between frames

pub const DEFAULT_BACKGROUND_PATH: &str = "original-6a159483a08f9d79930f9632e4a97e86.gif";
pub const DEFAULT_SPRITE_PATH: &str = "GuSHJB.gif";

pub const DEFAULT_SPRITE_SCALE: f64 = 0.6;                // Uniform sprite resize ratio
pub const DEFAULT_BACKGROUND_SLOWDOWN: u32 = 3;           // Multiplier on the background's native delay
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(100);

pub const SPRITE_ANCHOR_X: f64 = 0.35;                    // Sprite top-left, fraction of composite width
pub const SPRITE_ANCHOR_Y: f64 = 0.65;                    // Sprite top-left, fraction of composite height

pub const CLOCK_SEED_SECONDS: i64 = 22 * 3600;            // 22:00:00
pub const CLOCK_INTERVAL: Duration = Duration::from_millis(1000);
pub const CLOCK_FORMAT: &str = "%I:%M %p";

pub const LABEL_FONT_SIZE: i32 = 16;
pub const LABEL_PADDING: i32 = 4;
pub const LABEL_REL_X: f32 = 0.95;                        // Right edge of the label
pub const LABEL_REL_Y: f32 = 0.05;                        // Top edge of the label
