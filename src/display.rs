use anyhow::{Result, anyhow, bail};
use image::RgbaImage;
use raylib::prelude::*;

use crate::config::LabelStyle;
use crate::constants::*;

/// Window holding the composite surface and the clock label.
pub struct Display {
    rl: RaylibHandle,
    thread: RaylibThread,
    surface: Texture2D,
    width: u32,
    height: u32,
    style: LabelStyle,
}

impl Display {
    /// Opens a window of exactly `width` x `height` pixels.
    pub fn open(width: u32, height: u32, style: LabelStyle) -> Result<Self> {
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .title(WINDOW_TITLE)
            .build();
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);

        // RGBA8 surface, replaced wholesale on every present
        let blank = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        let surface = rl
            .load_texture_from_image(&thread, &blank)
            .map_err(|e| anyhow!("Failed to create display surface: {}", e))?;
        drop(blank);

        log::info!("window opened at {}x{}", width, height);

        Ok(Self {
            rl,
            thread,
            surface,
            width,
            height,
            style,
        })
    }

    pub fn should_close(&self) -> bool {
        self.rl.window_should_close()
    }

    /// Replaces the displayed image with `composite`.
    pub fn present(&mut self, composite: &RgbaImage) -> Result<()> {
        if composite.dimensions() != (self.width, self.height) {
            bail!(
                "composite is {:?}, display surface is {}x{}",
                composite.dimensions(),
                self.width,
                self.height
            );
        }

        self.surface
            .update_texture(composite.as_raw())
            .map_err(|e| anyhow!("Failed to update display surface: {}", e))
    }

    /// Draws one frame: the latest composite with the clock text on top.
    pub fn draw(&mut self, label: &str) {
        let text_width = self.rl.measure_text(label, self.style.font_size);
        let label_box = LabelBox::place(self.width, self.height, text_width, &self.style);

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&self.surface, 0, 0, Color::WHITE);

        if !label.is_empty() {
            d.draw_rectangle(
                label_box.x,
                label_box.y,
                label_box.width,
                label_box.height,
                self.style.background,
            );
            d.draw_text(
                label,
                label_box.x + self.style.padding,
                label_box.y + self.style.padding,
                self.style.font_size,
                self.style.foreground,
            );
        }
    }
}

/// Screen rectangle of the clock label, anchored at its top-right corner.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LabelBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LabelBox {
    pub fn place(window_width: u32, window_height: u32, text_width: i32, style: &LabelStyle) -> Self {
        let width = text_width + 2 * style.padding;
        let height = style.font_size + 2 * style.padding;
        let right = (window_width as f32 * style.rel_x).floor() as i32;
        let top = (window_height as f32 * style.rel_y).floor() as i32;

        Self {
            x: right - width,
            y: top,
            width,
            height,
        }
    }
}
