use std::path::Path;
use std::time::Duration;

use image::RgbaImage;
use image::imageops;

use crate::constants::*;
use crate::error::AssetError;
use crate::frames::FrameSet;
use crate::schedule::Tick;
use crate::state::AnimationState;

/// Plays a sprite animation on top of a background animation.
///
/// Both layers advance together, once per tick, at the background's native
/// frame duration multiplied by the slowdown.
pub struct FrameCompositor {
    background: FrameSet,
    sprite: FrameSet,
    delay: Duration,
    state: AnimationState,
}

impl FrameCompositor {
    /// Decodes both sources and scales the sprite. Any decode failure is returned
    /// before a single frame is produced.
    pub fn load(
        background_path: &Path,
        sprite_path: &Path,
        sprite_scale: f64,
        slowdown: u32,
    ) -> Result<Self, AssetError> {
        let background = FrameSet::load(background_path)?;
        let sprite = FrameSet::load(sprite_path)?.scaled(sprite_scale)?;

        log::info!(
            "background {:?}: {} frames at {:?}",
            background_path,
            background.len(),
            background.dimensions()
        );
        log::info!(
            "sprite {:?}: {} frames scaled by {} to {:?}",
            sprite_path,
            sprite.len(),
            sprite_scale,
            sprite.dimensions()
        );

        Ok(Self::new(background, sprite, slowdown))
    }

    /// `sprite` is taken as already scaled.
    pub fn new(background: FrameSet, sprite: FrameSet, slowdown: u32) -> Self {
        if background.native_duration().is_none() {
            log::warn!(
                "background declares no frame duration, using {:?}",
                DEFAULT_FRAME_DURATION
            );
        }
        let delay = effective_delay(background.native_duration(), slowdown);

        Self {
            background,
            sprite,
            delay,
            state: AnimationState::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Size of the display surface, which is the background's native size.
    pub fn dimensions(&self) -> (u32, u32) {
        self.background.dimensions()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// `(background, sprite)` frame indices for the current counter.
    pub fn frame_indices(&self) -> (usize, usize) {
        (
            self.state.select(self.background.len()),
            self.state.select(self.sprite.len()),
        )
    }

    /// Builds the composite for `state` without touching the cached frames.
    pub fn composite(&self, state: AnimationState) -> RgbaImage {
        let background = &self.background.frames()[state.select(self.background.len())];
        let sprite = &self.sprite.frames()[state.select(self.sprite.len())];

        let mut composite = background.clone();
        let (x, y) = sprite_anchor(composite.width(), composite.height());
        imageops::overlay(&mut composite, sprite, x, y);
        composite
    }

    /// Produces the current composite and moves to the next frame.
    pub fn animate(&mut self) -> RgbaImage {
        let (background_index, sprite_index) = self.frame_indices();
        log::debug!(
            "tick {}: background frame {}, sprite frame {}",
            self.state.frame_index(),
            background_index,
            sprite_index
        );

        let composite = self.composite(self.state);
        self.state = self.state.advance();
        composite
    }
}

impl Tick for FrameCompositor {
    type Output = RgbaImage;

    fn interval(&self) -> Duration {
        self.delay
    }

    fn tick(&mut self) -> RgbaImage {
        self.animate()
    }
}

/// Native background duration (100 ms when absent) times `slowdown`.
pub fn effective_delay(native: Option<Duration>, slowdown: u32) -> Duration {
    native.unwrap_or(DEFAULT_FRAME_DURATION) * slowdown
}

/// Top-left corner of the sprite on a `width` x `height` composite.
pub fn sprite_anchor(width: u32, height: u32) -> (i64, i64) {
    (
        (width as f64 * SPRITE_ANCHOR_X).floor() as i64,
        (height as f64 * SPRITE_ANCHOR_Y).floor() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::tests::{encode_gif, solid};
    use image::Rgba;
    use std::fs;

    const BG: [u8; 4] = [10, 20, 30, 255];
    const CAT: [u8; 4] = [250, 240, 230, 255];

    fn numbered(count: u8, width: u32, height: u32, alpha: u8) -> Vec<RgbaImage> {
        (0..count).map(|i| solid(width, height, [i, i, i, alpha])).collect()
    }

    fn compositor(bg_frames: u8, sprite_frames: u8, native_ms: Option<u64>, slowdown: u32) -> FrameCompositor {
        let background =
            FrameSet::new(numbered(bg_frames, 100, 100, 255), native_ms.map(Duration::from_millis)).unwrap();
        let sprite = FrameSet::new(numbered(sprite_frames, 10, 10, 255), None).unwrap();
        FrameCompositor::new(background, sprite, slowdown)
    }

    #[test]
    fn delay_is_native_duration_times_slowdown() {
        assert_eq!(effective_delay(None, 3), Duration::from_millis(300));
        assert_eq!(effective_delay(Some(Duration::from_millis(50)), 2), Duration::from_millis(100));
        assert_eq!(compositor(1, 1, None, DEFAULT_BACKGROUND_SLOWDOWN).delay(), Duration::from_millis(300));
    }

    #[test]
    fn anchor_is_fixed_fraction_of_composite() {
        assert_eq!(sprite_anchor(100, 100), (35, 65));
        assert_eq!(sprite_anchor(200, 40), (70, 26));
        assert_eq!(sprite_anchor(1, 1), (0, 0));
    }

    #[test]
    fn four_by_two_scenario_after_five_ticks() {
        let mut compositor = compositor(4, 2, Some(50), 2);
        assert_eq!(compositor.delay(), Duration::from_millis(100));

        for _ in 0..5 {
            compositor.animate();
        }

        assert_eq!(compositor.state().frame_index(), 5);
        assert_eq!(compositor.frame_indices(), (1, 1));
    }

    #[test]
    fn composite_has_background_size_and_uses_selected_frames() {
        let mut compositor = compositor(4, 3, None, 1);
        for n in 0..8u8 {
            let composite = compositor.animate();
            assert_eq!(composite.dimensions(), (100, 100));
            // outside the sprite: background frame n % 4
            assert_eq!(composite.get_pixel(0, 0)[0], n % 4);
            // inside the sprite at (35, 65): sprite frame n % 3
            assert_eq!(composite.get_pixel(36, 66)[0], n % 3);
        }
    }

    #[test]
    fn transparent_sprite_pixels_keep_the_background() {
        let background = FrameSet::new(vec![solid(20, 20, BG)], None).unwrap();
        let mut sprite_frame = solid(4, 4, [0, 0, 0, 0]);
        sprite_frame.put_pixel(1, 1, Rgba(CAT));
        let sprite = FrameSet::new(vec![sprite_frame], None).unwrap();

        let compositor = FrameCompositor::new(background, sprite, 1);
        let composite = compositor.composite(AnimationState::new());
        let (x, y) = sprite_anchor(20, 20);
        let (x, y) = (x as u32, y as u32);

        assert_eq!(composite.get_pixel(x, y), &Rgba(BG));
        assert_eq!(composite.get_pixel(x + 1, y + 1), &Rgba(CAT));
    }

    #[test]
    fn sprite_past_the_edge_is_clipped() {
        let background = FrameSet::new(vec![solid(10, 10, BG)], None).unwrap();
        let sprite = FrameSet::new(vec![solid(8, 8, CAT)], None).unwrap();

        let composite = FrameCompositor::new(background, sprite, 1).composite(AnimationState::new());
        assert_eq!(composite.dimensions(), (10, 10));
        assert_eq!(composite.get_pixel(9, 9), &Rgba(CAT));
        assert_eq!(composite.get_pixel(2, 2), &Rgba(BG));
    }

    #[test]
    fn cached_frames_are_never_mutated() {
        let mut compositor = compositor(2, 1, None, 1);
        let before = compositor.background.frames().to_vec();
        for _ in 0..4 {
            compositor.animate();
        }
        assert_eq!(compositor.background.frames(), before.as_slice());
    }

    #[test]
    fn loads_and_scales_from_files() {
        let dir = std::env::temp_dir();
        let id = std::process::id();
        let bg_path = dir.join(format!("catclock-bg-{id}.gif"));
        let sprite_path = dir.join(format!("catclock-sprite-{id}.gif"));
        fs::write(&bg_path, encode_gif(vec![solid(40, 30, BG); 4], 50)).unwrap();
        fs::write(&sprite_path, encode_gif(vec![solid(20, 10, CAT); 2], 80)).unwrap();

        let compositor = FrameCompositor::load(&bg_path, &sprite_path, DEFAULT_SPRITE_SCALE, 2);
        fs::remove_file(&bg_path).unwrap();
        fs::remove_file(&sprite_path).unwrap();
        let compositor = compositor.unwrap();

        assert_eq!(compositor.dimensions(), (40, 30));
        assert_eq!(compositor.sprite.dimensions(), (12, 6));
        assert_eq!(compositor.sprite.len(), 2);
        assert_eq!(compositor.delay(), Duration::from_millis(100));
    }

    #[test]
    fn missing_sprite_aborts_construction() {
        let dir = std::env::temp_dir();
        let bg_path = dir.join(format!("catclock-lonely-bg-{}.gif", std::process::id()));
        fs::write(&bg_path, encode_gif(vec![solid(4, 4, BG)], 50)).unwrap();

        let result = FrameCompositor::load(&bg_path, &dir.join("catclock-no-sprite.gif"), 0.6, 3);
        fs::remove_file(&bg_path).unwrap();

        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
