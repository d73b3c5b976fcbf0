use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

mod clock;
mod compositor;
mod config;
mod constants;
mod display;
mod error;
mod frames;
mod logging;
mod schedule;
mod state;

use crate::clock::ClockLabel;
use crate::compositor::FrameCompositor;
use crate::config::{AppConfig, Cli};
use crate::display::Display;
use crate::constants::MAX_FRAME_WAIT;
use crate::schedule::{RepeatingTask, frame_wait};

fn main() -> Result<()> {
    logging::init_logging();

    let config = AppConfig::from(Cli::parse());
    run(config)
}

fn run(config: AppConfig) -> Result<()> {
    // --- Load Animations ---
    // Everything is decoded up front; a bad asset stops us before any window appears
    let compositor = FrameCompositor::load(
        &config.background,
        &config.sprite,
        config.sprite_scale,
        config.background_slowdown,
    )
    .with_context(|| {
        format!(
            "Failed to load animations from {:?} and {:?}",
            config.background, config.sprite
        )
    })?;

    log::info!("animating every {:?}", compositor.delay());

    let (width, height) = compositor.dimensions();
    let mut display = Display::open(width, height, config.label)?;

    let label = ClockLabel::today();
    log::info!("clock starts at {}", label.clock().now());

    // --- Schedule Both Layers ---
    let started = Instant::now();
    let mut animation = RepeatingTask::start(compositor, started);
    let mut clock = RepeatingTask::start(label, started);

    // --- Main Loop ---
    while !display.should_close() {
        let now = Instant::now();

        if let Some(composite) = animation.poll(now) {
            display.present(&composite)?;
        }
        clock.poll(now);

        display.draw(clock.task().text());

        // Sleep until the next frame or the next due tick, whichever is sooner
        let wait = frame_wait(
            Instant::now(),
            [animation.next_due(), clock.next_due()],
            MAX_FRAME_WAIT,
        );
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }

    log::info!(
        "window closed after {} animation ticks",
        animation.task().state().frame_index()
    );
    Ok(())
}
