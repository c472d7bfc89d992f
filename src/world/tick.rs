//! The fixed-period tick loop.
//!
//! Each iteration renders the current room, clears the pressed edges,
//! drains every pending input event, checks for quit, simulates one tick
//! and then sleeps until the next tick boundary. A tick that overruns its
//! period makes the next one start late; missed ticks are not caught up.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace};

use super::controller::KeySlot;
use super::input::{EventSource, InputEvent, Key};
use super::World;
use crate::config::Settings;
use crate::error::Result;
use crate::render::{Canvas, Compositor};
use crate::types::Colour;

/// A monotonic clock the loop can sleep on.
pub trait TickClock {
    fn now(&self) -> Instant;
    fn sleep_until(&mut self, deadline: Instant);
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TickClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&mut self, deadline: Instant) {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Loop configuration.
#[derive(Debug, Clone)]
pub struct TickOptions {
    pub period: Duration,
    pub quit_key: Key,
    pub background: Colour,
    pub compositor: Compositor,
    /// Stop after this many simulated ticks.
    pub max_ticks: Option<u64>,
}

impl TickOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            period: settings.tick_period(),
            quit_key: settings.quit_key,
            background: settings.background,
            compositor: Compositor::from_settings(settings),
            max_ticks: None,
        }
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    /// Simulated ticks.
    pub ticks: u64,
    /// Ticks that started after their boundary.
    pub late_ticks: u64,
    /// Input events drained.
    pub events: u64,
    /// Whether the loop ended on a quit request.
    pub quit: bool,
}

/// Run the loop until quit or `max_ticks`.
pub fn run<C, E, K, F>(
    world: &mut World,
    canvas: &mut C,
    events: &mut E,
    clock: &mut K,
    options: &TickOptions,
    mut simulate: F,
) -> Result<TickStats>
where
    C: Canvas,
    E: EventSource,
    K: TickClock,
    F: FnMut(&mut World),
{
    let mut stats = TickStats::default();
    let mut quit_slot = KeySlot {
        key: Some(options.quit_key),
        ..KeySlot::default()
    };
    let mut boundary = clock.now();

    loop {
        if options.max_ticks.is_some_and(|max| stats.ticks >= max) {
            break;
        }

        canvas.clear(options.background)?;
        options.compositor.render_current_room(world, canvas)?;

        world.prepare_tick();
        quit_slot.pressed = false;

        let mut quit = false;
        while let Some(event) = events.poll() {
            trace!("Input: {:?}", event);
            stats.events += 1;
            match event {
                InputEvent::Quit => quit = true,
                InputEvent::KeyDown(key) if quit_slot.key == Some(key) => {
                    quit_slot.pressed |= !quit_slot.held;
                    quit_slot.held = true;
                }
                InputEvent::KeyUp(key) if quit_slot.key == Some(key) => quit_slot.held = false,
                _ => {}
            }
            world.apply_event(event);
        }

        if quit || quit_slot.pressed {
            debug!("Quit after {} ticks", stats.ticks);
            stats.quit = true;
            break;
        }

        simulate(world);
        stats.ticks += 1;

        boundary += options.period;
        let now = clock.now();
        if now > boundary {
            trace!("Tick {} is late by {:?}", stats.ticks, now - boundary);
            stats.late_ticks += 1;
            boundary = now;
        } else {
            clock.sleep_until(boundary);
        }
    }

    Ok(stats)
}
