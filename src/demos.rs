//! Canned animations for poking at a chain
//!
//! Nothing here knows about the wiring — every routine draws through the
//! public `Window` operations and pushes frames with `blit`, which also
//! makes these a decent smoke test against real hardware.

use std::thread;
use std::time::Duration;

use clap::ValueEnum;

use crate::device::segments::{GRID_HEIGHT, GRID_WIDTH};
use crate::device::{Display, Transport};
use crate::error::Result;
use crate::frame::{Font, Window};

/// Animation selection for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Sweep a lit row down each digit, then a lit column across
    Roll,
    /// Draw and erase the whole chain row by row, then column by column
    Flow,
    /// Snake a trail of lit pixels across the chain
    Chase,
    /// Flash the whole chain on and off
    Blink,
    /// Slide through the firmware's glyph table
    Browse,
}

const ROLL_FRAME: Duration = Duration::from_millis(20);
const FLOW_FRAME: Duration = Duration::from_millis(50);
const CHASE_FRAME: Duration = Duration::from_millis(1);
const BLINK_FRAME: Duration = Duration::from_millis(100);
const BROWSE_FRAME: Duration = Duration::from_millis(100);

/// Sweep a lit row down each digit in turn, then a lit column across each.
pub fn roll<T: Transport>(display: &mut Display<T>) -> Result<()> {
    for digit in 0..display.digits() {
        for row in 0..GRID_HEIGHT {
            let mut window = Window::new(display.panels());
            window.fill_row(digit, row, true);
            display.blit(&window)?;
            thread::sleep(ROLL_FRAME / 2);
        }
    }
    for digit in 0..display.digits() {
        for col in 0..GRID_WIDTH {
            let mut window = Window::new(display.panels());
            window.fill_column(digit, col, true);
            display.blit(&window)?;
            thread::sleep(ROLL_FRAME);
        }
    }
    Ok(())
}

/// Draw then erase the whole chain, top to bottom, then left to right.
pub fn flow<T: Transport>(display: &mut Display<T>) -> Result<()> {
    let mut window = Window::new(display.panels());
    for on in [true, false] {
        for row in 0..GRID_HEIGHT {
            for digit in 0..display.digits() {
                window.fill_row(digit, row, on);
            }
            display.blit(&window)?;
            thread::sleep(FLOW_FRAME);
        }
    }

    let mut window = Window::new(display.panels());
    for on in [true, false] {
        for digit in 0..display.digits() {
            for col in 0..GRID_WIDTH {
                window.fill_column(digit, col, on);
                display.blit(&window)?;
                thread::sleep(FLOW_FRAME);
            }
        }
    }
    Ok(())
}

/// Light pixels one at a time, snaking left to right then right to left.
pub fn chase<T: Transport>(display: &mut Display<T>) -> Result<()> {
    let mut window = Window::new(display.panels());
    let digits = display.digits();
    for row in 0..GRID_HEIGHT {
        let backwards = row % 2 == 1;
        let digit_order: Vec<usize> = if backwards {
            (0..digits).rev().collect()
        } else {
            (0..digits).collect()
        };
        for digit in digit_order {
            let col_order: Vec<usize> = if backwards {
                (0..GRID_WIDTH).rev().collect()
            } else {
                (0..GRID_WIDTH).collect()
            };
            for col in col_order {
                window.set_pixel(digit, col, row, true);
                display.blit(&window)?;
                thread::sleep(CHASE_FRAME);
            }
        }
    }
    Ok(())
}

/// Flash the whole chain on and off.
pub fn blink<T: Transport>(display: &mut Display<T>) -> Result<()> {
    for frame in 0..20 {
        let mut window = Window::new(display.panels());
        if frame % 2 == 1 {
            window.fill_all();
        }
        display.blit(&window)?;
        thread::sleep(BLINK_FRAME);
    }
    Ok(())
}

/// Slide a window of consecutive glyph codes across the whole table.
pub fn browse<T: Transport>(display: &mut Display<T>, font: &Font) -> Result<()> {
    let digits = display.digits();
    for start in 0..=256usize.saturating_sub(digits) {
        let mut window = Window::new(display.panels());
        for digit in 0..digits.min(256) {
            font.render_glyph(&mut window, digit, start + digit)?;
        }
        display.blit(&window)?;
        thread::sleep(BROWSE_FRAME);
    }
    Ok(())
}
