pub mod config;
pub mod demos;
pub mod device;
pub mod error;
pub mod frame;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::SerialPort;
use tracing::info;

use config::Config;
use demos::Demo;
use device::Display;
use frame::{Font, Window};

/// Main application struct
pub struct App {
    display: Display<Box<dyn SerialPort>>,
    font: Option<Font>,
}

impl App {
    /// Open the link described by the config and get the chain ready
    pub fn open(config: &Config) -> Result<Self> {
        let port = config
            .link
            .port
            .as_deref()
            .context("no serial port configured; pass --port or set link.port in the config")?;

        let transport = device::open_serial(
            port,
            config.link.baud,
            Duration::from_millis(config.link.read_timeout_ms),
        )
        .with_context(|| format!("opening {}", port))?;

        // the controller reboots when the line comes up; wait it out
        thread::sleep(Duration::from_millis(config.link.settle_ms));

        let display = Display::new(transport, config.chain.panels)
            .with_drain_timeout(Duration::from_millis(config.link.drain_timeout_ms));
        info!("Driving a {}-panel chain", config.chain.panels);

        let font = match &config.font.firmware {
            Some(path) => {
                let font = Font::from_file(path)
                    .with_context(|| format!("loading glyph table from {}", path.display()))?;
                info!("Loaded glyph table from {}", path.display());
                Some(font)
            }
            None => None,
        };

        Ok(Self { display, font })
    }

    /// Light every segment on the chain
    pub fn fill(&mut self) -> Result<()> {
        let mut window = Window::new(self.display.panels());
        window.fill_all();
        self.display.blit(&window)?;
        Ok(())
    }

    /// Show a string, one char per digit from the left
    pub fn show_text(&mut self, text: &str) -> Result<()> {
        let font = self
            .font
            .as_ref()
            .context("text rendering needs a firmware dump; set font.firmware or pass --firmware")?;

        let digits = self.display.digits();
        anyhow::ensure!(
            text.chars().count() <= digits,
            "{:?} does not fit a {}-digit chain",
            text,
            digits
        );

        let mut window = Window::new(self.display.panels());
        font.render_text(&mut window, text)?;
        self.display.blit(&window)?;
        Ok(())
    }

    /// Run one animation
    pub fn run_demo(&mut self, demo: Demo) -> Result<()> {
        match demo {
            Demo::Roll => demos::roll(&mut self.display)?,
            Demo::Flow => demos::flow(&mut self.display)?,
            Demo::Chase => demos::chase(&mut self.display)?,
            Demo::Blink => demos::blink(&mut self.display)?,
            Demo::Browse => {
                let font = self.font.as_ref().context(
                    "the browse demo needs a firmware dump; set font.firmware or pass --firmware",
                )?;
                demos::browse(&mut self.display, font)?;
            }
        }
        Ok(())
    }

    /// Cycle through every animation until the process is killed
    ///
    /// The link is open loop, so stopping between frames is always safe;
    /// the chain just keeps showing whatever it last latched.
    pub fn run_cycle(&mut self) -> Result<()> {
        if self.font.is_some() {
            self.run_demo(Demo::Browse)?;
        }
        info!("Cycling animations; Ctrl+C to stop");
        loop {
            self.run_demo(Demo::Chase)?;
            self.run_demo(Demo::Roll)?;
            self.run_demo(Demo::Flow)?;
            self.run_demo(Demo::Blink)?;
        }
    }
}
