//! Frame transmission to a panel chain

use std::io;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::device::protocol::DIGITS_PER_PANEL;
use crate::device::transport::Transport;
use crate::error::{ChainError, Result};
use crate::frame::codec;
use crate::frame::window::Window;

/// How long a blit waits for the chain to echo a frame back.
const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_millis(250);

/// Owns the link to a chain and pushes whole frames down it.
///
/// There is no buffered frame here — every blit is a full-frame send, and
/// between blits the chain just keeps showing whatever it last latched.
pub struct Display<T: Transport> {
    transport: T,
    panels: usize,
    drain_timeout: Duration,
}

impl<T: Transport> Display<T> {
    /// Pair a transport with the number of chained panels on it.
    ///
    /// # Panics
    ///
    /// Panics if `panels` is zero.
    pub fn new(transport: T, panels: usize) -> Self {
        assert!(panels > 0, "chain needs at least one panel");
        Self {
            transport,
            panels,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Override how long a blit waits on the echo before giving up.
    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Chain length this display drives.
    pub fn panels(&self) -> usize {
        self.panels
    }

    /// Digits across the whole chain.
    pub fn digits(&self) -> usize {
        self.panels * DIGITS_PER_PANEL
    }

    /// Pack a window and send it as one frame.
    ///
    /// Packs the bits, writes them in a single call, flushes, then drains
    /// the chain's echo so it cannot skew the next frame's timing. A short
    /// write loses the whole frame — there is no partial retry, the caller
    /// re-blits a full frame or not at all.
    ///
    /// # Panics
    ///
    /// Panics if the window was built for a different chain length.
    pub fn blit(&mut self, window: &Window) -> Result<()> {
        assert_eq!(
            window.panels(),
            self.panels,
            "window built for a {}-panel chain, display drives {}",
            window.panels(),
            self.panels
        );

        let frame = codec::pack_msb_first(window.bits())?;
        let written = self.transport.write(&frame)?;
        if written < frame.len() {
            return Err(ChainError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }
        self.transport.flush()?;
        self.drain(written)
    }

    /// Soak up the echoed copy of a frame, bounded by the drain timeout.
    fn drain(&mut self, count: usize) -> Result<()> {
        let deadline = Instant::now() + self.drain_timeout;
        let mut buf = [0u8; 64];
        let mut drained = 0;
        while drained < count {
            let want = buf.len().min(count - drained);
            match self.transport.read(&mut buf[..want]) {
                Ok(0) => {
                    if Instant::now() >= deadline {
                        warn!("echo drain timed out after {}/{} bytes", drained, count);
                        break;
                    }
                }
                Ok(n) => drained += n,
                Err(e)
                    if e.kind() == io::ErrorKind::TimedOut
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    if Instant::now() >= deadline {
                        warn!("echo drain timed out after {}/{} bytes", drained, count);
                        break;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
        debug!("blitted {} bytes, drained {}", count, drained);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::transport::Loopback;

    /// Records frames and echoes nothing back.
    #[derive(Default)]
    struct Capture {
        frames: Vec<Vec<u8>>,
    }

    impl io::Write for Capture {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.frames.push(bytes.to_vec());
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl io::Read for Capture {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    /// Accepts only half of whatever is written.
    struct HalfWriter;

    impl io::Write for HalfWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            Ok(bytes.len() / 2)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl io::Read for HalfWriter {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    fn fast_timeout() -> Duration {
        Duration::from_millis(5)
    }

    #[test]
    fn test_blit_sends_one_packed_frame() {
        let mut display =
            Display::new(Capture::default(), 1).with_drain_timeout(fast_timeout());
        let mut window = Window::new(1);
        window.set_pixel(3, 4, 6, true);
        display.blit(&window).unwrap();

        let frames = &display.transport.frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 60);
        // segments a1, a2, a3 sit in the frame's final byte
        assert_eq!(*frames[0].last().unwrap(), 0x0e);
        assert!(frames[0][..59].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_blit_drains_the_echo() {
        let mut display = Display::new(Loopback::new(), 2);
        let window = Window::new(2);
        display.blit(&window).unwrap();
        assert_eq!(display.transport.pending(), 0);
    }

    #[test]
    fn test_short_write_is_fatal_for_the_frame() {
        let mut display = Display::new(HalfWriter, 1).with_drain_timeout(fast_timeout());
        let window = Window::new(1);
        match display.blit(&window) {
            Err(ChainError::ShortWrite { written, expected }) => {
                assert_eq!(written, 30);
                assert_eq!(expected, 60);
            }
            other => panic!("expected ShortWrite, got {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "window built for a 1-panel chain")]
    fn test_mismatched_window_panics() {
        let mut display = Display::new(Loopback::new(), 2);
        display.blit(&Window::new(1)).ok();
    }
}
