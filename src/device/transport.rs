//! Serial link to the panel chain

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use serialport::SerialPort;
use tracing::info;

/// Byte transport the panel chain hangs off.
///
/// The link is open loop: no framing, no checksums, no negotiation. The
/// only feedback is that the chain shifts every byte it receives back out
/// its far end, so whatever goes in eventually comes back.
pub trait Transport {
    /// Write bytes, returning how many the transport accepted.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Block until everything written has left the host.
    fn flush(&mut self) -> io::Result<()>;

    /// Read up to `buf.len()` echoed bytes. Returning 0 on an empty line is
    /// fine; callers bound their own waiting.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<T: io::Read + io::Write> Transport for T {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        io::Write::write(self, bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(self)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(self, buf)
    }
}

/// Open the serial device the chain is attached to.
///
/// `read_timeout` bounds every read on the port, so a drain against an
/// unplugged chain gives up instead of hanging.
pub fn open_serial(
    path: &str,
    baud: u32,
    read_timeout: Duration,
) -> serialport::Result<Box<dyn SerialPort>> {
    let port = serialport::new(path, baud).timeout(read_timeout).open()?;
    info!("Opened {} at {} baud", path, baud);
    Ok(port)
}

/// In-memory transport with the chain's echo behavior.
///
/// Everything written comes back on the next reads, byte for byte, which is
/// exactly what the hardware does. Lets the whole driver run without a
/// panel attached.
#[derive(Debug, Default)]
pub struct Loopback {
    pending: VecDeque<u8>,
}

impl Loopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Echo bytes still waiting to be read back.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl io::Write for Loopback {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.pending.extend(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for Loopback {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = buf.len().min(self.pending.len());
        for slot in &mut buf[..count] {
            *slot = self.pending.pop_front().unwrap_or_default();
        }
        Ok(count)
    }
}
