pub mod display;
pub mod protocol;
pub mod segments;
pub mod transport;

pub use display::Display;
pub use segments::{Label, SegmentCoord};
pub use transport::{open_serial, Loopback, Transport};
