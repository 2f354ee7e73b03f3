pub mod codec;
pub mod font;
pub mod window;

pub use font::Font;
pub use window::Window;
