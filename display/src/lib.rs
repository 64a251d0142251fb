//! Frontends for the Chip-8 interpreter: implementations of its `Display`
//! and `InputSource` for a terminal and, with the `sdl` feature, an SDL2 window.

pub mod keymap;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod terminal;

#[cfg(feature = "sdl")]
pub use sdl::{open as open_sdl, SdlDisplay, SdlInput};
pub use terminal::{TerminalDisplay, TerminalInput};
