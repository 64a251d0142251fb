use std::io;

use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::{Display, FrameBuffer, InputSource, Keypad};

use crate::keymap::keymap;

fn sdl_error(err: impl ToString) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

/// Opens a window `scale` times the size of the Chip-8 display, along with
/// the input that reads its keyboard.
pub fn open(scale: u32) -> io::Result<(SdlDisplay, SdlInput)> {
    let sdl = sdl2::init().map_err(sdl_error)?;
    Ok((SdlDisplay::new(&sdl, scale)?, SdlInput::new(&sdl)?))
}

/// # SDL display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// Each frame is uploaded as an RGB24 texture and stretched over a window
/// `scale` times larger.
pub struct SdlDisplay {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl SdlDisplay {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> io::Result<Self> {
        let video_subsystem = sdl.video().map_err(sdl_error)?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(sdl_error)?;
        let canvas = window.into_canvas().build().map_err(sdl_error)?;

        Ok(SdlDisplay {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }
}

/// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
///
/// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
///
/// This creates a black and white rendering by:
/// - Flattening the frame buffer into its pixels in row-major order
/// - Triplicating each pixel to represent its RGB values
/// - Mapping set pixels to full intensity and clear ones to zero
///
/// # Arguments
/// * `frame` a Chip-8 FrameBuffer
fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .pixels()
        .flat_map(|lit| std::iter::repeat(if lit { 255 } else { 0 }).take(3))
        .collect()
}

impl Display for SdlDisplay {
    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(sdl_error)?;

        let pixels = frame_to_sdl_texture(frame);
        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&pixels);
            })
            .map_err(sdl_error)?;

        self.canvas.copy(&texture, None, None).map_err(sdl_error)?;
        self.canvas.present();
        Ok(())
    }
}

/// # SDL input
/// Reads the keyboard state of the SDL window each poll, so keys read as
/// held for exactly as long as they are down.
///
/// Closing the window or pressing Escape requests a quit.
pub struct SdlInput {
    events: sdl2::EventPump,
    quit: bool,
}

impl SdlInput {
    pub fn new(sdl: &sdl2::Sdl) -> io::Result<Self> {
        let events = sdl.event_pump().map_err(sdl_error)?;
        Ok(SdlInput {
            events,
            quit: false,
        })
    }
}

impl InputSource for SdlInput {
    fn poll(&mut self) -> Keypad {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    debug!("quit requested from the window");
                    self.quit = true;
                }
                _ => continue,
            }
        }

        let mut keypad = Keypad::new();
        self.events
            .keyboard_state()
            .pressed_scancodes()
            .filter_map(scancode_key)
            .for_each(|key| keypad.press(key));
        keypad
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn scancode_key(scancode: Scancode) -> Option<u8> {
    Keycode::from_scancode(scancode).and_then(keymap)
}
