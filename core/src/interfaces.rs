//! Narrow seams between the interpreter and the host: the interpreter never
//! knows how frames are shown or where keys come from.

use std::io;

use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;

/// Shows frames. Gets a read-only view of the frame buffer once per tick and
/// may scale it however it likes, as long as pixels keep their positions.
pub trait Display {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()>;
}

/// Supplies keypad snapshots, polled once per tick before the CPU runs.
pub trait InputSource {
    fn poll(&mut self) -> Keypad;

    /// The host wants to stop, e.g. the window was closed.
    fn quit_requested(&self) -> bool {
        false
    }
}

impl<D: Display + ?Sized> Display for &mut D {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        (**self).present(frame)
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn poll(&mut self) -> Keypad {
        (**self).poll()
    }

    fn quit_requested(&self) -> bool {
        (**self).quit_requested()
    }
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        (**self).present(frame)
    }
}

impl<I: InputSource + ?Sized> InputSource for Box<I> {
    fn poll(&mut self) -> Keypad {
        (**self).poll()
    }

    fn quit_requested(&self) -> bool {
        (**self).quit_requested()
    }
}
