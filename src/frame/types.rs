use image::{ImageBuffer, Rgb, RgbImage};

/// Orientation metadata carried by a frame.
///
/// Frames produced by the front camera are mirrored so the preview behaves
/// like a mirror; downstream stages must preserve the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    Mirrored,
}

/// A single square image buffer plus orientation metadata.
///
/// This is a thin wrapper around an RGB buffer with the pixel accessors the
/// stylization effects need.
#[derive(Clone, Debug)]
pub struct Frame {
    buffer: RgbImage,
    orientation: Orientation,
}

impl Frame {
    /// Create an upright frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self {
            buffer,
            orientation: Orientation::Upright,
        }
    }

    /// Create a square frame filled with the given color
    pub fn solid(size: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_fn(size, size, |_, _| Rgb(color));
        Self::new(buffer)
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Return the same frame carrying a different orientation flag
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let pixel = self.buffer.get_pixel(x, y);
        [pixel[0], pixel[1], pixel[2]]
    }

    /// Get a mutable reference to a pixel at the given coordinates
    pub fn get_pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let pixel = self.buffer.get_pixel_mut(x, y);
        &mut pixel.0
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.buffer.put_pixel(x, y, Rgb(color));
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation
            && self.buffer.dimensions() == other.buffer.dimensions()
            && self.buffer.as_raw() == other.buffer.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_frame() {
        let frame = Frame::solid(4, [10, 20, 30]);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.get_pixel(3, 3), [10, 20, 30]);
        assert_eq!(frame.orientation(), Orientation::Upright);
    }

    #[test]
    fn test_orientation_flag() {
        let frame = Frame::solid(2, [0, 0, 0]).with_orientation(Orientation::Mirrored);
        assert_eq!(frame.orientation(), Orientation::Mirrored);

        // Same pixels, different orientation: not equal
        let upright = Frame::solid(2, [0, 0, 0]);
        assert_ne!(frame, upright);
    }

    #[test]
    fn test_pixel_mutation() {
        let mut frame = Frame::solid(2, [0, 0, 0]);
        frame.set_pixel(1, 0, [255, 128, 64]);
        assert_eq!(frame.get_pixel(1, 0), [255, 128, 64]);

        let pixel = frame.get_pixel_mut(0, 1);
        pixel[0] = 7;
        assert_eq!(frame.get_pixel(0, 1), [7, 0, 0]);
    }
}
