use crate::{
    error::Result,
    frame::Frame,
    styles::{Style, Stylizer},
};

/// Cheap deterministic stand-in for the neural stylizer.
///
/// Posterizes the frame and biases the color channels per style index, so
/// each style produces a visually distinct and exactly reproducible output.
/// Determinism keeps tests byte-exact.
pub struct ToyStylizer {
    levels: u8,
}

impl ToyStylizer {
    pub fn new() -> Self {
        Self { levels: 4 }
    }

    /// Use a custom posterization depth (clamped to at least 2 levels)
    pub fn with_levels(levels: u8) -> Self {
        Self {
            levels: levels.max(2),
        }
    }

    fn posterize(&self, value: u8) -> u8 {
        let step = 255 / (self.levels as u16 - 1);
        let bucket = (value as u16 + step / 2) / step;
        (bucket * step).min(255) as u8
    }
}

impl Default for ToyStylizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylizer for ToyStylizer {
    fn stylize(&self, frame: &Frame, style: &Style) -> Result<Frame> {
        let mut out = frame.clone();
        if style.is_passthrough() {
            return Ok(out);
        }

        // Rotate channels by style index so adjacent styles look different
        let rotation = style.index() % 3;
        let bias = (style.index() * 37 % 64) as u8;

        for y in 0..out.height() {
            for x in 0..out.width() {
                let [r, g, b] = out.get_pixel(x, y);
                let channels = [
                    self.posterize(r).saturating_add(bias),
                    self.posterize(g),
                    self.posterize(b),
                ];
                let rotated = [
                    channels[rotation],
                    channels[(rotation + 1) % 3],
                    channels[(rotation + 2) % 3],
                ];
                out.set_pixel(x, y, rotated);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StyleCatalog;

    #[test]
    fn test_passthrough_is_identity() {
        let catalog = StyleCatalog::builtin();
        let stylizer = ToyStylizer::new();
        let frame = Frame::solid(4, [13, 77, 200]);

        let out = stylizer.stylize(&frame, catalog.get(0).unwrap()).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn test_deterministic_output() {
        let catalog = StyleCatalog::builtin();
        let stylizer = ToyStylizer::new();
        let frame = Frame::solid(4, [13, 77, 200]);
        let style = catalog.get(2).unwrap();

        let first = stylizer.stylize(&frame, style).unwrap();
        let second = stylizer.stylize(&frame, style).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_styles_are_distinct() {
        let catalog = StyleCatalog::builtin();
        let stylizer = ToyStylizer::new();
        let frame = Frame::solid(4, [13, 77, 200]);

        let a = stylizer.stylize(&frame, catalog.get(1).unwrap()).unwrap();
        let b = stylizer.stylize(&frame, catalog.get(2).unwrap()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_orientation_preserved() {
        use crate::frame::Orientation;

        let catalog = StyleCatalog::builtin();
        let stylizer = ToyStylizer::new();
        let frame = Frame::solid(4, [1, 2, 3]).with_orientation(Orientation::Mirrored);

        let out = stylizer.stylize(&frame, catalog.get(1).unwrap()).unwrap();
        assert_eq!(out.orientation(), Orientation::Mirrored);
    }
}
