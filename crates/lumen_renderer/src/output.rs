//! Image sinks: plain-text PPM and PNG.

use crate::renderer::{color_to_rgb8, ImageBuffer};
use std::io::{self, Write};
use std::path::Path;

/// Write the image as plain-text PPM (P3).
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb8(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

/// Save the image as PNG.
pub fn save_png<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> Result<(), image::ImageError> {
    image::save_buffer(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_ppm_header_and_triples() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.set(1, 0, Color::new(0.0, 0.0, 1.0));

        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("2 1"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.next(), Some("255 0 0"));
        assert_eq!(lines.next(), Some("0 0 255"));
        assert_eq!(lines.next(), None);
    }
}
