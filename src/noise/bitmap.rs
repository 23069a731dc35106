use crate::noise::error::NoiseError;
use image::RgbaImage;
use std::path::Path;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Row-major RGBA8 pixel grid with the origin at the top-left.
///
/// Channel `k` holds the running octave sum after octave `k` has been added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// A fully transparent black bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Wraps an existing buffer, which must hold exactly `width * height` pixels.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, NoiseError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(NoiseError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; CHANNELS]] {
        bytemuck::cast_slice(&self.data)
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; CHANNELS]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Pixel at `(col, row)`. Panics when out of bounds.
    pub fn pixel(&self, col: u32, row: u32) -> [u8; CHANNELS] {
        assert!(
            col < self.width && row < self.height,
            "pixel ({col}, {row}) outside {}x{} bitmap",
            self.width,
            self.height
        );
        self.pixels()[row as usize * self.width as usize + col as usize]
    }

    /// One octave's plane, one byte per pixel.
    pub fn channel(&self, octave: usize) -> Vec<u8> {
        assert!(octave < CHANNELS, "bitmap has no channel {octave}");
        self.pixels().iter().map(|px| px[octave]).collect()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| unreachable!("buffer length is checked on construction"))
    }

    /// Writes the bitmap as an RGBA PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), NoiseError> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }

    /// Writes one octave channel as an opaque grayscale PNG.
    pub fn save_octave_png(&self, octave: usize, path: impl AsRef<Path>) -> Result<(), NoiseError> {
        let layer = self
            .channel(octave)
            .into_iter()
            .flat_map(|v| [v, v, v, 255])
            .collect();
        let bitmap = Self::from_raw(self.width, self.height, layer)?;
        bitmap.save_png(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bitmap {
        let data = (0..2 * 3 * CHANNELS).map(|i| i as u8).collect();
        Bitmap::from_raw(2, 3, data).unwrap()
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = Bitmap::from_raw(4, 4, vec![0; 10]).unwrap_err();
        assert!(matches!(
            err,
            NoiseError::BufferSize {
                expected: 64,
                actual: 10
            }
        ));
    }

    #[test]
    fn pixels_are_row_major() {
        let bitmap = sample();
        assert_eq!(bitmap.pixels().len(), 6);
        assert_eq!(bitmap.pixel(0, 0), [0, 1, 2, 3]);
        assert_eq!(bitmap.pixel(1, 0), [4, 5, 6, 7]);
        assert_eq!(bitmap.pixel(0, 1), [8, 9, 10, 11]);
        assert_eq!(bitmap.pixel(1, 2), [20, 21, 22, 23]);
    }

    #[test]
    fn channel_extracts_one_octave() {
        let bitmap = sample();
        assert_eq!(bitmap.channel(3), vec![3, 7, 11, 15, 19, 23]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn pixel_out_of_bounds_panics() {
        sample().pixel(2, 0);
    }

    #[test]
    fn png_export_round_trips() {
        let dir = std::env::temp_dir().join(format!("noisetex-bitmap-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let bitmap = sample();

        let full = dir.join("full.png");
        bitmap.save_png(&full).unwrap();
        let loaded = image::open(&full).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (2, 3));
        assert_eq!(loaded.as_raw(), bitmap.as_raw());

        let layer = dir.join("octave1.png");
        bitmap.save_octave_png(1, &layer).unwrap();
        let loaded = image::open(&layer).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(1, 0).0, [5, 5, 5, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
