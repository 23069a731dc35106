use crate::noise::{
    bitmap::{Bitmap, CHANNELS},
    error::NoiseError,
    perlin::{perlin, perlin_periodic},
    upload::TextureUploader,
};
use bevy::{log::info, math::Vec2};
use std::time::Instant;

/// Number of octaves summed into a texture, one per RGBA channel.
pub const OCTAVES: usize = CHANNELS;

/// Inputs for one noise texture.
///
/// Only the extent is validated. Frequency and persistence are used as given,
/// so out-of-range values yield flat or saturated channels rather than errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParameters {
    pub base_frequency: f32,
    pub persistence: f32,
    pub width: u32,
    pub height: u32,
    /// Tile seamlessly across the texture edges.
    pub periodic: bool,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            base_frequency: 4.0,
            persistence: 0.5,
            width: 128,
            height: 128,
            periodic: false,
        }
    }
}

impl NoiseParameters {
    /// Parameters for a texture that wraps without seams.
    pub const fn periodic(base_frequency: f32, persistence: f32, width: u32, height: u32) -> Self {
        Self {
            base_frequency,
            persistence,
            width,
            height,
            periodic: true,
        }
    }

    fn validate(&self) -> Result<(), NoiseError> {
        if self.width < 2 || self.height < 2 {
            return Err(NoiseError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// One layer of the octave sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    pub index: usize,
    pub frequency: f32,
    pub amplitude: f32,
}

/// Octave schedule: frequency doubles and amplitude is multiplied by the persistence.
///
/// The first octave is already scaled by `persistence`.
#[derive(Debug, Clone)]
pub struct Octaves {
    next: usize,
    frequency: f32,
    amplitude: f32,
    persistence: f32,
}

pub const fn octaves(base_frequency: f32, persistence: f32) -> Octaves {
    Octaves {
        next: 0,
        frequency: base_frequency,
        amplitude: persistence,
        persistence,
    }
}

impl Iterator for Octaves {
    type Item = Octave;

    fn next(&mut self) -> Option<Octave> {
        if self.next >= OCTAVES {
            return None;
        }
        let octave = Octave {
            index: self.next,
            frequency: self.frequency,
            amplitude: self.amplitude,
        };
        self.next += 1;
        self.frequency *= 2.0;
        self.amplitude *= self.persistence;
        Some(octave)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = OCTAVES.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Octaves {}

/// Synthesizes the RGBA octave bitmap for `params`.
pub fn generate_bitmap(params: &NoiseParameters) -> Result<Bitmap, NoiseError> {
    params.validate()?;
    let start = Instant::now();

    let mut bitmap = Bitmap::new(params.width, params.height);
    let x_factor = 1.0 / (params.width - 1) as f32;
    let y_factor = 1.0 / (params.height - 1) as f32;
    let width = params.width as usize;

    for (i, pixel) in bitmap.pixels_mut().iter_mut().enumerate() {
        let pos = Vec2::new(
            (i % width) as f32 * x_factor,
            (i / width) as f32 * y_factor,
        );
        let mut sum = 0.0;
        for octave in octaves(params.base_frequency, params.persistence) {
            sum += sample(pos, octave.frequency, params.periodic) * octave.amplitude;
            pixel[octave.index] = quantize(sum);
        }
    }

    info!(
        "Generated {}x{} {} noise texture in {:?}",
        params.width,
        params.height,
        if params.periodic { "periodic" } else { "plain" },
        start.elapsed()
    );
    Ok(bitmap)
}

/// Generates the bitmap and hands it to `uploader`, returning the uploaded texture.
pub fn generate<U: TextureUploader>(
    uploader: &mut U,
    params: &NoiseParameters,
) -> Result<U::Handle, NoiseError> {
    let bitmap = generate_bitmap(params)?;
    uploader.upload(bitmap)
}

fn sample(pos: Vec2, frequency: f32, periodic: bool) -> f32 {
    if periodic {
        perlin_periodic(pos * frequency, Vec2::splat(frequency))
    } else {
        perlin(pos * frequency)
    }
}

// Map [-1..1] to [0..255], truncating
fn quantize(sum: f32) -> u8 {
    (((sum + 1.0) / 2.0).clamp(0.0, 1.0) * 255.0) as u8
}
