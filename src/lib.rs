//! Procedural noise textures: four Perlin octaves packed into the channels of
//! an RGBA8 bitmap, uploaded as Bevy images.

pub mod noise;
pub mod scene;
