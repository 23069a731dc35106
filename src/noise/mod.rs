pub mod bitmap;
pub mod error;
pub mod perlin;
pub mod texture;
pub mod upload;

use crate::noise::{
    bitmap::Bitmap,
    error::NoiseError,
    texture::{NoiseParameters, generate_bitmap},
    upload::TextureUploader,
};
use bevy::{platform::collections::HashMap, prelude::*};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Named noise textures to generate at startup.
#[derive(Resource, Clone, Debug)]
pub struct NoiseTextureSettings {
    pub textures: Vec<(String, NoiseParameters)>,
}

impl Default for NoiseTextureSettings {
    fn default() -> Self {
        Self {
            textures: vec![
                ("clouds".to_string(), NoiseParameters::default()),
                (
                    "water".to_string(),
                    NoiseParameters::periodic(8.0, 0.5, 256, 256),
                ),
            ],
        }
    }
}

/// Handles of the generated noise textures, keyed by name.
#[derive(Resource, Clone, Default, Debug)]
pub struct NoiseTextures {
    pub textures: HashMap<String, Handle<Image>>,
}

impl NoiseTextures {
    pub fn get(&self, name: &str) -> Option<Handle<Image>> {
        self.textures.get(name).cloned()
    }
}

/// Generates the textures listed in [`NoiseTextureSettings`] during `Startup`.
pub struct NoiseTexturePlugin;

impl Plugin for NoiseTexturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NoiseTextureSettings>()
            .add_systems(Startup, setup_noise_textures);
    }
}

/// Builds every requested bitmap, then uploads them one at a time.
pub fn setup_noise_textures(
    mut commands: Commands,
    settings: Res<NoiseTextureSettings>,
    mut images: ResMut<Assets<Image>>,
) {
    let start = std::time::Instant::now();
    let mut textures = HashMap::default();
    for (name, result) in generate_all(&settings.textures) {
        match result.and_then(|bitmap| images.upload(bitmap)) {
            Ok(handle) => {
                textures.insert(name, handle);
            }
            Err(err) => error!("Skipping noise texture {name}: {err}"),
        }
    }
    info!(
        "Noise textures ready: {} of {} in {:?}",
        textures.len(),
        settings.textures.len(),
        start.elapsed()
    );
    commands.insert_resource(NoiseTextures { textures });
}

/// Generates independent bitmaps in parallel, keeping the input order.
pub fn generate_all(
    requests: &[(String, NoiseParameters)],
) -> Vec<(String, Result<Bitmap, NoiseError>)> {
    requests
        .par_iter()
        .map(|(name, params)| (name.clone(), generate_bitmap(params)))
        .collect()
}

/// Writes `noise.png` and one grayscale `octaveN.png` per channel into `dir`.
pub fn export_bitmap(bitmap: &Bitmap, dir: &Path) -> Result<Vec<PathBuf>, NoiseError> {
    std::fs::create_dir_all(dir)?;
    let full = dir.join("noise.png");
    bitmap.save_png(&full)?;
    let mut written = vec![full];
    for octave in 0..bitmap::CHANNELS {
        let path = dir.join(format!("octave{octave}.png"));
        bitmap.save_octave_png(octave, &path)?;
        written.push(path);
    }
    Ok(written)
}
