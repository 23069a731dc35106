use bevy::{log::LogPlugin, prelude::*};
use clap::Parser;
use std::path::PathBuf;

use noisetex::{
    noise::{
        NoiseTexturePlugin, NoiseTextureSettings, export_bitmap,
        texture::{NoiseParameters, generate_bitmap},
    },
    scene::ScenePlugin,
};

/// Layered Perlin noise textures, one octave per RGBA channel.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 4.0)]
    base_frequency: f32,
    /// Amplitude multiplier applied per octave
    #[arg(long, default_value_t = 0.5)]
    persistence: f32,
    #[arg(long, default_value_t = 128)]
    width: u32,
    #[arg(long, default_value_t = 128)]
    height: u32,
    /// Make the texture tile seamlessly
    #[arg(long)]
    periodic: bool,
    /// Write PNGs into this directory and exit instead of opening a window
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

impl Args {
    const fn params(&self) -> NoiseParameters {
        NoiseParameters {
            base_frequency: self.base_frequency,
            persistence: self.persistence,
            width: self.width,
            height: self.height,
            periodic: self.periodic,
        }
    }
}

fn main() -> AppExit {
    let args = Args::parse();

    if let Some(dir) = &args.export {
        // Headless: only the log subscriber is needed
        let mut app = App::new();
        app.add_plugins(LogPlugin::default());
        return export(&args.params(), dir);
    }

    let mut settings = NoiseTextureSettings::default();
    settings
        .textures
        .retain(|(name, _)| name.as_str() != "clouds");
    settings.textures.push(("clouds".to_string(), args.params()));

    App::new()
        .insert_resource(settings)
        .add_plugins((DefaultPlugins, NoiseTexturePlugin, ScenePlugin))
        .run()
}

fn export(params: &NoiseParameters, dir: &std::path::Path) -> AppExit {
    match generate_bitmap(params).and_then(|bitmap| export_bitmap(&bitmap, dir)) {
        Ok(written) => {
            for path in written {
                info!("Wrote {}", path.display());
            }
            AppExit::Success
        }
        Err(err) => {
            error!("Noise export failed: {err}");
            AppExit::error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_to_parameters() {
        let args = Args::parse_from([
            "noisetex",
            "--base-frequency",
            "2.5",
            "--persistence",
            "0.75",
            "--width",
            "64",
            "--height",
            "32",
            "--periodic",
        ]);
        assert_eq!(
            args.params(),
            NoiseParameters {
                base_frequency: 2.5,
                persistence: 0.75,
                width: 64,
                height: 32,
                periodic: true,
            }
        );
        assert!(args.export.is_none());
    }

    #[test]
    fn defaults_match_library_defaults() {
        let args = Args::parse_from(["noisetex", "--export", "out"]);
        assert_eq!(args.params(), NoiseParameters::default());
        assert_eq!(args.export.as_deref(), Some(std::path::Path::new("out")));
    }
}
