use crate::noise::{bitmap::Bitmap, error::NoiseError};
use bevy::{
    asset::RenderAssetUsages,
    image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor},
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};

/// Destination for generated bitmaps, typically GPU texture storage.
///
/// Implementations take ownership of the bitmap and return an opaque handle
/// to the resident texture.
pub trait TextureUploader {
    type Handle;

    fn upload(&mut self, bitmap: Bitmap) -> Result<Self::Handle, NoiseError>;
}

impl TextureUploader for Assets<Image> {
    type Handle = Handle<Image>;

    fn upload(&mut self, bitmap: Bitmap) -> Result<Handle<Image>, NoiseError> {
        Ok(self.add(noise_image(bitmap)?))
    }
}

/// Builds a 2D `Rgba8Unorm` image with linear filtering and repeat addressing.
pub fn noise_image(bitmap: Bitmap) -> Result<Image, NoiseError> {
    let limit = wgpu_types::Limits::default().max_texture_dimension_2d;
    if bitmap.width() > limit || bitmap.height() > limit {
        return Err(NoiseError::UploadFailure(format!(
            "{}x{} exceeds the {limit} texel texture limit",
            bitmap.width(),
            bitmap.height()
        )));
    }

    let mut image = Image::new(
        Extent3d {
            width: bitmap.width(),
            height: bitmap.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bitmap.into_raw(),
        TextureFormat::Rgba8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::Descriptor(noise_sampler());
    Ok(image)
}

fn noise_sampler() -> ImageSamplerDescriptor {
    ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        address_mode_w: ImageAddressMode::Repeat,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        ..default()
    }
}
