//! Planet textures: fetch, decode, fall back, upload
//!
//! A reference is an `http(s)://` URL or a file path. Any failure is logged
//! and replaced by a one-pixel texture of the planet's fallback colour, so a
//! broken link only costs the surface detail.
//!
//! Fetches run on background threads through [`TextureLoader`], so the window
//! opens with fallback colours and each surface is swapped in as it arrives.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use crate::config::PlanetRecord;
use crate::error::TextureError;

/// Fetch the raw bytes behind a texture reference
pub fn fetch_bytes(reference: &str, timeout: Duration) -> Result<Vec<u8>, TextureError> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        let response = ureq::get(reference)
            .timeout(timeout)
            .call()
            .map_err(Box::new)?;
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Ok(bytes)
    } else {
        Ok(std::fs::read(Path::new(reference))?)
    }
}

/// Decode PNG or JPEG bytes to RGBA8
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, TextureError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

pub fn load_image(reference: &str, timeout: Duration) -> Result<RgbaImage, TextureError> {
    decode(&fetch_bytes(reference, timeout)?)
}

/// 1x1 texture of an sRGB colour
pub fn solid_color(color: [f32; 3]) -> RgbaImage {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RgbaImage::from_pixel(
        1,
        1,
        Rgba([channel(color[0]), channel(color[1]), channel(color[2]), 255]),
    )
}

/// Shrink `image` so neither side exceeds `max_dimension`, keeping the aspect
/// ratio. Images already within the limit are borrowed untouched.
pub fn fit_within(image: &RgbaImage, max_dimension: u32) -> Cow<'_, RgbaImage> {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= max_dimension {
        return Cow::Borrowed(image);
    }

    let scale = max_dimension as f64 / longest as f64;
    let shrink = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
    Cow::Owned(image::imageops::resize(
        image,
        shrink(width),
        shrink(height),
        FilterType::Triangle,
    ))
}

/// A planet texture finished loading on a background thread
#[derive(Debug)]
pub struct LoadedTexture {
    /// Index into the planet list
    pub planet: usize,
    pub image: RgbaImage,
}

/// Background texture fetches, one named thread per planet.
///
/// Threads only report successful loads. A failed fetch is logged on its
/// thread and the planet keeps its fallback colour.
pub struct TextureLoader {
    receiver: Receiver<LoadedTexture>,
    finished: bool,
}

impl TextureLoader {
    pub fn spawn(planets: &[PlanetRecord], timeout: Duration, max_dimension: u32) -> Self {
        let (sender, receiver) = mpsc::channel();

        for (index, planet) in planets.iter().enumerate() {
            let sender = sender.clone();
            let name = planet.name.clone();
            let reference = planet.texture.clone();

            let spawned = thread::Builder::new()
                .name(format!("texture-{}", name))
                .spawn(move || match load_image(&reference, timeout) {
                    Ok(image) => {
                        let image = fit_within(&image, max_dimension).into_owned();
                        log::info!(
                            "Loaded texture for {} ({}x{})",
                            name,
                            image.width(),
                            image.height()
                        );
                        // The receiver is gone if the window already closed
                        let _ = sender.send(LoadedTexture {
                            planet: index,
                            image,
                        });
                    }
                    Err(e) => {
                        log::warn!("Texture for {} unavailable ({}): {}", name, reference, e);
                    }
                });

            if let Err(e) = spawned {
                log::warn!("Could not start texture thread for {}: {}", planet.name, e);
            }
        }

        Self {
            receiver,
            finished: planets.is_empty(),
        }
    }

    /// Drain every texture that has arrived since the last call
    pub fn poll(&mut self) -> Vec<LoadedTexture> {
        let mut loaded = Vec::new();
        while !self.finished {
            match self.receiver.try_recv() {
                Ok(texture) => loaded.push(texture),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("All texture threads finished");
                    self.finished = true;
                }
            }
        }
        loaded
    }

    /// True once every loader thread has exited
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Bind group layout for a sampled surface texture (group 1)
pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Surface Texture Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Surface Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Upload an image and wrap it in a ready-to-bind group. Images larger than
/// the device's 2D texture limit are downscaled first.
pub fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    image: &RgbaImage,
    label: &str,
) -> wgpu::BindGroup {
    let max_dimension = device.limits().max_texture_dimension_2d;
    let image = fit_within(image, max_dimension);
    if let Cow::Owned(resized) = &image {
        log::warn!(
            "{} exceeds the {}px texture limit, downscaled to {}x{}",
            label,
            max_dimension,
            resized.width(),
            resized.height()
        );
    }

    let (width, height) = image.dimensions();
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn solid_color_is_one_opaque_pixel() {
        let image = solid_color([1.0, 0.5, 0.0]);
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 128, 0, 255]));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"not an image"), Err(TextureError::Decode(_))));
    }

    #[test]
    fn loads_png_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let mut source = RgbaImage::new(2, 2);
        source.put_pixel(1, 1, Rgba([10, 20, 30, 255]));
        std::fs::write(&path, png_bytes(&source)).unwrap();

        let loaded = load_image(path.to_str().unwrap(), Duration::from_secs(1)).unwrap();
        assert_eq!(loaded, source);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");

        assert!(matches!(
            load_image(missing.to_str().unwrap(), Duration::from_secs(1)),
            Err(TextureError::Io(_))
        ));
    }

    #[test]
    fn one_pixel_over_the_limit_is_shrunk_to_it() {
        let wide = RgbaImage::new(8193, 1);
        let fitted = fit_within(&wide, 8192);
        assert!(matches!(fitted, Cow::Owned(_)));
        assert_eq!(fitted.dimensions(), (8192, 1));
    }

    #[test]
    fn oversized_image_keeps_its_aspect_ratio() {
        let huge = RgbaImage::new(16384, 8192);
        assert_eq!(fit_within(&huge, 8192).dimensions(), (8192, 4096));
        assert_eq!(fit_within(&huge, 2048).dimensions(), (2048, 1024));
    }

    #[test]
    fn image_within_the_limit_is_borrowed() {
        let image = RgbaImage::new(8192, 4096);
        assert!(matches!(fit_within(&image, 8192), Cow::Borrowed(_)));
    }

    fn planet(name: &str, texture: &str) -> PlanetRecord {
        PlanetRecord::new(name, 0.1, 1.0, 0.01, texture, [0.5; 3])
    }

    fn wait_for_all(loader: &mut TextureLoader) -> Vec<LoadedTexture> {
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let mut loaded = Vec::new();
        while !loader.is_finished() {
            assert!(std::time::Instant::now() < deadline, "texture threads never finished");
            loaded.extend(loader.poll());
            thread::sleep(Duration::from_millis(5));
        }
        loaded.sort_by_key(|texture| texture.planet);
        loaded
    }

    #[test]
    fn loader_reports_successes_by_planet_index() {
        let dir = tempfile::tempdir().unwrap();
        let red = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        let blue = RgbaImage::from_pixel(1, 2, Rgba([0, 0, 255, 255]));
        let red_path = dir.path().join("red.png");
        let blue_path = dir.path().join("blue.png");
        std::fs::write(&red_path, png_bytes(&red)).unwrap();
        std::fs::write(&blue_path, png_bytes(&blue)).unwrap();

        let planets = [
            planet("Red", red_path.to_str().unwrap()),
            planet("Gone", dir.path().join("gone.png").to_str().unwrap()),
            planet("Blue", blue_path.to_str().unwrap()),
        ];
        let mut loader = TextureLoader::spawn(&planets, Duration::from_secs(1), 8192);
        let loaded = wait_for_all(&mut loader);

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].planet, 0);
        assert_eq!(loaded[0].image, red);
        assert_eq!(loaded[1].planet, 2);
        assert_eq!(loaded[1].image, blue);
        assert!(loader.poll().is_empty());
    }

    #[test]
    fn loader_downscales_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        std::fs::write(&path, png_bytes(&RgbaImage::new(64, 16))).unwrap();

        let mut loader =
            TextureLoader::spawn(&[planet("Wide", path.to_str().unwrap())], Duration::from_secs(1), 32);
        let loaded = wait_for_all(&mut loader);
        assert_eq!(loaded[0].image.dimensions(), (32, 8));
    }

    #[test]
    fn empty_loader_is_finished_at_once() {
        let mut loader = TextureLoader::spawn(&[], Duration::from_secs(1), 8192);
        assert!(loader.is_finished());
        assert!(loader.poll().is_empty());
    }
}
