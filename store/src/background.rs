use crate::error::{ThemeError, ThemeResult};
use crate::persist::write_atomic;
use image::DynamicImage;
use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Upper bound for the background blur level.
pub const MAX_BLUR: u32 = 25;

/// Decoding and blurring of background images.
pub trait ImageService: Send + Sync {
    /// Decode `path` scaled and cropped to fill `width` x `height`.
    ///
    /// Returns `Ok(None)` when the file no longer exists.
    fn decode(&self, path: &Path, width: u32, height: u32) -> ThemeResult<Option<DynamicImage>>;

    fn blur(&self, image: DynamicImage, radius: u32) -> DynamicImage;
}

/// [`ImageService`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterImageService;

impl ImageService for RasterImageService {
    fn decode(&self, path: &Path, width: u32, height: u32) -> ThemeResult<Option<DynamicImage>> {
        if !path.exists() {
            log::warn!("Background image {} is missing", path.display());
            return Ok(None);
        }

        let image = image::open(path)?;
        if width == 0 || height == 0 {
            return Ok(Some(image));
        }
        Ok(Some(image.resize_to_fill(width, height, FilterType::Triangle)))
    }

    fn blur(&self, image: DynamicImage, radius: u32) -> DynamicImage {
        image.blur(radius as f32)
    }
}

/// Background image preferences as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundSettings {
    pub image: Option<String>,
    pub blur: u32,
}

/// Decode the configured background image and blur it when requested.
pub fn resolve(
    images: &dyn ImageService,
    settings: &BackgroundSettings,
    width: u32,
    height: u32,
) -> ThemeResult<Option<DynamicImage>> {
    let Some(path) = settings.image.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Ok(None);
    };

    let Some(image) = images.decode(Path::new(path), width, height)? else {
        return Ok(None);
    };

    if settings.blur == 0 {
        return Ok(Some(image));
    }

    log::debug!("Blurring background {path} with radius {}", settings.blur);
    Ok(Some(images.blur(image, settings.blur)))
}

/// [`resolve`] on the blocking thread pool.
pub async fn resolve_offloaded(
    images: Arc<dyn ImageService>,
    settings: BackgroundSettings,
    width: u32,
    height: u32,
) -> ThemeResult<Option<DynamicImage>> {
    tokio::task::spawn_blocking(move || resolve(images.as_ref(), &settings, width, height))
        .await
        .map_err(|e| ThemeError::Image(format!("Background worker failed: {e}")))?
}

/// Copy `source` into `dir` under a content-addressed name.
///
/// Importing the same picture twice yields the same path.
pub fn import_image(source: &Path, dir: &Path) -> ThemeResult<PathBuf> {
    let bytes = fs::read(source).map_err(|e| ThemeError::io(source, e))?;
    let digest = Sha256::digest(&bytes);

    let mut file_name = format!("{digest:x}");
    if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
        file_name.push('.');
        file_name.push_str(&ext.to_lowercase());
    }

    let target = dir.join(file_name);
    if !target.exists() {
        write_atomic(&target, &bytes)?;
    }
    log::info!("Imported background {} as {}", source.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_checkerboard(path: &Path) {
        let image = RgbImage::from_fn(32, 32, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        image.save(path).unwrap();
    }

    #[test]
    fn test_resolve_without_path_returns_none() {
        let settings = BackgroundSettings::default();
        let result = resolve(&RasterImageService, &settings, 10, 10).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_resolve_blank_path_returns_none() {
        let settings = BackgroundSettings {
            image: Some("  ".to_string()),
            blur: 3,
        };
        assert!(resolve(&RasterImageService, &settings, 10, 10).unwrap().is_none());
    }

    #[test]
    fn test_decode_scales_to_requested_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        write_checkerboard(&path);

        let image = RasterImageService.decode(&path, 16, 8).unwrap().unwrap();
        assert_eq!((image.width(), image.height()), (16, 8));
    }

    #[test]
    fn test_decode_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let decoded = RasterImageService
            .decode(&dir.path().join("gone.png"), 16, 16)
            .unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_import_is_content_addressed() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("holiday.png");
        write_checkerboard(&original);
        let source = dir.path().join("Holiday.PNG");
        fs::copy(&original, &source).unwrap();
        let target_dir = dir.path().join("bgImage");

        let first = import_image(&source, &target_dir).unwrap();
        let second = import_image(&source, &target_dir).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.extension().unwrap(), "png");
        assert_eq!(first.file_stem().unwrap().len(), 64);
        assert_eq!(fs::read(&first).unwrap(), fs::read(&source).unwrap());
    }
}
