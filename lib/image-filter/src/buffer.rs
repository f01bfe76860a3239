use crate::{Effect, Filter, ImageFilterError, ImageFilterResult};
use image::{ImageError, ImageReader, RgbImage};
use std::path::{Path, PathBuf};

/// Shows an image and returns once the user has dismissed it.
pub trait Viewer {
    fn show(&self, title: &str, image: &RgbImage) -> ImageFilterResult<()>;
}

/// Decoded 8-bit RGB pixels together with the path they came from.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    pixels: Option<RgbImage>,
    source_path: Option<PathBuf>,
}

impl ImageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the image at `path`. The format is sniffed from the file
    /// content first and from the extension otherwise; alpha is dropped.
    pub fn load(path: impl AsRef<Path>) -> ImageFilterResult<Self> {
        let path = path.as_ref();

        let decoded = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(ImageError::IoError)
            .and_then(|reader| reader.decode())
            .map_err(|source| ImageFilterError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let pixels = decoded.to_rgb8();
        log::debug!(
            "loaded {} ({}x{}, {:?})",
            path.display(),
            pixels.width(),
            pixels.height(),
            decoded.color()
        );

        Ok(Self {
            pixels: Some(pixels),
            source_path: Some(path.to_path_buf()),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn pixels(&self) -> Option<&RgbImage> {
        self.pixels.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.pixels.as_ref().map(|img| img.dimensions())
    }

    pub fn apply(&mut self, filter: &Filter) -> ImageFilterResult<()> {
        let pixels = self.pixels.as_mut().ok_or(ImageFilterError::EmptyBuffer)?;
        filter.apply(pixels);
        log::debug!("applied {} filter", filter.name());

        Ok(())
    }

    /// Encode to `path`, picking the format from its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageFilterResult<()> {
        let path = path.as_ref();

        let pixels = match &self.pixels {
            Some(img) if img.width() > 0 && img.height() > 0 => img,
            _ => return Err(ImageFilterError::EmptyBuffer),
        };

        pixels.save(path).map_err(|source| ImageFilterError::Save {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("saved {}", path.display());
        Ok(())
    }

    /// Blocks inside `viewer` until dismissal. Nothing happens when empty.
    pub fn display(&self, title: &str, viewer: &dyn Viewer) -> ImageFilterResult<()> {
        match &self.pixels {
            Some(img) => viewer.show(title, img),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterChoice, GrayscaleConfig};
    use image::{Rgb, Rgba, RgbaImage};
    use std::{cell::RefCell, fs};
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingViewer {
        shown: RefCell<Vec<(String, (u32, u32))>>,
    }

    impl Viewer for RecordingViewer {
        fn show(&self, title: &str, image: &RgbImage) -> ImageFilterResult<()> {
            self.shown
                .borrow_mut()
                .push((title.to_string(), image.dimensions()));
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        match ImageBuffer::load(&missing) {
            Err(ImageFilterError::Load { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_not_an_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.png");
        fs::write(&path, "definitely not a png").unwrap();

        assert!(matches!(
            ImageBuffer::load(&path),
            Err(ImageFilterError::Load { .. })
        ));
    }

    #[test]
    fn test_load_drops_alpha() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rgba.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40])).save(&path)?;

        let buffer = ImageBuffer::load(&path)?;
        assert!(buffer.is_loaded());
        assert_eq!(buffer.dimensions(), Some((3, 2)));
        assert_eq!(buffer.source_path(), Some(path.as_path()));
        assert!(buffer.pixels().unwrap().pixels().all(|p| p.0 == [10, 20, 30]));
        Ok(())
    }

    #[test]
    fn test_load_sniffs_content() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let png = dir.path().join("img.png");
        RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])).save(&png)?;

        let misnamed = dir.path().join("img.jpg");
        fs::copy(&png, &misnamed)?;

        let buffer = ImageBuffer::load(&misnamed)?;
        assert_eq!(buffer.pixels().unwrap().get_pixel(0, 0).0, [1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_save_before_load() {
        let dir = tempdir().unwrap();
        let buffer = ImageBuffer::new();

        assert!(!buffer.is_loaded());
        assert!(matches!(
            buffer.save(dir.path().join("out.png")),
            Err(ImageFilterError::EmptyBuffer)
        ));
    }

    #[test]
    fn test_apply_before_load() {
        let mut buffer = ImageBuffer::new();
        assert!(matches!(
            buffer.apply(&Filter::Invert),
            Err(ImageFilterError::EmptyBuffer)
        ));
    }

    #[test]
    fn test_save_unwritable_path() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("in.png");
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])).save(&input)?;
        let buffer = ImageBuffer::load(&input)?;

        let no_dir = dir.path().join("no").join("such").join("out.png");
        assert!(matches!(
            buffer.save(&no_dir),
            Err(ImageFilterError::Save { .. })
        ));

        let no_ext = dir.path().join("out");
        assert!(matches!(
            buffer.save(&no_ext),
            Err(ImageFilterError::Save { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_invert_save_reload() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("white.png");
        RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])).save(&input)?;

        let mut buffer = ImageBuffer::load(&input)?;
        buffer.apply(&"2".parse::<FilterChoice>()?.into_filter(GrayscaleConfig::new()))?;
        assert!(buffer.pixels().unwrap().pixels().all(|p| p.0 == [0, 0, 0]));

        let output = dir.path().join("black.png");
        buffer.save(&output)?;

        let reloaded = ImageBuffer::load(&output)?;
        assert_eq!(
            reloaded.pixels().unwrap().as_raw(),
            buffer.pixels().unwrap().as_raw()
        );
        Ok(())
    }

    #[test]
    fn test_grayscale_saves_three_channels() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("red.png");
        RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])).save(&input)?;

        let mut buffer = ImageBuffer::load(&input)?;
        buffer.apply(&Filter::Grayscale(GrayscaleConfig::new()))?;

        let output = dir.path().join("gray.png");
        buffer.save(&output)?;

        let decoded = image::open(&output)?;
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert!(decoded.to_rgb8().pixels().all(|p| p.0 == [76, 76, 76]));
        Ok(())
    }

    #[test]
    fn test_display() -> anyhow::Result<()> {
        let viewer = RecordingViewer::default();

        ImageBuffer::new().display("empty", &viewer)?;
        assert!(viewer.shown.borrow().is_empty());

        let dir = tempdir()?;
        let input = dir.path().join("in.bmp");
        RgbImage::from_pixel(4, 3, Rgb([9, 9, 9])).save(&input)?;

        ImageBuffer::load(&input)?.display("preview", &viewer)?;
        assert_eq!(
            viewer.shown.borrow().as_slice(),
            &[("preview".to_string(), (4, 3))]
        );
        Ok(())
    }
}
