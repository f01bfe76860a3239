use image::RgbImage;
use image_filter::{ImageFilterResult, Viewer};

/// Used with `--no-window` or when built without the `window` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessViewer;

impl Viewer for HeadlessViewer {
    fn show(&self, title: &str, image: &RgbImage) -> ImageFilterResult<()> {
        log::info!(
            "headless: skip showing `{title}` ({}x{})",
            image.width(),
            image.height()
        );
        Ok(())
    }
}

#[cfg(feature = "window")]
pub use window::WindowViewer;

#[cfg(feature = "window")]
mod window {
    use image::RgbImage;
    use image_filter::{ImageFilterError, ImageFilterResult, Viewer};
    use slint::{ComponentHandle, Rgb8Pixel, SharedPixelBuffer};

    slint::slint! {
        export component PreviewWindow inherits Window {
            in property <image> picture;
            in property <string> caption;

            title: root.caption;

            Image {
                source: root.picture;
                image-fit: contain;
            }
        }
    }

    /// Opens a window and runs the event loop until it is closed.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct WindowViewer;

    impl Viewer for WindowViewer {
        fn show(&self, title: &str, image: &RgbImage) -> ImageFilterResult<()> {
            let ui = PreviewWindow::new().map_err(|e| ImageFilterError::Display(e.to_string()))?;

            let buffer = SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(
                image.as_raw(),
                image.width(),
                image.height(),
            );
            ui.set_picture(slint::Image::from_rgb8(buffer));
            ui.set_caption(title.into());

            ui.run()
                .map_err(|e| ImageFilterError::Display(e.to_string()))
        }
    }
}
