use crate::{session::SessionOptions, viewer::HeadlessViewer};
use clap::{Parser, ValueEnum};
use image_filter::{GrayscaleConfig, GrayscaleMode, Viewer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Apply a grayscale or invert filter to an image")]
pub struct Cli {
    /// Image to load; skips the path prompt
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Menu number of the filter (1 = grayscale, 2 = invert); skips the menu
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Where to save the result; skips the save prompt
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = GrayMode::Luminance)]
    pub gray_mode: GrayMode,

    /// Do not open a preview window
    #[arg(long)]
    pub no_window: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayMode {
    /// 0.299 R + 0.587 G + 0.114 B
    Luminance,
    /// (R + G + B) / 3
    Average,
}

impl From<GrayMode> for GrayscaleMode {
    fn from(mode: GrayMode) -> Self {
        match mode {
            GrayMode::Luminance => GrayscaleMode::Luminance,
            GrayMode::Average => GrayscaleMode::Average,
        }
    }
}

impl Cli {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::default()
            .with_input(self.input.clone())
            .with_filter(self.filter.clone())
            .with_output(self.output.clone())
            .with_grayscale(GrayscaleConfig::new().with_mode(self.gray_mode.into()))
    }

    pub fn viewer(&self) -> Box<dyn Viewer> {
        if self.no_window {
            Box::new(HeadlessViewer)
        } else {
            window_viewer()
        }
    }
}

#[cfg(feature = "window")]
fn window_viewer() -> Box<dyn Viewer> {
    Box::new(crate::viewer::WindowViewer)
}

#[cfg(not(feature = "window"))]
fn window_viewer() -> Box<dyn Viewer> {
    log::warn!("built without the `window` feature, preview disabled");
    Box::new(HeadlessViewer)
}
