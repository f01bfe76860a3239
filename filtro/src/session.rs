//! Interactive load → filter → display → save flow.
//!
//! The session is a small state machine driven by [`Session::run`]. Every
//! prompt reads one line from the input; answers given on the command line
//! skip the matching prompt.

use anyhow::{Context, Result};
use derive_setters::Setters;
use image_filter::{Filter, FilterChoice, GrayscaleConfig, ImageBuffer, Viewer};
use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

pub const INPUT_PROMPT: &str = "Ingrese la ruta de la imagen: ";
pub const MENU_HEADER: &str = "Seleccione un filtro:";
pub const MENU_PROMPT: &str = "Opción: ";
pub const OUTPUT_PROMPT: &str = "Ingrese la ruta para guardar la imagen: ";
pub const WINDOW_TITLE: &str = "Imagen con filtro aplicado";

pub const LOAD_ERROR: &str = "No se pudo cargar la imagen.";
pub const SELECTION_ERROR: &str = "Opción inválida.";
pub const SAVE_ERROR: &str = "Error al guardar la imagen.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Load,
    Selection,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPath,
    Loaded,
    FilterSelected,
    Applied,
    Displayed,
    Saved,
    Failed(Failure),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Saved | SessionState::Failed(_))
    }

    /// A failed save is reported to the user but still exits with 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionState::Failed(Failure::Load | Failure::Selection) => 1,
            _ => 0,
        }
    }
}

/// Answers supplied up front instead of through the prompts.
#[derive(Debug, Clone, Default, Setters)]
#[setters(prefix = "with_")]
pub struct SessionOptions {
    pub input: Option<PathBuf>,
    pub filter: Option<String>,
    pub output: Option<PathBuf>,
    pub grayscale: GrayscaleConfig,
}

pub struct Session<R, O, E> {
    input: R,
    out: O,
    err: E,
    options: SessionOptions,
    state: SessionState,
    buffer: ImageBuffer,
    filter: Option<Filter>,
}

impl<R: BufRead, O: Write, E: Write> Session<R, O, E> {
    pub fn new(input: R, out: O, err: E, options: SessionOptions) -> Self {
        Self {
            input,
            out,
            err,
            options,
            state: SessionState::AwaitingPath,
            buffer: ImageBuffer::new(),
            filter: None,
        }
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    /// Drive the session until it reaches `Saved` or `Failed`.
    ///
    /// Errors are console I/O failures only; user-facing failures end in a
    /// terminal state instead.
    pub fn run(&mut self, viewer: &dyn Viewer) -> Result<SessionState> {
        while !self.state.is_terminal() {
            self.step(viewer)?;
        }

        Ok(self.state)
    }

    fn step(&mut self, viewer: &dyn Viewer) -> Result<()> {
        let next = match self.state {
            SessionState::AwaitingPath => self.load()?,
            SessionState::Loaded => self.select_filter()?,
            SessionState::FilterSelected => self.apply_filter()?,
            SessionState::Applied => self.display(viewer),
            SessionState::Displayed => self.save()?,
            SessionState::Saved | SessionState::Failed(_) => return Ok(()),
        };

        log::debug!("session: {:?} -> {:?}", self.state, next);
        self.state = next;

        Ok(())
    }

    fn load(&mut self) -> Result<SessionState> {
        let path = match self.options.input.clone() {
            Some(path) => path,
            None => self.ask_path(INPUT_PROMPT)?,
        };

        match ImageBuffer::load(&path) {
            Ok(buffer) => {
                self.buffer = buffer;
                Ok(SessionState::Loaded)
            }
            Err(e) => {
                log::warn!("{e}");
                writeln!(self.err, "{LOAD_ERROR}")?;
                Ok(SessionState::Failed(Failure::Load))
            }
        }
    }

    fn select_filter(&mut self) -> Result<SessionState> {
        let answer = match self.options.filter.clone() {
            Some(answer) => answer,
            None => {
                writeln!(self.out, "{MENU_HEADER}")?;
                for choice in FilterChoice::ALL {
                    writeln!(self.out, "{}. {}", u8::from(choice), choice.label())?;
                }
                let line = self.ask(MENU_PROMPT)?.unwrap_or_default();
                String::from_utf8_lossy(&line).into_owned()
            }
        };

        match answer.parse::<FilterChoice>() {
            Ok(choice) => {
                self.filter = Some(choice.into_filter(self.options.grayscale.clone()));
                Ok(SessionState::FilterSelected)
            }
            Err(e) => {
                log::warn!("{e}");
                writeln!(self.err, "{SELECTION_ERROR}")?;
                Ok(SessionState::Failed(Failure::Selection))
            }
        }
    }

    fn apply_filter(&mut self) -> Result<SessionState> {
        let filter = self.filter.as_ref().context("no filter selected")?;
        self.buffer.apply(filter)?;

        Ok(SessionState::Applied)
    }

    fn display(&mut self, viewer: &dyn Viewer) -> SessionState {
        if let Err(e) = self.buffer.display(WINDOW_TITLE, viewer) {
            log::warn!("{e}");
        }

        SessionState::Displayed
    }

    fn save(&mut self) -> Result<SessionState> {
        let path = match self.options.output.clone() {
            Some(path) => path,
            None => self.ask_path(OUTPUT_PROMPT)?,
        };

        match self.buffer.save(&path) {
            Ok(_) => {
                writeln!(self.out, "Imagen guardada con éxito en {}", path.display())?;
                Ok(SessionState::Saved)
            }
            Err(e) => {
                log::warn!("{e}");
                writeln!(self.err, "{SAVE_ERROR}")?;
                Ok(SessionState::Failed(Failure::Save))
            }
        }
    }

    /// Raw bytes of the answer without its line terminator, `None` once the
    /// input is exhausted. Bytes are not required to be UTF-8.
    fn ask(&mut self, prompt: &str) -> Result<Option<Vec<u8>>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }

        Ok(Some(line))
    }

    fn ask_path(&mut self, prompt: &str) -> Result<PathBuf> {
        Ok(path_from_bytes(self.ask(prompt)?.unwrap_or_default()))
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};

    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}
