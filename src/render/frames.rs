//! Sequentially numbered frame files.

use crate::error::Result;
use image::RgbImage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes images as `0.png`, `1.png`, ... into one directory.
#[derive(Debug)]
pub struct FrameWriter {
    dir: PathBuf,
    next: usize,
}

impl FrameWriter {
    /// Opens `dir` for writing, creating it if absent.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, next: 0 })
    }

    /// Saves the next frame and returns its path.
    pub fn write(&mut self, img: &RgbImage) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.png", self.next));
        img.save(&path)?;
        debug!("wrote frame {}", path.display());
        self.next += 1;
        Ok(path)
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.next
    }
}
