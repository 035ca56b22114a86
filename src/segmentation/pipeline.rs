use crate::error::SegmentError;
use crate::segmentation::{binarize, regions};
use image::imageops::{self, FilterType};
use std::fs;
use std::path::{Path, PathBuf};

/// Side length of the square tiles written for each symbol
const TILE_SIZE: u32 = 28;
/// Bounding regions narrower or shorter than this are discarded as noise
const MIN_REGION_DIM: u32 = 5;

/// Segments a handwritten expression image into per-symbol tiles.
///
/// Independent of the HTTP layer: takes explicit input and output paths so
/// it can be exercised directly against temp directories in tests.
pub struct Segmenter {
    tile_size: u32,
    min_region_dim: u32,
    clear_existing: bool,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_region_dim: MIN_REGION_DIM,
            clear_existing: false,
        }
    }
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove files already present in the output directory before writing.
    ///
    /// Off by default: a run that finds fewer symbols than the previous run
    /// then leaves the previous run's higher-numbered tiles in place.
    pub fn clear_existing(mut self, clear: bool) -> Self {
        self.clear_existing = clear;
        self
    }

    /// Segment the image at `input_path` into symbol tiles under `out_dir`.
    ///
    /// Tiles are written as `<ordinal>.png` in left-to-right reading order
    /// and the ordered list of written paths is returned. An image with no
    /// qualifying symbols yields an empty list, not an error. The output
    /// directory is created if absent.
    pub fn segment(&self, input_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, SegmentError> {
        let image = image::open(input_path).map_err(|e| {
            SegmentError::ImageLoad(format!("{}: {}", input_path.display(), e))
        })?;

        let mask = binarize::ink_mask(&image);
        let symbol_rects = regions::symbol_regions(&mask, self.min_region_dim);

        fs::create_dir_all(out_dir).map_err(|e| {
            SegmentError::Storage(format!("failed to create {}: {}", out_dir.display(), e))
        })?;

        if self.clear_existing {
            clear_dir(out_dir)?;
        }

        let mut tile_paths = Vec::with_capacity(symbol_rects.len());
        for (ordinal, rect) in symbol_rects.iter().enumerate() {
            let crop = imageops::crop_imm(
                &mask,
                rect.left() as u32,
                rect.top() as u32,
                rect.width(),
                rect.height(),
            )
            .to_image();
            let tile = imageops::resize(&crop, self.tile_size, self.tile_size, FilterType::Triangle);

            let path = out_dir.join(format!("{}.png", ordinal));
            tile.save(&path).map_err(|e| {
                SegmentError::Storage(format!("failed to write {}: {}", path.display(), e))
            })?;
            tile_paths.push(path);
        }

        tracing::debug!(
            "Wrote {} tiles to {}",
            tile_paths.len(),
            out_dir.display()
        );

        Ok(tile_paths)
    }
}

fn clear_dir(dir: &Path) -> Result<(), SegmentError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        SegmentError::Storage(format!("failed to read {}: {}", dir.display(), e))
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| {
            SegmentError::Storage(format!("failed to read {}: {}", dir.display(), e))
        })?;
        if entry.path().is_file() {
            fs::remove_file(entry.path()).map_err(|e| {
                SegmentError::Storage(format!(
                    "failed to remove {}: {}",
                    entry.path().display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
