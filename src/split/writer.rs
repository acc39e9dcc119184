use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::io;
use crate::split::side::Side;

/// Writes one side of a split to its own file.
///
/// Files land in a directory named after the side, next to `path`:
/// `data/prices.csv` gives `data/train/prices.train.csv`.
pub(crate) struct SplitWriter {
    path: PathBuf,
    side: Side,
    compression: io::Compression,
    delimiter: u8,
}

impl SplitWriter {
    pub fn new(path: &Path, side: Side, compression: io::Compression, delimiter: u8) -> Self {
        SplitWriter {
            path: path.to_path_buf(),
            side,
            compression,
            delimiter,
        }
    }

    pub fn filename(&self) -> PathBuf {
        let mut filename = self.path.clone();
        let original_filename = io::output_stem(&self.path);
        filename.pop();
        filename.push(self.side.name());
        filename.push(format!(
            "{}.{}.csv{}",
            original_filename,
            self.side.name(),
            self.compression.extension(),
        ));
        filename
    }

    /// Write `dataset`, header included, ticking `progress` once per row.
    pub fn write(&self, dataset: &Dataset, progress: &ProgressBar) -> Result<PathBuf> {
        let filename = self.filename();
        if let Some(dir) = filename.parent() {
            create_dir_all(dir)?;
        }
        let output = io::open_output(&filename, self.compression)?;
        io::write_csv(output, dataset, self.delimiter, progress)?;
        progress.finish();
        Ok(filename)
    }
}
