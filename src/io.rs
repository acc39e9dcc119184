use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use indicatif::ProgressBar;

use crate::dataset::{Dataset, Value};
use crate::error::{Error, Result};

pub type InputReader = BufReader<Box<dyn Read>>;
pub type OutputWriter = Box<dyn Write + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    GzipCompression,
    Uncompressed,
}

impl Compression {
    /// Gzip if the path ends in `.gz`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension() {
            Some(ext) if ext == "gz" => Compression::GzipCompression,
            _ => Compression::Uncompressed,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Compression::GzipCompression => ".gz",
            Compression::Uncompressed => "",
        }
    }
}

pub fn open_data<P: AsRef<Path>>(path: P, compression: Compression) -> Result<InputReader> {
    // Read from stdin if input is '-', else try to open the provided file.
    let reader: Box<dyn Read> = if path.as_ref() == Path::new("-") {
        Box::new(std::io::stdin())
    } else {
        Box::new(File::open(path)?)
    };
    let reader: Box<dyn Read> = match compression {
        Compression::GzipCompression => Box::new(MultiGzDecoder::new(reader)),
        Compression::Uncompressed => reader,
    };
    Ok(BufReader::with_capacity(1024 * 1024, reader))
}

pub fn open_output<P: AsRef<Path>>(path: P, compression: Compression) -> Result<OutputWriter> {
    let file = BufWriter::new(File::create(path)?);
    let writer: OutputWriter = match compression {
        Compression::GzipCompression => Box::new(GzEncoder::new(file, Default::default())),
        Compression::Uncompressed => Box::new(file),
    };
    Ok(writer)
}

/// Read a CSV with a header row into a dataset of text values.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::EmptyFile);
    }
    let mut dataset = Dataset::new(headers.iter())?;
    for record in reader.records() {
        let record = record?;
        dataset.push_row(record.iter().map(Value::from).collect())?;
    }
    Ok(dataset)
}

/// Write a dataset, header first, as CSV, ticking `progress` once per row.
pub fn write_csv<W: Write>(
    writer: W,
    dataset: &Dataset,
    delimiter: u8,
    progress: &ProgressBar,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
        progress.inc(1);
    }
    writer.flush()?;
    Ok(())
}

/// The part of a filename output files are named after: `data/prices.csv.gz`
/// gives `prices`.
pub fn output_stem<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let path = match Compression::from_path(path) {
        Compression::GzipCompression => path.with_extension(""),
        Compression::Uncompressed => path.to_path_buf(),
    };
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
