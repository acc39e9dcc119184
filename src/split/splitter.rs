use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::io::{open_data, read_csv, Compression};
use crate::split::{
    partition::{OutOfTimeSplit, DEFAULT_DATE_COLUMN},
    side::Side,
    writer::SplitWriter,
};

pub struct SplitterBuilder {
    /// The path to the input file
    input: PathBuf,
    /// The cutoff, as given
    cutoff: String,
    /// The column holding each row's date
    date_column: String,
    /// The prefix for the output file(s)
    output_prefix: Option<PathBuf>,
    /// Compression for input files
    input_compression: Compression,
    /// Compression for output files
    output_compression: Compression,
    /// Field delimiter for input and output
    delimiter: u8,
}

impl SplitterBuilder {
    /// Input compression is guessed from the file extension.
    pub fn new<P: AsRef<Path>>(input: &P, cutoff: &str) -> Self {
        SplitterBuilder {
            input: input.as_ref().to_path_buf(),
            cutoff: cutoff.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            output_prefix: None,
            input_compression: Compression::from_path(input),
            output_compression: Compression::Uncompressed,
            delimiter: b',',
        }
    }

    #[must_use]
    pub fn date_column(mut self, date_column: &str) -> Self {
        self.date_column = date_column.to_string();
        self
    }

    #[must_use]
    pub fn output_prefix(mut self, output_prefix: PathBuf) -> Self {
        self.output_prefix = Some(output_prefix);
        self
    }

    #[must_use]
    pub fn input_compression(mut self, input_compression: Compression) -> Self {
        self.input_compression = input_compression;
        self
    }

    #[must_use]
    pub fn output_compression(mut self, output_compression: Compression) -> Self {
        self.output_compression = output_compression;
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse the cutoff and work out where output goes.
    pub fn build(self) -> Result<Splitter> {
        let split = OutOfTimeSplit::new(&self.cutoff)?.date_column(&self.date_column);
        let output_path = match self.output_prefix {
            Some(prefix) => prefix,
            None if self.input == Path::new("-") => return Err(Error::MissingOutputPrefix),
            None => self.input.clone(),
        };
        Ok(Splitter {
            input: self.input,
            split,
            output_path,
            input_compression: self.input_compression,
            output_compression: self.output_compression,
            delimiter: self.delimiter,
        })
    }
}

pub struct Splitter {
    /// The path to the input file
    input: PathBuf,
    /// The cutoff and date column
    split: OutOfTimeSplit,
    /// Output files are named relative to this path
    output_path: PathBuf,
    /// Compression for input files
    input_compression: Compression,
    /// Compression for output files
    output_compression: Compression,
    /// Field delimiter for input and output
    delimiter: u8,
}

impl Splitter {
    /// Read the input, split it and write both sides. Returns the paths
    /// written, train first.
    pub fn run(self) -> Result<Vec<PathBuf>> {
        info!("Reading data from {}", self.input.display());
        let reader = open_data(&self.input, self.input_compression)?;
        let dataset = read_csv(reader, self.delimiter)?;
        info!("Read {} rows", dataset.len());

        let partition = self.split.apply(&dataset)?;
        info!(
            "Split at {}: {} train rows, {} test rows",
            self.split.cutoff(),
            partition.train.len(),
            partition.test.len()
        );

        let multi = MultiProgress::new();
        let progress: HashMap<Side, ProgressBar> = Side::ALL
            .iter()
            .map(|&side| {
                let style = ProgressStyle::default_bar()
                    .template("{msg:<10}: [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} (ETA: {eta_precise})")
                    .expect("valid indicatif template")
                    .progress_chars("█▉▊▋▌▍▎▏  ");
                let pb = multi.add(ProgressBar::new(partition.get(side).len() as u64));
                pb.set_message(side.name());
                pb.set_style(style);
                (side, pb)
            })
            .collect();

        let writers: HashMap<Side, SplitWriter> = Side::ALL
            .iter()
            .map(|&side| {
                let writer = SplitWriter::new(
                    &self.output_path,
                    side,
                    self.output_compression,
                    self.delimiter,
                );
                (side, writer)
            })
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(Side::ALL.len())
            .thread_name(|num| format!("writer-{num}"))
            .start_handler(|num| debug!("thread {} starting", num))
            .exit_handler(|num| debug!("thread {} finishing", num))
            .build()?;

        info!("Writing to files");
        let write = |side: Side| writers[&side].write(partition.get(side), &progress[&side]);
        let (train, test) = pool.join(|| write(Side::Train), || write(Side::Test));
        let written = vec![train?, test?];
        for path in &written {
            info!("Wrote {}", path.display());
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_requires_output_prefix() {
        let result = SplitterBuilder::new(&"-", "2021-01-01").build();
        assert!(matches!(result, Err(Error::MissingOutputPrefix)));
        assert!(SplitterBuilder::new(&"-", "2021-01-01")
            .output_prefix(PathBuf::from("out/prices"))
            .build()
            .is_ok());
    }

    #[test]
    fn cutoff_is_checked_on_build() {
        let result = SplitterBuilder::new(&"prices.csv", "someday").build();
        assert!(matches!(result, Err(Error::DateParse { row: None, .. })));
    }

    #[test]
    fn guesses_input_compression() {
        let splitter = SplitterBuilder::new(&"prices.csv.gz", "2021-01-01")
            .build()
            .unwrap();
        assert_eq!(splitter.input_compression, Compression::GzipCompression);
        assert_eq!(splitter.output_path, PathBuf::from("prices.csv.gz"));
    }

    #[test]
    fn writes_both_sides() {
        let dir = std::env::temp_dir().join(format!("oot-splitter-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("prices.csv");
        std::fs::write(
            &input,
            "day;price\n2020-01-01;1\n2021-02-01;2\n2020-05-01;3\n",
        )
        .unwrap();

        let written = SplitterBuilder::new(&input, "2021-01-01")
            .date_column("day")
            .delimiter(b';')
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(
            written,
            vec![
                dir.join("train").join("prices.train.csv"),
                dir.join("test").join("prices.test.csv"),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(&written[0]).unwrap(),
            "day;price\n2020-01-01;1\n2020-05-01;3\n"
        );
        assert_eq!(
            std::fs::read_to_string(&written[1]).unwrap(),
            "day;price\n2021-02-01;2\n"
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
