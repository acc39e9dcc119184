use clap::Parser;
use env_logger::Env;

use oot::{cli, Compression, Result, SplitterBuilder};

#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

fn main() -> Result<()> {
    let opt = cli::Opt::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(opt.log_level())).init();
    match opt.cmd {
        cli::Command::Split(x) => {
            let mut splitter = SplitterBuilder::new(&x.input, &x.cutoff)
                .date_column(&x.date_column)
                .delimiter(x.delimiter);
            if x.gzip {
                splitter = splitter.output_compression(Compression::GzipCompression);
            }
            if let Some(output_prefix) = x.output_prefix {
                splitter = splitter.output_prefix(output_prefix);
            }
            splitter.build()?.run()?;
        }
    };
    Ok(())
}
