mod partition;
mod side;
mod splitter;
mod writer;

pub use self::{
    partition::{split, OutOfTimeSplit, Partition, DEFAULT_DATE_COLUMN},
    side::Side,
    splitter::{Splitter, SplitterBuilder},
};
