use std::fmt;

use crate::date::CanonicalDate;

/// One side of the cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Strictly before the cutoff.
    Train,
    /// On or after the cutoff.
    Test,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Train, Side::Test];

    /// Get the name of the side. Used in output filenames.
    pub fn name(&self) -> &'static str {
        match self {
            Side::Train => "train",
            Side::Test => "test",
        }
    }

    /// The side `date` falls on, or `None` if it can't be ordered against
    /// `cutoff`.
    pub fn of(date: &CanonicalDate, cutoff: &CanonicalDate) -> Option<Side> {
        // A date equal to the cutoff is the first instant of the test period.
        if date.partial_cmp(cutoff)?.is_lt() {
            Some(Side::Train)
        } else {
            Some(Side::Test)
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
