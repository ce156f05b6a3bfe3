use snafu::{Backtrace, Snafu};

use crate::gap::GapRecord;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// A record could not be encoded in the destination format.
    #[snafu(display("Failed to encode gap records: {source}"))]
    Encode {
        source: ::csv::Error,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

pub trait GapSink {
    /// The type of output returned after a successful write operation.
    ///
    /// For example:
    /// - A file sink might return `PathBuf`, the path of the created file.
    /// - An in-memory sink might return the rendered bytes.
    type Output;

    /// Writes a slice of `GapRecord`s to the destination.
    ///
    /// # Arguments
    /// * `gaps` - The records to write, in report order.
    fn write(&self, gaps: &[GapRecord]) -> Result<Self::Output, SinkError>;
}
