use derive_more::Display;

// =============
// === Error ===
// =============

/// Failures of position-addressed access and of strict construction. Label lookups never fail,
/// a missing label is reported as an empty cell instead.
#[derive(Clone, Copy, Debug, Display, derive_more::Error, PartialEq, Eq)]
pub enum Error {
    #[display("index ({x}, {y}) is out of bounds for a {width}x{height} grid")]
    IndexOutOfBounds { x: usize, y: usize, width: usize, height: usize },

    #[display("position was produced by a different grid")]
    ForeignPosition,

    /// Only raised by [`IngestPolicy::Strict`](crate::IngestPolicy::Strict).
    #[display("entry #{entry} references a label that is not on the axes")]
    UnmatchedEntry { entry: usize },
}
