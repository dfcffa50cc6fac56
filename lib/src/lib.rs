//! Sparse two-dimensional grid addressed by two independent label axes.
//!
//! A [`LabeledGrid`] maps a pair of labels, one from the X axis and one from the Y axis, to at
//! most one item. Labels are plain values compared with [`Eq`] and [`Hash`], they keep their
//! insertion order, and they are never removed. Only occupied cells take up space.
//!
//! ```
//! use labeled_grid::LabeledGrid;
//! use labeled_grid::XIndex;
//!
//! let mut grid = LabeledGrid::new();
//! assert_eq!(grid.add_x_label("Jan"), XIndex(0));
//! assert_eq!(grid.add_x_label("Feb"), XIndex(1));
//! grid.add_y_label("2024");
//! grid.insert("Feb", "2024", 42);
//!
//! assert_eq!(grid.get("Feb", "2024"), Some(&42));
//! assert_eq!(grid.get("Jan", "2024"), None);
//! let items: Vec<_> = grid.iter().map(|e| (e.item.copied(), *e.x_label)).collect();
//! assert_eq!(items, [(None, "Jan"), (Some(42), "Feb")]);
//! ```
//!
//! Cells can be addressed by label, which grows the axes on write, or by [`XIndex`] and
//! [`YIndex`], which never grows them and fails with [`Error::IndexOutOfBounds`] instead.

pub mod axis;
pub mod error;
pub mod grid;
pub mod index;
pub mod iter;
pub mod prelude;

pub use axis::Axis;
pub use error::Error;
pub use grid::IngestPolicy;
pub use grid::LabeledGrid;
pub use index::GridId;
pub use index::Position;
pub use index::XIndex;
pub use index::YIndex;
pub use iter::Cells;
pub use iter::Element;
pub use iter::Iter;
