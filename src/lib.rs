//! Smooth table
//!
//! A virtualized grid that shows any number of items through a fixed pool
//! of `(rows + 2) * columns` cells, recycling rows as they scroll out of
//! view. The core lives in [`table`]; the remaining modules make up the
//! terminal demo shipped as the `smoothtable` binary.

pub mod config;
pub mod logging;
pub mod model;
pub mod table;
pub mod view;

#[cfg(test)]
mod test_harness;
