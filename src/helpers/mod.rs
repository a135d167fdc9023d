//! Helpers the packaging engine is built from.
//!
//! - **acquire**: `FileFetcher` for remote files, `GitRepository` for the tree
//! - **archive**: `git archive` of the checked-out commit
//! - **internal**: progress bars and filesystem utilities

pub mod acquire;
pub mod archive;
pub mod internal;
