//! Getting the inputs: remote package files and the local git tree.

pub mod download;
pub mod git;

pub use download::FileFetcher;
pub use git::GitRepository;
