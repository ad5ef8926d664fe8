//! Game implementations.

pub mod jigsaw;
