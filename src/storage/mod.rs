//! Object storage module
//!
//! Contains the transcript store backed by S3.

pub mod s3;

pub use s3::{S3TranscriptStore, StorageError, TranscriptStore};
