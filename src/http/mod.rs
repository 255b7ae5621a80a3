//! Header collection: sanitization, storage and live iteration.

pub mod headers;
pub mod init;
pub mod iter;
pub mod sanitizer;
