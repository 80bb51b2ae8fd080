//! Small shared helpers.

pub mod charset;
pub mod mime;
