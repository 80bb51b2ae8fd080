//! Data model shared by requests and responses.

pub mod data;
pub mod multipart;
pub mod request;
pub mod response;
