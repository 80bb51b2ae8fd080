//! Wire-level execution: the transport capability, URI resolution, and the
//! payload strategies.

pub mod multipart;
pub mod payload;
pub mod reqwest;
pub mod transport;
pub mod uri;
