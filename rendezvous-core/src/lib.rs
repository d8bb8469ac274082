mod error;
mod model;

pub use error::ProtocolError;
pub use model::*;
