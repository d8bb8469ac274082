mod identity_index;
mod room_registry;

pub use identity_index::*;
pub use room_registry::*;
