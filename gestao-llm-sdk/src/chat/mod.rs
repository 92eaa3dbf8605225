pub mod builder;
pub mod transport;
pub mod types;

pub use builder::{ChatClientTrait, ChatMessageBuilder};
pub use types::*;
