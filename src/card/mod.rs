pub mod builder;
pub mod clock;

pub use builder::{assemble_card, normalize_username, CardBuilder};
pub use clock::Clock;
