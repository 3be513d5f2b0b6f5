pub mod activity;
pub mod profile;
pub mod error;

pub use activity::*;
pub use profile::*;
pub use error::*;
