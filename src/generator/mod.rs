pub mod composer;
pub mod formatting;
mod generator;
pub mod sourcing;

pub use generator::PasswordGenerator;
