pub mod containers;
pub mod fake_executor;
pub mod fixtures;

pub use fake_executor::{FakeExecutor, FakeOutcome};
