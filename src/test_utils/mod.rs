pub mod fixtures;
pub mod mocks;

pub use fixtures::TestFixtures;
pub use mocks::ScriptedSource;
