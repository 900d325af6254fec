pub mod chain;
pub mod fish;
pub mod tier;
pub mod token;
pub mod transfer;

pub use chain::ChainFamily;
pub use chain::Network;
pub use fish::Fish;
pub use tier::Tier;
pub use token::KnownToken;
pub use token::TokenMetadata;
pub use transfer::NormalizedTransfer;
pub use transfer::RawTransfer;
