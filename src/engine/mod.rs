pub mod aquarium;

pub use aquarium::Aquarium;
pub use aquarium::AquariumArgs;
pub use aquarium::Tank;
