pub mod positions;
pub mod universe;

pub use positions::PositionMap;
pub use universe::Universe;
