pub mod physics;
pub mod player;
