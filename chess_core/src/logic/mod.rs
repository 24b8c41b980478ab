pub mod board;
pub mod game;
pub mod narrative;
pub mod piece;
pub mod rules;
