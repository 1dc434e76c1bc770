//! Implementation of chess board, its movement rules and specifics.

pub mod board;
pub mod core;
pub mod game;
pub mod rules;
