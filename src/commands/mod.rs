//! Command implementations for ruthscore

pub mod score;
