/// Chess rules.
pub mod chess;
/// Move path enumeration.
pub mod perft;
