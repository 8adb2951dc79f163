//! Systems - per-step rules that operate on components

mod atp;
mod binding;
mod crowding;
mod tug_of_war;

pub use atp::*;
pub use binding::*;
pub use crowding::*;
pub use tug_of_war::*;
