//! Components - the leaf objects a transport run is built from

mod common;
mod energy;
mod motor;
mod obstacles;
mod track;

pub use common::*;
pub use energy::*;
pub use motor::*;
pub use obstacles::*;
pub use track::*;
