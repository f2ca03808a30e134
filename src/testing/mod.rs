pub mod dummies;
pub mod stubs;

pub use dummies::mushroom_header;
pub use stubs::{ScriptedDriver, VecStream};
