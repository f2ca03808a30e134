pub mod drivers;
mod runner;
pub mod wizard;

pub use runner::{execute_task, load_task};
