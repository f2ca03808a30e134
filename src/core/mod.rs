pub mod attributes;
pub mod instance_header;
pub mod instances;
mod label;

pub use label::Label;
