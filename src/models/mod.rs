pub mod filters;
pub mod record;

pub use filters::*;
pub use record::*;
