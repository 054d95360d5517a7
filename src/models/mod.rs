pub mod alert;
pub mod info;

pub use alert::*;
pub use info::*;
