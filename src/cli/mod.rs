pub mod encrypt;
pub mod info;
pub mod options;

pub use encrypt::*;
pub use info::*;
pub use options::*;
