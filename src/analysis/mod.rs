pub mod frequency;
pub mod keylength;
pub mod ranker;
pub mod reference;

pub use frequency::*;
pub use keylength::*;
pub use ranker::*;
pub use reference::*;
