mod phase;
mod policy;

pub use phase::*;
pub use policy::*;
