mod denylist;
mod normalize;
mod request;

pub use denylist::*;
pub use normalize::*;
pub use request::*;
