mod assignment;
mod schedule;

pub use assignment::*;
pub use schedule::*;
