mod assignment_handler;
mod calendar_handler;
mod schedule_handler;

pub use assignment_handler::*;
pub use calendar_handler::*;
pub use schedule_handler::*;
