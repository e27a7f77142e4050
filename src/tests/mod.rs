#[macro_use]
mod common;

mod endpoint_calendar;
