pub mod bn;
pub mod consts;
pub mod coretypes;
pub mod decimal;
#[macro_use]
pub mod macros;
pub mod math;
