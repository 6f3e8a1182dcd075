//! Time presentation: live countdown or static timestamp.
//!
//! Each surface passes its own threshold in hours. Below it the surface shows
//! a countdown the host ticks by itself; at or above it the surface shows a
//! formatted time of day (with a weekday when the date is not today).

mod calendar;
mod countdown;
mod policy;

pub use calendar::{FixedCalendar, HostCalendar, HourCycle, SystemCalendar};
pub use countdown::CountdownInterval;
pub use policy::{PresentationPolicy, TimePresentation};
