mod session_vm;
mod time_fmt;

pub use session_vm::{SessionItemVm, map_session_items};
pub use time_fmt::format_datetime;
