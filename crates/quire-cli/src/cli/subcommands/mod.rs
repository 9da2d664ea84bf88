mod log;
mod request;

pub use log::{ListArgs, LogCommands, RecordArgs};
pub use request::RequestCommands;
