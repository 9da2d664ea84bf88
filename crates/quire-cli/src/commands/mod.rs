pub mod dashboard;
pub mod dispatch;
pub mod log;
pub mod request;
pub mod shared;
