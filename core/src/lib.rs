pub mod armid;
pub mod config;
pub mod util;
