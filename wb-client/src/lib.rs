//! World Bank REST v2 access: time parameter mapping, fetching with retry,
//! payload parsing, and display formatting.

mod client;
mod errors;
mod format;
mod time;

pub use client::{FetchOutcome, WbConfig, WorldBankClient, parse_value};
pub use errors::WbError;
pub use format::format_value;
pub use time::build_time_param;
