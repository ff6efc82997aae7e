pub mod nws;

pub use nws::NwsClient;
