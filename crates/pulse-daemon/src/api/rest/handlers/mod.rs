//! API request handlers

mod alerts;
mod metrics;
mod stream;
mod system;

pub use alerts::*;
pub use metrics::*;
pub use stream::*;
pub use system::*;
