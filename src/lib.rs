#[macro_use]
extern crate tracing;

mod app;
mod logging;
mod version;

pub use app::App;
pub use logging::{
    init_errors,
    init_logging,
};
pub use version::version;
