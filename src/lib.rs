pub mod align;
pub mod cli;
pub mod clip;
pub mod duration;
pub mod error;
pub mod logger;
pub mod options;
pub mod pipeline;
pub mod presenter;

pub use error::{SplitError, SplitResult};
pub use logger::Logger;
pub use options::Opt;
pub use pipeline::{prepare, Prepared};
