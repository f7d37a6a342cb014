pub mod error;
pub mod logging;
pub mod types;

pub use error::{Error, Result};
pub use logging::{init_logging, Logger};
pub use types::{Article, Category, FeedResult, FeedSource, TextDirection};
