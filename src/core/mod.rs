pub mod changelog;
pub mod dates;
pub mod engine;
pub mod feed;
pub mod pipeline;

pub use crate::domain::model::{FeedEntry, LineAttribution, RenderedFeed, VersionRecord};
pub use crate::domain::ports::{ConfigProvider, HistoryStore, Pipeline, Storage};
pub use crate::utils::error::Result;
