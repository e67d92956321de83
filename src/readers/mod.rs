pub mod document;
pub mod feed_cache;
pub mod feed_client;
pub mod feed_reader;

pub use document::{decode_document, read_document_file};
pub use feed_cache::FeedCache;
pub use feed_client::FeedClient;
pub use feed_reader::FeedReader;
