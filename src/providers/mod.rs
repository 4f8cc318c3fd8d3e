pub mod ecb_feed;

pub use ecb_feed::EcbFeedSource;
