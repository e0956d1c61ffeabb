//! State module for tracking crawl progress
//!
//! `CrawlState` is the only mutable state of a crawl: the visited set, the
//! FIFO frontier and the accumulated set of discovered links. It is owned by
//! the scheduler, so tests can build isolated instances.

mod crawl_state;

// Re-export main types
pub use crawl_state::CrawlState;
