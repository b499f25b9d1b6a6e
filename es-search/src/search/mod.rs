mod builder;
mod execute;

pub use builder::{Searcher, TrackTotalHits, DEFAULT_GEO_DISTANCE_ATTRIBUTE, DEFAULT_PAGE_SIZE};
