//! # Popularity Cache
//!
//! Single-slot, time-to-live cache for the popular-movies document. Reads
//! within the TTL are served from memory; expired reads trigger a
//! demand-driven refresh whose result is committed only when it passes the
//! acceptance check. Failed refreshes degrade to the previous payload, never
//! to an error.

pub mod popularity;

pub use popularity::PopularityCache;
