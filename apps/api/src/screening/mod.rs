// Resume screening: skill extraction, skill matching, candidate comparison.
// The matcher is the only scoring logic; everything else feeds it or reports on it.

pub mod analysis;
pub mod candidate;
pub mod comparison;
pub mod extractor;
pub mod handlers;
pub mod matcher;
pub mod skills;
pub mod vocabulary;
