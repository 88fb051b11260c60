pub mod object_cache;
mod traits;

pub use traits::{CacheResult, ObjectCache};
