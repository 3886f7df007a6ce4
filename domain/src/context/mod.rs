//! Ambient context attached to outgoing messages.
//!
//! - [`value_objects::Context`]: user-supplied or derived city/place/time
//! - [`value_objects::ResolvedContext`]: the same with wire defaults applied
//! - [`value_objects::TimeOfDay`]: clock-derived bucket

pub mod value_objects;
