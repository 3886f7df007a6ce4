//! Progress display while Buddy is thinking

pub mod indicator;
