pub mod maths_utils;
pub mod time_utils;

pub use maths_utils::{first_argmin, is_strictly_monotonic, parabolic_vertex_offset};
pub use time_utils::TimeUtils;
