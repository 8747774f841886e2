pub mod sampler;
pub mod types;

pub use sampler::sample_contacts;
pub use types::{PointerId, TouchEvent, TouchList, TouchPhase, TouchPoint};

pub mod prelude {
    pub use super::sampler::sample_contacts;
    pub use super::types::{PointerId, TouchEvent, TouchList, TouchPhase, TouchPoint};
}
