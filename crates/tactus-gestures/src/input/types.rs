use smallvec::SmallVec;
use tactus_geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One physical contact currently on the surface.
///
/// `id` is stable for the lifetime of the contact; `position` is in the
/// caller's coordinate space. Instances are ephemeral and recreated on
/// every sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: PointerId,
    pub position: Point,
}

impl TouchPoint {
    pub const fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }

    pub const fn at(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Contact set for one event. Inline capacity covers the common one- and
/// two-finger cases without allocating.
pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// A normalized input event carrying the full current set of active
/// contacts. The recognizer never receives deltas; it derives its own.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub time_ms: u64,
    pub touches: TouchList,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, time_ms: u64, touches: TouchList) -> Self {
        Self {
            phase,
            time_ms,
            touches,
        }
    }

    /// Builds an event straight from raw `(id, x, y)` contact tuples.
    pub fn sampled<I>(phase: TouchPhase, time_ms: u64, contacts: I) -> Self
    where
        I: IntoIterator<Item = (PointerId, f32, f32)>,
    {
        Self::new(phase, time_ms, super::sampler::sample_contacts(contacts))
    }

    pub fn find(&self, id: PointerId) -> Option<TouchPoint> {
        self.touches.iter().copied().find(|t| t.id == id)
    }
}
