//! Translation from raw platform contacts to [`TouchPoint`] lists.
//!
//! Pure and stateless: the platform hands over whatever contacts are
//! currently touching and every one of them comes out the other side with
//! its stable id preserved. No filtering, no deduplication beyond what the
//! input source already guarantees.

use super::types::{PointerId, TouchList, TouchPoint};

/// Normalizes raw `(id, x, y)` contact tuples into a [`TouchList`].
pub fn sample_contacts<I>(contacts: I) -> TouchList
where
    I: IntoIterator<Item = (PointerId, f32, f32)>,
{
    contacts
        .into_iter()
        .map(|(id, x, y)| TouchPoint::new(id, x, y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_ids_and_order() {
        let touches = sample_contacts([(7, 10.0, 20.0), (3, 30.0, 40.0)]);
        assert_eq!(touches.len(), 2);
        assert_eq!(touches[0], TouchPoint::new(7, 10.0, 20.0));
        assert_eq!(touches[1], TouchPoint::new(3, 30.0, 40.0));
    }

    #[test]
    fn test_empty_input_is_empty_list() {
        let raw: [(PointerId, f32, f32); 0] = [];
        let touches = sample_contacts(raw);
        assert!(touches.is_empty());
    }

    #[test]
    fn test_never_drops_points() {
        let raw: Vec<(u64, f32, f32)> = (0..5).map(|i| (i, i as f32, -(i as f32))).collect();
        let touches = sample_contacts(raw.iter().copied());
        assert_eq!(touches.len(), raw.len());
    }
}
