//! Timeline track-packing layout.
//!
//! Overlapping time-ranged items are assigned to the lowest-indexed track on
//! which they fit, opening a new track when none does. Items are processed in
//! ascending start-time order (stable sort, so ties keep their input order),
//! which makes the greedy assignment use the minimum possible number of
//! tracks for interval graphs: the track count equals the maximum number of
//! items active at any single instant.
//!
//! Media rows always occupy one dedicated track and are never packed with
//! annotation elements.

use crate::types::DbId;

/// A time-ranged item to be placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    pub id: DbId,
    /// Start of the visibility window, seconds.
    pub start: f64,
    /// End of the visibility window, seconds. Values below `start` are
    /// clamped to `start` (zero-length) before packing.
    pub end: f64,
}

impl TimelineItem {
    pub fn new(id: DbId, start: f64, end: f64) -> Self {
        Self { id, start, end }
    }

    /// The interval with `end < start` normalized to zero length.
    fn normalized(&self) -> (f64, f64) {
        (self.start, self.end.max(self.start))
    }
}

/// The packed layout: one fixed media track plus as many element tracks as
/// the overlap depth requires.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub media_track: Vec<TimelineItem>,
    pub element_tracks: Vec<Vec<TimelineItem>>,
}

/// Interval overlap test. Touching endpoints count as overlapping, so two
/// items meeting at the same second still go to different tracks.
pub fn overlaps(a: &TimelineItem, b: &TimelineItem) -> bool {
    let (a_start, a_end) = a.normalized();
    let (b_start, b_end) = b.normalized();
    a_start <= b_end && a_end >= b_start
}

/// Greedily pack items into non-overlapping tracks.
///
/// Output is deterministic: per-track item order is insertion order (i.e.
/// ascending start time, ties in input order), ready for left-to-right
/// rendering.
pub fn pack_tracks(items: &[TimelineItem]) -> Vec<Vec<TimelineItem>> {
    let mut sorted: Vec<TimelineItem> = items.to_vec();
    // Stable: equal start times keep original order.
    sorted.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));

    let mut tracks: Vec<Vec<TimelineItem>> = Vec::new();
    for item in sorted {
        let slot = tracks
            .iter_mut()
            .find(|track| track.iter().all(|placed| !overlaps(placed, &item)));
        match slot {
            Some(track) => track.push(item),
            None => tracks.push(vec![item]),
        }
    }
    tracks
}

/// Lay out a project's timeline: media on their own track, elements packed
/// greedily below.
pub fn layout(media: &[TimelineItem], elements: &[TimelineItem]) -> TimelineLayout {
    TimelineLayout {
        media_track: media.to_vec(),
        element_tracks: pack_tracks(elements),
    }
}
