//! Phase 3: pick one visible version per record key and mark it in a
//! per-segment bitmap.
//!
//! Rules:
//! - Versions in a group already passed the snapshot filter; the winner is
//!   the one with the highest txid.
//! - The sort is stable, so equal txids fall back to encounter order. Equal
//!   txids violate upstream invariants; the collision is counted but not
//!   disambiguated further.
//! - Bitmaps allocate lazily, sized to the winner's segment doc count.
//!
//! The returned map is owned by the caller; nothing here retains a
//! reference to it.

use std::collections::HashMap;

use crate::accum::groups::VersionGroups;
use crate::bitmap::SegmentBitmap;
use crate::metrics::{record_bitmap_allocated, record_equal_txid_collision, record_groups_resolved};

/// Final output: segment ordinal → visibility bitmap. At most one bit per
/// record key across the whole map.
#[derive(Debug, Default)]
pub struct VisibilityMap {
    bitmaps: HashMap<u32, SegmentBitmap>,
}

impl VisibilityMap {
    /// Bitmap for one segment, if any of its documents is visible.
    pub fn segment(&self, ordinal: u32) -> Option<&SegmentBitmap> {
        self.bitmaps.get(&ordinal)
    }

    /// O(1) membership test used by downstream query stages: a document
    /// passes iff its segment has a bitmap and its local id bit is set.
    #[inline]
    pub fn is_visible(&self, ordinal: u32, local_doc: u32) -> bool {
        self.bitmaps
            .get(&ordinal)
            .is_some_and(|b| b.get(local_doc))
    }

    /// Iterate (ordinal, bitmap) pairs. Order is unspecified.
    pub fn segments(&self) -> impl Iterator<Item = (u32, &SegmentBitmap)> {
        self.bitmaps.iter().map(|(&ord, b)| (ord, b))
    }

    pub fn segment_count(&self) -> usize {
        self.bitmaps.len()
    }

    /// Total visible documents across all segments.
    pub fn cardinality(&self) -> u64 {
        self.bitmaps.values().map(|b| b.cardinality()).sum()
    }
}

/// Resolve grouped versions into the visibility map. Returns None when no
/// bit ends up set — the "no visible results" outcome.
pub fn resolve(groups: VersionGroups) -> Option<VisibilityMap> {
    let group_count = groups.len() as u64;
    let mut bitmaps: HashMap<u32, SegmentBitmap> = HashMap::new();

    for (_key, mut versions) in groups.into_iter() {
        // Stable: equal txids keep encounter order.
        versions.sort_by(|a, b| b.txid.cmp(&a.txid));

        if versions.len() > 1 && versions[0].txid == versions[1].txid {
            record_equal_txid_collision();
        }

        // Groups are never empty by construction.
        let winner = &versions[0];

        // TODO: consult the transaction log before accepting the winner; a
        // txid below the snapshot horizon that never committed still wins
        // here and would need to fall through to the next version.
        let bitmap = bitmaps.entry(winner.segment).or_insert_with(|| {
            record_bitmap_allocated();
            SegmentBitmap::new(winner.segment_doc_count)
        });
        debug_assert_eq!(
            bitmap.len(),
            winner.segment_doc_count,
            "segment {} doc count changed mid-resolution",
            winner.segment
        );
        bitmap.set(winner.local_doc);
    }

    record_groups_resolved(group_count);

    if bitmaps.is_empty() {
        return None;
    }
    Some(VisibilityMap { bitmaps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accum::groups::ShardedVersionGroups;
    use crate::version::VersionRecord;

    fn groups_of(records: &[VersionRecord]) -> VersionGroups {
        let acc = ShardedVersionGroups::new(2);
        acc.merge(records).unwrap();
        acc.freeze().unwrap()
    }

    fn rec(key: u64, txid: u64, segment: u32, local_doc: u32) -> VersionRecord {
        VersionRecord {
            segment,
            segment_doc_count: 32,
            local_doc,
            key,
            txid,
        }
    }

    #[test]
    fn highest_txid_wins() {
        let map = resolve(groups_of(&[
            rec(1, 5, 0, 3),
            rec(1, 9, 0, 7),
            rec(1, 2, 1, 1),
        ]))
        .expect("one winner expected");
        assert!(map.is_visible(0, 7));
        assert!(!map.is_visible(0, 3));
        assert!(map.segment(1).is_none(), "loser segment gets no bitmap");
        assert_eq!(map.cardinality(), 1);
    }

    #[test]
    fn one_bit_per_key() {
        let map = resolve(groups_of(&[
            rec(1, 5, 0, 0),
            rec(1, 6, 0, 1),
            rec(2, 3, 0, 2),
            rec(2, 8, 1, 0),
        ]))
        .unwrap();
        assert_eq!(map.cardinality(), 2);
        assert!(map.is_visible(0, 1));
        assert!(map.is_visible(1, 0));
    }

    #[test]
    fn empty_groups_resolve_to_none() {
        let acc = ShardedVersionGroups::new(1);
        assert!(resolve(acc.freeze().unwrap()).is_none());
    }

    #[test]
    fn equal_txid_keeps_encounter_order() {
        let map = resolve(groups_of(&[rec(7, 4, 0, 10), rec(7, 4, 0, 11)])).unwrap();
        // Stable sort: the first-collected version wins.
        assert!(map.is_visible(0, 10));
        assert!(!map.is_visible(0, 11));
    }
}
