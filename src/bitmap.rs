//! Fixed-size per-segment visibility bitmap.
//!
//! One bitmap covers exactly one segment: bit `i` corresponds to local doc id
//! `i` in that segment, and the length is fixed at the segment's doc count.
//! Local ids are never globally unique, so a bitmap is only meaningful next
//! to its segment ordinal (see resolve::VisibilityMap).
//!
//! Layout: packed u64 words, bit (i % 64) of word (i / 64). Downstream tests
//! membership with `get` in O(1); no resizing after construction.

use std::fmt;

const WORD_BITS: u32 = 64;

/// Fixed-length bit vector sized to a segment's document count.
#[derive(Clone, PartialEq, Eq)]
pub struct SegmentBitmap {
    words: Vec<u64>,
    nbits: u32,
}

impl SegmentBitmap {
    /// Allocate an all-zero bitmap of `nbits` bits.
    pub fn new(nbits: u32) -> Self {
        let nwords = nbits.div_ceil(WORD_BITS) as usize;
        SegmentBitmap {
            words: vec![0u64; nwords],
            nbits,
        }
    }

    /// Number of bits (the segment's doc count at allocation time).
    #[inline]
    pub fn len(&self) -> u32 {
        self.nbits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nbits == 0
    }

    /// Set bit `idx`. Out-of-range indexes indicate a collector bug upstream.
    #[inline]
    pub fn set(&mut self, idx: u32) {
        debug_assert!(idx < self.nbits, "bit {idx} out of range {}", self.nbits);
        self.words[(idx / WORD_BITS) as usize] |= 1u64 << (idx % WORD_BITS);
    }

    /// Test bit `idx`. Out-of-range reads answer false.
    #[inline]
    pub fn get(&self, idx: u32) -> bool {
        if idx >= self.nbits {
            return false;
        }
        (self.words[(idx / WORD_BITS) as usize] >> (idx % WORD_BITS)) & 1 == 1
    }

    /// Number of set bits.
    pub fn cardinality(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Iterate indexes of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &w)| {
            let base = wi as u32 * WORD_BITS;
            (0..WORD_BITS).filter_map(move |b| {
                if (w >> b) & 1 == 1 {
                    Some(base + b)
                } else {
                    None
                }
            })
        })
    }
}

impl fmt::Debug for SegmentBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SegmentBitmap {{ nbits: {}, ones: {} }}",
            self.nbits,
            self.cardinality()
        )
    }
}
