//! Byte-range splice buffer with position mapping.
//!
//! Removals are recorded against ORIGINAL byte offsets and applied once at
//! the end. Because every removal is keyed by original offsets, deletions at
//! disjoint ranges never interfere with each other. Overlapping removals are
//! a contract violation and are rejected; the traversal driver's pruning
//! rule guarantees they cannot be produced.
//!
//! # Usage
//!
//! ```
//! use logstrip::splice::SpliceBuffer;
//!
//! let mut buffer = SpliceBuffer::new("var trace = 1; doWork();");
//! buffer.remove(0, 15).expect("in bounds");
//! let (code, map) = buffer.apply().expect("disjoint");
//! assert_eq!(code, "doWork();");
//! assert_eq!(map.original_offset(0), Some(15));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A half-open `[start, end)` byte range into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this span overlaps another.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Error during splicing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// A removal range extends past the end of the source.
    #[error("removal [{start},{end}) out of bounds for source of length {source_len}")]
    OutOfBounds {
        /// Start of the offending range.
        start: usize,
        /// End of the offending range.
        end: usize,
        /// Length of the source text.
        source_len: usize,
    },

    /// A removal range has `end < start`.
    #[error("removal [{start},{end}) is inverted")]
    InvertedRange {
        /// Start of the offending range.
        start: usize,
        /// End of the offending range.
        end: usize,
    },

    /// Two removal ranges overlap.
    #[error("overlapping removals: [{a_start},{a_end}) overlaps [{b_start},{b_end})")]
    OverlappingEdits {
        /// Start of the first range.
        a_start: usize,
        /// End of the first range.
        a_end: usize,
        /// Start of the second range.
        b_start: usize,
        /// End of the second range.
        b_end: usize,
    },
}

/// One kept run of text in the output.
///
/// `length` bytes starting at `generated` in the output text correspond to
/// the same bytes starting at `original` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start offset in the generated (output) text.
    pub generated: usize,
    /// Start offset in the original text.
    pub original: usize,
    /// Run length in bytes.
    pub length: usize,
}

/// A mapping from output-text offsets back to original-text offsets.
///
/// Built from the kept runs between removals; every mapped offset lies
/// outside all removed ranges by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMap {
    segments: Vec<Segment>,
    generated_len: usize,
}

impl PositionMap {
    /// Translates an offset in the output text to the corresponding offset
    /// in the original text.
    ///
    /// Returns `None` for offsets at or past the end of the output.
    #[must_use]
    pub fn original_offset(&self, offset: usize) -> Option<usize> {
        if offset >= self.generated_len {
            return None;
        }
        let index = self
            .segments
            .partition_point(|segment| segment.generated <= offset)
            .checked_sub(1)?;
        let segment = self.segments[index];
        // Generated offsets are contiguous across segments, so any offset
        // below generated_len falls inside the segment found.
        debug_assert!(offset < segment.generated + segment.length);
        Some(segment.original + (offset - segment.generated))
    }

    /// The kept-run table, ordered by generated offset.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Length of the output text this map describes.
    #[must_use]
    pub fn generated_len(&self) -> usize {
        self.generated_len
    }
}

/// Splice buffer over one source text.
///
/// Collects removal ranges keyed by original offsets, then applies them all
/// at once, producing the output text together with a [`PositionMap`].
#[derive(Debug, Clone)]
pub struct SpliceBuffer<'a> {
    source: &'a str,
    removals: Vec<ByteSpan>,
}

impl<'a> SpliceBuffer<'a> {
    /// Creates a new buffer for the given source.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            removals: Vec::new(),
        }
    }

    /// Records a removal of `[start, end)` from the original text.
    ///
    /// Bounds are checked immediately; overlap with other removals is
    /// checked once in [`apply`](Self::apply). A zero-length range is a
    /// no-op.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<(), SpliceError> {
        if end < start {
            return Err(SpliceError::InvertedRange { start, end });
        }
        if end > self.source.len() {
            return Err(SpliceError::OutOfBounds {
                start,
                end,
                source_len: self.source.len(),
            });
        }
        if start == end {
            return Ok(());
        }
        self.removals.push(ByteSpan::new(start, end));
        Ok(())
    }

    /// Whether any removal has been recorded.
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.removals.is_empty()
    }

    /// Number of recorded removals.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.removals.len()
    }

    /// The recorded removal ranges, in insertion order.
    #[must_use]
    pub fn spans(&self) -> &[ByteSpan] {
        &self.removals
    }

    /// Total number of bytes scheduled for removal.
    #[must_use]
    pub fn bytes_removed(&self) -> usize {
        self.removals.iter().map(ByteSpan::len).sum()
    }

    /// Applies all removals and returns the output text plus position map.
    ///
    /// # Errors
    /// Returns [`SpliceError::OverlappingEdits`] if any two recorded ranges
    /// overlap.
    pub fn apply(self) -> Result<(String, PositionMap), SpliceError> {
        let mut removals = self.removals;
        removals.sort_by_key(|span| span.start);

        for pair in removals.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(SpliceError::OverlappingEdits {
                    a_start: pair[0].start,
                    a_end: pair[0].end,
                    b_start: pair[1].start,
                    b_end: pair[1].end,
                });
            }
        }

        let removed_total: usize = removals.iter().map(ByteSpan::len).sum();
        let mut code = String::with_capacity(self.source.len() - removed_total);
        let mut segments = Vec::with_capacity(removals.len() + 1);
        let mut cursor = 0;

        for span in &removals {
            if span.start > cursor {
                segments.push(Segment {
                    generated: code.len(),
                    original: cursor,
                    length: span.start - cursor,
                });
                code.push_str(&self.source[cursor..span.start]);
            }
            cursor = span.end;
        }
        if cursor < self.source.len() {
            segments.push(Segment {
                generated: code.len(),
                original: cursor,
                length: self.source.len() - cursor,
            });
            code.push_str(&self.source[cursor..]);
        }

        let generated_len = code.len();
        Ok((
            code,
            PositionMap {
                segments,
                generated_len,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_removal() {
        let mut buffer = SpliceBuffer::new("hello world");
        buffer.remove(5, 11).unwrap();

        let (code, _) = buffer.apply().unwrap();
        assert_eq!(code, "hello");
    }

    #[test]
    fn test_multiple_disjoint_removals() {
        let mut buffer = SpliceBuffer::new("aaa bbb ccc");
        buffer.remove(8, 11).unwrap();
        buffer.remove(0, 4).unwrap();

        let (code, _) = buffer.apply().unwrap();
        assert_eq!(code, "bbb ");
    }

    #[test]
    fn test_overlapping_removals_error() {
        let mut buffer = SpliceBuffer::new("hello world");
        buffer.remove(0, 8).unwrap();
        buffer.remove(5, 10).unwrap();

        assert!(matches!(
            buffer.apply(),
            Err(SpliceError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let mut buffer = SpliceBuffer::new("short");
        assert!(matches!(
            buffer.remove(0, 100),
            Err(SpliceError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_inverted_range_error() {
        let mut buffer = SpliceBuffer::new("text");
        assert!(matches!(
            buffer.remove(3, 1),
            Err(SpliceError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_zero_length_removal_is_noop() {
        let mut buffer = SpliceBuffer::new("text");
        buffer.remove(2, 2).unwrap();
        assert!(!buffer.has_edits());
    }

    #[test]
    fn test_adjacent_removals_are_disjoint() {
        let mut buffer = SpliceBuffer::new("abcdef");
        buffer.remove(0, 3).unwrap();
        buffer.remove(3, 6).unwrap();

        let (code, map) = buffer.apply().unwrap();
        assert_eq!(code, "");
        assert_eq!(map.generated_len(), 0);
        assert_eq!(map.original_offset(0), None);
    }

    #[test]
    fn test_no_removals_identity_map() {
        let buffer = SpliceBuffer::new("unchanged");
        let (code, map) = buffer.apply().unwrap();

        assert_eq!(code, "unchanged");
        for offset in 0..code.len() {
            assert_eq!(map.original_offset(offset), Some(offset));
        }
    }

    #[test]
    fn test_map_skips_removed_ranges() {
        let source = "var trace = 1; doWork();";
        let mut buffer = SpliceBuffer::new(source);
        buffer.remove(0, 15).unwrap();

        let (code, map) = buffer.apply().unwrap();
        assert_eq!(code, "doWork();");
        for offset in 0..code.len() {
            let original = map.original_offset(offset).unwrap();
            assert!(original >= 15);
            assert_eq!(&source[original..=original], &code[offset..=offset]);
        }
    }

    #[test]
    fn test_map_with_interior_removal() {
        let source = "keep1 DROP keep2";
        let mut buffer = SpliceBuffer::new(source);
        buffer.remove(6, 11).unwrap();

        let (code, map) = buffer.apply().unwrap();
        assert_eq!(code, "keep1 keep2");
        assert_eq!(map.original_offset(0), Some(0));
        assert_eq!(map.original_offset(6), Some(11));
        assert_eq!(map.original_offset(10), Some(15));
        assert_eq!(map.original_offset(11), None);
    }

    #[test]
    fn test_map_serializes_to_segments() {
        let mut buffer = SpliceBuffer::new("abcdef");
        buffer.remove(2, 4).unwrap();

        let (_, map) = buffer.apply().unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["segments"].as_array().unwrap().len(), 2);
        assert_eq!(json["generated_len"], 4);
    }
}
