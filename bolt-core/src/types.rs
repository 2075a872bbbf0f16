/// Identifier for a segment in a [`crate::tree::SegmentTree`].
///
/// This is an index into `SegmentTree::segments`. Segments are only ever
/// appended, so an id stays valid for the lifetime of its tree and a
/// parent's id is always smaller than its children's.
pub type SegmentId = usize;
