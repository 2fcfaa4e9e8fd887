use crate::data_types::DataPoint;

/// Step between kept elements when reducing `len` elements to at most
/// `max_points`. Returns 1 when no reduction is needed.
pub fn stride_for(len: usize, max_points: usize) -> usize {
    let max_points = max_points.max(1);
    if len <= max_points {
        1
    } else {
        len.div_ceil(max_points)
    }
}

/// Returns `points` unchanged when it already fits in `max_points`, otherwise
/// every `ceil(len / max_points)`-th element starting at the first, in order.
///
/// Applying it twice with the same budget yields the same result as applying
/// it once.
pub fn downsample(points: &[DataPoint], max_points: usize) -> Vec<DataPoint> {
    downsample_iter(points.iter(), max_points)
}

/// Same as [`downsample`] for any sized iterator, so ring buffers can be
/// sampled without first being made contiguous.
pub fn downsample_iter<'a, I>(points: I, max_points: usize) -> Vec<DataPoint>
where
    I: ExactSizeIterator<Item = &'a DataPoint>,
{
    let step = stride_for(points.len(), max_points);
    points.step_by(step).cloned().collect()
}
