/// Maps a possibly out-of-range coordinate onto `[0, len)` by clamping to the
/// nearest edge (replicate border).
///
/// Example: `...d c b a | a a a a...`
///
/// # Arguments
///
/// * `i` - The coordinate, possibly negative or past the end.
/// * `len` - The valid length of the axis, must be > 0.
///
/// # Examples
///
/// ```
/// use lumen_imgproc::filter::clamp_to_edge;
///
/// assert_eq!(clamp_to_edge(-2, 5), 0);
/// assert_eq!(clamp_to_edge(3, 5), 3);
/// assert_eq!(clamp_to_edge(7, 5), 4);
/// ```
#[inline]
pub fn clamp_to_edge(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Precompute the clamped source coordinates visited by a kernel of reach
/// `half` centered at `center`, in kernel order.
#[inline]
pub(crate) fn clamped_window(center: usize, half: usize, len: usize, out: &mut [usize]) {
    let start = center as isize - half as isize;
    out.iter_mut()
        .enumerate()
        .for_each(|(k, idx)| *idx = clamp_to_edge(start + k as isize, len));
}
