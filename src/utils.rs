//! Small helpers shared across modules.
#![cfg(target_pointer_width = "64")]

/// Returns `ceil(x / y)`.
///
/// # Examples
///
/// ```
/// use loudstrie::utils::ceiled_divide;
///
/// assert_eq!(ceiled_divide(10, 2), 5);
/// assert_eq!(ceiled_divide(10, 3), 4);
/// assert_eq!(ceiled_divide(usize::MAX, 64), 1 << 58);
/// ```
///
/// # Panics
///
/// It will panic if `y == 0`.
pub const fn ceiled_divide(x: usize, y: usize) -> usize {
    x / y + (x % y != 0) as usize
}

/// Debug view printing a long slice as rows of `cols` items.
///
/// The plain `{:?}` form only reports the length.
pub(crate) struct MatrixView<'a, T> {
    data: &'a [T],
    cols: usize,
}

impl<'a, T> MatrixView<'a, T> {
    pub fn new(data: &'a [T], cols: usize) -> Self {
        debug_assert_ne!(cols, 0);
        Self { data, cols }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !f.alternate() {
            return write!(f, "[{} items]", self.data.len());
        }
        writeln!(f, "[")?;
        for row in self.data.chunks(self.cols.max(1)) {
            let cells: Vec<_> = row.iter().map(|x| format!("{x:?}")).collect();
            writeln!(f, "    {},", cells.join(", "))?;
        }
        write!(f, "]")
    }
}
