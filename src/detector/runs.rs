//! Run-length extraction over one scan line

/// A maximal span of same-colored pixels along a scan line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Index of the first pixel of the run
    pub start: usize,
    /// Number of pixels in the run
    pub len: usize,
    /// Color of the run (true = black)
    pub black: bool,
}

impl Run {
    /// Index one past the last pixel of the run
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Split a row of pixels (true = black) into alternating runs.
///
/// Runs start at the first black pixel; leading white pixels are skipped and
/// an all-white row yields no runs.
pub fn extract_runs<I>(row: I) -> Vec<Run>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs: Vec<Run> = Vec::new();
    for (x, black) in row.into_iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.black == black => run.len += 1,
            Some(_) => runs.push(Run {
                start: x,
                len: 1,
                black,
            }),
            None if black => runs.push(Run {
                start: x,
                len: 1,
                black,
            }),
            None => {}
        }
    }
    runs
}
