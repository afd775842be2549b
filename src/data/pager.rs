use std::ops::Range;

use super::model::{TripRecord, TripTable};

/// Rows per "Next 5" step.
pub const PAGE_SIZE: usize = 5;

/// Rows `0..LEAD_ROWS` form the lead window shown when the table opens; the
/// "Next 5" windows start right after it.
pub const LEAD_ROWS: usize = 6;

// ---------------------------------------------------------------------------
// Window arithmetic
// ---------------------------------------------------------------------------

/// Successive row windows `6..11`, `11..16`, … over a table of `len` rows.
///
/// The final window is yielded even when shorter than [`PAGE_SIZE`]. Rebuild
/// the iterator to start over.
#[derive(Debug, Clone)]
pub struct PageWindows {
    len: usize,
    next: usize,
}

impl PageWindows {
    pub fn new(len: usize) -> Self {
        PageWindows {
            len,
            next: LEAD_ROWS,
        }
    }
}

impl Iterator for PageWindows {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next >= self.len {
            return None;
        }
        let start = self.next;
        let end = (start + PAGE_SIZE).min(self.len);
        self.next = start + PAGE_SIZE;
        Some(start..end)
    }
}

/// The window shown before any "Next 5" press.
pub fn lead_window(len: usize) -> Range<usize> {
    0..LEAD_ROWS.min(len)
}

// ---------------------------------------------------------------------------
// Itemised – the paginated view over a start-time-sorted table
// ---------------------------------------------------------------------------

/// Table rows sorted by start time plus the window currently on screen.
#[derive(Debug, Clone)]
pub struct Itemised {
    sorted: TripTable,
    windows: PageWindows,
    current: Range<usize>,
}

impl Itemised {
    pub fn new(table: &TripTable) -> Self {
        let sorted = table.sorted_by_start();
        let len = sorted.len();
        log::debug!("Itemising {len} trips");
        Itemised {
            sorted,
            windows: PageWindows::new(len),
            current: lead_window(len),
        }
    }

    /// Column headings; the trip identifier is not displayed.
    pub fn headings(&self) -> &[String] {
        &self.sorted.columns
    }

    pub fn window(&self) -> Range<usize> {
        self.current.clone()
    }

    pub fn rows(&self) -> &[TripRecord] {
        &self.sorted.records[self.current.clone()]
    }

    /// Current rows rendered cell by cell in heading order.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows()
            .iter()
            .map(|trip| self.headings().iter().map(|col| trip.cell(col)).collect())
            .collect()
    }

    /// Move to the next window. Returns `false` once the table is exhausted,
    /// leaving the last window in place.
    pub fn advance(&mut self) -> bool {
        match self.windows.next() {
            Some(range) => {
                log::debug!("Showing rows {range:?}");
                self.current = range;
                true
            }
            None => false,
        }
    }
}
