// Jitter distribution histogram
// Accumulates (observed - predicted) timing error in microseconds for
// diagnostics. The clock model writes into it; presentation lives here.

use crate::constants::{HISTOGRAM_BIN_COUNT, HISTOGRAM_BIN_WIDTH_MICROS};

/// Fixed-width histogram of signed microsecond values, centered at zero.
///
/// Values outside the covered range land in the underflow/overflow tails
/// rather than being dropped, so the total count always matches the number
/// of `add` calls. No allocation after construction.
#[derive(Debug, Clone)]
pub struct MicrosHistogram {
    /// Width of one bin in microseconds.
    bin_width_micros: i64,
    /// Bin counts. Bin `bins.len() / 2` starts at zero.
    bins: Vec<u64>,
    /// Samples below the covered range.
    underflow: u64,
    /// Samples at or above the covered range.
    overflow: u64,
    /// Total samples added.
    count: u64,
    /// Running sum of all values (for the mean).
    sum_micros: i64,
    /// Smallest value seen.
    min_micros: i64,
    /// Largest value seen.
    max_micros: i64,
}

impl MicrosHistogram {
    /// Create a histogram with `bin_count` bins of `bin_width_micros` each,
    /// split evenly around zero. Invalid parameters fall back to the defaults.
    pub fn new(bin_width_micros: i64, bin_count: usize) -> Self {
        let bin_width_micros = if bin_width_micros > 0 {
            bin_width_micros
        } else {
            HISTOGRAM_BIN_WIDTH_MICROS
        };
        let bin_count = if bin_count >= 2 { bin_count } else { HISTOGRAM_BIN_COUNT };
        MicrosHistogram {
            bin_width_micros,
            bins: vec![0; bin_count],
            underflow: 0,
            overflow: 0,
            count: 0,
            sum_micros: 0,
            min_micros: i64::MAX,
            max_micros: i64::MIN,
        }
    }

    /// Add one sample.
    pub fn add(&mut self, micros: i64) {
        let half = (self.bins.len() / 2) as i64;
        let bin = micros.div_euclid(self.bin_width_micros) + half;
        if bin < 0 {
            self.underflow += 1;
        } else if bin >= self.bins.len() as i64 {
            self.overflow += 1;
        } else {
            self.bins[bin as usize] += 1;
        }
        self.count += 1;
        self.sum_micros = self.sum_micros.saturating_add(micros);
        self.min_micros = self.min_micros.min(micros);
        self.max_micros = self.max_micros.max(micros);
    }

    /// Total number of samples added.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Smallest value seen, if any samples were added.
    pub fn min(&self) -> Option<i64> {
        (self.count > 0).then_some(self.min_micros)
    }

    /// Largest value seen, if any samples were added.
    pub fn max(&self) -> Option<i64> {
        (self.count > 0).then_some(self.max_micros)
    }

    /// Mean of all values seen, if any samples were added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum_micros as f64 / self.count as f64)
    }

    /// Reset all counts.
    pub fn clear(&mut self) {
        for bin in &mut self.bins {
            *bin = 0;
        }
        self.underflow = 0;
        self.overflow = 0;
        self.count = 0;
        self.sum_micros = 0;
        self.min_micros = i64::MAX;
        self.max_micros = i64::MIN;
    }

    /// Human-readable dump: one line per non-empty bin plus the tails.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "histogram: count={} bin_width={}us",
            self.count, self.bin_width_micros
        ));
        if let (Some(min), Some(max), Some(mean)) = (self.min(), self.max(), self.mean()) {
            out.push_str(&format!(" min={}us max={}us mean={:.1}us", min, max, mean));
        }
        out.push('\n');
        if self.underflow > 0 {
            out.push_str(&format!("  < {:>7}us : {}\n", self.lower_bound_micros(0), self.underflow));
        }
        for (i, &n) in self.bins.iter().enumerate() {
            if n > 0 {
                out.push_str(&format!("  [{:>7}us) : {}\n", self.lower_bound_micros(i), n));
            }
        }
        if self.overflow > 0 {
            out.push_str(&format!(
                " >= {:>7}us : {}\n",
                self.lower_bound_micros(self.bins.len()),
                self.overflow
            ));
        }
        out
    }

    /// JSON snapshot for state files: non-empty bins keyed by lower bound.
    pub fn to_json(&self) -> serde_json::Value {
        let bins: Vec<serde_json::Value> = self
            .bins
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(i, &n)| serde_json::json!([self.lower_bound_micros(i), n]))
            .collect();
        serde_json::json!({
            "count": self.count,
            "bin_width_micros": self.bin_width_micros,
            "underflow": self.underflow,
            "overflow": self.overflow,
            "min_micros": self.min(),
            "max_micros": self.max(),
            "mean_micros": self.mean(),
            "bins": bins,
        })
    }

    /// Lower bound of bin `i` in microseconds.
    fn lower_bound_micros(&self, i: usize) -> i64 {
        (i as i64 - (self.bins.len() / 2) as i64) * self.bin_width_micros
    }
}

impl Default for MicrosHistogram {
    fn default() -> Self {
        MicrosHistogram::new(HISTOGRAM_BIN_WIDTH_MICROS, HISTOGRAM_BIN_COUNT)
    }
}
