// Timestamp sequence verifier
// Independent diagnostic over raw (frame, time) pairs from a driver:
// counts monotonicity violations and discontinuities and accumulates
// jitter moments against a linear fit from the first accepted timestamp.

use serde::Serialize;
use tracing::warn;

use crate::constants::{DEFAULT_DISCONTINUITY_LIMIT_NANOS, NANOS_PER_SECOND};

/// Counters and jitter moments published by a [`TimestampVerifier`].
#[derive(Debug, Clone, Serialize)]
pub struct VerifierSnapshot {
    pub sample_rate: i32,
    pub accepted_count: u64,
    pub not_monotonic_count: u64,
    pub discontinuity_count: u64,
    pub peak_lateness_nanos: i64,
    pub peak_earliness_nanos: i64,
    pub jitter_mean_nanos: f64,
    pub jitter_std_dev_nanos: f64,
}

/// Validates a hardware timestamp sequence without modeling it.
///
/// Where the clock model absorbs error to keep scheduling stable, the
/// verifier preserves it: every accepted timestamp is compared against a
/// straight line through the first one, so persistent drift, flaky
/// hardware, and delivery stalls stay visible in the counters. Useful for
/// qualifying a driver before trusting its timestamps in production.
///
/// Not thread-safe; serialize access externally like the model itself.
#[derive(Debug)]
pub struct TimestampVerifier {
    /// Frames per second used for the linear fit.
    sample_rate: i32,
    /// Prediction errors beyond this magnitude count as discontinuities
    /// rather than jitter.
    discontinuity_limit_nanos: i64,
    /// Reference (frame, time) pair: the first accepted timestamp.
    reference: Option<(i64, i64)>,
    /// Most recent accepted (frame, time) pair.
    last: Option<(i64, i64)>,
    accepted_count: u64,
    /// Timestamps where frames or time went backwards.
    not_monotonic_count: u64,
    /// Timestamps whose error exceeded the discontinuity limit.
    discontinuity_count: u64,
    /// Largest positive prediction error seen.
    peak_lateness_nanos: i64,
    /// Largest negative prediction error seen (as a magnitude).
    peak_earliness_nanos: i64,
    // Welford accumulators over per-sample jitter, in nanoseconds.
    jitter_mean: f64,
    jitter_m2: f64,
    jitter_n: u64,
}

impl TimestampVerifier {
    /// A verifier for a stream at `sample_rate`. A non-positive rate is
    /// clamped to 1 with a warning so the fit stays defined.
    pub fn new(sample_rate: i32) -> Self {
        let sample_rate = if sample_rate > 0 {
            sample_rate
        } else {
            warn!(sample_rate, "clamping non-positive verifier sample rate to 1");
            1
        };
        TimestampVerifier {
            sample_rate,
            discontinuity_limit_nanos: DEFAULT_DISCONTINUITY_LIMIT_NANOS,
            reference: None,
            last: None,
            accepted_count: 0,
            not_monotonic_count: 0,
            discontinuity_count: 0,
            peak_lateness_nanos: 0,
            peak_earliness_nanos: 0,
            jitter_mean: 0.0,
            jitter_m2: 0.0,
            jitter_n: 0,
        }
    }

    /// Override the discontinuity limit. Non-positive values are rejected.
    pub fn set_discontinuity_limit_nanos(&mut self, nanos: i64) -> bool {
        if nanos <= 0 {
            warn!(nanos, "rejecting non-positive discontinuity limit");
            return false;
        }
        self.discontinuity_limit_nanos = nanos;
        true
    }

    /// Feed one observed (frame, time) pair.
    pub fn add(&mut self, frame_position: i64, nano_time: i64) {
        if let Some((last_frame, last_nanos)) = self.last {
            if frame_position < last_frame || nano_time <= last_nanos {
                self.not_monotonic_count += 1;
                return;
            }
        }

        let (ref_frame, ref_nanos) = match self.reference {
            Some(r) => r,
            None => {
                // First timestamp defines the fit; nothing to compare yet.
                self.reference = Some((frame_position, nano_time));
                self.last = Some((frame_position, nano_time));
                self.accepted_count = 1;
                return;
            }
        };

        self.accepted_count += 1;
        self.last = Some((frame_position, nano_time));

        let frames_delta = (frame_position - ref_frame) as i128;
        let predicted =
            ref_nanos + (frames_delta * NANOS_PER_SECOND as i128 / self.sample_rate as i128) as i64;
        let error_nanos = nano_time - predicted;

        if error_nanos.abs() > self.discontinuity_limit_nanos {
            self.discontinuity_count += 1;
            return;
        }

        if error_nanos > self.peak_lateness_nanos {
            self.peak_lateness_nanos = error_nanos;
        }
        if -error_nanos > self.peak_earliness_nanos {
            self.peak_earliness_nanos = -error_nanos;
        }

        // Welford update; float math stays confined to the diagnostics.
        self.jitter_n += 1;
        let x = error_nanos as f64;
        let delta = x - self.jitter_mean;
        self.jitter_mean += delta / self.jitter_n as f64;
        self.jitter_m2 += delta * (x - self.jitter_mean);
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    pub fn not_monotonic_count(&self) -> u64 {
        self.not_monotonic_count
    }

    pub fn discontinuity_count(&self) -> u64 {
        self.discontinuity_count
    }

    /// Mean jitter of the accepted, in-range samples (ns).
    pub fn jitter_mean_nanos(&self) -> f64 {
        self.jitter_mean
    }

    /// Population standard deviation of jitter (ns); zero below two samples.
    pub fn jitter_std_dev_nanos(&self) -> f64 {
        if self.jitter_n < 2 {
            0.0
        } else {
            (self.jitter_m2 / self.jitter_n as f64).sqrt()
        }
    }

    pub fn snapshot(&self) -> VerifierSnapshot {
        VerifierSnapshot {
            sample_rate: self.sample_rate,
            accepted_count: self.accepted_count,
            not_monotonic_count: self.not_monotonic_count,
            discontinuity_count: self.discontinuity_count,
            peak_lateness_nanos: self.peak_lateness_nanos,
            peak_earliness_nanos: self.peak_earliness_nanos,
            jitter_mean_nanos: self.jitter_mean,
            jitter_std_dev_nanos: self.jitter_std_dev_nanos(),
        }
    }

    /// Human-readable summary for a log sink.
    pub fn dump(&self) -> String {
        format!(
            "timestamp verifier: rate={} accepted={} not_monotonic={} discontinuities={}\n  \
             jitter mean={:.1} ns std_dev={:.1} ns peak late={} ns peak early={} ns\n",
            self.sample_rate,
            self.accepted_count,
            self.not_monotonic_count,
            self.discontinuity_count,
            self.jitter_mean,
            self.jitter_std_dev_nanos(),
            self.peak_lateness_nanos,
            self.peak_earliness_nanos,
        )
    }
}
