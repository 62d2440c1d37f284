// Shared constants for the clock model and timestamp diagnostics

/// Nanoseconds per second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// Nanoseconds per microsecond.
pub const NANOS_PER_MICRO: i64 = 1_000;

/// Bounded drift applied to the anchor per late update (ns).
/// Late timestamps move the model forward by at most this much per
/// observation instead of snapping, so derived scheduling times never jump.
pub const DRIFT_NANOS: i64 = 10_000;

/// Margin added on top of the largest observed positive error when
/// growing the lateness window (ns).
pub const EXTRA_LATENESS_NANOS: i64 = 100_000;

/// Added to the burst period to form the drift-trigger threshold (ns).
/// Errors below `burst_period + margin` are plain sampling noise.
pub const LATENESS_FOR_DRIFT_MARGIN_NANOS: i64 = 100_000;

/// Default hard re-anchor threshold (ns). A positive error beyond this is
/// treated as a stream restart rather than drift. Deliberately large so the
/// normal path is always bounded drift; callers with better knowledge of
/// their hardware can tighten it.
pub const DEFAULT_OUTLIER_THRESHOLD_NANOS: i64 = 500_000_000;

/// Default jitter histogram bin width (us).
pub const HISTOGRAM_BIN_WIDTH_MICROS: i64 = 100;

/// Default jitter histogram bin count (total, split evenly around zero).
pub const HISTOGRAM_BIN_COUNT: usize = 64;

/// Default discontinuity limit for the timestamp verifier (ns).
/// Prediction errors beyond 50 ms are counted as discontinuities.
pub const DEFAULT_DISCONTINUITY_LIMIT_NANOS: i64 = 50 * NANOS_PER_MILLI;
