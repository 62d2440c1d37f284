// Isochronous clock model
// Maintains the affine mapping between a hardware frame position and
// wall-clock nanoseconds, refreshed from sparse, jittery driver timestamps.

use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_OUTLIER_THRESHOLD_NANOS, DRIFT_NANOS, EXTRA_LATENESS_NANOS,
    LATENESS_FOR_DRIFT_MARGIN_NANOS, NANOS_PER_MICRO, NANOS_PER_SECOND,
};
use crate::histogram::MicrosHistogram;

/// Update-policy state of a [`ClockModel`].
///
/// `Stopped -> Starting` on `start`, `Starting -> Syncing` when the first
/// timestamp sets the anchor, `Syncing -> Running` on the first timestamp
/// whose prediction error is within the drift threshold. Any state returns
/// to `Stopped` via `stop`; `Running` never regresses on its own — large
/// disagreements are absorbed by bounded drift instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Starting,
    Syncing,
    Running,
}

/// Estimates `time ~= marker_nano_time + (position - marker_frame_position)
/// * 1e9 / sample_rate` from periodic hardware timestamps, and answers
/// forward/inverse queries with optimistic and pessimistic variants for
/// buffer scheduling.
///
/// Not thread-safe: every mutator takes `&mut self`, so a producer feeding
/// `process_timestamp` and a consumer querying conversions must be
/// serialized by the caller (typically both run on one dispatch thread).
///
/// One instance per stream; a new stream epoch begins with [`start`],
/// which resets all counters and the jitter histogram.
///
/// [`start`]: ClockModel::start
#[derive(Debug)]
pub struct ClockModel {
    /// Frame count of the last trusted (frame, time) anchor.
    marker_frame_position: i64,
    /// Wall-clock time of the last trusted anchor (ns).
    marker_nano_time: i64,
    /// Frames per second; must be positive before conversions mean anything.
    sample_rate: i32,
    /// Granularity at which the hardware advances position.
    frames_per_burst: i32,
    /// Time between hardware bursts (ns), derived from rate and burst size.
    burst_period_nanos: i64,
    /// Running bound on how late an observed timestamp can be relative to
    /// the prediction (ns). Never below the burst period, since sampling is
    /// asynchronous relative to bursts.
    max_measured_lateness_nanos: i64,
    /// Positive errors beyond this trigger bounded drift instead of holding
    /// the anchor (ns).
    lateness_for_drift_nanos: i64,
    /// Positive errors beyond this force a hard re-anchor (ns).
    outlier_threshold_nanos: i64,
    state: ClockState,
    /// Timestamps accepted since the last `start`.
    timestamp_count: i32,
    /// Timestamps ignored because time or position ran backwards.
    out_of_order_count: u32,
    /// Hard re-anchors forced by errors beyond the outlier threshold.
    outlier_count: u32,
    /// Last accepted (frame, time) pair, for the out-of-order clamp. The
    /// marker can lag the last observation while the anchor is held, so the
    /// clamp must not compare against the marker.
    last_observed: Option<(i64, i64)>,
    /// Distribution of (observed - predicted) in microseconds.
    histogram: MicrosHistogram,
}

impl ClockModel {
    pub fn new() -> Self {
        ClockModel {
            marker_frame_position: 0,
            marker_nano_time: 0,
            sample_rate: 0,
            frames_per_burst: 0,
            burst_period_nanos: 0,
            max_measured_lateness_nanos: 0,
            lateness_for_drift_nanos: LATENESS_FOR_DRIFT_MARGIN_NANOS,
            outlier_threshold_nanos: DEFAULT_OUTLIER_THRESHOLD_NANOS,
            state: ClockState::Stopped,
            timestamp_count: 0,
            out_of_order_count: 0,
            outlier_count: 0,
            last_observed: None,
            histogram: MicrosHistogram::default(),
        }
    }

    /// Begin a new stream epoch at `nano_time` with zero position.
    ///
    /// Resets the counters and jitter histogram; configuration
    /// (sample rate, burst size, outlier threshold) is kept.
    pub fn start(&mut self, nano_time: i64) {
        self.marker_frame_position = 0;
        self.marker_nano_time = nano_time;
        self.state = ClockState::Starting;
        self.timestamp_count = 0;
        self.out_of_order_count = 0;
        self.outlier_count = 0;
        self.max_measured_lateness_nanos = self.burst_period_nanos;
        self.last_observed = None;
        self.histogram.clear();
        debug!(nano_time, "clock model started");
    }

    /// Stop the model. Queries before the next `start` extrapolate from the
    /// stale anchor and are not meaningful; `is_running` reports false.
    pub fn stop(&mut self, nano_time: i64) {
        debug!(
            nano_time,
            timestamps = self.timestamp_count,
            out_of_order = self.out_of_order_count,
            outliers = self.outlier_count,
            "clock model stopped"
        );
        self.state = ClockState::Stopped;
    }

    pub fn is_starting(&self) -> bool {
        self.state == ClockState::Starting
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Feed one observed (frame, time) pair from the hardware.
    ///
    /// Out-of-order or repeated observations are ignored and counted.
    /// While running, early timestamps snap the anchor (an early clock is
    /// never a scheduling hazard), late timestamps within the outlier
    /// threshold move the anchor by at most [`DRIFT_NANOS`] per update,
    /// and errors beyond the threshold force a hard re-anchor.
    pub fn process_timestamp(&mut self, frame_position: i64, nano_time: i64) {
        if self.state == ClockState::Stopped {
            return;
        }

        // Defensive clamp: never let the observed clock run backwards.
        if let Some((last_frame, last_nanos)) = self.last_observed {
            if nano_time <= last_nanos || frame_position < last_frame {
                self.out_of_order_count = self.out_of_order_count.saturating_add(1);
                debug!(frame_position, nano_time, "ignoring out-of-order timestamp");
                return;
            }
        }
        self.timestamp_count = self.timestamp_count.saturating_add(1);
        self.last_observed = Some((frame_position, nano_time));

        match self.state {
            ClockState::Stopped => {}
            ClockState::Starting => {
                // First observation: trust it outright, no error to record.
                self.marker_frame_position = frame_position;
                self.marker_nano_time = nano_time;
                self.state = ClockState::Syncing;
                debug!(frame_position, nano_time, "first timestamp, syncing");
            }
            ClockState::Syncing => {
                let predicted = self.convert_position_to_time(frame_position);
                let error_nanos = nano_time - predicted;
                self.record_error(error_nanos);
                // Snap while confidence builds; run once prediction agrees.
                self.marker_frame_position = frame_position;
                self.marker_nano_time = nano_time;
                if error_nanos.abs() <= self.lateness_for_drift_nanos {
                    self.state = ClockState::Running;
                    debug!(frame_position, nano_time, "synchronized, running");
                }
            }
            ClockState::Running => {
                let predicted = self.convert_position_to_time(frame_position);
                let error_nanos = nano_time - predicted;
                self.record_error(error_nanos);

                if error_nanos > 0 {
                    let lateness = error_nanos + EXTRA_LATENESS_NANOS;
                    if lateness > self.max_measured_lateness_nanos
                        && error_nanos <= self.outlier_threshold_nanos
                    {
                        self.max_measured_lateness_nanos = lateness;
                    }
                }

                if error_nanos < 0 {
                    // Hardware clock ran faster than the model thought.
                    if nano_time >= self.marker_nano_time {
                        self.marker_frame_position = frame_position;
                        self.marker_nano_time = nano_time;
                    } else {
                        self.out_of_order_count = self.out_of_order_count.saturating_add(1);
                    }
                } else if error_nanos > self.outlier_threshold_nanos {
                    warn!(
                        error_nanos,
                        frame_position, nano_time, "timestamp outlier, re-anchoring"
                    );
                    self.marker_frame_position = frame_position;
                    self.marker_nano_time = nano_time;
                    self.outlier_count = self.outlier_count.saturating_add(1);
                } else if error_nanos > self.lateness_for_drift_nanos {
                    // Persistently late: absorb gradually, never snap.
                    self.marker_frame_position = frame_position;
                    self.marker_nano_time = predicted + DRIFT_NANOS;
                }
                // Small positive errors are sampling noise; hold the anchor.
            }
        }
    }

    /// Set the stream sample rate. Returns false and keeps the previous
    /// value if `sample_rate` is not positive. The anchor is kept; the
    /// burst period and drift threshold are recomputed.
    pub fn set_sample_rate(&mut self, sample_rate: i32) -> bool {
        if sample_rate <= 0 {
            warn!(sample_rate, "rejecting non-positive sample rate");
            return false;
        }
        self.sample_rate = sample_rate;
        self.update_burst_period();
        true
    }

    /// Set the hardware burst size. Returns false and keeps the previous
    /// value if `frames_per_burst` is not positive.
    pub fn set_frames_per_burst(&mut self, frames_per_burst: i32) -> bool {
        if frames_per_burst <= 0 {
            warn!(frames_per_burst, "rejecting non-positive frames per burst");
            return false;
        }
        self.frames_per_burst = frames_per_burst;
        self.update_burst_period();
        true
    }

    /// Force-set the anchor, bypassing drift. For callers with independent
    /// trusted knowledge of the true position/time (flush, seek). Does not
    /// change state.
    pub fn set_position_and_time(&mut self, frame_position: i64, nano_time: i64) {
        self.marker_frame_position = frame_position;
        self.marker_nano_time = nano_time;
        self.last_observed = Some((frame_position, nano_time));
    }

    /// Set the hard re-anchor threshold. Non-positive values are rejected.
    pub fn set_outlier_threshold_nanos(&mut self, nanos: i64) -> bool {
        if nanos <= 0 {
            warn!(nanos, "rejecting non-positive outlier threshold");
            return false;
        }
        self.outlier_threshold_nanos = nanos;
        true
    }

    pub fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    pub fn frames_per_burst(&self) -> i32 {
        self.frames_per_burst
    }

    pub fn burst_period_nanos(&self) -> i64 {
        self.burst_period_nanos
    }

    pub fn timestamp_count(&self) -> i32 {
        self.timestamp_count
    }

    pub fn out_of_order_count(&self) -> u32 {
        self.out_of_order_count
    }

    pub fn outlier_count(&self) -> u32 {
        self.outlier_count
    }

    /// The jitter distribution accumulated since the last `start`.
    pub fn histogram(&self) -> &MicrosHistogram {
        &self.histogram
    }

    /// Most likely wall-clock time for `frame_position`.
    pub fn convert_position_to_time(&self, frame_position: i64) -> i64 {
        self.marker_nano_time
            + self.convert_delta_position_to_time(frame_position - self.marker_frame_position)
    }

    /// Pessimistic (latest plausible) wall-clock time for `frame_position`:
    /// the most likely time plus the measured lateness window. A consumer
    /// waking before this may find the data not yet available.
    pub fn convert_position_to_latest_time(&self, frame_position: i64) -> i64 {
        self.convert_position_to_time(frame_position) + self.late_time_offset_nanos()
    }

    /// Most likely frame position at `nano_time`.
    pub fn convert_time_to_position(&self, nano_time: i64) -> i64 {
        self.marker_frame_position
            + self.convert_delta_time_to_position(nano_time - self.marker_nano_time)
    }

    /// Pessimistic (earliest guaranteed) frame position at `nano_time`:
    /// interprets `nano_time` as a latest-time bound, so the result is
    /// never later than `convert_time_to_position(nano_time)`.
    pub fn convert_latest_time_to_position(&self, nano_time: i64) -> i64 {
        self.convert_time_to_position(nano_time - self.late_time_offset_nanos())
    }

    /// Duration of `frames_delta` frames in nanoseconds. Pure scaling by
    /// the sample rate, no anchor dependency; zero if the rate is unset.
    pub fn convert_delta_position_to_time(&self, frames_delta: i64) -> i64 {
        if self.sample_rate <= 0 {
            return 0;
        }
        round_div(
            frames_delta as i128 * NANOS_PER_SECOND as i128,
            self.sample_rate as i128,
        )
    }

    /// Frame count spanned by `nanos_delta` nanoseconds.
    pub fn convert_delta_time_to_position(&self, nanos_delta: i64) -> i64 {
        if self.sample_rate <= 0 {
            return 0;
        }
        round_div(
            nanos_delta as i128 * self.sample_rate as i128,
            NANOS_PER_SECOND as i128,
        )
    }

    /// Margin separating the "latest" variants from the most likely
    /// estimates (ns). At least one burst period.
    pub fn late_time_offset_nanos(&self) -> i64 {
        self.max_measured_lateness_nanos.max(self.burst_period_nanos)
    }

    /// Human-readable model state for a log sink.
    pub fn dump(&self) -> String {
        format!(
            "clock model: state={:?} marker=({} frames, {} ns)\n  \
             sample_rate={} frames_per_burst={} burst_period={} ns\n  \
             max_lateness={} ns lateness_for_drift={} ns outlier_threshold={} ns\n  \
             timestamps={} out_of_order={} outliers={}\n",
            self.state,
            self.marker_frame_position,
            self.marker_nano_time,
            self.sample_rate,
            self.frames_per_burst,
            self.burst_period_nanos,
            self.max_measured_lateness_nanos,
            self.lateness_for_drift_nanos,
            self.outlier_threshold_nanos,
            self.timestamp_count,
            self.out_of_order_count,
            self.outlier_count,
        )
    }

    /// Human-readable jitter distribution for a log sink.
    pub fn dump_histogram(&self) -> String {
        self.histogram.dump()
    }

    /// JSON snapshot for state files.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": format!("{:?}", self.state),
            "marker_frame_position": self.marker_frame_position,
            "marker_nano_time": self.marker_nano_time,
            "sample_rate": self.sample_rate,
            "frames_per_burst": self.frames_per_burst,
            "burst_period_nanos": self.burst_period_nanos,
            "max_measured_lateness_nanos": self.max_measured_lateness_nanos,
            "lateness_for_drift_nanos": self.lateness_for_drift_nanos,
            "outlier_threshold_nanos": self.outlier_threshold_nanos,
            "timestamp_count": self.timestamp_count,
            "out_of_order_count": self.out_of_order_count,
            "outlier_count": self.outlier_count,
            "jitter_histogram": self.histogram.to_json(),
        })
    }

    fn record_error(&mut self, error_nanos: i64) {
        self.histogram
            .add(round_div(error_nanos as i128, NANOS_PER_MICRO as i128));
    }

    fn update_burst_period(&mut self) {
        if self.sample_rate > 0 && self.frames_per_burst > 0 {
            self.burst_period_nanos = round_div(
                self.frames_per_burst as i128 * NANOS_PER_SECOND as i128,
                self.sample_rate as i128,
            );
            self.lateness_for_drift_nanos =
                self.burst_period_nanos + LATENESS_FOR_DRIFT_MARGIN_NANOS;
            if self.burst_period_nanos > self.max_measured_lateness_nanos {
                self.max_measured_lateness_nanos = self.burst_period_nanos;
            }
        }
    }
}

impl Default for ClockModel {
    fn default() -> Self {
        ClockModel::new()
    }
}

/// Division rounding to nearest, away from zero on ties. `den` must be
/// positive. Intermediate math is i128 so multi-hour frame counts scaled
/// by 1e9 cannot overflow.
fn round_div(num: i128, den: i128) -> i64 {
    let q = if num >= 0 {
        (num + den / 2) / den
    } else {
        (num - den / 2) / den
    };
    q as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NANOS_PER_MILLI;

    /// Model brought to RUNNING at 48 kHz with anchor (48000 frames, 1 s).
    fn running_model() -> ClockModel {
        let mut model = ClockModel::new();
        model.set_sample_rate(48000);
        model.set_frames_per_burst(96);
        model.start(0);
        model.process_timestamp(0, 0);
        model.process_timestamp(48000, NANOS_PER_SECOND);
        assert!(model.is_running());
        model
    }

    #[test]
    fn test_state_transition_scenario() {
        let mut model = ClockModel::new();
        model.start(0);
        assert!(model.is_starting());
        model.process_timestamp(0, 0);
        assert_eq!(model.state(), ClockState::Syncing);
        model.set_sample_rate(48000);
        model.process_timestamp(48000, 1_000_000_000);
        assert!(model.is_running());
        let t = model.convert_position_to_time(96000);
        assert!((t - 2_000_000_000).abs() < NANOS_PER_MILLI);
    }

    #[test]
    fn test_round_trip_identity() {
        let model = running_model();
        for &position in &[0i64, 1, 47, 48000, 96001, 10_000_000_000] {
            let t = model.convert_position_to_time(position);
            let back = model.convert_time_to_position(t);
            assert!(
                (back - position).abs() <= 1,
                "position {} round-tripped to {}",
                position,
                back
            );
        }
    }

    #[test]
    fn test_time_to_position_monotonic() {
        let model = running_model();
        let mut prev = model.convert_time_to_position(0);
        for t in (0..5 * NANOS_PER_SECOND).step_by(7_777_777) {
            let p = model.convert_time_to_position(t);
            assert!(p >= prev);
            prev = p;
        }
    }

    #[test]
    fn test_latest_time_pessimism() {
        let model = running_model();
        for &position in &[0i64, 48000, 96000, 1_000_000] {
            assert!(
                model.convert_position_to_latest_time(position)
                    >= model.convert_position_to_time(position)
            );
        }
    }

    #[test]
    fn test_latest_position_pessimism() {
        let model = running_model();
        for &t in &[0i64, NANOS_PER_SECOND, 3 * NANOS_PER_SECOND] {
            assert!(model.convert_latest_time_to_position(t) <= model.convert_time_to_position(t));
        }
    }

    #[test]
    fn test_delta_linearity() {
        let model = running_model();
        for &n in &[1i64, 48, 4800, 123_456] {
            let one = model.convert_delta_position_to_time(n);
            let two = model.convert_delta_position_to_time(2 * n);
            assert!((two - 2 * one).abs() <= 1);
            let back = model.convert_delta_time_to_position(one);
            assert!((back - n).abs() <= 1);
        }
    }

    #[test]
    fn test_drift_bounded_on_late_timestamp() {
        let mut model = running_model();
        // Next burst arrives 50 ms later than predicted: the anchor may move
        // forward by at most DRIFT_NANOS past the prediction, never snap.
        let frame = 96000;
        let predicted = model.convert_position_to_time(frame);
        model.process_timestamp(frame, predicted + 50 * NANOS_PER_MILLI);
        let adjusted = model.convert_position_to_time(frame);
        assert!(adjusted - predicted <= DRIFT_NANOS);
        assert!(adjusted >= predicted);
    }

    #[test]
    fn test_early_timestamp_snaps() {
        let mut model = running_model();
        let frame = 96000;
        let predicted = model.convert_position_to_time(frame);
        let early = predicted - 200_000;
        model.process_timestamp(frame, early);
        assert_eq!(model.convert_position_to_time(frame), early);
    }

    #[test]
    fn test_outlier_forces_reanchor() {
        let mut model = running_model();
        model.set_outlier_threshold_nanos(10 * NANOS_PER_MILLI);
        let frame = 96000;
        let observed = model.convert_position_to_time(frame) + 50 * NANOS_PER_MILLI;
        model.process_timestamp(frame, observed);
        assert_eq!(model.outlier_count(), 1);
        assert_eq!(model.convert_position_to_time(frame), observed);
    }

    #[test]
    fn test_out_of_order_ignored() {
        let mut model = running_model();
        let before = model.convert_position_to_time(48000);
        let count = model.timestamp_count();
        // Repeats and regressions must not corrupt the anchor.
        model.process_timestamp(48000, NANOS_PER_SECOND);
        model.process_timestamp(96000, NANOS_PER_SECOND / 2);
        model.process_timestamp(0, 2 * NANOS_PER_SECOND);
        assert_eq!(model.timestamp_count(), count);
        assert_eq!(model.out_of_order_count(), 3);
        assert_eq!(model.convert_position_to_time(48000), before);
    }

    #[test]
    fn test_frame_regression_behind_held_anchor_ignored() {
        let mut model = running_model();
        // Small positive error holds the anchor at (48000, 1 s), so the
        // marker now lags the observed frame.
        let held = model.convert_position_to_time(96000) + NANOS_PER_MILLI;
        model.process_timestamp(96000, held);
        let before = model.convert_position_to_time(48000);
        // Regressed frame with advancing time must be clamped, not taken
        // for a huge positive error that re-anchors the model.
        model.process_timestamp(50000, 3 * NANOS_PER_SECOND);
        assert_eq!(model.out_of_order_count(), 1);
        assert_eq!(model.outlier_count(), 0);
        assert_eq!(model.convert_position_to_time(48000), before);
    }

    #[test]
    fn test_invalid_sample_rate_rejected() {
        let mut model = ClockModel::new();
        assert!(model.set_sample_rate(44100));
        assert!(!model.set_sample_rate(0));
        assert!(!model.set_sample_rate(-1));
        assert_eq!(model.sample_rate(), 44100);
    }

    #[test]
    fn test_invalid_frames_per_burst_rejected() {
        let mut model = ClockModel::new();
        assert!(model.set_frames_per_burst(64));
        assert!(!model.set_frames_per_burst(0));
        assert!(!model.set_frames_per_burst(-8));
        assert_eq!(model.frames_per_burst(), 64);
    }

    #[test]
    fn test_burst_period_derived() {
        let mut model = ClockModel::new();
        model.set_sample_rate(48000);
        model.set_frames_per_burst(48);
        assert_eq!(model.burst_period_nanos(), NANOS_PER_MILLI);
        assert!(model.late_time_offset_nanos() >= model.burst_period_nanos());
    }

    #[test]
    fn test_histogram_counts_all_but_first() {
        let mut model = ClockModel::new();
        model.set_sample_rate(48000);
        model.start(0);
        let n = 10;
        for i in 0..n {
            // Fixed synthetic jitter pattern: alternately 20 us late / on time.
            let jitter = if i % 2 == 0 { 20_000 } else { 0 };
            model.process_timestamp(i * 480, i * 10 * NANOS_PER_MILLI + jitter);
        }
        assert_eq!(model.histogram().count(), (n - 1) as u64);
        assert_eq!(model.timestamp_count(), n as i32);
    }

    #[test]
    fn test_lateness_window_grows() {
        let mut model = running_model();
        let offset_before = model.late_time_offset_nanos();
        let frame = 96000;
        let predicted = model.convert_position_to_time(frame);
        model.process_timestamp(frame, predicted + 5 * NANOS_PER_MILLI);
        assert!(model.late_time_offset_nanos() >= 5 * NANOS_PER_MILLI);
        assert!(model.late_time_offset_nanos() >= offset_before);
    }

    #[test]
    fn test_stop_reports_not_running() {
        let mut model = running_model();
        model.stop(3 * NANOS_PER_SECOND);
        assert!(!model.is_running());
        assert!(!model.is_starting());
        // Timestamps after stop are ignored entirely.
        model.process_timestamp(200_000, 5 * NANOS_PER_SECOND);
        assert_eq!(model.state(), ClockState::Stopped);
    }

    #[test]
    fn test_set_position_and_time_bypasses_drift() {
        let mut model = running_model();
        model.set_position_and_time(1_000_000, 30 * NANOS_PER_SECOND);
        assert!(model.is_running());
        assert_eq!(model.convert_position_to_time(1_000_000), 30 * NANOS_PER_SECOND);
    }

    #[test]
    fn test_conversions_without_rate_do_not_crash() {
        let model = ClockModel::new();
        assert_eq!(model.convert_position_to_time(1000), 0);
        assert_eq!(model.convert_time_to_position(1000), 0);
        assert_eq!(model.convert_delta_position_to_time(1000), 0);
        assert_eq!(model.convert_delta_time_to_position(1000), 0);
    }

    #[test]
    fn test_sample_rate_change_keeps_anchor() {
        let mut model = running_model();
        let anchor_time = model.convert_position_to_time(48000);
        model.set_sample_rate(96000);
        assert_eq!(model.convert_position_to_time(48000), anchor_time);
        // One second of frames at the new rate.
        let t = model.convert_delta_position_to_time(96000);
        assert_eq!(t, NANOS_PER_SECOND);
    }

    #[test]
    fn test_round_div_rounds_to_nearest() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(-5, 2), -3);
        assert_eq!(round_div(4, 2), 2);
        assert_eq!(round_div(999_999_999, 1_000_000_000), 1);
    }

    #[test]
    fn test_dump_and_json() {
        let model = running_model();
        assert!(model.dump().contains("Running"));
        let json = model.to_json();
        assert_eq!(json["sample_rate"], 48000);
        assert_eq!(json["state"], "Running");
    }
}
