//! Wall-clock timing of a labeled scope.
//!
//! A [`ScopeTimer`] starts a monotonic clock when it is created and writes
//! `<label>: <seconds>.<milliseconds>s` when it is dropped, whether the scope
//! ends normally, through `?`, or by unwinding.

use alloc::{borrow::Cow, format, string::String};
use core::time::Duration;
use std::{
    io::{self, Write},
    time::Instant,
};

/// Formats a timing line such as `dynamic: 0.842s`.
///
/// The elapsed time is truncated to whole milliseconds. The millisecond part
/// is printed without padding, so 1005ms reads `1.5s`.
pub fn format_elapsed(label: &str, elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!("{label}: {}.{}s", millis / 1000, millis % 1000)
}

/// Guard that reports the time between its creation and its drop.
///
/// Reports go to standard output unless another sink is given with
/// [`ScopeTimer::with_sink`].
///
/// # Examples
///
/// ```
/// use vtable_bench::timing::ScopeTimer;
///
/// let mut out = Vec::new();
/// {
///     let _timer = ScopeTimer::with_sink("noop", &mut out);
/// }
/// let line = String::from_utf8(out).unwrap();
/// assert!(line.starts_with("noop: 0."));
/// ```
#[must_use = "the scope is timed until the timer is dropped"]
pub struct ScopeTimer<W: Write = io::Stdout> {
    label: Cow<'static, str>,
    start: Instant,
    sink: W,
}

impl ScopeTimer {
    /// Starts timing a scope that reports to standard output.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self::with_sink(label, io::stdout())
    }
}

impl<W: Write> ScopeTimer<W> {
    /// Starts timing a scope that reports to `sink`.
    pub fn with_sink(label: impl Into<Cow<'static, str>>, sink: W) -> Self {
        let label = label.into();
        tracing::trace!(label = %label, "timer started");
        Self {
            label,
            start: Instant::now(),
            sink,
        }
    }

    /// Returns the label this timer reports under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl<W: Write> Drop for ScopeTimer<W> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(
            label = %self.label,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "scope finished"
        );

        let line = format_elapsed(&self.label, elapsed);
        // Nothing sensible can be done about a closed stdout from inside drop.
        let _ = writeln!(self.sink, "{line}").and_then(|()| self.sink.flush());
    }
}

/// Times the rest of the enclosing block.
///
/// Expands to an anonymous [`ScopeTimer`] binding, so the report is written
/// when the block ends. An optional second argument selects the sink.
///
/// ```
/// use vtable_bench::benchmark;
///
/// let mut out = Vec::new();
/// {
///     benchmark!("work", &mut out);
///     let _sum: u64 = (0..1000).sum();
/// }
/// assert!(String::from_utf8(out).unwrap().starts_with("work: "));
/// ```
///
/// [`ScopeTimer`]: crate::timing::ScopeTimer
#[macro_export]
macro_rules! benchmark {
    ($label:expr) => {
        let _scope_timer = $crate::timing::ScopeTimer::new($label);
    };
    ($label:expr, $sink:expr) => {
        let _scope_timer = $crate::timing::ScopeTimer::with_sink($label, $sink);
    };
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(
            format_elapsed("dynamic", Duration::from_millis(842)),
            "dynamic: 0.842s"
        );
        assert_eq!(
            format_elapsed("static", Duration::from_millis(1005)),
            "static: 1.5s"
        );
        assert_eq!(format_elapsed("x", Duration::ZERO), "x: 0.0s");
        assert_eq!(
            format_elapsed("x", Duration::from_millis(2050)),
            "x: 2.50s"
        );
        assert_eq!(
            format_elapsed("x", Duration::from_micros(12_999_999)),
            "x: 12.999s"
        );
    }

    #[test]
    fn test_timer_writes_one_line_on_drop() {
        let mut out = Vec::new();
        {
            let timer = ScopeTimer::with_sink("scope", &mut out);
            assert_eq!(timer.label(), "scope");
        }

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("scope: "));
        assert!(text.ends_with("s\n"));
    }

    #[test]
    fn test_timer_reports_during_unwinding() {
        use std::sync::{Arc, Mutex};

        struct Shared(Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().write(buf)
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let out = Arc::new(Mutex::new(Vec::new()));
        let sink = Shared(out.clone());
        let result = std::panic::catch_unwind(move || {
            let _timer = ScopeTimer::with_sink("unwound", sink);
            panic!("boom");
        });

        assert!(result.is_err());
        let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        assert!(text.starts_with("unwound: "));
    }

    #[test]
    fn test_benchmark_macro_times_enclosing_block() {
        let mut out = Vec::new();
        {
            benchmark!("block", &mut out);
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("block: "));
    }
}
