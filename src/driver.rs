//! The two benchmark passes.
//!
//! Each pass seeds its own [`Draws`], builds its collection outside the timed
//! scope, and then times exactly one call of `speak` per element. The passes
//! share no state.

use alloc::{boxed::Box, vec::Vec};
use std::io::{self, Write};

use crate::{config::BenchConfig, draws::Draws, dynamic, erased, timing::ScopeTimer};

/// Label of the trait-object pass.
pub const DYNAMIC_LABEL: &str = "dynamic";

/// Label of the hand-built vtable pass.
pub const STATIC_LABEL: &str = "static";

/// Calls `speak` on every trait object once.
#[inline(never)]
pub fn speak_all_dynamic(animals: &[Box<dyn dynamic::Animal>]) {
    for animal in animals {
        core::hint::black_box(animal.speak());
    }
}

/// Calls `speak` on every wrapped animal once, without validity checks.
///
/// # Safety
///
/// No element of `wraps` may be empty.
#[inline(never)]
pub unsafe fn speak_all_erased(wraps: &[erased::Wrap]) {
    for wrap in wraps {
        // SAFETY: The wrapper is not empty (guaranteed by the caller).
        core::hint::black_box(unsafe { wrap.speak_unchecked() });
    }
}

/// Builds the trait-object collection and times one pass over it, reporting
/// to `sink`.
pub fn bench_dynamic<W: Write>(config: &BenchConfig, sink: W) {
    let span = tracing::info_span!("pass", label = DYNAMIC_LABEL, count = config.count);
    let _enter = span.enter();

    let animals: Vec<_> = dynamic::build(Draws::new(config.seed, config.count));
    {
        let _timer = ScopeTimer::with_sink(DYNAMIC_LABEL, sink);
        speak_all_dynamic(&animals);
    }
}

/// Builds the erased collection and times one pass over it, reporting to
/// `sink`.
pub fn bench_static<W: Write>(config: &BenchConfig, sink: W) {
    let span = tracing::info_span!("pass", label = STATIC_LABEL, count = config.count);
    let _enter = span.enter();

    let wraps: Vec<_> = erased::build(Draws::new(config.seed, config.count));
    {
        let _timer = ScopeTimer::with_sink(STATIC_LABEL, sink);
        // SAFETY: Every element built by `erased::build` is valid, and nothing
        // has taken from them.
        unsafe { speak_all_erased(&wraps) };
    }
}

/// Runs the dynamic pass and then the static pass, reporting to `sink`.
pub fn run_with_sink<W: Write>(config: &BenchConfig, mut sink: W) {
    tracing::info!(count = config.count, seed = config.seed, "starting benchmark");
    bench_dynamic(config, &mut sink);
    bench_static(config, &mut sink);
}

/// Runs both passes, reporting to standard output.
pub fn run(config: &BenchConfig) {
    run_with_sink(config, io::stdout());
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    fn assert_timing_line(line: &str, label: &str) {
        let rest = line
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(": "))
            .and_then(|rest| rest.strip_suffix('s'))
            .unwrap_or_else(|| panic!("unexpected line {line:?}"));
        let (seconds, millis) = rest.split_once('.').unwrap();
        assert!(seconds.parse::<u64>().is_ok(), "{line:?}");
        let millis = millis.parse::<u16>();
        assert!(matches!(millis, Ok(0..=999)), "{line:?}");
    }

    #[test]
    fn test_run_prints_two_lines() {
        let config = BenchConfig {
            count: 1000,
            seed: 0,
        };
        let mut out = Vec::new();
        run_with_sink(&config, &mut out);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_timing_line(lines[0], DYNAMIC_LABEL);
        assert_timing_line(lines[1], STATIC_LABEL);
    }

    #[test]
    fn test_empty_collections() {
        let config = BenchConfig { count: 0, seed: 0 };
        let mut out = Vec::new();
        run_with_sink(&config, &mut out);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
