//! # Traffic Scenarios
//!
//! A conformant skid buffer must pass every phase on both profiles with identical scoreboards.

use pretty_assertions::assert_eq;
use rstest::rstest;
use skidcheck::config::ResetKind;
use skidcheck::{Pattern, Profile, RunEnd};

use crate::common::harness::TestBench;

#[test]
fn test_scenario_a_no_backpressure() {
    let report = TestBench::default_width()
        .with_patterns(&[Pattern::NoBackpressure])
        .run();

    assert!(report.passed(), "{}", report.diagnostics());
    assert_eq!(report.end, RunEnd::StimulusComplete);
    assert_eq!(report.input.len(), 100);
    assert_eq!(report.output.len(), 100);
    assert_eq!(report.input.values(), report.output.values());
    assert_eq!(report.matched, 100);

    // Ready is always high downstream, so nothing ever stalls.
    assert_eq!(report.stats.input.stalls, 0);
    assert_eq!(report.stats.output.stalls, 0);
}

#[test]
fn test_scenario_a_timeline() {
    let report = TestBench::default_width()
        .with_patterns(&[Pattern::NoBackpressure])
        .run();

    // quiescent + one item per cycle + drain
    assert_eq!(report.stats.stimulus_cycles, 2 + 100 + 4);
    assert_eq!(report.stats.reset_cycles, 3);
    // reset, the post-reset check cycle, then one rising edge between samples
    assert_eq!(report.stats.cycles, 3 + 1 + 105);
    assert_eq!(report.stats.end_time, 1090);
    assert_eq!(report.stats.time_unit, "ns");
    assert_eq!(report.input.entries()[0].cycle, 4 + 2);
}

#[test]
fn test_scenario_b_random_backpressure() {
    let report = TestBench::default_width()
        .with_patterns(&[Pattern::RandomBackpressure])
        .run();

    assert!(report.passed(), "{}", report.diagnostics());
    assert_eq!(report.input.len(), 100);
    assert_eq!(report.input.values(), report.output.values());
    assert!(report.stats.output.stalls > 0);
}

#[test]
fn test_scenario_c_random_valid() {
    let report = TestBench::default_width()
        .with_patterns(&[Pattern::RandomValid])
        .run();

    assert!(report.passed(), "{}", report.diagnostics());
    assert_eq!(report.output.len(), 100);
    assert_eq!(report.input.values(), report.output.values());
    // Gated valid leaves the input ready but idle far more often than the lead-in and drain.
    assert!(report.stats.input.ready_only > 20);
    assert!(report.stats.output.stalls > 0);
}

#[test]
fn test_full_script_runs_phases_in_order() {
    let report = TestBench::default_width().run();

    assert!(report.passed(), "{}", report.diagnostics());
    assert_eq!(report.matched, 300);
    let cycles: Vec<u64> = report.input.entries().iter().map(|t| t.cycle).collect();
    assert!(cycles.windows(2).all(|w| w[0] < w[1]));
}

#[rstest]
fn test_profile_matrix(
    #[values(Profile::Small, Profile::Big)] profile: Profile,
    #[values(Pattern::NoBackpressure, Pattern::RandomBackpressure, Pattern::RandomValid)]
    pattern: Pattern,
) {
    let report = TestBench::new(profile).with_patterns(&[pattern]).run();

    assert!(report.passed(), "{}", report.diagnostics());
    assert_eq!(report.input.len(), 100);
    assert_eq!(report.input.values(), report.output.values());

    let width = profile.dut().data_width;
    assert_eq!(report.data_width, width);
    let limit = if width >= 64 { u64::MAX } else { (1 << width) - 1 };
    assert!(report.output.values().iter().all(|&v| v <= limit));
}

#[rstest]
#[case::unregistered(Profile::Small, false)]
#[case::registered(Profile::Big, true)]
fn test_output_never_precedes_input(#[case] profile: Profile, #[case] registered: bool) {
    let report = TestBench::new(profile).run();
    assert!(report.passed(), "{}", report.diagnostics());

    for (i, o) in report.input.entries().iter().zip(report.output.entries()) {
        if registered {
            assert!(o.cycle > i.cycle, "item {} left a registered output early", i.index);
        } else {
            assert!(o.cycle >= i.cycle, "item {} left before it arrived", i.index);
        }
    }
}

#[rstest]
#[case(Profile::Small)]
#[case(Profile::Big)]
fn test_async_reset_variant(#[case] profile: Profile) {
    let mut bench = TestBench::new(profile);
    bench.config.dut.reset = ResetKind::Async;
    let report = bench.run();
    assert!(report.passed(), "{}", report.diagnostics());
}

#[rstest]
#[case(0.1, 0.9)]
#[case(0.9, 0.1)]
#[case(1.0, 1.0)]
fn test_skewed_probabilities(#[case] ready: f64, #[case] valid: f64) {
    let mut bench = TestBench::new(Profile::Big).with_items(50);
    bench.config.run.ready_probability = ready;
    bench.config.run.valid_probability = valid;
    let report = bench.run();
    assert!(report.passed(), "{}", report.diagnostics());
    assert_eq!(report.matched, 150);
}

#[test]
fn test_same_seed_reproduces_run() {
    let a = TestBench::new(Profile::Big).with_seed(42).run();
    let b = TestBench::new(Profile::Big).with_seed(42).run();
    let c = TestBench::new(Profile::Big).with_seed(43).run();

    assert_eq!(a.input, b.input);
    assert_eq!(a.stats, b.stats);
    assert_ne!(a.input.values(), c.input.values());
}

#[test]
fn test_zero_items_passes_with_empty_scoreboards() {
    let report = TestBench::new(Profile::Small).with_items(0).run();
    assert!(report.passed(), "{}", report.diagnostics());
    assert!(report.input.is_empty());
    assert!(report.output.is_empty());
}

#[test]
fn test_registered_unregistered_toggle() {
    let report = TestBench::default_width()
        .with_reg_output(true)
        .with_patterns(&[Pattern::RandomBackpressure])
        .run();
    assert!(report.passed(), "{}", report.diagnostics());
}
