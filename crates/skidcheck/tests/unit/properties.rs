//! # Randomized Properties
//!
//! The monitors are checked against direct predicates over arbitrary sample streams, and whole
//! runs against a conformant model over arbitrary seeds.

use proptest::prelude::*;
use skidcheck::monitor::{DataStabilityMonitor, Monitor, TransactionCapture, ValidStabilityMonitor};
use skidcheck::{ChannelId, ChannelSample, Pattern, Profile, Scoreboard};

use crate::common::harness::TestBench;

fn samples() -> impl Strategy<Value = Vec<ChannelSample>> {
    prop::collection::vec(
        (any::<bool>(), any::<bool>(), 0_u64..4)
            .prop_map(|(valid, ready, data)| ChannelSample::new(valid, ready, data)),
        0..64,
    )
}

/// Index of the first sample a monitor must reject, if any.
fn first_violation(
    stream: &[ChannelSample],
    broken: impl Fn(&ChannelSample, &ChannelSample) -> bool,
) -> Option<usize> {
    stream
        .windows(2)
        .position(|w| w[0].valid && !w[0].ready && broken(&w[0], &w[1]))
        .map(|i| i + 1)
}

/// Index of the first sample `monitor` rejects, if any.
fn first_rejection(monitor: &mut dyn Monitor, stream: &[ChannelSample]) -> Option<usize> {
    stream
        .iter()
        .enumerate()
        .position(|(cycle, s)| monitor.sample(cycle as u64, s).is_err())
}

proptest! {
    #[test]
    fn prop_data_monitor_matches_predicate(stream in samples()) {
        let mut monitor = DataStabilityMonitor::new(ChannelId::Input);
        let expected = first_violation(&stream, |prev, cur| cur.data != prev.data);
        prop_assert_eq!(first_rejection(&mut monitor, &stream), expected);
    }

    #[test]
    fn prop_valid_monitor_matches_predicate(stream in samples()) {
        let mut monitor = ValidStabilityMonitor::new(ChannelId::Output);
        let expected = first_violation(&stream, |_, cur| !cur.valid);
        prop_assert_eq!(first_rejection(&mut monitor, &stream), expected);
    }

    #[test]
    fn prop_capture_records_exactly_the_fires(stream in samples()) {
        let mut capture = TransactionCapture::new(Scoreboard::new(ChannelId::Input));
        for (cycle, s) in stream.iter().enumerate() {
            prop_assert!(capture.sample(cycle as u64, s).is_ok());
        }
        let fired: Vec<u64> = stream.iter().filter(|s| s.fires()).map(|s| s.data).collect();
        let board = capture.into_scoreboard();
        prop_assert_eq!(board.values(), fired);
        for (i, txn) in board.entries().iter().enumerate() {
            prop_assert_eq!(txn.index, i as u64);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_conformant_dut_always_passes(
        seed in any::<u64>(),
        big in any::<bool>(),
        pattern in prop::sample::select(Pattern::ALL.to_vec()),
        items in 0_usize..40,
    ) {
        let profile = if big { Profile::Big } else { Profile::Small };
        let report = TestBench::new(profile)
            .with_seed(seed)
            .with_items(items)
            .with_patterns(&[pattern])
            .run();

        prop_assert!(report.passed(), "{}", report.diagnostics());
        prop_assert_eq!(report.input.len(), items);
        prop_assert_eq!(report.input.values(), report.output.values());
        prop_assert_eq!(report.stats.input.transfers, items as u64);
        prop_assert_eq!(report.stats.output.transfers, items as u64);
    }
}
