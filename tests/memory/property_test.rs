/*!
 * Tracker Property Tests
 * Invariants over arbitrary alloc/free sequences
 */

use gpu_mem_tracer::{AllocationTracker, PeakCheck};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Alloc(usize),
    /// Free the live allocation at this index (modulo the live count)
    Free(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1usize..1 << 20).prop_map(Op::Alloc),
        any::<usize>().prop_map(Op::Free),
    ]
}

fn policy_strategy() -> impl Strategy<Value = PeakCheck> {
    prop_oneof![Just(PeakCheck::AllocAndFree), Just(PeakCheck::FreeOnly)]
}

proptest! {
    #[test]
    fn prop_counters_and_watermark(
        ops in prop::collection::vec(op_strategy(), 0..200),
        policy in policy_strategy()
    ) {
        let mut tracker = AllocationTracker::with_peak_check(policy);
        let mut live: Vec<(usize, usize)> = Vec::new();
        let mut next_address = 0x1000;
        let mut allocated = 0usize;
        let mut max_seen = 0usize;
        let mut last_peak = 0usize;

        for op in ops {
            match op {
                Op::Alloc(size) => {
                    tracker.track_alloc(next_address, size, "prop");
                    live.push((next_address, size));
                    next_address += 0x100;
                    allocated += size;
                }
                Op::Free(index) => {
                    if live.is_empty() {
                        continue;
                    }
                    let (address, size) = live.swap_remove(index % live.len());
                    tracker.track_free(address, size);
                }
            }

            let stats = tracker.live_stats();
            prop_assert_eq!(stats.total_bytes, allocated);
            prop_assert_eq!(stats.current_bytes, live.iter().map(|(_, s)| s).sum::<usize>());
            prop_assert_eq!(stats.current_allocs, live.len());

            let peak = tracker.peak_stats().current_bytes;
            prop_assert!(peak >= last_peak);
            last_peak = peak;

            max_seen = max_seen.max(stats.current_bytes);
            if policy == PeakCheck::AllocAndFree {
                prop_assert!(peak >= stats.current_bytes);
                prop_assert_eq!(peak, max_seen);
            }
        }

        // Reporting runs a final check, so the watermark dominates live usage
        let report = tracker.report();
        prop_assert!(report.peak_bytes >= tracker.live_stats().current_bytes);
        prop_assert_eq!(report.rows.iter().map(|r| r.bytes).sum::<usize>(), report.peak_bytes);

        for (address, size) in live.drain(..) {
            tracker.track_free(address, size);
        }
        prop_assert_eq!(tracker.live_stats().current_bytes, 0);
        prop_assert_eq!(tracker.live_stats().current_allocs, 0);
    }
}
