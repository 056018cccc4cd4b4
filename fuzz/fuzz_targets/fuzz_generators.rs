#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortviz_core::{Algorithm, StepEvent, TraceError, generate, is_sorted};

#[derive(Debug, Arbitrary)]
struct Input {
    algorithm: u8,
    values: Vec<i16>,
}

fuzz_target!(|input: Input| {
    if input.values.len() > 24 {
        return;
    }
    let algorithm = Algorithm::ALL[usize::from(input.algorithm) % Algorithm::ALL.len()];
    let values: Vec<i64> = input.values.iter().map(|&v| i64::from(v)).collect();

    let trace = match generate(algorithm, &values) {
        Ok(trace) => trace,
        Err(TraceError::InvalidInput { index, value, .. }) => {
            assert!(!algorithm.accepts_negative());
            assert_eq!(values[index], value);
            assert!(value < 0);
            return;
        }
    };

    let mut expected = values.clone();
    expected.sort_unstable();
    assert_eq!(trace.final_values(), expected);
    assert!(is_sorted(&trace.final_values()));

    let n = values.len();
    let mut comparisons = 0;
    let mut swaps = 0;
    for step in trace.steps() {
        assert_eq!(step.snapshot().len(), n);
        for (_, index) in step.highlights().iter() {
            assert!(index < n, "{algorithm} highlighted {index} of {n}");
        }
        match step.event() {
            StepEvent::Compare => comparisons += 1,
            StepEvent::Swap => swaps += 1,
            _ => {}
        }
    }
    let totals = trace.totals();
    assert_eq!(totals.comparisons, comparisons);
    assert_eq!(totals.swaps, swaps);
    assert_eq!(trace.final_step().event(), StepEvent::Done);
});
