#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortviz_core::Algorithm;
use sortviz_runtime::{ManualClock, PlaybackController, PlaybackStatus, Speed};

#[derive(Debug, Arbitrary)]
enum Op {
    Prepare,
    Start,
    Pause,
    StepForward,
    StepBackward,
    Seek(i16),
    Tick,
    Reset,
    SetSpeed(u8),
    Wait(u16),
    SetInput(Vec<u8>),
}

#[derive(Debug, Arbitrary)]
struct Input {
    algorithm: u8,
    values: Vec<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.values.len() > 16 || input.ops.len() > 256 {
        return;
    }
    let algorithm = Algorithm::ALL[usize::from(input.algorithm) % Algorithm::ALL.len()];
    let clock = ManualClock::new();
    let mut c = PlaybackController::new(algorithm, to_values(&input.values))
        .with_clock(Arc::new(clock.clone()));

    for op in &input.ops {
        let _ = match op {
            Op::Prepare => c.prepare(),
            Op::Start => c.start(),
            Op::Pause => c.pause(),
            Op::StepForward => c.step_forward(),
            Op::StepBackward => c.step_backward(),
            Op::Seek(target) => c.seek(isize::from(*target)),
            Op::Tick => {
                c.tick();
                Ok(())
            }
            Op::Reset => {
                c.reset();
                Ok(())
            }
            Op::SetSpeed(s) => {
                c.set_speed(Speed::new(*s));
                Ok(())
            }
            Op::Wait(ms) => {
                clock.advance_ms(u64::from(*ms));
                Ok(())
            }
            Op::SetInput(values) if values.len() <= 16 => {
                c.set_input(to_values(values));
                Ok(())
            }
            Op::SetInput(_) => Ok(()),
        };

        match c.last_index() {
            None => assert_eq!(c.status(), PlaybackStatus::Idle),
            Some(last) => {
                assert!((-1..=last).contains(&c.cursor()));
                assert_eq!(c.status() == PlaybackStatus::Finished, c.cursor() == last);
            }
        }
    }
});

fn to_values(bytes: &[u8]) -> Vec<i64> {
    bytes.iter().map(|&b| i64::from(b)).collect()
}
