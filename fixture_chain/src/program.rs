use crate::{CallSite, CallTracer, Fixture};
use serde::Serialize;

/// One entry of the callgrind test program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramStep {
    pub entry: CallSite,
    pub counter: i32,
    /// `false` keeps the depth left by the previous step.
    pub reset_depth: bool,
}

/// Entries of the callgrind test program, in order.
pub const CALLGRIND_PROGRAM: [ProgramStep; 4] = [
    ProgramStep {
        entry: CallSite::MainFunc1,
        counter: 0,
        reset_depth: true,
    },
    ProgramStep {
        entry: CallSite::AsmFunc2,
        counter: 14,
        reset_depth: true,
    },
    ProgramStep {
        entry: CallSite::ChainFunc1,
        counter: 10,
        reset_depth: false,
    },
    ProgramStep {
        entry: CallSite::AsmFunc4,
        counter: 15,
        reset_depth: true,
    },
];

/// Counter observed after an entry returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub entry: CallSite,
    pub counter: i32,
}

pub fn run_callgrind_program<T: CallTracer>(fixture: &mut Fixture<T>) -> Vec<Checkpoint> {
    CALLGRIND_PROGRAM
        .iter()
        .map(|step| {
            if step.reset_depth {
                fixture.reset(step.counter, 0);
            } else {
                fixture.set_counter(step.counter);
            }
            fixture.call(step.entry);
            tracing::debug!(state = ?fixture.state(), "{} returned", step.entry);
            Checkpoint {
                entry: step.entry,
                counter: fixture.counter(),
            }
        })
        .collect()
}
