//! Direct versus helper-mediated call chains.
//!
//! `normal_a → normal_b` is a plain direct call. `func_a → helper → func_b`
//! goes through a trampoline that calls its target via a function pointer,
//! which a profiler has to attribute as an indirect edge `helper → func_b`.

use crate::{CallSite, CallTracer};
use serde::Serialize;

/// The value both chains produce.
pub const ANSWER: i32 = 42;

#[inline(never)]
pub fn normal_a<T: CallTracer>(tracer: &mut T) -> i32 {
    tracer.enter(CallSite::NormalA);
    let result = normal_b(tracer);
    tracer.exit(CallSite::NormalA);
    result
}

#[inline(never)]
pub fn normal_b<T: CallTracer>(tracer: &mut T) -> i32 {
    tracer.enter(CallSite::NormalB);
    tracer.exit(CallSite::NormalB);
    ANSWER
}

#[inline(never)]
pub fn func_a<T: CallTracer>(tracer: &mut T) -> i32 {
    tracer.enter(CallSite::FuncA);
    let result = helper(tracer, func_b::<T>);
    tracer.exit(CallSite::FuncA);
    result
}

/// Calls `target` indirectly. The pointer goes through `black_box` so the
/// call cannot be devirtualized.
#[inline(never)]
pub fn helper<T: CallTracer>(tracer: &mut T, target: fn(&mut T) -> i32) -> i32 {
    tracer.enter(CallSite::Helper);
    let target = std::hint::black_box(target);
    let result = target(tracer);
    tracer.exit(CallSite::Helper);
    result
}

#[inline(never)]
pub fn func_b<T: CallTracer>(tracer: &mut T) -> i32 {
    tracer.enter(CallSite::FuncB);
    tracer.exit(CallSite::FuncB);
    ANSWER
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HelperResult {
    pub normal: i32,
    pub helper_mediated: i32,
}

/// Runs the direct chain, then the helper-mediated one.
pub fn run_helper_program<T: CallTracer>(tracer: &mut T) -> HelperResult {
    let normal = normal_a(tracer);
    tracing::debug!("normal chain returned {normal}");
    let helper_mediated = func_a(tracer);
    tracing::debug!("helper-mediated chain returned {helper_mediated}");
    HelperResult {
        normal,
        helper_mediated,
    }
}
