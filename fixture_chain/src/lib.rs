//! Call-chain fixtures for validating call-graph profilers.
//!
//! Every fixture function is a separate, non-inlined symbol. Which callee a
//! function reaches depends only on the [`CallState`] it is handed, so a run
//! produces the same bounded call tree every time.

mod site;
pub use site::{CallSite, CallState};

mod tracer;
pub use tracer::{CallEdge, CallGraph, CallTracer, GraphTracer, NoopTracer, SiteCount};

mod fixture;
pub use fixture::{BRANCH_DEPTH, Fixture, MAX_DEPTH, USER_MAX_DEPTH};

pub mod helper;
pub use helper::{HelperResult, run_helper_program};

mod program;
pub use program::{CALLGRIND_PROGRAM, Checkpoint, ProgramStep, run_callgrind_program};
