use crate::{CallSite, CallState, CallTracer, NoopTracer, helper};

/// Main and asm fixtures bail out when entered deeper than this.
pub const MAX_DEPTH: i32 = 10;
/// User fixtures bail out when entered deeper than this.
pub const USER_MAX_DEPTH: i32 = 8;
/// A fixture only descends into its callee while `depth` is below this.
pub const BRANCH_DEPTH: i32 = 5;

/// Owns the [`CallState`] threaded through the fixture functions.
///
/// Each fixture is its own `#[inline(never)]` method so that a profiler
/// reports one node per function. The bodies differ only in their counter
/// step and branch predicate; those are what shape the call tree.
#[derive(Debug, Default)]
pub struct Fixture<T: CallTracer = NoopTracer> {
    state: CallState,
    tracer: T,
}

impl Fixture<NoopTracer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: CallTracer> Fixture<T> {
    pub fn with_tracer(tracer: T) -> Self {
        Self {
            state: CallState::default(),
            tracer,
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn counter(&self) -> i32 {
        self.state.counter
    }

    pub fn reset(&mut self, counter: i32, depth: i32) {
        self.state = CallState::new(counter, depth);
    }

    /// Sets the counter and keeps whatever depth the last run left behind.
    pub fn set_counter(&mut self, counter: i32) {
        self.state.counter = counter;
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Enters `site` by name. Helper-chain sites return the value they
    /// compute; counter-driven sites return `None`.
    pub fn call(&mut self, site: CallSite) -> Option<i32> {
        match site {
            CallSite::MainFunc1 => self.main_func1(),
            CallSite::MainFunc2 => self.main_func2(),
            CallSite::MainFunc3 => self.main_func3(),
            CallSite::MainFunc4 => self.main_func4(),
            CallSite::UserFunc1 => self.user_func1(),
            CallSite::UserFunc2 => self.user_func2(),
            CallSite::UserFunc3 => self.user_func3(),
            CallSite::UserFunc4 => self.user_func4(),
            CallSite::AsmFunc1 => self.asm_func1(),
            CallSite::AsmFunc2 => self.asm_func2(),
            CallSite::AsmFunc3 => self.asm_func3(),
            CallSite::AsmFunc4 => self.asm_func4(),
            CallSite::ChainFunc1 => self.chain_func1(),
            CallSite::NormalA => return Some(helper::normal_a(&mut self.tracer)),
            CallSite::NormalB => return Some(helper::normal_b(&mut self.tracer)),
            CallSite::FuncA => return Some(helper::func_a(&mut self.tracer)),
            CallSite::Helper => {
                return Some(helper::helper(&mut self.tracer, helper::func_b::<T>));
            }
            CallSite::FuncB => return Some(helper::func_b(&mut self.tracer)),
        }
        None
    }

    /// Depth guard shared by every fixture. Returns `false` when `site` must
    /// return without touching the state.
    #[inline(always)]
    fn enter(&mut self, site: CallSite, limit: i32) -> bool {
        if self.state.depth > limit {
            return false;
        }
        self.state.depth += 1;
        self.tracer.enter(site);
        true
    }

    #[inline(always)]
    fn leave(&mut self, site: CallSite) {
        self.tracer.exit(site);
        self.state.depth -= 1;
    }

    #[inline(always)]
    fn may_descend(&self) -> bool {
        self.state.depth < BRANCH_DEPTH
    }

    #[inline(never)]
    pub fn main_func1(&mut self) {
        if !self.enter(CallSite::MainFunc1, MAX_DEPTH) {
            return;
        }
        self.state.counter += 1;
        if self.state.counter < 5 && self.may_descend() {
            self.user_func1();
        }
        self.leave(CallSite::MainFunc1);
    }

    #[inline(never)]
    pub fn main_func2(&mut self) {
        if !self.enter(CallSite::MainFunc2, MAX_DEPTH) {
            return;
        }
        self.state.counter += 2;
        if self.state.counter % 4 == 0 && self.may_descend() {
            self.asm_func2();
        }
        self.leave(CallSite::MainFunc2);
    }

    #[inline(never)]
    pub fn main_func3(&mut self) {
        if !self.enter(CallSite::MainFunc3, MAX_DEPTH) {
            return;
        }
        self.state.counter += 1;
        if self.state.counter < 10 && self.may_descend() {
            self.user_func4();
        }
        self.leave(CallSite::MainFunc3);
    }

    #[inline(never)]
    pub fn main_func4(&mut self) {
        if !self.enter(CallSite::MainFunc4, MAX_DEPTH) {
            return;
        }
        self.state.counter += 3;
        if self.state.counter % 3 == 0 && self.may_descend() {
            self.asm_func1();
        }
        self.leave(CallSite::MainFunc4);
    }

    #[inline(never)]
    pub fn user_func1(&mut self) {
        if !self.enter(CallSite::UserFunc1, USER_MAX_DEPTH) {
            return;
        }
        self.state.counter += 2;
        if self.state.counter < 20 && self.may_descend() && self.state.counter % 3 == 0 {
            self.asm_func3();
        }
        self.leave(CallSite::UserFunc1);
    }

    #[inline(never)]
    pub fn user_func2(&mut self) {
        if !self.enter(CallSite::UserFunc2, USER_MAX_DEPTH) {
            return;
        }
        self.state.counter += 1;
        if self.state.counter < 15 && self.may_descend() {
            self.asm_func4();
        }
        self.leave(CallSite::UserFunc2);
    }

    #[inline(never)]
    pub fn user_func3(&mut self) {
        if !self.enter(CallSite::UserFunc3, USER_MAX_DEPTH) {
            return;
        }
        self.state.counter -= 1;
        if self.state.counter > 5 && self.state.counter < 25 && self.may_descend() {
            self.main_func4();
        }
        self.leave(CallSite::UserFunc3);
    }

    #[inline(never)]
    pub fn user_func4(&mut self) {
        if !self.enter(CallSite::UserFunc4, USER_MAX_DEPTH) {
            return;
        }
        self.state.counter += 3;
        if self.state.counter < 30 && self.may_descend() && self.state.counter % 2 == 0 {
            self.main_func2();
        }
        self.leave(CallSite::UserFunc4);
    }

    #[inline(never)]
    pub fn asm_func1(&mut self) {
        if !self.enter(CallSite::AsmFunc1, MAX_DEPTH) {
            return;
        }
        self.state.counter += 1;
        if self.state.counter % 2 == 0 && self.may_descend() {
            self.user_func2();
        }
        self.leave(CallSite::AsmFunc1);
    }

    #[inline(never)]
    pub fn asm_func2(&mut self) {
        if !self.enter(CallSite::AsmFunc2, MAX_DEPTH) {
            return;
        }
        self.state.counter += 2;
        if self.state.counter % 4 == 0 && self.may_descend() {
            self.main_func2();
        }
        self.leave(CallSite::AsmFunc2);
    }

    #[inline(never)]
    pub fn asm_func3(&mut self) {
        if !self.enter(CallSite::AsmFunc3, MAX_DEPTH) {
            return;
        }
        self.state.counter += 2;
        if self.state.counter % 5 != 0 && self.may_descend() {
            self.user_func3();
        }
        self.leave(CallSite::AsmFunc3);
    }

    #[inline(never)]
    pub fn asm_func4(&mut self) {
        if !self.enter(CallSite::AsmFunc4, MAX_DEPTH) {
            return;
        }
        self.state.counter += 3;
        if self.state.counter % 3 == 0 && self.may_descend() {
            self.main_func3();
        }
        self.leave(CallSite::AsmFunc4);
    }

    /// Entry of the linear chain `chain_func1 → user_func2 → asm_func4 → ...`.
    #[inline(never)]
    pub fn chain_func1(&mut self) {
        if !self.enter(CallSite::ChainFunc1, MAX_DEPTH) {
            return;
        }
        self.state.counter += 1;
        if self.may_descend() {
            self.user_func2();
        }
        self.leave(CallSite::ChainFunc1);
    }
}
