use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A fixture function, as it appears in a call graph.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CallSite {
    MainFunc1,
    MainFunc2,
    MainFunc3,
    MainFunc4,
    UserFunc1,
    UserFunc2,
    UserFunc3,
    UserFunc4,
    AsmFunc1,
    AsmFunc2,
    AsmFunc3,
    AsmFunc4,
    ChainFunc1,
    NormalA,
    NormalB,
    FuncA,
    Helper,
    FuncB,
}

impl CallSite {
    /// Sites that read and mutate a [`CallState`]. The rest belong to the
    /// helper-mediated chain and are stateless.
    pub fn is_counter_driven(self) -> bool {
        !matches!(
            self,
            CallSite::NormalA
                | CallSite::NormalB
                | CallSite::FuncA
                | CallSite::Helper
                | CallSite::FuncB
        )
    }
}

/// The shared state every counter-driven fixture reads and writes.
///
/// `counter` biases which branch is taken. `depth` is incremented on entry
/// and decremented on exit of each fixture and bounds the recursion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CallState {
    pub counter: i32,
    pub depth: i32,
}

impl CallState {
    pub fn new(counter: i32, depth: i32) -> Self {
        Self { counter, depth }
    }
}
