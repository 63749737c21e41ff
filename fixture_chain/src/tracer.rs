use crate::CallSite;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// Observes fixture entries and exits.
///
/// Fixtures call `enter` after their depth guard passes and `exit` right
/// before returning, so every `enter` is matched by exactly one `exit`.
pub trait CallTracer {
    fn enter(&mut self, site: CallSite);

    fn exit(&mut self, site: CallSite);
}

/// Tracer for runs under an external profiler. Compiles away.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl CallTracer for NoopTracer {
    #[inline(always)]
    fn enter(&mut self, _site: CallSite) {}

    #[inline(always)]
    fn exit(&mut self, _site: CallSite) {}
}

/// Reconstructs the call graph a profiler is expected to report.
#[derive(Clone, Debug, Default)]
pub struct GraphTracer {
    stack: Vec<CallSite>,
    calls: BTreeMap<CallSite, usize>,
    edges: BTreeMap<(Option<CallSite>, CallSite), usize>,
    max_depth: usize,
}

impl GraphTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames currently open.
    pub fn open_frames(&self) -> usize {
        self.stack.len()
    }

    pub fn into_graph(self) -> CallGraph {
        debug_assert!(self.stack.is_empty(), "unbalanced trace: {:?}", self.stack);
        CallGraph {
            calls: self
                .calls
                .into_iter()
                .map(|(site, count)| SiteCount { site, count })
                .collect(),
            edges: self
                .edges
                .into_iter()
                .map(|((caller, callee), count)| CallEdge {
                    caller,
                    callee,
                    count,
                })
                .collect(),
            max_depth: self.max_depth,
        }
    }
}

impl CallTracer for GraphTracer {
    fn enter(&mut self, site: CallSite) {
        let caller = self.stack.last().copied();
        *self.calls.entry(site).or_default() += 1;
        *self.edges.entry((caller, site)).or_default() += 1;
        self.stack.push(site);
        self.max_depth = self.max_depth.max(self.stack.len());
        tracing::trace!(depth = self.stack.len(), "enter {site}");
    }

    fn exit(&mut self, site: CallSite) {
        let top = self.stack.pop();
        debug_assert_eq!(top, Some(site), "exit does not match the open frame");
        tracing::trace!(depth = self.stack.len(), "exit {site}");
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteCount {
    pub site: CallSite,
    pub count: usize,
}

/// A caller → callee edge. `caller` is `None` for entries made from outside
/// any fixture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallEdge {
    pub caller: Option<CallSite>,
    pub callee: CallSite,
    pub count: usize,
}

/// Inclusive call counts and edges, sorted by site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CallGraph {
    pub calls: Vec<SiteCount>,
    pub edges: Vec<CallEdge>,
    pub max_depth: usize,
}

impl CallGraph {
    pub fn calls_to(&self, site: CallSite) -> usize {
        self.calls
            .iter()
            .find(|c| c.site == site)
            .map_or(0, |c| c.count)
    }

    pub fn has_edge(&self, caller: Option<CallSite>, callee: CallSite) -> bool {
        self.edges
            .iter()
            .any(|e| e.caller == caller && e.callee == callee)
    }

    /// One `caller -> callee xN` line per edge.
    pub fn render(&self) -> String {
        self.edges
            .iter()
            .map(|e| {
                let caller: &str = e.caller.map_or("root", |c| c.into());
                format!("{caller} -> {} x{}", e.callee, e.count)
            })
            .join("\n")
    }
}
