//! Per-request solver configuration.

/// Knobs a caller may set for one solve request.
///
/// Everything here is inert data; nothing reaches an engine until a solve
/// session applies it. Termination limits are optional and follow a
/// positive-only rule: `None` and non-positive values leave the engine
/// unlimited, so hosts can forward sentinel values (0, -1) unchanged.
///
/// Reproducibility parameters that must not vary between runs (parallel
/// search off, presolve off, heuristics off) are applied by the session on
/// every solve and are deliberately not configurable here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveConfig {
    /// Engine console verbosity. Values above 0 enable engine output;
    /// 0 and below keep the engine silent. Defaults to silent.
    pub verbosity: i32,
    /// Wall-clock limit in seconds. Applied only when strictly positive.
    pub time_limit: Option<f64>,
    /// Branch-and-bound node cap. Applied only when strictly positive.
    pub node_limit: Option<i64>,
    /// Relative MIP gap target. Applied only when strictly positive.
    pub gap_limit: Option<f64>,
    /// Stop at the first feasible solution instead of proving optimality.
    pub first_feasible: bool,
    /// Write the loaded model as `problem.lp` before solving.
    pub dump_lp: bool,
    /// Write the loaded model as `problem.mps` before solving.
    pub dump_mps: bool,
    /// Seed for the engine's random number generator, forwarded verbatim.
    pub random_seed: i32,
}

impl SolveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_node_limit(mut self, nodes: i64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_gap_limit(mut self, gap: f64) -> Self {
        self.gap_limit = Some(gap);
        self
    }

    pub fn with_first_feasible(mut self, enabled: bool) -> Self {
        self.first_feasible = enabled;
        self
    }

    pub fn with_dump_lp(mut self, enabled: bool) -> Self {
        self.dump_lp = enabled;
        self
    }

    pub fn with_dump_mps(mut self, enabled: bool) -> Self {
        self.dump_mps = enabled;
        self
    }

    pub fn with_random_seed(mut self, seed: i32) -> Self {
        self.random_seed = seed;
        self
    }

    /// Time limit to forward to the engine, `None` unless strictly positive.
    ///
    /// This accessor is the single source of truth for the positive-only
    /// rule; sessions must never read `time_limit` directly.
    pub fn effective_time_limit(&self) -> Option<f64> {
        self.time_limit.filter(|&seconds| seconds > 0.0)
    }

    /// Node cap to forward to the engine, `None` unless strictly positive.
    pub fn effective_node_limit(&self) -> Option<i64> {
        self.node_limit.filter(|&nodes| nodes > 0)
    }

    /// Gap target to forward to the engine, `None` unless strictly positive.
    pub fn effective_gap_limit(&self) -> Option<f64> {
        self.gap_limit.filter(|&gap| gap > 0.0)
    }

    /// True when every field still holds its default value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
