//! Bot configuration, search stats, and constants.

/// Score of a position where the bot's side mates
pub const INFINITY: f64 = f64::INFINITY;
pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_STEEPNESS: f64 = 7.0;
pub const DEFAULT_SCALE: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct BotConfig {
    /// Plies searched below the root; 0 is treated as 1
    pub max_depth: u32,
    /// Stop after visiting this many nodes
    pub node_limit: Option<u64>,
    /// Multiplier applied to the normalized material advantage
    pub steepness: f64,
    /// Width of the heuristic range; scores stay within +/- scale / 2
    pub scale: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            node_limit: None,
            steepness: DEFAULT_STEEPNESS,
            scale: DEFAULT_SCALE,
        }
    }
}

impl BotConfig {
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_heuristic(mut self, steepness: f64, scale: f64) -> Self {
        self.steepness = steepness;
        self.scale = scale;
        self
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.max_depth.max(1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}
