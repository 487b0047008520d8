#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub max_steps: u32,
    /// Applied before the first action when set.
    pub difficulty: Option<f64>,
    /// Keep a per-step trace in the result.
    pub record_steps: bool,
    /// Money the greedy policy keeps back when shopping.
    pub money_reserve: i64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            max_steps: 5_000,
            difficulty: None,
            record_steps: true,
            money_reserve: 0,
        }
    }
}
