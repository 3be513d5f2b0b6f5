use serde::{Deserialize, Serialize};

/// Count-to-color buckets for heatmap cells.
///
/// The six ranges `{0; 1; 2-3; 4-6; 7-10; 11+}` partition the non-negative
/// integers, and variants are declared from coolest to hottest so the derived
/// `Ord` follows the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorTier {
    Empty,
    Low,
    Medium,
    High,
    VeryHigh,
    Max,
}

impl ColorTier {
    pub const ALL: [ColorTier; 6] = [
        ColorTier::Empty,
        ColorTier::Low,
        ColorTier::Medium,
        ColorTier::High,
        ColorTier::VeryHigh,
        ColorTier::Max,
    ];

    pub fn for_count(count: u32) -> Self {
        match count {
            0 => ColorTier::Empty,
            1 => ColorTier::Low,
            2..=3 => ColorTier::Medium,
            4..=6 => ColorTier::High,
            7..=10 => ColorTier::VeryHigh,
            _ => ColorTier::Max,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ColorTier::Empty => "#161b22",
            ColorTier::Low => "#0e4429",
            ColorTier::Medium => "#006d32",
            ColorTier::High => "#26a641",
            ColorTier::VeryHigh => "#39d353",
            ColorTier::Max => "#7ee787",
        }
    }

    /// Inclusive bounds; `None` means unbounded above
    pub fn range(&self) -> (u32, Option<u32>) {
        match self {
            ColorTier::Empty => (0, Some(0)),
            ColorTier::Low => (1, Some(1)),
            ColorTier::Medium => (2, Some(3)),
            ColorTier::High => (4, Some(6)),
            ColorTier::VeryHigh => (7, Some(10)),
            ColorTier::Max => (11, None),
        }
    }

    pub fn label(&self) -> String {
        match self.range() {
            (lo, Some(hi)) if lo == hi => lo.to_string(),
            (lo, Some(hi)) => format!("{}-{}", lo, hi),
            (lo, None) => format!("{}+", lo),
        }
    }
}
