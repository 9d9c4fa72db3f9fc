//! Budget range control: bounded stepped value, tiers and display formatting

/// Lowest selectable budget in dollars
pub const BUDGET_MIN: u32 = 500;
/// Highest selectable budget in dollars (rendered as "$10k+")
pub const BUDGET_MAX: u32 = 10_000;
/// Slider granularity in dollars
pub const BUDGET_STEP: u32 = 250;
/// Value a fresh form starts with
pub const BUDGET_DEFAULT: u32 = 2_500;

/// Descriptive budget band. Always derived from the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 4] = [
        BudgetTier::Basic,
        BudgetTier::Standard,
        BudgetTier::Premium,
        BudgetTier::Enterprise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Enterprise => "Enterprise",
        }
    }

    pub fn range_label(self) -> &'static str {
        match self {
            Self::Basic => "$500-1k",
            Self::Standard => "$1k-2.5k",
            Self::Premium => "$2.5k-5k",
            Self::Enterprise => "$5k+",
        }
    }
}

/// Tier for a budget value
pub fn tier_for(value: u32) -> BudgetTier {
    match value {
        v if v < 1_000 => BudgetTier::Basic,
        v if v < 2_500 => BudgetTier::Standard,
        v if v < 5_000 => BudgetTier::Premium,
        _ => BudgetTier::Enterprise,
    }
}

/// One-line description shown under the budget display
pub fn describe(value: u32) -> &'static str {
    match value {
        v if v < 1_000 => "Basic website with essential features",
        v if v < 2_500 => "Professional website with custom design",
        v if v < 5_000 => "Advanced website with premium features",
        v if v < 7_500 => "Complex project with custom functionality",
        _ => "Enterprise-level solution with full customization",
    }
}

/// Bounded numeric selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self {
            min: BUDGET_MIN,
            max: BUDGET_MAX,
            step: BUDGET_STEP,
        }
    }
}

impl BudgetRange {
    /// Snap to the step grid anchored at `min` (nearest, ties up), then clamp
    pub fn clamp(&self, value: u32) -> u32 {
        if value <= self.min {
            return self.min;
        }
        if value >= self.max {
            return self.max;
        }
        let step = self.step.max(1);
        let offset = value - self.min;
        let snapped = self.min + ((offset + step / 2) / step) * step;
        snapped.min(self.max)
    }

    /// Move one step up, saturating at `max`
    pub fn increment(&self, value: u32) -> u32 {
        self.clamp(self.clamp(value).saturating_add(self.step))
    }

    /// Move one step down, saturating at `min`
    pub fn decrement(&self, value: u32) -> u32 {
        self.clamp(self.clamp(value).saturating_sub(self.step))
    }

    /// Visual position of `value` in `[0.0, 1.0]`
    pub fn position(&self, value: u32) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let v = value.clamp(self.min, self.max);
        f64::from(v - self.min) / f64::from(self.max - self.min)
    }

    /// Display string: "$750", "$2.5k", "$10k+"
    pub fn format(&self, value: u32) -> String {
        if value >= self.max {
            return format!("${}k+", (self.max + 500) / 1_000);
        }
        if value >= 1_000 {
            // tenths of a thousand, half rounds up
            let tenths = (value + 50) / 100;
            return format!("${}.{}k", tenths / 10, tenths % 10);
        }
        format!("${value}")
    }
}

/// Format with the default range
pub fn format_budget(value: u32) -> String {
    BudgetRange::default().format(value)
}
