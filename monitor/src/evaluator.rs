/// Outcome of comparing an observed discount against the configured target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub discount: f64,
    pub target: f64,
    pub met: bool,
}

impl Evaluation {
    /// Percentage points still missing; zero once the target is met.
    pub fn shortfall(&self) -> f64 {
        if self.met {
            0.0
        } else {
            self.target - self.discount
        }
    }
}

/// Reaching the target exactly counts as met.
pub fn threshold_met(discount: f64, target: f64) -> bool {
    discount >= target
}

pub fn evaluate(discount: f64, target: f64) -> Evaluation {
    Evaluation {
        discount,
        target,
        met: threshold_met(discount, target),
    }
}
