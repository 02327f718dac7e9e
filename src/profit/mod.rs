//! Synthetic profit generation
//!
//! The source dataset carries no profit figures, so enrichment assigns
//! each sales row a plausible margin from an industry-style schedule:
//! a base margin per category, sub-category overrides, segment and
//! region adjustment factors, Gaussian noise, and a small chance of an
//! outright loss.
//!
//! The synthesizer is a pure function of (record, generator state). All
//! randomness comes from an explicitly passed `Rng`, and each row
//! consumes its draws in a fixed order: noise draw, loss-event draw,
//! then a loss-value draw only when the loss event fires. Re-running
//! with the same seed reproduces profits exactly.

use std::collections::HashMap;

use rand::Rng;

use crate::error::Result;
use crate::model::{BandThresholds, Category, EnrichedRecord, Region, SalesRecord, Segment};
use crate::stats::distributions::{Distribution, Normal};

/// Default margin for categories absent from the schedule (percent)
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Margin noise standard deviation (percentage points)
pub const NOISE_STD_DEV: f64 = 3.0;

/// Probability that a row is replaced by the loss branch
pub const LOSS_PROBABILITY: f64 = 0.05;

/// Margin range drawn on the loss branch (percent)
pub const LOSS_MARGIN_RANGE: (f64, f64) = (-10.0, 2.0);

/// Margin clamp applied on the normal branch (percent)
pub const MARGIN_BOUNDS: (f64, f64) = (5.0, 60.0);

/// Margin lookup schedule
///
/// A flat mapping keyed by (category, sub-category) with a defined
/// fallback order: exact pair match, then category base, then the
/// global default.
#[derive(Debug, Clone)]
pub struct MarginSchedule {
    base: HashMap<Category, f64>,
    overrides: HashMap<(Category, String), f64>,
    default_margin: f64,
}

impl MarginSchedule {
    /// Schedule with the industry-style margins of the superstore dataset
    pub fn superstore() -> Self {
        let mut base = HashMap::new();
        base.insert(Category::Technology, 15.0);
        base.insert(Category::Furniture, 22.0);
        base.insert(Category::OfficeSupplies, 35.0);

        let mut overrides = HashMap::new();
        let entries: [(Category, &str, f64); 16] = [
            (Category::Technology, "Phones", 12.0),
            (Category::Technology, "Accessories", 25.0),
            (Category::Technology, "Machines", 10.0),
            (Category::Technology, "Copiers", 8.0),
            (Category::Furniture, "Chairs", 20.0),
            (Category::Furniture, "Tables", 18.0),
            (Category::Furniture, "Bookcases", 25.0),
            (Category::Furniture, "Furnishings", 30.0),
            (Category::OfficeSupplies, "Paper", 40.0),
            (Category::OfficeSupplies, "Binders", 45.0),
            (Category::OfficeSupplies, "Art", 50.0),
            (Category::OfficeSupplies, "Storage", 30.0),
            (Category::OfficeSupplies, "Appliances", 25.0),
            (Category::OfficeSupplies, "Labels", 55.0),
            (Category::OfficeSupplies, "Envelopes", 45.0),
            (Category::OfficeSupplies, "Fasteners", 50.0),
        ];
        for (category, sub, margin) in entries {
            overrides.insert((category, sub.to_string()), margin);
        }

        MarginSchedule {
            base,
            overrides,
            default_margin: DEFAULT_MARGIN,
        }
    }

    /// Base margin for a (category, sub-category) pair, before adjustments
    pub fn margin_for(&self, category: &Category, sub_category: &str) -> f64 {
        let key = (category.clone(), sub_category.to_string());
        if let Some(&margin) = self.overrides.get(&key) {
            return margin;
        }
        if let Some(&margin) = self.base.get(category) {
            return margin;
        }
        self.default_margin
    }

    /// Segment adjustment factor; Corporate volume discounts lower margins
    pub fn segment_factor(&self, segment: &Segment) -> f64 {
        match segment {
            Segment::Consumer => 1.0,
            Segment::Corporate => 0.85,
            Segment::HomeOffice => 1.05,
            Segment::Other(_) => 1.0,
        }
    }

    /// Regional operating-cost adjustment factor
    pub fn region_factor(&self, region: &Region) -> f64 {
        match region {
            Region::West => 0.95,
            Region::East => 1.0,
            Region::Central => 1.05,
            Region::South => 1.02,
            Region::Other(_) => 1.0,
        }
    }
}

impl Default for MarginSchedule {
    fn default() -> Self {
        MarginSchedule::superstore()
    }
}

/// Outcome of one margin draw, tagged by which branch produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginOutcome {
    /// Adjusted schedule margin with noise, clamped to [5, 60]
    Normal(f64),
    /// Loss-branch margin in [-10, 2]
    Loss(f64),
}

impl MarginOutcome {
    /// The margin percentage regardless of branch
    pub fn margin(&self) -> f64 {
        match *self {
            MarginOutcome::Normal(m) | MarginOutcome::Loss(m) => m,
        }
    }

    pub fn is_loss(&self) -> bool {
        matches!(self, MarginOutcome::Loss(_))
    }
}

/// Stochastic profit synthesizer over a margin schedule
#[derive(Debug, Clone)]
pub struct ProfitSynthesizer {
    schedule: MarginSchedule,
    noise: Normal,
    loss_probability: f64,
    loss_range: (f64, f64),
    margin_bounds: (f64, f64),
}

impl ProfitSynthesizer {
    /// Synthesizer with the superstore schedule and default parameters
    pub fn new() -> Result<Self> {
        Self::with_schedule(MarginSchedule::superstore())
    }

    pub fn with_schedule(schedule: MarginSchedule) -> Result<Self> {
        Ok(ProfitSynthesizer {
            schedule,
            noise: Normal::new(0.0, NOISE_STD_DEV)?,
            loss_probability: LOSS_PROBABILITY,
            loss_range: LOSS_MARGIN_RANGE,
            margin_bounds: MARGIN_BOUNDS,
        })
    }

    pub fn schedule(&self) -> &MarginSchedule {
        &self.schedule
    }

    /// Draw a margin outcome for one record
    ///
    /// Consumes exactly one uniform draw for the noise, one for the loss
    /// event, and one more only when the loss branch is taken.
    pub fn draw_margin<R: Rng>(&self, record: &SalesRecord, rng: &mut R) -> MarginOutcome {
        let mut margin = self
            .schedule
            .margin_for(&record.category, &record.sub_category);
        margin *= self.schedule.segment_factor(&record.segment);
        margin *= self.schedule.region_factor(&record.region);

        // Uniform draws land in [0, 1); keep the quantile-transform input
        // strictly positive
        let u = rng.random::<f64>().max(f64::MIN_POSITIVE);
        margin += self.noise.inverse_cdf(u);

        let (floor, ceil) = self.margin_bounds;
        margin = margin.clamp(floor, ceil);

        if rng.random::<f64>() < self.loss_probability {
            let loss_margin = rng.random_range(self.loss_range.0..self.loss_range.1);
            MarginOutcome::Loss(loss_margin)
        } else {
            MarginOutcome::Normal(margin)
        }
    }

    /// Synthesize the profit value for one record
    pub fn synthesize<R: Rng>(&self, record: &SalesRecord, rng: &mut R) -> f64 {
        let outcome = self.draw_margin(record, rng);
        record.sales * outcome.margin() / 100.0
    }
}

/// Enrich all records in iteration order with synthetic profit and
/// derived columns
pub fn enrich_records<R: Rng>(
    records: Vec<SalesRecord>,
    synthesizer: &ProfitSynthesizer,
    bands: &BandThresholds,
    rng: &mut R,
) -> Vec<EnrichedRecord> {
    records
        .into_iter()
        .map(|record| {
            let profit = synthesizer.synthesize(&record, rng);
            EnrichedRecord::new(record, profit, bands)
        })
        .collect()
}
