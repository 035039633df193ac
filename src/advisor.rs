//! Day-ahead planning: run both policies against one household snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::household::Household;
use crate::sim::allocator::{Allocator, BaselineAllocator, GreedyAllocator};
use crate::sim::engine::simulate;
use crate::sim::kpi::{Savings, SimulationMetrics};
use crate::sim::types::{Advisory, Schedule, SetpointCurve};

/// Planning policy offered to the household.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Run everything immediately, thermostat flat.
    Baseline,
    /// Cheapest feasible start per appliance, thermostat relaxed at peak.
    #[default]
    Greedy,
}

impl Policy {
    pub const NAMES: &[&str] = &["baseline", "greedy"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Self::Baseline),
            "greedy" => Ok(Self::Greedy),
            other => Err(ConfigError::new(
                "policy",
                format!(
                    "must be one of {}, got \"{other}\"",
                    Self::NAMES.join(", ")
                ),
            )),
        }
    }
}

/// Schedule, setpoints, advisories, and simulated metrics of one policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyOutcome {
    pub schedule: Schedule,
    pub setpoints: SetpointCurve,
    pub advisories: Vec<Advisory>,
    pub metrics: SimulationMetrics,
}

/// Both policies for one day plus the savings of greedy over baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    /// Day of the billing month this plan is for.
    pub day: u32,
    pub baseline: PolicyOutcome,
    pub greedy: PolicyOutcome,
    pub savings: Savings,
}

impl DayPlan {
    pub fn outcome(&self, policy: Policy) -> &PolicyOutcome {
        match policy {
            Policy::Baseline => &self.baseline,
            Policy::Greedy => &self.greedy,
        }
    }

    /// Records the adopted policy's day against the household's month.
    pub fn commit(&self, policy: Policy, household: &mut Household) {
        info!(%policy, day = self.day, "adopting plan");
        household.commit_day(&self.outcome(policy).metrics);
    }
}

/// Plans a day for one household without modifying it.
#[derive(Debug, Clone, Copy)]
pub struct EnergyAdvisor<'a> {
    household: &'a Household,
}

impl<'a> EnergyAdvisor<'a> {
    pub fn new(household: &'a Household) -> Self {
        Self { household }
    }

    /// Allocates with `allocator` and simulates the result.
    pub fn evaluate<A: Allocator>(&self, allocator: &A) -> PolicyOutcome {
        let allocation = allocator.allocate(self.household);
        let metrics = simulate(self.household, &allocation.schedule, &allocation.setpoints);
        info!(
            policy = allocator.name(),
            kwh = metrics.total_kwh,
            cost = metrics.total_cost,
            deadline_violations = metrics.deadline_violations,
            advisories = allocation.advisories.len(),
            "evaluated policy"
        );
        PolicyOutcome {
            schedule: allocation.schedule,
            setpoints: allocation.setpoints,
            advisories: allocation.advisories,
            metrics,
        }
    }

    /// Produces the baseline and greedy plans and compares them.
    ///
    /// Both simulations read the same snapshot, so the household's monthly
    /// totals are unchanged; commit the adopted plan with [`DayPlan::commit`].
    pub fn plan_day(&self) -> DayPlan {
        let baseline = self.evaluate(&BaselineAllocator);
        let greedy = self.evaluate(&GreedyAllocator);
        let savings = Savings::between(&baseline.metrics, &greedy.metrics);
        info!(
            day = self.household.current_day(),
            savings = savings.absolute,
            percent = savings.percent,
            "planned day"
        );
        DayPlan {
            day: self.household.current_day(),
            baseline,
            greedy,
            savings,
        }
    }
}
