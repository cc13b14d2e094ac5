// 🧑‍💼 Representative Entity - monthly revenue + salary computation
//
// "Identity is fixed at hiring, pay terms change"
//
// Problem solved:
// - Number and names never change once the representative exists
// - Address, fixed salary and territory can be updated at any time
// - Revenue is recorded per month (0 = January ... 11 = December),
//   the latest value for a month wins
// - Monthly salary = fixed salary + territory meal allowance + revenue * percentage

use crate::config::CompensationConfig;
use crate::entities::territory::{read_territory, SharedTerritory};
use crate::error::{ensure_non_negative, CompensationError, CompensationResult};
use crate::month::MonthIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Upper bound of the commission percentage accepted by salary computations
pub const MAX_PERCENTAGE: f64 = 100.0;

// ============================================================================
// SALARY BREAKDOWN
// ============================================================================

/// The parts a monthly salary is made of
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub month: MonthIndex,
    pub fixed_salary: f64,
    pub meal_allowance: f64,
    /// Recorded revenue multiplied by the percentage (0 when nothing recorded)
    pub commission: f64,
    pub total: f64,
}

impl SalaryBreakdown {
    pub fn summary(&self) -> String {
        format!(
            "{}: fixed {:.2} + meal allowance {:.2} + commission {:.2} = {:.2}",
            self.month, self.fixed_salary, self.meal_allowance, self.commission, self.total
        )
    }
}

// ============================================================================
// REPRESENTATIVE ENTITY
// ============================================================================

#[derive(Debug, Clone)]
pub struct Representative {
    // ========================================================================
    // IDENTITY (never changes)
    // ========================================================================
    number: u32,
    last_name: String,
    first_name: String,

    // ========================================================================
    // VALUES (can change over time)
    // ========================================================================
    address: Option<String>,
    fixed_salary: f64,
    territory: SharedTerritory,

    /// Recorded revenue per month, one entry at most per month
    revenue_by_month: BTreeMap<MonthIndex, f64>,
}

impl Representative {
    /// Create a representative with no address, no fixed salary and no revenue
    pub fn new(
        number: u32,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        territory: SharedTerritory,
    ) -> Self {
        Representative {
            number,
            last_name: last_name.into(),
            first_name: first_name.into(),
            address: None,
            fixed_salary: 0.0,
            territory,
            revenue_by_month: BTreeMap::new(),
        }
    }

    /// Create a representative paid the configured default fixed salary
    pub fn with_defaults(
        number: u32,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        territory: SharedTerritory,
        config: &CompensationConfig,
    ) -> CompensationResult<Self> {
        let mut representative = Representative::new(number, last_name, first_name, territory);
        representative.set_fixed_salary(config.default_fixed_salary)?;
        Ok(representative)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }

    pub fn fixed_salary(&self) -> f64 {
        self.fixed_salary
    }

    /// Update the fixed monthly salary (positive or zero)
    pub fn set_fixed_salary(&mut self, fixed_salary: f64) -> CompensationResult<()> {
        ensure_non_negative("fixed_salary", fixed_salary)?;
        self.fixed_salary = fixed_salary;
        Ok(())
    }

    pub fn territory(&self) -> &SharedTerritory {
        &self.territory
    }

    /// Move the representative to another territory
    pub fn set_territory(&mut self, territory: SharedTerritory) {
        self.territory = territory;
    }

    /// Read-only view of the recorded revenue; `record_revenue` is the only write path
    pub fn revenue_by_month(&self) -> &BTreeMap<MonthIndex, f64> {
        &self.revenue_by_month
    }

    /// Revenue recorded for a month, if any
    pub fn recorded_revenue(&self, month: MonthIndex) -> Option<f64> {
        self.revenue_by_month.get(&month).copied()
    }

    /// Record the revenue of a month (0 to 11), replacing any previous value.
    ///
    /// Fails with `InvalidArgument` when the month is out of range or the
    /// amount is negative. Both inputs are checked before anything is stored.
    pub fn record_revenue(&mut self, month: i32, amount: f64) -> CompensationResult<()> {
        let month = MonthIndex::new(month)
            .and_then(|month| ensure_non_negative("amount", amount).map(|_| month))
            .map_err(|err| self.rejected("record_revenue", err))?;

        self.store_revenue(month, amount);
        Ok(())
    }

    /// Record revenue for the month a calendar date falls in
    pub fn record_revenue_on(&mut self, date: NaiveDate, amount: f64) -> CompensationResult<()> {
        ensure_non_negative("amount", amount)
            .map_err(|err| self.rejected("record_revenue_on", err))?;

        self.store_revenue(MonthIndex::from_date(date), amount);
        Ok(())
    }

    fn store_revenue(&mut self, month: MonthIndex, amount: f64) {
        match self.revenue_by_month.insert(month, amount) {
            Some(previous) => tracing::debug!(
                representative = self.number,
                month = month.value(),
                previous,
                amount,
                "revenue overwritten"
            ),
            None => tracing::debug!(
                representative = self.number,
                month = month.value(),
                amount,
                "revenue recorded"
            ),
        }
    }

    /// Compute the salary of a month.
    ///
    /// `percentage` must lie in [0, 100] and is applied to the recorded revenue
    /// as a plain multiplier: pass 0.1 for a 10% commission.
    pub fn monthly_salary(&self, month: i32, percentage: f64) -> CompensationResult<f64> {
        self.salary_breakdown(month, percentage).map(|b| b.total)
    }

    /// Same as `monthly_salary`, keeping every component of the result
    ///
    /// Fails with `InvalidState` when the total overflows to infinity, which
    /// finite inputs can still reach (e.g. `f64::MAX` revenue at 100).
    pub fn salary_breakdown(
        &self,
        month: i32,
        percentage: f64,
    ) -> CompensationResult<SalaryBreakdown> {
        let month = MonthIndex::new(month)
            .and_then(|month| check_percentage(percentage).map(|_| month))
            .map_err(|err| self.rejected("monthly_salary", err))?;

        // Read at call time: allowance changes apply immediately
        let meal_allowance = read_territory(&self.territory)?.meal_allowance();

        let commission = match self.recorded_revenue(month) {
            Some(revenue) => revenue * percentage,
            None => 0.0,
        };

        let total = self.fixed_salary + meal_allowance + commission;
        if !total.is_finite() {
            return Err(CompensationError::InvalidState(format!(
                "salary of {} for representative {} is not representable",
                month, self.number
            )));
        }

        let breakdown = SalaryBreakdown {
            month,
            fixed_salary: self.fixed_salary,
            meal_allowance,
            commission,
            total,
        };

        tracing::debug!(
            representative = self.number,
            month = month.value(),
            percentage,
            total = breakdown.total,
            "monthly salary computed"
        );

        Ok(breakdown)
    }

    fn rejected(&self, operation: &'static str, err: CompensationError) -> CompensationError {
        tracing::warn!(representative = self.number, operation, error = %err, "input rejected");
        err
    }
}

fn check_percentage(percentage: f64) -> CompensationResult<()> {
    if (0.0..=MAX_PERCENTAGE).contains(&percentage) {
        Ok(())
    } else {
        Err(CompensationError::invalid_argument(
            "percentage",
            format!("must be between 0 and 100, got {}", percentage),
        ))
    }
}

impl fmt::Display for Representative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Representative{{number={}, last_name={}, first_name={}}}",
            self.number, self.last_name, self.first_name
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
