//! Savings goal service
//!
//! Plans monthly contributions toward savings goals and credits recorded
//! income to the goals that are not yet reached.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, SavingsGoal};
use crate::storage::Storage;

/// Amount to put aside each month to reach `target` in `months`
///
/// Whole cents, truncated.
pub fn monthly_savings_needed(target: Money, months: u32) -> FinanceResult<Money> {
    target.divide(months).ok_or_else(|| {
        FinanceError::InvalidArgument("Months to save must be greater than zero".into())
    })
}

/// Monthly contribution for one goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsRecommendation {
    pub name: String,
    pub target_amount: Money,
    pub months: u32,
    pub monthly: Money,
}

/// Monthly figure for every goal, ignoring progress already made
///
/// Goals stored with a zero-month timeframe cannot be planned and are skipped.
pub fn recommend(goals: &[SavingsGoal]) -> Vec<SavingsRecommendation> {
    goals
        .iter()
        .filter_map(|goal| match monthly_savings_needed(goal.target_amount, goal.months) {
            Ok(monthly) => Some(SavingsRecommendation {
                name: goal.name.clone(),
                target_amount: goal.target_amount,
                months: goal.months,
                monthly,
            }),
            Err(e) => {
                warn!(goal = %goal.name, error = %e, "skipping goal without a valid timeframe");
                None
            }
        })
        .collect()
}

/// Amount credited to a goal from one income
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalCredit {
    pub name: String,
    pub credited: Money,
    pub saved_amount: Money,
}

/// Distribute `income` over `goals` in order
///
/// Each unfinished goal takes what it still needs, up to what is left of the
/// income, so no goal passes its target and the total credited never exceeds
/// the income.
pub fn allocate_income(goals: &mut [SavingsGoal], income: Money) -> Vec<GoalCredit> {
    let mut left = income;
    let mut credits = Vec::new();

    for goal in goals.iter_mut() {
        if !left.is_positive() {
            break;
        }
        let credited = goal.credit(left);
        if credited.is_positive() {
            left -= credited;
            credits.push(GoalCredit {
                name: goal.name.clone(),
                credited,
                saved_amount: goal.saved_amount,
            });
        }
    }

    credits
}

/// Progress of one goal
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub name: String,
    pub target_amount: Money,
    pub saved: Money,
    pub remaining: Money,
    pub percent: f64,
}

impl From<&SavingsGoal> for GoalProgress {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            saved: goal.saved_amount,
            remaining: goal.remaining(),
            percent: goal.percent_complete(),
        }
    }
}

/// Service for savings goal management
pub struct SavingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SavingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create or replace a goal; progress starts from zero
    pub fn set_goal(&self, name: &str, target: Money, months: u32) -> FinanceResult<SavingsRecommendation> {
        let goal = SavingsGoal::new(name, target, months)?;
        let previous = self.storage.savings.get(&goal.name)?;

        self.storage.savings.upsert(goal.clone())?;
        self.storage.savings.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::SavingsGoal,
                &goal.name,
                &before,
                &goal,
                Some(format!("target: {} -> {}", before.target_amount, goal.target_amount)),
            )?,
            None => self
                .storage
                .log_create(EntityType::SavingsGoal, &goal.name, &goal)?,
        }

        let monthly = monthly_savings_needed(goal.target_amount, goal.months)?;
        info!(goal = %goal.name, target = %goal.target_amount, months = goal.months, "savings goal set");

        Ok(SavingsRecommendation {
            name: goal.name,
            target_amount: goal.target_amount,
            months: goal.months,
            monthly,
        })
    }

    pub fn remove_goal(&self, name: &str) -> FinanceResult<SavingsGoal> {
        let removed = self
            .storage
            .savings
            .delete(name)?
            .ok_or_else(|| FinanceError::goal_not_found(name))?;

        self.storage.savings.save()?;
        self.storage
            .log_delete(EntityType::SavingsGoal, &removed.name, &removed)?;

        Ok(removed)
    }

    /// All goals ordered by name
    pub fn list(&self) -> FinanceResult<Vec<SavingsGoal>> {
        self.storage.savings.get_all()
    }

    pub fn progress(&self, name: &str) -> FinanceResult<GoalProgress> {
        let goal = self
            .storage
            .savings
            .get(name)?
            .ok_or_else(|| FinanceError::goal_not_found(name))?;
        Ok(GoalProgress::from(&goal))
    }

    pub fn recommend_all(&self) -> FinanceResult<Vec<SavingsRecommendation>> {
        Ok(recommend(&self.list()?))
    }

    /// Credit an income to the unfinished goals and persist the new progress
    pub fn credit_income(&self, income: Money) -> FinanceResult<Vec<GoalCredit>> {
        let before = self.list()?;
        let mut goals = before.clone();
        let credits = allocate_income(&mut goals, income);

        if credits.is_empty() {
            return Ok(credits);
        }

        for (old, new) in before.iter().zip(&goals) {
            if old.saved_amount == new.saved_amount {
                continue;
            }
            self.storage.savings.upsert(new.clone())?;
            self.storage.log_update(
                EntityType::SavingsGoal,
                &new.name,
                old,
                new,
                Some(format!("saved: {} -> {}", old.saved_amount, new.saved_amount)),
            )?;
        }
        self.storage.savings.save()?;

        info!(income = %income, goals = credits.len(), "income credited to savings goals");
        Ok(credits)
    }
}
