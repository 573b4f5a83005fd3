//! Savings goal display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::SavingsGoal;
use crate::services::SavingsRecommendation;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Months")]
    months: u32,
}

#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Months")]
    months: u32,
    #[tabled(rename = "Per month")]
    monthly: String,
}

pub fn format_goal_list(goals: &[SavingsGoal], currency: &str) -> String {
    if goals.is_empty() {
        return "No savings goals set.\n".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow {
        name: g.name.clone(),
        target: g.target_amount.format_with_symbol(currency),
        saved: g.saved_amount.format_with_symbol(currency),
        progress: format!("{:.1}%", g.percent_complete()),
        months: g.months,
    });
    format!("{}\n", Table::new(rows).with(Style::psql()))
}

pub fn format_recommendations(recs: &[SavingsRecommendation], currency: &str) -> String {
    if recs.is_empty() {
        return "No savings goals set.\n".to_string();
    }

    let rows = recs.iter().map(|r| RecommendationRow {
        name: r.name.clone(),
        target: r.target_amount.format_with_symbol(currency),
        months: r.months,
        monthly: r.monthly.format_with_symbol(currency),
    });
    format!("{}\n", Table::new(rows).with(Style::psql()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_recommendation_table() {
        let recs = vec![SavingsRecommendation {
            name: "Car".into(),
            target_amount: Money::from_units(1200),
            months: 12,
            monthly: Money::from_units(100),
        }];
        let output = format_recommendations(&recs, "$");
        assert!(output.contains("Per month"));
        assert!(output.contains("$100.00"));
    }
}
