//! Turns the store's category totals into a percentage breakdown.

use crate::{
    report::CategorySummary,
    stores::{CategoryTotal, Totals},
};

/// `part` as a percentage of `whole`, or 0 when `whole` is not positive.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Attach to each category total its share of all income and expenses.
///
/// Income and expense categories share the one denominator, so the
/// percentages of a full breakdown add up to 100.
pub fn summarize_categories(
    category_totals: Vec<CategoryTotal>,
    totals: &Totals,
) -> Vec<CategorySummary> {
    let grand_total = totals.income + totals.expense;

    category_totals
        .into_iter()
        .map(|category_total| CategorySummary {
            percentage: percentage_of(category_total.total_amount, grand_total),
            category_id: category_total.category_id,
            category_name: category_total.category_name,
            category_icon: category_total.category_icon,
            total_amount: category_total.total_amount,
            count: category_total.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        category::CategoryName,
        stores::{CategoryTotal, Totals},
    };

    use super::{percentage_of, summarize_categories};

    fn category_total(category_id: i64, total_amount: f64) -> CategoryTotal {
        CategoryTotal {
            category_id,
            category_name: CategoryName::new_unchecked("Test"),
            category_icon: "🧪".to_owned(),
            total_amount,
            count: 1,
        }
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(0.0, 0.0), 0.0);
        assert_eq!(percentage_of(5.0, 0.0), 0.0);
    }

    #[test]
    fn percentage_of_whole() {
        assert_eq!(percentage_of(25.0, 200.0), 12.5);
    }

    #[test]
    fn breakdown_uses_income_plus_expenses() {
        let totals = Totals {
            income: 100.0,
            expense: 40.0,
            count: 2,
        };

        let summaries = summarize_categories(
            vec![category_total(1, 100.0), category_total(2, 40.0)],
            &totals,
        );

        assert!((summaries[0].percentage - 71.428_571).abs() < 1e-5);
        assert!((summaries[1].percentage - 28.571_428).abs() < 1e-5);
        let sum: f64 = summaries.iter().map(|summary| summary.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_breakdown_stays_empty() {
        assert!(summarize_categories(vec![], &Totals::default()).is_empty());
    }
}
