use regex::Regex;

use crate::error::{Result, TallyError};
use crate::models::Transaction;

/// Closed set of categories the engine can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Groceries,
    DiningQuickBites,
    ExpenseReimbursements,
    Salary,
    UncategorizedSpending,
    UncategorizedIncome,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::DiningQuickBites => "Dining Out - Quick Bites",
            Self::ExpenseReimbursements => "Expense Reimbursements",
            Self::Salary => "Salary",
            Self::UncategorizedSpending => "Uncategorized Spending",
            Self::UncategorizedIncome => "Uncategorized Income",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a matching rule assigns: either a fixed category or one derived
/// from the row itself. `category()` erases the difference for callers.
pub enum Action {
    Fixed(Category),
    Derive(fn(&Transaction) -> Category),
}

impl Action {
    fn category(&self, tx: &Transaction) -> Category {
        match self {
            Action::Fixed(category) => *category,
            Action::Derive(derive) => derive(tx),
        }
    }
}

type Predicate = Box<dyn Fn(&Transaction) -> bool + Send + Sync>;

/// One ordered classification rule: a description for listings, a total
/// predicate over the row, and the action taken on a match.
pub struct Rule {
    pub description: String,
    predicate: Predicate,
    action: Action,
}

impl Rule {
    pub fn new(
        description: &str,
        predicate: impl Fn(&Transaction) -> bool + Send + Sync + 'static,
        action: Action,
    ) -> Self {
        Self {
            description: description.to_string(),
            predicate: Box::new(predicate),
            action,
        }
    }

    /// Rule matching descriptions against a regular expression. The pattern
    /// is compiled here so a bad pattern fails at construction, not during
    /// classification.
    #[allow(dead_code)]
    pub fn description_regex(description: &str, pattern: &str, action: Action) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| TallyError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(
            description,
            move |tx: &Transaction| re.is_match(&tx.description),
            action,
        ))
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        (self.predicate)(tx)
    }
}

/// An ordered, first-match-wins rule list.
///
/// The fallback is a required constructor argument with an always-true
/// predicate, so a rule set without total coverage cannot be built.
pub struct RuleSet {
    rules: Vec<Rule>,
    fallback: Rule,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, fallback_description: &str, fallback: Action) -> Self {
        Self {
            rules,
            fallback: Rule::new(fallback_description, |_| true, fallback),
        }
    }

    /// First rule whose predicate matches wins; the fallback guarantees a
    /// category for every row, including empty or unparseable ones.
    pub fn classify(&self, tx: &Transaction) -> Category {
        for rule in &self.rules {
            if rule.matches(tx) {
                return rule.action.category(tx);
            }
        }
        self.fallback.action.category(tx)
    }

    /// Classify every row in place. Row-independent: the result is exactly
    /// what per-row `classify` calls would produce.
    pub fn classify_batch(&self, rows: &mut [Transaction]) {
        for tx in rows.iter_mut() {
            tx.assigned_category = Some(self.classify(tx));
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Rule {
        &self.fallback
    }
}

fn desc_contains(tx: &Transaction, needle: &str) -> bool {
    tx.description.to_uppercase().contains(needle)
}

fn spent(tx: &Transaction) -> bool {
    tx.amount.map(|a| a < 0.0).unwrap_or(false)
}

fn received(tx: &Transaction) -> bool {
    tx.amount.map(|a| a > 0.0).unwrap_or(false)
}

fn uncategorized_by_sign(tx: &Transaction) -> Category {
    // an absent amount is not evidence of spending
    if tx.amount.unwrap_or(0.0) < 0.0 {
        Category::UncategorizedSpending
    } else {
        Category::UncategorizedIncome
    }
}

/// The stock rule set. Swappable wholesale by constructing another
/// `RuleSet`; the engine itself never changes.
pub fn default_rules() -> RuleSet {
    RuleSet::new(
        vec![
            Rule::new(
                "Spending: groceries (Trader Joe's)",
                |tx| spent(tx) && desc_contains(tx, "TRADER JOES"),
                Action::Fixed(Category::Groceries),
            ),
            Rule::new(
                "Spending: dining out, quick bites (Chipotle)",
                |tx| spent(tx) && desc_contains(tx, "CHIPOTLE"),
                Action::Fixed(Category::DiningQuickBites),
            ),
            Rule::new(
                "Income: expense reimbursements (utilities repaid over Venmo)",
                |tx| {
                    received(tx)
                        && desc_contains(tx, "ELECTRICITY")
                        && tx.account.to_uppercase().contains("VENMO")
                },
                Action::Fixed(Category::ExpenseReimbursements),
            ),
            Rule::new(
                "Income: salary, regardless of sign (institution-labeled paychecks)",
                |tx| tx.source_category.eq_ignore_ascii_case("Paycheck/Salary"),
                Action::Fixed(Category::Salary),
            ),
        ],
        "Fallback: uncategorized, split by amount sign",
        Action::Derive(uncategorized_by_sign),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(description: &str, amount: Option<f64>) -> Transaction {
        Transaction {
            description: description.into(),
            amount,
            account: "Checking".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::new(
            vec![
                Rule::new(
                    "earlier",
                    |tx| desc_contains(tx, "COFFEE"),
                    Action::Fixed(Category::DiningQuickBites),
                ),
                Rule::new(
                    "later",
                    |tx| desc_contains(tx, "COFFEE"),
                    Action::Fixed(Category::Groceries),
                ),
            ],
            "fallback",
            Action::Derive(uncategorized_by_sign),
        );
        let got = rules.classify(&tx("COFFEE SHOP", Some(-4.0)));
        assert_eq!(got, Category::DiningQuickBites);
    }

    #[test]
    fn test_classification_is_total() {
        let rules = default_rules();
        // a completely empty row still gets a category
        let got = rules.classify(&Transaction::default());
        assert_eq!(got, Category::UncategorizedIncome);
    }

    #[test]
    fn test_groceries_rule() {
        let rules = default_rules();
        assert_eq!(
            rules.classify(&tx("TRADER JOES #123", Some(-45.0))),
            Category::Groceries
        );
        // a refund is not grocery spending
        assert_ne!(
            rules.classify(&tx("TRADER JOES #123", Some(45.0))),
            Category::Groceries
        );
    }

    #[test]
    fn test_salary_rule_ignores_amount_sign() {
        let rules = default_rules();
        let mut deposit = tx("PAYCHECK ABC CORP", Some(1500.0));
        deposit.source_category = "Paycheck/Salary".into();
        let mut correction = tx("PAYCHECK REVERSAL", Some(-1500.0));
        correction.source_category = "Paycheck/Salary".into();
        assert_eq!(rules.classify(&deposit), Category::Salary);
        assert_eq!(rules.classify(&correction), Category::Salary);
    }

    #[test]
    fn test_reimbursement_requires_account_match() {
        let rules = default_rules();
        let mut venmo = tx("ELECTRICITY FROM ROOMMATE", Some(30.0));
        venmo.account = "Venmo".into();
        assert_eq!(rules.classify(&venmo), Category::ExpenseReimbursements);

        let checking = tx("ELECTRICITY FROM ROOMMATE", Some(30.0));
        assert_eq!(rules.classify(&checking), Category::UncategorizedIncome);
    }

    #[test]
    fn test_fallback_splits_by_sign() {
        let rules = default_rules();
        assert_eq!(
            rules.classify(&tx("MYSTERY VENDOR", Some(-10.0))),
            Category::UncategorizedSpending
        );
        assert_eq!(
            rules.classify(&tx("MYSTERY VENDOR", Some(10.0))),
            Category::UncategorizedIncome
        );
        assert_eq!(
            rules.classify(&tx("MYSTERY VENDOR", Some(0.0))),
            Category::UncategorizedIncome
        );
    }

    #[test]
    fn test_missing_amount_is_not_a_match() {
        let rules = default_rules();
        // amount-gated rules degrade to non-matching, fallback still answers
        assert_eq!(
            rules.classify(&tx("TRADER JOES #123", None)),
            Category::UncategorizedIncome
        );
    }

    #[test]
    fn test_regex_rule() {
        let rule = Rule::description_regex(
            "checks by number",
            r"^CHECK \d+$",
            Action::Fixed(Category::UncategorizedSpending),
        )
        .unwrap();
        assert!(rule.matches(&tx("CHECK 1042", Some(-2400.0))));
        assert!(!rule.matches(&tx("CHECKERS DRIVE-IN", Some(-8.0))));
    }

    #[test]
    fn test_regex_rule_rejects_bad_pattern_at_construction() {
        let err = Rule::description_regex(
            "broken",
            r"(unclosed",
            Action::Fixed(Category::Groceries),
        );
        assert!(matches!(err, Err(TallyError::InvalidPattern { .. })));
    }

    #[test]
    fn test_classify_batch_matches_per_row_calls() {
        let rules = default_rules();
        let mut rows = vec![
            tx("TRADER JOES #123", Some(-45.0)),
            tx("CHIPOTLE ORDER", Some(-12.5)),
            tx("MYSTERY VENDOR", Some(99.0)),
        ];
        let expected: Vec<Category> = rows.iter().map(|r| rules.classify(r)).collect();
        rules.classify_batch(&mut rows);
        for (row, want) in rows.iter().zip(expected) {
            assert_eq!(row.assigned_category, Some(want));
        }
    }
}
