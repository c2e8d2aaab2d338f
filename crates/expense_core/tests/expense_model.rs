use chrono::NaiveDate;
use expense_core::{
    parse_amount, parse_iso_date, round_to_cents, Category, Expense, ExpenseDraft, ExpenseId,
    ExpenseValidationError,
};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn draft_default_uses_food_and_today() {
    let draft = ExpenseDraft::default();

    assert!(draft.title.is_empty());
    assert!(draft.amount.is_empty());
    assert_eq!(draft.category, Category::Food);
    assert_eq!(draft.date, expense_core::today());
    assert!(draft.notes.is_empty());
}

#[test]
fn from_draft_generates_distinct_ids_and_trims_text() {
    let draft = ExpenseDraft::new("  Coffee ", "3.50")
        .with_date(date("2024-01-02"))
        .with_notes(" oat milk ");

    let first = Expense::from_draft(&draft).unwrap();
    let second = Expense::from_draft(&draft).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.title, "Coffee");
    assert_eq!(first.amount, 3.5);
    assert_eq!(first.category, Category::Food);
    assert_eq!(first.notes, "oat milk");
}

#[test]
fn draft_validation_rejects_bad_title_and_amounts() {
    let cases = [
        (ExpenseDraft::new("   ", "1"), ExpenseValidationError::EmptyTitle),
        (ExpenseDraft::new("Lunch", ""), ExpenseValidationError::MissingAmount),
        (
            ExpenseDraft::new("Lunch", "abc"),
            ExpenseValidationError::InvalidAmount("abc".to_string()),
        ),
        (
            ExpenseDraft::new("Lunch", "inf"),
            ExpenseValidationError::InvalidAmount("inf".to_string()),
        ),
        (
            ExpenseDraft::new("Lunch", "0"),
            ExpenseValidationError::NonPositiveAmount(0.0),
        ),
        (
            ExpenseDraft::new("Lunch", "-4.20"),
            ExpenseValidationError::NonPositiveAmount(-4.2),
        ),
    ];

    for (draft, expected) in cases {
        assert_eq!(draft.validate().unwrap_err(), expected);
    }
}

#[test]
fn parse_amount_accepts_surrounding_whitespace() {
    assert_eq!(parse_amount(" 12.25 ").unwrap(), 12.25);
}

#[test]
fn parse_amount_commits_whole_cents() {
    assert_eq!(parse_amount("3.456").unwrap(), 3.46);
    assert_eq!(parse_amount("1e2").unwrap(), 100.0);
    assert_eq!(
        parse_amount("0.001").unwrap_err(),
        ExpenseValidationError::NonPositiveAmount(0.0)
    );

    let expense = Expense::from_draft(&ExpenseDraft::new("Snack", "1.999")).unwrap();
    assert_eq!(expense.amount, 2.0);
}

#[test]
fn draft_from_expense_round_trips_fields() {
    let expense = Expense::from_draft(
        &ExpenseDraft::new("Bus", "2")
            .with_category(Category::Transport)
            .with_date(date("2024-01-01")),
    )
    .unwrap();

    let draft = ExpenseDraft::from_expense(&expense);
    assert_eq!(draft.title, "Bus");
    assert_eq!(draft.amount, "2");
    assert_eq!(draft.category, Category::Transport);
    assert_eq!(draft.date, date("2024-01-01"));
}

#[test]
fn category_parse_is_exact_and_covers_all() {
    for category in Category::ALL {
        assert_eq!(Category::parse(category.as_str()), Some(category));
    }
    assert_eq!(Category::parse("food"), None);
    assert_eq!(Category::parse("All"), None);
}

#[test]
fn iso_date_parse_requires_padded_valid_dates() {
    assert_eq!(parse_iso_date("2024-02-29"), Some(date("2024-02-29")));
    assert_eq!(parse_iso_date("2024-1-2"), None);
    assert_eq!(parse_iso_date("2023-02-29"), None);
    assert_eq!(parse_iso_date("02/01/2024"), None);
    assert_eq!(parse_iso_date(""), None);
}

#[test]
fn round_to_cents_rounds_half_away_from_zero() {
    assert_eq!(round_to_cents(3.456), 3.46);
    assert_eq!(round_to_cents(2.0), 2.0);
    assert_eq!(round_to_cents(0.1 + 0.2), 0.3);
}

#[test]
fn expense_serialization_uses_expected_wire_fields() {
    let expense = Expense {
        id: ExpenseId::parse("1704153600000").unwrap(),
        title: "Coffee".to_string(),
        amount: 3.5,
        category: Category::Food,
        date: date("2024-01-02"),
        notes: String::new(),
    };

    let json = serde_json::to_value(&expense).unwrap();
    assert_eq!(json["id"], "1704153600000");
    assert_eq!(json["title"], "Coffee");
    assert_eq!(json["amount"], 3.5);
    assert_eq!(json["category"], "Food");
    assert_eq!(json["date"], "2024-01-02");
    assert_eq!(json["notes"], "");

    let decoded: Expense = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, expense);
}

#[test]
fn deserialize_defaults_missing_notes() {
    let value = serde_json::json!({
        "id": "42",
        "title": "Movie",
        "amount": 12,
        "category": "Entertainment",
        "date": "2024-03-01"
    });

    let expense: Expense = serde_json::from_value(value).unwrap();
    assert_eq!(expense.notes, "");
    assert_eq!(expense.amount, 12.0);
    assert_eq!(expense.category, Category::Entertainment);
}

#[test]
fn expense_id_parse_rejects_blank() {
    assert_eq!(
        ExpenseId::parse("  ").unwrap_err(),
        ExpenseValidationError::EmptyId
    );
    assert_eq!(ExpenseId::parse("abc").unwrap().as_str(), "abc");
}
