//! Repository-layer tests against a real database: user uniqueness,
//! report lifecycle, and expense mutations scoped to their owning report.

use std::collections::BTreeMap;

use sqlx::PgPool;
use tally_core::budget;
use tally_db::models::expense::{CreateExpense, ExpenseCategory, ExpenseOwner, UpdateExpense};
use tally_db::models::report::CreateReport;
use tally_db::models::user::CreateUser;
use tally_db::repositories::{ExpenseRepo, ReportRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        password_hash: "$argon2id$fake-hash".to_string(),
    }
}

fn new_report(owner: &str, event: &str) -> CreateReport {
    CreateReport {
        owner_email: owner.to_string(),
        organization_name: "Acme Org".to_string(),
        event_name: event.to_string(),
        venue: None,
        description: None,
        number_of_days: 1,
        start_date: None,
        end_date: None,
        attendees: Default::default(),
        mentor: Default::default(),
        permission_from: Default::default(),
        allocated_amount: 1000.0,
    }
}

fn new_expense(amount: f64) -> CreateExpense {
    CreateExpense {
        category: ExpenseCategory::Food,
        description: Some("snacks".to_string()),
        details: BTreeMap::new(),
        amount,
        added_by: None,
        spent_at: None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn duplicate_email_is_rejected_case_insensitively(pool: PgPool) {
    UserRepo::create(&pool, &new_user("Alice", "alice@x.com"))
        .await
        .expect("first create should succeed");

    let err = UserRepo::create(&pool, &new_user("Other Alice", "ALICE@X.COM"))
        .await
        .expect_err("second create with same email must fail");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test]
async fn find_by_email_ignores_case(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("Bob", "Bob@Example.com"))
        .await
        .expect("create should succeed");

    let found = UserRepo::find_by_email(&pool, "bob@example.COM")
        .await
        .expect("lookup should succeed")
        .expect("user must be found regardless of case");

    assert_eq!(found.id, created.id);
    // Stored casing is preserved.
    assert_eq!(found.email, "Bob@Example.com");
}

#[sqlx::test]
async fn search_matches_name_email_and_phone(pool: PgPool) {
    UserRepo::create(&pool, &new_user("Alice", "alice@x.com"))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("Albert", "al@y.com"))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("Bob", "bob@z.com"))
        .await
        .unwrap();

    let hits = UserRepo::search(&pool, "AL").await.expect("search should succeed");
    let names: Vec<&str> = hits.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Albert", "Alice"]);

    // LIKE metacharacters match literally, not as wildcards.
    let hits = UserRepo::search(&pool, "%").await.expect("search should succeed");
    assert!(hits.is_empty());
}

// ---------------------------------------------------------------------------
// Reports + expenses
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_preserves_submitted_fields(pool: PgPool) {
    let mut input = new_report("owner@x.com", "Hackathon");
    input.venue = Some("Main Hall".to_string());
    input.allocated_amount = 2500.0;

    let report = ReportRepo::create(&pool, &input)
        .await
        .expect("create should succeed");

    assert!(report.id > 0);
    assert_eq!(report.owner_email, "owner@x.com");
    assert_eq!(report.organization_name, "Acme Org");
    assert_eq!(report.event_name, "Hackathon");
    assert_eq!(report.venue.as_deref(), Some("Main Hall"));
    assert_eq!(report.allocated_amount, 2500.0);

    let expenses = ExpenseRepo::list_for_report(&pool, report.id).await.unwrap();
    assert!(expenses.is_empty(), "a new report starts with no expenses");
}

#[sqlx::test]
async fn list_by_owner_is_newest_first(pool: PgPool) {
    let first = ReportRepo::create(&pool, &new_report("o@x.com", "First"))
        .await
        .unwrap();
    // Force distinct created_at values.
    sqlx::query("UPDATE reports SET created_at = created_at - INTERVAL '1 hour' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();
    let second = ReportRepo::create(&pool, &new_report("O@X.COM", "Second"))
        .await
        .unwrap();
    ReportRepo::create(&pool, &new_report("someone-else@x.com", "Other"))
        .await
        .unwrap();

    let reports = ReportRepo::list_by_owner(&pool, "o@x.com").await.unwrap();
    let ids: Vec<i64> = reports.iter().map(|r| r.id).collect();
    assert_eq!(ids, [second.id, first.id]);
}

#[sqlx::test]
async fn appended_amounts_sum_regardless_of_order(pool: PgPool) {
    let report = ReportRepo::create(&pool, &new_report("o@x.com", "Fair"))
        .await
        .unwrap();

    for amount in [300.0, 120.5, 79.5] {
        ExpenseRepo::create(&pool, ExpenseOwner::Report(report.id), &new_expense(amount))
            .await
            .expect("append should succeed");
    }

    let expenses = ExpenseRepo::list_for_report(&pool, report.id).await.unwrap();
    assert_eq!(expenses.len(), 3);

    let total = budget::total_spent(expenses.iter().map(|e| e.amount));
    assert_eq!(total, 500.0);
    assert!(!budget::is_over_budget(
        report.allocated_amount,
        expenses.iter().map(|e| e.amount)
    ));
}

#[sqlx::test]
async fn update_applies_only_provided_fields(pool: PgPool) {
    let report = ReportRepo::create(&pool, &new_report("o@x.com", "Fair"))
        .await
        .unwrap();
    let expense = ExpenseRepo::create(&pool, ExpenseOwner::Report(report.id), &new_expense(100.0))
        .await
        .unwrap();

    let patch = UpdateExpense {
        amount: Some(250.0),
        ..Default::default()
    };
    let updated = ExpenseRepo::update_for_report(&pool, report.id, expense.id, &patch)
        .await
        .expect("update should succeed")
        .expect("expense must resolve");

    assert_eq!(updated.amount, 250.0);
    // Untouched fields survive.
    assert_eq!(updated.category, ExpenseCategory::Food);
    assert_eq!(updated.description.as_deref(), Some("snacks"));
}

#[sqlx::test]
async fn update_is_scoped_to_the_owning_report(pool: PgPool) {
    let mine = ReportRepo::create(&pool, &new_report("o@x.com", "Mine"))
        .await
        .unwrap();
    let theirs = ReportRepo::create(&pool, &new_report("p@x.com", "Theirs"))
        .await
        .unwrap();
    let expense = ExpenseRepo::create(&pool, ExpenseOwner::Report(theirs.id), &new_expense(50.0))
        .await
        .unwrap();

    let patch = UpdateExpense {
        amount: Some(9999.0),
        ..Default::default()
    };
    let result = ExpenseRepo::update_for_report(&pool, mine.id, expense.id, &patch)
        .await
        .unwrap();
    assert!(result.is_none(), "an expense of another report must not resolve");
}

#[sqlx::test]
async fn delete_expense_shrinks_the_list_by_one(pool: PgPool) {
    let report = ReportRepo::create(&pool, &new_report("o@x.com", "Fair"))
        .await
        .unwrap();
    let keep = ExpenseRepo::create(&pool, ExpenseOwner::Report(report.id), &new_expense(10.0))
        .await
        .unwrap();
    let gone = ExpenseRepo::create(&pool, ExpenseOwner::Report(report.id), &new_expense(20.0))
        .await
        .unwrap();

    let removed = ExpenseRepo::delete_for_report(&pool, report.id, gone.id)
        .await
        .unwrap();
    assert!(removed);

    let expenses = ExpenseRepo::list_for_report(&pool, report.id).await.unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, keep.id);

    // A second delete of the same expense finds nothing.
    let removed = ExpenseRepo::delete_for_report(&pool, report.id, gone.id)
        .await
        .unwrap();
    assert!(!removed);
}

#[sqlx::test]
async fn deleting_a_report_removes_its_expenses(pool: PgPool) {
    let report = ReportRepo::create(&pool, &new_report("o@x.com", "Fair"))
        .await
        .unwrap();
    ExpenseRepo::create(&pool, ExpenseOwner::Report(report.id), &new_expense(10.0))
        .await
        .unwrap();

    assert!(ReportRepo::delete(&pool, report.id).await.unwrap());
    assert!(ReportRepo::find_by_id(&pool, report.id).await.unwrap().is_none());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM expenses WHERE report_id = $1")
        .bind(report.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    // Deleting again reports absence.
    assert!(!ReportRepo::delete(&pool, report.id).await.unwrap());
}
