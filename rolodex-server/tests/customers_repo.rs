//! Customer repository against a live database
//!
//! Run with: DATABASE_URL=... cargo test -p rolodex-server -- --ignored

mod common;

use rolodex_server::db::{CustomerRepo, DbError};
use rolodex_server::models::{CustomerInput, CustomerPatch, NewCustomer, Pagination, Patch};

use common::{test_pool, token};

fn customer(email: &str, first_name: &str, last_name: &str) -> NewCustomer {
    CustomerInput {
        email: Some(email.into()),
        first_name: Some(first_name.into()),
        last_name: Some(last_name.into()),
        ..Default::default()
    }
    .validate()
    .unwrap()
}

async fn count_with_email(pool: &sqlx::PgPool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_get_returns_same_record() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();

    let created = repo
        .create(customer(&format!("{tok}@example.com"), "Grace", "Hopper"))
        .await
        .unwrap();
    assert!(created.is_active);

    let fetched = repo.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_conflict() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let email = format!("{}@example.com", token());

    repo.create(customer(&email, "Ada", "Lovelace")).await.unwrap();
    let err = repo
        .create(customer(&email, "Ada", "Byron"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Conflict { field: "email", .. }));
    assert_eq!(count_with_email(&pool, &email).await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn concurrent_duplicate_creates_leave_one_row() {
    let pool = test_pool().await;
    let email = format!("{}@example.com", token());

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let pool = pool.clone();
            let new = customer(&email, "Race", "Condition");
            tokio::spawn(async move { CustomerRepo::new(&pool).create(new).await })
        })
        .collect();

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(DbError::Conflict { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!((ok, conflicts), (1, 1));
    assert_eq!(count_with_email(&pool, &email).await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn batch_with_duplicate_inserts_nothing() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();
    let email = format!("{tok}@example.com");

    let batch = vec![
        customer(&format!("first-{tok}@example.com"), "One", "Batch"),
        customer(&email, "Two", "Batch"),
        customer(&email, "Three", "Batch"),
    ];
    let err = repo.create_many(&batch).await.unwrap_err();

    assert!(matches!(err, DbError::Conflict { .. }));
    assert_eq!(count_with_email(&pool, &email).await, 0);
    assert_eq!(
        count_with_email(&pool, &format!("first-{tok}@example.com")).await,
        0
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn batch_insert_returns_every_row() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();

    let batch: Vec<_> = (0..3)
        .map(|i| customer(&format!("{i}-{tok}@example.com"), "Bulk", "Row"))
        .collect();
    let created = repo.create_many(&batch).await.unwrap();

    assert_eq!(created.len(), 3);
    for row in &created {
        assert_eq!(repo.get(&row.id).await.unwrap(), *row);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn pagination_splits_matching_rows() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();

    for i in 0..5 {
        repo.create(customer(&format!("{i}-{tok}@example.com"), "Page", "Row"))
            .await
            .unwrap();
    }

    let page = repo.list(Pagination::new(1, 2), Some(tok.as_str())).await.unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 2);

    let last = repo.list(Pagination::new(3, 2), Some(tok.as_str())).await.unwrap();
    assert_eq!(last.data.len(), 1);

    let all = repo.list(Pagination::new(1, 0), Some(tok.as_str())).await.unwrap();
    assert_eq!(all.data.len(), 5);
    assert_eq!(all.per_page, 5);
    assert_eq!(all.total, 5);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_matches_names_and_email() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();
    let needle = format!("ann{tok}");

    repo.create(customer(&format!("a-{tok}@example.com"), &needle, "Smith"))
        .await
        .unwrap();
    repo.create(customer(&format!("b-{tok}@example.com"), "Bob", &format!("J{needle}")))
        .await
        .unwrap();
    repo.create(customer(&format!("{needle}@example.com"), "Cy", "Jones"))
        .await
        .unwrap();
    repo.create(customer(&format!("d-{tok}@example.com"), "Dee", "Other"))
        .await
        .unwrap();

    let found = repo.list(Pagination::new(1, 10), Some(needle.as_str())).await.unwrap();
    assert_eq!(found.total, 3);
    assert!(found.data.iter().all(|c| c.first_name != "Dee"));

    let upper = repo
        .list(Pagination::new(1, 10), Some(needle.to_uppercase().as_str()))
        .await
        .unwrap();
    assert_eq!(upper.total, 3);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_treats_wildcards_literally() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();

    repo.create(customer(&format!("{tok}@example.com"), "Percent", "Free"))
        .await
        .unwrap();

    let found = repo
        .list(Pagination::new(1, 10), Some(format!("{tok}%").as_str()))
        .await
        .unwrap();
    assert_eq!(found.total, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_changes_only_supplied_fields() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();

    let mut new = customer(&format!("{tok}@example.com"), "Old", "Name");
    new.city = Some("Lisbon".into());
    let created = repo.create(new).await.unwrap();

    let changes = CustomerPatch {
        first_name: Patch::Value("New".into()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    let updated = repo.update(&created.id, changes).await.unwrap();

    assert_eq!(updated.first_name, "New");
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.city.as_deref(), Some("Lisbon"));
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_to_taken_email_is_conflict() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);
    let tok = token();

    let taken = format!("taken-{tok}@example.com");
    repo.create(customer(&taken, "First", "Owner")).await.unwrap();
    let other = repo
        .create(customer(&format!("other-{tok}@example.com"), "Second", "Owner"))
        .await
        .unwrap();

    let changes = CustomerPatch {
        email: Patch::Value(taken.clone()),
        ..Default::default()
    }
    .validate()
    .unwrap();
    let err = repo.update(&other.id, changes).await.unwrap_err();

    assert!(matches!(err, DbError::Conflict { .. }));
    assert_eq!(repo.get(&other.id).await.unwrap().email, other.email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_customer_is_not_found() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let err = repo
        .update(&token(), CustomerPatch::default().validate().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_then_get_is_not_found() {
    let pool = test_pool().await;
    let repo = CustomerRepo::new(&pool);

    let created = repo
        .create(customer(&format!("{}@example.com", token()), "Gone", "Soon"))
        .await
        .unwrap();

    repo.delete(&created.id).await.unwrap();
    assert!(matches!(
        repo.get(&created.id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        repo.delete(&created.id).await,
        Err(DbError::NotFound { .. })
    ));
}
