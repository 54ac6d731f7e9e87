use super::*;

/// Tests grouping account counts by role.
///
/// Expected: one row per role present with its count
#[tokio::test]
async fn counts_each_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    factory::user::create_admin(db).await?;

    let mut counts = UserRepository::new(db).count_by_role().await?;
    counts.sort_by_key(|(_, count)| *count);

    assert_eq!(counts, vec![(UserRole::Admin, 1), (UserRole::User, 2)]);

    Ok(())
}
