use super::*;

/// Tests paginating users with a role filter.
///
/// Verifies that only users with the requested role are returned and the total
/// reflects the filtered count, not the page size.
///
/// Expected: Ok with 2 owners in total and 1 on the page
#[tokio::test]
async fn filters_by_role_and_paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::user::UserFactory::new(db)
        .role(UserRole::Owner)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .role(UserRole::Owner)
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let page = repo
        .get_paginated(Some(UserRole::Owner), PageRequest::new(Some(1), Some(1)))
        .await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_pages(), 2);
    assert!(page.items.iter().all(|u| u.role == UserRole::Owner));

    Ok(())
}

/// Tests that no filter returns everyone.
///
/// Expected: Ok with all 3 users
#[tokio::test]
async fn returns_all_without_filter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    factory::user::create_admin(db).await?;

    let page = UserRepository::new(db)
        .get_paginated(None, PageRequest::default())
        .await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);

    Ok(())
}
