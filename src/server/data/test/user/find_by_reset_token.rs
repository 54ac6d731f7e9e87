use super::*;

/// Tests that a live reset token finds its account.
///
/// Expected: Ok(Some) before expiry
#[tokio::test]
async fn finds_unexpired_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let repo = UserRepository::new(db);
    repo.set_reset_token(user.clone(), "abc".to_string(), now + Duration::hours(1), now)
        .await?;

    let found = repo.find_by_reset_token("abc", now).await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that an expired reset token is ignored.
///
/// Expected: Ok(None) once the expiry has passed
#[tokio::test]
async fn ignores_expired_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let repo = UserRepository::new(db);
    repo.set_reset_token(user, "abc".to_string(), now + Duration::hours(1), now)
        .await?;

    let found = repo
        .find_by_reset_token("abc", now + Duration::hours(2))
        .await?;
    assert!(found.is_none());

    Ok(())
}

/// Tests that setting a new password consumes the reset token.
///
/// Expected: token columns cleared
#[tokio::test]
async fn password_change_clears_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let repo = UserRepository::new(db);
    let user = repo
        .set_reset_token(user, "abc".to_string(), now + Duration::hours(1), now)
        .await?;
    let user = repo
        .set_password_hash(user, "$argon2id$new".to_string(), now)
        .await?;

    assert!(user.reset_token_hash.is_none());
    assert!(user.reset_token_expires_at.is_none());
    assert!(repo.find_by_reset_token("abc", now).await?.is_none());

    Ok(())
}
