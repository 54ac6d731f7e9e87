use super::*;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        name: "Asha".to_string(),
        email: email.to_string(),
        password_hash: Some("$argon2id$stub".to_string()),
        phone: None,
        role: UserRole::User,
        google_id: None,
    }
}

/// Tests creating a new account.
///
/// Verifies that the repository inserts an active user with the given role and
/// no outstanding reset token.
///
/// Expected: Ok with an active user row
#[tokio::test]
async fn creates_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("asha@example.com"), Utc::now()).await?;

    assert_eq!(user.email, "asha@example.com");
    assert_eq!(user.role, UserRole::User);
    assert!(user.is_active);
    assert!(user.reset_token_hash.is_none());

    let found = repo.find_by_email("asha@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests the unique e-mail constraint.
///
/// Expected: Err on the second insert with the same e-mail
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("dup@example.com"), Utc::now()).await?;
    let result = repo.create(params("dup@example.com"), Utc::now()).await;

    assert!(result.is_err());

    Ok(())
}
