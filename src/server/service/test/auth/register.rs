use super::*;

/// Tests that registration signs the new account in.
///
/// Expected: token verifies to the new user's id and role
#[tokio::test]
async fn issues_token_for_new_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let session = AuthService::new(db, &tokens)
        .register(
            RegisterParams {
                role: UserRole::Owner,
                ..register_params("asha@example.com")
            },
            Utc::now(),
        )
        .await?;

    let claims = tokens.verify(&session.token)?;
    assert_eq!(claims.user_id()?, session.user.id);
    assert_eq!(claims.role, UserRole::Owner);
    assert_eq!(session.user.email, "asha@example.com");

    Ok(())
}

/// Tests that an e-mail can only be registered once.
///
/// Expected: BadRequest on the second registration
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    service
        .register(register_params("asha@example.com"), Utc::now())
        .await?;
    let result = service
        .register(register_params("asha@example.com"), Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests changing the password with the current one.
///
/// Expected: wrong current password rejected, new password works for login
#[tokio::test]
async fn changes_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    let hash = hash_password("secret123".to_string()).await?;
    let user = factory::user::UserFactory::new(db)
        .email("ravi@example.com")
        .password_hash(hash)
        .build()
        .await?;

    let wrong = service
        .change_password(
            user.clone(),
            "not-it".to_string(),
            "newsecret".to_string(),
            Utc::now(),
        )
        .await;
    assert!(matches!(wrong, Err(AppError::BadRequest(_))));

    service
        .change_password(
            user,
            "secret123".to_string(),
            "newsecret".to_string(),
            Utc::now(),
        )
        .await?;

    let session = service
        .login("ravi@example.com", "newsecret".to_string(), Utc::now())
        .await?;
    assert_eq!(session.user.email, "ravi@example.com");

    Ok(())
}
