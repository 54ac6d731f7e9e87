use super::*;

/// Tests toggling another account.
///
/// Expected: deactivated, then active again
#[tokio::test]
async fn toggles_user_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let service = AdminService::new(db);

    let deactivated = service.toggle_user_status(&admin, user.id, Utc::now()).await?;
    assert!(!deactivated.is_active);

    let reactivated = service.toggle_user_status(&admin, user.id, Utc::now()).await?;
    assert!(reactivated.is_active);

    Ok(())
}

/// Tests that admins cannot lock themselves out.
///
/// Expected: BadRequest for self-deactivation and for changing their own role
#[tokio::test]
async fn refuses_changes_to_self() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let service = AdminService::new(db);

    let toggled = service.toggle_user_status(&admin, admin.id, Utc::now()).await;
    assert!(matches!(toggled, Err(AppError::BadRequest(_))));

    let demoted = service
        .set_role(&admin, admin.id, UserRole::User, Utc::now())
        .await;
    assert!(matches!(demoted, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests promoting a user and filtering the user list by role.
///
/// Expected: promoted user listed among owners
#[tokio::test]
async fn promotes_user_to_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    factory::create_user(db).await?;
    let service = AdminService::new(db);

    let promoted = service
        .set_role(&admin, user.id, UserRole::Owner, Utc::now())
        .await?;
    assert_eq!(promoted.role, UserRole::Owner);

    let owners = service
        .users(Some(UserRole::Owner), PageRequest::new(None, None))
        .await?;
    assert_eq!(owners.total, 1);
    assert_eq!(owners.items[0].id, user.id);

    Ok(())
}
