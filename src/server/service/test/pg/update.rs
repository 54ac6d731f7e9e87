use super::*;

/// Tests replacing the room type collection.
///
/// Verifies that an entry with an id edits that room type in place, an entry without
/// one is added, and order follows the request.
///
/// Expected: two room types, new one first, edited price kept on the old one
#[tokio::test]
async fn edits_and_adds_room_types() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;

    let updated = PgService::new(db, &locks)
        .update(
            &owner,
            UpdatePgParams {
                id: pg.id,
                name: Some("Renamed".to_string()),
                room_types: Some(vec![
                    room(None, RoomKind::Triple, 500, 4),
                    room(Some(room_type.id), RoomKind::Single, 1200, 2),
                ]),
                ..Default::default()
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.room_types.len(), 2);
    assert_eq!(updated.room_types[0].kind, RoomKind::Triple);
    assert_eq!(updated.room_types[1].id, room_type.id);
    assert_eq!(updated.room_types[1].price, 1200);

    Ok(())
}

/// Tests that room types with bookings cannot be removed.
///
/// Verifies the update fails and nothing from it is persisted, including the name
/// change and the room type that would have been added.
///
/// Expected: RoomTypeInUse, listing unchanged
#[tokio::test]
async fn keeps_room_type_with_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    factory::create_booking(db, guest.id, pg.id, room_type.id).await?;
    let service = PgService::new(db, &locks);

    let result = service
        .update(
            &owner,
            UpdatePgParams {
                id: pg.id,
                name: Some("Renamed".to_string()),
                room_types: Some(vec![room(None, RoomKind::Double, 700, 1)]),
                ..Default::default()
            },
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::BookingErr(BookingError::RoomTypeInUse(id))) if id == room_type.id
    ));

    let current = service.get(pg.id).await?;
    assert_eq!(current.name, pg.name);
    assert_eq!(current.room_types.len(), 1);
    assert_eq!(current.room_types[0].id, room_type.id);

    Ok(())
}

/// Tests that room type ids from another listing are refused.
///
/// Expected: BadRequest
#[tokio::test]
async fn rejects_foreign_room_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let (_other_owner, _other_pg, foreign) = factory::helpers::create_listing(db).await?;

    let result = PgService::new(db, &locks)
        .update(
            &owner,
            UpdatePgParams {
                id: pg.id,
                room_types: Some(vec![
                    room(Some(room_type.id), RoomKind::Single, 1000, 2),
                    room(Some(foreign.id), RoomKind::Single, 1000, 2),
                ]),
                ..Default::default()
            },
            Utc::now(),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that unbooked room types are removed.
///
/// Expected: only the retained room type remains
#[tokio::test]
async fn removes_unbooked_room_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (owner, pg, room_type) = factory::helpers::create_listing(db).await?;
    let spare = factory::room_type::RoomTypeFactory::new(db, pg.id)
        .position(1)
        .kind(RoomKind::Dormitory)
        .build()
        .await?;

    let updated = PgService::new(db, &locks)
        .update(
            &owner,
            UpdatePgParams {
                id: pg.id,
                room_types: Some(vec![room(Some(room_type.id), RoomKind::Single, 1000, 2)]),
                ..Default::default()
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(updated.room_types.len(), 1);
    assert!(updated.room_types.iter().all(|rt| rt.id != spare.id));

    Ok(())
}
