use super::*;

use crate::server::data::booking::BookingRepository;
use rand::Rng;
use tokio::task::JoinSet;

/// Tests that two simultaneous requests cannot both take the last room.
///
/// Verifies that with booking A (days 1-5) holding one of two rooms, two concurrent
/// requests for days 4-6 are serialized so exactly one is admitted.
///
/// Expected: one Ok and one RoomUnavailable
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn last_room_goes_to_one_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let (_owner, _pg, room_type) = factory::helpers::create_listing(db).await?;
    let guest = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let service = BookingService::new(db, &locks);
    service
        .create(request(&guest, &room_type, day(1), day(5)), now())
        .await?;

    let (first, second) = tokio::join!(
        service.create(request(&guest, &room_type, day(4), day(6)), now()),
        service.create(request(&other, &room_type, day(4), day(6)), now()),
    );

    let admitted = [first.is_ok(), second.is_ok()];
    assert_eq!(admitted.iter().filter(|ok| **ok).count(), 1);
    for result in [first, second] {
        if let Err(err) = result {
            assert!(matches!(
                err,
                AppError::BookingErr(BookingError::RoomUnavailable)
            ));
        }
    }

    Ok(())
}

/// Tests capacity under a burst of random overlapping requests.
///
/// Spawns independent tasks, each with its own handle on the shared connection and
/// lock map, for random windows within May. Afterwards, at the start of every
/// admitted stay (where coverage peaks) the number of active bookings covering that
/// instant must not exceed the room type's capacity.
///
/// Expected: coverage never above total_rooms, at least one booking admitted
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn random_burst_never_overbooks() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = ReservationLocks::new();

    let owner = factory::user::UserFactory::new(db)
        .role(UserRole::Owner)
        .build()
        .await?;
    let pg = factory::create_pg(db, owner.id).await?;
    let room_type = factory::room_type::RoomTypeFactory::new(db, pg.id)
        .total_rooms(3)
        .build()
        .await?;
    let guest = factory::create_user(db).await?;

    let windows: Vec<(u32, u32)> = {
        let mut rng = rand::rng();
        (0..24)
            .map(|_| {
                let start = rng.random_range(1..=20);
                (start, start + rng.random_range(1..=6))
            })
            .collect()
    };

    let mut tasks = JoinSet::new();
    for (start, end) in windows {
        let db = db.clone();
        let locks = locks.clone();
        let params = request(&guest, &room_type, day(start), day(end));
        tasks.spawn(async move { BookingService::new(&db, &locks).create(params, now()).await });
    }

    let mut admitted = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(booking) => admitted.push(booking),
            Err(AppError::BookingErr(BookingError::RoomUnavailable)) => {}
            Err(err) => return Err(err),
        }
    }
    assert!(!admitted.is_empty());

    let repo = BookingRepository::new(db);
    for booking in &admitted {
        let covering = repo
            .count_overlapping(pg.id, room_type.id, booking.check_in, booking.check_in)
            .await?;
        assert!(covering <= room_type.total_rooms as u64);
    }

    Ok(())
}
