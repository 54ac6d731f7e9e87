pub use super::booking::Entity as Booking;
pub use super::payment::Entity as Payment;
pub use super::pg::Entity as Pg;
pub use super::pg_amenity::Entity as PgAmenity;
pub use super::review::Entity as Review;
pub use super::room_type::Entity as RoomType;
pub use super::user::Entity as User;
