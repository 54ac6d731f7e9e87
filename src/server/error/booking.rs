use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::BookingStatus;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum BookingError {
    /// Every room of the type is held for some part of the requested range.
    #[error("No rooms available for the selected dates")]
    RoomUnavailable,

    /// Booking is not pending or confirmed.
    #[error("Booking cannot be cancelled while {0:?}")]
    NotCancellable(BookingStatus),

    /// Less than 24 hours remain before check-in.
    #[error("Bookings can only be cancelled at least 24 hours before check-in")]
    CancellationWindowClosed,

    #[error("Cannot change booking status from {from:?} to {to:?}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// A room type still referenced by bookings cannot be removed.
    #[error("Room type {0} still has bookings")]
    RoomTypeInUse(i32),
}

/// - `RoomUnavailable` / `RoomTypeInUse` → 409 Conflict
/// - everything else → 400 Bad Request
impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::RoomUnavailable | Self::RoomTypeInUse(_) => StatusCode::CONFLICT,
            Self::NotCancellable(_)
            | Self::CancellationWindowClosed
            | Self::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
