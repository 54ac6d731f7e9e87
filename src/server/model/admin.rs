use entity::sea_orm_active_enums::UserRole;

use crate::{
    model::admin::{AdminDashboardDto, PgCountsDto, UserCountsDto},
    server::model::booking::BookingCounts,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserCounts {
    pub users: u64,
    pub owners: u64,
    pub admins: u64,
}

impl UserCounts {
    pub fn from_grouped(rows: Vec<(UserRole, i64)>) -> Self {
        let mut counts = Self::default();
        for (role, count) in rows {
            let count = count.max(0) as u64;
            match role {
                UserRole::User => counts.users += count,
                UserRole::Owner => counts.owners += count,
                UserRole::Admin => counts.admins += count,
            }
        }
        counts
    }

    pub fn into_dto(self) -> UserCountsDto {
        UserCountsDto {
            total: self.users + self.owners + self.admins,
            users: self.users,
            owners: self.owners,
            admins: self.admins,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PgCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub active: u64,
}

impl PgCounts {
    pub fn into_dto(self) -> PgCountsDto {
        PgCountsDto {
            total: self.total,
            pending: self.pending,
            approved: self.approved,
            active: self.active,
        }
    }
}

/// Platform-wide totals for the admin dashboard.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub users: UserCounts,
    pub pgs: PgCounts,
    pub bookings: BookingCounts,
    pub revenue: i64,
}

impl AdminDashboard {
    pub fn into_dto(self) -> AdminDashboardDto {
        AdminDashboardDto {
            users: self.users.into_dto(),
            pgs: self.pgs.into_dto(),
            bookings: self.bookings.into_dto(),
            revenue: self.revenue,
        }
    }
}
