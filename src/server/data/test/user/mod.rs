use crate::server::{
    data::user::UserRepository,
    model::user::CreateUserParams,
    util::pagination::PageRequest,
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_by_role;
mod create;
mod find_by_reset_token;
mod get_paginated;
