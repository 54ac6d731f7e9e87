use crate::server::{
    data::review::ReviewRepository, model::review::CreateReviewParams,
    util::pagination::PageRequest,
};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_by_pg_paginated;
