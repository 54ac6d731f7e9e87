//! Listing data repository for database operations.
//!
//! This module provides the `PgRepository` for managing listings together with their
//! amenity and room type child rows. Listings are returned as domain models with their
//! children attached; moderation flags and aggregate ratings are updated in place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func, Query},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::{
    model::admin::ModerationFilter,
    server::{
        model::{
            admin::PgCounts,
            pg::{CreatePgParams, Pg, PgWithRelations, SearchPgParams, SortField, UpdatePgParams},
        },
        util::pagination::{Page, PageRequest},
    },
};

/// Repository providing database operations for listings.
pub struct PgRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PgRepository<'a, C> {
    /// Creates a new PgRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `PgRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a listing with its amenities and room types.
    ///
    /// The listing starts unapproved and active. Room types are stored in input order,
    /// each with every room available. Should run inside a transaction so a failing
    /// child insert does not leave a partial listing behind.
    ///
    /// # Arguments
    /// - `params` - Validated listing parameters
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Pg)` - The created listing with its children
    /// - `Err(DbErr)` - Database error during any insert
    pub async fn create(&self, params: CreatePgParams, now: DateTime<Utc>) -> Result<Pg, DbErr> {
        let pg = entity::pg::ActiveModel {
            owner_id: ActiveValue::Set(params.owner_id),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            address: ActiveValue::Set(params.address),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            pincode: ActiveValue::Set(params.pincode),
            gender_preference: ActiveValue::Set(params.gender_preference),
            is_approved: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            rejection_reason: ActiveValue::Set(None),
            rating: ActiveValue::Set(0.0),
            review_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let amenities = self.insert_amenities(pg.id, params.amenities).await?;

        let mut room_types = Vec::with_capacity(params.room_types.len());
        for (position, room_type) in params.room_types.into_iter().enumerate() {
            let model = entity::room_type::ActiveModel {
                pg_id: ActiveValue::Set(pg.id),
                position: ActiveValue::Set(position as i32),
                kind: ActiveValue::Set(room_type.kind),
                price: ActiveValue::Set(room_type.price),
                deposit: ActiveValue::Set(room_type.deposit),
                total_rooms: ActiveValue::Set(room_type.total_rooms),
                available_rooms: ActiveValue::Set(room_type.total_rooms),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            room_types.push(model);
        }

        Ok(Pg::from_with_relations(PgWithRelations {
            pg,
            amenities,
            room_types,
        }))
    }

    /// Finds a listing row by id regardless of moderation or active flags.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::pg::Model>, DbErr> {
        entity::prelude::Pg::find_by_id(id).one(self.db).await
    }

    /// Gets a listing with amenities and room types attached.
    ///
    /// # Returns
    /// - `Ok(Some(Pg))` - Listing found
    /// - `Ok(None)` - No listing with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_with_relations(&self, id: i32) -> Result<Option<Pg>, DbErr> {
        let Some(pg) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.attach_relations(vec![pg]).await?.pop())
    }

    /// Searches publicly visible listings.
    ///
    /// Only approved and active listings are considered. Price and room kind filters
    /// match listings that have at least one room type satisfying all of them; the
    /// amenity filter requires every requested amenity. Free text is matched as a
    /// substring of name, description, address or city.
    ///
    /// # Arguments
    /// - `params` - Validated filters, sort and page
    ///
    /// # Returns
    /// - `Ok(Page<Pg>)` - Matching listings for the page and the total match count
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(&self, params: &SearchPgParams) -> Result<Page<Pg>, DbErr> {
        let mut query = entity::prelude::Pg::find()
            .filter(entity::pg::Column::IsApproved.eq(true))
            .filter(entity::pg::Column::IsActive.eq(true));

        if let Some(city) = &params.city {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    entity::pg::Entity,
                    entity::pg::Column::City,
                ))))
                .eq(city.to_lowercase()),
            );
        }

        if params.min_price.is_some() || params.max_price.is_some() || params.room_type.is_some()
        {
            let mut room_filter = Condition::all();
            if let Some(min) = params.min_price {
                room_filter = room_filter.add(entity::room_type::Column::Price.gte(min));
            }
            if let Some(max) = params.max_price {
                room_filter = room_filter.add(entity::room_type::Column::Price.lte(max));
            }
            if let Some(kind) = params.room_type {
                room_filter = room_filter.add(entity::room_type::Column::Kind.eq(kind));
            }

            query = query.filter(
                entity::pg::Column::Id.in_subquery(
                    Query::select()
                        .column(entity::room_type::Column::PgId)
                        .from(entity::room_type::Entity)
                        .cond_where(room_filter)
                        .to_owned(),
                ),
            );
        }

        for amenity in &params.amenities {
            query = query.filter(
                entity::pg::Column::Id.in_subquery(
                    Query::select()
                        .column(entity::pg_amenity::Column::PgId)
                        .from(entity::pg_amenity::Entity)
                        .and_where(entity::pg_amenity::Column::Name.eq(amenity.as_str()))
                        .to_owned(),
                ),
            );
        }

        if let Some(gender) = params.gender {
            query = query.filter(entity::pg::Column::GenderPreference.eq(gender));
        }

        if let Some(search) = &params.search {
            query = query.filter(
                Condition::any()
                    .add(entity::pg::Column::Name.contains(search))
                    .add(entity::pg::Column::Description.contains(search))
                    .add(entity::pg::Column::Address.contains(search))
                    .add(entity::pg::Column::City.contains(search)),
            );
        }

        let column = match params.sort.field {
            SortField::CreatedAt => entity::pg::Column::CreatedAt,
            SortField::Rating => entity::pg::Column::Rating,
            SortField::Name => entity::pg::Column::Name,
            SortField::ReviewCount => entity::pg::Column::ReviewCount,
        };
        let order = if params.sort.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        let query = query
            .order_by(column, order.clone())
            .order_by(entity::pg::Column::Id, order);

        self.paginate(query, params.page).await
    }

    /// Updates the listing's own columns. Amenities and room types are replaced
    /// separately.
    pub async fn update(
        &self,
        pg: entity::pg::Model,
        params: &UpdatePgParams,
        now: DateTime<Utc>,
    ) -> Result<entity::pg::Model, DbErr> {
        let mut active = pg.into_active_model();
        if let Some(name) = &params.name {
            active.name = ActiveValue::Set(name.clone());
        }
        if let Some(description) = &params.description {
            active.description = ActiveValue::Set(description.clone());
        }
        if let Some(address) = &params.address {
            active.address = ActiveValue::Set(address.clone());
        }
        if let Some(city) = &params.city {
            active.city = ActiveValue::Set(city.clone());
        }
        if let Some(state) = &params.state {
            active.state = ActiveValue::Set(state.clone());
        }
        if let Some(pincode) = &params.pincode {
            active.pincode = ActiveValue::Set(pincode.clone());
        }
        if let Some(gender_preference) = params.gender_preference {
            active.gender_preference = ActiveValue::Set(gender_preference);
        }
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Replaces the listing's amenity set.
    pub async fn replace_amenities(
        &self,
        pg_id: i32,
        names: Vec<String>,
    ) -> Result<Vec<entity::pg_amenity::Model>, DbErr> {
        entity::prelude::PgAmenity::delete_many()
            .filter(entity::pg_amenity::Column::PgId.eq(pg_id))
            .exec(self.db)
            .await?;

        self.insert_amenities(pg_id, names).await
    }

    /// Soft-deletes or restores a listing.
    pub async fn set_active(
        &self,
        pg: entity::pg::Model,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> Result<entity::pg::Model, DbErr> {
        let mut active = pg.into_active_model();
        active.is_active = ActiveValue::Set(is_active);
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Records a moderation decision.
    ///
    /// Approving clears any previous rejection reason; rejecting stores one.
    ///
    /// # Arguments
    /// - `pg` - Listing being moderated
    /// - `approved` - New approval flag
    /// - `rejection_reason` - Reason shown to the owner, `None` on approval
    /// - `now` - Update timestamp
    ///
    /// # Returns
    /// - `Ok(Model)` - Updated listing row
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_approval(
        &self,
        pg: entity::pg::Model,
        approved: bool,
        rejection_reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<entity::pg::Model, DbErr> {
        let mut active = pg.into_active_model();
        active.is_approved = ActiveValue::Set(approved);
        active.rejection_reason = ActiveValue::Set(rejection_reason);
        active.updated_at = ActiveValue::Set(now);
        active.update(self.db).await
    }

    /// Stores recomputed review aggregates.
    pub async fn update_rating(
        &self,
        pg_id: i32,
        rating: f64,
        review_count: i32,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::Pg::update_many()
            .filter(entity::pg::Column::Id.eq(pg_id))
            .col_expr(entity::pg::Column::Rating, Expr::value(rating))
            .col_expr(entity::pg::Column::ReviewCount, Expr::value(review_count))
            .col_expr(entity::pg::Column::UpdatedAt, Expr::value(now))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Gets every listing owned by `owner_id`, newest first, regardless of flags.
    pub async fn get_by_owner(&self, owner_id: i32) -> Result<Vec<Pg>, DbErr> {
        let entities = entity::prelude::Pg::find()
            .filter(entity::pg::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::pg::Column::CreatedAt)
            .order_by_desc(entity::pg::Column::Id)
            .all(self.db)
            .await?;

        self.attach_relations(entities).await
    }

    pub async fn count_by_owner(&self, owner_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Pg::find()
            .filter(entity::pg::Column::OwnerId.eq(owner_id))
            .count(self.db)
            .await
    }

    /// Gets listings for the admin moderation view.
    ///
    /// Pending means not approved and never rejected; rejected means not approved
    /// with a stored reason.
    ///
    /// # Arguments
    /// - `filter` - Moderation state to show
    /// - `page` - Page number and size
    ///
    /// # Returns
    /// - `Ok(Page<Pg>)` - Listings for the page, newest first, and the total count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_for_moderation(
        &self,
        filter: ModerationFilter,
        page: PageRequest,
    ) -> Result<Page<Pg>, DbErr> {
        let query = entity::prelude::Pg::find().filter(moderation_condition(filter));

        let query = query
            .order_by_desc(entity::pg::Column::CreatedAt)
            .order_by_desc(entity::pg::Column::Id);

        self.paginate(query, page).await
    }

    /// Listing totals for the admin dashboard.
    pub async fn counts(&self) -> Result<PgCounts, DbErr> {
        let total = entity::prelude::Pg::find().count(self.db).await?;
        let pending = entity::prelude::Pg::find()
            .filter(moderation_condition(ModerationFilter::Pending))
            .count(self.db)
            .await?;
        let approved = entity::prelude::Pg::find()
            .filter(entity::pg::Column::IsApproved.eq(true))
            .count(self.db)
            .await?;
        let active = entity::prelude::Pg::find()
            .filter(entity::pg::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        Ok(PgCounts {
            total,
            pending,
            approved,
            active,
        })
    }

    async fn paginate(
        &self,
        query: Select<entity::pg::Entity>,
        page: PageRequest,
    ) -> Result<Page<Pg>, DbErr> {
        let paginator = query.paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let pgs = self.attach_relations(entities).await?;

        Ok(Page::new(pgs, total, page))
    }

    /// Loads amenities and room types for a batch of listings with two queries,
    /// preserving the order of `pgs`.
    async fn attach_relations(&self, pgs: Vec<entity::pg::Model>) -> Result<Vec<Pg>, DbErr> {
        if pgs.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = pgs.iter().map(|pg| pg.id).collect();

        let mut amenities: HashMap<i32, Vec<entity::pg_amenity::Model>> = HashMap::new();
        for amenity in entity::prelude::PgAmenity::find()
            .filter(entity::pg_amenity::Column::PgId.is_in(ids.clone()))
            .order_by_asc(entity::pg_amenity::Column::Id)
            .all(self.db)
            .await?
        {
            amenities.entry(amenity.pg_id).or_default().push(amenity);
        }

        let mut room_types: HashMap<i32, Vec<entity::room_type::Model>> = HashMap::new();
        for room_type in entity::prelude::RoomType::find()
            .filter(entity::room_type::Column::PgId.is_in(ids))
            .all(self.db)
            .await?
        {
            room_types.entry(room_type.pg_id).or_default().push(room_type);
        }

        Ok(pgs
            .into_iter()
            .map(|pg| {
                let id = pg.id;
                Pg::from_with_relations(PgWithRelations {
                    pg,
                    amenities: amenities.remove(&id).unwrap_or_default(),
                    room_types: room_types.remove(&id).unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn insert_amenities(
        &self,
        pg_id: i32,
        names: Vec<String>,
    ) -> Result<Vec<entity::pg_amenity::Model>, DbErr> {
        let mut amenities = Vec::with_capacity(names.len());
        for name in names {
            let amenity = entity::pg_amenity::ActiveModel {
                pg_id: ActiveValue::Set(pg_id),
                name: ActiveValue::Set(name),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            amenities.push(amenity);
        }
        Ok(amenities)
    }
}

fn moderation_condition(filter: ModerationFilter) -> Condition {
    match filter {
        ModerationFilter::Pending => Condition::all()
            .add(entity::pg::Column::IsApproved.eq(false))
            .add(entity::pg::Column::RejectionReason.is_null()),
        ModerationFilter::Approved => Condition::all().add(entity::pg::Column::IsApproved.eq(true)),
        ModerationFilter::Rejected => Condition::all()
            .add(entity::pg::Column::IsApproved.eq(false))
            .add(entity::pg::Column::RejectionReason.is_not_null()),
        ModerationFilter::All => Condition::all(),
    }
}
