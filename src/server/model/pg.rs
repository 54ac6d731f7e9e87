//! Listing domain models and parameters.
//!
//! A listing (PG) owns an ordered collection of room types and a set of amenity
//! names. Listings are created unapproved and only become publicly visible once an
//! admin approves them while they remain active.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{GenderPreference, RoomKind};

use crate::{
    model::pg::{
        CreatePgDto, PgDto, PgSearchQuery, RoomTypeDto, RoomTypeInputDto, UpdatePgDto,
    },
    server::{error::AppError, util::pagination::PageRequest},
};

const MAX_ROOMS_PER_TYPE: i32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct RoomType {
    pub id: i32,
    pub kind: RoomKind,
    pub price: i64,
    pub deposit: i64,
    pub total_rooms: i32,
    pub available_rooms: i32,
}

impl RoomType {
    pub fn from_entity(entity: entity::room_type::Model) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            price: entity.price,
            deposit: entity.deposit,
            total_rooms: entity.total_rooms,
            available_rooms: entity.available_rooms,
        }
    }

    pub fn into_dto(self) -> RoomTypeDto {
        RoomTypeDto {
            id: self.id,
            kind: self.kind,
            price: self.price,
            deposit: self.deposit,
            total_rooms: self.total_rooms,
            available_rooms: self.available_rooms,
        }
    }
}

/// Listing with its amenities and room types in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pg {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub gender_preference: GenderPreference,
    pub amenities: Vec<String>,
    pub room_types: Vec<RoomType>,
    pub is_approved: bool,
    pub is_active: bool,
    pub rejection_reason: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw listing row plus its child rows as loaded by the repository.
#[derive(Debug, Clone)]
pub struct PgWithRelations {
    pub pg: entity::pg::Model,
    pub amenities: Vec<entity::pg_amenity::Model>,
    pub room_types: Vec<entity::room_type::Model>,
}

impl Pg {
    /// Converts entity models to a domain model at the repository boundary.
    ///
    /// Room types are ordered by their stored position.
    pub fn from_with_relations(relations: PgWithRelations) -> Self {
        let PgWithRelations {
            pg,
            amenities,
            mut room_types,
        } = relations;

        room_types.sort_by_key(|room_type| (room_type.position, room_type.id));

        Self {
            id: pg.id,
            owner_id: pg.owner_id,
            name: pg.name,
            description: pg.description,
            address: pg.address,
            city: pg.city,
            state: pg.state,
            pincode: pg.pincode,
            gender_preference: pg.gender_preference,
            amenities: amenities.into_iter().map(|a| a.name).collect(),
            room_types: room_types.into_iter().map(RoomType::from_entity).collect(),
            is_approved: pg.is_approved,
            is_active: pg.is_active,
            rejection_reason: pg.rejection_reason,
            rating: pg.rating,
            review_count: pg.review_count,
            created_at: pg.created_at,
            updated_at: pg.updated_at,
        }
    }

    /// Whether the listing is visible to the public.
    pub fn is_listed(&self) -> bool {
        self.is_approved && self.is_active
    }

    pub fn into_dto(self) -> PgDto {
        PgDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            gender_preference: self.gender_preference,
            amenities: self.amenities,
            room_types: self.room_types.into_iter().map(RoomType::into_dto).collect(),
            is_approved: self.is_approved,
            is_active: self.is_active,
            rejection_reason: self.rejection_reason,
            rating: self.rating,
            review_count: self.review_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated room type input. `id` is set when editing an existing room type.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTypeParams {
    pub id: Option<i32>,
    pub kind: RoomKind,
    pub price: i64,
    pub deposit: i64,
    pub total_rooms: i32,
}

impl RoomTypeParams {
    pub fn from_dto(dto: RoomTypeInputDto) -> Result<Self, AppError> {
        if dto.price <= 0 {
            return Err(AppError::BadRequest(
                "Room price must be greater than 0".to_string(),
            ));
        }
        if dto.deposit < 0 {
            return Err(AppError::BadRequest(
                "Deposit cannot be negative".to_string(),
            ));
        }
        if !(1..=MAX_ROOMS_PER_TYPE).contains(&dto.total_rooms) {
            return Err(AppError::BadRequest(format!(
                "Total rooms must be between 1 and {}",
                MAX_ROOMS_PER_TYPE
            )));
        }

        Ok(Self {
            id: dto.id,
            kind: dto.kind,
            price: dto.price,
            deposit: dto.deposit,
            total_rooms: dto.total_rooms,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreatePgParams {
    pub owner_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub gender_preference: GenderPreference,
    pub amenities: Vec<String>,
    pub room_types: Vec<RoomTypeParams>,
}

impl CreatePgParams {
    pub fn from_dto(owner_id: i32, dto: CreatePgDto) -> Result<Self, AppError> {
        if dto.room_types.is_empty() {
            return Err(AppError::BadRequest(
                "At least one room type is required".to_string(),
            ));
        }

        let room_types = dto
            .room_types
            .into_iter()
            .map(|room_type| {
                RoomTypeParams::from_dto(RoomTypeInputDto {
                    id: None,
                    ..room_type
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            owner_id,
            name: required_text("Name", &dto.name)?,
            description: dto.description.trim().to_string(),
            address: required_text("Address", &dto.address)?,
            city: required_text("City", &dto.city)?,
            state: dto.state.trim().to_string(),
            pincode: dto.pincode.trim().to_string(),
            gender_preference: dto.gender_preference.unwrap_or(GenderPreference::Any),
            amenities: normalize_amenities(dto.amenities),
            room_types,
        })
    }
}

/// Partial update. `None` leaves a field unchanged; `room_types`, when present,
/// replaces the whole ordered collection.
#[derive(Debug, Clone, Default)]
pub struct UpdatePgParams {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub gender_preference: Option<GenderPreference>,
    pub amenities: Option<Vec<String>>,
    pub room_types: Option<Vec<RoomTypeParams>>,
}

impl UpdatePgParams {
    pub fn from_dto(id: i32, dto: UpdatePgDto) -> Result<Self, AppError> {
        let room_types = match dto.room_types {
            Some(room_types) if room_types.is_empty() => {
                return Err(AppError::BadRequest(
                    "At least one room type is required".to_string(),
                ))
            }
            Some(room_types) => Some(
                room_types
                    .into_iter()
                    .map(RoomTypeParams::from_dto)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(Self {
            id,
            name: dto.name.map(|v| required_text("Name", &v)).transpose()?,
            description: dto.description.map(|v| v.trim().to_string()),
            address: dto.address.map(|v| required_text("Address", &v)).transpose()?,
            city: dto.city.map(|v| required_text("City", &v)).transpose()?,
            state: dto.state.map(|v| v.trim().to_string()),
            pincode: dto.pincode.map(|v| v.trim().to_string()),
            gender_preference: dto.gender_preference,
            amenities: dto.amenities.map(normalize_amenities),
            room_types,
        })
    }
}

/// Listing columns a search may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Rating,
    Name,
    ReviewCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgSort {
    pub field: SortField,
    pub descending: bool,
}

impl PgSort {
    /// Parses `field` or `-field` (descending). Only allow-listed fields are accepted.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let (name, descending) = match raw.strip_prefix('-') {
            Some(name) => (name, true),
            None => (raw, false),
        };

        let field = match name {
            "createdAt" => SortField::CreatedAt,
            "rating" => SortField::Rating,
            "name" => SortField::Name,
            "reviewCount" => SortField::ReviewCount,
            other => {
                return Err(AppError::BadRequest(format!(
                    "Cannot sort by '{}'",
                    other
                )))
            }
        };

        Ok(Self { field, descending })
    }
}

impl Default for PgSort {
    /// Newest listings first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            descending: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPgParams {
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub room_type: Option<RoomKind>,
    pub amenities: Vec<String>,
    pub gender: Option<GenderPreference>,
    pub search: Option<String>,
    pub sort: PgSort,
    pub page: PageRequest,
}

impl SearchPgParams {
    pub fn from_query(query: PgSearchQuery) -> Result<Self, AppError> {
        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(AppError::BadRequest(
                    "minPrice cannot be greater than maxPrice".to_string(),
                ));
            }
        }

        let sort = match query.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => PgSort::parse(raw)?,
            _ => PgSort::default(),
        };

        let amenities = query
            .amenities
            .map(|raw| normalize_amenities(raw.split(',').map(str::to_string).collect()))
            .unwrap_or_default();

        Ok(Self {
            city: non_empty(query.city),
            min_price: query.min_price,
            max_price: query.max_price,
            room_type: query.room_type,
            amenities,
            gender: query.gender,
            search: non_empty(query.search),
            sort,
            page: PageRequest::new(query.page, query.limit),
        })
    }
}

/// Trims, lower-cases and de-duplicates amenity names, keeping first occurrence order.
pub fn normalize_amenities(raw: Vec<String>) -> Vec<String> {
    let mut amenities: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let name = name.trim().to_lowercase();
        if !name.is_empty() && !amenities.contains(&name) {
            amenities.push(name);
        }
    }
    amenities
}

fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
