use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pg_amenity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pg_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pg::Entity",
        from = "Column::PgId",
        to = "super::pg::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Pg,
}

impl Related<super::pg::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pg.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
