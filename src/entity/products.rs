use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub stock: i32,
    pub category_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((3, 2)))", nullable)]
    pub rating: Option<Decimal>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
    #[sea_orm(has_many = "super::product_specifications::Entity")]
    ProductSpecifications,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::product_specifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSpecifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
