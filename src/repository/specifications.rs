use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    db::OrmConn,
    entity::product_specifications::{ActiveModel, Column, Entity as ProductSpecifications, Model},
    error::AppResult,
    models::ProductSpec,
    repository::{SpecWrite, SpecificationStore},
};

#[derive(Clone)]
pub struct OrmSpecificationStore {
    conn: OrmConn,
}

impl OrmSpecificationStore {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SpecificationStore for OrmSpecificationStore {
    async fn list_specs(&self, product_id: i32) -> AppResult<Vec<ProductSpec>> {
        let specs = ProductSpecifications::find()
            .filter(Column::ProductId.eq(product_id))
            .order_by_asc(Column::DisplayOrder)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(spec_from_entity)
            .collect();
        Ok(specs)
    }

    async fn add_spec(
        &self,
        product_id: i32,
        key: &str,
        value: &str,
        display_order: i32,
    ) -> AppResult<SpecWrite> {
        insert_spec(&self.conn, product_id, key, value, display_order).await
    }
}

/// Insert one spec row on any connection, transaction included.
/// Empty values are skipped without touching the database.
pub(crate) async fn insert_spec<C>(
    conn: &C,
    product_id: i32,
    key: &str,
    value: &str,
    display_order: i32,
) -> AppResult<SpecWrite>
where
    C: ConnectionTrait,
{
    if value.is_empty() {
        return Ok(SpecWrite::Skipped);
    }

    ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        spec_key: Set(key.to_string()),
        spec_value: Set(value.to_string()),
        display_order: Set(display_order),
    }
    .insert(conn)
    .await?;

    Ok(SpecWrite::Stored)
}

fn spec_from_entity(model: Model) -> ProductSpec {
    ProductSpec {
        key: model.spec_key,
        value: model.spec_value,
    }
}
