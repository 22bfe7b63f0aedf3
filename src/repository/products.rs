use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func, NullOrdering};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::{
    db::OrmConn,
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{Product, Rating, SpecEntry, category_display_name},
    repository::{
        CategoryResolution, NewProduct, ProductChanges, ProductRepository, contains_pattern,
        specifications::insert_spec,
    },
};

#[derive(Clone)]
pub struct OrmProductRepository {
    conn: OrmConn,
}

impl OrmProductRepository {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ProductRepository for OrmProductRepository {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let products = Products::find()
            .find_also_related(Categories)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        let result = Products::find_by_id(id)
            .find_also_related(Categories)
            .one(&self.conn)
            .await?;
        match result {
            Some(row) => Ok(product_from_entity(row)),
            None => Err(AppError::NotFound),
        }
    }

    async fn create(&self, product: NewProduct) -> AppResult<i32> {
        insert_product(&self.conn, product).await
    }

    async fn create_with_specs(&self, product: NewProduct, specs: &[SpecEntry]) -> AppResult<i32> {
        let txn = self.conn.begin().await?;
        let id = insert_product(&txn, product).await?;
        for spec in specs {
            insert_spec(&txn, id, spec.key, &spec.value, spec.display_order).await?;
        }
        txn.commit().await?;
        Ok(id)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<u64> {
        let result = Products::update_many()
            .col_expr(Column::Name, Expr::value(changes.name))
            .col_expr(Column::Price, Expr::value(changes.price))
            .col_expr(Column::Stock, Expr::value(changes.stock))
            .col_expr(Column::Rating, Expr::value(Some(changes.rating.as_decimal())))
            .col_expr(Column::Description, Expr::value(Some(changes.description)))
            .col_expr(Column::ImageUrl, Expr::value(Some(changes.image)))
            .col_expr(Column::Brand, Expr::value(Some(changes.brand)))
            .filter(Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = Products::delete_by_id(id).exec(&self.conn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(result.rows_affected)
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Product>> {
        let pattern = contains_pattern(keyword);
        // Both tables have a `name` column once joined, so qualify the match.
        let condition = Condition::any()
            .add(Expr::col(Column::Name.as_column_ref()).ilike(pattern.clone()))
            .add(Expr::col(Column::Description.as_column_ref()).ilike(pattern));

        let products = Products::find()
            .find_also_related(Categories)
            .filter(condition)
            .order_by_with_nulls(Column::Rating, Order::Desc, NullOrdering::Last)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }
}

async fn insert_product<C>(conn: &C, product: NewProduct) -> AppResult<i32>
where
    C: ConnectionTrait,
{
    let category = resolve_category(conn, &product.category).await?;
    if category == CategoryResolution::Fallback {
        tracing::debug!(category = %product.category, "unknown category, using fallback");
    }

    let active = ActiveModel {
        id: NotSet,
        slug: Set(product.slug()),
        name: Set(product.name),
        price: Set(product.price),
        stock: Set(product.stock),
        category_id: Set(Some(category.id())),
        rating: Set(Some(product.rating.as_decimal())),
        description: Set(Some(product.description)),
        image_url: Set(Some(product.image)),
        brand: Set(Some(product.brand)),
        created_at: NotSet,
    };
    let model = active.insert(conn).await?;
    Ok(model.id)
}

/// Case-insensitive lookup by name. Never fails on an unknown name.
async fn resolve_category<C>(conn: &C, name: &str) -> AppResult<CategoryResolution>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Ok(CategoryResolution::Fallback);
    }

    let found = Categories::find()
        .filter(Expr::expr(Func::lower(Expr::col(CategoryCol::Name))).eq(name.to_lowercase()))
        .one(conn)
        .await?
        .map(|category| category.id);
    Ok(CategoryResolution::from_lookup(found))
}

fn product_from_entity((model, category): (ProductModel, Option<CategoryModel>)) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        category: category_display_name(category.map(|c| c.name)),
        rating: Rating::from_decimal(model.rating),
        description: model.description.unwrap_or_default(),
        image: model.image_url.unwrap_or_default(),
        brand: model.brand.unwrap_or_default(),
        created_at: model.created_at.with_timezone(&Utc),
        specifications: Vec::new(),
    }
}
