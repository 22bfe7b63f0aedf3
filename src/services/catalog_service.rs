use std::sync::Arc;

use crate::{
    db::OrmConn,
    dto::products::{CreatedProduct, ProductCreateRequest, ProductList, ProductUpdateRequest},
    error::{AppError, AppResult},
    models::{Product, SpecEntry},
    repository::{
        NewProduct, OrmProductRepository, OrmSpecificationStore, ProductRepository, SpecWrite,
        SpecificationStore,
    },
    response::{ApiResponse, EmptyData, Meta},
    services::spec_formatter::canonical_specs,
};

/// How spec rows are written when a product is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecWriteMode {
    /// Product row first, then each spec on its own; spec failures are logged.
    #[default]
    BestEffort,
    /// Product row and specs in one transaction.
    Atomic,
}

impl SpecWriteMode {
    pub fn from_flag(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => SpecWriteMode::Atomic,
            _ => SpecWriteMode::BestEffort,
        }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    specs: Arc<dyn SpecificationStore>,
    mode: SpecWriteMode,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>, specs: Arc<dyn SpecificationStore>) -> Self {
        Self {
            products,
            specs,
            mode: SpecWriteMode::default(),
        }
    }

    /// Catalog backed by SeaORM on a shared connection.
    pub fn from_orm(conn: OrmConn) -> Self {
        Self::new(
            Arc::new(OrmProductRepository::new(conn.clone())),
            Arc::new(OrmSpecificationStore::new(conn)),
        )
    }

    pub fn with_mode(mut self, mode: SpecWriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SpecWriteMode {
        self.mode
    }

    pub async fn list_products(&self) -> AppResult<ApiResponse<ProductList>> {
        let items = self.products.list().await?;
        let meta = Meta::new(items.len() as i64);
        let message = if items.is_empty() {
            "No products found"
        } else {
            "Products fetched successfully"
        };
        Ok(ApiResponse::success(message, ProductList { items }, Some(meta)))
    }

    pub async fn get_product_detail(&self, id: i32) -> AppResult<ApiResponse<Product>> {
        let mut product = self.products.get_by_id(id).await?;
        product.specifications = match self.specs.list_specs(id).await {
            Ok(specs) => specs,
            Err(err) => {
                tracing::warn!(product_id = id, error = %err, "failed to load specifications");
                Vec::new()
            }
        };
        Ok(ApiResponse::success("Product fetched successfully", product, None))
    }

    pub async fn create_product(
        &self,
        payload: ProductCreateRequest,
    ) -> AppResult<ApiResponse<CreatedProduct>> {
        payload.validate()?;
        let specs = canonical_specs(&payload);
        let product = NewProduct::from(payload);

        let id = match self.mode {
            SpecWriteMode::BestEffort => {
                let id = self.products.create(product).await?;
                self.append_specs(id, &specs).await;
                id
            }
            SpecWriteMode::Atomic => {
                let filled: Vec<SpecEntry> = specs.into_iter().filter(|s| !s.is_empty()).collect();
                self.products.create_with_specs(product, &filled).await?
            }
        };
        tracing::info!(product_id = id, mode = ?self.mode, "product created");

        Ok(ApiResponse::success(
            "Product created successfully",
            CreatedProduct { id },
            Some(Meta::empty()),
        ))
    }

    /// Best-effort: the product row is already committed, so a failed spec
    /// is logged and the remaining specs are still attempted.
    async fn append_specs(&self, product_id: i32, specs: &[SpecEntry]) {
        for spec in specs {
            match self
                .specs
                .add_spec(product_id, spec.key, &spec.value, spec.display_order)
                .await
            {
                Ok(SpecWrite::Stored) | Ok(SpecWrite::Skipped) => {}
                Err(err) => {
                    tracing::warn!(
                        product_id,
                        key = spec.key,
                        error = %err,
                        "failed to insert specification"
                    );
                }
            }
        }
    }

    pub async fn update_product(
        &self,
        id: i32,
        payload: ProductUpdateRequest,
    ) -> AppResult<ApiResponse<EmptyData>> {
        payload.validate()?;
        self.products.update(id, payload.into()).await?;
        tracing::info!(product_id = id, "product updated");

        Ok(ApiResponse::success(
            "Product updated successfully",
            EmptyData::default(),
            Some(Meta::empty()),
        ))
    }

    pub async fn delete_product(&self, id: i32) -> AppResult<ApiResponse<EmptyData>> {
        self.products.delete(id).await?;
        tracing::info!(product_id = id, "product deleted");

        Ok(ApiResponse::success(
            "Product deleted successfully",
            EmptyData::default(),
            Some(Meta::empty()),
        ))
    }

    pub async fn search_products(&self, keyword: &str) -> AppResult<ApiResponse<ProductList>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::validation("Search keyword is required"));
        }

        let items = self.products.search(keyword).await?;
        let meta = Meta::new(items.len() as i64);
        Ok(ApiResponse::success(
            "Search completed",
            ProductList { items },
            Some(meta),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_mode_is_opt_in() {
        assert_eq!(SpecWriteMode::default(), SpecWriteMode::BestEffort);
        assert_eq!(SpecWriteMode::from_flag("true"), SpecWriteMode::Atomic);
        assert_eq!(SpecWriteMode::from_flag(" ON "), SpecWriteMode::Atomic);
        assert_eq!(SpecWriteMode::from_flag("false"), SpecWriteMode::BestEffort);
        assert_eq!(SpecWriteMode::from_flag(""), SpecWriteMode::BestEffort);
    }
}
