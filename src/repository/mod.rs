use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Product, ProductSpec, Rating, SpecEntry},
};

pub mod products;
pub mod specifications;

pub use products::OrmProductRepository;
pub use specifications::OrmSpecificationStore;

/// Category row that products fall back to when their category name is unknown.
pub const FALLBACK_CATEGORY_ID: i32 = 1;

/// Validated column values for a product insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub category: String,
    pub rating: Rating,
    pub description: String,
    pub image: String,
    pub brand: String,
}

impl NewProduct {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Full overwrite of a product's mutable columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub rating: Rating,
    pub description: String,
    pub image: String,
    pub brand: String,
}

/// Outcome of resolving a category name on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryResolution {
    Matched(i32),
    Fallback,
}

impl CategoryResolution {
    pub fn from_lookup(found: Option<i32>) -> Self {
        match found {
            Some(id) => CategoryResolution::Matched(id),
            None => CategoryResolution::Fallback,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            CategoryResolution::Matched(id) => id,
            CategoryResolution::Fallback => FALLBACK_CATEGORY_ID,
        }
    }
}

/// Whether `add_spec` wrote a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecWrite {
    Stored,
    Skipped,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products by id ascending, without specifications.
    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Product>;

    async fn create(&self, product: NewProduct) -> AppResult<i32>;

    /// Insert the product and its non-empty specs in one transaction.
    async fn create_with_specs(&self, product: NewProduct, specs: &[SpecEntry]) -> AppResult<i32>;

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<u64>;

    async fn delete(&self, id: i32) -> AppResult<u64>;

    /// Case-insensitive match on name or description, highest rating first.
    async fn search(&self, keyword: &str) -> AppResult<Vec<Product>>;
}

#[async_trait]
pub trait SpecificationStore: Send + Sync {
    async fn list_specs(&self, product_id: i32) -> AppResult<Vec<ProductSpec>>;

    async fn add_spec(
        &self,
        product_id: i32,
        key: &str,
        value: &str,
        display_order: i32,
    ) -> AppResult<SpecWrite>;
}

/// Lowercase the name and replace spaces with hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Build an `ILIKE` pattern that matches `keyword` as a literal substring.
pub fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
