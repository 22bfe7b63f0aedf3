#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use commerce_catalog_api::{
    error::{AppError, AppResult},
    models::{Product, ProductSpec, SpecEntry, UNCATEGORIZED},
    repository::{
        CategoryResolution, NewProduct, ProductChanges, ProductRepository, SpecWrite,
        SpecificationStore,
    },
    services::catalog_service::{CatalogService, SpecWriteMode},
};

struct StoredSpec {
    id: i32,
    product_id: i32,
    key: String,
    value: String,
    display_order: i32,
}

#[derive(Default)]
struct Inner {
    next_product_id: i32,
    next_spec_id: i32,
    categories: Vec<(i32, String)>,
    products: Vec<(Product, String)>,
    specs: Vec<StoredSpec>,
    failing_keys: Vec<String>,
    queries: usize,
}

/// Product repository and spec store sharing one in-memory table set.
#[derive(Clone)]
pub struct InMemoryCatalog {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        let inner = Inner {
            categories: vec![
                (1, UNCATEGORIZED.to_string()),
                (2, "Smartphone".to_string()),
                (3, "Accessories".to_string()),
            ],
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    pub fn service(&self) -> CatalogService {
        CatalogService::new(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    pub fn atomic_service(&self) -> CatalogService {
        self.service().with_mode(SpecWriteMode::Atomic)
    }

    /// Make every insert of a spec with this key fail.
    pub fn fail_spec_key(&self, key: &str) {
        self.lock().failing_keys.push(key.to_string());
    }

    pub fn query_count(&self) -> usize {
        self.lock().queries
    }

    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }

    pub fn spec_count(&self) -> usize {
        self.lock().specs.len()
    }

    /// Raw spec rows as `(key, value, display_order)` in insertion order.
    pub fn spec_rows(&self, product_id: i32) -> Vec<(String, String, i32)> {
        self.lock()
            .specs
            .iter()
            .filter(|s| s.product_id == product_id)
            .map(|s| (s.key.clone(), s.value.clone(), s.display_order))
            .collect()
    }

    pub fn slug_of(&self, product_id: i32) -> Option<String> {
        self.lock()
            .products
            .iter()
            .find(|(p, _)| p.id == product_id)
            .map(|(_, slug)| slug.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("catalog lock poisoned")
    }
}

impl Inner {
    fn touch(&mut self) {
        self.queries += 1;
    }

    fn resolve_category(&self, name: &str) -> (i32, String) {
        let name = name.trim().to_lowercase();
        let found = self
            .categories
            .iter()
            .find(|(_, n)| !name.is_empty() && n.to_lowercase() == name)
            .map(|(id, _)| *id);
        let id = CategoryResolution::from_lookup(found).id();
        let display = self
            .categories
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, n)| n.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        (id, display)
    }

    fn insert_product(&mut self, product: NewProduct) -> i32 {
        self.next_product_id += 1;
        let id = self.next_product_id;
        let (_, category) = self.resolve_category(&product.category);
        let slug = product.slug();
        self.products.push((
            Product {
                id,
                name: product.name,
                price: product.price,
                stock: product.stock,
                category,
                rating: product.rating,
                description: product.description,
                image: product.image,
                brand: product.brand,
                created_at: Utc::now(),
                specifications: Vec::new(),
            },
            slug,
        ));
        id
    }

    fn insert_spec(&mut self, product_id: i32, key: &str, value: &str, display_order: i32) {
        self.next_spec_id += 1;
        let id = self.next_spec_id;
        self.specs.push(StoredSpec {
            id,
            product_id,
            key: key.to_string(),
            value: value.to_string(),
            display_order,
        });
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let mut inner = self.lock();
        inner.touch();
        let mut products: Vec<Product> = inner.products.iter().map(|(p, _)| p.clone()).collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        let mut inner = self.lock();
        inner.touch();
        inner
            .products
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone())
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, product: NewProduct) -> AppResult<i32> {
        let mut inner = self.lock();
        inner.touch();
        Ok(inner.insert_product(product))
    }

    async fn create_with_specs(&self, product: NewProduct, specs: &[SpecEntry]) -> AppResult<i32> {
        let mut inner = self.lock();
        inner.touch();
        if let Some(spec) = specs
            .iter()
            .find(|s| inner.failing_keys.iter().any(|k| k == s.key))
        {
            return Err(AppError::Internal(anyhow::anyhow!(
                "insert of spec {} rejected",
                spec.key
            )));
        }
        let id = inner.insert_product(product);
        for spec in specs.iter().filter(|s| !s.is_empty()) {
            inner.insert_spec(id, spec.key, &spec.value, spec.display_order);
        }
        Ok(id)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<u64> {
        let mut inner = self.lock();
        inner.touch();
        let (product, _) = inner
            .products
            .iter_mut()
            .find(|(p, _)| p.id == id)
            .ok_or(AppError::NotFound)?;
        product.name = changes.name;
        product.price = changes.price;
        product.stock = changes.stock;
        product.rating = changes.rating;
        product.description = changes.description;
        product.image = changes.image;
        product.brand = changes.brand;
        Ok(1)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut inner = self.lock();
        inner.touch();
        let before = inner.products.len();
        inner.products.retain(|(p, _)| p.id != id);
        if inner.products.len() == before {
            return Err(AppError::NotFound);
        }
        inner.specs.retain(|s| s.product_id != id);
        Ok(1)
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Product>> {
        let mut inner = self.lock();
        inner.touch();
        let needle = keyword.to_lowercase();
        let mut matches: Vec<Product> = inner
            .products
            .iter()
            .map(|(p, _)| p)
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        Ok(matches)
    }
}

#[async_trait]
impl SpecificationStore for InMemoryCatalog {
    async fn list_specs(&self, product_id: i32) -> AppResult<Vec<ProductSpec>> {
        let mut inner = self.lock();
        inner.touch();
        let mut rows: Vec<&StoredSpec> = inner
            .specs
            .iter()
            .filter(|s| s.product_id == product_id)
            .collect();
        rows.sort_by_key(|s| (s.display_order, s.id));
        Ok(rows
            .into_iter()
            .map(|s| ProductSpec::new(s.key.clone(), s.value.clone()))
            .collect())
    }

    async fn add_spec(
        &self,
        product_id: i32,
        key: &str,
        value: &str,
        display_order: i32,
    ) -> AppResult<SpecWrite> {
        if value.is_empty() {
            return Ok(SpecWrite::Skipped);
        }
        let mut inner = self.lock();
        inner.touch();
        if inner.failing_keys.iter().any(|k| k == key) {
            return Err(AppError::Internal(anyhow::anyhow!("insert of spec {key} rejected")));
        }
        inner.insert_spec(product_id, key, value, display_order);
        Ok(SpecWrite::Stored)
    }
}
