use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Product, Rating},
    repository::{NewProduct, ProductChanges},
};

const RATING_RANGE_MESSAGE: &str = "Rating must be between 0 and 5";

/// Body of `POST /products`. Missing fields take their zero value; spec
/// fields left at zero are not stored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductCreateRequest {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub category: String,
    #[schema(value_type = f64)]
    pub rating: Rating,
    pub description: String,
    pub image: String,
    pub brand: String,
    pub chipset: String,
    pub ram_gb: i32,
    pub ram_ddr: String,
    pub rom_value: i32,
    pub rom_unit: String,
    pub storage_type: String,
    pub display_inch: f64,
    pub refresh_rate_hz: i32,
    pub battery: String,
    pub charging: String,
    pub camera: String,
    pub connectivity_5g: bool,
    pub connectivity_wifi: bool,
    pub connectivity_nfc: bool,
    pub os_name: String,
    pub os_version: String,
}

impl ProductCreateRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if self.price <= 0 {
            return Err(AppError::validation("Price must be greater than zero"));
        }
        if self.stock < 0 {
            return Err(AppError::validation("Stock cannot be negative"));
        }
        if !self.rating.in_range() {
            return Err(AppError::validation(RATING_RANGE_MESSAGE));
        }
        Ok(())
    }
}

impl From<ProductCreateRequest> for NewProduct {
    fn from(req: ProductCreateRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            stock: req.stock,
            category: req.category,
            rating: req.rating,
            description: req.description,
            image: req.image,
            brand: req.brand,
        }
    }
}

/// Body of `PUT /products/{id}`. Every mutable column is overwritten,
/// so omitted fields reset to their zero value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductUpdateRequest {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    #[schema(value_type = f64)]
    pub rating: Rating,
    pub description: String,
    pub image: String,
    pub brand: String,
}

impl ProductUpdateRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if self.price < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(AppError::validation("Stock cannot be negative"));
        }
        if !self.rating.in_range() {
            return Err(AppError::validation(RATING_RANGE_MESSAGE));
        }
        Ok(())
    }
}

impl From<ProductUpdateRequest> for ProductChanges {
    fn from(req: ProductUpdateRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            stock: req.stock,
            rating: req.rating,
            description: req.description,
            image: req.image,
            brand: req.brand,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedProduct {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> ProductCreateRequest {
        ProductCreateRequest {
            name: "Gaming Mouse".into(),
            price: 450_000,
            ..Default::default()
        }
    }

    #[test]
    fn create_requires_name_and_positive_price() {
        assert!(valid_create().validate().is_ok());

        let blank = ProductCreateRequest {
            name: "   ".into(),
            ..valid_create()
        };
        assert_eq!(blank.validate().unwrap_err().to_string(), "Name is required");

        let free = ProductCreateRequest {
            price: 0,
            ..valid_create()
        };
        assert!(matches!(free.validate(), Err(AppError::Validation(_))));

        let negative_stock = ProductCreateRequest {
            stock: -1,
            ..valid_create()
        };
        assert!(negative_stock.validate().is_err());
    }

    #[test]
    fn missing_json_fields_default_to_zero() {
        let req: ProductCreateRequest =
            serde_json::from_str(r#"{"name":"Phone X","price":100,"ram_gb":8}"#).unwrap();
        assert_eq!(req.ram_gb, 8);
        assert_eq!(req.stock, 0);
        assert_eq!(req.rating, Rating::ZERO);
        assert!(req.chipset.is_empty());
        assert!(!req.connectivity_5g);
    }

    #[test]
    fn update_allows_zero_price_but_not_negative_stock() {
        let req = ProductUpdateRequest {
            name: "Phone X".into(),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let bad = ProductUpdateRequest {
            stock: -3,
            ..req
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn null_rating_reads_as_zero() {
        let req: ProductCreateRequest =
            serde_json::from_str(r#"{"name":"A","price":1,"rating":null}"#).unwrap();
        assert_eq!(req.rating, Rating::ZERO);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn out_of_scale_rating_is_rejected_before_storage() {
        let create = ProductCreateRequest {
            rating: Rating::from_f64(10.0),
            ..valid_create()
        };
        assert_eq!(
            create.validate().unwrap_err().to_string(),
            "Rating must be between 0 and 5"
        );

        let update = ProductUpdateRequest {
            name: "Phone X".into(),
            rating: Rating::from_f64(-1.0),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(AppError::Validation(_))));
    }
}
