use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CreatedProduct, ProductCreateRequest, ProductList, ProductUpdateRequest, SearchQuery},
    models::{Product, ProductSpec},
    response::{ApiResponse, EmptyData, Meta},
    routes::{health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::search_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product
    ),
    components(
        schemas(
            Product,
            ProductSpec,
            ProductCreateRequest,
            ProductUpdateRequest,
            SearchQuery,
            CreatedProduct,
            ProductList,
            EmptyData,
            Meta,
            health::HealthData,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CreatedProduct>,
            ApiResponse<EmptyData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
