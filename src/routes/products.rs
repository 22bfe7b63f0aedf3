use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::{
        CreatedProduct, ProductCreateRequest, ProductList, ProductUpdateRequest, SearchQuery,
    },
    error::AppResult,
    models::Product,
    response::{ApiResponse, EmptyData},
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = state.catalog.list_products().await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    params(
        ("q" = String, Query, description = "Keyword matched against name and description")
    ),
    responses(
        (status = 200, description = "Matching products, highest rated first", body = ApiResponse<ProductList>),
        (status = 400, description = "Search keyword is required"),
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let keyword = query.q.unwrap_or_default();
    let resp = state.catalog.search_products(&keyword).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with specifications", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = state.catalog.get_product_detail(id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductCreateRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<CreatedProduct>),
        (status = 400, description = "Invalid request body or failed validation"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductCreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedProduct>>)> {
    let resp = state.catalog.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductUpdateRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ProductUpdateRequest>,
) -> AppResult<Json<ApiResponse<EmptyData>>> {
    let resp = state.catalog.update_product(id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<EmptyData>>> {
    let resp = state.catalog.delete_product(id).await?;
    Ok(Json(resp))
}
