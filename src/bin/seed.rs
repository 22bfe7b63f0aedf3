use commerce_catalog_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    dto::products::ProductCreateRequest,
    models::Rating,
    services::catalog_service::CatalogService,
};

const CATEGORIES: [&str; 4] = ["Smartphone", "Laptop", "Audio", "Accessories"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    seed_categories(&pool).await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if count > 0 {
        println!("Catalog already has {count} products, skipping product seed");
        return Ok(());
    }

    let catalog = CatalogService::from_orm(orm_from_pool(pool)).with_mode(config.spec_write_mode);
    for product in sample_products() {
        let name = product.name.clone();
        let resp = catalog.create_product(product).await?;
        if let Some(created) = resp.data {
            println!("Seeded {name} (id={})", created.id);
        }
    }

    println!("Seed completed");
    Ok(())
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for name in CATEGORIES {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }
    println!("Seeded categories");
    Ok(())
}

fn sample_products() -> Vec<ProductCreateRequest> {
    vec![
        ProductCreateRequest {
            name: "Nova Phone 12".into(),
            price: 7_999_000,
            stock: 25,
            category: "Smartphone".into(),
            rating: Rating::from_f64(4.7),
            description: "Flagship phone with a bright OLED panel".into(),
            brand: "Nova".into(),
            chipset: "Snapdragon 8 Gen 3".into(),
            ram_gb: 12,
            ram_ddr: "LPDDR5X".into(),
            rom_value: 256,
            storage_type: "UFS 4.0".into(),
            display_inch: 6.7,
            refresh_rate_hz: 120,
            battery: "5000 mAh".into(),
            charging: "67W wired".into(),
            camera: "50 MP + 12 MP + 10 MP".into(),
            connectivity_5g: true,
            connectivity_wifi: true,
            connectivity_nfc: true,
            os_name: "Android".into(),
            os_version: "14".into(),
            ..Default::default()
        },
        ProductCreateRequest {
            name: "Gaming Laptop".into(),
            price: 15_000_000,
            stock: 10,
            category: "Laptop".into(),
            rating: Rating::from_f64(4.5),
            description: "High refresh rate laptop for gaming".into(),
            ram_gb: 16,
            ram_ddr: "DDR5".into(),
            rom_value: 1,
            rom_unit: "TB".into(),
            storage_type: "NVMe SSD".into(),
            display_inch: 15.6,
            refresh_rate_hz: 165,
            connectivity_wifi: true,
            os_name: "Windows".into(),
            os_version: "11".into(),
            ..Default::default()
        },
        ProductCreateRequest {
            name: "Wireless Headphones".into(),
            price: 1_500_000,
            stock: 50,
            category: "Audio".into(),
            rating: Rating::from_f64(4.7),
            description: "Noise cancelling over-ear headphones".into(),
            battery: "30 hours".into(),
            ..Default::default()
        },
        ProductCreateRequest {
            name: "Mechanical Keyboard".into(),
            price: 750_000,
            stock: 30,
            category: "Accessories".into(),
            rating: Rating::from_f64(4.6),
            ..Default::default()
        },
        ProductCreateRequest {
            name: "Gaming Mouse".into(),
            price: 450_000,
            stock: 40,
            category: "Accessories".into(),
            rating: Rating::from_f64(4.4),
            ..Default::default()
        },
    ]
}
