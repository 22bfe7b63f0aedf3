pub mod categories;
pub mod product_specifications;
pub mod products;

pub use categories::Entity as Categories;
pub use product_specifications::Entity as ProductSpecifications;
pub use products::Entity as Products;
