mod category_repository;
mod product_repository;

pub use category_repository::{CategoryRepository, MySqlCategoryRepository};
pub use product_repository::{MySqlProductRepository, ProductRepository};
