// Catalog module: products and categories

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Category, Gender, Product};
pub use repositories::{
    CategoryRepository, MySqlCategoryRepository, MySqlProductRepository, ProductRepository,
};
pub use services::CatalogService;
