use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{
    Category, CreateCategoryRequest, CreateProductRequest, Product, ProductFilter,
    UpdateProductRequest,
};
use crate::modules::catalog::repositories::{CategoryRepository, ProductRepository};

/// Service for catalog management and storefront reads
pub struct CatalogService {
    product_repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl CatalogService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    /// Create a product (admin)
    pub async fn create_product(&self, request: CreateProductRequest) -> Result<Product> {
        if let Some(category_id) = &request.category_id {
            self.category_repo
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Category {}", category_id)))?;
        }

        let product = Product::new(
            request.name,
            request.description,
            request.price,
            request.stock,
            request.category_id,
            request.gender,
        )?;

        let created = self.product_repo.create(&product).await?;

        info!(product_id = %created.id, name = %created.name, "Created product");

        Ok(created)
    }

    /// Partially update a product (admin)
    pub async fn update_product(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> Result<Product> {
        let mut product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(description) = request.description {
            product.description = Some(description);
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(stock) = request.stock {
            product.stock = stock;
        }
        if let Some(category_id) = request.category_id {
            self.category_repo
                .find_by_id(&category_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Category {}", category_id)))?;
            product.category_id = Some(category_id);
        }
        if let Some(gender) = request.gender {
            product.gender = Some(gender);
        }

        product.validate()?;
        product.updated_at = Utc::now();

        self.product_repo.update(&product).await
    }

    /// Archive a product so it disappears from the storefront (admin)
    pub async fn archive_product(&self, id: &str) -> Result<()> {
        self.product_repo.set_archived(id, true).await?;

        info!(product_id = %id, "Archived product");

        Ok(())
    }

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", id)))
    }

    pub async fn list_products(
        &self,
        filter: ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        self.product_repo.list(&filter, limit, offset).await
    }

    /// Create a category (admin)
    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category> {
        let category = Category::new(request.name)?;
        self.category_repo.create(&category).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.category_repo.list().await
    }
}
