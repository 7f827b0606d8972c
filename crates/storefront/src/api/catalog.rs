//! Category and product endpoints.
//!
//! Category reads are served from the cache; category writes invalidate it.
//! Products are never cached because stock changes with every order.

use lulu_core::{CategoryId, ProductId};
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::types::{
    Category, CreateCategoryRequest, CreateProductRequest, MessageResponse, Product,
    ProductQuery, ProductsResponse, UpdateProductRequest,
};
use super::{ApiClient, ApiError};

impl ApiClient {
    // =========================================================================
    // Category Methods
    // =========================================================================

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get(&["categories"], &[]).await?;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// A single category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category(&self, id: &CategoryId) -> Result<Category, ApiError> {
        let cache_key = CacheKey::Category(id.clone());

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(*category);
        }

        let category: Category = self.get(&["categories", id.as_str()], &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    /// Create a category (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<Category, ApiError> {
        let category = self.post(&["categories"], request).await?;
        self.inner.cache.invalidate_all();
        Ok(category)
    }

    /// Update a category (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        request: &CreateCategoryRequest,
    ) -> Result<Category, ApiError> {
        let category = self.put(&["categories", id.as_str()], request).await?;
        self.inner.cache.invalidate_all();
        Ok(category)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// A page of products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Result<ProductsResponse, ApiError> {
        self.get(&["products"], &query.to_pairs()).await
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get(&["products", id.as_str()], &[]).await
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get(&["products", "featured", "all"], &[]).await
    }

    /// Every product in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn products_in_category(&self, id: &CategoryId) -> Result<Vec<Product>, ApiError> {
        self.get(&["products", "category", id.as_str()], &[]).await
    }

    /// Create a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all, fields(name = %request.name))]
    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, ApiError> {
        self.post(&["products"], request).await
    }

    /// Update a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, request), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        request: &UpdateProductRequest,
    ) -> Result<Product, ApiError> {
        self.put(&["products", id.as_str()], request).await
    }

    /// Delete a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<MessageResponse, ApiError> {
        self.delete(&["products", id.as_str()]).await
    }
}
