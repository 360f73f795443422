//! Recording in-memory gateway for tests.
//!
//! Behaves like the remote catalog: paginated filtered lists with a total,
//! server-assigned ids and slugs, 404s for unknown records. Every call is
//! recorded so tests can assert exactly which requests reached "the
//! network" - the whole point of the debounce and de-duplication tests.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicI64, Ordering};

use storefront_api::{
    ApiError, Category, CategoryGateway, ListQuery, NewProduct, Product, ProductGateway,
    ProductPage, ProductUpdate,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!(r#"{{"error":"Not Found","message":["{what} not found"],"statusCode":404}}"#),
    }
}

/// In-memory gateway with call recording.
#[derive(Debug, Default)]
pub struct MockGateway {
    products: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
    next_id: AtomicI64,
    /// Injected failure, served to the next gateway call of any kind.
    fail_next: Mutex<Option<ApiError>>,
    list_calls: Mutex<Vec<ListQuery>>,
    detail_calls: Mutex<Vec<String>>,
    create_calls: Mutex<Vec<NewProduct>>,
    update_calls: Mutex<Vec<(i64, ProductUpdate)>>,
    delete_calls: Mutex<Vec<i64>>,
    category_calls: Mutex<usize>,
}

impl MockGateway {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Seed the catalog with products. Ids continue above the highest
    /// seeded id.
    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        let next = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.next_id.store(next, Ordering::SeqCst);
        *lock(&self.products) = products;
        self
    }

    /// Seed the available categories.
    #[must_use]
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *lock(&self.categories) = categories;
        self
    }

    /// Fail the next gateway call (whichever operation it is) with `error`.
    pub fn fail_next(&self, error: ApiError) {
        *lock(&self.fail_next) = Some(error);
    }

    /// The list requests received, in order.
    #[must_use]
    pub fn list_calls(&self) -> Vec<ListQuery> {
        lock(&self.list_calls).clone()
    }

    /// The detail slugs requested, in order.
    #[must_use]
    pub fn detail_calls(&self) -> Vec<String> {
        lock(&self.detail_calls).clone()
    }

    /// The create payloads received, in order.
    #[must_use]
    pub fn create_calls(&self) -> Vec<NewProduct> {
        lock(&self.create_calls).clone()
    }

    /// The update payloads received, in order.
    #[must_use]
    pub fn update_calls(&self) -> Vec<(i64, ProductUpdate)> {
        lock(&self.update_calls).clone()
    }

    /// The ids deleted, in order.
    #[must_use]
    pub fn delete_calls(&self) -> Vec<i64> {
        lock(&self.delete_calls).clone()
    }

    /// How many times categories were listed.
    #[must_use]
    pub fn category_calls(&self) -> usize {
        *lock(&self.category_calls)
    }

    /// Current catalog contents.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.products).clone()
    }

    fn take_failure(&self) -> Option<ApiError> {
        lock(&self.fail_next).take()
    }

    fn category_for(&self, id: i64) -> Category {
        lock(&self.categories)
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .unwrap_or_else(|| Category {
                id,
                name: format!("Category {id}"),
                slug: format!("category-{id}"),
                image: String::new(),
            })
    }
}

impl ProductGateway for MockGateway {
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, ApiError> {
        lock(&self.list_calls).push(query.clone());
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let needle = query.query.as_deref().map(str::to_lowercase);
        let matching: Vec<Product> = lock(&self.products)
            .iter()
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|q| p.title.to_lowercase().contains(q))
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();
        Ok(ProductPage { items, total })
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        lock(&self.detail_calls).push(slug.to_string());
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        lock(&self.products)
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| not_found("product"))
    }

    async fn create_product(&self, input: &NewProduct) -> Result<Product, ApiError> {
        lock(&self.create_calls).push(input.clone());
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let product = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: input.title.clone(),
            slug: slugify(&input.title),
            price: input.price,
            description: input.description.clone(),
            category: self.category_for(input.category_id),
            images: input.images.clone(),
        };
        lock(&self.products).push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<Product, ApiError> {
        lock(&self.update_calls).push((id, update.clone()));
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let category = self.category_for(update.category_id);
        let mut products = lock(&self.products);
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("product"))?;
        product.title = update.title.clone();
        product.price = update.price;
        product.description = update.description.clone();
        product.category = category;
        product.images = update.images.clone();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        lock(&self.delete_calls).push(id);
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut products = lock(&self.products);
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(not_found("product"));
        }
        Ok(())
    }
}

impl CategoryGateway for MockGateway {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        *lock(&self.category_calls) += 1;
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(lock(&self.categories).clone())
    }
}
