//! The products list reducer.
//!
//! Owns pagination, debounced search, the detail selection, and the
//! edit/delete surfaces. All reads go through the query cache keyed by
//! `{page, limit, query}`; all mutations invalidate the `products`
//! resource (and the exact detail key) before their result action lands.
//!
//! # Concurrency rules
//!
//! - Search input debounces 300 ms trailing-edge: every keystroke replaces
//!   the pending timer, only the last value of a burst commits.
//! - One list fetch at a time: fetches register under a fixed effect id,
//!   so a new page or search replaces the in-flight read.
//! - Stale list resolutions are discarded by comparing their request
//!   against the state's current one (last key wins).
//! - `Closed` cancels the timer and every registered fetch, so nothing
//!   fires after the view goes away.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use storefront_api::{
    ApiError, Category, CategoryGateway, ListQuery, Product, ProductGateway, ProductPage,
    ProductUpdate,
};
use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use storefront_core::{SmallVec, async_effect, smallvec};

use crate::environment::CatalogEnvironment;
use crate::forms::{FormErrors, SubmitIntent};
use crate::keys::{
    PRODUCTS_RESOURCE, as_api_error, categories_key, detail_key, encode, list_key,
};
use crate::products::actions::ProductsAction;
use crate::products::state::{DeleteDialog, Editor, LoadStatus, ProductsState, Selection};

/// Debounce timer for the search input.
pub const SEARCH_DEBOUNCE: EffectId = EffectId::new("products.search.debounce");

/// The in-flight list read.
pub const LIST_FETCH: EffectId = EffectId::new("products.list.fetch");

/// The in-flight detail read.
pub const DETAIL_FETCH: EffectId = EffectId::new("products.detail.fetch");

/// The in-flight category read.
pub const CATEGORIES_FETCH: EffectId = EffectId::new("products.categories.fetch");

/// Quiet period before a search burst commits.
pub const SEARCH_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// The products list reducer. Stateless; generic over the gateway.
pub struct ProductsReducer<G> {
    _gateway: PhantomData<fn() -> G>,
}

impl<G> ProductsReducer<G> {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _gateway: PhantomData,
        }
    }
}

impl<G> Default for ProductsReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Clone for ProductsReducer<G> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<G> std::fmt::Debug for ProductsReducer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductsReducer").finish()
    }
}

/// Empty search text is "no filter".
fn normalize(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

impl<G> ProductsReducer<G>
where
    G: ProductGateway + CategoryGateway + Send + Sync + 'static,
{
    /// The keyed list read, registered for replacement under [`LIST_FETCH`].
    fn fetch_list(env: &CatalogEnvironment<G>, request: ListQuery) -> Effect<ProductsAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        let key = list_key(&request);
        let fetch_request = request.clone();
        Effect::cancellable(
            LIST_FETCH,
            async_effect! {
                let result = cache
                    .fetch::<ProductPage, _, _>(key, move || {
                        let gateway = Arc::clone(&gateway);
                        let request = fetch_request.clone();
                        async move { encode(gateway.list_products(&request).await?) }
                    })
                    .await;
                Some(ProductsAction::ListLoaded {
                    request,
                    result: result.map_err(as_api_error),
                })
            },
        )
    }

    /// The detail read by slug, registered under [`DETAIL_FETCH`].
    fn fetch_detail(env: &CatalogEnvironment<G>, slug: String) -> Effect<ProductsAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        let key = detail_key(&slug);
        let fetch_slug = slug.clone();
        Effect::cancellable(
            DETAIL_FETCH,
            async_effect! {
                let result = cache
                    .fetch::<Product, _, _>(key, move || {
                        let gateway = Arc::clone(&gateway);
                        let slug = fetch_slug.clone();
                        async move { encode(gateway.get_product_by_slug(&slug).await?) }
                    })
                    .await;
                Some(ProductsAction::DetailLoaded {
                    slug,
                    result: result.map_err(as_api_error),
                })
            },
        )
    }

    /// The category read, registered under [`CATEGORIES_FETCH`].
    fn fetch_categories(env: &CatalogEnvironment<G>) -> Effect<ProductsAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        Effect::cancellable(
            CATEGORIES_FETCH,
            async_effect! {
                let result = cache
                    .fetch::<Vec<Category>, _, _>(categories_key(), move || {
                        let gateway = Arc::clone(&gateway);
                        async move { encode(gateway.list_categories().await?) }
                    })
                    .await;
                Some(ProductsAction::CategoriesLoaded(result.map_err(as_api_error)))
            },
        )
    }

    /// The update mutation. Invalidates the list and the record's detail
    /// key on success, before the result action lands.
    fn submit_update(
        env: &CatalogEnvironment<G>,
        id: i64,
        slug: String,
        update: ProductUpdate,
    ) -> Effect<ProductsAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        async_effect! {
            let result = gateway.update_product(id, &update).await;
            if result.is_ok() {
                cache.invalidate_resource(PRODUCTS_RESOURCE);
                cache.invalidate(&detail_key(&slug));
            }
            Some(ProductsAction::UpdateFinished { id, result })
        }
    }

    /// The delete mutation, same invalidation rules as update.
    fn submit_delete(env: &CatalogEnvironment<G>, id: i64, slug: String) -> Effect<ProductsAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        async_effect! {
            let result = gateway.delete_product(id).await;
            if result.is_ok() {
                cache.invalidate_resource(PRODUCTS_RESOURCE);
                cache.invalidate(&detail_key(&slug));
            }
            Some(ProductsAction::DeleteFinished { id, result })
        }
    }
}

impl<G> Reducer for ProductsReducer<G>
where
    G: ProductGateway + CategoryGateway + Send + Sync + 'static,
{
    type State = ProductsState;
    type Action = ProductsAction;
    type Environment = CatalogEnvironment<G>;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the flow in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Lifecycle
            // ═══════════════════════════════════════════════════════════
            ProductsAction::Opened => {
                state.status = LoadStatus::Loading;
                smallvec![Self::fetch_list(env, state.list_query())]
            }

            ProductsAction::Closed => smallvec![
                Effect::Cancel(SEARCH_DEBOUNCE),
                Effect::Cancel(LIST_FETCH),
                Effect::Cancel(DETAIL_FETCH),
                Effect::Cancel(CATEGORIES_FETCH),
            ],

            // ═══════════════════════════════════════════════════════════
            // Search: debounce on edit, fetch on commit
            // ═══════════════════════════════════════════════════════════
            ProductsAction::QueryEdited(text) => {
                state.query = normalize(text.clone());
                smallvec![Effect::debounce(
                    SEARCH_DEBOUNCE,
                    SEARCH_DEBOUNCE_DELAY,
                    ProductsAction::SearchCommitted(text),
                )]
            }

            ProductsAction::SearchCommitted(text) => {
                let committed = normalize(text);
                if committed == state.debounced_query {
                    return smallvec![];
                }
                // Page reset happens here and only here: once per
                // committed change, never for a cleared search.
                if committed.is_some() && state.page != 1 {
                    state.page = 1;
                }
                state.debounced_query = committed;
                state.status = LoadStatus::Loading;
                smallvec![Self::fetch_list(env, state.list_query())]
            }

            // ═══════════════════════════════════════════════════════════
            // Pagination: silent no-ops at the boundaries
            // ═══════════════════════════════════════════════════════════
            ProductsAction::SetPage(page) => {
                if page == 0 || page == state.page {
                    return smallvec![];
                }
                state.page = page;
                state.status = LoadStatus::Loading;
                smallvec![Self::fetch_list(env, state.list_query())]
            }

            ProductsAction::NextPage => {
                if u64::from(state.page) >= state.total_pages() {
                    return smallvec![];
                }
                state.page += 1;
                state.status = LoadStatus::Loading;
                smallvec![Self::fetch_list(env, state.list_query())]
            }

            ProductsAction::PreviousPage => {
                if state.page <= 1 {
                    return smallvec![];
                }
                state.page -= 1;
                state.status = LoadStatus::Loading;
                smallvec![Self::fetch_list(env, state.list_query())]
            }

            // ═══════════════════════════════════════════════════════════
            // List resolution: last key wins
            // ═══════════════════════════════════════════════════════════
            ProductsAction::ListLoaded { request, result } => {
                if request != state.list_query() {
                    tracing::debug!(
                        page = request.page,
                        query = ?request.query,
                        "Discarding stale list resolution"
                    );
                    return smallvec![];
                }
                match result {
                    Ok(page) => {
                        state.items = page.items;
                        state.total = Some(page.total);
                        state.status = LoadStatus::Loaded;
                    }
                    Err(error) => {
                        // Items stay as last loaded; the host renders the
                        // error alongside them.
                        state.status = LoadStatus::Failed(error.to_string());
                    }
                }
                smallvec![]
            }

            // ═══════════════════════════════════════════════════════════
            // Categories for the edit form's picker
            // ═══════════════════════════════════════════════════════════
            ProductsAction::CategoriesRequested => {
                if state.categories_status == LoadStatus::Loading {
                    return smallvec![];
                }
                state.categories_status = LoadStatus::Loading;
                smallvec![Self::fetch_categories(env)]
            }

            ProductsAction::CategoriesLoaded(result) => {
                match result {
                    Ok(categories) => {
                        state.categories = categories;
                        state.categories_status = LoadStatus::Loaded;
                    }
                    Err(error) => {
                        state.categories_status = LoadStatus::Failed(error.to_string());
                    }
                }
                smallvec![]
            }

            // ═══════════════════════════════════════════════════════════
            // Detail selection by slug
            // ═══════════════════════════════════════════════════════════
            ProductsAction::DetailRequested { slug } => {
                state.selection = Selection::Loading { slug: slug.clone() };
                state.selection_error = None;
                smallvec![Self::fetch_detail(env, slug)]
            }

            ProductsAction::DetailLoaded { slug, result } => {
                let current =
                    matches!(&state.selection, Selection::Loading { slug: wanted } if *wanted == slug);
                if !current {
                    return smallvec![];
                }
                match result {
                    Ok(product) => state.selection = Selection::Loaded(product),
                    Err(error) => {
                        state.selection = Selection::None;
                        state.selection_error = Some(error.to_string());
                    }
                }
                smallvec![]
            }

            // ═══════════════════════════════════════════════════════════
            // Edit surface
            // ═══════════════════════════════════════════════════════════
            ProductsAction::EditRequested(product) => {
                // Re-seed whenever the identity changes, even while open.
                // Re-requesting the same record keeps in-progress edits.
                let reseed = state
                    .editor
                    .as_ref()
                    .is_none_or(|editor| editor.product.id != product.id);
                if reseed {
                    state.editor = Some(Editor::seeded(product));
                }
                smallvec![]
            }

            ProductsAction::EditFormChanged(form) => {
                if let Some(editor) = &mut state.editor {
                    editor.form = form;
                }
                smallvec![]
            }

            ProductsAction::EditSubmitted => {
                let Some(editor) = &mut state.editor else {
                    return smallvec![];
                };
                if editor.submitting {
                    return smallvec![];
                }
                match editor
                    .form
                    .clone()
                    .into_update(editor.product.images.clone())
                {
                    // Validation gate: invalid forms never reach the network.
                    Err(errors) => {
                        editor.errors = errors;
                        smallvec![]
                    }
                    Ok(update) => {
                        editor.submitting = true;
                        editor.errors = FormErrors::default();
                        smallvec![Self::submit_update(
                            env,
                            editor.product.id,
                            editor.product.slug.clone(),
                            update,
                        )]
                    }
                }
            }

            ProductsAction::EditClosed => {
                state.editor = None;
                smallvec![]
            }

            ProductsAction::UpdateFinished { id, result } => {
                let Some(editor) = &mut state.editor else {
                    return smallvec![];
                };
                if editor.product.id != id {
                    return smallvec![];
                }
                match result {
                    Ok(_) => {
                        state.editor = None;
                        state.selection = Selection::None;
                        state.status = LoadStatus::Loading;
                        smallvec![Self::fetch_list(env, state.list_query())]
                    }
                    Err(error) => {
                        editor.submitting = false;
                        editor.errors = FormErrors::from_rejection(&error, SubmitIntent::Update);
                        smallvec![]
                    }
                }
            }

            // ═══════════════════════════════════════════════════════════
            // Delete confirmation
            // ═══════════════════════════════════════════════════════════
            ProductsAction::DeleteRequested(product) => {
                state.delete = Some(DeleteDialog::for_product(product));
                smallvec![]
            }

            ProductsAction::DeleteCancelled => {
                state.delete = None;
                smallvec![]
            }

            ProductsAction::DeleteConfirmed => {
                let Some(dialog) = &mut state.delete else {
                    return smallvec![];
                };
                if dialog.deleting {
                    return smallvec![];
                }
                dialog.deleting = true;
                dialog.error = None;
                smallvec![Self::submit_delete(
                    env,
                    dialog.product.id,
                    dialog.product.slug.clone(),
                )]
            }

            ProductsAction::DeleteFinished { id, result } => {
                let Some(dialog) = &mut state.delete else {
                    return smallvec![];
                };
                if dialog.product.id != id {
                    return smallvec![];
                }
                match result {
                    Ok(()) => {
                        state.delete = None;
                        if state.selection.product().is_some_and(|p| p.id == id) {
                            state.selection = Selection::None;
                        }
                        state.status = LoadStatus::Loading;
                        smallvec![Self::fetch_list(env, state.list_query())]
                    }
                    Err(error) => {
                        dialog.deleting = false;
                        let errors = FormErrors::from_rejection(&error, SubmitIntent::Delete);
                        dialog.error = errors.summary().map(ToString::to_string);
                        smallvec![]
                    }
                }
            }
        }
    }
}
