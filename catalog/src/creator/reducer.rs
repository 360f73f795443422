//! The create-product reducer.
//!
//! Validation gates the network: an invalid form sets field errors and
//! returns no effects. A successful create invalidates the `products`
//! resource, clears the fields, and raises the `completed` navigation
//! marker. A rejected create keeps the surface open with the server's
//! messages reconciled onto it.

use std::marker::PhantomData;
use std::sync::Arc;

use storefront_api::{Category, CategoryGateway, NewProduct, ProductGateway};
use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use storefront_core::{SmallVec, async_effect, smallvec};

use crate::creator::actions::CreatorAction;
use crate::creator::state::CreatorState;
use crate::environment::CatalogEnvironment;
use crate::forms::{FormErrors, SubmitIntent};
use crate::keys::{PRODUCTS_RESOURCE, as_api_error, categories_key, encode};
use crate::products::state::LoadStatus;

/// The in-flight category read for the form's picker.
pub const CREATOR_CATEGORIES_FETCH: EffectId = EffectId::new("creator.categories.fetch");

/// The create-product reducer. Stateless; generic over the gateway.
pub struct CreatorReducer<G> {
    _gateway: PhantomData<fn() -> G>,
}

impl<G> CreatorReducer<G> {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _gateway: PhantomData,
        }
    }
}

impl<G> Default for CreatorReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Clone for CreatorReducer<G> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<G> std::fmt::Debug for CreatorReducer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatorReducer").finish()
    }
}

impl<G> CreatorReducer<G>
where
    G: ProductGateway + CategoryGateway + Send + Sync + 'static,
{
    fn fetch_categories(env: &CatalogEnvironment<G>) -> Effect<CreatorAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        Effect::cancellable(
            CREATOR_CATEGORIES_FETCH,
            async_effect! {
                let result = cache
                    .fetch::<Vec<Category>, _, _>(categories_key(), move || {
                        let gateway = Arc::clone(&gateway);
                        async move { encode(gateway.list_categories().await?) }
                    })
                    .await;
                Some(CreatorAction::CategoriesLoaded(result.map_err(as_api_error)))
            },
        )
    }

    /// The create mutation. Invalidates the list on success so every
    /// paginated and filtered read refetches.
    fn submit_create(env: &CatalogEnvironment<G>, input: NewProduct) -> Effect<CreatorAction> {
        let gateway = Arc::clone(&env.gateway);
        let cache = Arc::clone(&env.queries);
        async_effect! {
            let result = gateway.create_product(&input).await;
            if result.is_ok() {
                cache.invalidate_resource(PRODUCTS_RESOURCE);
            }
            Some(CreatorAction::SubmitFinished(result))
        }
    }
}

impl<G> Reducer for CreatorReducer<G>
where
    G: ProductGateway + CategoryGateway + Send + Sync + 'static,
{
    type State = CreatorState;
    type Action = CreatorAction;
    type Environment = CatalogEnvironment<G>;

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
            CreatorAction::Opened => {
                state.categories_status = LoadStatus::Loading;
                smallvec![Self::fetch_categories(env)]
            }

            CreatorAction::Closed => smallvec![Effect::Cancel(CREATOR_CATEGORIES_FETCH)],

            // ═══════════════════════════════════════════════════════════
            // Form editing and submission
            // ═══════════════════════════════════════════════════════════
            CreatorAction::FormChanged(form) => {
                state.form = form;
                smallvec![]
            }

            CreatorAction::Submitted => {
                if !state.can_submit() {
                    return smallvec![];
                }
                match NewProduct::try_from(state.form.clone()) {
                    // Validation gate: invalid forms never reach the network.
                    Err(errors) => {
                        state.errors = errors;
                        smallvec![]
                    }
                    Ok(input) => {
                        state.submitting = true;
                        state.errors = FormErrors::default();
                        smallvec![Self::submit_create(env, input)]
                    }
                }
            }

            CreatorAction::SubmitFinished(result) => {
                state.submitting = false;
                match result {
                    Ok(product) => {
                        tracing::info!(id = product.id, slug = %product.slug, "Product created");
                        state.form = crate::forms::ProductForm::default();
                        state.errors = FormErrors::default();
                        state.completed = true;
                    }
                    Err(error) => {
                        state.errors = FormErrors::from_rejection(&error, SubmitIntent::Create);
                    }
                }
                smallvec![]
            }

            // ═══════════════════════════════════════════════════════════
            // Categories for the picker
            // ═══════════════════════════════════════════════════════════
            CreatorAction::CategoriesLoaded(result) => {
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
            // Navigation marker handshake
            // ═══════════════════════════════════════════════════════════
            CreatorAction::CompletionAcknowledged => {
                state.completed = false;
                smallvec![]
            }
        }
    }
}
