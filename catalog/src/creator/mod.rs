//! The create-product feature: form state, validation gate, server
//! reconciliation, and the completed-navigation handshake.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::CreatorAction;
pub use reducer::{CREATOR_CATEGORIES_FETCH, CreatorReducer};
pub use state::CreatorState;
