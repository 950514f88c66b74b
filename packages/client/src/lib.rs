// ABOUTME: Client-side state store for Dayboard with optimistic persistence
// ABOUTME: Local collections change first; the backend is updated in the background

pub mod backend;
pub mod error;
pub mod http;
pub mod state;
pub mod store;

pub use backend::{fetch_all, persist, Backend};
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use state::{default_tab_order, AppState, TaskRef, Tracked, View};
pub use store::{PendingSync, Store};
