pub mod filters;
pub mod store;

pub use filters::{DEFAULT_MIN_STARS, SearchFilters, SortBy, SortDirection};
pub use store::{DEFAULT_PAGE_SIZE, RepositoryStore};
