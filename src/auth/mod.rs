pub mod directory;
pub mod provider;
pub mod session;

pub use directory::{IdentityDirectory, PlaceholderDirectory, UserDirectory};
pub use provider::{AnonymousProvider, FixedIdentityProvider, IdentityProvider, ProviderIdentity};
pub use session::AuthSession;
