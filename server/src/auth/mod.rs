mod extractor;
mod provider;

pub use extractor::AuthUser;
pub use provider::{AuthProvider, AuthProviderError, Identity, SupabaseAuth};

#[cfg(test)]
pub use provider::testing::FakeAuth;
