//! Public URL rewriting for reverse-proxy deployments.
//!
//! When the store sits behind a proxy (e.g. nginx serving MinIO under
//! `localhost/s3`), URLs minted against the internal endpoint are not
//! reachable by clients. The rewrite swaps the first occurrence of the
//! internal endpoint for the public prefix and touches nothing else.

use filegate_core::config::storage::S3StorageConfig;

/// Rewrites minted URLs from the internal endpoint to the public one.
#[derive(Debug, Clone, Default)]
pub struct ProxyRewriter {
    internal: String,
    public: Option<String>,
}

impl ProxyRewriter {
    /// Create a rewriter. An empty or missing public endpoint disables rewriting.
    pub fn new(internal: impl Into<String>, public: Option<String>) -> Self {
        Self {
            internal: internal.into(),
            public: public.filter(|p| !p.is_empty()),
        }
    }

    /// Build the rewriter from the S3 section of the configuration.
    pub fn from_config(config: &S3StorageConfig) -> Self {
        Self::new(config.endpoint.clone(), config.public_endpoint.clone())
    }

    /// Whether URLs are rewritten at all.
    fn is_enabled(&self) -> bool {
        self.public.is_some() && !self.internal.is_empty()
    }

    /// Apply the rewrite to a minted URL.
    pub fn rewrite(&self, url: &str) -> String {
        match &self.public {
            Some(public) if self.is_enabled() => url.replacen(&self.internal, public, 1),
            _ => url.to_string(),
        }
    }
}
