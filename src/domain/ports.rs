use crate::utils::error::Result;

/// Destination for exported artifacts. Paths are relative to the backend's root.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
