/// HTTP endpoint paths.
pub mod endpoints {
    pub const ROOT: &str = "/";
    pub const POST: &str = "/post";
    pub const DOWNLOAD: &str = "/download";
    pub const LIST: &str = "/list";
    pub const INFO: &str = "/info";
    pub const HEALTH: &str = "/v1/health";
}

/// Header carrying the upload name; the `name` query parameter is the fallback.
pub const NAME_HEADER: &str = "name";

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub files: usize,
}

impl HealthResponse {
    pub fn ok(files: usize) -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_ok() {
        let h = HealthResponse::ok(2);
        assert_eq!(h.status, "ok");
        assert_eq!(h.files, 2);
        assert_eq!(h.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::POST, "/post");
        assert_eq!(endpoints::DOWNLOAD, "/download");
        assert_eq!(endpoints::LIST, "/list");
        assert_eq!(endpoints::INFO, "/info");
        assert_eq!(endpoints::HEALTH, "/v1/health");
    }
}
