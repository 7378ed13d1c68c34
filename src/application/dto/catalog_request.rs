/// CatalogRequest - inputs for one catalog correlation invocation
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    /// Base URL of the component catalog REST API
    pub catalog_api_url: String,
    /// Component identifier in name-version-release form
    pub component_nvr: String,
}

impl CatalogRequest {
    pub fn new(catalog_api_url: String, component_nvr: String) -> Self {
        Self {
            catalog_api_url,
            component_nvr,
        }
    }
}
