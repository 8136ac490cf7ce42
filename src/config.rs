use serde::Deserialize;

/// Plugin options, as passed by the host, e.g.
/// `["react_ssr_try_catch_swc_plugin", { "errorHandler": "./errorHandler" }]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Module specifier `require`d as the render error handler.
    #[serde(default)]
    pub error_handler: Option<String>,
}

impl Config {
    pub fn with_error_handler(specifier: impl Into<String>) -> Self {
        Self {
            error_handler: Some(specifier.into()),
        }
    }

    /// Parse the raw JSON config string handed over by the host. Missing or
    /// unreadable config falls back to the default, so a bad `errorHandler`
    /// only surfaces once a component actually needs the handler.
    pub fn from_plugin_config(raw: Option<&str>) -> Self {
        raw.map(|s| serde_json::from_str(s).unwrap_or_default())
            .unwrap_or_default()
    }

    /// The configured handler specifier; an empty string counts as unset.
    pub fn error_handler(&self) -> Option<&str> {
        self.error_handler.as_deref().filter(|s| !s.is_empty())
    }
}
