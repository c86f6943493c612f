use log::Level;
use web_sys::Document;

#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Where form submissions go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormsTarget {
    /// Fixed delay, always succeeds.
    Simulated,
    /// Real POST against `{base}/api/forms/{kind}`.
    Http { base_url: String },
}

/// Pages opt into real submissions with `<body data-forms-endpoint="...">`.
/// The value `backend` means the build's default backend URL.
pub fn forms_target(document: &Document) -> FormsTarget {
    let endpoint = document
        .body()
        .and_then(|body| body.get_attribute("data-forms-endpoint"));
    forms_target_from(endpoint.as_deref())
}

pub fn forms_target_from(endpoint: Option<&str>) -> FormsTarget {
    match endpoint.map(str::trim) {
        None | Some("") => FormsTarget::Simulated,
        Some("backend") => FormsTarget::Http {
            base_url: get_backend_url().to_string(),
        },
        Some(url) => FormsTarget::Http {
            base_url: url.trim_end_matches('/').to_string(),
        },
    }
}
