//! Error type shared by the site controllers and the wasm entry points.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteError {
    MissingWindow,
    MissingDocument,
    /// A required element id is absent from the document.
    MissingElement(String),
    /// `show_page` was asked for a page the router does not know.
    UnknownPage(String),
    InvalidConfig(String),
    /// Called before `start_site`.
    NotStarted,
    /// Failure reported by a browser API, stringified.
    Js(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::MissingWindow => write!(f, "no window"),
            SiteError::MissingDocument => write!(f, "no document"),
            SiteError::MissingElement(id) => write!(f, "missing element #{id}"),
            SiteError::UnknownPage(id) => write!(f, "unknown page '{id}'"),
            SiteError::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            SiteError::NotStarted => write!(f, "site not started"),
            SiteError::Js(msg) => write!(f, "browser error: {msg}"),
        }
    }
}

impl std::error::Error for SiteError {}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
