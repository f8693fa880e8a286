//! Runtime settings for the execution service and local storage.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://emkc.org/api/v2/piston/execute";

const ENDPOINT_VAR: &str = "LAMBDA_TUTOR_ENDPOINT";
const VERSION_VAR: &str = "LAMBDA_TUTOR_LANGUAGE_VERSION";
const FOLD_SOURCE_VAR: &str = "LAMBDA_TUTOR_FOLD_SOURCE";
#[cfg(not(target_arch = "wasm32"))]
const STORE_VAR: &str = "LAMBDA_TUTOR_STORE";

#[derive(Debug, Clone, PartialEq)]
pub struct TutorConfig {
    pub endpoint: String,
    pub language: String,
    pub version: String,
    pub file_name: String,
    pub compile_options: Vec<String>,
    /// Fold Turkish letters in the submitted source, as the checker does for output.
    pub fold_source: bool,
    #[cfg(not(target_arch = "wasm32"))]
    pub store_path: PathBuf,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: "java".to_string(),
            version: "*".to_string(),
            file_name: "Main.java".to_string(),
            compile_options: vec!["-encoding".to_string(), "UTF-8".to_string()],
            fold_source: true,
            #[cfg(not(target_arch = "wasm32"))]
            store_path: std::env::temp_dir().join("lambda_tutor").join("store.json"),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl TutorConfig {
    /// Builds a config from a variable lookup; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = non_blank(lookup(ENDPOINT_VAR)) {
            config.endpoint = endpoint;
        }
        if let Some(version) = non_blank(lookup(VERSION_VAR)) {
            config.version = version;
        }
        if let Some(flag) = non_blank(lookup(FOLD_SOURCE_VAR)).and_then(|v| parse_flag(&v)) {
            config.fold_source = flag;
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            config.store_path = store_path_from(&lookup);
        }
        config
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        let mut config = Self::from_lookup(|_| None);
        if let Some(endpoint) = web::endpoint() {
            config.endpoint = endpoint;
        }
        config
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn store_path_from(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(explicit) = non_blank(lookup(STORE_VAR)) {
        return PathBuf::from(explicit);
    }

    let base = if cfg!(target_os = "windows") {
        non_blank(lookup("APPDATA")).map(PathBuf::from)
    } else {
        non_blank(lookup("XDG_DATA_HOME"))
            .map(PathBuf::from)
            .or_else(|| {
                non_blank(lookup("HOME")).map(|h| PathBuf::from(h).join(".local").join("share"))
            })
    };

    base.unwrap_or_else(std::env::temp_dir)
        .join("lambda_tutor")
        .join("store.json")
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::non_blank;

    pub fn endpoint() -> Option<String> {
        from_build_env()
            .or_else(from_querystring)
            .or_else(from_meta)
            .or_else(from_local_storage)
    }

    fn from_build_env() -> Option<String> {
        non_blank(option_env!("LAMBDA_TUTOR_ENDPOINT").map(str::to_string))
    }

    fn from_querystring() -> Option<String> {
        let window = web_sys::window()?;
        let search = window.location().search().ok()?;
        let query = search.strip_prefix('?').unwrap_or(search.as_str());

        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == "endpoint" {
                let decoded = js_sys::decode_uri_component(value).ok()?;
                return non_blank(decoded.as_string());
            }
        }

        None
    }

    fn from_meta() -> Option<String> {
        let document = web_sys::window()?.document()?;
        let meta = document
            .query_selector("meta[name='lambda-tutor-endpoint']")
            .ok()??;
        non_blank(meta.get_attribute("content"))
    }

    fn from_local_storage() -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        non_blank(storage.get_item("lambda_tutor_endpoint").ok()?)
    }
}
