//! Fake fetch capabilities that serve canned documents and record every call

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use devfile_api::Devfile;
use devfile_resolver::{ClientError, HttpClient, KubeClient};

/// HTTP fake keyed by URL. Unknown URLs answer `NotFound`.
///
/// # Example
///
/// ```rust
/// use devfile_test_utils::{FakeHttpClient, fixtures};
/// use devfile_resolver::HttpClient;
///
/// let http = FakeHttpClient::new()
///     .serve("https://reg/p", fixtures::containers(&["server"]));
/// assert!(http.fetch_template("https://reg/p").is_ok());
/// assert_eq!(http.calls(), vec!["https://reg/p"]);
/// ```
#[derive(Debug, Default)]
pub struct FakeHttpClient {
    responses: HashMap<String, Result<Devfile, ClientError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, devfile: Devfile) -> Self {
        self.responses.insert(url.to_string(), Ok(devfile));
        self
    }

    /// Serve a YAML document; panics on invalid YAML
    pub fn serve_yaml(self, url: &str, yaml: &str) -> Self {
        let devfile = Devfile::from_yaml(yaml)
            .unwrap_or_else(|e| panic!("FakeHttpClient::serve_yaml: {url}: {e}"));
        self.serve(url, devfile)
    }

    pub fn fail(mut self, url: &str, error: ClientError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// URLs requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl HttpClient for FakeHttpClient {
    fn fetch_template(&self, url: &str) -> Result<Devfile, ClientError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ClientError::NotFound(url.to_string())))
    }
}

/// Kubernetes fake keyed by `namespace/name`. Unknown keys answer `NotFound`.
#[derive(Debug, Default)]
pub struct FakeKubeClient {
    templates: HashMap<String, Result<Devfile, ClientError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeKubeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, namespace: &str, name: &str, devfile: Devfile) -> Self {
        self.templates
            .insert(format!("{namespace}/{name}"), Ok(devfile));
        self
    }

    pub fn fail(mut self, namespace: &str, name: &str, error: ClientError) -> Self {
        self.templates
            .insert(format!("{namespace}/{name}"), Err(error));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// `namespace/name` keys requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl KubeClient for FakeKubeClient {
    fn get(&self, name: &str, namespace: &str) -> Result<Devfile, ClientError> {
        let key = format!("{namespace}/{name}");
        self.calls.lock().unwrap().push(key.clone());
        self.templates
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(ClientError::NotFound(key)))
    }
}
