//! Live API request
//!
//! Every live action carries the acceleration domain and, usually, the app
//! name. An empty app name is left off the wire.

use std::collections::BTreeMap;

use super::action::LIVE_API_VERSION;
use crate::aliyun::{Request, RpcRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRequest {
    inner: Request,
    pub domain_name: String,
    pub app_name: String,
}

impl LiveRequest {
    #[must_use]
    pub fn new(
        action: impl Into<String>,
        domain_name: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            inner: Request::new(action, LIVE_API_VERSION),
            domain_name: domain_name.into(),
            app_name: app_name.into(),
        }
    }

    pub fn set_args(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.inner.set_args(key, value);
        self
    }

    pub fn set_action(&mut self, action: impl Into<String>) -> &mut Self {
        self.inner.set_action(action);
        self
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.inner.set_version(version);
        self
    }

    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.inner.arg(key)
    }
}

impl RpcRequest for LiveRequest {
    fn params(&self) -> BTreeMap<String, String> {
        let mut params = self.inner.params();
        params.insert("DomainName".to_string(), self.domain_name.clone());
        if !self.app_name.is_empty() {
            params.insert("AppName".to_string(), self.app_name.clone());
        }
        params
    }

    fn action(&self) -> &str {
        self.inner.action()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::action;

    #[test]
    fn test_params_carry_domain_and_app() {
        let req = LiveRequest::new(action::DESCRIBE_LIVE_STREAMS_ONLINE_LIST, "live.example.com", "app");
        let params = req.params();
        assert_eq!(params["DomainName"], "live.example.com");
        assert_eq!(params["AppName"], "app");
        assert_eq!(params["Version"], LIVE_API_VERSION);
    }

    #[test]
    fn test_empty_app_name_omitted() {
        let req = LiveRequest::new(action::DESCRIBE_LIVE_STREAMS_BLOCK_LIST, "live.example.com", "");
        assert!(!req.params().contains_key("AppName"));
    }

    #[test]
    fn test_clone_is_independent() {
        let template = LiveRequest::new(action::FORBID_LIVE_STREAM, "live.example.com", "app");
        let mut per_call = template.clone();
        per_call.app_name = "other".to_string();
        per_call.set_args("StreamName", "s1");
        per_call.set_action(action::RESUME_LIVE_STREAM);

        assert_eq!(template.app_name, "app");
        assert!(template.arg("StreamName").is_none());
        assert_eq!(template.action(), action::FORBID_LIVE_STREAM);
        assert_eq!(per_call.action(), action::RESUME_LIVE_STREAM);
    }
}
