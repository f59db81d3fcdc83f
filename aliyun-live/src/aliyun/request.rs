//! Generic RPC request
//!
//! Holds the action, the API version and a bag of action-specific arguments.
//! Common signing parameters are added by the client at send time.

use std::collections::BTreeMap;

pub const DEFAULT_FORMAT: &str = "JSON";

/// Anything the RPC client can sign and send.
pub trait RpcRequest {
    /// All request-specific parameters, including `Action` and `Version`.
    fn params(&self) -> BTreeMap<String, String>;

    fn action(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    action: String,
    version: String,
    format: String,
    args: BTreeMap<String, String>,
}

impl Request {
    #[must_use]
    pub fn new(action: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            version: version.into(),
            format: DEFAULT_FORMAT.to_string(),
            args: BTreeMap::new(),
        }
    }

    /// Store an argument, replacing any previous value for `key`.
    pub fn set_args(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn remove_args(&mut self, key: &str) -> Option<String> {
        self.args.remove(key)
    }

    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn args(&self) -> &BTreeMap<String, String> {
        &self.args
    }

    pub fn set_action(&mut self, action: impl Into<String>) -> &mut Self {
        self.action = action.into();
        self
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl RpcRequest for Request {
    fn params(&self) -> BTreeMap<String, String> {
        let mut params = self.args.clone();
        params.insert("Action".to_string(), self.action.clone());
        params.insert("Version".to_string(), self.version.clone());
        params.insert("Format".to_string(), self.format.clone());
        params
    }

    fn action(&self) -> &str {
        &self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_args_overwrites() {
        let mut req = Request::new("DescribeLiveStreamsOnlineList", "2016-11-01");
        req.set_args("StreamName", "a");
        req.set_args("StreamName", "b");
        assert_eq!(req.arg("StreamName"), Some("b"));
        assert_eq!(req.args().len(), 1);
    }

    #[test]
    fn test_clone_has_independent_args() {
        let mut template = Request::new("ForbidLiveStream", "2016-11-01");
        template.set_args("LiveStreamType", "publisher");

        let mut cloned = template.clone();
        cloned.set_args("StreamName", "s1");
        cloned.set_args("LiveStreamType", "other");
        cloned.remove_args("LiveStreamType");

        assert_eq!(template.arg("LiveStreamType"), Some("publisher"));
        assert!(template.arg("StreamName").is_none());
        assert_eq!(cloned.arg("StreamName"), Some("s1"));
    }

    #[test]
    fn test_set_action_does_not_affect_earlier_clones() {
        let mut template = Request::new("DescribeLiveStreamsOnlineList", "2016-11-01");
        let before = template.clone();
        template.set_action("DescribeLiveStreamsBlockList");
        let after = template.clone();

        assert_eq!(before.action(), "DescribeLiveStreamsOnlineList");
        assert_eq!(after.action(), "DescribeLiveStreamsBlockList");
    }

    #[test]
    fn test_params_include_common_fields() {
        let mut req = Request::new("ResumeLiveStream", "2016-11-01");
        req.set_args("StreamName", "s1");
        let params = req.params();
        assert_eq!(params["Action"], "ResumeLiveStream");
        assert_eq!(params["Version"], "2016-11-01");
        assert_eq!(params["Format"], "JSON");
        assert_eq!(params["StreamName"], "s1");
    }
}
