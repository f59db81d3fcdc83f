//! Live API controller
//!
//! Each instance is bound to one acceleration domain. Defaults (domain, app
//! name, API version) are fixed at construction; every call builds its own
//! [`LiveRequest`] from them, so a `Live` can be shared across tasks.
//! Methods taking an explicit `app_name` override the default for that call.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::action;
use super::request::LiveRequest;
use super::stream::{Stream, StreamCredentials, DEFAULT_VIDEO_CENTER};
use super::types::{
    BlockListResponse, ControlHistoryResponse, FrameRateAndBitRateResponse, LiveStreamType,
    OnlineListResponse, OnlineUserNumResponse, PublishListResponse, RecordConfigResponse,
    SnapshotConfig, SnapshotConfigResponse,
};
use crate::aliyun::sign::iso8601_timestamp;
use crate::aliyun::{Client, Credentials, Response};
use crate::config::LiveConfig;
use crate::error::{LiveError, Result};

const SNAPSHOT_INTERVAL_MIN: u32 = 5;
const SNAPSHOT_INTERVAL_MAX: u32 = 3600;

/// Request defaults shared by every call of one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveDefaults {
    pub domain_name: String,
    pub app_name: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct Live {
    rpc: Client,
    defaults: LiveDefaults,
    /// `None` disables URL auth on generated stream URLs.
    stream_cert: Option<StreamCredentials>,
    /// Ingest server for publish URLs, `video-center.alivecdn.com` or a
    /// custom domain CNAMEd to it.
    video_center: String,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LiveError::Validation(format!("{field} should not be empty")));
    }
    Ok(())
}

impl Live {
    pub fn new(
        cert: Credentials,
        domain_name: impl Into<String>,
        app_name: impl Into<String>,
        stream_cert: Option<StreamCredentials>,
    ) -> Result<Self> {
        Ok(Self::with_client(
            Client::new(cert)?,
            domain_name,
            app_name,
            stream_cert,
        ))
    }

    #[must_use]
    pub fn with_client(
        rpc: Client,
        domain_name: impl Into<String>,
        app_name: impl Into<String>,
        stream_cert: Option<StreamCredentials>,
    ) -> Self {
        Self {
            rpc,
            defaults: LiveDefaults {
                domain_name: domain_name.into(),
                app_name: app_name.into(),
                version: action::LIVE_API_VERSION.to_string(),
            },
            stream_cert,
            video_center: DEFAULT_VIDEO_CENTER.to_string(),
        }
    }

    pub fn from_config(config: &LiveConfig) -> Result<Self> {
        config.validate().map_err(LiveError::InvalidConfig)?;

        let rpc = Client::with_timeouts(
            Credentials::new(&config.access_key_id, &config.access_key_secret),
            &config.endpoint,
            config.http.connect_timeout(),
            config.http.timeout(),
        )?;

        let mut live = Self::with_client(
            rpc,
            &config.domain_name,
            &config.app_name,
            config.stream_auth.as_ref().map(|auth| auth.credentials()),
        )
        .with_video_center(&config.video_center);
        live.defaults.version.clone_from(&config.version);
        Ok(live)
    }

    /// Load [`LiveConfig`] from an optional file plus `ALIYUN_LIVE_*`
    /// environment variables and build a controller from it.
    pub fn from_config_file(path: Option<&str>) -> Result<Self> {
        let config = LiveConfig::load(path)?;
        Self::from_config(&config)
    }

    // Configuration
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.defaults.app_name = app_name.into();
        self
    }

    #[must_use]
    pub fn with_video_center(mut self, video_center: impl Into<String>) -> Self {
        self.video_center = video_center.into();
        self
    }

    #[must_use]
    pub fn with_stream_credentials(mut self, stream_cert: Option<StreamCredentials>) -> Self {
        self.stream_cert = stream_cert;
        self
    }

    #[must_use]
    pub const fn defaults(&self) -> &LiveDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn domain_name(&self) -> &str {
        &self.defaults.domain_name
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.defaults.app_name
    }

    #[must_use]
    pub fn video_center(&self) -> &str {
        &self.video_center
    }

    #[must_use]
    pub const fn stream_credentials(&self) -> Option<&StreamCredentials> {
        self.stream_cert.as_ref()
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.rpc
    }

    /// Stream under the default domain and app, bound to this controller.
    /// `None` for an empty name.
    ///
    /// Each call returns a fresh value with its own copy of the stream
    /// credentials; names are not checked for uniqueness.
    #[must_use]
    pub fn get_stream(&self, stream_name: &str) -> Option<Stream> {
        if stream_name.is_empty() {
            return None;
        }
        Some(Stream::new(
            &self.defaults.domain_name,
            &self.defaults.app_name,
            stream_name,
            &self.video_center,
            self.stream_cert.clone(),
        )
        .with_live(self.clone()))
    }

    /// Fresh request for `action`, pre-filled with the defaults.
    #[must_use]
    pub fn request(&self, action: &str) -> LiveRequest {
        let mut req = LiveRequest::new(
            action,
            &self.defaults.domain_name,
            &self.defaults.app_name,
        );
        req.set_version(&self.defaults.version);
        req
    }

    /// Send an arbitrary live request and decode the reply into `T`.
    pub async fn query<T: DeserializeOwned>(&self, req: &LiveRequest) -> Result<T> {
        self.rpc.query(req).await
    }

    // Stream queries
    // ------------------------------------------------------------------------

    /// Streams published between `start_time` and `end_time`.
    pub async fn streams_publish_list(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<PublishListResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_STREAMS_PUBLISH_LIST);
        req.set_args("StartTime", iso8601_timestamp(start_time));
        req.set_args("EndTime", iso8601_timestamp(end_time));
        self.query(&req).await
    }

    pub async fn streams_online_list(&self) -> Result<OnlineListResponse> {
        let req = self.request(action::DESCRIBE_LIVE_STREAMS_ONLINE_LIST);
        self.query(&req).await
    }

    /// Blacklisted streams of the whole domain; the app name is not sent.
    pub async fn streams_block_list(&self) -> Result<BlockListResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_STREAMS_BLOCK_LIST);
        req.app_name.clear();
        self.query(&req).await
    }

    pub async fn streams_control_history(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<ControlHistoryResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_STREAMS_CONTROL_HISTORY);
        req.set_args("StartTime", iso8601_timestamp(start_time));
        req.set_args("EndTime", iso8601_timestamp(end_time));
        self.query(&req).await
    }

    /// Viewer counts, for one stream or (with `None`) every stream of the app.
    pub async fn stream_online_user_num(
        &self,
        stream_name: Option<&str>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<OnlineUserNumResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_STREAM_ONLINE_USER_NUM);
        if let Some(name) = stream_name.filter(|n| !n.is_empty()) {
            req.set_args("StreamName", name);
        }
        if let Some(t) = start_time {
            req.set_args("StartTime", iso8601_timestamp(t));
        }
        if let Some(t) = end_time {
            req.set_args("EndTime", iso8601_timestamp(t));
        }
        self.query(&req).await
    }

    pub async fn stream_frame_rate_and_bit_rate(
        &self,
        stream_name: Option<&str>,
    ) -> Result<FrameRateAndBitRateResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_STREAMS_FRAME_RATE_AND_BIT_RATE_DATA);
        if let Some(name) = stream_name.filter(|n| !n.is_empty()) {
            req.set_args("StreamName", name);
        }
        self.query(&req).await
    }

    // Stream control
    // ------------------------------------------------------------------------

    /// Forbid a stream, optionally until `resume_time`.
    ///
    /// Fails with [`LiveError::Validation`] before any I/O when `app_name` or
    /// `stream_name` is empty.
    pub async fn forbid_live_stream(
        &self,
        app_name: &str,
        stream_name: &str,
        live_stream_type: LiveStreamType,
        resume_time: Option<DateTime<Utc>>,
    ) -> Result<Response> {
        require("appName", app_name)?;
        require("streamName", stream_name)?;

        let mut req = self.request(action::FORBID_LIVE_STREAM);
        req.app_name = app_name.to_string();
        req.set_args("StreamName", stream_name);
        req.set_args("LiveStreamType", live_stream_type.as_str());
        if let Some(t) = resume_time {
            req.set_args("ResumeTime", iso8601_timestamp(t));
        }
        debug!(app = app_name, stream = stream_name, "forbidding live stream");
        self.query(&req).await
    }

    /// [`Live::forbid_live_stream`] on the default app, publisher side.
    pub async fn forbid_live_stream_with_publisher(
        &self,
        stream_name: &str,
        resume_time: Option<DateTime<Utc>>,
    ) -> Result<Response> {
        self.forbid_live_stream(
            &self.defaults.app_name,
            stream_name,
            LiveStreamType::Publisher,
            resume_time,
        )
        .await
    }

    pub async fn resume_live_stream(
        &self,
        app_name: &str,
        stream_name: &str,
        live_stream_type: LiveStreamType,
    ) -> Result<Response> {
        require("appName", app_name)?;
        require("streamName", stream_name)?;

        let mut req = self.request(action::RESUME_LIVE_STREAM);
        req.app_name = app_name.to_string();
        req.set_args("StreamName", stream_name);
        req.set_args("LiveStreamType", live_stream_type.as_str());
        debug!(app = app_name, stream = stream_name, "resuming live stream");
        self.query(&req).await
    }

    pub async fn resume_live_stream_with_publisher(&self, stream_name: &str) -> Result<Response> {
        self.resume_live_stream(
            &self.defaults.app_name,
            stream_name,
            LiveStreamType::Publisher,
        )
        .await
    }

    // Recording
    // ------------------------------------------------------------------------

    /// Record streams of `app_name` to OSS under `oss_object_prefix`.
    pub async fn add_record_config(
        &self,
        app_name: &str,
        oss_endpoint: &str,
        oss_bucket: &str,
        oss_object_prefix: &str,
    ) -> Result<Response> {
        require("appName", app_name)?;
        require("ossEndpoint", oss_endpoint)?;
        require("ossBucket", oss_bucket)?;

        let mut req = self.request(action::ADD_LIVE_APP_RECORD_CONFIG);
        req.app_name = app_name.to_string();
        req.set_args("OssEndpoint", oss_endpoint);
        req.set_args("OssBucket", oss_bucket);
        if !oss_object_prefix.is_empty() {
            req.set_args("OssObjectPrefix", oss_object_prefix);
        }
        self.query(&req).await
    }

    /// Record configs of the whole domain.
    pub async fn describe_record_config(&self) -> Result<RecordConfigResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_APP_RECORD_CONFIG);
        req.app_name.clear();
        self.query(&req).await
    }

    pub async fn delete_record_config(&self, app_name: &str) -> Result<Response> {
        require("appName", app_name)?;
        let mut req = self.request(action::DELETE_LIVE_APP_RECORD_CONFIG);
        req.app_name = app_name.to_string();
        self.query(&req).await
    }

    // Snapshots
    // ------------------------------------------------------------------------

    fn snapshot_request(&self, action: &str, config: &SnapshotConfig) -> Result<LiveRequest> {
        require("appName", &config.app_name)?;
        require("ossEndpoint", &config.oss_endpoint)?;
        require("ossBucket", &config.oss_bucket)?;
        require("overwriteOssObject", &config.overwrite_oss_object)?;
        if !(SNAPSHOT_INTERVAL_MIN..=SNAPSHOT_INTERVAL_MAX).contains(&config.time_interval) {
            return Err(LiveError::Validation(format!(
                "timeInterval must be within {SNAPSHOT_INTERVAL_MIN}..={SNAPSHOT_INTERVAL_MAX} seconds, got {}",
                config.time_interval
            )));
        }

        let mut req = self.request(action);
        req.app_name.clone_from(&config.app_name);
        req.set_args("TimeInterval", config.time_interval.to_string());
        req.set_args("OssEndpoint", &config.oss_endpoint);
        req.set_args("OssBucket", &config.oss_bucket);
        req.set_args("OverwriteOssObject", &config.overwrite_oss_object);
        if let Some(seq) = config.sequence_oss_object.as_deref().filter(|s| !s.is_empty()) {
            req.set_args("SequenceOssObject", seq);
        }
        Ok(req)
    }

    pub async fn add_snapshot_config(&self, config: &SnapshotConfig) -> Result<Response> {
        let req = self.snapshot_request(action::ADD_LIVE_APP_SNAPSHOT_CONFIG, config)?;
        self.query(&req).await
    }

    pub async fn update_snapshot_config(&self, config: &SnapshotConfig) -> Result<Response> {
        let req = self.snapshot_request(action::UPDATE_LIVE_APP_SNAPSHOT_CONFIG, config)?;
        self.query(&req).await
    }

    /// Snapshot configs of `app_name`, or of the default app with `None`.
    pub async fn describe_snapshot_config(
        &self,
        app_name: Option<&str>,
    ) -> Result<SnapshotConfigResponse> {
        let mut req = self.request(action::DESCRIBE_LIVE_SNAPSHOT_CONFIG);
        if let Some(app) = app_name {
            req.app_name = app.to_string();
        }
        self.query(&req).await
    }

    pub async fn delete_snapshot_config(&self, app_name: &str) -> Result<Response> {
        require("appName", app_name)?;
        let mut req = self.request(action::DELETE_LIVE_APP_SNAPSHOT_CONFIG);
        req.app_name = app_name.to_string();
        self.query(&req).await
    }
}
