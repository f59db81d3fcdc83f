//! Live stream URLs
//!
//! URL formats:
//! - publish:  `rtmp://{video_center}/{app}/{stream}?vhost={domain}[&auth_key=...]`
//! - RTMP:     `rtmp://{domain}/{app}/{stream}[?auth_key=...]`
//! - HTTP-FLV: `http://{domain}/{app}/{stream}.flv[?auth_key=...]`
//! - HLS:      `http://{domain}/{app}/{stream}.m3u8[?auth_key=...]`
//!
//! With stream credentials every URL gets an `auth_key` (URL auth type A):
//! `{expires}-0-0-md5("{path}-{expires}-0-0-{key}")`, where `path` is the URI
//! path including any `.flv` / `.m3u8` suffix.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::controller::Live;
use super::types::{FrameRateAndBitRateResponse, LiveStreamType, OnlineUserNumResponse};
use crate::aliyun::Response;
use crate::error::{LiveError, Result};

/// Ingest server publish URLs point at. A custom domain CNAMEd to it works too.
pub const DEFAULT_VIDEO_CENTER: &str = "video-center.alivecdn.com";

pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// URL auth ("type A") settings for a domain.
#[derive(Clone, PartialEq, Eq)]
pub struct StreamCredentials {
    key: String,
    timeout: Duration,
}

impl StreamCredentials {
    /// `timeout` is added to the current time when no explicit expiry is given.
    #[must_use]
    pub fn new(key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            key: key.into(),
            timeout,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Expiry used when the caller gives none: `now + timeout`, saturating
    /// at the latest representable time.
    #[must_use]
    pub fn default_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::from_std(self.timeout)
            .ok()
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// `auth_key` value for `path`, valid until `expires`.
    #[must_use]
    pub fn auth_key(&self, path: &str, expires: DateTime<Utc>) -> String {
        sign_path(path, expires.timestamp(), &self.key)
    }
}

impl fmt::Debug for StreamCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCredentials")
            .field("key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `{expires}-0-0-{md5hex}`; rand and uid are always `0`.
#[must_use]
pub fn sign_path(path: &str, expires: i64, key: &str) -> String {
    let digest = md5::compute(format!("{path}-{expires}-0-0-{key}").as_bytes());
    format!("{expires}-0-0-{digest:x}")
}

/// Publish and play URLs of a single stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayUrls {
    pub rtmp: String,
    pub http_flv: String,
    pub hls: String,
}

/// One stream under the controller's domain and app.
///
/// URL generation works on any `Stream`. The control and query methods need
/// the controller the stream came from ([`Live::get_stream`] or
/// [`Stream::with_live`]). Stream names are not checked for uniqueness.
#[derive(Debug, Clone)]
pub struct Stream {
    domain_name: String,
    app_name: String,
    stream_name: String,
    video_center: String,
    credentials: Option<StreamCredentials>,
    live: Option<Live>,
}

impl Stream {
    #[must_use]
    pub fn new(
        domain_name: impl Into<String>,
        app_name: impl Into<String>,
        stream_name: impl Into<String>,
        video_center: impl Into<String>,
        credentials: Option<StreamCredentials>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            app_name: app_name.into(),
            stream_name: stream_name.into(),
            video_center: video_center.into(),
            credentials,
            live: None,
        }
    }

    /// Bind the controller used by the stream's API calls.
    #[must_use]
    pub fn with_live(mut self, live: Live) -> Self {
        self.live = Some(live);
        self
    }

    #[must_use]
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    #[must_use]
    pub fn video_center(&self) -> &str {
        &self.video_center
    }

    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.credentials.is_some()
    }

    fn path(&self, suffix: &str) -> String {
        format!("/{}/{}{suffix}", self.app_name, self.stream_name)
    }

    fn auth_key(&self, path: &str, expires: Option<DateTime<Utc>>) -> Option<String> {
        self.credentials.as_ref().map(|cert| {
            let expires = expires.unwrap_or_else(|| cert.default_expiry(Utc::now()));
            cert.auth_key(path, expires)
        })
    }

    fn play_url(&self, scheme: &str, suffix: &str, expires: Option<DateTime<Utc>>) -> String {
        let path = self.path(suffix);
        let url = format!("{scheme}://{}{path}", self.domain_name);
        match self.auth_key(&path, expires) {
            Some(auth_key) => format!("{url}?auth_key={auth_key}"),
            None => url,
        }
    }

    /// Publish URL, signed with `expires` or `now + timeout`.
    #[must_use]
    pub fn rtmp_publish_url_at(&self, expires: Option<DateTime<Utc>>) -> String {
        let path = self.path("");
        let url = format!(
            "rtmp://{}{path}?vhost={}",
            self.video_center, self.domain_name
        );
        match self.auth_key(&path, expires) {
            Some(auth_key) => format!("{url}&auth_key={auth_key}"),
            None => url,
        }
    }

    #[must_use]
    pub fn rtmp_publish_url(&self) -> String {
        self.rtmp_publish_url_at(None)
    }

    #[must_use]
    pub fn rtmp_live_url_at(&self, expires: Option<DateTime<Utc>>) -> String {
        self.play_url("rtmp", "", expires)
    }

    #[must_use]
    pub fn rtmp_live_url(&self) -> String {
        self.rtmp_live_url_at(None)
    }

    #[must_use]
    pub fn http_flv_live_url_at(&self, expires: Option<DateTime<Utc>>) -> String {
        self.play_url("http", ".flv", expires)
    }

    #[must_use]
    pub fn http_flv_live_url(&self) -> String {
        self.http_flv_live_url_at(None)
    }

    #[must_use]
    pub fn hls_live_url_at(&self, expires: Option<DateTime<Utc>>) -> String {
        self.play_url("http", ".m3u8", expires)
    }

    #[must_use]
    pub fn hls_live_url(&self) -> String {
        self.hls_live_url_at(None)
    }

    /// All play URLs, signed against the same expiry.
    #[must_use]
    pub fn play_urls(&self) -> PlayUrls {
        let expires = self
            .credentials
            .as_ref()
            .map(|cert| cert.default_expiry(Utc::now()));
        PlayUrls {
            rtmp: self.rtmp_live_url_at(expires),
            http_flv: self.http_flv_live_url_at(expires),
            hls: self.hls_live_url_at(expires),
        }
    }
}

// Stream API calls
// ----------------------------------------------------------------------------

impl Stream {
    fn live(&self) -> Result<&Live> {
        self.live.as_ref().ok_or_else(|| {
            LiveError::InvalidConfig(format!(
                "stream {} is not bound to a live controller",
                self.stream_name
            ))
        })
    }

    /// Forbid the publisher of this stream, optionally until `resume_time`.
    pub async fn forbid_push(&self, resume_time: Option<DateTime<Utc>>) -> Result<Response> {
        self.live()?
            .forbid_live_stream(
                &self.app_name,
                &self.stream_name,
                LiveStreamType::Publisher,
                resume_time,
            )
            .await
    }

    pub async fn resume_push(&self) -> Result<Response> {
        self.live()?
            .resume_live_stream(&self.app_name, &self.stream_name, LiveStreamType::Publisher)
            .await
    }

    /// Whether the stream is in the domain's online list.
    pub async fn is_online(&self) -> Result<bool> {
        let resp = self.live()?.streams_online_list().await?;
        Ok(resp
            .online_info
            .live_stream_online_info
            .iter()
            .any(|info| info.app_name == self.app_name && info.stream_name == self.stream_name))
    }

    /// Whether the stream is on the domain's blacklist.
    ///
    /// Blacklist entries have the form `{domain}/{app}/{stream}`.
    pub async fn is_blocked(&self) -> Result<bool> {
        let resp = self.live()?.streams_block_list().await?;
        let url = format!("{}/{}/{}", self.domain_name, self.app_name, self.stream_name);
        Ok(resp.stream_urls.stream_url.iter().any(|u| *u == url))
    }

    pub async fn online_user_num(
        &self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<OnlineUserNumResponse> {
        self.live()?
            .stream_online_user_num(Some(&self.stream_name), start_time, end_time)
            .await
    }

    pub async fn frame_rate_and_bit_rate(&self) -> Result<FrameRateAndBitRateResponse> {
        self.live()?
            .stream_frame_rate_and_bit_rate(Some(&self.stream_name))
            .await
    }
}
