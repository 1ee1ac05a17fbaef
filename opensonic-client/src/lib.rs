mod auth;
pub mod case;
pub mod materialize;
pub mod records;
pub mod responses;
pub mod schema;
mod transport;

pub use auth::{SubsonicAuth, API_VERSION};
pub use materialize::{
    from_json, materialize, FromRecord, MaterializeError, RawInput, Record, Value,
};
pub use responses::{
    AlbumResponse, ArtistResponse, DirectoryResponse, Envelope, ErrorCode, MusicFoldersResponse,
    ResponseError, ResponseStatus, SongResponse, SubsonicResponse,
};
pub use schema::{RecordKind, Registry, SchemaError};
pub use transport::{HttpTransport, RawResponse, Transport};

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Connection settings for a [`Client`].
#[derive(Clone)]
pub struct ClientBuilder {
    client_name: String,
    base_url: String,
    username: String,
    password: String,
    test_connection: bool,
}

impl ClientBuilder {
    /// `base_url` includes scheme and any subdirectory the server lives
    /// under, e.g. `https://music.example.com/navidrome`.
    pub fn new(
        client_name: impl Into<String>,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            test_connection: true,
        }
    }

    /// Ping the server while building and refuse to return a client that
    /// cannot talk to it. On by default.
    pub fn test_connection(mut self, test_connection: bool) -> Self {
        self.test_connection = test_connection;
        self
    }

    pub async fn build(self) -> ApiResult<Client> {
        let transport = HttpTransport::new()?;
        self.build_with(transport).await
    }

    pub async fn build_with<T: Transport>(self, transport: T) -> ApiResult<Client<T>> {
        let base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::UrlCannotBeABaseUrl);
        }

        let client = Client {
            auth: SubsonicAuth::new(self.client_name, self.username, &self.password),
            base_url,
            transport,
        };

        if self.test_connection {
            let ping = client.ping().await?;
            if !ping.is_ok() {
                let detail = match &ping.error {
                    Some(e) => format!(
                        "{}: {}",
                        e.code.map_or(-1, |c| c.code()),
                        e.message.as_deref().unwrap_or_default()
                    ),
                    None => "ping was not ok".to_owned(),
                };
                return Err(ApiError::ConnectionFailed(detail));
            }
        }

        Ok(client)
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("client_name", &self.client_name)
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("test_connection", &self.test_connection)
            .finish_non_exhaustive()
    }
}

/// Either media bytes or the envelope some servers send instead, with a
/// 200 status, when the request fails.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaPayload {
    Bytes(Bytes),
    Envelope(SubsonicResponse),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Kbps; 0 means no limit.
    pub max_bit_rate: Option<usize>,
    pub format: Option<String>,
    /// Seconds into the media to start at.
    pub time_offset: Option<usize>,
    pub estimate_content_length: Option<bool>,
    pub converted: Option<bool>,
}

impl StreamOptions {
    fn push_params(&self, params: &mut Vec<(&str, String)>) {
        if let Some(max_bit_rate) = self.max_bit_rate {
            params.push(("maxBitRate", max_bit_rate.to_string()));
        }
        if let Some(format) = &self.format {
            params.push(("format", format.clone()));
        }
        if let Some(time_offset) = self.time_offset {
            params.push(("timeOffset", time_offset.to_string()));
        }
        if let Some(estimate_content_length) = self.estimate_content_length {
            params.push((
                "estimateContentLength",
                estimate_content_length.to_string(),
            ));
        }
        if let Some(converted) = self.converted {
            params.push(("converted", converted.to_string()));
        }
    }
}

#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    auth: SubsonicAuth,
    base_url: Url,
    transport: T,
}

impl Client {
    pub fn builder(
        client_name: impl Into<String>,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientBuilder {
        ClientBuilder::new(client_name, base_url, username, password)
    }
}

impl<T: Transport> Client<T> {
    pub fn auth(&self) -> &SubsonicAuth {
        &self.auth
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Releases the transport and every connection it holds.
    pub fn close(self) {
        info!(url = self.base_url.as_str(), "Closing Subsonic client");
        drop(self.transport);
    }

    fn build_req_url(&self, endpoint: &str, args: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut req_url = self.base_url.clone();
        req_url
            .path_segments_mut()
            .map_err(|_| ApiError::UrlCannotBeABaseUrl)?
            .pop_if_empty()
            .push("rest")
            .push(endpoint);

        {
            let mut query_pairs = req_url.query_pairs_mut();
            self.auth.add_to_query_pairs(&mut query_pairs);

            for (k, v) in args.iter() {
                query_pairs.append_pair(k, v);
            }
        }

        Ok(req_url)
    }

    async fn send(&self, endpoint: &str, args: &[(&str, String)]) -> ApiResult<RawResponse> {
        let req_url = self.build_req_url(endpoint, args)?;

        info!(endpoint, path = req_url.path(), "Subsonic API Request");
        let res = self.transport.get(req_url).await?;
        if res.status.is_client_error() || res.status.is_server_error() {
            return Err(ApiError::HttpStatus(res.status));
        }
        Ok(res)
    }

    async fn request<R: FromRecord>(
        &self,
        endpoint: &str,
        args: &[(&str, String)],
    ) -> ApiResult<R> {
        let res = self.send(endpoint, args).await?;

        match from_json::<R>(&res.text()) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                if res.status == StatusCode::FOUND {
                    Err(ApiError::SuspiciousRedirect)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn request_media(
        &self,
        endpoint: &str,
        args: &[(&str, String)],
    ) -> ApiResult<MediaPayload> {
        let res = self.send(endpoint, args).await?;

        if res.is_envelope() {
            let envelope = from_json::<SubsonicResponse>(&res.text())?;
            if !envelope.is_ok() {
                warn!(endpoint, "Server answered a media request with an error envelope");
            }
            return Ok(MediaPayload::Envelope(envelope));
        }

        Ok(MediaPayload::Bytes(res.body))
    }

    pub async fn ping(&self) -> ApiResult<SubsonicResponse> {
        self.request("ping", &[]).await
    }

    pub async fn add_chat_message(&self, message: &str) -> ApiResult<SubsonicResponse> {
        self.request("addChatMessage", &[("message", message.to_owned())])
            .await
    }

    /// Only admins may change passwords other than their own. The new
    /// password travels hex encoded.
    pub async fn change_password(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<SubsonicResponse> {
        let params = [
            ("username", username.to_owned()),
            ("password", format!("enc:{}", hex::encode(password))),
        ];
        self.request("changePassword", &params).await
    }

    /// `position` is in milliseconds. An existing bookmark on the same
    /// media is overwritten.
    pub async fn create_bookmark(
        &self,
        id: &str,
        position: u64,
        comment: Option<&str>,
    ) -> ApiResult<SubsonicResponse> {
        let mut params = vec![("id", id.to_owned()), ("position", position.to_string())];
        if let Some(comment) = comment {
            params.push(("comment", comment.to_owned()));
        }
        self.request("createBookmark", &params).await
    }

    pub async fn get_music_folders(&self) -> ApiResult<MusicFoldersResponse> {
        self.request("getMusicFolders", &[]).await
    }

    pub async fn get_music_directory(&self, id: &str) -> ApiResult<DirectoryResponse> {
        self.request("getMusicDirectory", &[("id", id.to_owned())])
            .await
    }

    pub async fn get_artist(&self, id: &str) -> ApiResult<ArtistResponse> {
        self.request("getArtist", &[("id", id.to_owned())]).await
    }

    pub async fn get_album(&self, id: &str) -> ApiResult<AlbumResponse> {
        self.request("getAlbum", &[("id", id.to_owned())]).await
    }

    pub async fn get_song(&self, id: &str) -> ApiResult<SongResponse> {
        self.request("getSong", &[("id", id.to_owned())]).await
    }

    /// The original file, without transcoding.
    pub async fn download(&self, id: &str) -> ApiResult<MediaPayload> {
        self.request_media("download", &[("id", id.to_owned())])
            .await
    }

    pub fn stream_url(&self, id: &str, options: &StreamOptions) -> Result<Url, ApiError> {
        let mut params = vec![("id", id.to_owned())];
        options.push_params(&mut params);

        self.build_req_url("stream", &params)
    }

    pub async fn stream(&self, id: &str, options: &StreamOptions) -> ApiResult<MediaPayload> {
        let mut params = vec![("id", id.to_owned())];
        options.push_params(&mut params);

        self.request_media("stream", &params).await
    }

    pub fn cover_art_url(&self, id: &str, size: Option<usize>) -> Result<Url, ApiError> {
        let mut params = vec![("id", id.to_owned())];
        if let Some(size) = size {
            params.push(("size", size.to_string()));
        }

        self.build_req_url("getCoverArt", &params)
    }

    pub async fn get_cover_art(&self, id: &str, size: Option<usize>) -> ApiResult<MediaPayload> {
        let mut params = vec![("id", id.to_owned())];
        if let Some(size) = size {
            params.push(("size", size.to_string()));
        }

        self.request_media("getCoverArt", &params).await
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The configured url is not a valid base url")]
    UrlCannotBeABaseUrl,

    #[error("The configured url could not be parsed")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request error")]
    RequestError(#[from] reqwest::Error),

    #[error("The server answered with HTTP status {0}")]
    HttpStatus(StatusCode),

    #[error("Could not decode the server response")]
    Materialize(#[from] MaterializeError),

    #[error("Failed to connect to the Subsonic server ({0})")]
    ConnectionFailed(String),

    #[error("{0}")]
    Generic(String),

    #[error("Required Parameter is missing. ({0})")]
    RequiredParameterMissing(String),

    #[error("Incompatible Subsonic REST protocol version. Client must upgrade. ({0})")]
    ClientMustUpgrade(String),

    #[error("Incompatible Subsonic REST protocol version. Server must upgrade. ({0})")]
    ServerMustUpgrade(String),

    #[error("Wrong username or password. ({0})")]
    WrongUsernameOrPassword(String),

    #[error("Token authentication not supported for LDAP users. ({0})")]
    NoTokenAuthForLdap(String),

    #[error("Provided authentication mechanism not supported. ({0})")]
    AuthMechanismNotSupported(String),

    #[error("Multiple conflicting authentication mechanisms provided. ({0})")]
    ConflictingAuthMechanisms(String),

    #[error("Invalid API key. ({0})")]
    InvalidApiKey(String),

    #[error("User is not authorized for the given operation. ({0})")]
    UserNotAuthorized(String),

    #[error("The trial period for the Subsonic server is over. Please upgrade to Subsonic Premium. Visit subsonic.org for details. ({0})")]
    TrialExpired(String),

    #[error("The requested data was not found. ({0})")]
    NotFound(String),

    #[error("Malformed API Response")]
    MalformedApiResponse,

    #[error("The server returned a redirect, but the response could not be parsed. Check your base url; Navidrome does this if you have a bogus path there.")]
    SuspiciousRedirect,
}

#[cfg(test)]
mod test {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    const OK: &str = r#"{"subsonic-response":{"status":"ok","version":"1.16.1","type":"navidrome","serverVersion":"0.53.3","openSubsonic":true}}"#;
    const WRONG_PASSWORD: &str = r#"{"subsonic-response":{"status":"failed","version":"1.16.1","error":{"code":40,"message":"Wrong username or password"}}}"#;

    #[derive(Debug, Clone, Default)]
    struct MockTransport {
        responses: Arc<Mutex<VecDeque<RawResponse>>>,
        seen: Arc<Mutex<Vec<Url>>>,
    }

    impl MockTransport {
        fn reply(self, status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> Self {
            self.responses.lock().unwrap().push_back(RawResponse {
                status,
                content_type: Some(content_type.to_owned()),
                body: body.into(),
            });
            self
        }

        fn json(self, body: &'static str) -> Self {
            self.reply(StatusCode::OK, "application/json", body)
        }

        fn last_query(&self) -> HashMap<String, String> {
            let seen = self.seen.lock().unwrap();
            seen.last().unwrap().query_pairs().into_owned().collect()
        }

        fn last_path(&self) -> String {
            self.seen.lock().unwrap().last().unwrap().path().to_owned()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: Url) -> Result<RawResponse, ApiError> {
            self.seen.lock().unwrap().push(url);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(ApiError::MalformedApiResponse)
        }
    }

    fn init_logging() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    async fn offline(transport: MockTransport) -> Client<MockTransport> {
        Client::builder("opensonic tests", "https://music.example.com/navidrome", "alice", "secret")
            .test_connection(false)
            .build_with(transport)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn connect_pings_the_server() {
        init_logging();
        let transport = MockTransport::default().json(OK);
        let client =
            Client::builder("opensonic tests", "https://music.example.com", "alice", "secret")
                .build_with(transport.clone())
                .await
                .unwrap();

        assert_eq!(transport.last_path(), "/rest/ping");
        let query = transport.last_query();
        assert_eq!(query["u"], "alice");
        assert_eq!(query["t"], client.auth().token());
        assert_eq!(query["s"], client.auth().salt());
        assert_eq!(query["v"], "1.16.1");
        assert_eq!(query["c"], "opensonic tests");
        assert_eq!(query["f"], "json");
        assert_eq!(query["t"], format!("{:x}", md5::compute(format!("secret{}", query["s"]))));
    }

    #[tokio::test]
    async fn connect_fails_when_ping_is_not_ok() {
        let transport = MockTransport::default().json(WRONG_PASSWORD);
        let err = Client::builder("opensonic tests", "https://music.example.com", "alice", "nope")
            .build_with(transport)
            .await
            .unwrap_err();

        match err {
            ApiError::ConnectionFailed(detail) => {
                assert_eq!(detail, "40: Wrong username or password")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn skipping_the_probe_sends_nothing() {
        let transport = MockTransport::default();
        offline(transport.clone()).await;
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn protocol_failures_are_data() {
        let transport = MockTransport::default().json(WRONG_PASSWORD);
        let client = offline(transport).await;

        let res = client.ping().await.unwrap();
        assert!(!res.is_ok());
        assert_eq!(
            res.error.as_ref().and_then(|e| e.code),
            Some(ErrorCode::WrongUsernameOrPassword)
        );
        assert!(matches!(
            res.ensure_ok(),
            Err(ApiError::WrongUsernameOrPassword(_))
        ));
    }

    #[tokio::test]
    async fn endpoint_params_join_the_auth_params() {
        let transport = MockTransport::default().json(OK);
        let client = offline(transport.clone()).await;

        client
            .create_bookmark("tr-9", 61_500, Some("halfway"))
            .await
            .unwrap();

        assert_eq!(transport.last_path(), "/navidrome/rest/createBookmark");
        let query = transport.last_query();
        assert_eq!(query["id"], "tr-9");
        assert_eq!(query["position"], "61500");
        assert_eq!(query["comment"], "halfway");
        assert_eq!(query["f"], "json");
        assert_eq!(query.len(), 9);
    }

    #[tokio::test]
    async fn change_password_sends_hex() {
        let transport = MockTransport::default().json(OK);
        let client = offline(transport.clone()).await;

        client.change_password("bob", "abc").await.unwrap();

        assert_eq!(transport.last_path(), "/navidrome/rest/changePassword");
        let query = transport.last_query();
        assert_eq!(query["username"], "bob");
        assert_eq!(query["password"], "enc:616263");
    }

    #[tokio::test]
    async fn get_album_materializes_songs_in_order() {
        let transport = MockTransport::default().json(
            r#"{"subsonic-response":{"status":"ok","version":"1.16.1",
                "album":{"id":"al-1","name":"Album","songCount":3,"duration":600,
                    "created":"2022-02-02T10:00:00Z",
                    "song":[
                        {"id":"s1","title":"One","isDir":false,"duration":200,"track":1},
                        {"id":"s2","title":"Two","isDir":false,"duration":200,"track":2},
                        {"id":"s3","title":"Three","isDir":false,"duration":200,"track":3}
                    ]}}}"#,
        );
        let client = offline(transport).await;

        let res = client.get_album("al-1").await.unwrap();
        assert!(res.is_ok());
        let album = res.album.unwrap();
        assert_eq!(album.duration, Some(Duration::from_secs(600)));
        let titles: Vec<_> = album
            .song
            .unwrap()
            .into_iter()
            .map(|s| s.title.unwrap())
            .collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn download_returns_bytes() {
        let transport =
            MockTransport::default().reply(StatusCode::OK, "audio/flac", &b"fLaC\x00\x00"[..]);
        let client = offline(transport.clone()).await;

        let payload = client.download("tr-1").await.unwrap();
        assert_eq!(payload, MediaPayload::Bytes(Bytes::from_static(b"fLaC\x00\x00")));
        assert_eq!(transport.last_query()["id"], "tr-1");
    }

    #[tokio::test]
    async fn download_error_envelope_with_200() {
        let transport =
            MockTransport::default().reply(StatusCode::OK, "application/xml", WRONG_PASSWORD);
        let client = offline(transport).await;

        match client.download("tr-1").await.unwrap() {
            MediaPayload::Envelope(res) => {
                assert!(!res.is_ok());
                assert_eq!(res.error.unwrap().code, Some(ErrorCode::WrongUsernameOrPassword));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn svg_cover_art_is_media() {
        let transport =
            MockTransport::default().reply(StatusCode::OK, "image/svg+xml", "<svg/>");
        let client = offline(transport.clone()).await;

        let payload = client.get_cover_art("co-1", Some(300)).await.unwrap();
        assert_eq!(payload, MediaPayload::Bytes(Bytes::from_static(b"<svg/>")));
        assert_eq!(transport.last_path(), "/navidrome/rest/getCoverArt");
        let query = transport.last_query();
        assert_eq!(query["id"], "co-1");
        assert_eq!(query["size"], "300");
    }

    #[tokio::test]
    async fn stream_sends_options_and_returns_bytes() {
        let transport = MockTransport::default()
            .reply(StatusCode::OK, "audio/mpeg", &b"ID3"[..])
            .reply(StatusCode::OK, "text/xml; charset=utf-8", WRONG_PASSWORD);
        let client = offline(transport.clone()).await;

        let options = StreamOptions {
            max_bit_rate: Some(128),
            time_offset: Some(30),
            ..Default::default()
        };
        let payload = client.stream("tr-2", &options).await.unwrap();
        assert_eq!(payload, MediaPayload::Bytes(Bytes::from_static(b"ID3")));
        assert_eq!(transport.last_path(), "/navidrome/rest/stream");
        let query = transport.last_query();
        assert_eq!(query["maxBitRate"], "128");
        assert_eq!(query["timeOffset"], "30");
        assert!(!query.contains_key("format"));

        assert!(matches!(
            client.stream("tr-2", &options).await.unwrap(),
            MediaPayload::Envelope(res) if !res.is_ok()
        ));
    }

    #[tokio::test]
    async fn http_errors_are_reported() {
        let transport =
            MockTransport::default().reply(StatusCode::INTERNAL_SERVER_ERROR, "text/plain", "boom");
        let client = offline(transport).await;

        match client.ping().await {
            Err(ApiError::HttpStatus(status)) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_redirect_is_suspicious() {
        let transport = MockTransport::default().reply(StatusCode::FOUND, "text/html", "<html/>");
        let client = offline(transport).await;

        assert!(matches!(
            client.ping().await,
            Err(ApiError::SuspiciousRedirect)
        ));
    }

    #[tokio::test]
    async fn unreachable_server_fails_construction() {
        let err = Client::builder("opensonic tests", "http://127.0.0.1:1", "bad_user", "bad_pass")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }

    #[tokio::test]
    async fn urls_do_not_need_a_request() {
        let client = offline(MockTransport::default()).await;

        let url = client
            .stream_url(
                "tr-1",
                &StreamOptions {
                    max_bit_rate: Some(320),
                    format: Some("mp3".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(url.path(), "/navidrome/rest/stream");
        let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(query["maxBitRate"], "320");
        assert_eq!(query["format"], "mp3");
        assert!(!query.contains_key("timeOffset"));

        let cover = client.cover_art_url("co-1", Some(200)).unwrap();
        assert_eq!(cover.path(), "/navidrome/rest/getCoverArt");
    }

    #[tokio::test]
    async fn bad_base_urls_are_rejected() {
        let err = Client::builder("c", "not a url", "u", "p")
            .test_connection(false)
            .build_with(MockTransport::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));

        let err = Client::builder("c", "mailto:someone@example.com", "u", "p")
            .test_connection(false)
            .build_with(MockTransport::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UrlCannotBeABaseUrl));
    }

    #[track_caller]
    fn check_example<T: FromRecord + Envelope>(path: &str) -> T {
        let json = std::fs::read_to_string(path).unwrap();
        match from_json::<T>(&json) {
            Ok(res) => {
                assert!(res.is_ok(), "{path} is not an ok response");
                res
            }
            Err(e) => panic!("Materialization failed for {path}: {e}"),
        }
    }

    #[test]
    fn materialize_examples() {
        check_example::<SubsonicResponse>("test-data/navidrome/ping.json");

        let folders =
            check_example::<MusicFoldersResponse>("test-data/navidrome/getMusicFolders.json");
        assert_eq!(folders.music_folders.unwrap().music_folder.unwrap().len(), 2);

        let dir = check_example::<DirectoryResponse>("test-data/navidrome/getMusicDirectory.json");
        assert_eq!(dir.directory.unwrap().child.unwrap().len(), 2);

        let artist = check_example::<ArtistResponse>("test-data/navidrome/getArtist.json");
        assert_eq!(artist.artist.unwrap().album.unwrap().len(), 2);

        let album = check_example::<AlbumResponse>("test-data/navidrome/getAlbum.json");
        let album = album.album.unwrap();
        assert_eq!(album.song.unwrap().len(), 2);
        assert_eq!(album.genres.unwrap()[0].name.as_deref(), Some("Electronic"));

        let song = check_example::<SongResponse>("test-data/navidrome/getSong.json");
        let song = song.song.unwrap();
        assert_eq!(song.duration, Some(Duration::from_secs(125)));
        assert!(song.replay_gain.is_some());
    }
}
