use crate::materialize::{FromRecord, FromValue, Record, Value};
use crate::records::{AlbumId3, ArtistId3, Child, Directory, MusicFolders};
use crate::schema::RecordKind;
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    Failed,
    Other(String),
}

impl FromValue for ResponseStatus {
    fn from_value(value: Value) -> Option<Self> {
        let raw = String::from_value(value)?;
        Some(match raw.as_str() {
            "ok" => ResponseStatus::Ok,
            "failure" | "failed" => ResponseStatus::Failed,
            _ => ResponseStatus::Other(raw),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Generic,
    RequiredParameterMissing,
    ClientMustUpgrade,
    ServerMustUpgrade,
    WrongUsernameOrPassword,
    NoTokenAuthForLdap,
    AuthMechanismNotSupported,
    ConflictingAuthMechanisms,
    InvalidApiKey,
    UserNotAuthorized,
    TrialExpired,
    NotFound,
    /// Not a documented code; servers are free to invent their own.
    Unknown(i64),
}

impl ErrorCode {
    pub fn from_code(code: i64) -> ErrorCode {
        match code {
            0 => ErrorCode::Generic,
            10 => ErrorCode::RequiredParameterMissing,
            20 => ErrorCode::ClientMustUpgrade,
            30 => ErrorCode::ServerMustUpgrade,
            40 => ErrorCode::WrongUsernameOrPassword,
            41 => ErrorCode::NoTokenAuthForLdap,
            42 => ErrorCode::AuthMechanismNotSupported,
            43 => ErrorCode::ConflictingAuthMechanisms,
            44 => ErrorCode::InvalidApiKey,
            50 => ErrorCode::UserNotAuthorized,
            60 => ErrorCode::TrialExpired,
            70 => ErrorCode::NotFound,
            other => ErrorCode::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::Generic => 0,
            ErrorCode::RequiredParameterMissing => 10,
            ErrorCode::ClientMustUpgrade => 20,
            ErrorCode::ServerMustUpgrade => 30,
            ErrorCode::WrongUsernameOrPassword => 40,
            ErrorCode::NoTokenAuthForLdap => 41,
            ErrorCode::AuthMechanismNotSupported => 42,
            ErrorCode::ConflictingAuthMechanisms => 43,
            ErrorCode::InvalidApiKey => 44,
            ErrorCode::UserNotAuthorized => 50,
            ErrorCode::TrialExpired => 60,
            ErrorCode::NotFound => 70,
            ErrorCode::Unknown(code) => *code,
        }
    }
}

impl FromValue for ErrorCode {
    fn from_value(value: Value) -> Option<Self> {
        i64::from_value(value).map(ErrorCode::from_code)
    }
}

/// The error details of a failed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    pub code: Option<ErrorCode>,
    pub message: Option<String>,
    pub help_url: Option<String>,
}

impl FromRecord for ResponseError {
    const KIND: RecordKind = RecordKind::Error;

    fn from_record(r: &mut Record) -> Self {
        Self {
            code: r.take("code"),
            message: r.take("message"),
            help_url: r.take("help_url"),
        }
    }
}

impl From<&ResponseError> for ApiError {
    fn from(e: &ResponseError) -> Self {
        let message = e.message.clone().unwrap_or_default();
        match e.code.unwrap_or(ErrorCode::Generic) {
            ErrorCode::Generic | ErrorCode::Unknown(_) => ApiError::Generic(message),
            ErrorCode::RequiredParameterMissing => ApiError::RequiredParameterMissing(message),
            ErrorCode::ClientMustUpgrade => ApiError::ClientMustUpgrade(message),
            ErrorCode::ServerMustUpgrade => ApiError::ServerMustUpgrade(message),
            ErrorCode::WrongUsernameOrPassword => ApiError::WrongUsernameOrPassword(message),
            ErrorCode::NoTokenAuthForLdap => ApiError::NoTokenAuthForLdap(message),
            ErrorCode::AuthMechanismNotSupported => ApiError::AuthMechanismNotSupported(message),
            ErrorCode::ConflictingAuthMechanisms => ApiError::ConflictingAuthMechanisms(message),
            ErrorCode::InvalidApiKey => ApiError::InvalidApiKey(message),
            ErrorCode::UserNotAuthorized => ApiError::UserNotAuthorized(message),
            ErrorCode::TrialExpired => ApiError::TrialExpired(message),
            ErrorCode::NotFound => ApiError::NotFound(message),
        }
    }
}

/// The common answer wrapper every response carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsonicResponse {
    pub status: Option<ResponseStatus>,
    /// Supported protocol version.
    pub version: Option<String>,
    /// Server implementation, e.g. "navidrome".
    pub server_type: Option<String>,
    pub server_version: Option<String>,
    pub open_subsonic: Option<bool>,
    pub error: Option<ResponseError>,
}

impl FromRecord for SubsonicResponse {
    const KIND: RecordKind = RecordKind::SubsonicResponse;

    fn from_record(r: &mut Record) -> Self {
        Self {
            status: r.take("status"),
            version: r.take("version"),
            server_type: r.take("type"),
            server_version: r.take("server_version"),
            open_subsonic: r.take("open_subsonic"),
            error: r.take_record("error"),
        }
    }
}

/// Status queries shared by every response kind.
pub trait Envelope {
    fn envelope(&self) -> &SubsonicResponse;

    /// `true` when the server answered `"ok"`. Never fails.
    fn is_ok(&self) -> bool {
        self.envelope().status == Some(ResponseStatus::Ok)
    }

    /// Turns a failed response into the matching [`ApiError`].
    fn ensure_ok(&self) -> Result<(), ApiError> {
        if self.is_ok() {
            return Ok(());
        }
        match &self.envelope().error {
            Some(e) => Err(e.into()),
            None => Err(ApiError::MalformedApiResponse),
        }
    }
}

impl Envelope for SubsonicResponse {
    fn envelope(&self) -> &SubsonicResponse {
        self
    }
}

macro_rules! response {
    ($(#[$meta:meta])* $name:ident, $attr:ident: $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub envelope: SubsonicResponse,
            pub $attr: Option<$ty>,
        }

        impl FromRecord for $name {
            const KIND: RecordKind = RecordKind::$name;

            fn from_record(r: &mut Record) -> Self {
                Self {
                    envelope: SubsonicResponse::from_record(r),
                    $attr: r.take_record(stringify!($attr)),
                }
            }
        }

        impl Envelope for $name {
            fn envelope(&self) -> &SubsonicResponse {
                &self.envelope
            }
        }
    };
}

response!(
    /// Answer to `getMusicFolders`.
    MusicFoldersResponse, music_folders: MusicFolders
);
response!(
    /// Answer to `getMusicDirectory`.
    DirectoryResponse, directory: Directory
);
response!(ArtistResponse, artist: ArtistId3);
response!(AlbumResponse, album: AlbumId3);
response!(SongResponse, song: Child);
