//! Static declarations of every record kind the client can materialize.
//!
//! The registry is built once per process and never mutated. Response kinds
//! get the envelope attributes merged in front of their own at build time, so
//! the materializer only ever does a single lookup per record.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("No schema is registered for record kind '{0}'")]
    UnknownSchema(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    SubsonicResponse,
    MusicFoldersResponse,
    DirectoryResponse,
    ArtistResponse,
    AlbumResponse,
    SongResponse,

    AlbumId3,
    ArtistId3,
    Child,
    Contributor,
    Directory,
    DiscTitle,
    Error,
    ItemDate,
    ItemGenre,
    MusicFolder,
    MusicFolders,
    RecordLabel,
    ReplayGain,
}

impl RecordKind {
    pub const ALL: [RecordKind; 19] = [
        RecordKind::SubsonicResponse,
        RecordKind::MusicFoldersResponse,
        RecordKind::DirectoryResponse,
        RecordKind::ArtistResponse,
        RecordKind::AlbumResponse,
        RecordKind::SongResponse,
        RecordKind::AlbumId3,
        RecordKind::ArtistId3,
        RecordKind::Child,
        RecordKind::Contributor,
        RecordKind::Directory,
        RecordKind::DiscTitle,
        RecordKind::Error,
        RecordKind::ItemDate,
        RecordKind::ItemGenre,
        RecordKind::MusicFolder,
        RecordKind::MusicFolders,
        RecordKind::RecordLabel,
        RecordKind::ReplayGain,
    ];

    /// The protocol's documented name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::SubsonicResponse => "SubsonicResponse",
            RecordKind::MusicFoldersResponse => "MusicFoldersResponse",
            RecordKind::DirectoryResponse => "DirectoryResponse",
            RecordKind::ArtistResponse => "ArtistResponse",
            RecordKind::AlbumResponse => "AlbumResponse",
            RecordKind::SongResponse => "SongResponse",
            RecordKind::AlbumId3 => "AlbumID3",
            RecordKind::ArtistId3 => "ArtistID3",
            RecordKind::Child => "Child",
            RecordKind::Contributor => "Contributor",
            RecordKind::Directory => "Directory",
            RecordKind::DiscTitle => "DiscTitle",
            RecordKind::Error => "Error",
            RecordKind::ItemDate => "ItemDate",
            RecordKind::ItemGenre => "ItemGenre",
            RecordKind::MusicFolder => "MusicFolder",
            RecordKind::MusicFolders => "MusicFolders",
            RecordKind::RecordLabel => "RecordLabel",
            RecordKind::ReplayGain => "ReplayGain",
        }
    }

    pub fn from_name(name: &str) -> Result<RecordKind, SchemaError> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_owned()))
    }

    /// Response kinds carry the envelope attributes.
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            RecordKind::SubsonicResponse
                | RecordKind::MusicFoldersResponse
                | RecordKind::DirectoryResponse
                | RecordKind::ArtistResponse
                | RecordKind::AlbumResponse
                | RecordKind::SongResponse
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Str,
    Int,
    Float,
    Bool,
}

impl Scalar {
    pub fn accepts(&self, raw: &JsonValue) -> bool {
        match self {
            Scalar::Str => raw.is_string(),
            Scalar::Int => raw.is_i64() || raw.is_u64(),
            Scalar::Float => raw.is_number(),
            Scalar::Bool => raw.is_boolean(),
        }
    }
}

/// Closed sets of values a few attributes are documented to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralSet {
    ResponseStatus,
    ErrorCode,
    UserRating,
    Month,
    Day,
    MediaKind,
    MediaType,
    AlbumExplicitStatus,
    SongExplicitStatus,
}

pub const ERROR_CODES: [i64; 12] = [0, 10, 20, 30, 40, 41, 42, 43, 44, 50, 60, 70];

impl LiteralSet {
    pub fn contains(&self, raw: &JsonValue) -> bool {
        let text = raw.as_str();
        let number = raw.as_i64();
        match self {
            // "failed" is what a few servers send instead of "failure".
            LiteralSet::ResponseStatus => matches!(text, Some("ok" | "failure" | "failed")),
            LiteralSet::ErrorCode => number.is_some_and(|n| ERROR_CODES.contains(&n)),
            LiteralSet::UserRating => number.is_some_and(|n| (1..=5).contains(&n)),
            LiteralSet::Month => number.is_some_and(|n| (1..=12).contains(&n)),
            LiteralSet::Day => number.is_some_and(|n| (1..=31).contains(&n)),
            LiteralSet::MediaKind => {
                matches!(text, Some("music" | "podcast" | "audiobook" | "video"))
            }
            LiteralSet::MediaType => matches!(text, Some("song" | "album" | "artist")),
            LiteralSet::AlbumExplicitStatus => matches!(text, Some("explicit" | "clean" | "")),
            LiteralSet::SongExplicitStatus => {
                matches!(text, Some("explicit" | "clean" | "")) || matches!(number, Some(1 | 2 | 4))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar(Scalar),
    Literal(LiteralSet),
    /// A count of seconds on the wire.
    Duration,
    /// An ISO-8601 timestamp on the wire.
    Date,
    Record(RecordKind),
    ScalarList(Scalar),
    RecordList(RecordKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    /// Documented as always present. Informational only: a missing required
    /// attribute still materializes as null.
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub kind: RecordKind,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug)]
pub struct Registry {
    schemas: HashMap<RecordKind, Schema>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::build)
    }

    fn build() -> Registry {
        let schemas = RecordKind::ALL
            .into_iter()
            .map(|kind| {
                let mut fields = if kind.is_response() {
                    envelope()
                } else {
                    vec![]
                };
                fields.extend(declare(kind));
                (kind, Schema { kind, fields })
            })
            .collect();

        Registry { schemas }
    }

    pub fn get(&self, kind: RecordKind) -> Result<&Schema, SchemaError> {
        self.schemas
            .get(&kind)
            .ok_or_else(|| SchemaError::UnknownSchema(kind.name().to_owned()))
    }

    pub fn lookup(&self, name: &str) -> Result<&Schema, SchemaError> {
        self.get(RecordKind::from_name(name)?)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }
}

///////////////////////
// declaration table //
///////////////////////

const STR: FieldType = FieldType::Scalar(Scalar::Str);
const INT: FieldType = FieldType::Scalar(Scalar::Int);
const FLOAT: FieldType = FieldType::Scalar(Scalar::Float);
const BOOL: FieldType = FieldType::Scalar(Scalar::Bool);
const DURATION: FieldType = FieldType::Duration;
const DATE: FieldType = FieldType::Date;
const STRS: FieldType = FieldType::ScalarList(Scalar::Str);

const fn lit(set: LiteralSet) -> FieldType {
    FieldType::Literal(set)
}

const fn rec(kind: RecordKind) -> FieldType {
    FieldType::Record(kind)
}

const fn recs(kind: RecordKind) -> FieldType {
    FieldType::RecordList(kind)
}

const fn req(name: &'static str, ty: FieldType) -> Field {
    Field {
        name,
        ty,
        required: true,
    }
}

const fn opt(name: &'static str, ty: FieldType) -> Field {
    Field {
        name,
        ty,
        required: false,
    }
}

fn envelope() -> Vec<Field> {
    vec![
        req("status", lit(LiteralSet::ResponseStatus)),
        req("version", STR),
        opt("type", STR),
        opt("server_version", STR),
        opt("open_subsonic", BOOL),
        opt("error", rec(RecordKind::Error)),
    ]
}

fn declare(kind: RecordKind) -> Vec<Field> {
    use RecordKind as K;

    match kind {
        K::SubsonicResponse => vec![],
        K::MusicFoldersResponse => vec![opt("music_folders", rec(K::MusicFolders))],
        K::DirectoryResponse => vec![opt("directory", rec(K::Directory))],
        K::ArtistResponse => vec![opt("artist", rec(K::ArtistId3))],
        K::AlbumResponse => vec![opt("album", rec(K::AlbumId3))],
        K::SongResponse => vec![opt("song", rec(K::Child))],

        K::AlbumId3 => vec![
            req("id", STR),
            req("name", STR),
            opt("version", STR),
            opt("artist", STR),
            opt("artist_id", STR),
            opt("cover_art", STR),
            req("song_count", INT),
            req("duration", DURATION),
            opt("play_count", INT),
            req("created", DATE),
            opt("starred", DATE),
            opt("year", INT),
            opt("genre", STR),
            opt("played", DATE),
            opt("user_rating", lit(LiteralSet::UserRating)),
            opt("record_labels", recs(K::RecordLabel)),
            opt("musicbrainz_id", STR),
            opt("genres", recs(K::ItemGenre)),
            opt("artists", recs(K::ArtistId3)),
            opt("display_artist", STR),
            opt("release_types", STRS),
            opt("moods", STRS),
            opt("sort_name", STR),
            opt("original_release_date", rec(K::ItemDate)),
            opt("release_date", rec(K::ItemDate)),
            opt("is_compilation", BOOL),
            opt("explicit_status", lit(LiteralSet::AlbumExplicitStatus)),
            opt("disc_titles", recs(K::DiscTitle)),
            opt("song", recs(K::Child)),
        ],

        K::ArtistId3 => vec![
            req("id", STR),
            req("name", STR),
            opt("cover_art", STR),
            opt("artist_image_url", STR),
            opt("album_count", INT),
            opt("starred", DATE),
            opt("musicbrainz_id", STR),
            opt("sort_name", STR),
            opt("roles", STRS),
            opt("album", recs(K::AlbumId3)),
        ],

        K::Child => vec![
            req("id", STR),
            opt("parent", STR),
            req("is_dir", BOOL),
            req("title", STR),
            opt("album", STR),
            opt("artist", STR),
            opt("track", INT),
            opt("year", INT),
            opt("genre", STR),
            opt("cover_art", STR),
            opt("size", INT),
            opt("content_type", STR),
            opt("suffix", STR),
            opt("transcoded_content_type", STR),
            opt("transcoded_suffix", STR),
            opt("duration", DURATION),
            opt("bit_rate", INT),
            opt("bit_depth", INT),
            opt("sampling_rate", INT),
            opt("channel_count", INT),
            opt("path", STR),
            opt("is_video", BOOL),
            opt("user_rating", lit(LiteralSet::UserRating)),
            opt("average_rating", FLOAT),
            opt("play_count", INT),
            opt("disc_number", INT),
            opt("created", DATE),
            opt("starred", DATE),
            opt("album_id", STR),
            opt("artist_id", STR),
            opt("type", lit(LiteralSet::MediaKind)),
            opt("media_type", lit(LiteralSet::MediaType)),
            opt("bookmark_position", INT),
            opt("original_width", INT),
            opt("original_height", INT),
            opt("played", DATE),
            opt("bpm", INT),
            opt("comment", STR),
            opt("sort_name", STR),
            opt("musicbrainz_id", STR),
            opt("isrc", STRS),
            opt("genres", recs(K::ItemGenre)),
            opt("artists", recs(K::ArtistId3)),
            opt("display_artist", STR),
            opt("album_artists", recs(K::ArtistId3)),
            opt("display_album_artist", STR),
            opt("contributors", recs(K::Contributor)),
            opt("display_composer", STR),
            opt("moods", STRS),
            opt("replay_gain", rec(K::ReplayGain)),
            opt("explicit_status", lit(LiteralSet::SongExplicitStatus)),
        ],

        K::Contributor => vec![
            req("role", STR),
            opt("sub_role", STR),
            req("artist", rec(K::ArtistId3)),
        ],

        K::Directory => vec![
            req("id", STR),
            opt("parent", STR),
            req("name", STR),
            opt("starred", DATE),
            opt("user_rating", lit(LiteralSet::UserRating)),
            opt("average_rating", FLOAT),
            opt("play_count", INT),
            opt("child", recs(K::Child)),
        ],

        K::DiscTitle => vec![req("disc", INT), req("title", STR)],

        K::Error => vec![
            req("code", lit(LiteralSet::ErrorCode)),
            opt("message", STR),
            opt("help_url", STR),
        ],

        K::ItemDate => vec![
            opt("year", INT),
            opt("month", lit(LiteralSet::Month)),
            opt("day", lit(LiteralSet::Day)),
        ],

        K::ItemGenre => vec![req("name", STR)],

        K::MusicFolder => vec![req("id", INT), opt("name", STR)],

        K::MusicFolders => vec![opt("music_folder", recs(K::MusicFolder))],

        K::RecordLabel => vec![req("name", STR)],

        K::ReplayGain => vec![
            opt("track_gain", FLOAT),
            opt("album_gain", FLOAT),
            opt("track_peak", FLOAT),
            opt("album_peak", FLOAT),
            opt("base_gain", FLOAT),
            opt("fallback_gain", FLOAT),
        ],
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_kind_is_registered() {
        let registry = Registry::global();
        for kind in RecordKind::ALL {
            let schema = registry.get(kind).unwrap();
            assert_eq!(schema.kind, kind);
        }
    }

    #[test]
    fn responses_start_with_the_envelope() {
        let schema = Registry::global()
            .get(RecordKind::AlbumResponse)
            .unwrap();
        let names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "status",
                "version",
                "type",
                "server_version",
                "open_subsonic",
                "error",
                "album"
            ]
        );

        let plain = Registry::global().get(RecordKind::Child).unwrap();
        assert!(plain.field("status").is_none());
    }

    #[test]
    fn lookup_by_name() {
        let registry = Registry::global();
        assert_eq!(
            registry.lookup("AlbumID3").unwrap().kind,
            RecordKind::AlbumId3
        );
        assert_eq!(
            registry.lookup("Playlist").unwrap_err(),
            SchemaError::UnknownSchema("Playlist".to_owned())
        );
    }

    #[test]
    fn attribute_names_are_unique_per_kind() {
        for schema in Registry::global().schemas() {
            let mut names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "{}", schema.kind.name());
        }
    }

    #[test]
    fn literal_sets() {
        use serde_json::json;

        assert!(LiteralSet::ErrorCode.contains(&json!(44)));
        assert!(!LiteralSet::ErrorCode.contains(&json!(45)));
        assert!(LiteralSet::UserRating.contains(&json!(5)));
        assert!(!LiteralSet::UserRating.contains(&json!(0)));
        assert!(LiteralSet::SongExplicitStatus.contains(&json!(4)));
        assert!(!LiteralSet::AlbumExplicitStatus.contains(&json!(4)));
        assert!(LiteralSet::ResponseStatus.contains(&json!("failure")));
        assert!(!LiteralSet::MediaKind.contains(&json!("movie")));
    }
}
