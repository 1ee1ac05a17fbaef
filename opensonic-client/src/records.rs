//! Typed views over the record kinds nested inside responses.
//!
//! Every attribute is optional because servers omit whatever they like.

use std::time::Duration;

use crate::materialize::{FromRecord, FromValue, Record, Timestamp, Value};
use crate::schema::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Music,
    Podcast,
    Audiobook,
    Video,
    Other(String),
}

impl FromValue for MediaKind {
    fn from_value(value: Value) -> Option<Self> {
        let raw = String::from_value(value)?;
        Some(match raw.as_str() {
            "music" => MediaKind::Music,
            "podcast" => MediaKind::Podcast,
            "audiobook" => MediaKind::Audiobook,
            "video" => MediaKind::Video,
            _ => MediaKind::Other(raw),
        })
    }
}

/// What a MusicBrainz id on a [`Child`] refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Song,
    Album,
    Artist,
    Other(String),
}

impl FromValue for MediaType {
    fn from_value(value: Value) -> Option<Self> {
        let raw = String::from_value(value)?;
        Some(match raw.as_str() {
            "song" => MediaType::Song,
            "album" => MediaType::Album,
            "artist" => MediaType::Artist,
            _ => MediaType::Other(raw),
        })
    }
}

/// Songs may carry the numeric tag value: `1` or `4` for explicit, `2` for
/// clean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplicitStatus {
    Explicit,
    Clean,
    Unset,
    Other(String),
}

impl FromValue for ExplicitStatus {
    fn from_value(value: Value) -> Option<Self> {
        Some(match value {
            Value::Str(s) => match s.as_str() {
                "explicit" => ExplicitStatus::Explicit,
                "clean" => ExplicitStatus::Clean,
                "" => ExplicitStatus::Unset,
                _ => ExplicitStatus::Other(s),
            },
            Value::Int(1 | 4) => ExplicitStatus::Explicit,
            Value::Int(2) => ExplicitStatus::Clean,
            Value::Int(n) => ExplicitStatus::Other(n.to_string()),
            _ => return None,
        })
    }
}

/// An album from ID3 tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumId3 {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Release version, e.g. "Remastered".
    pub version: Option<String>,
    pub artist: Option<String>,
    pub artist_id: Option<String>,
    pub cover_art: Option<String>,
    pub song_count: Option<i64>,
    pub duration: Option<Duration>,
    pub play_count: Option<i64>,
    pub created: Option<Timestamp>,
    pub starred: Option<Timestamp>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub played: Option<Timestamp>,
    pub user_rating: Option<u8>,
    pub record_labels: Option<Vec<RecordLabel>>,
    pub musicbrainz_id: Option<String>,
    pub genres: Option<Vec<ItemGenre>>,
    pub artists: Option<Vec<ArtistId3>>,
    pub display_artist: Option<String>,
    pub release_types: Option<Vec<String>>,
    pub moods: Option<Vec<String>>,
    pub sort_name: Option<String>,
    pub original_release_date: Option<ItemDate>,
    pub release_date: Option<ItemDate>,
    pub is_compilation: Option<bool>,
    pub explicit_status: Option<ExplicitStatus>,
    pub disc_titles: Option<Vec<DiscTitle>>,
    /// Only filled by `getAlbum`.
    pub song: Option<Vec<Child>>,
}

impl FromRecord for AlbumId3 {
    const KIND: RecordKind = RecordKind::AlbumId3;

    fn from_record(r: &mut Record) -> Self {
        Self {
            id: r.take("id"),
            name: r.take("name"),
            version: r.take("version"),
            artist: r.take("artist"),
            artist_id: r.take("artist_id"),
            cover_art: r.take("cover_art"),
            song_count: r.take("song_count"),
            duration: r.take("duration"),
            play_count: r.take("play_count"),
            created: r.take("created"),
            starred: r.take("starred"),
            year: r.take("year"),
            genre: r.take("genre"),
            played: r.take("played"),
            user_rating: r.take("user_rating"),
            record_labels: r.take_records("record_labels"),
            musicbrainz_id: r.take("musicbrainz_id"),
            genres: r.take_records("genres"),
            artists: r.take_records("artists"),
            display_artist: r.take("display_artist"),
            release_types: r.take("release_types"),
            moods: r.take("moods"),
            sort_name: r.take("sort_name"),
            original_release_date: r.take_record("original_release_date"),
            release_date: r.take_record("release_date"),
            is_compilation: r.take("is_compilation"),
            explicit_status: r.take("explicit_status"),
            disc_titles: r.take_records("disc_titles"),
            song: r.take_records("song"),
        }
    }
}

/// An artist from ID3 tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistId3 {
    pub id: Option<String>,
    pub name: Option<String>,
    pub cover_art: Option<String>,
    pub artist_image_url: Option<String>,
    pub album_count: Option<i64>,
    pub starred: Option<Timestamp>,
    pub musicbrainz_id: Option<String>,
    pub sort_name: Option<String>,
    pub roles: Option<Vec<String>>,
    /// Only filled by `getArtist`.
    pub album: Option<Vec<AlbumId3>>,
}

impl FromRecord for ArtistId3 {
    const KIND: RecordKind = RecordKind::ArtistId3;

    fn from_record(r: &mut Record) -> Self {
        Self {
            id: r.take("id"),
            name: r.take("name"),
            cover_art: r.take("cover_art"),
            artist_image_url: r.take("artist_image_url"),
            album_count: r.take("album_count"),
            starred: r.take("starred"),
            musicbrainz_id: r.take("musicbrainz_id"),
            sort_name: r.take("sort_name"),
            roles: r.take("roles"),
            album: r.take_records("album"),
        }
    }
}

/// A song, video, podcast episode or directory entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Child {
    pub id: Option<String>,
    pub parent: Option<String>,
    pub is_dir: Option<bool>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub track: Option<i64>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub cover_art: Option<String>,
    pub size: Option<i64>,
    pub content_type: Option<String>,
    pub suffix: Option<String>,
    pub transcoded_content_type: Option<String>,
    pub transcoded_suffix: Option<String>,
    pub duration: Option<Duration>,
    pub bit_rate: Option<i64>,
    pub bit_depth: Option<i64>,
    pub sampling_rate: Option<i64>,
    pub channel_count: Option<i64>,
    pub path: Option<String>,
    pub is_video: Option<bool>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub play_count: Option<i64>,
    pub disc_number: Option<i64>,
    pub created: Option<Timestamp>,
    pub starred: Option<Timestamp>,
    pub album_id: Option<String>,
    pub artist_id: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub media_type: Option<MediaType>,
    /// Milliseconds.
    pub bookmark_position: Option<i64>,
    pub original_width: Option<i64>,
    pub original_height: Option<i64>,
    pub played: Option<Timestamp>,
    pub bpm: Option<i64>,
    pub comment: Option<String>,
    pub sort_name: Option<String>,
    pub musicbrainz_id: Option<String>,
    pub isrc: Option<Vec<String>>,
    pub genres: Option<Vec<ItemGenre>>,
    pub artists: Option<Vec<ArtistId3>>,
    pub display_artist: Option<String>,
    pub album_artists: Option<Vec<ArtistId3>>,
    pub display_album_artist: Option<String>,
    pub contributors: Option<Vec<Contributor>>,
    pub display_composer: Option<String>,
    pub moods: Option<Vec<String>>,
    pub replay_gain: Option<ReplayGain>,
    pub explicit_status: Option<ExplicitStatus>,
}

impl FromRecord for Child {
    const KIND: RecordKind = RecordKind::Child;

    fn from_record(r: &mut Record) -> Self {
        Self {
            id: r.take("id"),
            parent: r.take("parent"),
            is_dir: r.take("is_dir"),
            title: r.take("title"),
            album: r.take("album"),
            artist: r.take("artist"),
            track: r.take("track"),
            year: r.take("year"),
            genre: r.take("genre"),
            cover_art: r.take("cover_art"),
            size: r.take("size"),
            content_type: r.take("content_type"),
            suffix: r.take("suffix"),
            transcoded_content_type: r.take("transcoded_content_type"),
            transcoded_suffix: r.take("transcoded_suffix"),
            duration: r.take("duration"),
            bit_rate: r.take("bit_rate"),
            bit_depth: r.take("bit_depth"),
            sampling_rate: r.take("sampling_rate"),
            channel_count: r.take("channel_count"),
            path: r.take("path"),
            is_video: r.take("is_video"),
            user_rating: r.take("user_rating"),
            average_rating: r.take("average_rating"),
            play_count: r.take("play_count"),
            disc_number: r.take("disc_number"),
            created: r.take("created"),
            starred: r.take("starred"),
            album_id: r.take("album_id"),
            artist_id: r.take("artist_id"),
            media_kind: r.take("type"),
            media_type: r.take("media_type"),
            bookmark_position: r.take("bookmark_position"),
            original_width: r.take("original_width"),
            original_height: r.take("original_height"),
            played: r.take("played"),
            bpm: r.take("bpm"),
            comment: r.take("comment"),
            sort_name: r.take("sort_name"),
            musicbrainz_id: r.take("musicbrainz_id"),
            isrc: r.take("isrc"),
            genres: r.take_records("genres"),
            artists: r.take_records("artists"),
            display_artist: r.take("display_artist"),
            album_artists: r.take_records("album_artists"),
            display_album_artist: r.take("display_album_artist"),
            contributors: r.take_records("contributors"),
            display_composer: r.take("display_composer"),
            moods: r.take("moods"),
            replay_gain: r.take_record("replay_gain"),
            explicit_status: r.take("explicit_status"),
        }
    }
}

/// A contributing artist of a song or album, e.g. a performer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contributor {
    pub role: Option<String>,
    /// The instrument for performers, for instance.
    pub sub_role: Option<String>,
    pub artist: Option<ArtistId3>,
}

impl FromRecord for Contributor {
    const KIND: RecordKind = RecordKind::Contributor;

    fn from_record(r: &mut Record) -> Self {
        Self {
            role: r.take("role"),
            sub_role: r.take("sub_role"),
            artist: r.take_record("artist"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    pub id: Option<String>,
    pub parent: Option<String>,
    pub name: Option<String>,
    pub starred: Option<Timestamp>,
    pub user_rating: Option<u8>,
    pub average_rating: Option<f64>,
    pub play_count: Option<i64>,
    pub child: Option<Vec<Child>>,
}

impl FromRecord for Directory {
    const KIND: RecordKind = RecordKind::Directory;

    fn from_record(r: &mut Record) -> Self {
        Self {
            id: r.take("id"),
            parent: r.take("parent"),
            name: r.take("name"),
            starred: r.take("starred"),
            user_rating: r.take("user_rating"),
            average_rating: r.take("average_rating"),
            play_count: r.take("play_count"),
            child: r.take_records("child"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscTitle {
    pub disc: Option<i64>,
    pub title: Option<String>,
}

impl FromRecord for DiscTitle {
    const KIND: RecordKind = RecordKind::DiscTitle;

    fn from_record(r: &mut Record) -> Self {
        Self {
            disc: r.take("disc"),
            title: r.take("title"),
        }
    }
}

/// A release date that may be only a year, or a year and month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDate {
    pub year: Option<i64>,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl FromRecord for ItemDate {
    const KIND: RecordKind = RecordKind::ItemDate;

    fn from_record(r: &mut Record) -> Self {
        Self {
            year: r.take("year"),
            month: r.take("month"),
            day: r.take("day"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemGenre {
    pub name: Option<String>,
}

impl FromRecord for ItemGenre {
    const KIND: RecordKind = RecordKind::ItemGenre;

    fn from_record(r: &mut Record) -> Self {
        Self {
            name: r.take("name"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicFolder {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl FromRecord for MusicFolder {
    const KIND: RecordKind = RecordKind::MusicFolder;

    fn from_record(r: &mut Record) -> Self {
        Self {
            id: r.take("id"),
            name: r.take("name"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicFolders {
    pub music_folder: Option<Vec<MusicFolder>>,
}

impl FromRecord for MusicFolders {
    const KIND: RecordKind = RecordKind::MusicFolders;

    fn from_record(r: &mut Record) -> Self {
        Self {
            music_folder: r.take_records("music_folder"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLabel {
    pub name: Option<String>,
}

impl FromRecord for RecordLabel {
    const KIND: RecordKind = RecordKind::RecordLabel;

    fn from_record(r: &mut Record) -> Self {
        Self {
            name: r.take("name"),
        }
    }
}

/// ReplayGain data of a song. Gains are in dB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayGain {
    pub track_gain: Option<f64>,
    pub album_gain: Option<f64>,
    pub track_peak: Option<f64>,
    pub album_peak: Option<f64>,
    pub base_gain: Option<f64>,
    /// Applied by clients when the matching gain is missing.
    pub fallback_gain: Option<f64>,
}

impl FromRecord for ReplayGain {
    const KIND: RecordKind = RecordKind::ReplayGain;

    fn from_record(r: &mut Record) -> Self {
        Self {
            track_gain: r.take("track_gain"),
            album_gain: r.take("album_gain"),
            track_peak: r.take("track_peak"),
            album_peak: r.take("album_peak"),
            base_gain: r.take("base_gain"),
            fallback_gain: r.take("fallback_gain"),
        }
    }
}
