//! bgm.tv API response types.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Weekday descriptor in the calendar response.
#[derive(Debug, Clone, Deserialize)]
pub struct Weekday {
    /// English name (e.g. "Mon").
    pub en: String,
    /// Chinese name.
    pub cn: String,
    /// Japanese name.
    pub ja: String,
    /// Weekday number, 1 = Monday.
    pub id: u32,
}

/// One day of the weekly broadcast calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDay {
    /// Weekday descriptor.
    pub weekday: Weekday,
    /// Subjects airing on this day.
    pub items: Vec<Subject>,
}

/// Score distribution and aggregate rating.
#[derive(Debug, Clone, Deserialize)]
pub struct Rating {
    /// Number of votes.
    pub total: u32,
    /// Vote count per score bucket ("1" through "10").
    pub count: Option<BTreeMap<String, u32>>,
    /// Mean score.
    pub score: f64,
}

/// Cover image URLs at the standard sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct Images {
    /// Large cover.
    pub large: String,
    /// Common cover.
    pub common: String,
    /// Medium cover.
    pub medium: String,
    /// Small cover.
    pub small: String,
    /// Grid thumbnail.
    pub grid: String,
}

/// Site-wide collection counters for a subject.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionCounts {
    /// Users wishing to watch.
    #[serde(default)]
    pub wish: u32,
    /// Users who finished.
    #[serde(default)]
    pub collect: u32,
    /// Users currently watching.
    #[serde(default)]
    pub doing: u32,
    /// Users on hold.
    #[serde(default)]
    pub on_hold: u32,
    /// Users who dropped it.
    #[serde(default)]
    pub dropped: u32,
}

/// A catalog subject (anime, book, music, game, or real-world title).
#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
    /// Subject ID.
    pub id: u32,
    /// Canonical page URL.
    pub url: Option<String>,
    /// Numeric category code (see `SubjectType`).
    #[serde(rename = "type")]
    pub subject_type: u32,
    /// Original title.
    pub name: String,
    /// Chinese title (may be empty).
    pub name_cn: Option<String>,
    /// Synopsis.
    pub summary: Option<String>,
    /// Total episode count.
    pub eps_count: Option<u32>,
    /// First air date ("YYYY-MM-DD").
    pub air_date: Option<String>,
    /// Air weekday number, 1 = Monday.
    pub air_weekday: Option<u32>,
    /// Aggregate rating (medium/large response groups).
    pub rating: Option<Rating>,
    /// Site-wide rank.
    pub rank: Option<u32>,
    /// Cover images.
    pub images: Option<Images>,
    /// Site-wide collection counters.
    pub collection: Option<CollectionCounts>,
}

/// A single episode.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    /// Episode ID.
    pub id: u32,
    /// Canonical page URL.
    pub url: Option<String>,
    /// Episode kind (0 = main, 1 = special, ...).
    #[serde(rename = "type")]
    pub ep_type: u32,
    /// Sort order within the subject.
    pub sort: f64,
    /// Original episode title.
    pub name: Option<String>,
    /// Chinese episode title.
    pub name_cn: Option<String>,
    /// Duration string (e.g. "24m").
    pub duration: Option<String>,
    /// Air date ("YYYY-MM-DD").
    pub airdate: Option<String>,
    /// Comment count.
    pub comment: Option<u32>,
    /// Description.
    pub desc: Option<String>,
    /// Air status ("Air", "Today", "NA").
    pub status: Option<String>,
}

/// Response of `GET /subject/{id}/ep`: subject fields plus its episodes.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectEpisodes {
    /// The subject the episodes belong to.
    #[serde(flatten)]
    pub subject: Subject,
    /// Episode list.
    pub eps: Vec<Episode>,
}

/// Avatar image URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct Avatar {
    /// Large avatar.
    pub large: String,
    /// Medium avatar.
    pub medium: String,
    /// Small avatar.
    pub small: String,
}

/// A bgm.tv user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Numeric user ID.
    pub id: u32,
    /// Profile page URL.
    pub url: Option<String>,
    /// Login name.
    pub username: String,
    /// Display name.
    pub nickname: Option<String>,
    /// Avatar images.
    pub avatar: Option<Avatar>,
    /// Profile signature.
    pub sign: Option<String>,
    /// User group code.
    pub usergroup: Option<u32>,
}

/// Login response: user profile plus the auth strings used by the
/// auth-gated endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// The authenticated user.
    #[serde(flatten)]
    pub user: User,
    /// Raw auth string.
    pub auth: String,
    /// URL-encoded auth string.
    pub auth_encode: String,
}

/// One entry in a user's collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCollection {
    /// Subject name.
    pub name: Option<String>,
    /// Subject ID.
    pub subject_id: u32,
    /// Watched episode count.
    pub ep_status: u32,
    /// Read volume count (books).
    #[serde(default)]
    pub vol_status: u32,
    /// Unix timestamp of the last touch.
    pub lasttouch: u64,
    /// Embedded subject detail.
    pub subject: Option<Subject>,
}

/// Response of `GET /search/subject/{keywords}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Total number of matches.
    pub results: u32,
    /// Current page of subjects.
    pub list: Vec<Subject>,
}

/// Collection status descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionStatusInfo {
    /// Numeric status ID.
    pub id: u32,
    /// Status key ("wish", "collect", "do", "on_hold", "dropped").
    #[serde(rename = "type")]
    pub status_type: String,
    /// Localized status name.
    pub name: String,
}

/// A user's collection state for one subject (`GET /collection/{id}` and
/// the `POST /collection/{id}/{action}` reply).
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectCollection {
    /// Collection status.
    pub status: CollectionStatusInfo,
    /// The user's rating, 0-10.
    pub rating: Option<u32>,
    /// The user's comment.
    pub comment: Option<String>,
    /// Privacy flag (0 = public, 1 = private).
    pub private: Option<u32>,
    /// The user's tags.
    pub tag: Option<Vec<String>>,
    /// Watched episode count.
    pub ep_status: Option<u32>,
    /// Unix timestamp of the last touch.
    pub lasttouch: Option<u64>,
    /// Owning user.
    pub user: Option<User>,
}

/// Per-episode status descriptor in a progress response.
#[derive(Debug, Clone, Deserialize)]
pub struct EpStatusInfo {
    /// CSS class name ("Watched", "Queue", ...).
    pub css_name: String,
    /// URL segment ("watched", "queue", ...).
    pub url_name: String,
    /// Localized name.
    pub cn_name: String,
}

/// Status of one episode in a progress response.
#[derive(Debug, Clone, Deserialize)]
pub struct EpProgress {
    /// Episode ID.
    pub id: u32,
    /// Watch status.
    pub status: EpStatusInfo,
}

/// A user's watch progress for one subject.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectProgress {
    /// Subject ID.
    pub subject_id: u32,
    /// Episodes with a status mark.
    pub eps: Vec<EpProgress>,
}

/// Acknowledgement body returned by the status-update endpoints.
///
/// Bodies that additionally carry an `error` field (the legacy API
/// acknowledges some writes with `"error":"OK"`) surface as
/// [`ApiError::Remote`](crate::ApiError::Remote) instead; the payload is
/// available on the error.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReply {
    /// HTTP-like status code inside the payload.
    pub code: u32,
    /// Echo of the request path.
    pub request: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_decode_calendar_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/calendar.json");

        // Act
        let days: Vec<CalendarDay> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].weekday.id, 1);
        assert_eq!(days[0].weekday.en, "Mon");
        assert!(!days[0].items.is_empty());
        assert_eq!(days[0].items[0].subject_type, 2);
    }

    #[test]
    fn test_decode_subject_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/subject_12.json");

        // Act
        let subject: Subject = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(subject.id, 12);
        assert_eq!(subject.name, "ちょびっツ");
        assert_eq!(subject.name_cn.as_deref(), Some("人形电脑天使心"));
        assert_eq!(subject.eps_count, Some(27));
        assert_eq!(subject.air_weekday, Some(2));
        let rating = subject.rating.unwrap();
        assert_eq!(rating.total, 2289);
        assert!((rating.score - 7.2).abs() < 1e-9);
        assert_eq!(rating.count.unwrap()["10"], 74);
        assert_eq!(subject.collection.unwrap().doing, 103);
    }

    #[test]
    fn test_decode_subject_episodes_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/subject_eps_12.json");

        // Act
        let detail: SubjectEpisodes = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(detail.subject.id, 12);
        assert_eq!(detail.eps.len(), 2);
        assert_eq!(detail.eps[0].id, 1027);
        assert!((detail.eps[0].sort - 1.0).abs() < 1e-9);
        assert_eq!(detail.eps[0].name.as_deref(), Some("ちぃ 目覚める"));
        assert_eq!(detail.eps[1].status.as_deref(), Some("Air"));
    }

    #[test]
    fn test_decode_user_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/user_sai.json");

        // Act
        let user: User = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "sai");
        assert_eq!(user.nickname.as_deref(), Some("Sai🖖"));
        assert!(user.avatar.unwrap().large.starts_with("https://"));
    }

    #[test]
    fn test_decode_auth_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/auth_login.json");

        // Act
        let auth: AuthUser = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(auth.user.username, "sai");
        assert!(!auth.auth.is_empty());
        assert!(auth.auth_encode.contains("%3A"));
    }

    #[test]
    fn test_decode_user_collection_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/user_collection_sai.json");

        // Act
        let entries: Vec<UserCollection> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject_id, 12);
        assert_eq!(entries[0].ep_status, 26);
        assert_eq!(entries[0].subject.as_ref().unwrap().name, "ちょびっツ");
    }

    #[test]
    fn test_decode_search_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/search_subject.json");

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.results, 2);
        assert_eq!(response.list.len(), 2);
        assert_eq!(response.list[0].name, "とある科学の超電磁砲");
    }

    #[test]
    fn test_decode_collection_status_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/collection_status.json");

        // Act
        let collection: SubjectCollection = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(collection.status.status_type, "do");
        assert_eq!(collection.status.name, "在看");
        assert_eq!(collection.rating, Some(8));
        assert_eq!(collection.ep_status, Some(12));
        assert_eq!(collection.tag.unwrap(), vec![String::from("anime")]);
    }

    #[test]
    fn test_decode_progress_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/bgmtv/progress_sai.json");

        // Act
        let progress: Vec<SubjectProgress> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].subject_id, 12);
        assert_eq!(progress[0].eps[0].status.url_name, "watched");
    }

    #[test]
    fn test_decode_status_reply() {
        // Arrange
        let json = r#"{"code":200,"request":"/subject/12/update/watched_eps"}"#;

        // Act
        let reply: StatusReply = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(reply.code, 200);
        assert_eq!(
            reply.request.as_deref(),
            Some("/subject/12/update/watched_eps")
        );
    }

    #[test]
    fn test_subject_decodes_without_optional_fields() {
        // Arrange: small response group omits rating/rank/collection
        let json = r#"{
            "id": 9617,
            "url": "http://bgm.tv/subject/9617",
            "type": 2,
            "name": "STEINS;GATE",
            "name_cn": "命运石之门",
            "summary": "",
            "air_date": "2011-04-06",
            "air_weekday": 3,
            "images": null
        }"#;

        // Act
        let subject: Subject = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(subject.id, 9617);
        assert!(subject.rating.is_none());
        assert!(subject.images.is_none());
        assert!(subject.eps_count.is_none());
    }
}
