//! Request parameter types for the bgm.tv API.

/// URL scheme used to reach the API host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    /// Plain HTTP (mainly for local mock servers in tests).
    Http,
    /// HTTPS (default).
    #[default]
    Https,
}

impl Protocol {
    /// Returns the URL scheme string.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Response detail level (`responseGroup` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseGroup {
    /// Minimal fields.
    Small,
    /// Adds rating, rank, and collection counts.
    Medium,
    /// Full detail.
    Large,
}

impl ResponseGroup {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Subject category (`type` search parameter, numeric wire codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectType {
    /// Books and manga.
    Book,
    /// Anime.
    Anime,
    /// Music.
    Music,
    /// Games.
    Game,
    /// Live-action and other real-world subjects.
    Real,
}

impl SubjectType {
    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Book => 1,
            Self::Anime => 2,
            Self::Music => 3,
            Self::Game => 4,
            Self::Real => 6,
        }
    }
}

/// Collection listing filter (`cat` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionCategory {
    /// Subjects currently being watched/read/played.
    Watching,
    /// Everything in progress, including books and games.
    AllWatching,
}

impl CollectionCategory {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::AllWatching => "all_watching",
        }
    }
}

/// Collection write operation (path segment of `POST /collection/{id}/{action}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionAction {
    /// Create a new collection entry.
    Create,
    /// Update an existing entry.
    Update,
}

impl CollectionAction {
    /// Returns the path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Collection status (`status` form field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatusKind {
    /// Wish list.
    Wish,
    /// Collected (finished).
    Collect,
    /// In progress.
    Do,
    /// On hold.
    OnHold,
    /// Dropped.
    Dropped,
}

impl CollectionStatusKind {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wish => "wish",
            Self::Collect => "collect",
            Self::Do => "do",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
        }
    }
}

/// Episode watch status (path segment of `POST /ep/{id}/status/{status}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpStatus {
    /// Mark as watched.
    Watched,
    /// Mark as queued.
    Queue,
    /// Mark as dropped.
    Drop,
    /// Remove the status mark.
    Remove,
}

impl EpStatus {
    /// Returns the path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watched => "watched",
            Self::Queue => "queue",
            Self::Drop => "drop",
            Self::Remove => "remove",
        }
    }
}

/// Parameters for `GET /search/subject/{keywords}`.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search keywords (URL path segment, percent-encoded on send).
    pub keywords: String,
    /// Restrict results to one subject category.
    pub subject_type: Option<SubjectType>,
    /// Response detail level.
    pub response_group: Option<ResponseGroup>,
    /// Zero-based result offset for paging.
    pub start: Option<u32>,
    /// Page size (the API caps this at 25).
    pub max_results: Option<u32>,
}

impl SearchParams {
    /// Creates search parameters for the given keywords.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            subject_type: None,
            response_group: None,
            start: None,
            max_results: None,
        }
    }

    /// Restricts results to one subject category.
    #[must_use]
    pub const fn subject_type(mut self, subject_type: SubjectType) -> Self {
        self.subject_type = Some(subject_type);
        self
    }

    /// Sets the response detail level.
    #[must_use]
    pub const fn response_group(mut self, group: ResponseGroup) -> Self {
        self.response_group = Some(group);
        self
    }

    /// Sets the zero-based result offset.
    #[must_use]
    pub const fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

/// Body fields for `POST /collection/{id}/{create|update}`.
#[derive(Debug, Clone)]
pub struct CollectionPayload {
    /// Collection status (required).
    pub status: CollectionStatusKind,
    /// Free-form comment.
    pub comment: Option<String>,
    /// Tags, joined with spaces on the wire.
    pub tags: Option<Vec<String>>,
    /// Rating, 0-10.
    pub rating: Option<u8>,
    /// Privacy flag (0 = public, 1 = private).
    pub privacy: Option<u8>,
}

impl CollectionPayload {
    /// Creates a payload with the given status and no optional fields.
    #[must_use]
    pub const fn new(status: CollectionStatusKind) -> Self {
        Self {
            status,
            comment: None,
            tags: None,
            rating: None,
            privacy: None,
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the rating (0-10).
    #[must_use]
    pub const fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the privacy flag.
    #[must_use]
    pub const fn privacy(mut self, privacy: u8) -> Self {
        self.privacy = Some(privacy);
        self
    }

    /// Serializes into form pairs, appending the caller's auth string.
    #[must_use]
    pub fn to_form(&self, auth: &str) -> Vec<(&'static str, String)> {
        let mut form: Vec<(&'static str, String)> =
            vec![("status", String::from(self.status.as_str()))];
        if let Some(ref comment) = self.comment {
            form.push(("comment", comment.clone()));
        }
        if let Some(ref tags) = self.tags {
            form.push(("tags", tags.join(" ")));
        }
        if let Some(rating) = self.rating {
            form.push(("rating", rating.to_string()));
        }
        if let Some(privacy) = self.privacy {
            form.push(("privacy", privacy.to_string()));
        }
        form.push(("auth", String::from(auth)));
        form
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_protocol_schemes() {
        // Arrange & Act & Assert
        assert_eq!(Protocol::Https.scheme(), "https");
        assert_eq!(Protocol::Http.scheme(), "http");
        assert_eq!(Protocol::default(), Protocol::Https);
    }

    #[test]
    fn test_subject_type_codes() {
        // Arrange & Act & Assert
        assert_eq!(SubjectType::Book.code(), 1);
        assert_eq!(SubjectType::Anime.code(), 2);
        assert_eq!(SubjectType::Music.code(), 3);
        assert_eq!(SubjectType::Game.code(), 4);
        assert_eq!(SubjectType::Real.code(), 6);
    }

    #[test]
    fn test_collection_status_wire_values() {
        // Arrange & Act & Assert
        assert_eq!(CollectionStatusKind::Wish.as_str(), "wish");
        assert_eq!(CollectionStatusKind::OnHold.as_str(), "on_hold");
        assert_eq!(CollectionStatusKind::Do.as_str(), "do");
    }

    #[test]
    fn test_search_params_chain() {
        // Arrange & Act
        let params = SearchParams::new("とある科学の超電磁砲")
            .subject_type(SubjectType::Anime)
            .response_group(ResponseGroup::Small)
            .start(0)
            .max_results(25);

        // Assert
        assert_eq!(params.keywords, "とある科学の超電磁砲");
        assert_eq!(params.subject_type, Some(SubjectType::Anime));
        assert_eq!(params.response_group, Some(ResponseGroup::Small));
        assert_eq!(params.start, Some(0));
        assert_eq!(params.max_results, Some(25));
    }

    #[test]
    fn test_collection_payload_to_form() {
        // Arrange
        let payload = CollectionPayload::new(CollectionStatusKind::Wish)
            .comment("looking forward to it")
            .tags(vec![String::from("anime"), String::from("2024")])
            .rating(8)
            .privacy(0);

        // Act
        let form = payload.to_form("token");

        // Assert
        assert_eq!(form[0], ("status", String::from("wish")));
        assert!(form.contains(&("comment", String::from("looking forward to it"))));
        assert!(form.contains(&("tags", String::from("anime 2024"))));
        assert!(form.contains(&("rating", String::from("8"))));
        assert!(form.contains(&("privacy", String::from("0"))));
        assert_eq!(form.last().unwrap(), &("auth", String::from("token")));
    }

    #[test]
    fn test_collection_payload_minimal_form() {
        // Arrange & Act
        let form = CollectionPayload::new(CollectionStatusKind::Collect).to_form("t");

        // Assert
        assert_eq!(
            form,
            vec![
                ("status", String::from("collect")),
                ("auth", String::from("t")),
            ]
        );
    }

    #[test]
    fn test_form_encoding_round_trip() {
        // Arrange
        let mut original = BTreeMap::new();
        original.insert(String::from("status"), String::from("wish"));
        original.insert(String::from("comment"), String::from("日本語 & spaces=ok"));
        original.insert(String::from("tags"), String::from("a b"));

        // Act
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&original)
            .finish();
        let decoded: BTreeMap<String, String> = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();

        // Assert
        assert_eq!(decoded, original);
    }
}
