//! Async client library for the Bangumi (bgm.tv) REST API.
//!
//! Wraps the legacy JSON endpoints (calendar, subjects, episodes, user
//! collections, search, authentication) behind typed async methods on
//! [`BangumiClient`]. The [`BangumiApi`] trait abstracts the operations
//! for mock substitution in downstream tests.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{BangumiApi, LocalBangumiApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{BangumiClient, BangumiClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{ApiError, Result};
pub use params::{
    CollectionAction, CollectionCategory, CollectionPayload, CollectionStatusKind, EpStatus,
    Protocol, ResponseGroup, SearchParams, SubjectType,
};
pub use types::{
    AuthUser, Avatar, CalendarDay, CollectionCounts, CollectionStatusInfo, EpProgress,
    EpStatusInfo, Episode, Images, Rating, SearchResponse, StatusReply, Subject,
    SubjectCollection, SubjectEpisodes, SubjectProgress, User, UserCollection, Weekday,
};
