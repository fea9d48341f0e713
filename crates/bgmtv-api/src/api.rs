//! `BangumiApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::Result;
use crate::params::{
    CollectionAction, CollectionCategory, CollectionPayload, EpStatus, ResponseGroup, SearchParams,
};
use crate::types::{
    AuthUser, CalendarDay, SearchResponse, StatusReply, Subject, SubjectCollection,
    SubjectEpisodes, SubjectProgress, User, UserCollection,
};

/// bgm.tv API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(BangumiApi: Send)]
#[allow(deprecated)]
pub trait LocalBangumiApi {
    /// Fetches the weekly broadcast calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn calendar(&self) -> Result<Vec<CalendarDay>>;

    /// Fetches a user profile by username or numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn user(&self, username: &str) -> Result<User>;

    /// Fetches subject details, optionally at a specific detail level.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn subject(
        &self,
        subject_id: u32,
        response_group: Option<ResponseGroup>,
    ) -> Result<Subject>;

    /// Fetches a subject together with its episode list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn subject_episodes(&self, subject_id: u32) -> Result<SubjectEpisodes>;

    /// Lists a user's collection, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn user_collection(
        &self,
        username: &str,
        cat: Option<CollectionCategory>,
    ) -> Result<Vec<UserCollection>>;

    /// Searches subjects by keyword with optional type filter and paging.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn search_subjects(&self, params: &SearchParams) -> Result<SearchResponse>;

    /// Fetches the caller's collection state for one subject.
    ///
    /// `auth` is the auth string obtained from [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field (e.g. not authenticated).
    async fn collection_status(&self, subject_id: u32, auth: &str) -> Result<SubjectCollection>;

    /// Fetches a user's watch progress, optionally for one subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field (e.g. not authenticated).
    async fn user_progress(
        &self,
        username: &str,
        auth: &str,
        subject_id: Option<u32>,
    ) -> Result<Vec<SubjectProgress>>;

    /// Logs in with username and password, returning the auth strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field (e.g. wrong credentials).
    #[deprecated(note = "the upstream /auth endpoint is deprecated; use OAuth access tokens")]
    async fn login(&self, username: &str, password: &str) -> Result<AuthUser>;

    /// Creates or updates the caller's collection entry for a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn update_collection(
        &self,
        subject_id: u32,
        action: CollectionAction,
        payload: &CollectionPayload,
        auth: &str,
    ) -> Result<SubjectCollection>;

    /// Marks one episode (or a batch via `ep_ids`) with a watch status.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn update_episode_status(
        &self,
        ep_id: u32,
        status: EpStatus,
        ep_ids: Option<&[u32]>,
        auth: &str,
    ) -> Result<StatusReply>;

    /// Updates the watched-episode counter for a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or if
    /// the payload carries an `error` field.
    async fn update_watched_eps(
        &self,
        subject_id: u32,
        watched_eps: u32,
        auth: &str,
    ) -> Result<StatusReply>;
}
