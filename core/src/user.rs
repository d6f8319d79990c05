//! Users, their public projections and profile updates.

use crate::error::DomainError;
use crate::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. The same account can act as guest and as host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Login email, never shown to other users except on a booking
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Free-form biography
    pub bio: Option<String>,
    /// Profile picture
    pub avatar_url: Option<String>,
    /// Identity has been verified
    pub is_verified: bool,
    /// User has opted in to hosting
    pub is_host: bool,
    /// Aggregate reputation
    pub reputation_score: f64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// What anyone may see about a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    /// User id
    pub id: UserId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Biography
    pub bio: Option<String>,
    /// Profile picture
    pub avatar_url: Option<String>,
    /// Verified flag
    pub is_verified: bool,
    /// Host flag
    pub is_host: bool,
    /// Aggregate reputation
    pub reputation_score: f64,
    /// Member since
    pub created_at: DateTime<Utc>,
}

/// Host details shown next to a listing in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSummary {
    /// Host id
    pub id: UserId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Profile picture
    pub avatar_url: Option<String>,
    /// Aggregate reputation
    pub reputation_score: f64,
}

/// Contact details exchanged between the two parties of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCard {
    /// User id
    pub id: UserId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: String,
    /// Profile picture
    pub avatar_url: Option<String>,
}

/// Minimal host card embedded in a guest's booking list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostBadge {
    /// Host id
    pub id: UserId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Profile picture
    pub avatar_url: Option<String>,
}

impl User {
    /// Project onto the public profile.
    #[must_use]
    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            bio: self.bio.clone(),
            avatar_url: self.avatar_url.clone(),
            is_verified: self.is_verified,
            is_host: self.is_host,
            reputation_score: self.reputation_score,
            created_at: self.created_at,
        }
    }

    /// Project onto the host summary used in listing responses.
    #[must_use]
    pub fn host_summary(&self) -> HostSummary {
        HostSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar_url: self.avatar_url.clone(),
            reputation_score: self.reputation_score,
        }
    }

    /// Project onto the host badge used in booking lists.
    #[must_use]
    pub fn host_badge(&self) -> HostBadge {
        HostBadge {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    /// Project onto the contact card used in booking details.
    #[must_use]
    pub fn contact_card(&self) -> ContactCard {
        ContactCard {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    /// New given name
    pub first_name: Option<String>,
    /// New family name
    pub last_name: Option<String>,
    /// New phone
    pub phone: Option<String>,
    /// New biography
    pub bio: Option<String>,
    /// New profile picture
    pub avatar_url: Option<String>,
    /// Opt in or out of hosting
    pub is_host: Option<bool>,
}

impl ProfileChanges {
    /// Check provided fields.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] when a provided name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DomainError::invalid("firstName should not be empty"));
        }
        if self.last_name.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DomainError::invalid("lastName should not be empty"));
        }
        Ok(())
    }

    /// Apply the provided fields to `user` and stamp `updated_at`.
    pub fn apply(&self, user: &mut User, updated_at: DateTime<Utc>) {
        if let Some(first_name) = &self.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            user.last_name.clone_from(last_name);
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(bio) = &self.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(avatar_url) = &self.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }
        if let Some(is_host) = self.is_host {
            user.is_host = is_host;
        }
        user.updated_at = updated_at;
    }
}
