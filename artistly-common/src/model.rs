//! Artist domain model and API wire types
//!
//! The wire format uses camelCase field names (`priceRange`, `createdAt`)
//! to match the public JSON surface of the service.

use serde::{Deserialize, Serialize};

/// Image reference stored when an artist is created without a photo.
pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";

/// Maximum length for the artist name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for category, location and price range labels.
pub const MAX_LABEL_LEN: usize = 100;

/// A performer's public profile and contact/booking metadata.
///
/// All fields except `name` are free text with no persisted format
/// constraint; filters compare them with case-insensitive substring
/// matching, not enumerated values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Store-assigned identifier (uuid v4 string)
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Single primary tag
    #[serde(default)]
    pub category: String,
    /// Optional multi-tag list
    #[serde(default)]
    pub categories: Vec<String>,
    /// Free-text bucket label, e.g. "₹50K-1L"
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub location: String,
    /// URL or local path reference; placeholder when absent
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub phone: String,
    /// Free-text bucket, e.g. "5+ years"
    #[serde(default)]
    pub experience: String,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 last-update timestamp
    #[serde(default)]
    pub updated_at: String,
}

impl Artist {
    /// True when the record carries both an identifier and a name.
    ///
    /// Used by the client layer to drop malformed records fetched from an
    /// inconsistent store before handing data to views.
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// Payload for creating an artist. Every field is optional on the wire
/// except that a blank `name` is rejected by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub experience: String,
}

impl NewArtist {
    /// Trim every field and drop empty list entries.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.category = self.category.trim().to_string();
        self.price_range = self.price_range.trim().to_string();
        self.location = self.location.trim().to_string();
        self.image = self.image.trim().to_string();
        self.bio = self.bio.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.experience = self.experience.trim().to_string();
        self.categories = trim_list(self.categories);
        self.languages = trim_list(self.languages);
        self
    }
}

/// Partial update payload. `None` means "leave the stored value alone";
/// a present value (including an empty string) overwrites it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub price_range: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub languages: Option<Vec<String>>,
    pub phone: Option<String>,
    pub experience: Option<String>,
}

impl ArtistPatch {
    /// Apply the present fields onto an existing record, trimming values.
    pub fn apply_to(&self, artist: &mut Artist) {
        if let Some(v) = &self.name {
            artist.name = v.trim().to_string();
        }
        if let Some(v) = &self.email {
            artist.email = v.trim().to_string();
        }
        if let Some(v) = &self.category {
            artist.category = v.trim().to_string();
        }
        if let Some(v) = &self.categories {
            artist.categories = trim_list(v.clone());
        }
        if let Some(v) = &self.price_range {
            artist.price_range = v.trim().to_string();
        }
        if let Some(v) = &self.location {
            artist.location = v.trim().to_string();
        }
        if let Some(v) = &self.image {
            artist.image = v.trim().to_string();
        }
        if let Some(v) = &self.bio {
            artist.bio = v.trim().to_string();
        }
        if let Some(v) = &self.languages {
            artist.languages = trim_list(v.clone());
        }
        if let Some(v) = &self.phone {
            artist.phone = v.trim().to_string();
        }
        if let Some(v) = &self.experience {
            artist.experience = v.trim().to_string();
        }
    }
}

/// List filters. Empty and `"all"` values impose no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistFilter {
    pub category: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<String>,
}

impl ArtistFilter {
    pub fn category(&self) -> Option<&str> {
        effective_filter(self.category.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        effective_filter(self.location.as_deref())
    }

    pub fn price_range(&self) -> Option<&str> {
        effective_filter(self.price_range.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.category().is_none() && self.location().is_none() && self.price_range().is_none()
    }
}

/// Reduce a raw filter value to its effective form: trimmed, and dropped
/// entirely when blank or the `"all"` sentinel.
fn effective_filter(value: Option<&str>) -> Option<&str> {
    let v = value?.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(v)
    }
}

/// Field-level validation applied on create and update.
///
/// Returns one message per violated field; an empty vec means the record
/// is acceptable. Blank-name rejection is handled separately by the API
/// (it is a BadRequest, not a validation failure).
pub fn validate_fields(artist: &Artist) -> Vec<String> {
    let mut errors = Vec::new();

    if artist.name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("name must be at most {} characters", MAX_NAME_LEN));
    }
    if !artist.email.is_empty() && !artist.email.contains('@') {
        errors.push("email must be a valid email address".to_string());
    }
    for (field, value) in [
        ("category", &artist.category),
        ("location", &artist.location),
        ("priceRange", &artist.price_range),
    ] {
        if value.chars().count() > MAX_LABEL_LEN {
            errors.push(format!("{} must be at most {} characters", field, MAX_LABEL_LEN));
        }
    }

    errors
}

/// Response payload for a successful upload. Exactly one of `path`
/// (local-disk backend) or `url` (remote blob backend) is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub size: u64,
    pub mimetype: String,
}

impl UploadResponse {
    /// The reference to store as an artist's image field.
    pub fn reference(&self) -> &str {
        self.path.as_deref().or(self.url.as_deref()).unwrap_or("")
    }
}

/// Response payload for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_artist: Artist,
}

fn trim_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
