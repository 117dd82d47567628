//! Team member entity model and author-facing request shapes.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Minimum length of a member name.
pub const NAME_MIN_LEN: usize = 2;
/// Maximum length of a member name.
pub const NAME_MAX_LEN: usize = 100;

/// Concrete presentation layout stored on a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Card,
    List,
    Grid,
    Minimal,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Card => "card",
            Layout::List => "list",
            Layout::Grid => "grid",
            Layout::Minimal => "minimal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "card" => Some(Layout::Card),
            "list" => Some(Layout::List),
            "grid" => Some(Layout::Grid),
            "minimal" => Some(Layout::Minimal),
            _ => None,
        }
    }
}

/// Social platform a member link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Linkedin,
    Github,
    Instagram,
    Facebook,
    Youtube,
    Website,
    Other,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Github => "github",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Website => "website",
            SocialPlatform::Other => "other",
        }
    }

    /// Decorative glyph shown next to a link. Cosmetic only.
    pub fn icon(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "🐦",
            SocialPlatform::Linkedin => "💼",
            SocialPlatform::Github => "🐙",
            SocialPlatform::Instagram => "📷",
            SocialPlatform::Facebook => "👥",
            SocialPlatform::Youtube => "📺",
            SocialPlatform::Website => "🌐",
            SocialPlatform::Other => "🔗",
        }
    }
}

/// A single social link. Duplicate platforms are permitted; insertion order
/// is preserved and never deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Crop/focal-point hint carried with a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Reference to an externally stored image asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub asset_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,
}

/// A team member document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    /// Default layout for this member; placements may override it.
    pub layout: Layout,
    /// Soft visibility flag. Inactive members stay in storage.
    pub is_active: bool,
    /// Draft/published state. Drafts never appear in listing queries.
    pub published: bool,
    pub updated_at: String,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

/// Request body for creating a new team member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub name: String,
    #[serde(default)]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub published: bool,
}

fn default_true() -> bool {
    true
}

/// Request body for updating an existing team member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(default)]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub published: Option<bool>,
    /// Expected version for optimistic concurrency control
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Validate a member name against the length rules.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.trim().chars().count();
    if len < NAME_MIN_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at least {} characters",
            NAME_MIN_LEN
        )));
    }
    if len > NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            NAME_MAX_LEN
        )));
    }
    Ok(())
}

/// Validate a member website URL (absolute, http/https).
pub fn validate_member_url(url: &str) -> Result<(), AppError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "URL must use http or https: {}",
            url
        )))
    }
}

/// Validate a social link URL (absolute, http/https/mailto).
pub fn validate_social_url(url: &str) -> Result<(), AppError> {
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:") {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Social link URL must use http, https or mailto: {}",
            url
        )))
    }
}

impl CreateMemberRequest {
    /// Author-time validation. Render code never assumes this ran.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)?;
        if let Some(url) = &self.url {
            validate_member_url(url)?;
        }
        for link in &self.social_links {
            validate_social_url(&link.url)?;
        }
        Ok(())
    }
}

impl UpdateMemberRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(url) = &self.url {
            validate_member_url(url)?;
        }
        if let Some(links) = &self.social_links {
            for link in links {
                validate_social_url(&link.url)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_bounds() {
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_url_schemes() {
        assert!(validate_member_url("https://example.com").is_ok());
        assert!(validate_member_url("ftp://example.com").is_err());
        assert!(validate_social_url("mailto:ada@example.com").is_ok());
        assert!(validate_social_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_layout_round_trip() {
        for layout in [Layout::Card, Layout::List, Layout::Grid, Layout::Minimal] {
            assert_eq!(Layout::from_str(layout.as_str()), Some(layout));
        }
        assert_eq!(Layout::from_str("banner"), None);
    }

    #[test]
    fn test_member_serde_camel_case() {
        let member = TeamMember {
            id: "m1".to_string(),
            name: "Ada".to_string(),
            photo: None,
            position: None,
            department: None,
            bio: None,
            url: None,
            social_links: vec![],
            layout: Layout::Card,
            is_active: true,
            published: true,
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            version: 1,
        };
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["layout"], "card");
        assert!(value.get("photo").is_none());
    }
}
