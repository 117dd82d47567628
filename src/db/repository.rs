//! Database repository for member operations.
//!
//! Uses prepared statements and optimistic version checks for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateMemberRequest, Datastore, Hotspot, Layout, Photo, RevisionInfo, SocialLink, TeamMember,
    UpdateMemberRequest,
};

const MEMBER_COLUMNS: &str = "id, name, photo_asset_ref, photo_alt, photo_hotspot, position, department, bio, url, social_links, layout, is_active, published, updated_at, version";

/// Database repository for all member data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    /// Get the full datastore, drafts and inactive members included.
    pub async fn get_datastore(&self) -> Result<Datastore, AppError> {
        let meta =
            sqlx::query("SELECT schema_version, revision_id, generated_at FROM meta WHERE id = 1")
                .fetch_one(&self.pool)
                .await?;

        let members = self.list_all_members().await?;

        Ok(Datastore {
            schema_version: meta.get("schema_version"),
            revision_id: meta.get("revision_id"),
            generated_at: meta.get("generated_at"),
            members,
        })
    }

    // ==================== MEMBER OPERATIONS ====================

    /// List members visible to consumers: active and published, sorted by
    /// name (the store's default case-sensitive collation).
    pub async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM members WHERE is_active = 1 AND published = 1 ORDER BY name",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| member_from_row(&row)).collect())
    }

    /// List visible members with an exact department match.
    pub async fn list_members_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM members WHERE is_active = 1 AND published = 1 AND department = ? ORDER BY name",
            MEMBER_COLUMNS
        ))
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| member_from_row(&row)).collect())
    }

    /// List every stored member regardless of state (datastore export).
    pub async fn list_all_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM members ORDER BY name",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| member_from_row(&row)).collect())
    }

    /// Get a member by ID. No visibility filter here: direct resolution
    /// returns inactive members too, and the presentation layer filters
    /// uniformly before rendering.
    pub async fn get_member(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM members WHERE id = ?",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(member_from_row))
    }

    /// Expand a list of member references into full records.
    ///
    /// Dangling references are dropped silently; the relative order of the
    /// resolvable references is preserved.
    pub async fn resolve_members(&self, ids: &[String]) -> Result<Vec<TeamMember>, AppError> {
        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(member) = self.get_member(id).await? {
                members.push(member);
            } else {
                tracing::debug!("Dropping dangling member reference: {}", id);
            }
        }
        Ok(members)
    }

    /// Create a new member.
    pub async fn create_member(
        &self,
        request: &CreateMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let social_links_json = serde_json::to_string(&request.social_links)?;
        let hotspot_json = photo_hotspot_json(&request.photo)?;

        sqlx::query(
            "INSERT INTO members (id, name, photo_asset_ref, photo_alt, photo_hotspot, position, department, bio, url, social_links, layout, is_active, published, updated_at, version) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(request.photo.as_ref().map(|p| p.asset_ref.clone()))
        .bind(request.photo.as_ref().and_then(|p| p.alt.clone()))
        .bind(&hotspot_json)
        .bind(&request.position)
        .bind(&request.department)
        .bind(&request.bio)
        .bind(&request.url)
        .bind(&social_links_json)
        .bind(request.layout.as_str())
        .bind(request.is_active as i32)
        .bind(request.published as i32)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(TeamMember {
            id,
            name: request.name.clone(),
            photo: request.photo.clone(),
            position: request.position.clone(),
            department: request.department.clone(),
            bio: request.bio.clone(),
            url: request.url.clone(),
            social_links: request.social_links.clone(),
            layout: request.layout,
            is_active: request.is_active,
            published: request.published,
            updated_at: now,
            version: 1,
        })
    }

    /// Update a member with optimistic concurrency control.
    pub async fn update_member(
        &self,
        id: &str,
        request: &UpdateMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let existing = self
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;

        // Check version for optimistic concurrency
        if let Some(expected) = request.expected_version {
            if existing.version != expected {
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, existing.version
                    ),
                    current_version: existing.version,
                });
            }
        }

        let now = Utc::now().to_rfc3339();
        let new_version = existing.version + 1;

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let photo = request.photo.clone().or(existing.photo.clone());
        let position = request.position.clone().or(existing.position.clone());
        let department = request.department.clone().or(existing.department.clone());
        let bio = request.bio.clone().or(existing.bio.clone());
        let url = request.url.clone().or(existing.url.clone());
        let social_links = request
            .social_links
            .clone()
            .unwrap_or(existing.social_links.clone());
        let layout = request.layout.unwrap_or(existing.layout);
        let is_active = request.is_active.unwrap_or(existing.is_active);
        let published = request.published.unwrap_or(existing.published);
        let social_links_json = serde_json::to_string(&social_links)?;
        let hotspot_json = photo_hotspot_json(&photo)?;

        // Use conditional UPDATE with version check to prevent race conditions
        let result = sqlx::query(
            "UPDATE members SET name = ?, photo_asset_ref = ?, photo_alt = ?, photo_hotspot = ?, position = ?, department = ?, bio = ?, url = ?, social_links = ?, layout = ?, is_active = ?, published = ?, updated_at = ?, version = ? WHERE id = ? AND version = ?"
        )
        .bind(name)
        .bind(photo.as_ref().map(|p| p.asset_ref.clone()))
        .bind(photo.as_ref().and_then(|p| p.alt.clone()))
        .bind(&hotspot_json)
        .bind(&position)
        .bind(&department)
        .bind(&bio)
        .bind(&url)
        .bind(&social_links_json)
        .bind(layout.as_str())
        .bind(is_active as i32)
        .bind(published as i32)
        .bind(&now)
        .bind(new_version)
        .bind(id)
        .bind(existing.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Race condition - version changed between read and write
            let current = self.get_member(id).await?;
            return Err(AppError::Conflict {
                message: "Concurrent modification detected".to_string(),
                current_version: current.map(|m| m.version).unwrap_or(0),
            });
        }

        self.increment_revision().await?;

        Ok(TeamMember {
            id: id.to_string(),
            name: name.clone(),
            photo,
            position,
            department,
            bio,
            url,
            social_links,
            layout,
            is_active,
            published,
            updated_at: now,
            version: new_version,
        })
    }

    /// Delete a member. This is a hard delete; placements referencing the
    /// member are left dangling and dropped at resolution time. Soft
    /// removal goes through `isActive` instead.
    pub async fn delete_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }
}

fn photo_hotspot_json(photo: &Option<Photo>) -> Result<Option<String>, AppError> {
    match photo.as_ref().and_then(|p| p.hotspot.as_ref()) {
        Some(hotspot) => Ok(Some(serde_json::to_string(hotspot)?)),
        None => Ok(None),
    }
}

// Helper functions for row conversion

fn member_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamMember {
    let is_active: i32 = row.get("is_active");
    let published: i32 = row.get("published");
    let layout_str: String = row.get("layout");
    let social_links_str: Option<String> = row.get("social_links");
    let photo_asset_ref: Option<String> = row.get("photo_asset_ref");
    let photo_hotspot_str: Option<String> = row.get("photo_hotspot");

    let photo = photo_asset_ref.map(|asset_ref| Photo {
        asset_ref,
        alt: row.get("photo_alt"),
        hotspot: photo_hotspot_str.and_then(|s| serde_json::from_str::<Hotspot>(&s).ok()),
    });

    TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        photo,
        position: row.get("position"),
        department: row.get("department"),
        bio: row.get("bio"),
        url: row.get("url"),
        social_links: social_links_str
            .map(|s| parse_social_links(&s))
            .unwrap_or_default(),
        layout: Layout::from_str(&layout_str).unwrap_or_default(),
        is_active: is_active != 0,
        published: published != 0,
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    }
}

fn parse_social_links(s: &str) -> Vec<SocialLink> {
    serde_json::from_str(s).unwrap_or_default()
}
