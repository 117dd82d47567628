//! Embeddable configuration objects: the rich-text block and the standalone
//! reference field. Both carry member references plus per-placement display
//! settings; neither has an identity of its own.

use serde::{Deserialize, Serialize};

use super::Layout;
use crate::errors::AppError;

/// Minimum number of member references in a block or reference field.
pub const REFS_MIN: usize = 1;
/// Maximum number of member references in a block or reference field.
pub const REFS_MAX: usize = 20;
/// Grid column bounds.
pub const GRID_COLUMNS_MIN: u8 = 1;
pub const GRID_COLUMNS_MAX: u8 = 6;
pub const GRID_COLUMNS_DEFAULT: u8 = 3;
/// Bounds for the optional display cap.
pub const MAX_ITEMS_MIN: usize = 1;
pub const MAX_ITEMS_MAX: usize = 50;

/// Placement-level layout choice. `Default` defers to the referenced
/// member's own stored layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLayout {
    #[default]
    Default,
    Card,
    List,
    Grid,
    Minimal,
}

impl DisplayLayout {
    /// The concrete layout, or `None` for the defer-to-member sentinel.
    pub fn concrete(&self) -> Option<Layout> {
        match self {
            DisplayLayout::Default => None,
            DisplayLayout::Card => Some(Layout::Card),
            DisplayLayout::List => Some(Layout::List),
            DisplayLayout::Grid => Some(Layout::Grid),
            DisplayLayout::Minimal => Some(Layout::Minimal),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayLayout::Default => "default",
            DisplayLayout::Card => "card",
            DisplayLayout::List => "list",
            DisplayLayout::Grid => "grid",
            DisplayLayout::Minimal => "minimal",
        }
    }
}

/// Team member block embedded in rich text (canonical multi-member shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberBlock {
    /// Member ids, in display order.
    pub team_members: Vec<String>,
    #[serde(default)]
    pub display_layout: DisplayLayout,
    #[serde(default = "default_true")]
    pub show_social_links: bool,
    #[serde(default = "default_true")]
    pub show_bio: bool,
    #[serde(default = "default_true")]
    pub show_position: bool,
    #[serde(default = "default_true")]
    pub show_department: bool,
    #[serde(default = "default_true")]
    pub show_url: bool,
    /// Overrides the displayed name. Applies to every referenced member when
    /// several are selected; there is no per-member override at this level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

/// Legacy single-reference block shape, kept readable for stored documents
/// that predate the multi-member block. Upgraded on read, never written.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTeamMemberBlock {
    pub team_member: String,
    #[serde(default)]
    pub display_layout: DisplayLayout,
    #[serde(default = "default_true")]
    pub show_social_links: bool,
    #[serde(default = "default_true")]
    pub show_bio: bool,
    #[serde(default)]
    pub custom_title: Option<String>,
}

/// Either generation of the block, as found in stored documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BlockConfig {
    Multi(TeamMemberBlock),
    Legacy(LegacyTeamMemberBlock),
}

impl BlockConfig {
    /// Upgrade to the canonical multi-member shape. Legacy blocks had no
    /// position/department/url toggles; those default to visible.
    pub fn into_canonical(self) -> TeamMemberBlock {
        match self {
            BlockConfig::Multi(block) => block,
            BlockConfig::Legacy(legacy) => TeamMemberBlock {
                team_members: vec![legacy.team_member],
                display_layout: legacy.display_layout,
                show_social_links: legacy.show_social_links,
                show_bio: legacy.show_bio,
                show_position: true,
                show_department: true,
                show_url: true,
                custom_title: legacy.custom_title,
            },
        }
    }
}

/// Team members selection used as a standalone document field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembersReference {
    /// Member ids, in display order.
    pub team_members: Vec<String>,
    #[serde(default = "default_card_layout")]
    pub display_layout: DisplayLayout,
    #[serde(default = "default_true")]
    pub show_social_links: bool,
    #[serde(default = "default_true")]
    pub show_bio: bool,
    #[serde(default = "default_true")]
    pub show_position: bool,
    #[serde(default = "default_true")]
    pub show_department: bool,
    #[serde(default = "default_true")]
    pub show_url: bool,
    /// Column count, only meaningful for the grid layout.
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u8,
    /// Optional cap on how many members are displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn default_card_layout() -> DisplayLayout {
    DisplayLayout::Card
}

fn default_grid_columns() -> u8 {
    GRID_COLUMNS_DEFAULT
}

fn validate_refs(refs: &[String]) -> Result<(), AppError> {
    if refs.len() < REFS_MIN || refs.len() > REFS_MAX {
        return Err(AppError::Validation(format!(
            "Between {} and {} team members must be selected, got {}",
            REFS_MIN,
            REFS_MAX,
            refs.len()
        )));
    }
    Ok(())
}

impl TeamMemberBlock {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_refs(&self.team_members)
    }
}

impl TeamMembersReference {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_refs(&self.team_members)?;
        if self.grid_columns < GRID_COLUMNS_MIN || self.grid_columns > GRID_COLUMNS_MAX {
            return Err(AppError::Validation(format!(
                "Grid columns must be between {} and {}, got {}",
                GRID_COLUMNS_MIN, GRID_COLUMNS_MAX, self.grid_columns
            )));
        }
        if let Some(max) = self.max_items {
            if !(MAX_ITEMS_MIN..=MAX_ITEMS_MAX).contains(&max) {
                return Err(AppError::Validation(format!(
                    "Max items must be between {} and {}, got {}",
                    MAX_ITEMS_MIN, MAX_ITEMS_MAX, max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_defaults() {
        let block: TeamMemberBlock =
            serde_json::from_value(json!({ "teamMembers": ["m1"] })).unwrap();
        assert_eq!(block.display_layout, DisplayLayout::Default);
        assert!(block.show_social_links);
        assert!(block.show_bio);
        assert!(block.show_position);
        assert!(block.show_department);
        assert!(block.show_url);
        assert!(block.custom_title.is_none());
    }

    #[test]
    fn test_reference_defaults() {
        let reference: TeamMembersReference =
            serde_json::from_value(json!({ "teamMembers": ["m1", "m2"] })).unwrap();
        assert_eq!(reference.display_layout, DisplayLayout::Card);
        assert_eq!(reference.grid_columns, GRID_COLUMNS_DEFAULT);
        assert!(reference.max_items.is_none());
    }

    #[test]
    fn test_legacy_block_upgrade() {
        let config: BlockConfig = serde_json::from_value(json!({
            "teamMember": "m1",
            "displayLayout": "list",
            "showBio": false
        }))
        .unwrap();
        let block = config.into_canonical();
        assert_eq!(block.team_members, vec!["m1".to_string()]);
        assert_eq!(block.display_layout, DisplayLayout::List);
        assert!(!block.show_bio);
        // Toggles the legacy shape never had default to visible.
        assert!(block.show_position);
        assert!(block.show_department);
        assert!(block.show_url);
    }

    #[test]
    fn test_multi_block_parses_as_multi() {
        let config: BlockConfig = serde_json::from_value(json!({
            "teamMembers": ["m1", "m2"],
            "displayLayout": "grid"
        }))
        .unwrap();
        let block = config.into_canonical();
        assert_eq!(block.team_members.len(), 2);
        assert_eq!(block.display_layout, DisplayLayout::Grid);
    }

    #[test]
    fn test_reference_count_bounds() {
        let empty = TeamMembersReference {
            team_members: vec![],
            display_layout: DisplayLayout::Card,
            show_social_links: true,
            show_bio: true,
            show_position: true,
            show_department: true,
            show_url: true,
            grid_columns: 3,
            max_items: None,
        };
        assert!(empty.validate().is_err());

        let too_many = TeamMembersReference {
            team_members: (0..21).map(|i| format!("m{}", i)).collect(),
            ..empty.clone()
        };
        assert!(too_many.validate().is_err());

        let ok = TeamMembersReference {
            team_members: vec!["m1".to_string()],
            ..empty
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_grid_columns_and_max_items_bounds() {
        let base = TeamMembersReference {
            team_members: vec!["m1".to_string()],
            display_layout: DisplayLayout::Grid,
            show_social_links: true,
            show_bio: true,
            show_position: true,
            show_department: true,
            show_url: true,
            grid_columns: 7,
            max_items: None,
        };
        assert!(base.validate().is_err());

        let bad_cap = TeamMembersReference {
            grid_columns: 3,
            max_items: Some(51),
            ..base.clone()
        };
        assert!(bad_cap.validate().is_err());

        let ok = TeamMembersReference {
            grid_columns: 6,
            max_items: Some(50),
            ..base
        };
        assert!(ok.validate().is_ok());
    }
}
