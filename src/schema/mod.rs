//! Schema descriptors and preview projections.
//!
//! Descriptors declare the shape and validation constraints of the entity and
//! configuration types in a form a host authoring system can consume. The
//! constraints mirror the author-time validation rules exactly (shared
//! constants with the models module).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{
    Photo, TeamMember, TeamMemberBlock, TeamMembersReference, GRID_COLUMNS_DEFAULT,
    GRID_COLUMNS_MAX, GRID_COLUMNS_MIN, MAX_ITEMS_MAX, MAX_ITEMS_MIN, NAME_MAX_LEN, NAME_MIN_LEN,
    REFS_MAX, REFS_MIN,
};

/// Fallback title shown in previews for a member without a name.
pub const UNTITLED_MEMBER: &str = "Untitled Team Member";
/// Fallback subtitle shown in previews for a member without a position.
pub const NO_POSITION: &str = "No position";

/// Kind of schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Standalone entity with its own identity
    Document,
    /// Embedded value type owned by its container
    Object,
}

/// Field value type as seen by the authoring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Text,
    Url,
    Boolean,
    Number,
    Image,
    ReferenceList,
    ObjectList,
}

/// Declarative validation constraint attached to a field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum Constraint {
    MinLength { value: usize },
    MaxLength { value: usize },
    Min { value: i64 },
    Max { value: i64 },
    MinItems { value: usize },
    MaxItems { value: usize },
    AllowedSchemes { schemes: Vec<&'static str> },
    AllowedValues { values: Vec<&'static str> },
}

/// A single field declaration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// A complete schema type declaration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaType {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: SchemaKind,
    pub fields: Vec<FieldDescriptor>,
}

/// Preview projection used by authoring UIs to summarize a record or value
/// without rendering it fully.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewProjection {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Photo>,
}

fn layout_values() -> Vec<&'static str> {
    vec!["card", "list", "grid", "minimal"]
}

fn display_layout_values() -> Vec<&'static str> {
    vec!["default", "card", "list", "grid", "minimal"]
}

fn toggle_field(name: &'static str, title: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        title,
        field_type: FieldType::Boolean,
        required: false,
        constraints: vec![],
        default: Some(json!(true)),
    }
}

/// Schema descriptor for the team member document type.
pub fn team_member_schema() -> SchemaType {
    SchemaType {
        name: "teamMember",
        title: "Team Member",
        kind: SchemaKind::Document,
        fields: vec![
            FieldDescriptor {
                name: "name",
                title: "Member Name",
                field_type: FieldType::String,
                required: true,
                constraints: vec![
                    Constraint::MinLength {
                        value: NAME_MIN_LEN,
                    },
                    Constraint::MaxLength {
                        value: NAME_MAX_LEN,
                    },
                ],
                default: None,
            },
            FieldDescriptor {
                name: "photo",
                title: "Member Photo",
                field_type: FieldType::Image,
                required: false,
                constraints: vec![],
                default: None,
            },
            FieldDescriptor {
                name: "position",
                title: "Position/Title",
                field_type: FieldType::String,
                required: false,
                constraints: vec![],
                default: None,
            },
            FieldDescriptor {
                name: "department",
                title: "Department",
                field_type: FieldType::String,
                required: false,
                constraints: vec![],
                default: None,
            },
            FieldDescriptor {
                name: "bio",
                title: "Bio",
                field_type: FieldType::Text,
                required: false,
                constraints: vec![],
                default: None,
            },
            FieldDescriptor {
                name: "url",
                title: "URL",
                field_type: FieldType::Url,
                required: false,
                constraints: vec![Constraint::AllowedSchemes {
                    schemes: vec!["http", "https"],
                }],
                default: None,
            },
            FieldDescriptor {
                name: "socialLinks",
                title: "Social Links",
                field_type: FieldType::ObjectList,
                required: false,
                constraints: vec![Constraint::AllowedSchemes {
                    schemes: vec!["http", "https", "mailto"],
                }],
                default: None,
            },
            FieldDescriptor {
                name: "layout",
                title: "Layout",
                field_type: FieldType::String,
                required: true,
                constraints: vec![Constraint::AllowedValues {
                    values: layout_values(),
                }],
                default: Some(json!("card")),
            },
            FieldDescriptor {
                name: "isActive",
                title: "Active",
                field_type: FieldType::Boolean,
                required: false,
                constraints: vec![],
                default: Some(json!(true)),
            },
        ],
    }
}

fn member_refs_field() -> FieldDescriptor {
    FieldDescriptor {
        name: "teamMembers",
        title: "Select Team Members",
        field_type: FieldType::ReferenceList,
        required: true,
        constraints: vec![
            Constraint::MinItems { value: REFS_MIN },
            Constraint::MaxItems { value: REFS_MAX },
        ],
        default: None,
    }
}

/// Schema descriptor for the rich-text block configuration.
pub fn team_member_block_schema() -> SchemaType {
    SchemaType {
        name: "teamMemberBlock",
        title: "Team Members",
        kind: SchemaKind::Object,
        fields: vec![
            member_refs_field(),
            FieldDescriptor {
                name: "displayLayout",
                title: "Display Layout",
                field_type: FieldType::String,
                required: false,
                constraints: vec![Constraint::AllowedValues {
                    values: display_layout_values(),
                }],
                default: Some(json!("default")),
            },
            toggle_field("showSocialLinks", "Show Social Links"),
            toggle_field("showBio", "Show Bio"),
            toggle_field("showPosition", "Show Position"),
            toggle_field("showDepartment", "Show Department"),
            toggle_field("showUrl", "Show Website URL"),
            FieldDescriptor {
                name: "customTitle",
                title: "Custom Title Override",
                field_type: FieldType::String,
                required: false,
                constraints: vec![],
                default: None,
            },
        ],
    }
}

/// Schema descriptor for the standalone reference field configuration.
pub fn team_members_reference_schema() -> SchemaType {
    let mut fields = team_member_block_schema().fields;
    // The standalone field always names a concrete layout (no defer-to-member
    // sentinel) and drops the custom title in favor of grid/cap settings.
    fields.retain(|f| f.name != "customTitle");
    for field in &mut fields {
        if field.name == "displayLayout" {
            field.constraints = vec![Constraint::AllowedValues {
                values: layout_values(),
            }];
            field.default = Some(json!("card"));
        }
    }
    fields.push(FieldDescriptor {
        name: "gridColumns",
        title: "Grid Columns",
        field_type: FieldType::Number,
        required: false,
        constraints: vec![
            Constraint::Min {
                value: GRID_COLUMNS_MIN as i64,
            },
            Constraint::Max {
                value: GRID_COLUMNS_MAX as i64,
            },
        ],
        default: Some(json!(GRID_COLUMNS_DEFAULT)),
    });
    fields.push(FieldDescriptor {
        name: "maxItems",
        title: "Maximum Items to Display",
        field_type: FieldType::Number,
        required: false,
        constraints: vec![
            Constraint::Min {
                value: MAX_ITEMS_MIN as i64,
            },
            Constraint::Max {
                value: MAX_ITEMS_MAX as i64,
            },
        ],
        default: None,
    });

    SchemaType {
        name: "teamMembersReference",
        title: "Team Members Selection",
        kind: SchemaKind::Object,
        fields,
    }
}

/// All schema types this service registers with a host type registry.
pub fn all_schemas() -> Vec<SchemaType> {
    vec![
        team_member_schema(),
        team_member_block_schema(),
        team_members_reference_schema(),
    ]
}

fn member_count_title(count: usize) -> String {
    if count == 1 {
        "1 Team Member".to_string()
    } else {
        format!("{} Team Members", count)
    }
}

/// Preview projection for a team member record.
pub fn prepare_member(member: &TeamMember) -> PreviewProjection {
    let name = member.name.trim();
    let title = if name.is_empty() {
        UNTITLED_MEMBER.to_string()
    } else {
        name.to_string()
    };
    let subtitle = member
        .position
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(NO_POSITION)
        .to_string();

    PreviewProjection {
        title,
        subtitle,
        media: member.photo.clone(),
    }
}

/// Preview projection for a rich-text block configuration.
pub fn prepare_block(block: &TeamMemberBlock) -> PreviewProjection {
    PreviewProjection {
        title: member_count_title(block.team_members.len()),
        subtitle: format!("Layout: {}", block.display_layout.as_str()),
        media: None,
    }
}

/// Preview projection for a standalone reference field configuration.
pub fn prepare_reference(reference: &TeamMembersReference) -> PreviewProjection {
    let count = reference.team_members.len();
    let display_count = reference.max_items.map_or(count, |max| count.min(max));
    let mut subtitle = format!("Layout: {}", reference.display_layout.as_str());
    if let Some(max) = reference.max_items {
        subtitle.push_str(&format!(" (max {})", max));
    }

    PreviewProjection {
        title: member_count_title(display_count),
        subtitle,
        media: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplayLayout, Layout};

    fn member(name: &str, position: Option<&str>) -> TeamMember {
        TeamMember {
            id: "m1".to_string(),
            name: name.to_string(),
            photo: None,
            position: position.map(String::from),
            department: None,
            bio: None,
            url: None,
            social_links: vec![],
            layout: Layout::Card,
            is_active: true,
            published: true,
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            version: 1,
        }
    }

    #[test]
    fn test_prepare_member_fallbacks() {
        let preview = prepare_member(&member("", None));
        assert_eq!(preview.title, UNTITLED_MEMBER);
        assert_eq!(preview.subtitle, NO_POSITION);

        let preview = prepare_member(&member("Ada", Some("Engineer")));
        assert_eq!(preview.title, "Ada");
        assert_eq!(preview.subtitle, "Engineer");
    }

    #[test]
    fn test_prepare_block_pluralization() {
        let mut block = TeamMemberBlock {
            team_members: vec![],
            display_layout: DisplayLayout::Default,
            show_social_links: true,
            show_bio: true,
            show_position: true,
            show_department: true,
            show_url: true,
            custom_title: None,
        };
        assert_eq!(prepare_block(&block).title, "0 Team Members");

        block.team_members.push("m1".to_string());
        let preview = prepare_block(&block);
        assert_eq!(preview.title, "1 Team Member");
        assert_eq!(preview.subtitle, "Layout: default");

        block.team_members.push("m2".to_string());
        assert_eq!(prepare_block(&block).title, "2 Team Members");
    }

    #[test]
    fn test_prepare_reference_caps_count() {
        let reference = TeamMembersReference {
            team_members: (0..5).map(|i| format!("m{}", i)).collect(),
            display_layout: DisplayLayout::Grid,
            show_social_links: true,
            show_bio: true,
            show_position: true,
            show_department: true,
            show_url: true,
            grid_columns: 3,
            max_items: Some(2),
        };
        let preview = prepare_reference(&reference);
        assert_eq!(preview.title, "2 Team Members");
        assert_eq!(preview.subtitle, "Layout: grid (max 2)");
    }

    #[test]
    fn test_schema_descriptors_serialize() {
        let schemas = all_schemas();
        assert_eq!(schemas.len(), 3);
        let value = serde_json::to_value(&schemas).unwrap();
        assert_eq!(value[0]["name"], "teamMember");
        assert_eq!(value[0]["kind"], "document");
        assert_eq!(value[1]["kind"], "object");

        // The reference field carries grid/cap settings but no custom title.
        let reference_fields = value[2]["fields"].as_array().unwrap();
        assert!(reference_fields.iter().any(|f| f["name"] == "gridColumns"));
        assert!(!reference_fields.iter().any(|f| f["name"] == "customTitle"));
    }

    #[test]
    fn test_reference_layout_values_are_concrete() {
        let block = serde_json::to_value(team_member_block_schema()).unwrap();
        let reference = serde_json::to_value(team_members_reference_schema()).unwrap();

        let layout_constraint = |schema: &serde_json::Value| {
            schema["fields"]
                .as_array()
                .unwrap()
                .iter()
                .find(|f| f["name"] == "displayLayout")
                .unwrap()["constraints"][0]["values"]
                .clone()
        };

        // The block may defer to each member's stored layout.
        let block_values = layout_constraint(&block);
        assert!(block_values.as_array().unwrap().contains(&"default".into()));

        // The standalone field must pick one of the concrete layouts.
        let reference_values = layout_constraint(&reference);
        assert_eq!(
            reference_values,
            serde_json::json!(["card", "list", "grid", "minimal"])
        );
    }
}
