//! Presentation layer: resolves layouts and produces display-ready render
//! trees as pure data.
//!
//! Hard contract for authoring-preview consumers: absent or malformed input
//! yields an empty render (`None`), never a panic. Validation may not have
//! run on anything reaching this module.

use serde::{Deserialize, Serialize};

use crate::config::ImageConfig;
use crate::images::build_image_url;
use crate::models::{
    DisplayLayout, Layout, TeamMember, TeamMemberBlock, TeamMembersReference, GRID_COLUMNS_DEFAULT,
};

/// Per-placement display settings, extracted from either configuration shape.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub layout: DisplayLayout,
    pub show_social_links: bool,
    pub show_bio: bool,
    pub show_position: bool,
    pub show_department: bool,
    pub show_url: bool,
    pub custom_title: Option<String>,
    pub grid_columns: u8,
    pub max_items: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: DisplayLayout::Default,
            show_social_links: true,
            show_bio: true,
            show_position: true,
            show_department: true,
            show_url: true,
            custom_title: None,
            grid_columns: GRID_COLUMNS_DEFAULT,
            max_items: None,
        }
    }
}

impl From<&TeamMemberBlock> for RenderOptions {
    fn from(block: &TeamMemberBlock) -> Self {
        Self {
            layout: block.display_layout,
            show_social_links: block.show_social_links,
            show_bio: block.show_bio,
            show_position: block.show_position,
            show_department: block.show_department,
            show_url: block.show_url,
            custom_title: block.custom_title.clone(),
            grid_columns: GRID_COLUMNS_DEFAULT,
            max_items: None,
        }
    }
}

impl From<&TeamMembersReference> for RenderOptions {
    fn from(reference: &TeamMembersReference) -> Self {
        Self {
            layout: reference.display_layout,
            show_social_links: reference.show_social_links,
            show_bio: reference.show_bio,
            show_position: reference.show_position,
            show_department: reference.show_department,
            show_url: reference.show_url,
            custom_title: None,
            grid_columns: reference.grid_columns,
            max_items: reference.max_items,
        }
    }
}

/// Rendered photo slot: either a resolved image URL or a placeholder
/// carrying the first character of the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PhotoRender {
    Image {
        url: String,
        alt: String,
    },
    Placeholder {
        initial: String,
    },
}

/// A rendered social link. `newTab` marks the default open-in-new-context
/// behavior; consumers supplying their own click handling may ignore it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkRender {
    pub platform: String,
    pub url: String,
    pub label: String,
    pub icon: String,
    pub new_tab: bool,
}

/// Display-ready projection of a single member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRender {
    /// Stable key for re-rendering collections.
    pub id: String,
    pub layout: Layout,
    pub display_name: String,
    pub photo: PhotoRender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLinkRender>,
}

/// Display-ready projection of a member collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRender {
    /// Container layout: the placement layout when concrete, else card.
    /// Individual members resolve their own layout (see [`resolve_layout`]).
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u8>,
    pub members: Vec<MemberRender>,
}

/// Resolve the effective layout for one member.
///
/// A concrete placement layout always wins. The `default` sentinel defers to
/// the member's own stored layout, falling back to card only when that is
/// absent too. Collections apply this per member, so a placement set to
/// `default` can mix layouts; this is the deliberate resolution of the two
/// policies the legacy frontend carried.
pub fn resolve_layout(requested: DisplayLayout, entity_layout: Option<Layout>) -> Layout {
    match requested.concrete() {
        Some(layout) => layout,
        None => entity_layout.unwrap_or(Layout::Card),
    }
}

/// Resolve the displayed name: a non-empty custom title overrides the
/// member's own name.
pub fn resolve_display_name(member_name: &str, custom_title: Option<&str>) -> String {
    match custom_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => member_name.to_string(),
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn render_photo(member: &TeamMember, display_name: &str, images: &ImageConfig) -> PhotoRender {
    if let Some(photo) = &member.photo {
        if let Some(url) = build_image_url(images, &photo.asset_ref) {
            let alt = photo
                .alt
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| display_name.to_string());
            return PhotoRender::Image { url, alt };
        }
    }

    let initial = display_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    PhotoRender::Placeholder { initial }
}

/// Render a single member with the given placement settings.
///
/// Returns `None` for a member that must not appear: inactive (visibility is
/// filtered at the presentation boundary regardless of how the member was
/// fetched) or with a blank name (malformed input, silent no-render).
pub fn render_member(
    member: &TeamMember,
    options: &RenderOptions,
    images: &ImageConfig,
) -> Option<MemberRender> {
    if !member.is_active {
        return None;
    }
    if member.name.trim().is_empty() {
        return None;
    }

    let display_name = resolve_display_name(&member.name, options.custom_title.as_deref());
    let layout = resolve_layout(options.layout, Some(member.layout));
    let photo = render_photo(member, &display_name, images);

    // Each toggle is necessary but not sufficient: an empty field renders
    // nothing even when its toggle is on.
    let position = options
        .show_position
        .then(|| non_empty(member.position.as_ref()))
        .flatten();
    let department = options
        .show_department
        .then(|| non_empty(member.department.as_ref()))
        .flatten();
    let bio = options
        .show_bio
        .then(|| non_empty(member.bio.as_ref()))
        .flatten();
    let url = options
        .show_url
        .then(|| non_empty(member.url.as_ref()))
        .flatten();

    let social_links = if options.show_social_links {
        member
            .social_links
            .iter()
            .map(|link| SocialLinkRender {
                platform: link.platform.as_str().to_string(),
                url: link.url.clone(),
                label: link
                    .label
                    .clone()
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| link.platform.as_str().to_string()),
                icon: link.platform.icon().to_string(),
                new_tab: true,
            })
            .collect()
    } else {
        Vec::new()
    };

    Some(MemberRender {
        id: member.id.clone(),
        layout,
        display_name,
        photo,
        position,
        department,
        bio,
        url,
        social_links,
    })
}

/// Render a collection of members with the given placement settings.
///
/// Inactive members are filtered first, then the optional `maxItems` cap is
/// applied preserving order, then each survivor is rendered. Returns `None`
/// when nothing renders.
pub fn render_members(
    members: &[TeamMember],
    options: &RenderOptions,
    images: &ImageConfig,
) -> Option<CollectionRender> {
    if members.is_empty() {
        return None;
    }

    let rendered: Vec<MemberRender> = members
        .iter()
        .filter(|m| m.is_active)
        .take(options.max_items.unwrap_or(usize::MAX))
        .filter_map(|m| render_member(m, options, images))
        .collect();

    if rendered.is_empty() {
        return None;
    }

    let container_layout = options.layout.concrete().unwrap_or(Layout::Card);
    let grid_columns = (container_layout == Layout::Grid).then_some(options.grid_columns);

    Some(CollectionRender {
        layout: container_layout,
        grid_columns,
        members: rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SocialLink, SocialPlatform};

    fn images() -> ImageConfig {
        ImageConfig {
            project_id: "proj".to_string(),
            dataset: "test".to_string(),
            use_cdn: true,
            cdn_base_url: "https://cdn.example.com/images".to_string(),
            origin_base_url: "https://assets.example.com/images".to_string(),
        }
    }

    fn member(id: &str, name: &str, layout: Layout) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            photo: None,
            position: None,
            department: None,
            bio: None,
            url: None,
            social_links: vec![],
            layout,
            is_active: true,
            published: true,
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            version: 1,
        }
    }

    #[test]
    fn test_layout_resolution() {
        // Concrete placement layout always wins.
        assert_eq!(
            resolve_layout(DisplayLayout::Grid, Some(Layout::Minimal)),
            Layout::Grid
        );
        // Default defers to the member's own layout.
        assert_eq!(
            resolve_layout(DisplayLayout::Default, Some(Layout::Minimal)),
            Layout::Minimal
        );
        // Both absent falls back to card.
        assert_eq!(resolve_layout(DisplayLayout::Default, None), Layout::Card);
    }

    #[test]
    fn test_display_name_resolution() {
        assert_eq!(resolve_display_name("Ada", None), "Ada");
        assert_eq!(resolve_display_name("Ada", Some("A. Lovelace")), "A. Lovelace");
        // Empty or whitespace overrides do not apply.
        assert_eq!(resolve_display_name("Ada", Some("")), "Ada");
        assert_eq!(resolve_display_name("Ada", Some("   ")), "Ada");
    }

    #[test]
    fn test_inactive_member_not_rendered() {
        let mut m = member("m1", "Ada", Layout::Card);
        m.is_active = false;
        assert!(render_member(&m, &RenderOptions::default(), &images()).is_none());
    }

    #[test]
    fn test_blank_name_not_rendered() {
        let m = member("m1", "   ", Layout::Card);
        assert!(render_member(&m, &RenderOptions::default(), &images()).is_none());
    }

    #[test]
    fn test_photo_placeholder_initial() {
        let m = member("m1", "ada", Layout::Card);
        let rendered = render_member(&m, &RenderOptions::default(), &images()).unwrap();
        assert_eq!(
            rendered.photo,
            PhotoRender::Placeholder {
                initial: "A".to_string()
            }
        );
    }

    #[test]
    fn test_photo_url_and_alt_fallback() {
        let mut m = member("m1", "Ada", Layout::Card);
        m.photo = Some(crate::models::Photo {
            asset_ref: "image-abc-jpg".to_string(),
            alt: None,
            hotspot: None,
        });
        let rendered = render_member(&m, &RenderOptions::default(), &images()).unwrap();
        assert_eq!(
            rendered.photo,
            PhotoRender::Image {
                url: "https://cdn.example.com/images/proj/test/abc.jpg".to_string(),
                alt: "Ada".to_string(),
            }
        );
    }

    #[test]
    fn test_toggle_off_hides_field_with_data() {
        let mut m = member("m1", "Ada", Layout::Card);
        m.position = Some("Engineer".to_string());
        m.department = Some("R&D".to_string());
        m.bio = Some("Pioneer".to_string());
        m.url = Some("https://ada.example.com".to_string());
        m.social_links = vec![SocialLink {
            platform: SocialPlatform::Github,
            url: "https://github.com/ada".to_string(),
            label: None,
        }];

        let options = RenderOptions {
            show_social_links: false,
            show_bio: false,
            show_position: false,
            show_department: false,
            show_url: false,
            ..RenderOptions::default()
        };
        let rendered = render_member(&m, &options, &images()).unwrap();
        assert!(rendered.position.is_none());
        assert!(rendered.department.is_none());
        assert!(rendered.bio.is_none());
        assert!(rendered.url.is_none());
        assert!(rendered.social_links.is_empty());
    }

    #[test]
    fn test_toggle_on_with_empty_field_renders_nothing() {
        let mut m = member("m1", "Ada", Layout::Card);
        m.position = Some("   ".to_string());
        let rendered = render_member(&m, &RenderOptions::default(), &images()).unwrap();
        assert!(rendered.position.is_none());
    }

    #[test]
    fn test_duplicate_social_platforms_preserved_in_order() {
        let mut m = member("m1", "Ada", Layout::Card);
        m.social_links = vec![
            SocialLink {
                platform: SocialPlatform::Github,
                url: "https://github.com/ada".to_string(),
                label: None,
            },
            SocialLink {
                platform: SocialPlatform::Github,
                url: "https://github.com/lovelace".to_string(),
                label: Some("alt account".to_string()),
            },
        ];
        let rendered = render_member(&m, &RenderOptions::default(), &images()).unwrap();
        assert_eq!(rendered.social_links.len(), 2);
        assert_eq!(rendered.social_links[0].label, "github");
        assert_eq!(rendered.social_links[1].label, "alt account");
        assert_eq!(rendered.social_links[1].url, "https://github.com/lovelace");
        assert!(rendered.social_links[0].new_tab);
    }

    #[test]
    fn test_collection_per_member_layout() {
        let members = vec![
            member("m1", "Ada", Layout::List),
            member("m2", "Grace", Layout::Minimal),
        ];
        let rendered = render_members(&members, &RenderOptions::default(), &images()).unwrap();
        assert_eq!(rendered.layout, Layout::Card);
        assert_eq!(rendered.members[0].layout, Layout::List);
        assert_eq!(rendered.members[1].layout, Layout::Minimal);
    }

    #[test]
    fn test_collection_concrete_layout_uniform() {
        let members = vec![
            member("m1", "Ada", Layout::List),
            member("m2", "Grace", Layout::Minimal),
        ];
        let options = RenderOptions {
            layout: DisplayLayout::Grid,
            grid_columns: 4,
            ..RenderOptions::default()
        };
        let rendered = render_members(&members, &options, &images()).unwrap();
        assert_eq!(rendered.layout, Layout::Grid);
        assert_eq!(rendered.grid_columns, Some(4));
        assert!(rendered.members.iter().all(|m| m.layout == Layout::Grid));
    }

    #[test]
    fn test_grid_columns_only_for_grid() {
        let members = vec![member("m1", "Ada", Layout::Card)];
        let options = RenderOptions {
            layout: DisplayLayout::List,
            grid_columns: 4,
            ..RenderOptions::default()
        };
        let rendered = render_members(&members, &options, &images()).unwrap();
        assert_eq!(rendered.grid_columns, None);
    }

    #[test]
    fn test_max_items_truncates_in_order() {
        let members: Vec<TeamMember> = (1..=5)
            .map(|i| member(&format!("m{}", i), &format!("Member {}", i), Layout::Card))
            .collect();

        let capped = RenderOptions {
            max_items: Some(2),
            ..RenderOptions::default()
        };
        let rendered = render_members(&members, &capped, &images()).unwrap();
        assert_eq!(rendered.members.len(), 2);
        assert_eq!(rendered.members[0].id, "m1");
        assert_eq!(rendered.members[1].id, "m2");

        let uncapped = render_members(&members, &RenderOptions::default(), &images()).unwrap();
        assert_eq!(uncapped.members.len(), 5);
    }

    #[test]
    fn test_empty_collection_renders_nothing() {
        assert!(render_members(&[], &RenderOptions::default(), &images()).is_none());

        let mut inactive = member("m1", "Ada", Layout::Card);
        inactive.is_active = false;
        assert!(
            render_members(&[inactive], &RenderOptions::default(), &images()).is_none()
        );
    }

    #[test]
    fn test_end_to_end_ada_scenario() {
        let mut ada = member("m1", "Ada", Layout::List);
        ada.position = Some("Engineer".to_string());
        ada.social_links = vec![SocialLink {
            platform: SocialPlatform::Github,
            url: "https://github.com/ada".to_string(),
            label: None,
        }];

        let rendered = render_member(&ada, &RenderOptions::default(), &images()).unwrap();
        assert_eq!(rendered.layout, Layout::List);
        assert_eq!(rendered.display_name, "Ada");
        assert_eq!(rendered.position.as_deref(), Some("Engineer"));
        assert_eq!(rendered.social_links.len(), 1);
        assert_eq!(rendered.social_links[0].label, "github");

        let with_title = RenderOptions {
            custom_title: Some("A. Lovelace".to_string()),
            ..RenderOptions::default()
        };
        let renamed = render_member(&ada, &with_title, &images()).unwrap();
        assert_eq!(renamed.display_name, "A. Lovelace");
        assert_eq!(renamed.layout, Layout::List);
        assert_eq!(renamed.position.as_deref(), Some("Engineer"));
    }
}
