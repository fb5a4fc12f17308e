//! Role presets offered by the editor.
//!
//! Roles are an open vocabulary. Presets describe the roles the bundled
//! stylesheet knows about; any other non-empty role is equally valid and
//! simply renders with the base block styling.

/// Which block variant a preset is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Text,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePreset {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: PresetKind,
}

const fn text(id: &'static str, label: &'static str) -> RolePreset {
    RolePreset {
        id,
        label,
        kind: PresetKind::Text,
    }
}

const fn image(id: &'static str, label: &'static str) -> RolePreset {
    RolePreset {
        id,
        label,
        kind: PresetKind::Image,
    }
}

pub const PRESETS: &[RolePreset] = &[
    text("haggadah_main_hebrew", "Haggadah - Main Hebrew (HE)"),
    text("haggadah_translation_en", "Haggadah - Translation (EN)"),
    text("commentary_en", "Commentary (EN)"),
    text("commentary_he", "Commentary (HE)"),
    text("footnote_en", "Footnote (EN)"),
    text("footnote_he", "Footnote (HE)"),
    text("divrei_torah_callout", "Divrei Torah Callout"),
    image("archaeology_fig", "Archaeology Figure"),
    image("photo_illustration", "Photo Illustration"),
];

pub fn preset(role: &str) -> Option<&'static RolePreset> {
    PRESETS.iter().find(|p| p.id == role)
}

pub fn presets_for(kind: PresetKind) -> impl Iterator<Item = &'static RolePreset> {
    PRESETS.iter().filter(move |p| p.kind == kind)
}
