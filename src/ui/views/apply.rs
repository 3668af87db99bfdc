//! Apply command UI views

use croptree::apply::ApplyReport;
use croptree::config::Preferences;
use croptree::models::{Inventory, ViewRecord};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Title line plus the source view and the effective preferences
pub fn render_apply_header(
    source: &ViewRecord,
    prefs: &Preferences,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let action = if dry_run {
        "Copy Crop Region (Dry Run)"
    } else {
        "Copy Crop Region"
    };
    let mut out = format!(
        "{} {}\n",
        Icon::Crop.colored(supports_color, supports_unicode),
        ColoredText::plain(action).bold().render(supports_color)
    );
    out.push_str(&format!(
        "  Source: {} ({}, id {})\n",
        source.name, source.kind, source.id
    ));
    out.push_str(&format!(
        "  Copy crop visibility: {}\n  Copy 3D section box: {}\n",
        on_off(prefs.copy_crop_visibility),
        on_off(prefs.copy_section_box)
    ));
    out
}

/// Views about to receive the crop region
pub fn render_apply_preview(
    inventory: &Inventory,
    targets: &[croptree::ViewId],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = ColoredText::warning(format!("Views to be updated ({}):", targets.len()))
        .bold()
        .render(supports_color);
    out.push('\n');
    let arrow = Icon::Arrow.colored(supports_color, supports_unicode);
    for id in targets {
        let name = inventory
            .view(*id)
            .map(|v| v.name.as_str())
            .unwrap_or("<missing>");
        out.push_str(&format!("  {} {}\n", arrow, name));
    }
    out
}

/// Applied and failed views
pub fn render_apply_result(
    inventory: &Inventory,
    report: &ApplyReport,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let name = |id: &croptree::ViewId| {
        inventory
            .view(*id)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| format!("view {}", id))
    };

    let mut out = String::new();
    let verb = if dry_run { "Would update" } else { "Updated" };
    let icon = if report.is_clean() {
        Icon::Success
    } else {
        Icon::Warning
    };
    out.push_str(&format!(
        "{} {}\n",
        icon.colored(supports_color, supports_unicode),
        ColoredText::plain(format!(
            "{} {} {}",
            verb,
            report.applied.len(),
            if report.applied.len() == 1 { "view" } else { "views" }
        ))
        .bold()
        .render(supports_color)
    ));

    for (id, failure) in &report.failed {
        out.push_str(&format!(
            "  {} {}: {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            name(id),
            ColoredText::error(failure.to_string()).render(supports_color)
        ));
    }
    out
}
