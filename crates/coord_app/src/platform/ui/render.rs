use coord_core::{AppViewModel, RowView};

/// Renders the page as plain text lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("Location: {}", view.input)];

    if view.loading {
        lines.push("Loading...".to_string());
    }
    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }

    let Some(result) = &view.result else {
        return lines;
    };

    lines.push(format!("Lat, Lng: {}", result.lat_lng));
    push_section(&mut lines, "Navigation", &result.map_links);
    push_section(&mut lines, "Codes", &result.codes);
    push_section(&mut lines, "Other links", &result.extra_links);
    lines
}

fn push_section(lines: &mut Vec<String>, title: &str, rows: &[RowView]) {
    if rows.is_empty() {
        return;
    }
    lines.push(format!("{title}:"));
    lines.extend(rows.iter().map(render_row));
}

fn render_row(row: &RowView) -> String {
    let value = row.value.as_deref().unwrap_or("-");
    match &row.href {
        Some(href) if href != value => format!("  {}: {} <{}>", row.label, value, href),
        Some(href) => format!("  {}: <{}>", row.label, href),
        None => format!("  {}: {}", row.label, value),
    }
}
