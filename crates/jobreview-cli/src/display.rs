//! Plain-text rendering of profiles and the approval report.

use std::fmt::Write as _;

use jobreview_core::{
    Attribute, DescriptionField, EditSession, FormState, REPORT_COLUMNS, ReportLine, ReviewerRole,
};

const LABEL_WIDTH: usize = 26;

// ── Profile card ──

/// Render the selected profile as a vertical card.
///
/// Fields open for editing show the Edit Buffer value and are marked `*`;
/// everything else shows the saved snapshot.
pub fn profile_card(editor: &EditSession) -> String {
    let Some(name) = editor.selected() else {
        return "No profile selected.\n".to_string();
    };
    let form = editor.form();
    let mut out = String::new();

    let mode = if editor.is_main_editable() {
        " [editing]"
    } else {
        ""
    };
    let _ = writeln!(out, "=== {name}{mode} ===");
    out.push('\n');

    out.push_str("Reviewers\n");
    for role in ReviewerRole::ALL {
        let value = if editor.is_main_editable() {
            editor.buffer().reviewer(role)
        } else {
            form.reviewer(role)
        };
        push_row(&mut out, role.label(), value, false);
    }
    out.push('\n');

    out.push_str("Organisation\n");
    for attr in Attribute::ALL {
        let value = if editor.is_main_editable() {
            editor.buffer().attribute(attr)
        } else {
            form.attribute(attr)
        };
        push_row(&mut out, attr.label(), value, false);
    }
    out.push('\n');

    out.push_str("Description\n");
    for field in DescriptionField::ALL {
        let open = editor.is_section_editable(field);
        let source: &FormState = if open { editor.buffer() } else { form };
        push_row(&mut out, field.label(), source.get(field), open);
    }
    out
}

/// The reviewer's card: [`profile_card`] plus the approve control, shown
/// only when the signed-in user is the selected profile's primary reviewer.
pub fn reviewer_card(editor: &EditSession, can_approve: bool) -> String {
    let mut out = profile_card(editor);
    if can_approve && editor.selected().is_some() {
        out.push('\n');
        out.push_str("[approve] mark this profile approved\n");
    }
    out
}

fn push_row(out: &mut String, label: &str, value: &str, open: bool) {
    let marker = if open { '*' } else { ' ' };
    let value = if value.is_empty() { "-" } else { value };
    let mut lines = value.lines();
    let first = lines.next().unwrap_or("-");
    let _ = writeln!(out, " {marker}{label:<LABEL_WIDTH$} {first}");
    for rest in lines {
        let _ = writeln!(out, "  {:<LABEL_WIDTH$} {rest}", "");
    }
}

// ── Approval report ──

/// Render report lines as an aligned text table.
pub fn report_table(lines: &[ReportLine]) -> String {
    if lines.is_empty() {
        return "No approval data.\n".to_string();
    }
    let mut widths = REPORT_COLUMNS.map(|h| h.chars().count());
    for line in lines {
        for (w, cell) in widths.iter_mut().zip(&line.cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_table_row(&mut out, &REPORT_COLUMNS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for line in lines {
        push_table_row(&mut out, &line.cells, &widths);
    }
    out
}

fn push_table_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}
