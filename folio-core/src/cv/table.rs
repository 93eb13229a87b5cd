//! Comma-delimited CV table.
//!
//! Quoting follows RFC 4180: a field holding the delimiter, a quote or a line
//! break is wrapped in quotes and inner quotes are doubled. A lone empty field
//! is quoted too so it does not read back as a blank separator line.
//! [`parse_delimited_table`] is the matching reader.

use crate::model::{Language, Profile, Project, SkillSet};
use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// The table as rows of fields. Blank separator lines are empty rows.
pub fn table_rows(
    profile: &Profile,
    skills: &SkillSet,
    projects: &[Project],
    lang: Language,
) -> Vec<Vec<String>> {
    let pt = lang.is_native();
    let mut rows: Vec<Vec<String>> = Vec::new();

    let header: &[&str] = if pt {
        &["Nome", "Cargo", "Email", "Telefone", "LinkedIn", "GitHub"]
    } else {
        &["Name", "Role", "Email", "Phone", "LinkedIn", "GitHub"]
    };
    rows.push(owned(header));
    rows.push(vec![
        profile.name.clone(),
        profile.role.resolve(lang).to_string(),
        profile.contact.email.clone(),
        profile.contact.phone.clone(),
        profile.social.linkedin.clone(),
        profile.social.github.clone(),
    ]);
    rows.push(Vec::new());

    rows.push(owned(if pt {
        &["SECAO", "ITEM", "DETALHE"]
    } else {
        &["SECTION", "ITEM", "DETAIL"]
    }));
    let technical = if pt { "Técnico" } else { "Technical" };
    for skill in &skills.technical {
        rows.push(vec!["Skills".into(), skill.clone(), technical.into()]);
    }
    for spoken in &skills.languages {
        rows.push(vec![
            "Languages".into(),
            spoken.name.clone(),
            spoken.level.resolve(lang).to_string(),
        ]);
    }
    rows.push(Vec::new());

    rows.push(owned(if pt {
        &["PROJETO", "TECNOLOGIA", "DESCRICAO"]
    } else {
        &["PROJECT", "TECH", "DESCRIPTION"]
    }));
    for project in projects {
        rows.push(vec![
            project.title.resolve(lang).to_string(),
            project.tech.clone(),
            project.description.resolve(lang).to_string(),
        ]);
    }
    rows
}

pub fn render_delimited_table(
    profile: &Profile,
    skills: &SkillSet,
    projects: &[Project],
    lang: Language,
) -> String {
    let rows = table_rows(profile, skills, projects, lang);
    debug!(rows = rows.len(), %lang, "Rendering delimited table");
    let mut out = String::new();
    for row in &rows {
        write_row(&mut out, row);
        out.push('\n');
    }
    out
}

fn write_row(out: &mut String, row: &[String]) {
    let lone_field = row.len() == 1;
    for (i, field) in row.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        if needs_quotes(field) || (lone_field && field.is_empty()) {
            out.push(QUOTE);
            for ch in field.chars() {
                if ch == QUOTE {
                    out.push(QUOTE);
                }
                out.push(ch);
            }
            out.push(QUOTE);
        } else {
            out.push_str(field);
        }
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains([DELIMITER, QUOTE, '\n', '\r'])
}

/// Splits a delimited table back into rows of unescaped fields.
///
/// Accepts `\n` and `\r\n` row endings. An empty line yields an empty row.
pub fn parse_delimited_table(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_has_field = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            QUOTE => {
                in_quotes = true;
                row_has_field = true;
            }
            DELIMITER => {
                row.push(std::mem::take(&mut field));
                row_has_field = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if row_has_field {
                    row.push(std::mem::take(&mut field));
                }
                rows.push(std::mem::take(&mut row));
                row_has_field = false;
            }
            _ => {
                field.push(ch);
                row_has_field = true;
            }
        }
    }
    if row_has_field {
        row.push(field);
        rows.push(row);
    }
    rows
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}
