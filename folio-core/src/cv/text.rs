use super::Headings;
use crate::model::{Language, Profile, Project, SkillSet};
use std::fmt::Write;

/// Plain-text résumé: name and role, then contact, summary, skills, languages
/// and projects, in that order.
pub fn render_plain_text(
    profile: &Profile,
    skills: &SkillSet,
    projects: &[Project],
    lang: Language,
) -> String {
    let h = Headings::for_language(lang);
    let phone_label = if lang.is_native() { "Telefone" } else { "Phone" };
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", profile.name);
    let _ = writeln!(out, "{}", profile.role.resolve(lang));

    section(&mut out, h.contact);
    let _ = writeln!(out, "Email: {}", profile.contact.email);
    let _ = writeln!(out, "{phone_label}: {}", profile.contact.phone);
    let _ = writeln!(out, "LinkedIn: {}", profile.social.linkedin);
    let _ = writeln!(out, "GitHub: {}", profile.social.github);

    section(&mut out, h.summary);
    let _ = writeln!(out, "{}", profile.summary.resolve(lang));

    section(&mut out, h.skills);
    let _ = writeln!(out, "{}", skills.technical.join(", "));

    section(&mut out, h.languages);
    for spoken in &skills.languages {
        let _ = writeln!(out, "{}: {}", spoken.name, spoken.level.resolve(lang));
    }

    section(&mut out, h.projects);
    for project in projects {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            project.title.resolve(lang),
            project.tech,
            project.description.resolve(lang)
        );
    }
    out
}

fn section(out: &mut String, heading: &str) {
    out.push('\n');
    out.push_str(&heading.to_uppercase());
    out.push('\n');
}
