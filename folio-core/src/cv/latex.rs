use super::Headings;
use crate::model::{Language, Profile, Project, SkillSet};
use std::fmt::Write;

/// LaTeX source of the CV. Free text always goes through [`escape_latex`].
pub fn render_latex(
    profile: &Profile,
    skills: &SkillSet,
    projects: &[Project],
    lang: Language,
) -> String {
    let h = Headings::for_language(lang);
    let phone_label = if lang.is_native() { "Telefone" } else { "Phone" };
    let e = escape_latex;
    let mut out = String::new();

    out.push_str("\\documentclass{article}\n");
    out.push_str("\\usepackage[utf8]{inputenc}\n");
    out.push_str("\\usepackage{hyperref}\n");
    out.push_str("\\begin{document}\n\n");
    let _ = writeln!(
        out,
        "\\title{{{} - {}}}",
        e(&profile.name),
        e(profile.role.resolve(lang))
    );
    out.push_str("\\date{\\today}\n");
    out.push_str("\\maketitle\n\n");

    let _ = writeln!(out, "\\section*{{{}}}", h.contact);
    out.push_str("\\begin{itemize}\n");
    let _ = writeln!(out, "    \\item Email: {}", e(&profile.contact.email));
    let _ = writeln!(out, "    \\item {phone_label}: {}", e(&profile.contact.phone));
    let _ = writeln!(out, "    \\item LinkedIn: {}", e(&profile.social.linkedin));
    let _ = writeln!(out, "    \\item GitHub: {}", e(&profile.social.github));
    out.push_str("\\end{itemize}\n\n");

    let _ = writeln!(out, "\\section*{{{}}}", h.summary);
    let _ = writeln!(out, "{}\n", e(profile.summary.resolve(lang)));

    let _ = writeln!(out, "\\section*{{{}}}", h.skills);
    let skill_list: Vec<String> = skills.technical.iter().map(|s| e(s)).collect();
    let _ = writeln!(out, "{}\n", skill_list.join(", "));

    let _ = writeln!(out, "\\section*{{{}}}", h.projects);
    out.push_str("\\begin{description}\n");
    for project in projects {
        // Braces keep a `]` in the title from closing the optional argument.
        let _ = writeln!(
            out,
            "    \\item[{{{}}}] ({}) {}",
            e(project.title.resolve(lang)),
            e(&project.tech),
            e(project.description.resolve(lang))
        );
    }
    out.push_str("\\end{description}\n\n");
    out.push_str("\\end{document}\n");
    out
}

/// Escapes the LaTeX special characters `\ & % $ # _ { } ~ ^`.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_latex;

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(escape_latex("50% & $5 #1 a_b"), "50\\% \\& \\$5 \\#1 a\\_b");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(
            escape_latex("a\\b~c^d"),
            "a\\textbackslash{}b\\textasciitilde{}c\\textasciicircum{}d"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_latex("Análise de Dados (Python)"), "Análise de Dados (Python)");
    }
}
