mod common;

use common::{filler_project, sample_cv};
use folio_core::cv::table::table_rows;
use folio_core::cv::{
    parse_delimited_table, render_delimited_table, render_document, render_latex,
    render_plain_text, DocumentFormat, PdfOptions,
};
use folio_core::model::{Language, Localized, Project, ProjectCategory};

#[test]
fn delimited_table_round_trips_every_field() {
    let mut cv = sample_cv();
    // Fields that need quoting: delimiter, quotes, line breaks, a lone empty cell.
    cv.projects.push(Project {
        id: 3,
        title: Localized::native("Edge, \"quoted\" case"),
        description: Localized::native("first line\nsecond line\r\nthird"),
        tech: "".to_string(),
        category: ProjectCategory::Data,
        link: "https://example.com".to_string(),
        image: None,
    });
    cv.skills.technical.push(String::new());

    for lang in Language::ALL {
        let rendered = render_delimited_table(&cv.profile, &cv.skills, &cv.projects, lang);
        let parsed = parse_delimited_table(&rendered);
        let expected = table_rows(&cv.profile, &cv.skills, &cv.projects, lang);
        assert_eq!(parsed, expected, "round trip failed for {lang}");
    }
}

#[test]
fn delimited_table_has_localized_headers_and_sections() {
    let cv = sample_cv();
    let pt = parse_delimited_table(&render_delimited_table(
        &cv.profile,
        &cv.skills,
        &cv.projects,
        Language::Pt,
    ));
    assert_eq!(pt[0], vec!["Nome", "Cargo", "Email", "Telefone", "LinkedIn", "GitHub"]);
    assert_eq!(pt[1][1], "Desenvolvedora Full Stack");
    assert!(pt[2].is_empty(), "blank separator after identity row");
    assert_eq!(pt[3], vec!["SECAO", "ITEM", "DETALHE"]);
    assert_eq!(pt[4], vec!["Skills", "TypeScript", "Técnico"]);

    let en = parse_delimited_table(&render_delimited_table(
        &cv.profile,
        &cv.skills,
        &cv.projects,
        Language::En,
    ));
    assert_eq!(en[0][1], "Role");
    assert_eq!(en[1][1], "Full Stack Developer");
    assert!(en.contains(&vec![
        "Languages".to_string(),
        "English".to_string(),
        "Advanced".to_string()
    ]));
    assert!(en.contains(&vec![
        "Skills".to_string(),
        "SQL, NoSQL".to_string(),
        "Technical".to_string()
    ]));
    let project_header = en
        .iter()
        .position(|row| row == &vec!["PROJECT", "TECH", "DESCRIPTION"])
        .expect("project header present");
    assert_eq!(en[project_header + 1][0], "Sales Dashboard");
    assert_eq!(en[project_header + 1][1], "Next.js, Tailwind");
    // No English title: native title verbatim.
    assert_eq!(en[project_header + 2][0], "Classificador de Imagens");
}

#[test]
fn every_text_document_contains_resolved_localized_values() {
    let cv = sample_cv();
    for lang in Language::ALL {
        let documents = [
            render_delimited_table(&cv.profile, &cv.skills, &cv.projects, lang),
            render_plain_text(&cv.profile, &cv.skills, &cv.projects, lang),
            render_latex(&cv.profile, &cv.skills, &cv.projects, lang),
        ];
        let expected = [
            cv.profile.role.resolve(lang),
            cv.projects[0].title.resolve(lang),
            cv.projects[1].title.resolve(lang),
        ];
        for doc in &documents {
            for value in expected {
                assert!(!value.is_empty());
                assert!(doc.contains(value), "{lang} document misses {value:?}");
            }
        }
    }
}

#[test]
fn plain_text_falls_back_to_native_role() {
    let mut cv = sample_cv();
    cv.profile.role = Localized::native("Engenheira de Dados");
    let project = filler_project(7, 1);

    let text = render_plain_text(&cv.profile, &cv.skills, &[project], Language::En);

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Andressa Silva"));
    assert_eq!(lines.next(), Some("Engenheira de Dados"));
    assert!(text.contains("- Project 7 (Rust): lorem ipsum dolor sit amet"));
}

#[test]
fn plain_text_sections_come_in_fixed_order() {
    let cv = sample_cv();
    let pt = render_plain_text(&cv.profile, &cv.skills, &cv.projects, Language::Pt);
    let positions: Vec<usize> = ["CONTATO", "RESUMO", "HABILIDADES", "IDIOMAS", "PROJETOS"]
        .iter()
        .map(|h| pt.find(h).unwrap_or_else(|| panic!("missing heading {h}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "headings out of order");
    assert!(pt.contains("TypeScript, React, Python, SQL, NoSQL"));
    assert!(pt.contains("English: Avançado"));
    assert!(pt.contains("- Painel de Vendas (Next.js, Tailwind): Painel interativo"));

    let en = render_plain_text(&cv.profile, &cv.skills, &cv.projects, Language::En);
    for heading in ["CONTACT", "SUMMARY", "SKILLS", "LANGUAGES", "PROJECTS"] {
        assert!(en.contains(heading), "missing heading {heading}");
    }
}

#[test]
fn latex_escapes_free_text() {
    let mut cv = sample_cv();
    cv.profile.summary = Localized::native("100% focused on R&D_ops #1 {always}");
    cv.projects[0].title = Localized::native("Costs in $ [draft]");

    let tex = render_latex(&cv.profile, &cv.skills, &cv.projects, Language::Pt);

    assert!(tex.starts_with("\\documentclass{article}"));
    assert!(tex.contains("100\\% focused on R\\&D\\_ops \\#1 \\{always\\}"));
    assert!(tex.contains("\\item[{Costs in \\$ [draft]}]"));
    assert!(tex.contains("\\section*{Resumo}"));
    assert!(tex.trim_end().ends_with("\\end{document}"));
    let summary = tex.find("\\section*{Resumo}").unwrap();
    let skills = tex.find("\\section*{Habilidades}").unwrap();
    let projects = tex.find("\\section*{Projetos}").unwrap();
    assert!(summary < skills && skills < projects);
}

#[test]
fn render_document_dispatches_per_format() {
    let cv = sample_cv();
    let options = PdfOptions::default();
    for format in DocumentFormat::ALL {
        let doc = render_document(&cv, format, Language::En, &options).expect("renders");
        assert_eq!(doc.format, format);
        assert_eq!(doc.language, Language::En);
        assert!(!doc.bytes.is_empty());
    }
    let csv = render_document(&cv, DocumentFormat::Csv, Language::Pt, &options).unwrap();
    assert!(String::from_utf8(csv.bytes).unwrap().starts_with("Nome,Cargo"));
    assert_eq!(DocumentFormat::Csv.media_type(), "text/csv");
    assert_eq!(DocumentFormat::Pdf.media_type(), "application/pdf");
}

#[test]
fn document_format_tags_parse_strictly() {
    assert_eq!("tex".parse::<DocumentFormat>(), Ok(DocumentFormat::Latex));
    assert_eq!(" PDF ".parse::<DocumentFormat>(), Ok(DocumentFormat::Pdf));
    assert_eq!("txt".parse::<DocumentFormat>(), Ok(DocumentFormat::Text));
    let err = "docx".parse::<DocumentFormat>().expect_err("unknown tag is rejected");
    assert!(err.contains("docx"), "unexpected error: {err}");
}
