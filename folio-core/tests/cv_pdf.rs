mod common;

use common::{filler_project, sample_cv};
use folio_core::cv::pdf::{
    layout_cv, text_width, Element, CONTENT_MARGIN, FLOW_BOTTOM, PAGE_WIDTH, SIDEBAR_WIDTH,
};
use folio_core::cv::{render_pdf, PdfOptions};
use folio_core::model::{CvData, Language};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn renders_pdf_without_image() {
    let cv = sample_cv();
    let bytes = render_pdf(
        &cv.profile,
        &cv.skills,
        &cv.projects,
        Language::Pt,
        &PdfOptions::default(),
    )
    .expect("pdf renders");
    assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
}

#[test]
fn missing_image_is_skipped() {
    let cv = sample_cv();
    let options = PdfOptions {
        image_path: Some("/definitely/not/here/profile.jpg".into()),
        ..PdfOptions::default()
    };
    let bytes = render_pdf(&cv.profile, &cv.skills, &cv.projects, Language::En, &options)
        .expect("missing image does not fail the render");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn undecodable_image_is_skipped() {
    let cv = sample_cv();
    let mut garbage = NamedTempFile::new().expect("temp file");
    garbage
        .write_all(b"this is not an image at all")
        .expect("write garbage");
    let options = PdfOptions {
        image_path: Some(garbage.path().to_path_buf()),
        ..PdfOptions::default()
    };
    let bytes = render_pdf(&cv.profile, &cv.skills, &cv.projects, Language::En, &options)
        .expect("garbage image does not fail the render");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn long_content_paginates_within_flow_bottom() {
    let cv = sample_cv();
    let projects: Vec<_> = (1..=8).map(|id| filler_project(id, 40)).collect();

    let layout = layout_cv(&cv.profile, &cv.skills, &projects, Language::En, 8, false);

    assert!(layout.pages.len() > 1, "expected overflow onto a second page");
    assert_eq!(layout.projects_placed, 8);
    for (index, page) in layout.pages.iter().enumerate() {
        for element in &page.elements {
            // The sidebar background spans the full page height.
            if matches!(element, Element::Rect { .. }) {
                continue;
            }
            assert!(
                element.bottom() <= FLOW_BOTTOM + 0.01,
                "page {index}: {element:?} crosses the bottom margin"
            );
        }
    }
    // Every page carries the sidebar background.
    assert!(layout
        .pages
        .iter()
        .all(|p| matches!(p.elements.first(), Some(Element::Rect { .. }))));
}

#[test]
fn project_entries_are_capped() {
    let cv = sample_cv();
    let projects: Vec<_> = (1..=12).map(|id| filler_project(id, 1)).collect();

    let layout = layout_cv(&cv.profile, &cv.skills, &projects, Language::En, 8, false);

    assert_eq!(layout.projects_placed, 8);
    let titles: Vec<&str> = layout
        .texts()
        .map(|(_, text)| text)
        .filter(|t| t.starts_with("Project "))
        .collect();
    assert_eq!(titles.len(), 8);
    assert!(!titles.contains(&"Project 9"));
}

#[test]
fn layout_uses_localized_headings_and_values() {
    let cv = sample_cv();

    let pt = layout_cv(&cv.profile, &cv.skills, &cv.projects, Language::Pt, 8, true);
    let pt_texts: Vec<&str> = pt.texts().map(|(_, t)| t).collect();
    assert!(pt_texts.contains(&"ANDRESSA SILVA"));
    assert!(pt_texts.contains(&"CONTATO"));
    assert!(pt_texts.contains(&"PROJETOS SELECIONADOS"));
    assert!(pt_texts.contains(&"Painel de Vendas"));
    assert!(pt_texts.contains(&"English - Avançado"));
    assert!(pt.pages[0]
        .elements
        .iter()
        .any(|e| matches!(e, Element::Portrait { .. })));

    let en = layout_cv(&cv.profile, &cv.skills, &cv.projects, Language::En, 8, false);
    let en_texts: Vec<&str> = en.texts().map(|(_, t)| t).collect();
    assert!(en_texts.contains(&"SELECTED PROJECTS"));
    assert!(en_texts.contains(&"Sales Dashboard"));
    assert!(en_texts.contains(&"Full Stack Developer"));
    assert!(!en
        .pages
        .iter()
        .flat_map(|p| &p.elements)
        .any(|e| matches!(e, Element::Portrait { .. })));
}

#[test]
fn text_stays_inside_its_column() {
    let demo = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../demos/profile.yaml"
    ))
    .expect("demo profile readable");
    let mut cv: CvData = serde_yaml::from_str(&demo).expect("demo profile parses");
    cv.profile.social.github =
        "https://github.com/someone-with-a-handle-that-never-fits-on-one-line".to_string();
    cv.projects[0].tech = "https://example.com/a/very/long/unbroken/path/to/the/project/stack/page/index.html".to_string();

    for lang in Language::ALL {
        let layout = layout_cv(&cv.profile, &cv.skills, &cv.projects, lang, 8, true);
        for element in layout.pages.iter().flat_map(|p| &p.elements) {
            let Element::Text { x, size, style, text, .. } = element else {
                continue;
            };
            let right = x + text_width(text, *size, *style);
            let limit = if *x < SIDEBAR_WIDTH {
                SIDEBAR_WIDTH
            } else {
                PAGE_WIDTH - CONTENT_MARGIN
            };
            assert!(
                right <= limit + 0.01,
                "{lang}: {text:?} ends at {right}, past {limit}"
            );
        }
    }
}
