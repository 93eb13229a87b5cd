//! Two-column A4 CV rendered with printpdf.
//!
//! Rendering happens in two passes:
//! 1. [`layout_cv`] is a pure function that positions every element on its
//!    page using one top-down flow cursor per region (sidebar, main column).
//!    A block that would cross [`FLOW_BOTTOM`] moves to a new page.
//! 2. [`render_pdf`] turns the layout into printpdf operations.
//!
//! Coordinates in the layout are in points measured from the top-left corner;
//! the emitter flips them into PDF space.

use super::{CvError, Headings};
use crate::model::{Language, Profile, Project, SkillSet};
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage,
    PdfSaveOptions, Point, Polygon, PolygonRing, Pt, RawImage, Rgb, TextItem, WindingOrder,
    XObjectId, XObjectTransform,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const SIDEBAR_WIDTH: f32 = 180.0;
pub const CONTENT_MARGIN: f32 = 40.0;
/// Lowest y (from the top) any flowed element may reach.
pub const FLOW_BOTTOM: f32 = 750.0;

const SIDEBAR_X: f32 = 20.0;
const SIDEBAR_CONTENT_WIDTH: f32 = SIDEBAR_WIDTH - 40.0;
const SIDEBAR_TOP: f32 = 160.0;
const CONTINUATION_TOP: f32 = 50.0;
const MAIN_X: f32 = SIDEBAR_WIDTH + CONTENT_MARGIN;
const MAIN_WIDTH: f32 = PAGE_WIDTH - SIDEBAR_WIDTH - CONTENT_MARGIN * 2.0;
const PORTRAIT_RADIUS: f32 = 50.0;
const PORTRAIT_CENTER_Y: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

pub mod palette {
    use super::Rgb8;

    pub const PRIMARY: Rgb8 = Rgb8(0x7c, 0x3a, 0xed);
    pub const SECONDARY: Rgb8 = Rgb8(0xa7, 0x8b, 0xfa);
    pub const SIDEBAR_BG: Rgb8 = Rgb8(0x1e, 0x1b, 0x4b);
    pub const SIDEBAR_TEXT: Rgb8 = Rgb8(0xe0, 0xe7, 0xff);
    pub const TEXT: Rgb8 = Rgb8(0x33, 0x33, 0x33);
    pub const GRAY: Rgb8 = Rgb8(0x6b, 0x72, 0x80);
    pub const BLACK: Rgb8 = Rgb8(0x00, 0x00, 0x00);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb8,
    },
    /// A single line of text; `y` is the top of the line box.
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: Rgb8,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb8,
    },
    /// Profile image clipped to a circle.
    Portrait { cx: f32, cy: f32, radius: f32 },
}

impl Element {
    /// Lowest y (from the top) covered by this element.
    pub fn bottom(&self) -> f32 {
        match self {
            Element::Rect { y, height, .. } => y + height,
            Element::Text { y, size, .. } => y + size * LINE_FACTOR,
            Element::Rule { y, .. } => *y,
            Element::Portrait { cy, radius, .. } => cy + radius,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone)]
pub struct CvLayout {
    pub pages: Vec<PageLayout>,
    /// Number of project entries placed in the main column.
    pub projects_placed: usize,
}

impl CvLayout {
    /// Every text run with the index of its page.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.pages.iter().enumerate().flat_map(|(i, page)| {
            page.elements.iter().filter_map(move |el| match el {
                Element::Text { text, .. } => Some((i, text.as_str())),
                _ => None,
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Profile image drawn at the top of the sidebar. Skipped when absent.
    pub image_path: Option<PathBuf>,
    /// Upper limit on project entries in the main column.
    pub max_projects: usize,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            image_path: None,
            max_projects: 8,
        }
    }
}

const LINE_FACTOR: f32 = 1.2;

/// Top-down flow cursor for one region.
#[derive(Debug)]
struct FlowCursor {
    page: usize,
    y: f32,
    continuation_top: f32,
}

impl FlowCursor {
    fn new(top: f32) -> Self {
        Self {
            page: 0,
            y: top,
            continuation_top: CONTINUATION_TOP,
        }
    }

    /// Moves to the next page when `height` no longer fits, unless the cursor is
    /// already at the top of a page.
    fn ensure(&mut self, height: f32) {
        let fits_on_page = height <= FLOW_BOTTOM - self.continuation_top;
        if self.y + height > FLOW_BOTTOM && self.y > self.continuation_top && fits_on_page {
            self.page += 1;
            self.y = self.continuation_top;
        }
    }

    /// Reserves `height` and returns where it starts.
    fn take(&mut self, height: f32) -> (usize, f32) {
        self.ensure(height);
        let at = (self.page, self.y);
        self.y += height;
        at
    }

    fn advance(&mut self, gap: f32) {
        self.y += gap;
    }
}

struct TextStyle {
    size: f32,
    style: FontStyle,
    color: Rgb8,
    line_gap: f32,
}

impl TextStyle {
    fn line_height(&self) -> f32 {
        self.size * LINE_FACTOR + self.line_gap
    }
}

struct LayoutBuilder {
    pages: Vec<PageLayout>,
}

impl LayoutBuilder {
    fn new() -> Self {
        let mut builder = Self { pages: Vec::new() };
        builder.page(0);
        builder
    }

    /// Page `index`, creating it (with its sidebar background) if needed.
    fn page(&mut self, index: usize) -> &mut PageLayout {
        while self.pages.len() <= index {
            self.pages.push(PageLayout {
                elements: vec![Element::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: SIDEBAR_WIDTH,
                    height: PAGE_HEIGHT,
                    color: palette::SIDEBAR_BG,
                }],
            });
        }
        &mut self.pages[index]
    }

    fn push(&mut self, page: usize, element: Element) {
        self.page(page).elements.push(element);
    }

    /// Flows wrapped lines of `text`, one reservation per line.
    fn paragraph(
        &mut self,
        cursor: &mut FlowCursor,
        x: f32,
        width: f32,
        text: &str,
        style: &TextStyle,
        justify: bool,
    ) {
        let lines = wrap_text(text, style.size, style.style, width);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.into_iter().enumerate() {
            let (page, y) = cursor.take(style.line_height());
            if justify && i < last {
                self.justified_line(page, x, y, width, &line, style);
            } else {
                self.push(page, text_element(x, y, style, line));
            }
        }
    }

    /// Places each word so the line spans exactly `width`.
    fn justified_line(&mut self, page: usize, x: f32, y: f32, width: f32, line: &str, style: &TextStyle) {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 {
            self.push(page, text_element(x, y, style, line.to_string()));
            return;
        }
        let words_width: f32 = words
            .iter()
            .map(|w| text_width(w, style.size, style.style))
            .sum();
        let gap = ((width - words_width) / (words.len() - 1) as f32).max(0.0);
        let mut word_x = x;
        for word in words {
            self.push(page, text_element(word_x, y, style, word.to_string()));
            word_x += text_width(word, style.size, style.style) + gap;
        }
    }

    fn sidebar_section(&mut self, cursor: &mut FlowCursor, title: &str, items: &[String]) {
        let heading = TextStyle {
            size: 12.0,
            style: FontStyle::Bold,
            color: palette::SECONDARY,
            line_gap: 0.0,
        };
        let item_style = TextStyle {
            size: 9.0,
            style: FontStyle::Regular,
            color: palette::SIDEBAR_TEXT,
            line_gap: 0.0,
        };
        // Keep the heading with its first item.
        cursor.ensure(20.0 + item_style.line_height());
        let (page, y) = cursor.take(20.0);
        self.push(page, text_element(SIDEBAR_X, y, &heading, title.to_uppercase()));
        for item in items {
            self.paragraph(cursor, SIDEBAR_X, SIDEBAR_CONTENT_WIDTH, item, &item_style, false);
            cursor.advance(6.0);
        }
        cursor.advance(15.0);
    }
}

fn text_element(x: f32, y: f32, style: &TextStyle, text: String) -> Element {
    Element::Text {
        x,
        y,
        size: style.size,
        style: style.style,
        color: style.color,
        text,
    }
}

/// Positions every element of the CV. Pure; does not touch the image file.
pub fn layout_cv(
    profile: &Profile,
    skills: &SkillSet,
    projects: &[Project],
    lang: Language,
    max_projects: usize,
    with_portrait: bool,
) -> CvLayout {
    let h = Headings::for_language(lang);
    let mut builder = LayoutBuilder::new();

    // Sidebar
    if with_portrait {
        builder.push(
            0,
            Element::Portrait {
                cx: SIDEBAR_WIDTH / 2.0,
                cy: PORTRAIT_CENTER_Y,
                radius: PORTRAIT_RADIUS,
            },
        );
    }
    let mut side = FlowCursor::new(SIDEBAR_TOP);
    let mut contact = vec![profile.contact.email.clone(), profile.contact.phone.clone()];
    if !profile.contact.location.trim().is_empty() {
        contact.push(profile.contact.location.clone());
    }
    contact.push(format!("LinkedIn: {}", profile.social.linkedin));
    contact.push(format!("GitHub: {}", profile.social.github));
    builder.sidebar_section(&mut side, h.contact, &contact);
    builder.sidebar_section(&mut side, h.skills, &skills.technical);
    let spoken: Vec<String> = skills
        .languages
        .iter()
        .map(|l| format!("{} - {}", l.name, l.level.resolve(lang)))
        .collect();
    builder.sidebar_section(&mut side, h.languages, &spoken);

    // Main column
    let mut main = FlowCursor::new(50.0);
    let name_style = TextStyle {
        size: 28.0,
        style: FontStyle::Bold,
        color: palette::PRIMARY,
        line_gap: 0.0,
    };
    let role_style = TextStyle {
        size: 14.0,
        style: FontStyle::Regular,
        color: palette::TEXT,
        line_gap: 0.0,
    };
    let summary_style = TextStyle {
        size: 10.0,
        style: FontStyle::Regular,
        color: palette::TEXT,
        line_gap: 4.0,
    };
    builder.paragraph(&mut main, MAIN_X, MAIN_WIDTH, &profile.name.to_uppercase(), &name_style, false);
    main.advance(1.4);
    builder.paragraph(&mut main, MAIN_X, MAIN_WIDTH, profile.role.resolve(lang), &role_style, false);
    main.advance(13.2);
    let (page, y) = main.take(10.0);
    builder.push(
        page,
        Element::Rule {
            x1: MAIN_X,
            x2: PAGE_WIDTH - CONTENT_MARGIN,
            y,
            thickness: 0.5,
            color: palette::GRAY,
        },
    );
    builder.paragraph(&mut main, MAIN_X, MAIN_WIDTH, profile.summary.resolve(lang), &summary_style, true);
    main.advance(26.0);

    let heading_style = TextStyle {
        size: 16.0,
        style: FontStyle::Bold,
        color: palette::PRIMARY,
        line_gap: 0.0,
    };
    let title_style = TextStyle {
        size: 12.0,
        style: FontStyle::Bold,
        color: palette::BLACK,
        line_gap: 0.0,
    };
    let tech_style = TextStyle {
        size: 10.0,
        style: FontStyle::Oblique,
        color: palette::PRIMARY,
        line_gap: 0.0,
    };
    let desc_style = TextStyle {
        size: 10.0,
        style: FontStyle::Regular,
        color: palette::GRAY,
        line_gap: 2.0,
    };

    let selected: Vec<&Project> = projects.iter().take(max_projects).collect();
    if !selected.is_empty() {
        main.ensure(25.0 + title_style.line_height());
        let (page, y) = main.take(25.0);
        builder.push(page, text_element(MAIN_X, y, &heading_style, h.selected_projects.to_uppercase()));
    }
    for project in &selected {
        let title = project.title.resolve(lang);
        let description = project.description.resolve(lang);
        let title_lines = wrap_text(title, title_style.size, title_style.style, MAIN_WIDTH).len();
        let desc_lines = wrap_text(description, desc_style.size, desc_style.style, MAIN_WIDTH).len();
        let entry_height = title_lines as f32 * title_style.line_height()
            + 2.0
            + tech_style.line_height()
            + desc_lines as f32 * desc_style.line_height();
        // Keep an entry on one page when it fits on one.
        main.ensure(entry_height);
        builder.paragraph(&mut main, MAIN_X, MAIN_WIDTH, title, &title_style, false);
        main.advance(2.0);
        builder.paragraph(&mut main, MAIN_X, MAIN_WIDTH, &project.tech, &tech_style, false);
        builder.paragraph(&mut main, MAIN_X, MAIN_WIDTH, description, &desc_style, true);
        main.advance(15.0);
    }

    debug!(
        pages = builder.pages.len(),
        projects = selected.len(),
        "Laid out CV"
    );
    CvLayout {
        pages: builder.pages,
        projects_placed: selected.len(),
    }
}

/// Renders the CV as PDF bytes.
///
/// A missing or undecodable image is skipped. Any other I/O failure while
/// reading it is an error.
pub fn render_pdf(
    profile: &Profile,
    skills: &SkillSet,
    projects: &[Project],
    lang: Language,
    options: &PdfOptions,
) -> Result<Vec<u8>, CvError> {
    let portrait = match &options.image_path {
        Some(path) => load_portrait(path)?,
        None => None,
    };
    let layout = layout_cv(
        profile,
        skills,
        projects,
        lang,
        options.max_projects,
        portrait.is_some(),
    );
    let title = format!("{} - CV ({lang})", profile.name);
    let bytes = emit(&layout, &title, portrait.as_ref());
    info!(
        pages = layout.pages.len(),
        size = bytes.len(),
        %lang,
        "Rendered PDF CV"
    );
    Ok(bytes)
}

fn load_portrait(path: &std::path::Path) -> Result<Option<RawImage>, CvError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Profile image not found, continuing without it");
            return Ok(None);
        }
        Err(e) => {
            tracing::error!(error = ?e, path = %path.display(), "Failed to read profile image");
            return Err(CvError::Io(e));
        }
    };
    let mut warnings = Vec::new();
    match RawImage::decode_from_bytes(&bytes, &mut warnings) {
        Ok(image) => {
            debug!(path = %path.display(), width = image.width, height = image.height, "Decoded profile image");
            Ok(Some(image))
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Profile image could not be decoded, continuing without it");
            Ok(None)
        }
    }
}

fn emit(layout: &CvLayout, title: &str, portrait: Option<&RawImage>) -> Vec<u8> {
    let mut doc = PdfDocument::new(title);
    let portrait = portrait.map(|image| (doc.add_image(image), image.width, image.height));

    let pages: Vec<PdfPage> = layout
        .pages
        .iter()
        .map(|page| {
            let mut ops = Vec::new();
            for element in &page.elements {
                push_ops(&mut ops, element, portrait.as_ref());
            }
            PdfPage::new(Mm(210.0), Mm(297.0), ops)
        })
        .collect();

    let mut warnings = Vec::new();
    let bytes = doc
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        debug!(count = warnings.len(), "printpdf reported warnings while saving");
    }
    bytes
}

fn push_ops(ops: &mut Vec<Op>, element: &Element, portrait: Option<&(XObjectId, usize, usize)>) {
    match element {
        Element::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            let bottom = PAGE_HEIGHT - y - height;
            ops.push(Op::SetFillColor { col: color_of(*color) });
            ops.push(Op::DrawPolygon {
                polygon: polygon(
                    vec![
                        (*x, bottom),
                        (x + width, bottom),
                        (x + width, bottom + height),
                        (*x, bottom + height),
                    ],
                    PaintMode::Fill,
                ),
            });
        }
        Element::Text {
            x,
            y,
            size,
            style,
            color,
            text,
        } => {
            let font = builtin_font(*style);
            // Helvetica's ascent is roughly 0.8 em below the top of the line box.
            let baseline = PAGE_HEIGHT - (y + size * 0.8);
            ops.push(Op::StartTextSection);
            ops.push(Op::SetFillColor { col: color_of(*color) });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(*size),
                font,
            });
            ops.push(Op::SetTextCursor {
                pos: point(*x, baseline),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.clone())],
                font,
            });
            ops.push(Op::EndTextSection);
        }
        Element::Rule {
            x1,
            x2,
            y,
            thickness,
            color,
        } => {
            let y = PAGE_HEIGHT - y;
            ops.push(Op::SetOutlineColor { col: color_of(*color) });
            ops.push(Op::SetOutlineThickness { pt: Pt(*thickness) });
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![line_point(*x1, y), line_point(*x2, y)],
                    is_closed: false,
                },
            });
        }
        Element::Portrait { cx, cy, radius } => {
            let Some((id, width, height)) = portrait else {
                return;
            };
            let cy = PAGE_HEIGHT - cy;
            let diameter = radius * 2.0;
            // Cover the circle: scale the shorter side to the diameter.
            let scale = diameter / (*width.min(height) as f32).max(1.0);
            let drawn_w = *width as f32 * scale;
            let drawn_h = *height as f32 * scale;
            let circle: Vec<(f32, f32)> = (0..48)
                .map(|i| {
                    let angle = i as f32 / 48.0 * std::f32::consts::TAU;
                    (cx + radius * angle.cos(), cy + radius * angle.sin())
                })
                .collect();
            ops.push(Op::SaveGraphicsState);
            ops.push(Op::DrawPolygon {
                polygon: polygon(circle, PaintMode::Clip),
            });
            ops.push(Op::UseXobject {
                id: id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(cx - drawn_w / 2.0)),
                    translate_y: Some(Pt(cy - drawn_h / 2.0)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            });
            ops.push(Op::RestoreGraphicsState);
        }
    }
}

fn builtin_font(style: FontStyle) -> BuiltinFont {
    match style {
        FontStyle::Regular => BuiltinFont::Helvetica,
        FontStyle::Bold => BuiltinFont::HelveticaBold,
        FontStyle::Oblique => BuiltinFont::HelveticaOblique,
    }
}

fn color_of(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

fn point(x: f32, y: f32) -> Point {
    Point { x: Pt(x), y: Pt(y) }
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: point(x, y),
        bezier: false,
    }
}

fn polygon(points: Vec<(f32, f32)>, mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![PolygonRing {
            points: points.into_iter().map(|(x, y)| line_point(x, y)).collect(),
        }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

/// Approximate Helvetica advance width of `ch`, in em.
fn glyph_width(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.25,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | '-' => 0.32,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.85,
        'A'..='Z' => 0.68,
        _ => 0.55,
    }
}

/// Estimated rendered width of `text` in points.
pub fn text_width(text: &str, size: f32, style: FontStyle) -> f32 {
    let em: f32 = text.chars().map(glyph_width).sum();
    em * size * style_weight(style)
}

fn style_weight(style: FontStyle) -> f32 {
    if style == FontStyle::Bold {
        1.06
    } else {
        1.0
    }
}

/// Greedy word wrap to `width` points. Always returns at least one line; a
/// word wider than `width` (usually a URL) is broken between characters.
pub fn wrap_text(text: &str, size: f32, style: FontStyle, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if text_width(word, size, style) > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = break_word(word, size, style, width);
                // The tail may share its line with the following words.
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                continue;
            }
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate_width = text_width(&current, size, style)
                + text_width(" ", size, style)
                + text_width(word, size, style);
            if candidate_width > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current.push(' ');
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Splits `word` into pieces no wider than `width`. A piece always holds at
/// least one character.
fn break_word(word: &str, size: f32, style: FontStyle, width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0;
    for ch in word.chars() {
        let ch_width = glyph_width(ch) * size * style_weight(style);
        if !piece.is_empty() && piece_width + ch_width > width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0.0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
