use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use sitecam_atoms::media::data_url::{decode_data_url, is_data_url};
use sitecam_atoms::media::Photo;
use sitecam_atoms::projects::Project;

use crate::error::{ReportError, Result};
use crate::layout::{
    column_width_mm, line_height_mm, page_count, plan_photo_grid, PhotoSlot, CAPTION_PT,
    MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PHOTO_HEIGHT_MM, SECTION_GAP_MM, SECTION_TITLE_PT,
    SUBTITLE_PT, TITLE_PT,
};

const IMAGE_DPI: f32 = 300.0;
const MAX_PLACEHOLDER_CHARS: usize = 60;

/// `"<title>-report.pdf"`, with path separators in the title replaced
pub fn report_file_name(project: &Project) -> String {
    let title: String = project
        .title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("{title}-report.pdf")
}

/// Writes text top-down on one page
struct Flow<'a> {
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    top: f32,
}

impl<'a> Flow<'a> {
    fn line(&mut self, text: &str, size: f32) {
        put_text(&self.layer, self.font, text, size, MARGIN_MM, self.top);
        self.top += line_height_mm(size);
    }

    fn gap(&mut self, mm: f32) {
        self.top += mm;
    }
}

fn put_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    left: f32,
    top: f32,
) {
    // PDF places text by its baseline, measured from the bottom edge.
    let baseline = PAGE_HEIGHT_MM - top - line_height_mm(size) * 0.8;
    layer.use_text(text, size, Mm(left), Mm(baseline), font);
}

fn caption(photo: &Photo) -> String {
    let notes = photo
        .notes
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("No notes");
    format!("{} - {}", photo.date.format("%b %-d, %Y"), notes)
}

fn load_inline_image(url: &str) -> Option<DynamicImage> {
    let decoded = match decode_data_url(url) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(error = %e, "photo has a malformed data URL");
            return None;
        }
    };

    match image_crate::load_from_memory(&decoded.bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!(error = %e, mime = %decoded.mime, "photo could not be decoded");
            None
        }
    }
}

fn place_image(layer: &PdfLayerReference, image: &DynamicImage, slot: &PhotoSlot) {
    let (width_px, height_px) = image.dimensions();
    let natural_width = width_px as f32 / IMAGE_DPI * 25.4;
    let natural_height = height_px as f32 / IMAGE_DPI * 25.4;
    let scale = (column_width_mm() / natural_width).min(PHOTO_HEIGHT_MM / natural_height);
    let drawn_height = natural_height * scale;

    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(slot.left)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - slot.top - drawn_height)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}

fn place_placeholder(layer: &PdfLayerReference, font: &IndirectFontRef, url: &str, slot: &PhotoSlot) {
    let label = if is_data_url(url) {
        "Image unavailable".to_string()
    } else {
        let shown: String = url.chars().take(MAX_PLACEHOLDER_CHARS).collect();
        format!("Image: {shown}")
    };
    put_text(layer, font, &label, CAPTION_PT, slot.left, slot.top + PHOTO_HEIGHT_MM / 2.0);
}

fn place_photo(layer: &PdfLayerReference, font: &IndirectFontRef, photo: &Photo, slot: &PhotoSlot) {
    let image = is_data_url(&photo.url)
        .then(|| load_inline_image(&photo.url))
        .flatten();

    match image {
        Some(image) => place_image(layer, &image, slot),
        None => place_placeholder(layer, font, &photo.url, slot),
    }

    put_text(layer, font, &caption(photo), CAPTION_PT, slot.left, slot.caption_top());
}

fn layer_for_page(
    doc: &PdfDocumentReference,
    layers: &mut Vec<PdfLayerReference>,
    page: usize,
) -> PdfLayerReference {
    while layers.len() <= page {
        let (page_index, layer_index) = doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Page {}", layers.len() + 1),
        );
        layers.push(doc.get_page(page_index).get_layer(layer_index));
    }
    layers[page].clone()
}

/// One entry of the report header, top to bottom
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderLine {
    Text(String, f32),
    Gap,
}

impl HeaderLine {
    fn text(text: impl Into<String>, size: f32) -> Self {
        HeaderLine::Text(text.into(), size)
    }

    pub fn height_mm(&self) -> f32 {
        match self {
            HeaderLine::Text(_, size) => line_height_mm(*size),
            HeaderLine::Gap => SECTION_GAP_MM,
        }
    }
}

/// Title block, "Project Details" and the "Photo Documentation" heading
pub fn header_lines(project: &Project, photos: &[Photo], generated_at: DateTime<Utc>) -> Vec<HeaderLine> {
    let mut lines = vec![HeaderLine::text(project.title.as_str(), TITLE_PT)];
    if let Some(address) = project.address.as_deref().filter(|a| !a.is_empty()) {
        lines.push(HeaderLine::text(address, SUBTITLE_PT));
    }
    lines.push(HeaderLine::text(
        format!("Generated on {}", generated_at.format("%B %-d, %Y")),
        SUBTITLE_PT,
    ));
    lines.push(HeaderLine::Gap);

    lines.push(HeaderLine::text("Project Details", SECTION_TITLE_PT));
    lines.push(HeaderLine::text(
        format!(
            "Category: {}",
            project.category.as_deref().unwrap_or("Uncategorized")
        ),
        SUBTITLE_PT,
    ));
    lines.push(HeaderLine::text(format!("Total Photos: {}", photos.len()), SUBTITLE_PT));
    lines.push(HeaderLine::Gap);

    lines.push(HeaderLine::text("Photo Documentation", SECTION_TITLE_PT));
    lines
}

/// Everything placed on the report's pages, before any drawing happens
#[derive(Debug, Clone)]
pub struct ReportPlan {
    pub header: Vec<HeaderLine>,
    pub slots: Vec<PhotoSlot>,
}

impl ReportPlan {
    pub fn pages(&self) -> usize {
        page_count(&self.slots)
    }
}

/// Where the photo grid starts once the header has been written
pub fn grid_top_mm(header: &[HeaderLine]) -> f32 {
    MARGIN_MM + header.iter().map(HeaderLine::height_mm).sum::<f32>()
}

pub fn plan_report(project: &Project, photos: &[Photo], generated_at: DateTime<Utc>) -> ReportPlan {
    let header = header_lines(project, photos, generated_at);
    let grid_top = grid_top_mm(&header);
    ReportPlan {
        header,
        slots: plan_photo_grid(photos.len(), grid_top),
    }
}

/// Render the A4 report for a project: header, details and a two-column photo
/// grid that continues onto further pages as needed.
pub fn render_project_report(
    project: &Project,
    photos: &[Photo],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let plan = plan_report(project, photos, generated_at);

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("{} report", project.title),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Page 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];

    let mut flow = Flow {
        layer: layers[0].clone(),
        font: &font,
        top: MARGIN_MM,
    };
    for line in &plan.header {
        match line {
            HeaderLine::Text(text, size) => flow.line(text, *size),
            HeaderLine::Gap => flow.gap(SECTION_GAP_MM),
        }
    }

    for (photo, slot) in photos.iter().zip(&plan.slots) {
        let layer = layer_for_page(&doc, &mut layers, slot.page);
        place_photo(&layer, &font, photo, slot);
    }

    tracing::info!(
        project_id = project.id,
        photos = photos.len(),
        pages = plan.pages(),
        "rendered project report"
    );

    Ok(doc.save_to_bytes()?)
}

/// Render the report and write it into `dir` under `report_file_name`
pub fn save_project_report(
    dir: &Path,
    project: &Project,
    photos: &[Photo],
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let bytes = render_project_report(project, photos, generated_at)?;
    let path = dir.join(report_file_name(project));

    std::fs::write(&path, bytes).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::TimeZone;
    use sitecam_atoms::media::data_url::encode_data_url;
    use sitecam_atoms::media::PhotoAlbum;
    use sitecam_atoms::projects::ProjectStore;
    use temp_dir::TempDir;

    use super::*;

    fn png_data_url() -> String {
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 3, image::Rgb([10, 120, 200])))
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        encode_data_url(bytes.get_ref(), "image/png")
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn file_name_uses_title() {
        let projects = ProjectStore::seeded();
        let project = projects.find(1).unwrap();
        assert_eq!(report_file_name(project), "Downtown Renovation-report.pdf");

        let mut odd = project.clone();
        odd.title = "Phase 1/2".to_string();
        assert_eq!(report_file_name(&odd), "Phase 1-2-report.pdf");
    }

    #[test]
    fn caption_falls_back_to_no_notes() {
        let photo = Photo {
            id: 7,
            url: "x".to_string(),
            date: generated_at(),
            notes: Some(String::new()),
        };
        assert_eq!(caption(&photo), "Mar 5, 2024 - No notes");

        let noted = Photo {
            notes: Some("North wall".to_string()),
            ..photo
        };
        assert_eq!(caption(&noted), "Mar 5, 2024 - North wall");
    }

    fn remote_photos(count: usize) -> Vec<Photo> {
        (0..count)
            .map(|i| Photo {
                id: i as i64 + 1,
                url: format!("https://example.com/site-{i}.jpg"),
                date: generated_at(),
                notes: Some(String::new()),
            })
            .collect()
    }

    fn texts(lines: &[HeaderLine]) -> Vec<&str> {
        lines
            .iter()
            .filter_map(|line| match line {
                HeaderLine::Text(text, _) => Some(text.as_str()),
                HeaderLine::Gap => None,
            })
            .collect()
    }

    #[test]
    fn header_lists_project_details() {
        let projects = ProjectStore::seeded();
        let project = projects.find(1).unwrap();

        let lines = header_lines(project, &remote_photos(3), generated_at());
        assert_eq!(
            texts(&lines),
            vec![
                "Downtown Renovation",
                "123 Main St, Austin, TX",
                "Generated on March 5, 2024",
                "Project Details",
                "Category: Commercial",
                "Total Photos: 3",
                "Photo Documentation",
            ]
        );
        assert_eq!(lines[0], HeaderLine::Text("Downtown Renovation".to_string(), TITLE_PT));
    }

    #[test]
    fn header_skips_empty_address_and_names_missing_category() {
        let projects = ProjectStore::seeded();
        let mut project = projects.find(3).unwrap().clone();
        project.address = Some(String::new());
        project.category = None;

        let lines = header_lines(&project, &[], generated_at());
        assert_eq!(
            texts(&lines),
            vec![
                "Modern Office Complex",
                "Generated on March 5, 2024",
                "Project Details",
                "Category: Uncategorized",
                "Total Photos: 0",
                "Photo Documentation",
            ]
        );

        let without = header_lines(projects.find(2).unwrap(), &[], generated_at());
        assert!(!texts(&without).iter().any(|t| t.contains("Austin")));
        assert_eq!(texts(&without).len(), 6);
    }

    #[test]
    fn grid_starts_below_the_header() {
        let projects = ProjectStore::seeded();
        let plan = plan_report(projects.find(1).unwrap(), &remote_photos(1), generated_at());

        let header_end = MARGIN_MM + plan.header.iter().map(HeaderLine::height_mm).sum::<f32>();
        assert!((plan.slots[0].top - header_end).abs() < 1e-3);
        assert_eq!(plan.slots[0].page, 0);
    }

    #[test]
    fn page_count_follows_photo_count() {
        let projects = ProjectStore::seeded();
        let project = projects.find(1).unwrap();
        let pages = |count| plan_report(project, &remote_photos(count), generated_at()).pages();

        // Two rows fit under the header, three on every later page.
        assert_eq!(pages(0), 1);
        assert_eq!(pages(4), 1);
        assert_eq!(pages(5), 2);
        assert_eq!(pages(10), 2);
        assert_eq!(pages(11), 3);
        assert_eq!(pages(13), 3);
    }

    #[test]
    fn renders_remote_photos_over_several_pages() {
        let projects = ProjectStore::seeded();
        let project = projects.find(1).unwrap();
        let photos = remote_photos(13);

        let plan = plan_report(project, &photos, generated_at());
        assert_eq!(plan.slots.len(), 13);
        assert_eq!(plan.pages(), 3);

        let bytes = render_project_report(project, &photos, generated_at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_mixed_photos_to_pdf() {
        let projects = ProjectStore::seeded();
        let project = projects.find(1).unwrap();
        let mut album = PhotoAlbum::for_project(project);
        album.push_uploaded(png_data_url());
        album.push_uploaded("data:image/png;base64,not-an-image".to_string());

        let bytes = render_project_report(project, album.photos(), generated_at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_many_photos_across_pages() {
        let projects = ProjectStore::seeded();
        let project = projects.find(2).unwrap();
        let mut album = PhotoAlbum::for_project(project);
        let url = png_data_url();
        for _ in 0..12 {
            album.push_uploaded(url.clone());
        }

        let bytes = render_project_report(project, album.photos(), generated_at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn saves_into_directory() {
        let dir = TempDir::new().unwrap();
        let projects = ProjectStore::seeded();
        let project = projects.find(3).unwrap();

        let path = save_project_report(dir.path(), project, &[], generated_at()).unwrap();
        assert_eq!(path, dir.child("Modern Office Complex-report.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
