//! Page geometry for the project report.
//!
//! Distances are millimetres measured from the top-left corner of the page;
//! the renderer flips them into PDF's bottom-left origin.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

pub const TITLE_PT: f32 = 24.0;
pub const SUBTITLE_PT: f32 = 14.0;
pub const SECTION_TITLE_PT: f32 = 18.0;
pub const CAPTION_PT: f32 = 10.0;

pub const MARGIN_MM: f32 = 30.0 * MM_PER_PT;
pub const SECTION_GAP_MM: f32 = 20.0 * MM_PER_PT;
pub const PHOTO_HEIGHT_MM: f32 = 200.0 * MM_PER_PT;
pub const CAPTION_GAP_MM: f32 = 5.0 * MM_PER_PT;
pub const CELL_GAP_MM: f32 = 10.0 * MM_PER_PT;

pub const COLUMNS: usize = 2;

pub fn pt_to_mm(points: f32) -> f32 {
    points * MM_PER_PT
}

/// Vertical space one line of text takes
pub fn line_height_mm(font_pt: f32) -> f32 {
    pt_to_mm(font_pt * 1.2)
}

pub fn content_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

/// Each photo cell is 48% of the content width
pub fn column_width_mm() -> f32 {
    content_width_mm() * 0.48
}

pub fn cell_height_mm() -> f32 {
    PHOTO_HEIGHT_MM + CAPTION_GAP_MM + line_height_mm(CAPTION_PT) + CELL_GAP_MM
}

/// Lowest point content may reach
pub fn bottom_limit_mm() -> f32 {
    PAGE_HEIGHT_MM - MARGIN_MM
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSlot {
    /// Zero-based page index
    pub page: usize,
    pub column: usize,
    pub left: f32,
    pub top: f32,
}

impl PhotoSlot {
    pub fn caption_top(&self) -> f32 {
        self.top + PHOTO_HEIGHT_MM + CAPTION_GAP_MM
    }
}

/// Place `count` photos two per row, starting at `first_top` on the first
/// page and continuing on fresh pages whenever a row would cross the bottom
/// margin.
pub fn plan_photo_grid(count: usize, first_top: f32) -> Vec<PhotoSlot> {
    let mut slots = Vec::with_capacity(count);
    let mut page = 0;
    let mut top = first_top;

    for index in 0..count {
        let column = index % COLUMNS;
        if column == 0 {
            if index > 0 {
                top += cell_height_mm();
            }
            if top + cell_height_mm() > bottom_limit_mm() {
                page += 1;
                top = MARGIN_MM;
            }
        }

        let left = if column == 0 {
            MARGIN_MM
        } else {
            MARGIN_MM + content_width_mm() - column_width_mm()
        };

        slots.push(PhotoSlot {
            page,
            column,
            left,
            top,
        });
    }

    slots
}

/// Number of pages a report with this grid needs
pub fn page_count(slots: &[PhotoSlot]) -> usize {
    slots.last().map(|slot| slot.page + 1).unwrap_or(1)
}
