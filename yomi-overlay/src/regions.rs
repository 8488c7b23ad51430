//! OCR regions mapped onto the displayed screenshot.

use serde::{Deserialize, Serialize};
use yomi_api::OcrRegion;
use yomi_layout::{Rect, Size};

/// Image-pixel to display-pixel factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayScale {
    pub sx: f32,
    pub sy: f32,
}

impl DisplayScale {
    pub const IDENTITY: Self = Self { sx: 1.0, sy: 1.0 };

    /// `displayed` is the rendered image size, `natural` its pixel size.
    pub fn new(displayed: Size, natural: Size) -> Self {
        Self {
            sx: ratio(displayed.width, natural.width),
            sy: ratio(displayed.height, natural.height),
        }
    }
}

fn ratio(displayed: f32, natural: f32) -> f32 {
    if natural > 0.0 && natural.is_finite() && displayed.is_finite() {
        displayed / natural
    } else {
        0.0
    }
}

/// One selectable text box over the screenshot, in overlay coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub text: String,
    pub rect: Rect,
}

impl TextBox {
    pub fn from_region(region: &OcrRegion, scale: DisplayScale) -> Self {
        Self {
            text: region.text.clone(),
            rect: polygon_rect(&region.polygon, scale),
        }
    }

    /// Sort key: top first, then left.
    pub(crate) fn reading_key(&self) -> (f32, f32) {
        (self.rect.y, self.rect.x)
    }
}

/// Build display boxes for every region, clipped to the displayed image.
///
/// Regions that end up with no area on the image are dropped.
pub fn boxes_from_regions(
    regions: &[OcrRegion],
    scale: DisplayScale,
    displayed: Size,
) -> Vec<TextBox> {
    let image = Rect::new(0.0, 0.0, displayed.width, displayed.height);
    regions
        .iter()
        .filter_map(|region| {
            let mut text_box = TextBox::from_region(region, scale);
            match text_box.rect.intersection(&image) {
                Some(rect) => {
                    text_box.rect = rect;
                    Some(text_box)
                }
                None => {
                    tracing::debug!(text = %text_box.text, "region outside the image, dropped");
                    None
                }
            }
        })
        .collect()
}

fn polygon_rect(polygon: &[[f32; 2]], scale: DisplayScale) -> Rect {
    let (left, top, right, bottom) = match polygon {
        [] => return Rect::ZERO,
        // Corners clockwise from top-left.
        [p0, p1, p2, p3, ..] => (
            p0[0].min(p3[0]),
            p0[1].min(p1[1]),
            p1[0].max(p2[0]),
            p2[1].max(p3[1]),
        ),
        partial => partial.iter().fold(
            (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            |(l, t, r, b), p| (l.min(p[0]), t.min(p[1]), r.max(p[0]), b.max(p[1])),
        ),
    };
    Rect::from_edges(left * scale.sx, top * scale.sy, right * scale.sx, bottom * scale.sy)
}
