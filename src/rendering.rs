// Rendering functions for the chart

use crate::data_types::ScreenPoint;
use crate::plot_types::{ChartFrame, LabelAlign, Primitive};
use gpui::*;

/// Paints a built frame inside `bounds`, clipped to it.
pub fn paint_frame(frame: &ChartFrame, bounds: Bounds<Pixels>, window: &mut Window, cx: &mut App) {
    window.paint_quad(fill(bounds, frame.background));

    let mask = ContentMask { bounds };
    window.with_content_mask(Some(mask), |window| {
        for primitive in &frame.primitives {
            paint_primitive(primitive, bounds.origin, window, cx);
        }
    });
}

fn paint_primitive(primitive: &Primitive, origin: Point<Pixels>, window: &mut Window, cx: &mut App) {
    match primitive {
        Primitive::Rect {
            origin: at,
            width,
            height,
            color,
        } => {
            if *width <= 0.0 || *height <= 0.0 {
                return;
            }
            let top_left = to_point(origin, *at);
            let rect = Bounds::new(top_left, size(px(*width), px(*height)));
            window.paint_quad(fill(rect, *color));
        }
        Primitive::Polyline {
            points,
            width,
            color,
        } => {
            let mut iter = points.iter();
            let Some(first) = iter.next() else {
                return;
            };
            let mut builder = PathBuilder::stroke(px(width.max(0.5)));
            builder.move_to(to_point(origin, *first));
            for p in iter {
                builder.line_to(to_point(origin, *p));
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, *color);
            }
        }
        Primitive::Dot {
            center,
            radius,
            color,
        } => {
            let r = radius.max(0.5);
            let c = to_point(origin, *center);
            let rect = Bounds::from_corners(
                point(c.x - px(r), c.y - px(r)),
                point(c.x + px(r), c.y + px(r)),
            );
            window.paint_quad(quad(
                rect,
                Corners::all(px(r)),
                *color,
                Edges::all(px(0.0)),
                *color,
                BorderStyle::default(),
            ));
        }
        Primitive::Label {
            position,
            text,
            align,
            color,
        } => paint_label(window, cx, to_point(origin, *position), text, *align, *color),
    }
}

fn paint_label(
    window: &mut Window,
    cx: &mut App,
    anchor: Point<Pixels>,
    text: &str,
    align: LabelAlign,
    color: Hsla,
) {
    if text.is_empty() {
        return;
    }
    let font_size = px(12.0);
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), font_size, &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    // Anchor is the text baseline, as with a canvas `fillText`.
    let x = match align {
        LabelAlign::Left => anchor.x,
        LabelAlign::Right => anchor.x - shaped.width,
    };
    let origin = point(x, anchor.y - shaped.ascent);
    if shaped.paint(origin, line_height, window, cx).is_err() {
        tracing::trace!("label paint failed");
    }
}

fn to_point(origin: Point<Pixels>, p: ScreenPoint) -> Point<Pixels> {
    point(origin.x + px(p.x), origin.y + px(p.y))
}
