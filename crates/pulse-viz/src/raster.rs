//! Turns engine output into nannou draw calls.

use nannou::color::{hsva, Hsva};
use nannou::prelude::*;
use pulse_viz_api::{DrawList, Hsba, Primitive};

use crate::engine::FrameOutput;

/// HSB ranges (360/100/100/100) to nannou's normalised HSVA
pub fn to_hsva(color: Hsba) -> Hsva {
    hsva(
        color.hue / 360.0,
        color.saturation / 100.0,
        color.brightness / 100.0,
        color.alpha / 100.0,
    )
}

/// Draws one tick: trail fade over the previous frame, the shaken scene, then particles
pub fn draw_frame(draw: &Draw, bounds: Rect, output: &FrameOutput) {
    draw.rect()
        .xy(bounds.xy())
        .wh(bounds.wh())
        .color(to_hsva(Hsba::gray(0.0, output.fade_alpha)));

    draw_list(&draw.xy(output.shake), &output.scene);
    draw_list(draw, &output.particles);
}

pub fn draw_list(draw: &Draw, list: &DrawList) {
    for primitive in list {
        match primitive {
            Primitive::Line {
                start,
                end,
                weight,
                color,
            } => {
                draw.line()
                    .start(*start)
                    .end(*end)
                    .weight(*weight)
                    .color(to_hsva(*color));
            }
            Primitive::Polygon {
                points,
                weight,
                color,
            } => {
                draw.polyline()
                    .weight(*weight)
                    .points_closed(points.iter().copied())
                    .color(to_hsva(*color));
            }
            Primitive::Disc {
                center,
                diameter,
                color,
            } => {
                draw.ellipse()
                    .xy(*center)
                    .w_h(*diameter, *diameter)
                    .color(to_hsva(*color));
            }
            Primitive::Ellipse {
                center,
                size,
                color,
            } => {
                draw.ellipse()
                    .xy(*center)
                    .wh(*size)
                    .color(to_hsva(*color));
            }
            Primitive::Rect {
                center,
                size,
                color,
            } => {
                draw.rect().xy(*center).wh(*size).color(to_hsva(*color));
            }
        }
    }
}
