use std::fmt::Write as _;

use crate::constants::{DETAIL_IMAGE_SIZE, DETAIL_MAP_HEIGHT, DETAIL_MAP_SPAN, ROW_IMAGE_SIZE};
use crate::error::StoreError;
use crate::image_store::{Bitmap, SharedImageStore};
use crate::landmark::{Coordinates, Landmark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Leading,
    Center,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Title,
    Subheadline,
    Body,
}

/// Rectangular map region: a center and a symmetric span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Stroke and shadow applied to a circle-clipped image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleStyle {
    pub stroke_width: u32,
    pub shadow_radius: u32,
}

/// Host-agnostic declarative view tree.
///
/// The host walks the tree and draws it however it likes; nothing here
/// assumes a particular toolkit or reactive framework.
#[derive(Debug, Clone)]
pub enum View {
    Stack {
        axis: Axis,
        alignment: Alignment,
        children: Vec<View>,
    },
    Text {
        content: String,
        font: Font,
    },
    Image {
        bitmap: Bitmap,
        circle: Option<CircleStyle>,
    },
    Map {
        region: MapRegion,
        height: u32,
    },
    Spacer,
    /// A list row that navigates to the landmark with `destination` id when
    /// activated.
    RowLink {
        destination: i32,
        content: Box<View>,
    },
}

/// Circle-cropped image with a 4-point white stroke and a soft shadow.
pub fn circle_image(bitmap: Bitmap) -> View {
    View::Image {
        bitmap,
        circle: Some(CircleStyle {
            stroke_width: 4,
            shadow_radius: 10,
        }),
    }
}

/// Map centered on a coordinate, spanning 0.02 degrees on each axis.
pub fn map_view(coordinate: Coordinates) -> View {
    View::Map {
        region: MapRegion {
            center: coordinate,
            latitude_delta: DETAIL_MAP_SPAN,
            longitude_delta: DETAIL_MAP_SPAN,
        },
        height: DETAIL_MAP_HEIGHT,
    }
}

/// One list row: thumbnail, name, trailing space.
pub fn landmark_row(landmark: &Landmark, store: &SharedImageStore) -> Result<View, StoreError> {
    let thumbnail = store.image(&landmark.image_name, ROW_IMAGE_SIZE)?;

    Ok(View::Stack {
        axis: Axis::Horizontal,
        alignment: Alignment::Center,
        children: vec![
            View::Image {
                bitmap: thumbnail,
                circle: None,
            },
            View::Text {
                content: landmark.name.clone(),
                font: Font::Body,
            },
            View::Spacer,
        ],
    })
}

/// Detail screen: map over the landmark, circle-cropped portrait, then the
/// name with its park and state labels.
pub fn landmark_detail(landmark: &Landmark, store: &SharedImageStore) -> Result<View, StoreError> {
    let portrait = store.image(&landmark.image_name, DETAIL_IMAGE_SIZE)?;

    Ok(View::Stack {
        axis: Axis::Vertical,
        alignment: Alignment::Center,
        children: vec![
            map_view(landmark.location_coordinate()),
            circle_image(portrait),
            View::Stack {
                axis: Axis::Vertical,
                alignment: Alignment::Leading,
                children: vec![
                    View::Text {
                        content: landmark.name.clone(),
                        font: Font::Title,
                    },
                    View::Stack {
                        axis: Axis::Horizontal,
                        alignment: Alignment::Top,
                        children: vec![
                            View::Text {
                                content: landmark.park.clone(),
                                font: Font::Subheadline,
                            },
                            View::Spacer,
                            View::Text {
                                content: landmark.state.clone(),
                                font: Font::Subheadline,
                            },
                        ],
                    },
                ],
            },
            View::Spacer,
        ],
    })
}

/// The master list: one activatable row per landmark, in load order.
pub fn landmark_list(
    landmarks: &[Landmark],
    store: &SharedImageStore,
) -> Result<View, StoreError> {
    let mut rows = Vec::with_capacity(landmarks.len());
    for landmark in landmarks {
        rows.push(View::RowLink {
            destination: landmark.id,
            content: Box::new(landmark_row(landmark, store)?),
        });
    }

    Ok(View::Stack {
        axis: Axis::Vertical,
        alignment: Alignment::Leading,
        children: rows,
    })
}

/// Plain-text rendering of a view tree, one node per line. Used by the
/// terminal demo and handy in test assertions.
pub fn dump(view: &View) -> String {
    let mut out = String::new();
    dump_into(view, 0, &mut out);
    out
}

fn dump_into(view: &View, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match view {
        View::Stack { axis, children, .. } => {
            let tag = match axis {
                Axis::Horizontal => "HStack",
                Axis::Vertical => "VStack",
            };
            let _ = writeln!(out, "{indent}{tag}");
            for child in children {
                dump_into(child, depth + 1, out);
            }
        }
        View::Text { content, font } => {
            let _ = writeln!(out, "{indent}Text({font:?}) \"{content}\"");
        }
        View::Image { bitmap, circle } => {
            let shape = if circle.is_some() { " in circle" } else { "" };
            let _ = writeln!(
                out,
                "{indent}Image \"{}\" {}x{}@{}x{shape}",
                bitmap.label(),
                bitmap.width(),
                bitmap.height(),
                bitmap.scale(),
            );
        }
        View::Map { region, height } => {
            let _ = writeln!(
                out,
                "{indent}Map center=({:.6}, {:.6}) span={:.2} height={height}",
                region.center.latitude, region.center.longitude, region.latitude_delta,
            );
        }
        View::Spacer => {
            let _ = writeln!(out, "{indent}Spacer");
        }
        View::RowLink {
            destination,
            content,
        } => {
            let _ = writeln!(out, "{indent}RowLink -> {destination}");
            dump_into(content, depth + 1, out);
        }
    }
}
