//! Vector document assembly: container, layer groups, paths, optional
//! metadata.
//!
//! Hand-rolled with `std::fmt::Write` rather than a generic XML builder,
//! so precision, trailing-zero stripping, and the horizontal/vertical
//! shorthand optimize pass stay under direct control.

use super::format::xml_escape;
use super::path_data::build_path_data;
use crate::config::SvgConfig;
use crate::geometry::Layer;
use std::fmt::Write as _;

/// Optional human-facing metadata written into the document's metadata
/// block.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub date: Option<String>,
    pub source: Option<String>,
}

/// Render the full document for a finished set of layers.
pub fn emit(width: u32, height: u32, layers: &[Layer], cfg: &SvgConfig, metadata: Option<&DocumentMetadata>) -> String {
    let (vb_x, vb_y, vb_w, vb_h) = cfg.view_box.unwrap_or((0.0, 0.0, width as f32, height as f32));

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="{vb_x} {vb_y} {vb_w} {vb_h}" preserveAspectRatio="xMidYMid meet">"#
    )
    .unwrap();

    if cfg.add_metadata {
        if let Some(meta) = metadata {
            write_metadata(&mut out, meta);
        }
    }

    let distinct_colors: std::collections::HashSet<_> = layers.iter().map(|l| l.color.to_hex()).collect();
    if distinct_colors.len() > 2 {
        writeln!(out, "  <defs>").unwrap();
        for hex in &distinct_colors {
            writeln!(out, r#"    <linearGradient id="solid-{h}"><stop offset="0" stop-color="{h}"/></linearGradient>"#, h = hex.trim_start_matches('#')).unwrap();
        }
        writeln!(out, "  </defs>").unwrap();
    } else {
        writeln!(out, "  <defs/>").unwrap();
    }

    if cfg.add_layer_groups {
        for layer in layers {
            write_layer_group(&mut out, layer, cfg);
        }
    } else {
        for layer in layers {
            for path in &layer.paths {
                write_path(&mut out, path, cfg, "    ");
            }
        }
    }

    writeln!(out, "</svg>").unwrap();

    if cfg.optimize {
        collapse_whitespace(&out)
    } else {
        out
    }
}

fn write_metadata(out: &mut String, meta: &DocumentMetadata) {
    writeln!(out, "  <metadata>").unwrap();
    if let Some(v) = &meta.title {
        writeln!(out, "    <title>{}</title>", xml_escape(v)).unwrap();
    }
    if let Some(v) = &meta.description {
        writeln!(out, "    <description>{}</description>", xml_escape(v)).unwrap();
    }
    if let Some(v) = &meta.creator {
        writeln!(out, "    <creator>{}</creator>", xml_escape(v)).unwrap();
    }
    if let Some(v) = &meta.date {
        writeln!(out, "    <date>{}</date>", xml_escape(v)).unwrap();
    }
    if let Some(v) = &meta.source {
        writeln!(out, "    <source>{}</source>", xml_escape(v)).unwrap();
    }
    writeln!(out, "  </metadata>").unwrap();
}

fn write_layer_group(out: &mut String, layer: &Layer, cfg: &SvgConfig) {
    writeln!(
        out,
        r#"  <g id="layer-{id}" data-name="{name}" visibility="{vis}">"#,
        id = layer.id,
        name = xml_escape(&layer.name),
        vis = if layer.visible { "visible" } else { "hidden" }
    )
    .unwrap();
    for path in &layer.paths {
        write_path(out, path, cfg, "    ");
    }
    writeln!(out, "  </g>").unwrap();
}

fn write_path(out: &mut String, path: &crate::geometry::Path, cfg: &SvgConfig, indent: &str) {
    let data = build_path_data(&path.points, path.closed, cfg.precision, cfg.optimize);
    if data.is_empty() {
        return;
    }
    let stroke_width = if path.stroke_width > 0.0 {
        path.stroke_width
    } else {
        cfg.stroke_width
    };
    writeln!(
        out,
        r#"{indent}<path d="{data}" stroke="{stroke}" stroke-width="{sw}" fill="none"/>"#,
        stroke = path.color.to_hex(),
        sw = stroke_width,
    )
    .unwrap();
}

fn collapse_whitespace(doc: &str) -> String {
    doc.lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Path, Point};

    fn sample_layers() -> Vec<Layer> {
        vec![Layer {
            id: 0,
            name: "layer-0".to_string(),
            color: Color::BLACK,
            visible: true,
            locked: false,
            paths: vec![Path {
                points: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
                closed: false,
                color: Color::BLACK,
                stroke_width: 1.0,
                layer: Some(0),
            }],
        }]
    }

    #[test]
    fn emits_well_formed_root_and_group() {
        let layers = sample_layers();
        let doc = emit(10, 10, &layers, &SvgConfig::default(), None);
        assert!(doc.contains("<svg"));
        assert!(doc.contains(r#"viewBox="0 0 10 10""#));
        assert!(doc.contains("<g id=\"layer-0\""));
        assert!(doc.contains("stroke=\"#000000\""));
    }

    #[test]
    fn metadata_block_is_escaped_and_optional() {
        let layers = sample_layers();
        let mut cfg = SvgConfig::default();
        cfg.add_metadata = true;
        let meta = DocumentMetadata {
            title: Some("<untitled>".to_string()),
            ..Default::default()
        };
        let doc = emit(10, 10, &layers, &cfg, Some(&meta));
        assert!(doc.contains("&lt;untitled&gt;"));

        let doc_without = emit(10, 10, &layers, &SvgConfig::default(), None);
        assert!(!doc_without.contains("<metadata>"));
    }
}
