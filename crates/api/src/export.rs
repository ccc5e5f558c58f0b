//! Standalone HTML viewer export.
//!
//! Produces a ZIP archive containing an `index.html` that plays the
//! project's video with its overlay elements, plus the media blobs under
//! `media/`. The viewer is self-contained: overlay visibility is driven by
//! `data-start-time` / `data-end-time` attributes and a small timeupdate
//! script, so the archive works from a plain file system.

use std::fmt::Write as _;
use std::io::Write as _;

use manualcraft_db::models::element::Element;
use manualcraft_db::models::media::MediaFile;
use manualcraft_db::models::project::ProjectDetail;
use zip::write::SimpleFileOptions;

use crate::error::AppError;
use crate::storage;

/// The archive-internal path of a media blob, unique per row.
pub fn media_zip_name(media: &MediaFile) -> String {
    format!("media/{}_{}", media.id, storage::sanitize_file_name(&media.file_name))
}

/// Minimal HTML attribute/text escaping.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline CSS for one overlay element.
fn element_style(el: &Element) -> String {
    let mut style = format!(
        "position:absolute;left:{}%;top:{}%;z-index:{};",
        el.position_x, el.position_y, el.z_index
    );
    if let Some(w) = el.width {
        let _ = write!(style, "width:{w}px;");
    }
    if let Some(h) = el.height {
        let _ = write!(style, "height:{h}px;");
    }
    if let Some(rot) = el.rotation {
        let _ = write!(style, "transform:rotate({rot}deg);");
    }
    match el.element_type.as_str() {
        "text" => {
            if let Some(color) = &el.color {
                let _ = write!(style, "color:{};", escape_html(color));
            }
            if let Some(size) = el.font_size {
                let _ = write!(style, "font-size:{size}px;");
            }
        }
        "rectangle" | "circle" => {
            if let Some(bg) = &el.background {
                let _ = write!(style, "background:{};", escape_html(bg));
            }
            if el.element_type == "circle" {
                style.push_str("border-radius:50%;");
            }
            if let Some(bw) = el.border_width {
                let bc = el.border_color.as_deref().unwrap_or("#000000");
                let _ = write!(style, "border:{bw}px solid {};", escape_html(bc));
            }
            if let Some(op) = el.fill_opacity {
                let _ = write!(style, "opacity:{op};");
            }
        }
        "arrow" => {
            let color = el.color.as_deref().unwrap_or("#dc3545");
            let _ = write!(style, "background:{};", escape_html(color));
        }
        _ => {}
    }
    style
}

/// Render one overlay element as an absolutely positioned div (or img).
fn render_element(el: &Element) -> String {
    let style = element_style(el);
    let timing = format!(
        "data-start-time=\"{}\" data-end-time=\"{}\"",
        el.start_time, el.end_time
    );
    match el.element_type.as_str() {
        "text" => {
            let content = escape_html(el.content.as_deref().unwrap_or(""));
            format!("    <div class=\"overlay\" {timing} style=\"{style}\">{content}</div>\n")
        }
        "image" => {
            let src = escape_html(el.content.as_deref().unwrap_or(""));
            format!("    <img class=\"overlay\" {timing} style=\"{style}\" src=\"{src}\" alt=\"\">\n")
        }
        _ => format!("    <div class=\"overlay\" {timing} style=\"{style}\"></div>\n"),
    }
}

/// Render the standalone viewer page for a project.
///
/// The first video media becomes the `<video>` source; its path points at
/// the archive-internal `media/` copy.
pub fn render_viewer_html(detail: &ProjectDetail) -> String {
    let title = escape_html(&detail.project.title);

    let video = detail.media.iter().find(|m| m.file_type == "video");
    let video_tag = match video {
        Some(m) => format!(
            "    <video id=\"player\" src=\"{}\" controls></video>\n",
            media_zip_name(m)
        ),
        None => "    <p>This manual has no video.</p>\n".to_string(),
    };

    let mut overlays = String::new();
    for el in &detail.elements {
        overlays.push_str(&render_element(el));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; margin: 0; background: #111; color: #eee; }}
    h1 {{ padding: 12px 16px; margin: 0; font-size: 20px; }}
    #stage {{ position: relative; max-width: 960px; margin: 0 auto; }}
    #player {{ width: 100%; display: block; }}
    .overlay {{ display: none; pointer-events: none; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <div id="stage">
{video_tag}{overlays}  </div>
  <script>
    var player = document.getElementById('player');
    var overlays = document.querySelectorAll('.overlay');
    function sync() {{
      if (!player) return;
      var t = player.currentTime;
      overlays.forEach(function (el) {{
        var start = parseFloat(el.dataset.startTime);
        var end = parseFloat(el.dataset.endTime);
        el.style.display = (t >= start && t <= end) ? 'block' : 'none';
      }});
    }}
    if (player) {{
      player.addEventListener('timeupdate', sync);
      player.addEventListener('seeked', sync);
    }}
  </script>
</body>
</html>
"#
    )
}

/// Build the export ZIP: `index.html` plus every media blob under `media/`.
///
/// Missing blobs are skipped with a warning so a half-cleaned project can
/// still be exported.
pub async fn build_archive(upload_dir: &str, detail: &ProjectDetail) -> Result<Vec<u8>, AppError> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let html = render_viewer_html(detail);
    writer
        .start_file("index.html", options)
        .map_err(|e| AppError::InternalError(format!("Failed to write archive: {e}")))?;
    writer
        .write_all(html.as_bytes())
        .map_err(|e| AppError::InternalError(format!("Failed to write archive: {e}")))?;

    for media in &detail.media {
        let Some(path) = storage::resolve_blob(upload_dir, &media.file_path) else {
            tracing::warn!(media_id = media.id, path = %media.file_path, "Skipping media with suspicious path");
            continue;
        };
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(media_id = media.id, path = %path.display(), error = %e, "Skipping unreadable media blob");
                continue;
            }
        };
        writer
            .start_file(media_zip_name(media), options)
            .map_err(|e| AppError::InternalError(format!("Failed to write archive: {e}")))?;
        writer
            .write_all(&data)
            .map_err(|e| AppError::InternalError(format!("Failed to write archive: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::InternalError(format!("Failed to finish archive: {e}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use manualcraft_db::models::project::ProjectSummary;

    fn sample_detail() -> ProjectDetail {
        let now = Utc::now();
        ProjectDetail {
            project: ProjectSummary {
                id: 1,
                title: "Drill press <setup>".to_string(),
                description: None,
                status: "published".to_string(),
                department_id: None,
                task_type_id: None,
                created_by: 1,
                department_name: None,
                task_name: None,
                creator_name: Some("admin".to_string()),
                created_at: now,
                updated_at: now,
            },
            media: vec![MediaFile {
                id: 7,
                project_id: 1,
                file_name: "drill.mp4".to_string(),
                file_path: "project_1/123_drill.mp4".to_string(),
                file_type: "video".to_string(),
                file_size: 10,
                duration: Some(30.0),
                created_by: 1,
                created_at: now,
            }],
            elements: vec![Element {
                id: 3,
                project_id: 1,
                element_type: "text".to_string(),
                position_x: 10.0,
                position_y: 20.0,
                width: None,
                height: None,
                rotation: None,
                start_time: 2.0,
                end_time: 8.0,
                z_index: 1,
                content: Some("Wear <goggles>".to_string()),
                color: Some("#ffffff".to_string()),
                background: None,
                font_size: Some(16),
                border_width: None,
                border_color: None,
                fill_opacity: None,
                created_by: 1,
                created_at: now,
            }],
            timeline: vec![],
            share: None,
        }
    }

    #[test]
    fn test_viewer_html_contains_timing_attributes() {
        let html = render_viewer_html(&sample_detail());
        assert!(html.contains("data-start-time=\"2\""));
        assert!(html.contains("data-end-time=\"8\""));
        assert!(html.contains("media/7_drill.mp4"));
    }

    #[test]
    fn test_viewer_html_escapes_user_content() {
        let html = render_viewer_html(&sample_detail());
        assert!(html.contains("Drill press &lt;setup&gt;"));
        assert!(html.contains("Wear &lt;goggles&gt;"));
        assert!(!html.contains("Wear <goggles>"));
    }

    #[test]
    fn test_viewer_html_without_video() {
        let mut detail = sample_detail();
        detail.media.clear();
        let html = render_viewer_html(&detail);
        assert!(html.contains("no video"));
    }

    #[test]
    fn test_circle_style_is_round() {
        let mut detail = sample_detail();
        detail.elements[0].element_type = "circle".to_string();
        detail.elements[0].background = Some("rgba(220,53,69,0.5)".to_string());
        let html = render_viewer_html(&detail);
        assert!(html.contains("border-radius:50%"));
    }
}
