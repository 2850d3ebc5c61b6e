//! Self-contained HTML document assembly and output writing

use crimeviz_common::{CrimeVizError, Result};
use std::path::Path;
use tracing::info;

/// Wrap chart markup in a minimal self-contained HTML document
pub fn html_document(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         {head_extra}\n\
         <style>\n\
         body {{ margin: 0; font-family: sans-serif; display: flex; flex-direction: column; align-items: center; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_text(title),
        head_extra = head_extra,
        body = body,
    )
}

/// Escape text for use inside HTML/SVG element content
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write a complete document to disk; any failure is fatal to the pipeline
pub fn write_html(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|err| {
        CrimeVizError::render_with_source(
            format!("failed to write chart output '{}'", path.display()),
            err,
        )
    })?;
    info!(path = %path.display(), bytes = content.len(), "Wrote chart output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_html_document_structure() {
        let html = html_document("Crime Trends", "", "<svg></svg>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Crime Trends</title>"));
        assert!(html.contains("<svg></svg>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_write_html() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.html");
        write_html(&path, "<!DOCTYPE html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<!DOCTYPE html>");
    }

    #[test]
    fn test_write_html_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("chart.html");
        assert!(write_html(&path, "x").is_err());
    }
}
