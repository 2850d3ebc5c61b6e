//! Time-animated geographic heat map built on Leaflet

use crate::html::{escape_text, html_document, write_html};
use crate::{ChartConfig, ChartRenderer};
use async_trait::async_trait;
use crimeviz_common::Result;
use crimeviz_data::HeatFrames;
use serde::Serialize;
use std::path::Path;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT_JS: &str = "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js";
const TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; OpenStreetMap contributors &copy; CARTO";

/// Animation frame interval in milliseconds
const FRAME_INTERVAL_MS: u32 = 800;

#[derive(Serialize)]
struct FrameData<'a> {
    labels: &'a [String],
    frames: &'a [Vec<(f64, f64)>],
}

/// Time-animated heat map of incident coordinates, one frame per year.
///
/// Renders a self-contained HTML page: the frame data is embedded as JSON
/// and a slider steps through the yearly heat layers. Map tiles and the
/// heat plugin are loaded from CDN, so viewing needs network access.
#[derive(Debug)]
pub struct YearlyHeatMapChart {
    /// Index-aligned per-year coordinate frames
    pub frames: HeatFrames,
    /// Initial map center as (latitude, longitude)
    pub center: (f64, f64),
    /// Initial zoom level
    pub zoom: u8,
    /// Heat point radius in pixels
    pub radius: u32,
    /// Peak layer opacity, 0.0-1.0
    pub max_opacity: f64,
    /// Start stepping through frames on page load
    pub auto_play: bool,
}

impl YearlyHeatMapChart {
    pub fn new(frames: HeatFrames) -> Self {
        Self {
            frames,
            center: (37.7749, -122.4194),
            zoom: 12,
            radius: 15,
            max_opacity: 0.8,
            auto_play: true,
        }
    }

    /// Create a chart with custom title and viewport settings
    pub fn with_config(
        title: &str,
        frames: HeatFrames,
        center: (f64, f64),
        zoom: u8,
    ) -> (Self, ChartConfig) {
        let mut chart = Self::new(frames);
        chart.center = center;
        chart.zoom = zoom;

        let mut config = ChartConfig {
            title: title.to_string(),
            ..Default::default()
        };
        config.width = 1000;
        config.height = 700;

        (chart, config)
    }

    fn head_extra(&self) -> String {
        format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n\
             <script src=\"{}\"></script>\n\
             <script src=\"{}\"></script>",
            LEAFLET_CSS, LEAFLET_JS, LEAFLET_HEAT_JS,
        )
    }

    fn frame_json(&self) -> Result<String> {
        let data = FrameData {
            labels: &self.frames.labels,
            frames: &self.frames.frames,
        };
        Ok(serde_json::to_string(&data)?)
    }

    // leaflet.heat exposes no opacity cap option, so the cap is applied to
    // the layer's canvas after it is added to the map.
    fn map_script(&self, data_json: &str) -> String {
        format!(
            "<script>\n\
             const data = {data};\n\
             const map = L.map('map').setView([{lat}, {lon}], {zoom});\n\
             L.tileLayer('{tiles}', {{ attribution: '{attribution}' }}).addTo(map);\n\
             let heat = null;\n\
             function showFrame(index) {{\n\
               if (heat) {{ map.removeLayer(heat); }}\n\
               heat = L.heatLayer(data.frames[index], {{\n\
                 radius: {radius},\n\
                 gradient: {{ 0.2: 'blue', 0.4: 'lime', 0.6: 'orange', 1: 'red' }}\n\
               }}).addTo(map);\n\
               heat._canvas.style.opacity = {max_opacity};\n\
               document.getElementById('frame-label').textContent = data.labels[index];\n\
               document.getElementById('frame-slider').value = index;\n\
             }}\n\
             const slider = document.getElementById('frame-slider');\n\
             slider.addEventListener('input', function () {{\n\
               stopPlayback();\n\
               showFrame(Number(this.value));\n\
             }});\n\
             let timer = null;\n\
             function stopPlayback() {{\n\
               if (timer) {{ clearInterval(timer); timer = null; }}\n\
               document.getElementById('play-toggle').textContent = 'Play';\n\
             }}\n\
             function startPlayback() {{\n\
               timer = setInterval(function () {{\n\
                 const next = (Number(slider.value) + 1) % data.frames.length;\n\
                 showFrame(next);\n\
               }}, {interval});\n\
               document.getElementById('play-toggle').textContent = 'Pause';\n\
             }}\n\
             document.getElementById('play-toggle').addEventListener('click', function () {{\n\
               if (timer) {{ stopPlayback(); }} else {{ startPlayback(); }}\n\
             }});\n\
             showFrame(0);\n\
             {autoplay}\n\
             </script>",
            data = data_json,
            lat = self.center.0,
            lon = self.center.1,
            zoom = self.zoom,
            tiles = TILE_URL,
            attribution = TILE_ATTRIBUTION,
            radius = self.radius,
            max_opacity = self.max_opacity,
            interval = FRAME_INTERVAL_MS,
            autoplay = if self.auto_play { "startPlayback();" } else { "" },
        )
    }
}

#[async_trait]
impl ChartRenderer for YearlyHeatMapChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        let frame_count = self.frames.frames.len();
        if frame_count != self.frames.labels.len() {
            return Err(crimeviz_common::CrimeVizError::render(format!(
                "heat map frame/label mismatch: {} frames, {} labels",
                frame_count,
                self.frames.labels.len()
            )));
        }

        let data_json = self.frame_json()?;
        let body = format!(
            "<h2>{title}</h2>\n\
             <div id=\"map\" style=\"width:{width}px;height:{height}px;\"></div>\n\
             <div style=\"margin-top:8px;display:flex;align-items:center;gap:12px;\">\n\
             <button id=\"play-toggle\">Play</button>\n\
             <input id=\"frame-slider\" type=\"range\" min=\"0\" max=\"{max_index}\" \
             value=\"0\" step=\"1\" style=\"width:400px;\">\n\
             <span id=\"frame-label\"></span>\n\
             </div>\n\
             {script}",
            title = escape_text(&config.title),
            width = config.width,
            height = config.height,
            max_index = frame_count.saturating_sub(1),
            script = self.map_script(&data_json),
        );

        let html = html_document(&config.title, &self.head_extra(), &body);
        write_html(path, &html)?;
        tracing::info!(
            frames = frame_count,
            "Successfully rendered yearly heat map to {}",
            path.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "yearly_heat_map"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_frames() -> HeatFrames {
        HeatFrames {
            labels: vec!["2003".to_string(), "2004".to_string()],
            frames: vec![vec![(37.78, -122.41), (37.76, -122.43)], vec![]],
        }
    }

    #[test]
    fn test_defaults() {
        let chart = YearlyHeatMapChart::new(sample_frames());
        assert_eq!(chart.center, (37.7749, -122.4194));
        assert_eq!(chart.zoom, 12);
        assert_eq!(chart.radius, 15);
        assert_eq!(chart.max_opacity, 0.8);
        assert!(chart.auto_play);
    }

    #[test]
    fn test_frame_json_embeds_coordinates() {
        let chart = YearlyHeatMapChart::new(sample_frames());
        let json = chart.frame_json().unwrap();
        assert!(json.contains("\"labels\":[\"2003\",\"2004\"]"));
        assert!(json.contains("[37.78,-122.41]"));
        // The empty 2004 frame is preserved for index alignment
        assert!(json.contains("],[]]"));
    }

    #[tokio::test]
    async fn test_render_to_file() {
        let (chart, config) = YearlyHeatMapChart::with_config(
            "Crime Heat Map Over Time",
            sample_frames(),
            (37.7749, -122.4194),
            12,
        );

        let dir = tempdir().unwrap();
        let path = dir.path().join("heat_map.html");
        chart.render_to_file(&config, &path).await.unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("leaflet.css"));
        assert!(html.contains("leaflet-heat.js"));
        assert!(html.contains("0.2: 'blue'"));
        // The opacity cap lands on the layer canvas; the plugin itself has
        // no such option
        assert!(html.contains("heat._canvas.style.opacity = 0.8;"));
        assert!(!html.contains("maxOpacity"));
        assert!(html.contains("id=\"frame-slider\""));
        assert!(html.contains("max=\"1\""));
        assert!(html.contains("startPlayback();"));
        assert!(html.contains("\"2003\""));
    }

    #[tokio::test]
    async fn test_render_rejects_misaligned_frames() {
        let mut frames = sample_frames();
        frames.labels.pop();
        let chart = YearlyHeatMapChart::new(frames);
        let config = ChartConfig::default();

        let dir = tempdir().unwrap();
        let path = dir.path().join("heat_map.html");
        assert!(chart.render_to_file(&config, &path).await.is_err());
    }
}
