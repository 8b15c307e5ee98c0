use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::{FeatureCollection, GeoFeature};
use crate::render::{render_chart, render_map, render_page, ChartConfig, MapConfig, PageUrls};

/// Write a self-contained site for `features` into `out_dir`.
///
/// Produces the page, the map scene, the chart (SVG and HTML fragment) and
/// the features as GeoJSON. Returns the files written.
pub fn write_site(
    features: &[GeoFeature],
    map: &MapConfig,
    chart: &ChartConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let rendered_chart = render_chart(features, chart);
    let files = [
        ("index.html", render_page(map, chart, &PageUrls::static_files())),
        ("map.json", serde_json::to_string(&render_map(features, map))?),
        ("chart.svg", rendered_chart.to_svg()),
        ("chart.html", rendered_chart.to_html()),
        (
            "nodes.geojson",
            serde_json::to_string(&FeatureCollection::new(features))?,
        ),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = out_dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    info!(
        "Wrote site for {} nodes / {} ASNs to {}",
        rendered_chart.summary.nodes,
        rendered_chart.summary.asns,
        out_dir.display()
    );
    Ok(written)
}
