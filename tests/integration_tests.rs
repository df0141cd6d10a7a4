use pretty_assertions::assert_eq;
use quake_processor::analyzers::{Chart, ChartBuilder, TsunamiAnalyzer};
use quake_processor::models::{CleanRow, Role, TsunamiFlag};
use quake_processor::processors::{CleaningPipeline, ColumnResolver, RowFilter};
use quake_processor::readers::EventReader;
use quake_processor::writers::ChartWriter;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const CATALOGUE: &str = "\
Magnitude, Depth ,CDI,Latitude,Longitude,Alert,Tsunami
7.0,14,8,-9.7963,159.596,green,1
6.9,25,4,-4.9559,100.738,green,0
7.0,579,3,-20.0508,-178.346,green,1
7.3,37,5,-19.2918,-172.129,green,1
6.6,624,0,-25.5948,178.278,green,1
bad,10,2,1.0,2.0,green,0
6.5,,4,3.0,4.0,,0
6.8,33,6,,,yellow,maybe
";

fn write_catalogue() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(CATALOGUE.as_bytes())
        .expect("Failed to write catalogue");
    file
}

#[test]
fn test_catalogue_end_to_end() {
    let file = write_catalogue();

    let table = EventReader::new().read_table(file.path()).unwrap();
    assert_eq!(table.row_count(), 8);

    let cleaned = CleaningPipeline::new().run(&table);

    assert_eq!(cleaned.assignment.get(Role::Magnitude), Some("magnitude"));
    assert_eq!(cleaned.assignment.get(Role::Depth), Some("depth"));
    assert_eq!(cleaned.assignment.get(Role::TsunamiIndicator), Some("tsunami"));
    assert_eq!(cleaned.rows.len(), 5);
    assert_eq!(cleaned.dropped_rows(), 3);
    assert_eq!(
        cleaned.rows[0],
        CleanRow::new(7.0, 14.0, TsunamiFlag::Yes).with_coordinates(-9.7963, 159.596)
    );

    let statistics = TsunamiAnalyzer::new().analyze(&cleaned).unwrap();
    assert_eq!(statistics.total_events, 5);
    assert_eq!(statistics.tsunami_events, 4);
    assert_eq!(statistics.located_tsunami_events, Some(4));
    assert!(statistics.key_findings().contains("80.0% of events"));

    let no = statistics.group(TsunamiFlag::No).unwrap();
    assert_eq!(no.magnitude.count, 1);
    assert_eq!(no.magnitude.std, None);
}

#[test]
fn test_mixed_quality_rows() {
    let input = "mag,depth,tsunami\n7.5,10,yes\nbad,5,no\n6.0,,no\n";
    let table = EventReader::new().read_from(input.as_bytes()).unwrap();

    let cleaned = CleaningPipeline::new().run(&table);

    assert_eq!(cleaned.rows, vec![CleanRow::new(7.5, 10.0, TsunamiFlag::Yes)]);
}

#[test]
fn test_pipeline_is_a_fixed_point() {
    let file = write_catalogue();
    let table = EventReader::new().read_table(file.path()).unwrap();
    let pipeline = CleaningPipeline::new();

    let first = pipeline.run(&table);
    let second = pipeline.run(&first.to_raw_table());

    assert_eq!(second.rows, first.rows);
    assert_eq!(second.dropped_rows(), 0);
}

#[test]
fn test_filter_never_grows_or_reorders() {
    let rows: Vec<CleanRow> = (0..20)
        .map(|i| CleanRow {
            magnitude: (i % 3 != 0).then_some(5.0 + i as f64 / 10.0),
            depth: Some(i as f64),
            latitude: None,
            longitude: None,
            tsunami_flag: (i % 4 != 0).then_some(TsunamiFlag::from_positive((i % 2) as f64)),
        })
        .collect();

    let kept = RowFilter::new().filter(rows.clone());

    assert!(kept.len() <= rows.len());
    let depths: Vec<f64> = kept.iter().filter_map(|r| r.depth).collect();
    let mut sorted = depths.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(depths, sorted);
}

#[test]
fn test_resolver_picks_lowest_index_match() {
    let resolver = ColumnResolver::new();
    let assignment = resolver.resolve(&["ID", "Lat Error", "Latitude", "Long", "Lon"]);

    assert_eq!(assignment.get(Role::Latitude), Some("lat_error"));
    assert_eq!(assignment.get(Role::Longitude), Some("long"));
    assert_eq!(assignment.get(Role::Magnitude), None);
}

#[test]
fn test_chart_export() {
    let file = write_catalogue();
    let table = EventReader::new().read_table(file.path()).unwrap();
    let cleaned = CleaningPipeline::new().run(&table);
    let charts = ChartBuilder::new().build(&cleaned);

    assert_eq!(charts.len(), 5);
    if let Chart::Scatter { series, .. } = &charts.charts[4] {
        assert_eq!(series[0].points.len(), 4);
    } else {
        panic!("expected geographic scatter as fifth chart");
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("charts.json");
    let writer = ChartWriter::new();
    writer.write_charts(&charts, &output_path).unwrap();

    assert!(output_path.exists());
    let info = writer.get_file_info(&output_path).unwrap();
    assert_eq!(
        info.titles.last().map(String::as_str),
        Some("Geographic Scatter of Tsunami-Generating Earthquakes")
    );
}
