use std::fs;
use std::path::Path;

use saf_lca::config::dashboard_config::DashboardConfig;
use saf_lca::config::monetization_factors::MonetizationTier;
use saf_lca::pages::contribution::{self, ContributionOptions};
use saf_lca::pages::monetization::{self, MonetizationPageOptions};
use saf_lca::pages::overview::{self, OverviewOptions};
use saf_lca::pages::page_output::PageContext;
use saf_lca::pages::prospective::{self, ProspectiveOptions};
use saf_lca::pages::raw_data::{self, RawDataOptions};
use saf_lca::pages::heatmap;
use saf_lca::utils::csv_export::CsvExporter;

const MASTER: &str = "\
System,Fuel,Scenario,Process,Climate change (kg CO2 eq),Land use (Pt),Energy resources: non-renewable (MJ)
1. Plant construction,STL,0,steel,1.0,10,5
2. Sugar beet,STL,1,beet,20.0,100,50
4. Electrolysis,PTL,0,electrolysis,2.0,5,x
5. Transport,HEFA,0,truck,0.5,1,1
2. Oil crops,HEFA,2,palm oil,3.0,200,2
";

struct Fixture {
    _dir: tempfile::TempDir,
    config: DashboardConfig,
    exporter: CsvExporter,
}

fn fixture(with_master: bool, scenarios: &[(&str, &str)]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    if with_master {
        fs::write(dir.path().join("master.csv"), MASTER).unwrap();
    }
    for (name, contents) in scenarios {
        fs::write(dir.path().join(format!("{}.csv", name)), contents).unwrap();
    }

    let config = DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        master_file: "master.csv".to_string(),
        output_dir: dir.path().join("out"),
        timestamped_output: false,
        ..DashboardConfig::default()
    };
    let exporter = CsvExporter::new(&config.output_dir, false).unwrap();
    Fixture { _dir: dir, config, exporter }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn overview_writes_chart_for_requested_impact() {
    let f = fixture(true, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);
    let output = overview::render(&ctx, &OverviewOptions { impact: Some("land use (pt)".into()) }).unwrap();

    assert_eq!(output.files.len(), 1);
    let svg = read(&output.files[0]);
    assert!(svg.contains("Land use (Pt) by Fuel Variant"));
    assert!(svg.contains("HEFA4"));
}

#[test]
fn overview_reports_missing_workbook() {
    let f = fixture(false, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);
    let err = overview::render(&ctx, &OverviewOptions::default()).unwrap_err();
    assert!(err.is_missing_input());
    assert!(err.to_string().starts_with("Could not find"));
}

#[test]
fn monetization_export_flags_corrected_families() {
    let f = fixture(true, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);
    let options = MonetizationPageOptions {
        tier: MonetizationTier::Central,
        co2_correction: true,
        export_csv: true,
    };
    let output = monetization::render(&ctx, &options).unwrap();

    let csv_path = f.exporter.path_for("fuel_variant_monetization.csv");
    assert!(output.files.contains(&csv_path));
    let csv = read(&csv_path);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 17);
    assert_eq!(lines[0], "Variant,Fuel,Monetized Cost (€)");
    assert!(lines.contains(&"STL1,STL,❌"));
    assert!(lines.contains(&"PTL4,PTL,❌"));
    // truck only: 0.5 × 0.1025 + 1 × 0.000175 + 1 × 0.0013
    assert!(lines.contains(&"HEFA1,HEFA,0.05"));
    // truck and palm oil: 3.5 × 0.1025 + 201 × 0.000175 + 3 × 0.0013
    assert!(lines.contains(&"HEFA2,HEFA,0.4"));
    assert!(lines.contains(&"BTL,BTL,0.0"));

    // Every unmatched category is reported
    assert_eq!(output.warnings.len(), 12);
}

#[test]
fn monetization_without_workbook_writes_nothing() {
    let f = fixture(false, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);
    let options = MonetizationPageOptions { export_csv: true, ..MonetizationPageOptions::default() };
    let err = monetization::render(&ctx, &options).unwrap_err();

    assert!(err.is_missing_input());
    assert!(!f.exporter.path_for(monetization::FACTOR_CHART_FILE).exists());
    assert!(!f.exporter.path_for("fuel_variant_monetization.csv").exists());
}

#[test]
fn contribution_and_heatmap_render() {
    let f = fixture(true, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);

    let output = contribution::render(&ctx, &ContributionOptions::default()).unwrap();
    let svg = read(&output.files[0]);
    assert!(svg.contains("1. Construction"));
    assert!(svg.contains("STL1"));

    let output = heatmap::render(&ctx).unwrap();
    let svg = read(&output.files[0]);
    assert!(svg.contains("palm oil"));
    assert!(svg.contains("Climate change"));
}

#[test]
fn raw_data_export_filters_by_variant() {
    let f = fixture(true, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);
    let options = RawDataOptions { variant: Some("hefa2".into()), preview_rows: 0 };
    let output = raw_data::render(&ctx, &options).unwrap();

    let csv = read(&output.files[0]);
    assert!(output.files[0].ends_with("raw_data_HEFA2.csv"));
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("2. Raw material acquisition"));

    let options = RawDataOptions { variant: Some("JET1".into()), preview_rows: 0 };
    assert!(raw_data::render(&ctx, &options).is_err());
}

#[test]
fn prospective_skips_missing_scenarios_and_late_years() {
    let optimistic = "Year,STL1,HEFA1\n2020,4.0,2.0\n2050,1.0,0.8\n2060,0.1,0.1\n";
    let pessimistic = "Year,STL1,HEFA1\n2020,4.5,2.5\n2050,3.0,2.0\n";
    let f = fixture(false, &[("Optimistic", optimistic), ("Pessimistic", pessimistic)]);
    let ctx = PageContext::new(&f.config, &f.exporter);

    let output = prospective::render(&ctx, &ProspectiveOptions::default()).unwrap();
    assert_eq!(output.warnings, vec!["Could not find `Middle.csv`. Skipped.".to_string()]);
    assert_eq!(output.files.len(), 3);

    let options: serde_json::Value = serde_json::from_str(&read(&f.exporter.path_for("prospective_trends.json"))).unwrap();
    assert_eq!(options["xAxis"]["data"], serde_json::json!([2020, 2050]));
    assert_eq!(options["series"][0]["name"], "Optimistic - STL1");
    assert_eq!(options["series"][1]["lineStyle"]["color"], "red");

    let grid = read(&f.exporter.path_for("prospective_grid.svg"));
    assert!(grid.contains("HEFA1"));
}

#[test]
fn prospective_without_any_scenario_renders_nothing() {
    let f = fixture(false, &[]);
    let ctx = PageContext::new(&f.config, &f.exporter);
    let output = prospective::render(&ctx, &ProspectiveOptions::default()).unwrap();
    assert!(output.files.is_empty());
    assert_eq!(output.warnings.len(), 4);
}
