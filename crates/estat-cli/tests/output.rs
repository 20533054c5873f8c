//! Tests for result writers and catalog resolution.

use std::io::Write;

use estat_cli::catalog::resolve_catalog;
use estat_cli::output::{OutputFormat, write_csv, write_json_lines, write_output};
use estat_model::DatasetProfile;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tempfile::NamedTempFile;

fn infant_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("sex".into(), vec!["F", "M"]).into_column(),
        Series::new("country".into(), vec!["DE", "EL"]).into_column(),
        Series::new("year".into(), vec![2019i64, 2020]).into_column(),
        Series::new("life_exp".into(), vec![83.7, 81.1]).into_column(),
    ])
    .unwrap()
}

#[test]
fn writes_csv_with_header() {
    let mut buffer = Vec::new();
    write_csv(&infant_frame(), &mut buffer).unwrap();

    insta::assert_snapshot!(String::from_utf8(buffer).unwrap(), @r"
    sex,country,year,life_exp
    F,DE,2019,83.7
    M,EL,2020,81.1
    ");
}

#[test]
fn writes_json_lines() {
    let mut buffer = Vec::new();
    let count = write_json_lines(
        &infant_frame(),
        &DatasetProfile::infant_life_expectancy(),
        &mut buffer,
    )
    .unwrap();

    assert_eq!(count, 2);
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        r#"{"dimensions":[["sex","F"],["country","DE"]],"year":2019,"value":83.7}"#
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn json_lines_carry_iso3_codes() {
    let mut df = infant_frame();
    df.with_column(Series::new("country_iso3".into(), vec!["DEU", "GRC"]))
        .unwrap();

    let mut buffer = Vec::new();
    write_json_lines(&df, &DatasetProfile::infant_life_expectancy(), &mut buffer).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert!(text.lines().nth(1).unwrap().contains(r#"["country_iso3","GRC"]"#));
}

#[test]
fn writes_output_file() {
    let file = NamedTempFile::new().unwrap();

    write_output(
        &infant_frame(),
        &DatasetProfile::infant_life_expectancy(),
        file.path(),
        OutputFormat::Csv,
    )
    .unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    assert!(text.starts_with("sex,country,year,life_exp\n"));
}

#[test]
fn catalog_defaults_to_builtin_profiles() {
    let catalog = resolve_catalog(None).unwrap();
    assert_eq!(
        catalog.names(),
        vec!["life-expectancy", "infant-life-expectancy", "poverty-rate"]
    );
}

#[test]
fn catalog_file_extends_builtin_profiles() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[profile]]
name = "unemployment"
dimensions = ["freq", "unit", "sex", "age", "geo"]
renames = [{{ from = "geo", to = "country" }}]
year_rule = "first-four-digits"
value_rule = "first-number"
value_column = "rate"
"#
    )
    .unwrap();

    let catalog = resolve_catalog(Some(file.path())).unwrap();

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.get("unemployment").unwrap().value_column, "rate");
}

#[test]
fn unreadable_catalog_is_reported() {
    let err = resolve_catalog(Some(std::path::Path::new("/nonexistent/profiles.toml")))
        .unwrap_err();
    assert!(err.to_string().contains("load profile catalog"));
}
