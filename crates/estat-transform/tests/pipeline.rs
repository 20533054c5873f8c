//! End-to-end tests: gzip TSV on disk to cleaned long-form frames.

use std::io::Write;

use estat_common::any_to_string;
use estat_ingest::DataSource;
use estat_model::{DatasetProfile, ErrorKind};
use estat_transform::{
    PipelineError, PipelineStats, TransformError, attach_iso3, infant_life_expectancy,
    observations, poverty_rate, run_pipeline,
};
use flate2::Compression;
use flate2::write::GzEncoder;
use polars::prelude::DataFrame;
use tempfile::NamedTempFile;

const LIFE_EXPECTANCY: &str = "freq,unit,sex,age,geo\\TIME_PERIOD\t2019 \t2020 \n\
                               A,YR,F,Y_LT1,DE\t83.7 \t83.6 \n\
                               A,YR,M,Y1,[IT]\t81.1 b\t: \n\
                               A,YR,T,Y25,CH\t57.9 \t57.5 e\n";

const POVERTY: &str = "freq,wstatus,sex,age,unit,geo\\TIME_PERIOD\t2019 \t2020 \n\
                       A,EMP,T,Y18-64,PC,EL\t11.0 \t10.9 b\n\
                       A,EMP,T,Y18-64,PC,EU27_2020\t8.9 \t8.5 p\n\
                       A,EMP,T,Y_GE65,PC,[RO]\t: u\t13.2 \n";

fn gzip_file(content: &str) -> NamedTempFile {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    let bytes = encoder.finish().unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file
}

fn render(df: &DataFrame) -> String {
    (0..df.height())
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| {
                    format!(
                        "{}={}",
                        column.name(),
                        any_to_string(column.get(idx).unwrap())
                    )
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn life_expectancy_end_to_end() {
    let file = gzip_file(LIFE_EXPECTANCY);
    let source = DataSource::from(file.path());

    let output = run_pipeline(&source, &DatasetProfile::life_expectancy()).unwrap();

    assert_eq!(
        output.stats,
        PipelineStats {
            raw_rows: 3,
            year_columns: 2,
            expanded_rows: 6,
            dropped_rows: 1,
            filtered_rows: 0,
            output_rows: 5,
        }
    );
    insta::assert_snapshot!(render(&output.frame), @r"
    sex=F age=1 country=DE year=2019 life_exp=83.7
    sex=F age=1 country=DE year=2020 life_exp=83.6
    sex=M age=1 country=IT year=2019 life_exp=81.1
    sex=T age=25 country=CH year=2019 life_exp=57.9
    sex=T age=25 country=CH year=2020 life_exp=57.5
    ");
}

#[test]
fn infant_variant_keeps_age_one() {
    let file = gzip_file(LIFE_EXPECTANCY);

    let df = infant_life_expectancy(&DataSource::from(file.path())).unwrap();

    insta::assert_snapshot!(render(&df), @r"
    sex=F country=DE year=2019 life_exp=83.7
    sex=F country=DE year=2020 life_exp=83.6
    sex=M country=IT year=2019 life_exp=81.1
    ");
}

#[test]
fn rerunning_gives_identical_output() {
    let file = gzip_file(LIFE_EXPECTANCY);
    let source = DataSource::from(file.path());
    let profile = DatasetProfile::life_expectancy();

    let first = run_pipeline(&source, &profile).unwrap();
    let second = run_pipeline(&source, &profile).unwrap();

    assert!(first.frame.equals(&second.frame));
    assert_eq!(first.stats, second.stats);
}

#[test]
fn poverty_rate_end_to_end() {
    let file = gzip_file(POVERTY);

    let df = poverty_rate(&DataSource::from(file.path())).unwrap();

    insta::assert_snapshot!(render(&df), @r"
    freq=A wstatus=EMP sex=T age=Y18-64 unit=PC country=EL year=2019 poverty_rate=11
    freq=A wstatus=EMP sex=T age=Y18-64 unit=PC country=EL year=2020 poverty_rate=10.9
    freq=A wstatus=EMP sex=T age=Y18-64 unit=PC country=EU27_2020 year=2019 poverty_rate=8.9
    freq=A wstatus=EMP sex=T age=Y18-64 unit=PC country=EU27_2020 year=2020 poverty_rate=8.5
    freq=A wstatus=EMP sex=T age=Y_GE65 unit=PC country=RO year=2020 poverty_rate=13.2
    ");
}

#[test]
fn iso3_enrichment_drops_aggregates() {
    let file = gzip_file(POVERTY);
    let df = poverty_rate(&DataSource::from(file.path())).unwrap();

    let enriched = attach_iso3(&df).unwrap();

    let iso3: Vec<Option<&str>> = enriched
        .column("country_iso3")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(iso3, vec![Some("GRC"), Some("GRC"), Some("ROU")]);
}

#[test]
fn observations_follow_output_order() {
    let file = gzip_file(LIFE_EXPECTANCY);
    let profile = DatasetProfile::infant_life_expectancy();
    let output = run_pipeline(&DataSource::from(file.path()), &profile).unwrap();

    let rows = observations(&output.frame, &profile).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].country(), Some("IT"));
    assert_eq!(rows[2].age, None);
    insta::assert_debug_snapshot!(rows[0], @r#"
    Observation {
        dimensions: [
            (
                "sex",
                "F",
            ),
            (
                "country",
                "DE",
            ),
        ],
        age: None,
        year: 2019,
        value: 83.7,
    }
    "#);
}

#[test]
fn token_count_mismatch_is_a_schema_error() {
    let file = gzip_file(
        "freq,unit,sex,age,geo\\TIME_PERIOD\t2020 \n\
         A,YR,F,Y1,DE\t80.0\n\
         A,YR,F,DE\t80.0\n",
    );

    let err = run_pipeline(
        &DataSource::from(file.path()),
        &DatasetProfile::life_expectancy(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Transform(TransformError::TokenCountMismatch { row: 1, .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn ragged_rows_are_a_format_error() {
    let file = gzip_file("freq,unit,sex,age,geo\\TIME_PERIOD\t2019\t2020\nA,YR,F,Y1,DE\t80.0\n");

    let err = run_pipeline(
        &DataSource::from(file.path()),
        &DatasetProfile::life_expectancy(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn missing_source_is_an_io_error() {
    let err = run_pipeline(
        &DataSource::parse("/nonexistent/demo_mlexpec.tsv.gz"),
        &DatasetProfile::life_expectancy(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.kind().to_string(), "IOError");
}
