//! Tests for loading gzip-compressed TSV exports from disk and over HTTP.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use estat_ingest::{DataSource, IngestError, load_raw_table};
use estat_model::ErrorKind;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::NamedTempFile;

const LIFE_EXPECTANCY: &str = "freq,unit,sex,age,geo\\TIME_PERIOD\t2019 \t2020 \n\
                               A,YR,F,Y_LT1,DE\t83.7 \t83.6 \n\
                               A,YR,M,Y25,[IT]\t57.1 b\t: \n\
                               A,YR,T,Y_GE85,EU27_2020\t: c\t6.5 e\n";

fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn gzip_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&gzip(content)).unwrap();
    file
}

/// Serves a single HTTP response on a loopback port and returns its URL.
fn serve_once(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!(
        "http://{}/estat/demo_mlexpec.tsv.gz",
        listener.local_addr().unwrap()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut chunk).unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
        }

        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/octet-stream\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        // The client may hang up once it has seen the status line.
        let _ = stream
            .write_all(head.as_bytes())
            .and_then(|()| stream.write_all(&body))
            .and_then(|()| stream.flush());
    });

    (url, handle)
}

#[test]
fn loads_gzip_tsv_from_path() {
    let file = gzip_file(LIFE_EXPECTANCY);
    let source = DataSource::from(file.path());

    let table = load_raw_table(&source).unwrap();

    assert_eq!(table.height(), 3);
    assert_eq!(
        table.columns(),
        ["freq,unit,sex,age,geo\\TIME_PERIOD", "2019 ", "2020 "]
    );
    assert_eq!(table.origin(), file.path().display().to_string());

    let nulls = table.frame().column("2020 ").unwrap().null_count();
    assert_eq!(nulls, 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let source = DataSource::parse("/nonexistent/demo_mlexpec.tsv.gz");
    let err = load_raw_table(&source).unwrap_err();

    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn uncompressed_file_is_an_io_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{LIFE_EXPECTANCY}").unwrap();

    let err = load_raw_table(&DataSource::from(file.path())).unwrap_err();

    assert!(matches!(err, IngestError::Decompress { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn ragged_rows_are_a_format_error() {
    let file = gzip_file("key\\TIME_PERIOD\t2019\t2020\nA,DE\t1.0\t2.0\nA,FR\t1.0\n");

    let err = load_raw_table(&DataSource::from(file.path())).unwrap_err();

    assert!(matches!(err, IngestError::RaggedRow { line: 3, .. }));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn empty_archive_is_a_format_error() {
    let file = gzip_file("");

    let err = load_raw_table(&DataSource::from(file.path())).unwrap_err();

    assert!(matches!(err, IngestError::EmptyFile { .. }));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn loads_gzip_tsv_from_url() {
    let (url, server) = serve_once("200 OK", gzip(LIFE_EXPECTANCY));
    let source = DataSource::parse(&url);
    assert!(matches!(source, DataSource::Url(_)));

    let table = load_raw_table(&source).unwrap();
    server.join().unwrap();

    assert_eq!(table.height(), 3);
    assert_eq!(
        table.columns(),
        ["freq,unit,sex,age,geo\\TIME_PERIOD", "2019 ", "2020 "]
    );
    assert_eq!(table.origin(), url);
}

#[test]
fn http_error_status_is_an_io_error() {
    let (url, server) = serve_once("404 Not Found", b"not found".to_vec());

    let err = load_raw_table(&DataSource::Url(url.clone())).unwrap_err();
    server.join().unwrap();

    match &err {
        IngestError::HttpStatus { url: failed, status } => {
            assert_eq!(*status, 404);
            assert_eq!(failed, &url);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.kind(), ErrorKind::Io);
}
