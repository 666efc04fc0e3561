use std::fs;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use oilfield_charts::data::columns::wells;
use oilfield_charts::data::loader::load_table;
use oilfield_charts::ProductionMode;

#[test]
fn loads_csv_with_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crm.csv");
    fs::write(
        &path,
        "date,17_oil_true,17_oil_pred\n\
         2021-01-01,12.5,13.1\n\
         2021-02-01,,12.9\n\
         2021-03-01,NaN,11.0\n",
    )
    .unwrap();

    let t = load_table(&path).unwrap();
    assert_eq!(t.index, ["2021-01-01", "2021-02-01", "2021-03-01"]);
    assert_eq!(t.column_names(), ["17_oil_true", "17_oil_pred"]);
    let y_true = t.column("17_oil_true").unwrap();
    assert_eq!(y_true[0], 12.5);
    assert!(y_true[1].is_nan());
    assert!(y_true[2].is_nan());
    assert_eq!(wells(&t, ProductionMode::Oil), ["17"]);
}

#[test]
fn csv_rejects_text_in_numeric_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "date,a\n2021-01-01,twelve\n").unwrap();
    let err = load_table(&path).unwrap_err();
    assert!(format!("{err:#}").contains("twelve"), "{err:#}");
}

#[test]
fn loads_json_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("errors.json");
    fs::write(
        &path,
        r#"[
            {"date": "2021-01-01", "w1": 5.0, "w2": null},
            {"date": "2021-02-01", "w1": -5.0, "w2": 2}
        ]"#,
    )
    .unwrap();

    let t = load_table(&path).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.width(), 2);
    assert!(t.column("w2").unwrap()[0].is_nan());
    assert_eq!(t.column("w2").unwrap()[1], 2.0);
    assert_eq!(t.column("w1").unwrap(), [5.0, -5.0]);
}

#[test]
fn json_columns_keep_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ordered.json");
    fs::write(
        &path,
        r#"[{"date": "2021-01-01", "zeta": 1.0, "alpha": 2.0, "mid": 3.0}]"#,
    )
    .unwrap();

    let t = load_table(&path).unwrap();
    assert_eq!(t.column_names(), ["zeta", "alpha", "mid"]);
}

#[test]
fn json_without_row_label_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nolabel.json");
    fs::write(&path, r#"[{"w1": 1.0}]"#).unwrap();
    assert!(load_table(&path).is_err());
}

#[test]
fn loads_parquet_with_date_index_and_mixed_numeric_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("perf.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("well_group", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("actual", DataType::Int64, true),
        Field::new("predicted", DataType::Float32, true),
    ]));
    // Date32 is days since the epoch; 18628 = 2021-01-01
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["north", "north"])),
        Arc::new(Date32Array::from(vec![18628, 18659])),
        Arc::new(Int64Array::from(vec![Some(100), None])),
        Arc::new(Float32Array::from(vec![Some(150.0), Some(50.0)])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let t = load_table(&path).unwrap();
    // the first text/date column is the row label
    assert_eq!(t.index, ["north", "north"]);
    assert_eq!(t.column_names(), ["actual", "predicted"]);
    let actual = t.column("actual").unwrap();
    assert_eq!(actual[0], 100.0);
    assert!(actual[1].is_nan());
    assert_eq!(t.column("predicted").unwrap(), [150.0, 50.0]);
}

#[test]
fn formats_date_labels_as_iso() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dated.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Date32, false),
        Field::new("w1", DataType::Float32, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Date32Array::from(vec![18628, 18659])),
        Arc::new(Float32Array::from(vec![1.0, 2.0])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let mut writer = ArrowWriter::try_new(fs::File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let t = load_table(&path).unwrap();
    assert_eq!(t.index, ["2021-01-01", "2021-02-01"]);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    fs::write(&path, "").unwrap();
    let err = load_table(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported file extension"), "{err}");
}
