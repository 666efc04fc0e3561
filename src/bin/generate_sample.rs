use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use oilfield_charts::data::columns::{column_name, wells};
use oilfield_charts::metrics::{mean, relative_error, std_dev};
use oilfield_charts::plots::performance::{ACTUAL_COLUMN, ERROR_COLUMN, PREDICTED_COLUMN};
use oilfield_charts::plots::statistics::{
    MEAN_CUMULATIVE_COLUMN, MEAN_DAILY_COLUMN, STD_CUMULATIVE_COLUMN, STD_DAILY_COLUMN,
};
use oilfield_charts::{ProductionMode, Side, Table};

const MONTHS: usize = 24;

/// Arps hyperbolic decline.
fn decline(q0: f64, di: f64, b: f64, t: f64) -> f64 {
    q0 / (1.0 + b * di * t).powf(1.0 / b)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mu + sigma * z
    }
}

/// Actual and forecast rates for every well and mode of one model.
///
/// `bias` skews the forecast, `noise` scales its scatter. Well `1044` is shut
/// in for the first quarter so the charts show the 0/0 gap.
fn model_dataset(dates: &[String], bias: f64, noise: f64, rng: &mut SimpleRng) -> Result<Table> {
    let layout = [("1021", 85.0), ("1033", 40.0), ("1044", 120.0), ("2107", 15.0)];
    let mut table = Table::new(dates.to_vec());

    for (well, q0) in layout {
        let water_cut = 0.3 + rng.next_f64() * 0.4;
        let actual_oil: Vec<f64> = (0..dates.len())
            .map(|t| {
                if well == "1044" && t < 3 {
                    0.0
                } else {
                    (decline(q0, 0.08, 0.6, t as f64) + rng.gauss(0.0, q0 * 0.05)).max(0.0)
                }
            })
            .collect();
        let pred_oil: Vec<f64> = actual_oil
            .iter()
            .enumerate()
            .map(|(t, &q)| {
                if q == 0.0 {
                    0.0
                } else {
                    q * (1.0 + bias) + rng.gauss(0.0, noise * q) + t as f64 * bias
                }
            })
            .collect();

        let to_liquid = |oil: &[f64]| -> Vec<f64> { oil.iter().map(|q| q / (1.0 - water_cut)).collect() };
        let actual_liq = to_liquid(&actual_oil);
        let pred_liq = to_liquid(&pred_oil);

        table.insert_column(column_name(well, ProductionMode::Oil, Side::True), actual_oil)?;
        table.insert_column(column_name(well, ProductionMode::Oil, Side::Pred), pred_oil)?;
        table.insert_column(column_name(well, ProductionMode::Liq, Side::True), actual_liq)?;
        table.insert_column(column_name(well, ProductionMode::Liq, Side::Pred), pred_liq)?;
    }
    Ok(table)
}

fn column_or_empty<'a>(table: &'a Table, name: &str) -> &'a [f64] {
    table.column(name).unwrap_or(&[])
}

/// Per-well relative error of oil rate.
fn error_table(dataset: &Table) -> Result<Table> {
    let mut errors = Table::new(dataset.index.clone());
    for well in wells(dataset, ProductionMode::Oil) {
        let y_true = column_or_empty(dataset, &column_name(&well, ProductionMode::Oil, Side::True));
        let y_pred = column_or_empty(dataset, &column_name(&well, ProductionMode::Oil, Side::Pred));
        errors.insert_column(well, relative_error(y_true, y_pred, false))?;
    }
    Ok(errors)
}

/// Field oil totals and their error.
fn performance_table(dataset: &Table) -> Result<Table> {
    let mut actual = vec![0.0; dataset.len()];
    let mut predicted = vec![0.0; dataset.len()];
    for well in wells(dataset, ProductionMode::Oil) {
        let y_true = column_or_empty(dataset, &column_name(&well, ProductionMode::Oil, Side::True));
        let y_pred = column_or_empty(dataset, &column_name(&well, ProductionMode::Oil, Side::Pred));
        for (t, (a, p)) in y_true.iter().zip(y_pred).enumerate() {
            actual[t] += a;
            predicted[t] += p;
        }
    }
    let error = relative_error(&actual, &predicted, false);
    Ok(Table::new(dataset.index.clone())
        .with_column(ACTUAL_COLUMN, actual)?
        .with_column(PREDICTED_COLUMN, predicted)?
        .with_column(ERROR_COLUMN, error)?)
}

/// Across-well mean / std of daily and cumulative absolute error per period.
fn statistics_table(dataset: &Table) -> Result<Table> {
    let n = dataset.len();
    let mut daily: Vec<Vec<f64>> = vec![Vec::new(); n];
    let mut cumulative: Vec<Vec<f64>> = vec![Vec::new(); n];

    for well in wells(dataset, ProductionMode::Oil) {
        let y_true = column_or_empty(dataset, &column_name(&well, ProductionMode::Oil, Side::True));
        let y_pred = column_or_empty(dataset, &column_name(&well, ProductionMode::Oil, Side::Pred));
        let running = |ys: &[f64]| -> Vec<f64> {
            ys.iter()
                .scan(0.0, |acc, y| {
                    *acc += y;
                    Some(*acc)
                })
                .collect()
        };

        let d = relative_error(y_true, y_pred, true);
        let c = relative_error(&running(y_true), &running(y_pred), true);
        for t in 0..n {
            daily[t].push(d[t]);
            cumulative[t].push(c[t]);
        }
    }

    let per_period = |rows: &[Vec<f64>], f: fn(&[f64]) -> f64| -> Vec<f64> {
        rows.iter().map(|r| f(r)).collect()
    };
    Ok(Table::new(dataset.index.clone())
        .with_column(MEAN_CUMULATIVE_COLUMN, per_period(&cumulative, mean))?
        .with_column(STD_CUMULATIVE_COLUMN, per_period(&cumulative, std_dev))?
        .with_column(MEAN_DAILY_COLUMN, per_period(&daily, mean))?
        .with_column(STD_DAILY_COLUMN, per_period(&daily, std_dev))?)
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["date".to_string()];
    header.extend(table.column_names().iter().cloned());
    writer.write_record(&header)?;

    for (row, date) in table.index.iter().enumerate() {
        let mut record = vec![date.clone()];
        record.extend(table.columns().map(|(_, values)| {
            let v = values[row];
            if v.is_nan() {
                String::new()
            } else {
                format!("{v:.4}")
            }
        }));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    let mut fields = vec![Field::new("date", DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(table.index.clone()))];
    for (name, values) in table.columns() {
        fields.push(Field::new(name, DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(values.to_vec())));
    }
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "sample_data".to_string());
    let out_dir = Path::new(&out_dir);
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let dates: Vec<String> = (0..MONTHS)
        .map(|m| format!("{}-{:02}-01", 2021 + m / 12, m % 12 + 1))
        .collect();

    // (model, forecast bias, forecast noise)
    let models = [("crm", 0.04, 0.08), ("ml", -0.02, 0.15)];

    for (model, bias, noise) in models {
        let dataset = model_dataset(&dates, bias, noise, &mut rng)?;

        write_csv(&dataset, &out_dir.join(format!("{model}_dataset.csv")))?;
        write_parquet(&dataset, &out_dir.join(format!("{model}_dataset.parquet")))?;
        write_csv(&error_table(&dataset)?, &out_dir.join(format!("{model}_errors.csv")))?;
        write_csv(
            &performance_table(&dataset)?,
            &out_dir.join(format!("{model}_performance.csv")),
        )?;
        write_csv(
            &statistics_table(&dataset)?,
            &out_dir.join(format!("{model}_statistics.csv")),
        )?;
        log::info!("wrote sample tables for model '{model}'");
    }

    println!(
        "Wrote {} models x {MONTHS} months of sample data to {}",
        models.len(),
        out_dir.display()
    );
    Ok(())
}
