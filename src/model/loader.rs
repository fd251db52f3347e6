use super::TransitionModel;
use crate::alphabet::Alphabet;
use crate::error::{SfResult, SubForgeError};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

/// On-disk layouts for a transition model.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModelFormat {
    /// Nested object: `{"a": {"b": 0.01, ...}, ...}`.
    Json,
    /// `from,to,probability` rows with a header.
    Csv,
    /// Same as `Csv`, tab separated.
    Tsv,
}

impl ModelFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
            .ok_or_else(|| {
                let known: Vec<String> = Self::iter().map(|f| f.to_string()).collect();
                SubForgeError::Config(format!(
                    "cannot infer model format from '{}'; expected one of: {}",
                    path.display(),
                    known.join(", ")
                ))
            })
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            _ => b',',
        }
    }
}

type NestedTable = BTreeMap<String, BTreeMap<String, f64>>;

fn single_char(key: &str) -> SfResult<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SubForgeError::Validation(format!(
            "model key {:?} is not a single symbol",
            key
        ))),
    }
}

/// The model alphabet is every symbol used as either key, in sorted order.
fn from_triples(triples: Vec<(char, char, f64)>) -> SfResult<TransitionModel> {
    let symbols: BTreeSet<char> = triples.iter().flat_map(|&(a, b, _)| [a, b]).collect();
    let alphabet = Alphabet::new(symbols)?;
    debug!(
        "Loaded {} transitions over {} symbols",
        triples.len(),
        alphabet.len()
    );
    TransitionModel::from_entries(alphabet, triples)
}

pub fn read_json<R: Read>(reader: R) -> SfResult<TransitionModel> {
    let table: NestedTable = serde_json::from_reader(reader)?;
    let mut triples = Vec::new();
    for (from, row) in &table {
        let a = single_char(from)?;
        for (to, &p) in row {
            triples.push((a, single_char(to)?, p));
        }
    }
    from_triples(triples)
}

pub fn read_delimited<R: Read>(reader: R, format: ModelFormat) -> SfResult<TransitionModel> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(true)
        .quoting(format != ModelFormat::Tsv)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut triples = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.len() < 3 {
            return Err(SubForgeError::Validation(format!(
                "row {} has {} fields, expected 3",
                row_idx + 1,
                rec.len()
            )));
        }
        let a = single_char(&rec[0])?;
        let b = single_char(&rec[1])?;
        let p: f64 = rec[2].trim().parse().map_err(|_| {
            SubForgeError::Validation(format!(
                "row {}: invalid probability {:?}",
                row_idx + 1,
                &rec[2]
            ))
        })?;
        triples.push((a, b, p));
    }
    from_triples(triples)
}

pub fn write_json<W: Write>(model: &TransitionModel, writer: W) -> SfResult<()> {
    let mut table = NestedTable::new();
    for (a, b, p) in model.entries() {
        table
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), p);
    }
    serde_json::to_writer(writer, &table)?;
    Ok(())
}

pub fn write_delimited<W: Write>(
    model: &TransitionModel,
    writer: W,
    format: ModelFormat,
) -> SfResult<()> {
    // TSV is written unquoted, so these symbols would split or merge rows.
    if format == ModelFormat::Tsv {
        if let Some(&c) = model
            .alphabet()
            .symbols()
            .iter()
            .find(|&&c| matches!(c, '\t' | '\n' | '\r'))
        {
            return Err(SubForgeError::Validation(format!(
                "symbol {:?} cannot be stored in a tsv model; use csv or json",
                c
            )));
        }
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .quote_style(if format == ModelFormat::Tsv {
            csv::QuoteStyle::Never
        } else {
            csv::QuoteStyle::Necessary
        })
        .from_writer(writer);

    wtr.write_record(["from", "to", "probability"])?;
    for (a, b, p) in model.entries() {
        // `{}` on f64 prints the shortest string that parses back to the same bits.
        wtr.write_record([a.to_string(), b.to_string(), format!("{}", p)])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn load_model<P: AsRef<Path>>(path: P, format: Option<ModelFormat>) -> SfResult<TransitionModel> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => ModelFormat::from_path(path)?,
    };
    info!("📂 Loading transition model ({}): {}", format, path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match format {
        ModelFormat::Json => read_json(reader),
        ModelFormat::Csv | ModelFormat::Tsv => read_delimited(reader, format),
    }
}

pub fn save_model<P: AsRef<Path>>(
    model: &TransitionModel,
    path: P,
    format: Option<ModelFormat>,
) -> SfResult<()> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => ModelFormat::from_path(path)?,
    };
    info!("💾 Saving transition model ({}): {}", format, path.display());

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ModelFormat::Json => write_json(model, &mut writer)?,
        ModelFormat::Csv | ModelFormat::Tsv => write_delimited(model, &mut writer, format)?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ModelFormat>().unwrap(), ModelFormat::Json);
        assert_eq!(ModelFormat::from_path("m.tsv").unwrap(), ModelFormat::Tsv);
        assert!(ModelFormat::from_path("m.bin").is_err());
    }

    #[test]
    fn multi_char_keys_are_rejected() {
        let json = r#"{"ab": {"c": 0.5}}"#;
        assert!(read_json(json.as_bytes()).is_err());
    }
}
