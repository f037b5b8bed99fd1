use std::io::Write;

use csv::Writer;

use crate::decode::TimeSeries;
use crate::export::ExportError;

/// Write `time,<channel names>` followed by one row per sample.
pub fn write_csv<W: Write>(series: &TimeSeries, writer: W) -> Result<(), ExportError> {
    if series.is_empty() {
        return Err(ExportError::EmptySeries);
    }
    let mut writer = Writer::from_writer(writer);

    let mut header = vec!["time".to_owned()];
    header.extend(series.channels().iter().map(|c| c.name.clone()));
    writer.write_record(&header)?;

    let mut row = Vec::with_capacity(header.len());
    for (i, t) in series.time().iter().enumerate() {
        row.clear();
        row.push(t.to_string());
        row.extend(series.channels().iter().map(|c| c.values[i].to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_bytes, DecodeConfig};

    #[test]
    fn writes_header_and_rows() {
        let series = decode_bytes(
            "rec.csv",
            b"i,a,b\n0,1.5,10\n1,2,20\n",
            &DecodeConfig::multi(),
        )
        .series;
        let mut out = Vec::new();
        write_csv(&series, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "time,Channel 1,Channel 2\n0,1.5,10\n0.002,2,20\n"
        );
    }

    #[test]
    fn exported_file_decodes_back() {
        let series = decode_bytes(
            "rec.json",
            br#"{"data": [{"counter": 0, "ch1": 4}, {"counter": 1, "ch1": 5}]}"#,
            &DecodeConfig::default(),
        )
        .series;
        let mut out = Vec::new();
        write_csv(&series, &mut out).unwrap();
        let back = decode_bytes("back.csv", &out, &DecodeConfig::default()).series;
        assert_eq!(back, series);
    }

    #[test]
    fn empty_series_is_rejected() {
        let mut out = Vec::new();
        assert!(matches!(
            write_csv(&TimeSeries::empty(), &mut out),
            Err(ExportError::EmptySeries)
        ));
        assert!(out.is_empty());
    }
}
