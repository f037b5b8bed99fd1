use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::decode::normalize::{parse_sample, RowCollector};
use crate::decode::source::{Decoded, Decoder};
use crate::decode::{DecodeConfig, DecodeError};

/// Reads the point list of the first `<polyline>` (or, failing that, the first
/// `<polygon>`) as `x = time`, `y = value`. There is no sampling rate.
pub struct SvgDecoder;

impl Decoder for SvgDecoder {
    fn decode(&self, input: &[u8], _config: &DecodeConfig) -> Result<Decoded, DecodeError> {
        let text = std::str::from_utf8(input)?;
        let text = text.trim_start_matches('\u{feff}');

        let Some(points) = find_point_list(text)? else {
            log::debug!("svg: no polyline or polygon with points");
            return Ok(Decoded::empty());
        };

        let mut rows = RowCollector::new(vec![1]);
        for pair in points.split_whitespace() {
            match parse_pair(pair) {
                Some((x, y)) => rows.push(x, vec![Some(y)]),
                None => rows.reject(),
            }
        }
        let series = rows.finish()?;
        log::debug!("svg: {} points", series.len());
        Ok(Decoded {
            series,
            sampling_rate: None,
        })
    }
}

/// Walks the whole document so malformed XML is reported even after a match.
fn find_point_list(text: &str) -> Result<Option<String>, DecodeError> {
    let mut reader = Reader::from_str(text);
    let mut polyline: Option<Option<String>> = None;
    let mut polygon: Option<Option<String>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                let slot = match element.local_name().as_ref() {
                    b"polyline" => &mut polyline,
                    b"polygon" => &mut polygon,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(points_attribute(&element)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(polyline.or(polygon).flatten())
}

fn points_attribute(element: &BytesStart<'_>) -> Result<Option<String>, DecodeError> {
    let attribute = element
        .try_get_attribute("points")
        .map_err(quick_xml::Error::InvalidAttr)?;
    match attribute {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn parse_pair(pair: &str) -> Option<(f64, f64)> {
    let (x, y) = pair.split_once(',')?;
    Some((parse_sample(x)?, parse_sample(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<Decoded, DecodeError> {
        SvgDecoder.decode(text.as_bytes(), &DecodeConfig::default())
    }

    #[test]
    fn reads_polyline_points() {
        let decoded = decode(r#"<svg><polyline points="0,1 1,2 2,4"/></svg>"#).unwrap();
        assert_eq!(decoded.series.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(decoded.series.channels()[0].values, vec![1.0, 2.0, 4.0]);
        assert_eq!(decoded.sampling_rate, None);
    }

    #[test]
    fn prefers_polyline_over_earlier_polygon() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <polygon points="0,9 1,9"/>
            <g><polyline points="0,1 1,2"></polyline></g>
            <polyline points="5,5"/>
        </svg>"#;
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.series.channels()[0].values, vec![1.0, 2.0]);
    }

    #[test]
    fn falls_back_to_polygon() {
        let decoded = decode(r#"<svg><polygon points="0,3 1,4"/></svg>"#).unwrap();
        assert_eq!(decoded.series.channels()[0].values, vec![3.0, 4.0]);
    }

    #[test]
    fn drops_non_numeric_pairs() {
        let text = "<svg><polyline points=\"0,1 a,2 2,b 3 \n 4,5\"/></svg>";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.series.time(), &[0.0, 4.0]);
        assert_eq!(decoded.series.channels()[0].values, vec![1.0, 5.0]);
    }

    #[test]
    fn no_shape_is_empty() {
        let decoded = decode(r#"<svg><rect width="1" height="1"/></svg>"#).unwrap();
        assert!(decoded.series.is_empty());
        let decoded = decode(r#"<svg><polyline/></svg>"#).unwrap();
        assert!(decoded.series.is_empty());
        let decoded = decode("").unwrap();
        assert!(decoded.series.is_empty());
    }

    #[test]
    fn matches_prefixed_elements() {
        let text = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:polyline points="0,1"/></svg:svg>"#;
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.series.len(), 1);
    }

    #[test]
    fn mismatched_tags_are_an_error() {
        assert!(matches!(
            decode("<svg><polyline points=\"0,1\"></svg>"),
            Err(DecodeError::Xml(_))
        ));
    }
}
