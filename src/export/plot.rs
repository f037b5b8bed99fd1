use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;

use crate::decode::TimeSeries;
use crate::export::ExportError;
use crate::viewer::YScale;

#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            background: RGBColor(255, 255, 255),
            palette: vec![
                RGBColor(0x66, 0x7e, 0xea),
                RGBColor(0xe8, 0x5d, 0x3f),
                RGBColor(0x2c, 0xa0, 0x6c),
                MAGENTA,
                CYAN,
                BLACK,
            ],
        }
    }
}

/// Draw the samples inside `x_range` (the whole series when `None`) as PNG bytes.
pub fn render_series_png(
    series: &TimeSeries,
    x_range: Option<(f64, f64)>,
    style: &PlotStyle,
) -> Result<Vec<u8>, ExportError> {
    let (x_min, x_max) = match (x_range, series.time().first(), series.last_time()) {
        (Some(range), _, _) => range,
        (None, Some(&first), Some(last)) => (first, last),
        _ => return Err(ExportError::EmptySeries),
    };
    let visible = series.window_indices(x_min, x_max);
    if visible.is_empty() {
        return Err(ExportError::EmptySeries);
    }
    let (y_min, y_max) = YScale::Auto
        .bounds(
            series
                .channels()
                .iter()
                .flat_map(|c| c.values[visible.clone()].iter()),
        )
        .ok_or(ExportError::EmptySeries)?;
    // A single sample still needs a non-degenerate x axis.
    let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };

    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Channel Data vs Time", ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Time (seconds)")
            .y_desc("Amplitude")
            .light_line_style(&BLACK.mix(0.08))
            .draw()?;
        for (idx, channel) in series.channels().iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let points = series.time()[visible.clone()]
                .iter()
                .copied()
                .zip(channel.values[visible.clone()].iter().copied());
            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(channel.name.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.2))
            .background_style(&style.background.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ExportError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_rejected() {
        let err = render_series_png(&TimeSeries::empty(), None, &PlotStyle::default()).unwrap_err();
        assert!(matches!(err, ExportError::EmptySeries));
    }

    #[test]
    fn window_past_the_data_is_rejected() {
        let series = crate::decode::decode_bytes(
            "rec.csv",
            b"i,v\n0,1\n1,2\n",
            &crate::decode::DecodeConfig::default(),
        )
        .series;
        let err = render_series_png(&series, Some((5.0, 6.0)), &PlotStyle::default()).unwrap_err();
        assert!(matches!(err, ExportError::EmptySeries));
    }

    #[test]
    fn encodes_png_signature() {
        let png = encode_png(&[255u8; 4 * 4 * 3], 4, 4).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn short_buffer_is_a_plot_error() {
        assert!(matches!(encode_png(&[0u8; 3], 4, 4), Err(ExportError::Plot(_))));
    }
}
