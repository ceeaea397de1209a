//! Chart source traits and the record extractor.
//!
//! A [`ChartSource`] exposes typed accessors over one chart of some backing
//! store (an `.xlsx` package in production, fixed records in tests). The
//! [`extract`] function folds a source into a flat
//! [`ChartRecord`](xlchart_model::ChartRecord), reading only the properties
//! that apply to the chart's category — the field subset is decided by
//! branching, never by swallowing accessor failures.

mod source;

pub use source::{
    AxisCrosses, AxisScale, AxisSource, AxisTitle, AxisUnits, BinGroup, ChartGroupSource,
    ChartSource, ChartTitle, DataLabelFlags, DisplayUnit, SeriesSource, SourceError, SourceResult,
    TickLabelSpacing, TrendlineInfo,
};

use xlchart_model::{
    split_series_formula, AxisRecord, BinRecord, ChartRecord, ChartType, SeriesRecord,
    TrendlineRecord,
};

/// Extract the flattened configuration record for one chart.
///
/// Source failures propagate unmasked; fields a chart category does not
/// support are never read.
pub fn extract<S: ChartSource>(chart: &S) -> SourceResult<ChartRecord> {
    let chart_type = chart.chart_type();

    let (title, title_overlay) = match chart.title()? {
        Some(title) => (title.text, title.overlay),
        None => (String::new(), false),
    };

    let mut record = ChartRecord {
        name: chart.name(),
        chart_type,
        title,
        title_overlay,
        legend_position: chart.legend_position()?,
        axis: Vec::new(),
        series: None,
        bins: None,
    };

    for axis in chart.axes()? {
        record.axis.push(extract_axis(&axis, chart_type)?);
    }

    // Box-whisker charts expose no per-series data at all.
    if chart_type.is_box_whisker() {
        return Ok(record);
    }

    // Histograms expose binning per chart group instead of series.
    if chart_type.is_histogram() {
        record.bins = Some(extract_bins(chart)?);
        return Ok(record);
    }

    let mut series = Vec::new();
    for (i, group) in chart.chart_groups()?.iter().enumerate() {
        series.extend(extract_group_series(group, i as i64 + 1)?);
    }
    series.sort_by_key(|s| s.index);
    record.series = Some(series);

    Ok(record)
}

fn extract_axis<A: AxisSource>(axis: &A, chart_type: ChartType) -> SourceResult<AxisRecord> {
    let mut record = AxisRecord::new(axis.axis_type(), axis.axis_group());

    if let Some(title) = axis.title()? {
        record.title = Some(title.caption);
        if !chart_type.is_box_whisker() {
            record.title_orientation = Some(title.orientation.unwrap_or(0));
        }
    }

    // Radar charts expose no crossing or display-unit options.
    if chart_type.is_radar() {
        apply_scale(&mut record, axis, chart_type)?;
        apply_units(&mut record, axis, chart_type)?;
        apply_category_names(&mut record, axis)?;
        apply_tick_label_spacing(&mut record, axis)?;
        apply_tick_label_format(&mut record, axis, chart_type)?;
    // Scatter charts have no category axis options; the X axis is typed as a
    // category axis by the source but is numeric.
    } else if chart_type.is_scatter() {
        apply_scale(&mut record, axis, chart_type)?;
        apply_units(&mut record, axis, chart_type)?;
        apply_tick_label_format(&mut record, axis, chart_type)?;
        apply_crosses(&mut record, axis)?;
        apply_display(&mut record, axis, chart_type)?;
    // Box-whisker value axes expose no unit options.
    } else if chart_type.is_box_whisker() {
        apply_scale(&mut record, axis, chart_type)?;
        apply_tick_label_format(&mut record, axis, chart_type)?;
    // Histogram axes expose no further options either.
    } else if chart_type.is_histogram() {
        apply_scale(&mut record, axis, chart_type)?;
        apply_tick_label_format(&mut record, axis, chart_type)?;
    } else {
        apply_scale(&mut record, axis, chart_type)?;
        apply_units(&mut record, axis, chart_type)?;
        apply_category_names(&mut record, axis)?;
        apply_tick_label_spacing(&mut record, axis)?;
        apply_tick_label_format(&mut record, axis, chart_type)?;
        apply_crosses(&mut record, axis)?;
        apply_display(&mut record, axis, chart_type)?;
    }

    Ok(record)
}

fn is_numeric_axis<A: AxisSource>(axis: &A, chart_type: ChartType) -> bool {
    axis.axis_type().is_value() || chart_type.is_scatter()
}

fn apply_scale<A: AxisSource>(
    record: &mut AxisRecord,
    axis: &A,
    chart_type: ChartType,
) -> SourceResult<()> {
    if is_numeric_axis(axis, chart_type) {
        let scale = axis.scale()?;
        record.min_scale = scale.min;
        record.min_scale_auto = Some(scale.min_auto);
        record.max_scale = scale.max;
        record.max_scale_auto = Some(scale.max_auto);
    }
    Ok(())
}

fn apply_units<A: AxisSource>(
    record: &mut AxisRecord,
    axis: &A,
    chart_type: ChartType,
) -> SourceResult<()> {
    if is_numeric_axis(axis, chart_type) {
        let units = axis.units()?;
        record.major_unit = units.major;
        record.major_unit_auto = Some(units.major_auto);
        record.minor_unit = units.minor;
        record.minor_unit_auto = Some(units.minor_auto);
    }
    Ok(())
}

fn apply_category_names<A: AxisSource>(record: &mut AxisRecord, axis: &A) -> SourceResult<()> {
    if axis.axis_type().is_category() {
        record.category_names = axis.category_names()?;
    }
    Ok(())
}

fn apply_tick_label_spacing<A: AxisSource>(record: &mut AxisRecord, axis: &A) -> SourceResult<()> {
    if axis.axis_type().is_category() || axis.axis_type().is_series() {
        let spacing = axis.tick_label_spacing()?;
        record.tick_label_spacing = spacing.value;
        record.tick_label_spacing_auto = Some(spacing.auto);
    }
    Ok(())
}

fn apply_tick_label_format<A: AxisSource>(
    record: &mut AxisRecord,
    axis: &A,
    chart_type: ChartType,
) -> SourceResult<()> {
    if is_numeric_axis(axis, chart_type) {
        record.tick_label_format = axis.tick_label_format()?;
    }
    Ok(())
}

fn apply_crosses<A: AxisSource>(record: &mut AxisRecord, axis: &A) -> SourceResult<()> {
    if !axis.axis_type().is_series() {
        if let Some(crosses) = axis.crosses()? {
            record.crosses = Some(crosses.crosses);
            record.crosses_at = crosses.at;
        }
    }
    Ok(())
}

fn apply_display<A: AxisSource>(
    record: &mut AxisRecord,
    axis: &A,
    chart_type: ChartType,
) -> SourceResult<()> {
    if is_numeric_axis(axis, chart_type) {
        if !chart_type.is_stacked_100() {
            if let Some(unit) = axis.display_unit()? {
                record.display_unit = Some(unit.unit);
                record.display_unit_label = Some(unit.label);
            }
        }
        record.logarithmic = Some(axis.logarithmic()?);
    }
    record.reverse = Some(axis.reverse()?);
    Ok(())
}

fn extract_bins<S: ChartSource>(chart: &S) -> SourceResult<Vec<BinRecord>> {
    let mut bins = Vec::new();
    for (i, group) in chart.chart_groups()?.iter().enumerate() {
        let Some(group_bins) = group.bins()? else {
            continue;
        };
        bins.push(BinRecord {
            chart_group: i as i64 + 1,
            bins_type: group_bins.bins_type,
            bin_width: group_bins.bin_width,
            bins_count: group_bins.bins_count,
            bins_overflow_enabled: group_bins.overflow_enabled,
            bins_overflow: group_bins.overflow,
            bins_underflow_enabled: group_bins.underflow_enabled,
            bins_underflow: group_bins.underflow,
        });
    }
    Ok(bins)
}

fn extract_group_series<G: ChartGroupSource>(
    group: &G,
    group_number: i64,
) -> SourceResult<Vec<SeriesRecord>> {
    let mut out = Vec::new();
    for series in group.series()? {
        let mut record = extract_series(&series)?;
        // Overlap and gap width are group-level options that only column and
        // bar charts expose.
        if record.chart_type.is_column() || record.chart_type.is_bar() {
            record.overlap = group.overlap()?;
            record.gap_width = group.gap_width()?;
        }
        record.chart_group = group_number;
        out.push(record);
    }
    Ok(out)
}

fn extract_series<S: SeriesSource>(series: &S) -> SourceResult<SeriesRecord> {
    let formula = series.formula()?;
    let parsed = split_series_formula(&formula)
        .map_err(|e| SourceError::new(format!("series formula: {e}")))?;

    let mut record = SeriesRecord {
        index: parsed.index,
        name: series.name()?,
        chart_type: series.chart_type(),
        formula,
        data_range_name: parsed.name,
        data_range_x_values: parsed.x_values,
        data_range_y_values: parsed.y_values,
        data_labels_range: None,
        data_labels_name: None,
        data_labels_x_values: None,
        data_labels_y_values: None,
        data_labels_marker: None,
        leader_lines: None,
        error_bars_end_style: None,
        trendline: None,
        axis_group: series.axis_group()?,
        chart_group: 1,
        overlap: None,
        gap_width: None,
    };

    if let Some(labels) = series.data_labels()? {
        record.data_labels_range = Some(labels.range);
        record.data_labels_name = Some(labels.name);
        record.data_labels_x_values = Some(labels.x_values);
        record.data_labels_y_values = Some(labels.y_values);
        record.data_labels_marker = Some(labels.marker);
        record.leader_lines = Some(labels.leader_lines);
    }

    record.error_bars_end_style = series.error_bars_end_style()?;

    let trendlines = series.trendlines()?;
    if !trendlines.is_empty() {
        let mut out = Vec::with_capacity(trendlines.len());
        for info in trendlines {
            let show_label = info.display_equation || info.display_r_squared;
            out.push(TrendlineRecord {
                trendline_type: info.trendline_type,
                intercept: info.intercept,
                intercept_auto: info.intercept_auto,
                display_equation: info.display_equation,
                display_r_squared: info.display_r_squared,
                equation: if show_label { info.label_text } else { None },
            });
        }
        record.trendline = Some(out);
    }

    Ok(record)
}
