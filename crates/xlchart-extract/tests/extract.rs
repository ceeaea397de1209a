use pretty_assertions::assert_eq;
use xlchart_extract::{
    extract, AxisCrosses, AxisScale, AxisSource, AxisTitle, AxisUnits, BinGroup, ChartGroupSource,
    ChartSource, ChartTitle, DataLabelFlags, DisplayUnit, SeriesSource, SourceResult,
    TickLabelSpacing, TrendlineInfo,
};
use xlchart_model::{AxisType, ChartType, AXIS_GROUP_PRIMARY, AXIS_GROUP_SECONDARY};

#[derive(Clone)]
struct FakeAxis {
    axis_type: AxisType,
    axis_group: i64,
    title: Option<AxisTitle>,
    scale: AxisScale,
    units: AxisUnits,
    category_names: Option<Vec<String>>,
    tick_label_spacing: TickLabelSpacing,
    tick_label_format: Option<String>,
    crosses: Option<AxisCrosses>,
    display_unit: Option<DisplayUnit>,
    logarithmic: bool,
    reverse: bool,
}

impl FakeAxis {
    fn new(axis_type: AxisType, axis_group: i64) -> Self {
        FakeAxis {
            axis_type,
            axis_group,
            title: None,
            scale: AxisScale {
                min_auto: true,
                max_auto: true,
                ..AxisScale::default()
            },
            units: AxisUnits {
                major_auto: true,
                minor_auto: true,
                ..AxisUnits::default()
            },
            category_names: None,
            tick_label_spacing: TickLabelSpacing {
                value: None,
                auto: true,
            },
            tick_label_format: None,
            crosses: None,
            display_unit: None,
            logarithmic: false,
            reverse: false,
        }
    }
}

impl AxisSource for FakeAxis {
    fn axis_type(&self) -> AxisType {
        self.axis_type
    }
    fn axis_group(&self) -> i64 {
        self.axis_group
    }
    fn title(&self) -> SourceResult<Option<AxisTitle>> {
        Ok(self.title.clone())
    }
    fn scale(&self) -> SourceResult<AxisScale> {
        Ok(self.scale)
    }
    fn units(&self) -> SourceResult<AxisUnits> {
        Ok(self.units)
    }
    fn category_names(&self) -> SourceResult<Option<Vec<String>>> {
        Ok(self.category_names.clone())
    }
    fn tick_label_spacing(&self) -> SourceResult<TickLabelSpacing> {
        Ok(self.tick_label_spacing)
    }
    fn tick_label_format(&self) -> SourceResult<Option<String>> {
        Ok(self.tick_label_format.clone())
    }
    fn crosses(&self) -> SourceResult<Option<AxisCrosses>> {
        Ok(self.crosses.clone())
    }
    fn display_unit(&self) -> SourceResult<Option<DisplayUnit>> {
        Ok(self.display_unit.clone())
    }
    fn logarithmic(&self) -> SourceResult<bool> {
        Ok(self.logarithmic)
    }
    fn reverse(&self) -> SourceResult<bool> {
        Ok(self.reverse)
    }
}

#[derive(Clone)]
struct FakeSeries {
    chart_type: ChartType,
    formula: String,
    name: String,
    data_labels: Option<DataLabelFlags>,
    error_bars_end_style: Option<i64>,
    trendlines: Vec<TrendlineInfo>,
    axis_group: i64,
}

impl FakeSeries {
    fn new(chart_type: ChartType, name: &str, order: i64) -> Self {
        FakeSeries {
            chart_type,
            formula: format!(
                "=SERIES(Sheet1!$B$1,Sheet1!$A$2:$A$5,Sheet1!$B$2:$B$5,{order})"
            ),
            name: name.to_string(),
            data_labels: None,
            error_bars_end_style: None,
            trendlines: Vec::new(),
            axis_group: AXIS_GROUP_PRIMARY,
        }
    }
}

impl SeriesSource for FakeSeries {
    fn chart_type(&self) -> ChartType {
        self.chart_type
    }
    fn formula(&self) -> SourceResult<String> {
        Ok(self.formula.clone())
    }
    fn name(&self) -> SourceResult<String> {
        Ok(self.name.clone())
    }
    fn data_labels(&self) -> SourceResult<Option<DataLabelFlags>> {
        Ok(self.data_labels)
    }
    fn error_bars_end_style(&self) -> SourceResult<Option<i64>> {
        Ok(self.error_bars_end_style)
    }
    fn trendlines(&self) -> SourceResult<Vec<TrendlineInfo>> {
        Ok(self.trendlines.clone())
    }
    fn axis_group(&self) -> SourceResult<i64> {
        Ok(self.axis_group)
    }
}

#[derive(Clone, Default)]
struct FakeGroup {
    series: Vec<FakeSeries>,
    overlap: Option<i64>,
    gap_width: Option<i64>,
    bins: Option<BinGroup>,
}

impl ChartGroupSource for FakeGroup {
    type Series = FakeSeries;

    fn series(&self) -> SourceResult<Vec<FakeSeries>> {
        Ok(self.series.clone())
    }
    fn overlap(&self) -> SourceResult<Option<i64>> {
        Ok(self.overlap)
    }
    fn gap_width(&self) -> SourceResult<Option<i64>> {
        Ok(self.gap_width)
    }
    fn bins(&self) -> SourceResult<Option<BinGroup>> {
        Ok(self.bins.clone())
    }
}

struct FakeChart {
    name: String,
    chart_type: ChartType,
    title: Option<ChartTitle>,
    legend_position: i64,
    axes: Vec<FakeAxis>,
    groups: Vec<FakeGroup>,
}

impl FakeChart {
    fn new(name: &str, chart_type: ChartType) -> Self {
        FakeChart {
            name: name.to_string(),
            chart_type,
            title: None,
            legend_position: 0,
            axes: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl ChartSource for FakeChart {
    type Axis = FakeAxis;
    type Group = FakeGroup;

    fn name(&self) -> String {
        self.name.clone()
    }
    fn chart_type(&self) -> ChartType {
        self.chart_type
    }
    fn title(&self) -> SourceResult<Option<ChartTitle>> {
        Ok(self.title.clone())
    }
    fn legend_position(&self) -> SourceResult<i64> {
        Ok(self.legend_position)
    }
    fn axes(&self) -> SourceResult<Vec<FakeAxis>> {
        Ok(self.axes.clone())
    }
    fn chart_groups(&self) -> SourceResult<Vec<FakeGroup>> {
        Ok(self.groups.clone())
    }
}

#[test]
fn column_chart_extracts_axes_series_and_group_options() {
    let mut cat_axis = FakeAxis::new(AxisType::CATEGORY, AXIS_GROUP_PRIMARY);
    cat_axis.title = Some(AxisTitle {
        caption: "Month".to_string(),
        orientation: Some(0),
    });
    cat_axis.category_names = Some(vec!["Jan".to_string(), "Feb".to_string()]);
    cat_axis.tick_label_spacing = TickLabelSpacing {
        value: Some(2),
        auto: false,
    };
    // Numeric-axis-only options set on the category axis must not leak out.
    cat_axis.scale.min = Some(99.0);
    cat_axis.tick_label_format = Some("0.0".to_string());

    let mut val_axis = FakeAxis::new(AxisType::VALUE, AXIS_GROUP_PRIMARY);
    val_axis.scale = AxisScale {
        min: Some(0.0),
        min_auto: false,
        max: None,
        max_auto: true,
    };
    val_axis.units = AxisUnits {
        major: Some(10.0),
        major_auto: false,
        minor: None,
        minor_auto: true,
    };
    val_axis.tick_label_format = Some("#,##0".to_string());
    val_axis.crosses = Some(AxisCrosses {
        crosses: "autoZero".to_string(),
        at: None,
    });
    val_axis.display_unit = Some(DisplayUnit {
        unit: "thousands".to_string(),
        label: "Thousands".to_string(),
    });

    let mut chart = FakeChart::new("Chart 1", ChartType::COLUMN_CLUSTERED);
    chart.title = Some(ChartTitle {
        text: "Sales".to_string(),
        overlay: false,
    });
    chart.legend_position = -4107;
    chart.axes = vec![cat_axis, val_axis];
    chart.groups = vec![FakeGroup {
        series: vec![
            FakeSeries::new(ChartType::COLUMN_CLUSTERED, "B", 2),
            FakeSeries::new(ChartType::COLUMN_CLUSTERED, "A", 1),
        ],
        overlap: Some(-27),
        gap_width: Some(150),
        bins: None,
    }];

    let record = extract(&chart).unwrap();
    assert_eq!(record.name, "Chart 1");
    assert_eq!(record.title, "Sales");
    assert_eq!(record.legend_position, -4107);

    let cat = &record.axis[0];
    assert_eq!(cat.title.as_deref(), Some("Month"));
    assert_eq!(cat.title_orientation, Some(0));
    assert_eq!(
        cat.category_names,
        Some(vec!["Jan".to_string(), "Feb".to_string()])
    );
    assert_eq!(cat.tick_label_spacing, Some(2));
    assert_eq!(cat.tick_label_spacing_auto, Some(false));
    assert_eq!(cat.min_scale, None);
    assert_eq!(cat.tick_label_format, None);
    assert_eq!(cat.reverse, Some(false));

    let val = &record.axis[1];
    assert_eq!(val.min_scale, Some(0.0));
    assert_eq!(val.min_scale_auto, Some(false));
    assert_eq!(val.max_scale, None);
    assert_eq!(val.max_scale_auto, Some(true));
    assert_eq!(val.major_unit, Some(10.0));
    assert_eq!(val.minor_unit_auto, Some(true));
    assert_eq!(val.tick_label_format.as_deref(), Some("#,##0"));
    assert_eq!(val.crosses.as_deref(), Some("autoZero"));
    assert_eq!(val.display_unit.as_deref(), Some("thousands"));
    assert_eq!(val.display_unit_label.as_deref(), Some("Thousands"));
    assert_eq!(val.logarithmic, Some(false));
    assert_eq!(val.category_names, None);
    assert_eq!(val.tick_label_spacing, None);

    // Series come back ordered by formula index, with the group options
    // copied onto each column series.
    let series = record.series.unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].index, 0);
    assert_eq!(series[0].name, "A");
    assert_eq!(series[1].index, 1);
    assert_eq!(series[1].name, "B");
    for s in &series {
        assert_eq!(s.chart_group, 1);
        assert_eq!(s.overlap, Some(-27));
        assert_eq!(s.gap_width, Some(150));
    }
}

#[test]
fn untitled_chart_reports_empty_title_without_overlay() {
    let chart = FakeChart::new("Chart 3", ChartType::PIE);
    let record = extract(&chart).unwrap();
    assert_eq!(record.title, "");
    assert!(!record.title_overlay);
    assert_eq!(record.legend_position, 0);
    assert_eq!(record.series, Some(Vec::new()));
}

#[test]
fn scatter_category_axis_is_treated_as_numeric() {
    let mut x_axis = FakeAxis::new(AxisType::CATEGORY, AXIS_GROUP_PRIMARY);
    x_axis.scale = AxisScale {
        min: Some(1.5),
        min_auto: false,
        max: Some(9.5),
        max_auto: false,
    };
    x_axis.tick_label_format = Some("0.0".to_string());
    x_axis.category_names = Some(vec!["ignored".to_string()]);
    x_axis.crosses = Some(AxisCrosses {
        crosses: "custom".to_string(),
        at: Some(4.0),
    });

    let mut chart = FakeChart::new("Chart 2", ChartType::XY_SCATTER);
    chart.axes = vec![x_axis];
    chart.groups = vec![FakeGroup {
        series: vec![FakeSeries::new(ChartType::XY_SCATTER, "pts", 1)],
        ..FakeGroup::default()
    }];

    let record = extract(&chart).unwrap();
    let x = &record.axis[0];
    assert_eq!(x.min_scale, Some(1.5));
    assert_eq!(x.max_scale, Some(9.5));
    assert_eq!(x.tick_label_format.as_deref(), Some("0.0"));
    assert_eq!(x.crosses.as_deref(), Some("custom"));
    assert_eq!(x.crosses_at, Some(4.0));
    assert_eq!(x.logarithmic, Some(false));
    // Scatter X axes carry no category options despite their axis type.
    assert_eq!(x.category_names, None);
    assert_eq!(x.tick_label_spacing, None);
}

#[test]
fn radar_axes_skip_crossing_and_display_options() {
    let mut val_axis = FakeAxis::new(AxisType::VALUE, AXIS_GROUP_PRIMARY);
    val_axis.crosses = Some(AxisCrosses {
        crosses: "max".to_string(),
        at: None,
    });
    val_axis.display_unit = Some(DisplayUnit {
        unit: "hundreds".to_string(),
        label: "Hundreds".to_string(),
    });
    val_axis.logarithmic = true;

    let mut chart = FakeChart::new("Chart 4", ChartType::RADAR);
    chart.axes = vec![val_axis];

    let record = extract(&chart).unwrap();
    let val = &record.axis[0];
    assert_eq!(val.crosses, None);
    assert_eq!(val.display_unit, None);
    assert_eq!(val.logarithmic, None);
    assert_eq!(val.reverse, None);
    assert_eq!(val.min_scale_auto, Some(true));
}

#[test]
fn stacked_100_value_axis_drops_display_unit_but_keeps_logarithmic() {
    let mut val_axis = FakeAxis::new(AxisType::VALUE, AXIS_GROUP_PRIMARY);
    val_axis.display_unit = Some(DisplayUnit {
        unit: "millions".to_string(),
        label: "Millions".to_string(),
    });
    val_axis.logarithmic = true;

    let mut chart = FakeChart::new("Chart 5", ChartType::COLUMN_STACKED_100);
    chart.axes = vec![val_axis];

    let record = extract(&chart).unwrap();
    let val = &record.axis[0];
    assert_eq!(val.display_unit, None);
    assert_eq!(val.logarithmic, Some(true));
}

#[test]
fn box_whisker_chart_has_no_series_and_no_title_orientation() {
    let mut val_axis = FakeAxis::new(AxisType::VALUE, AXIS_GROUP_PRIMARY);
    val_axis.title = Some(AxisTitle {
        caption: "Spread".to_string(),
        orientation: Some(90),
    });
    val_axis.scale = AxisScale {
        min: Some(-1.0),
        min_auto: false,
        max: None,
        max_auto: true,
    };
    val_axis.units = AxisUnits {
        major: Some(5.0),
        major_auto: false,
        minor: None,
        minor_auto: true,
    };

    let mut chart = FakeChart::new("Chart 6", ChartType::BOX_WHISKER);
    chart.axes = vec![val_axis];
    chart.groups = vec![FakeGroup {
        series: vec![FakeSeries::new(ChartType::BOX_WHISKER, "dist", 1)],
        ..FakeGroup::default()
    }];

    let record = extract(&chart).unwrap();
    assert_eq!(record.series, None);
    assert_eq!(record.bins, None);
    let val = &record.axis[0];
    assert_eq!(val.title.as_deref(), Some("Spread"));
    assert_eq!(val.title_orientation, None);
    assert_eq!(val.min_scale, Some(-1.0));
    // Unit options stay unread for box-whisker value axes.
    assert_eq!(val.major_unit, None);
    assert_eq!(val.major_unit_auto, None);
}

#[test]
fn histogram_chart_reports_bins_per_group() {
    let mut chart = FakeChart::new("Chart 7", ChartType::HISTOGRAM);
    chart.groups = vec![
        FakeGroup {
            bins: Some(BinGroup {
                bins_type: "binWidth".to_string(),
                bin_width: Some(2.5),
                overflow_enabled: true,
                overflow: Some(100.0),
                ..BinGroup::default()
            }),
            ..FakeGroup::default()
        },
        FakeGroup {
            bins: Some(BinGroup {
                bins_type: "automatic".to_string(),
                ..BinGroup::default()
            }),
            ..FakeGroup::default()
        },
    ];

    let record = extract(&chart).unwrap();
    assert_eq!(record.series, None);
    let bins = record.bins.unwrap();
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0].chart_group, 1);
    assert_eq!(bins[0].bins_type, "binWidth");
    assert_eq!(bins[0].bin_width, Some(2.5));
    assert!(bins[0].bins_overflow_enabled);
    assert_eq!(bins[0].bins_overflow, Some(100.0));
    assert!(!bins[0].bins_underflow_enabled);
    assert_eq!(bins[1].chart_group, 2);
    assert_eq!(bins[1].bins_type, "automatic");
}

#[test]
fn combo_chart_numbers_groups_and_gates_overlap_by_series_type() {
    let mut chart = FakeChart::new("Chart 8", ChartType::COLUMN_CLUSTERED);
    let mut line = FakeSeries::new(ChartType::LINE, "trend", 2);
    line.axis_group = AXIS_GROUP_SECONDARY;
    chart.groups = vec![
        FakeGroup {
            series: vec![FakeSeries::new(ChartType::COLUMN_CLUSTERED, "bars", 1)],
            overlap: Some(0),
            gap_width: Some(100),
            bins: None,
        },
        FakeGroup {
            series: vec![line],
            // Group options present on a line group must not be copied.
            overlap: Some(40),
            gap_width: Some(60),
            bins: None,
        },
    ];

    let record = extract(&chart).unwrap();
    let series = record.series.unwrap();
    assert_eq!(series[0].chart_group, 1);
    assert_eq!(series[0].overlap, Some(0));
    assert_eq!(series[0].gap_width, Some(100));
    assert_eq!(series[1].chart_group, 2);
    assert_eq!(series[1].axis_group, AXIS_GROUP_SECONDARY);
    assert_eq!(series[1].overlap, None);
    assert_eq!(series[1].gap_width, None);
}

#[test]
fn series_details_flow_into_the_record() {
    let mut series = FakeSeries::new(ChartType::XY_SCATTER, "pts", 1);
    series.data_labels = Some(DataLabelFlags {
        range: false,
        name: true,
        x_values: false,
        y_values: true,
        marker: false,
        leader_lines: true,
    });
    series.error_bars_end_style = Some(2);
    series.trendlines = vec![
        TrendlineInfo {
            trendline_type: -4132,
            intercept: Some(0.0),
            intercept_auto: false,
            display_equation: true,
            display_r_squared: false,
            label_text: Some("y = 2x".to_string()),
        },
        TrendlineInfo {
            trendline_type: 3,
            intercept: None,
            intercept_auto: true,
            display_equation: false,
            display_r_squared: false,
            label_text: Some("stale".to_string()),
        },
    ];

    let mut chart = FakeChart::new("Chart 9", ChartType::XY_SCATTER);
    chart.groups = vec![FakeGroup {
        series: vec![series],
        ..FakeGroup::default()
    }];

    let record = extract(&chart).unwrap();
    let s = &record.series.unwrap()[0];
    assert_eq!(s.data_labels_name, Some(true));
    assert_eq!(s.data_labels_y_values, Some(true));
    assert_eq!(s.data_labels_x_values, Some(false));
    assert_eq!(s.leader_lines, Some(true));
    assert_eq!(s.error_bars_end_style, Some(2));

    let trendlines = s.trendline.as_ref().unwrap();
    assert_eq!(trendlines[0].trendline_type, -4132);
    assert_eq!(trendlines[0].equation.as_deref(), Some("y = 2x"));
    // Label text is dropped when neither display flag is set.
    assert_eq!(trendlines[1].equation, None);
    assert!(trendlines[1].intercept_auto);
}

#[test]
fn malformed_series_formula_fails_extraction() {
    let mut series = FakeSeries::new(ChartType::LINE, "bad", 1);
    series.formula = "=SUM(A1:A5)".to_string();

    let mut chart = FakeChart::new("Chart 10", ChartType::LINE);
    chart.groups = vec![FakeGroup {
        series: vec![series],
        ..FakeGroup::default()
    }];

    let err = extract(&chart).unwrap_err();
    assert!(err.to_string().contains("series formula"));
}
