use std::sync::Arc;

use scatter_rs::api::{ScatterChart, ScatterChartRenderer};
use scatter_rs::core::{
    AffineTransform, AnimationPhase, AxisSide, DataPoint, MarkShape, PixelPoint, Rect,
    ScatterSeries, ScatterSeriesCollection, ValueTransformer, ViewportHandler,
};
use scatter_rs::render::{Color, DrawCommand, PathElement, RecordingCanvas, ShapePath};

// x = 100 * x_index, y = 200 - 10 * value inside a 300x200 content rect.
fn transformer() -> ValueTransformer {
    ValueTransformer::new(AffineTransform::new(100.0, 0.0, 0.0, -10.0, 0.0, 200.0))
}

fn viewport() -> ViewportHandler {
    ViewportHandler::new(Rect::new(0.0, 0.0, 300.0, 200.0)).expect("viewport")
}

fn series(values: &[f64]) -> ScatterSeries {
    let points = values
        .iter()
        .enumerate()
        .map(|(index, value)| DataPoint::new(index as i64, *value))
        .collect();
    ScatterSeries::with_points("series", points).expect("series")
}

fn chart(series: Vec<ScatterSeries>) -> ScatterChart {
    ScatterChart::new(ScatterSeriesCollection::new(series))
        .with_transformer(AxisSide::Primary, transformer())
}

fn renderer(chart: &ScatterChart, phase: AnimationPhase) -> ScatterChartRenderer<&ScatterChart> {
    ScatterChartRenderer::new(Some(chart), Some(phase), viewport())
}

#[test]
fn circle_marks_are_filled_at_transformed_centers() {
    let chart = chart(vec![
        series(&[1.0, 2.0, 3.0])
            .with_mark_shape(MarkShape::Circle)
            .with_mark_size(10.0)
            .expect("size"),
    ]);
    let mut canvas = RecordingCanvas::new();

    let stats = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert_eq!(stats.marks, 3);
    assert_eq!(stats.series_drawn, 1);
    let ellipses = canvas.filled_ellipses();
    assert_eq!(
        ellipses,
        vec![
            Rect::new(-5.0, 185.0, 10.0, 10.0),
            Rect::new(95.0, 175.0, 10.0, 10.0),
            Rect::new(195.0, 165.0, 10.0, 10.0),
        ]
    );
    assert_eq!(canvas.paint_count(), 3);
    assert!(canvas.is_balanced());
}

#[test]
fn square_marks_fill_the_bounding_square() {
    let chart = chart(vec![series(&[4.0]).with_mark_size(6.0).expect("size")]);
    let mut canvas = RecordingCanvas::new();

    let _ = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert_eq!(canvas.filled_rects(), vec![Rect::new(-3.0, 157.0, 6.0, 6.0)]);
}

#[test]
fn reveal_count_follows_phase_x() {
    let values: Vec<f64> = (1..=10i32).map(f64::from).collect();
    let chart = chart(vec![series(&values)]);

    for (phase_x, expected) in [(0.0, 0), (0.05, 1), (0.5, 5), (0.55, 6), (1.0, 10)] {
        let phase = AnimationPhase::new(phase_x, 1.0).expect("phase");
        let mut canvas = RecordingCanvas::new();
        let stats = renderer(&chart, phase).draw_data(&mut canvas);
        assert_eq!(stats.marks, expected, "phase_x={phase_x}");
        assert_eq!(canvas.filled_rects().len(), expected, "phase_x={phase_x}");
        assert!(canvas.is_balanced());
    }
}

#[test]
fn phase_y_scales_values_toward_baseline() {
    let chart = chart(vec![
        series(&[2.0, 8.0])
            .with_mark_shape(MarkShape::Circle)
            .with_mark_size(2.0)
            .expect("size"),
    ]);
    let phase = AnimationPhase::new(1.0, 0.5).expect("phase");
    let mut canvas = RecordingCanvas::new();

    let _ = renderer(&chart, phase).draw_data(&mut canvas);

    let centers: Vec<PixelPoint> = canvas
        .filled_ellipses()
        .into_iter()
        .map(Rect::center)
        .collect();
    assert_eq!(
        centers,
        vec![PixelPoint::new(0.0, 190.0), PixelPoint::new(100.0, 160.0)]
    );
}

#[test]
fn degenerate_and_hidden_series_draw_nothing() {
    let mut hidden = series(&[1.0, 2.0]);
    hidden.visible = false;
    let chart = chart(vec![series(&[0.0, 0.0, 0.0]), hidden, series(&[])]);
    let mut canvas = RecordingCanvas::new();

    let stats = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert_eq!(stats.series_drawn, 0);
    assert!(canvas.commands().is_empty());
}

#[test]
fn points_left_or_outside_vertical_bounds_are_culled() {
    let points = vec![
        DataPoint::new(-1, 1.0),
        DataPoint::new(0, 30.0),
        DataPoint::new(1, -5.0),
        DataPoint::new(2, 3.0),
        DataPoint::new(9, 3.0),
    ];
    let chart = chart(vec![ScatterSeries::with_points("culled", points).expect("series")]);
    let mut canvas = RecordingCanvas::new();

    let stats = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    // x = 900 lies right of the content and is still drawn.
    assert_eq!(stats.culled, 3);
    assert_eq!(stats.marks, 2);
    let centers: Vec<PixelPoint> = canvas.filled_rects().into_iter().map(Rect::center).collect();
    assert_eq!(
        centers,
        vec![PixelPoint::new(200.0, 170.0), PixelPoint::new(900.0, 170.0)]
    );
}

#[test]
fn fill_color_is_looked_up_per_point() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let blue = Color::rgb(0.0, 0.0, 1.0);
    let chart = chart(vec![
        series(&[1.0, 2.0, 3.0])
            .with_colors([red, blue])
            .expect("colors"),
    ]);
    let mut canvas = RecordingCanvas::new();

    let _ = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    let fills: Vec<Color> = canvas
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::SetFillColor(color) => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![red, blue, red]);
}

#[test]
fn cross_marks_stroke_two_segments() {
    let chart = chart(vec![series(&[2.0]).with_mark_shape(MarkShape::Cross)]);
    let mut canvas = RecordingCanvas::new();

    let _ = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert_eq!(
        canvas.stroked_segments(),
        vec![
            (PixelPoint::new(-5.0, 180.0), PixelPoint::new(5.0, 180.0)),
            (PixelPoint::new(0.0, 175.0), PixelPoint::new(0.0, 185.0)),
        ]
    );
}

#[test]
fn triangle_marks_point_upward() {
    let chart = chart(vec![
        ScatterSeries::with_points("tri", vec![DataPoint::new(1, 2.0)])
            .expect("series")
            .with_mark_shape(MarkShape::Triangle)
            .with_mark_size(4.0)
            .expect("size"),
    ]);
    let mut canvas = RecordingCanvas::new();

    let _ = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    let paths: Vec<&ShapePath> = canvas
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::FillPath(path) => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths[0].elements(),
        &[
            PathElement::MoveTo(PixelPoint::new(100.0, 178.0)),
            PathElement::LineTo(PixelPoint::new(102.0, 182.0)),
            PathElement::LineTo(PixelPoint::new(98.0, 182.0)),
            PathElement::Close,
        ]
    );
}

#[test]
fn custom_marks_fill_inside_a_shifted_nested_state() {
    let outline = Arc::new(ShapePath::polygon(&[
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(3.0, 0.0),
        PixelPoint::new(0.0, 3.0),
    ]));
    let chart = chart(vec![
        ScatterSeries::with_points("custom", vec![DataPoint::new(1, 2.0)])
            .expect("series")
            .with_mark_shape(MarkShape::Custom(outline.clone())),
    ]);
    let mut canvas = RecordingCanvas::new();

    let stats = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert_eq!(stats.marks, 1);
    assert_eq!(canvas.max_state_depth(), 2);
    assert!(canvas.is_balanced());
    assert_eq!(
        canvas.commands(),
        &[
            DrawCommand::SaveState,
            DrawCommand::SetFillColor(Color::SERIES_DEFAULT),
            DrawCommand::SaveState,
            DrawCommand::Translate {
                dx: -100.0,
                dy: -180.0,
            },
            DrawCommand::FillPath((*outline).clone()),
            DrawCommand::RestoreState,
            DrawCommand::RestoreState,
        ]
    );
}

#[test]
fn custom_shape_without_path_aborts_only_that_series() {
    let chart = chart(vec![
        series(&[1.0, 2.0]).with_mark_shape(MarkShape::Custom(Arc::new(ShapePath::new()))),
        series(&[1.0, 2.0, 3.0]).with_mark_shape(MarkShape::Circle),
    ]);
    let mut canvas = RecordingCanvas::new();

    let stats = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert_eq!(stats.marks, 3);
    assert_eq!(canvas.filled_ellipses().len(), 3);
    assert!(
        !canvas
            .commands()
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::FillPath(_)))
    );
    assert!(canvas.is_balanced());
}

#[test]
fn secondary_series_use_the_secondary_transformer() {
    let mut secondary = series(&[1.0]);
    secondary.axis_side = AxisSide::Secondary;
    let chart = chart(vec![secondary]).with_transformer(
        AxisSide::Secondary,
        ValueTransformer::new(AffineTransform::new(1.0, 0.0, 0.0, -1.0, 50.0, 100.0)),
    );
    let mut canvas = RecordingCanvas::new();

    let _ = renderer(&chart, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    let centers: Vec<PixelPoint> = canvas.filled_rects().into_iter().map(Rect::center).collect();
    assert_eq!(centers, vec![PixelPoint::new(50.0, 99.0)]);
}

#[test]
fn missing_collaborators_issue_no_commands() {
    let chart = chart(vec![series(&[1.0, 2.0])]);
    let mut canvas = RecordingCanvas::new();

    let no_provider: ScatterChartRenderer<&ScatterChart> =
        ScatterChartRenderer::new(None, Some(AnimationPhase::COMPLETE), viewport());
    let _ = no_provider.draw_data(&mut canvas);

    let no_animator = ScatterChartRenderer::new(Some(&chart), None, viewport());
    let _ = no_animator.draw_data(&mut canvas);

    let empty = ScatterChart::empty();
    let _ = renderer(&empty, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    let mut secondary = series(&[1.0]);
    secondary.axis_side = AxisSide::Secondary;
    // Only the primary transformer is registered.
    let missing_transformer = self::chart(vec![series(&[1.0, 2.0]), secondary]);
    let _ = renderer(&missing_transformer, AnimationPhase::COMPLETE).draw_data(&mut canvas);

    assert!(canvas.commands().is_empty());
}
