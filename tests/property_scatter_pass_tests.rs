use proptest::prelude::*;
use scatter_rs::api::{ScatterChart, ScatterChartRenderer};
use scatter_rs::core::{
    AffineTransform, AnimationPhase, AxisSide, DataPoint, Highlight, Rect, ScatterSeries,
    ScatterSeriesCollection, ValueTransformer, ViewportHandler,
};
use scatter_rs::render::RecordingCanvas;

fn chart_for(values: &[f64], connect: bool) -> ScatterChart {
    let points = values
        .iter()
        .enumerate()
        .map(|(index, value)| DataPoint::new(index as i64, *value))
        .collect();
    let mut series = ScatterSeries::with_points("prop", points).expect("series");
    series.connect_value_labels = connect;
    ScatterChart::new(ScatterSeriesCollection::new(vec![series])).with_transformer(
        AxisSide::Primary,
        ValueTransformer::new(AffineTransform::new(100.0, 0.0, 0.0, -10.0, 0.0, 200.0)),
    )
}

fn viewport() -> ViewportHandler {
    ViewportHandler::new(Rect::new(0.0, 0.0, 300.0, 200.0)).expect("viewport")
}

proptest! {
    #[test]
    fn mark_count_matches_reveal_count(
        values in proptest::collection::vec(1.0f64..19.0, 1..64),
        phase_x in 0.0f64..=1.0
    ) {
        let chart = chart_for(&values, false);
        let phase = AnimationPhase::new(phase_x, 1.0).expect("phase");
        let renderer = ScatterChartRenderer::new(Some(&chart), Some(phase), viewport());
        let mut canvas = RecordingCanvas::new();

        let stats = renderer.draw_data(&mut canvas);

        let expected = ((values.len() as f64 * phase_x).ceil() as usize).min(values.len());
        prop_assert_eq!(stats.marks, expected);
        prop_assert_eq!(canvas.paint_count(), expected);
        prop_assert!(canvas.is_balanced());
    }

    #[test]
    fn culled_points_never_paint(
        values in proptest::collection::vec(-40.0f64..40.0, 1..64)
    ) {
        let chart = chart_for(&values, false);
        prop_assume!(!chart.data().expect("data").series()[0].is_degenerate());
        let renderer =
            ScatterChartRenderer::new(Some(&chart), Some(AnimationPhase::COMPLETE), viewport());
        let mut canvas = RecordingCanvas::new();

        let stats = renderer.draw_data(&mut canvas);

        // Pixel y = 200 - 10 * value stays inside [0, 200] for values in [0, 20].
        let visible = values.iter().filter(|value| (0.0..=20.0).contains(*value)).count();
        prop_assert_eq!(stats.marks, visible);
        prop_assert_eq!(stats.culled, values.len() - visible);
        prop_assert_eq!(canvas.filled_rects().len(), visible);
    }

    #[test]
    fn connectors_only_join_consecutive_points(
        values in proptest::collection::vec(-40.0f64..40.0, 1..64)
    ) {
        let chart = chart_for(&values, true);
        prop_assume!(!chart.data().expect("data").series()[0].is_degenerate());
        let renderer =
            ScatterChartRenderer::new(Some(&chart), Some(AnimationPhase::COMPLETE), viewport());
        let mut canvas = RecordingCanvas::new();

        let stats = renderer.draw_values(&mut canvas);

        let in_bounds: Vec<bool> = values
            .iter()
            .map(|value| (0.0..=20.0).contains(value))
            .collect();
        let expected = in_bounds
            .windows(2)
            .filter(|pair| pair[0] || pair[1])
            .count();
        prop_assert_eq!(stats.connectors, expected);
        for (from, to) in canvas.path_segments() {
            prop_assert_eq!(to.x - from.x, 100.0);
        }
        prop_assert!(canvas.is_balanced());
    }

    #[test]
    fn unrevealed_highlights_emit_no_commands(
        x_index in 0i64..20,
        phase_x in 0.0f64..=1.0
    ) {
        let values: Vec<f64> = (0..20i32).map(|index| 1.0 + f64::from(index % 5)).collect();
        let chart = chart_for(&values, false);
        let phase = AnimationPhase::new(phase_x, 1.0).expect("phase");
        let renderer = ScatterChartRenderer::new(Some(&chart), Some(phase), viewport());
        let mut canvas = RecordingCanvas::new();

        let stats = renderer.draw_highlighted(&mut canvas, &[Highlight::new(0, x_index)]);

        let revealed = x_index as f64 <= 19.0 * phase_x;
        prop_assert_eq!(stats.highlights, usize::from(revealed));
        prop_assert_eq!(canvas.commands().is_empty(), !revealed);
    }
}
