//! Integration tests for the painter API across both backends.

use horizon_trellis_core::{BackendKind, PointF, SizeI};
use horizon_trellis_render::{
    CanvasSurface, Color, DashPattern, DrawCommand, Font, LineCap, PaintError, StateSaver,
    SurfaceState,
};
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::format::FmtSpan;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_trellis_render=trace")
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` and return the perf spans it opened, as formatted text.
fn perf_spans(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("horizon_trellis::perf=debug")
        .with_span_events(FmtSpan::NEW)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = captured.0.lock().clone();
    String::from_utf8(bytes).unwrap()
}

fn lines(commands: &[DrawCommand]) -> Vec<(PointF, PointF)> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_polyline_closed_triangle() {
    init_tracing();
    let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
    surface
        .painter(SizeI::new(20, 20))
        .begin_path()
        .move_to(0.0, 0.0)
        .line_to(10.0, 0.0)
        .line_to(10.0, 10.0)
        .close_path()
        .stroke();

    let bitmap = surface.flush().unwrap();
    assert_eq!(
        lines(bitmap.commands()),
        vec![
            (PointF::new(0.0, 0.0), PointF::new(10.0, 0.0)),
            (PointF::new(10.0, 0.0), PointF::new(10.0, 10.0)),
            (PointF::new(10.0, 10.0), PointF::new(0.0, 0.0)),
        ]
    );
}

#[test]
fn test_single_segment_stroke() {
    for kind in [BackendKind::Rich, BackendKind::Polyline] {
        let mut surface = CanvasSurface::new(kind, Color::WHITE);
        surface
            .painter(SizeI::new(20, 20))
            .begin_path()
            .move_to(2.0, 3.0)
            .line_to(12.0, 3.0)
            .stroke();

        let commands = surface.flush().unwrap().commands();
        assert_eq!(commands.len(), 1, "{kind}");
        match &commands[0] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!((*from, *to), (PointF::new(2.0, 3.0), PointF::new(12.0, 3.0)));
            }
            DrawCommand::StrokePath { path, .. } => assert_eq!(path.commands().len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn test_close_path_without_move_to() {
    init_tracing();
    for kind in [BackendKind::Rich, BackendKind::Polyline] {
        let mut surface = CanvasSurface::new(kind, Color::WHITE);
        surface
            .painter(SizeI::new(8, 8))
            .begin_path()
            .close_path()
            .stroke();
        assert!(surface.bitmap().unwrap().commands().is_empty(), "{kind}");
    }
}

#[test]
fn test_nested_saves_restore_original_fill() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    let mut painter = surface.painter(SizeI::new(10, 10));
    painter.fill_color(Color::GREEN);

    painter.save().fill_color(Color::RED);
    painter.save().fill_color(Color::BLUE);
    assert_eq!(painter.depth(), 2);

    painter.restore();
    assert_eq!(painter.state().fill, Color::RED);
    painter.restore();
    assert_eq!(painter.state().fill, Color::GREEN);
    assert_eq!(painter.depth(), 0);
}

#[test]
fn test_save_restore_round_trip() {
    let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
    let mut painter = surface.painter(SizeI::new(10, 10));
    painter
        .stroke_color(Color::RED)
        .line_width(3.0)
        .line_cap(LineCap::Round)
        .line_dash(DashPattern::simple(4.0, 2.0))
        .font(Font::new("monospace", 12.0).bold())
        .translate(5.0, 5.0);
    let before = painter.state().clone();

    painter
        .save()
        .stroke_color(Color::BLUE)
        .line_width(1.0)
        .line_dash(DashPattern::SOLID)
        .font(Font::default())
        .rotate(1.0)
        .scale(2.0, 2.0)
        .restore();

    assert_eq!(painter.state(), &before);
    assert_eq!(painter.state().stroke, Color::RED);
}

#[test]
fn test_unbalanced_restore() {
    init_tracing();
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    let mut painter = surface.painter(SizeI::new(10, 10));
    painter.fill_color(Color::YELLOW).restore();
    assert_eq!(painter.state().fill, Color::YELLOW);
    assert!(matches!(painter.try_restore(), Err(PaintError::StateUnderflow)));
}

#[test]
fn test_state_saver_restores_on_drop() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    let mut painter = surface.painter(SizeI::new(10, 10));
    painter.stroke_color(Color::RED);
    {
        let mut saver = StateSaver::new(&mut painter);
        saver.stroke_color(Color::BLUE);
        assert_eq!(saver.depth(), 1);
        {
            let mut inner = saver.scoped();
            inner.stroke_color(Color::GREEN);
            assert_eq!(inner.depth(), 2);
        }
        assert_eq!(saver.state().stroke, Color::BLUE);
    }
    assert_eq!(painter.state().stroke, Color::RED);
    assert_eq!(painter.depth(), 0);
}

#[test]
fn test_resize_yields_new_dimensions() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    assert_eq!(surface.painter(SizeI::new(40, 30)).size(), SizeI::new(40, 30));

    let painter = surface.painter(SizeI::new(64, 16));
    assert_eq!(painter.size(), SizeI::new(64, 16));
    let bitmap = surface.bitmap().unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (64, 16));
}

#[test]
fn test_rich_fill_and_stroke_pixels() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    surface
        .painter(SizeI::new(20, 20))
        .fill_color(Color::RED)
        .stroke_color(Color::BLUE)
        .line_width(2.0)
        .begin_path()
        .rect(4.0, 4.0, 12.0, 12.0)
        .fill()
        .stroke();

    let bitmap = surface.flush().unwrap();
    assert_eq!(bitmap.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(bitmap.pixel(10, 4), Some([0, 0, 255, 255]));
    assert_eq!(bitmap.pixel(1, 1), Some([255, 255, 255, 255]));
    assert!(matches!(bitmap.commands()[0], DrawCommand::FillPath { .. }));
    assert!(matches!(bitmap.commands()[1], DrawCommand::StrokePath { .. }));
}

#[test]
fn test_rich_curves_and_arcs() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    surface
        .painter(SizeI::new(40, 40))
        .fill_color(Color::BLACK)
        .begin_path()
        .arc(20.0, 20.0, 10.0, 0.0, std::f32::consts::TAU, false)
        .fill()
        .begin_path()
        .move_to(0.0, 39.0)
        .quadratic_curve_to(20.0, 20.0, 39.0, 39.0)
        .bezier_curve_to(30.0, 30.0, 10.0, 30.0, 0.0, 39.0)
        .stroke();

    let bitmap = surface.flush().unwrap();
    assert_eq!(bitmap.pixel(20, 20), Some([0, 0, 0, 255]));
    assert_eq!(bitmap.commands().len(), 2);
}

#[test]
fn test_polyline_ignores_unsupported_ops() {
    init_tracing();
    let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
    let mut painter = surface.painter(SizeI::new(20, 20));
    assert!(!painter.capabilities().fill_path);

    painter
        .begin_path()
        .rect(0.0, 0.0, 10.0, 10.0)
        .arc(10.0, 10.0, 5.0, 0.0, 3.0, false)
        .quadratic_curve_to(1.0, 1.0, 2.0, 2.0)
        .bezier_curve_to(1.0, 1.0, 2.0, 2.0, 3.0, 3.0)
        .fill();

    assert!(matches!(
        painter.try_fill(),
        Err(PaintError::Unsupported {
            op: "fill",
            backend: BackendKind::Polyline
        })
    ));
    assert!(painter.try_arc(0.0, 0.0, 1.0, 0.0, 1.0, false).is_err());
    assert!(painter.try_rect(0.0, 0.0, 1.0, 1.0).is_err());
    assert!(painter.try_quadratic_curve_to(0.0, 0.0, 1.0, 1.0).is_err());
    assert!(painter.try_bezier_curve_to(0.0, 0.0, 1.0, 1.0, 2.0, 2.0).is_err());

    let bitmap = surface.bitmap().unwrap();
    assert!(bitmap.commands().is_empty());
    assert_eq!(bitmap.pixel(5, 5), Some([255, 255, 255, 255]));
}

#[test]
fn test_immediate_primitives() {
    let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
    let mut stamp = RgbaImage::new(2, 2);
    for pixel in stamp.pixels_mut() {
        *pixel = Rgba([0, 255, 0, 255]);
    }

    surface
        .painter(SizeI::new(20, 20))
        .fill_color(Color::RED)
        .fill_rect(0.0, 0.0, 20.0, 20.0)
        .clear_rect(0.0, 0.0, 5.0, 5.0)
        .stroke_rect(10.0, 10.0, 5.0, 5.0)
        .fill_text("hello", 2.0, 18.0)
        .draw_image(&stamp, 6.0, 6.0);

    let bitmap = surface.flush().unwrap();
    assert_eq!(bitmap.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(bitmap.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(bitmap.pixel(6, 6), Some([0, 255, 0, 255]));
    assert!(bitmap.commands().iter().any(|command| matches!(
        command,
        DrawCommand::Text { text, .. } if text == "hello"
    )));
    assert_eq!(bitmap.commands().len(), 5);
}

#[test]
fn test_transform_applies_to_path_points() {
    let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
    surface
        .painter(SizeI::new(40, 40))
        .translate(10.0, 5.0)
        .scale(2.0, 2.0)
        .begin_path()
        .move_to(0.0, 0.0)
        .line_to(5.0, 0.0)
        .stroke();

    assert_eq!(
        lines(surface.flush().unwrap().commands()),
        vec![(PointF::new(10.0, 5.0), PointF::new(20.0, 5.0))]
    );
}

#[test]
fn test_destroyed_surface_ignores_painter() {
    init_tracing();
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    surface.prepare(SizeI::new(10, 10));
    surface.destroy();

    let mut painter = surface.painter(SizeI::new(10, 10));
    assert!(!painter.is_live());
    painter
        .fill_color(Color::RED)
        .save()
        .fill_rect(0.0, 0.0, 10.0, 10.0)
        .restore();
    assert_eq!(painter.depth(), 0);
    assert!(matches!(painter.try_fill(), Err(PaintError::SurfaceDestroyed)));

    assert_eq!(surface.state(), SurfaceState::Destroyed);
    assert!(surface.bitmap().is_none());
    assert!(surface.flush().is_none());
}

#[test]
fn test_drawing_before_allocation_is_ignored() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    let mut painter = surface.painter(SizeI::ZERO);
    assert!(!painter.is_live());
    painter.fill_rect(0.0, 0.0, 4.0, 4.0).fill_color(Color::BLUE);
    assert_eq!(painter.state().fill, Color::BLUE);
    assert_eq!(surface.state(), SurfaceState::Uninitialized);
}

#[test]
fn test_polyline_far_and_infinite_points() {
    init_tracing();
    let started = Instant::now();
    let mut surface = CanvasSurface::new(BackendKind::Polyline, Color::WHITE);
    surface
        .painter(SizeI::new(20, 20))
        .stroke_color(Color::RED)
        .begin_path()
        .move_to(0.0, 5.0)
        .line_to(2.0e9, 5.0)
        .stroke()
        .begin_path()
        .move_to(3.0, 10.0)
        .line_to(f32::NEG_INFINITY, 10.0)
        .line_to(f32::NAN, 12.0)
        .stroke();

    let bitmap = surface.flush().unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(bitmap.pixel(0, 5), Some(RED));
    assert_eq!(bitmap.pixel(19, 5), Some(RED));
    assert_eq!(bitmap.pixel(3, 10), Some(WHITE));
    assert_eq!(lines(bitmap.commands()).len(), 3);
}

#[test]
fn test_dashed_stroke_leaves_gaps() {
    for kind in [BackendKind::Rich, BackendKind::Polyline] {
        let mut surface = CanvasSurface::new(kind, Color::WHITE);
        surface
            .painter(SizeI::new(40, 10))
            .stroke_color(Color::RED)
            .line_width(3.0)
            .line_dash(DashPattern::simple(4.0, 4.0))
            .begin_path()
            .move_to(0.0, 5.0)
            .line_to(40.0, 5.0)
            .stroke();

        let bitmap = surface.flush().unwrap();
        assert_eq!(bitmap.pixel(1, 5), Some(RED), "{kind:?}");
        assert_eq!(bitmap.pixel(6, 5), Some(WHITE), "{kind:?}");
        assert_eq!(bitmap.pixel(9, 5), Some(RED), "{kind:?}");
        assert_eq!(bitmap.pixel(14, 5), Some(WHITE), "{kind:?}");
    }
}

#[test]
fn test_dash_lengths_follow_transform() {
    let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
    surface
        .painter(SizeI::new(40, 10))
        .stroke_color(Color::RED)
        .line_dash(DashPattern::simple(2.0, 2.0))
        .scale(2.0, 2.0)
        .begin_path()
        .move_to(0.0, 2.5)
        .line_to(20.0, 2.5)
        .stroke();

    let bitmap = surface.flush().unwrap();
    assert_eq!(bitmap.pixel(2, 5), Some(RED));
    assert_eq!(bitmap.pixel(6, 5), Some(WHITE));
    assert_eq!(bitmap.pixel(10, 5), Some(RED));
}

#[test]
fn test_rich_fill_and_stroke_open_perf_spans() {
    let output = perf_spans(|| {
        let mut surface = CanvasSurface::new(BackendKind::Rich, Color::WHITE);
        surface
            .painter(SizeI::new(10, 10))
            .begin_path()
            .rect(1.0, 1.0, 5.0, 5.0)
            .fill()
            .stroke();
    });
    assert!(output.contains("rich_fill"), "{output}");
    assert!(output.contains("rich_stroke"), "{output}");
}
