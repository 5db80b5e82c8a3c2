use super::*;
use crate::foundation::core::Coordinate;
use crate::session::workspace::Workspace;

const MAP: &str = "type octile\nheight 2\nwidth 4\nmap\n....\n.@..\n";
const WALK: &str = "(0,0)\n(1,0)\n(2,0)\n(3,0)";

fn opts() -> CpuRenderOpts {
    CpuRenderOpts {
        cell_px: 30,
        ..CpuRenderOpts::default()
    }
}

fn workspace(solution: &str) -> Workspace {
    let mut ws = Workspace::default();
    ws.load_map_str(MAP).unwrap();
    ws.load_solution_str(solution).unwrap();
    ws
}

fn render_at(ws: &mut Workspace, time: f64) -> FrameRGBA {
    let map = ws.map().unwrap().clone();
    let mut renderer = CpuRenderer::new(opts()).unwrap();
    let frame = ws.frame_at(time).unwrap();
    renderer.render(&map, &frame).unwrap()
}

#[test]
fn zero_cell_size_is_rejected() {
    let err = CpuRenderer::new(CpuRenderOpts {
        cell_px: 0,
        ..CpuRenderOpts::default()
    })
    .unwrap_err();
    assert!(matches!(err, VisError::Validation(_)));
}

#[test]
fn canvas_must_fit_u16() {
    let renderer = CpuRenderer::new(opts()).unwrap();
    let wide = GridMap::new(3000, 1, std::iter::empty::<Coordinate>()).unwrap();
    assert!(matches!(
        renderer.canvas_size(&wide).unwrap_err(),
        VisError::Render(_)
    ));
    let map = GridMap::parse(MAP).unwrap();
    assert_eq!(renderer.canvas_size(&map).unwrap(), (120, 60));
}

#[test]
fn frame_has_board_size_and_layers() {
    let mut ws = workspace(WALK);
    let o = opts();
    let f = render_at(&mut ws, 0.0);

    assert_eq!((f.width, f.height), (120, 60));
    assert_eq!(f.data.len(), 120 * 60 * 4);
    assert!(f.premultiplied);

    // obstacle at (1, 1), free cell at (2, 1)
    assert_eq!(f.pixel(45, 45), Some(o.obstacle_rgba));
    assert_eq!(f.pixel(75, 45), Some(o.background_rgba));
    // agent 0 sits on (0, 0)
    assert_eq!(f.pixel(15, 15), Some(o.agent_color(0)));
    // grid line between (0, 0) and (1, 0)
    assert_ne!(f.pixel(30, 5), Some(o.background_rgba));
}

#[test]
fn trails_follow_display_toggle() {
    let mut ws = workspace(WALK);
    let o = opts();

    let f = render_at(&mut ws, 2.0);
    assert_eq!(f.pixel(45, 15), Some(o.agent_color(0)));

    ws.engine_mut().display_mut().trace_paths = false;
    let f = render_at(&mut ws, 2.0);
    assert_eq!(f.pixel(45, 15), Some(o.background_rgba));
}

#[test]
fn orientation_marker_points_along_heading() {
    let mut ws = workspace("(0,0,X_PLUS)\n(1,0,X_PLUS)");
    let o = opts();
    let f = render_at(&mut ws, 0.0);

    assert_eq!(f.pixel(18, 15), Some(o.marker_rgba));
    assert_eq!(f.pixel(9, 15), Some(o.agent_color(0)));
}

#[test]
fn renderer_reuses_context_across_sizes() {
    let mut ws = workspace(WALK);
    let map = ws.map().unwrap().clone();
    let small = GridMap::parse("type octile\nheight 1\nwidth 4\nmap\n....\n").unwrap();
    let mut renderer = CpuRenderer::new(opts()).unwrap();

    let frame = ws.frame_at(1.0).unwrap().into_owned();
    let a = renderer.render(&map, &frame).unwrap();
    let b = renderer.render(&small, &frame).unwrap();
    let c = renderer.render(&map, &frame).unwrap();
    assert_eq!((b.width, b.height), (120, 30));
    assert_eq!(a, c);
}

fn changed_pixels(a: &FrameRGBA, b: &FrameRGBA) -> Vec<(u32, u32)> {
    assert_eq!((a.width, a.height), (b.width, b.height));
    let mut out = Vec::new();
    for y in 0..a.height {
        for x in 0..a.width {
            if a.pixel(x, y) != b.pixel(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn agent_ids_toggle_draws_inside_the_agent() {
    let mut ws = workspace(WALK);
    let plain = render_at(&mut ws, 0.0);

    ws.engine_mut().display_mut().show_agent_ids = true;
    let labelled = render_at(&mut ws, 0.0);

    let changed = changed_pixels(&plain, &labelled);
    assert!(!changed.is_empty());
    // agent 0 sits on cell (0, 0)
    assert!(changed.iter().all(|&(x, y)| x < 30 && y < 30));

    ws.engine_mut().display_mut().show_agent_ids = false;
    assert_eq!(render_at(&mut ws, 0.0), plain);
}

#[test]
fn cell_ids_toggle_labels_free_cells_only() {
    let mut ws = workspace(WALK);
    let plain = render_at(&mut ws, 0.0);

    ws.engine_mut().display_mut().show_cell_ids = true;
    let labelled = render_at(&mut ws, 0.0);

    let changed = changed_pixels(&plain, &labelled);
    assert!(!changed.is_empty());
    // the obstacle at (1, 1) gets no label
    assert!(
        !changed
            .iter()
            .any(|&(x, y)| (31..59).contains(&x) && (31..59).contains(&y))
    );
    // the empty cell (3, 1) does
    assert!(
        changed
            .iter()
            .any(|&(x, y)| (90..120).contains(&x) && (30..60).contains(&y))
    );
}

#[test]
fn missing_label_font_is_rejected() {
    let err = CpuRenderer::new(CpuRenderOpts {
        label_font: Some("no/such/font.ttf".into()),
        ..opts()
    })
    .unwrap_err();
    assert!(matches!(err, VisError::Validation(_)));
}

#[test]
fn palette_wraps_by_id() {
    let o = CpuRenderOpts::default();
    assert_eq!(o.agent_color(0), o.agent_color(o.agent_palette.len()));
}
