use crate::camera::{Camera, ZOOM_STEP};
use crate::catalog::{Catalog, CONSTELLATION_COLOR, GREEN, GRID_COLOR, WHITE};
use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::input::{Command, InputSource, TerminalInput};
use crate::orbit::{apparent_position, simulated_days, OrbitExaggeration};
use crate::scene::SceneState;
use crate::sky::{project, sky_scale, SkyPoint};
use crate::surface::{CanvasSize, ScreenPoint, Surface};
use crate::term::TerminalSurface;
use anyhow::Result;
use std::time::{Duration, Instant};

// Objects whose center is within this margin of the canvas still draw.
const CULL_MARGIN: f64 = 100.0;

const STAR_SIZE_K: f64 = 10.0;
const MAGNITUDE_SHIFT: f64 = 5.0;
const MIN_MAGNITUDE_DENOM: f64 = 0.1;
const MIN_PLANET_RADIUS: f64 = 2.0;

const STAR_LABEL_MAGNITUDE: f64 = 1.0;
const STAR_LABEL_ZOOM: f64 = 2.0;
const CONSTELLATION_LABEL_ZOOM: f64 = 0.5;
const PLANET_LABEL_ZOOM: f64 = 0.3;
const EARTH_DETAIL_ZOOM: f64 = 5.0;
const EARTH_SNAP_ZOOM: f64 = 20.0;

const LABEL_GAP: f64 = 2.0;
const LABEL_RISE: f64 = 2.0;
const MIN_GRID_SPACING: f64 = 4.0;
const HUD_ORIGIN: ScreenPoint = ScreenPoint { x: 2.0, y: 0.0 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopState {
    Running,
    Stopped,
}

/// Per-frame projection inputs, fixed once the frame starts drawing.
struct View {
    canvas: CanvasSize,
    scale: f64,
    now_hours: f64,
    time_offset_hours: f64,
}

impl View {
    fn locate(&self, camera: &Camera, ra: f64, dec: f64) -> (SkyPoint, ScreenPoint) {
        let world = project(ra, dec, self.time_offset_hours, self.now_hours).scaled(self.scale);
        (world, camera.world_to_screen(world, self.canvas))
    }
}

/// The planetarium and everything it owns: drawing surface, clock, catalog,
/// camera and scene flags.
pub(crate) struct Planetarium<S: Surface, C: Clock> {
    surface: S,
    clock: C,
    catalog: Catalog,
    camera: Camera,
    scene: SceneState,
    orbit: OrbitExaggeration,
    grid_spacing: f64,
    state: LoopState,
}

impl<S: Surface, C: Clock> Planetarium<S, C> {
    pub(crate) fn new(surface: S, clock: C, catalog: Catalog, settings: &Settings) -> Self {
        Self {
            surface,
            clock,
            catalog,
            camera: Camera::default(),
            scene: SceneState {
                show_grid: settings.show_grid,
                show_planets: settings.show_planets,
                show_constellations: settings.show_constellations,
                ..SceneState::default()
            },
            orbit: settings.orbit_exaggeration,
            grid_spacing: settings.grid_spacing,
            state: LoopState::Running,
        }
    }

    pub(crate) fn into_surface(self) -> S {
        self.surface
    }

    pub(crate) fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::TimeBack => self.scene.step_time(-1.0),
            Command::TimeForward => self.scene.step_time(1.0),
            Command::ToggleConstellations => self.scene.toggle_constellations(),
            Command::TogglePlanets => self.scene.toggle_planets(),
            Command::ToggleGrid => self.scene.toggle_grid(),
            Command::FindEarth => match self.scene.earth {
                Some(e) => {
                    if self.camera.zoom_to(e.x, e.y, EARTH_SNAP_ZOOM) {
                        tracing::info!(x = e.x, y = e.y, "camera snapped to Earth");
                    }
                }
                None => tracing::debug!("Earth not drawn yet, ignoring snap"),
            },
            Command::ResetView => self.camera.reset(),
            Command::ZoomIn => {
                self.camera.adjust_zoom(ZOOM_STEP);
            }
            Command::ZoomOut => {
                self.camera.adjust_zoom(1.0 / ZOOM_STEP);
            }
            Command::Quit => {
                tracing::info!("quit requested");
                self.state = LoopState::Stopped;
            }
        }
        tracing::debug!(?cmd, zoom = self.camera.zoom, offset = self.scene.time_offset_hours, "command applied");
    }

    /// One full frame: apply `commands`, then draw every layer and present.
    /// Commands after a quit are dropped; the frame itself still completes.
    pub(crate) fn frame(&mut self, commands: &[Command]) -> Result<()> {
        for &cmd in commands {
            if self.state == LoopState::Stopped {
                break;
            }
            self.apply(cmd);
        }

        self.surface.clear();
        let canvas = self.surface.size();
        let view = View {
            canvas,
            scale: sky_scale(canvas.width, canvas.height),
            now_hours: self.clock.hours_of_day(),
            time_offset_hours: self.scene.time_offset_hours,
        };

        if self.scene.show_grid {
            self.draw_grid(canvas);
        }
        self.draw_stars(&view);
        if self.scene.show_constellations {
            self.draw_constellations(&view);
        }
        if self.scene.show_planets {
            self.draw_planets(&view);
        }
        self.draw_hud();

        self.surface.present()
    }

    /// Run frames until a quit command, capped at `fps`.
    pub(crate) fn run(&mut self, input: &mut impl InputSource, fps: u32) -> Result<()> {
        let frame_dt = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        while self.state == LoopState::Running {
            let started = Instant::now();
            let commands = input.drain()?;
            self.frame(&commands)?;

            let elapsed = started.elapsed();
            if elapsed < frame_dt {
                std::thread::sleep(frame_dt - elapsed);
            }
        }
        Ok(())
    }

    fn draw_grid(&mut self, canvas: CanvasSize) {
        let spacing = self.grid_spacing.max(MIN_GRID_SPACING);
        let mut x = 0.0;
        while x < canvas.width {
            let line = [ScreenPoint { x, y: 0.0 }, ScreenPoint { x, y: canvas.height }];
            self.surface.draw_polyline(&line, GRID_COLOR);
            x += spacing;
        }
        let mut y = 0.0;
        while y < canvas.height {
            let line = [ScreenPoint { x: 0.0, y }, ScreenPoint { x: canvas.width, y }];
            self.surface.draw_polyline(&line, GRID_COLOR);
            y += spacing;
        }
    }

    fn draw_stars(&mut self, view: &View) {
        let zoom = self.camera.zoom;
        for star in &self.catalog.stars {
            let (_, screen) = view.locate(&self.camera, star.ra, star.dec);
            if !view.canvas.is_near(screen, CULL_MARGIN) {
                continue;
            }
            let radius = star_radius(star.magnitude, zoom);
            self.surface.draw_circle(screen, radius, star.color);
            if star.magnitude < STAR_LABEL_MAGNITUDE || zoom > STAR_LABEL_ZOOM {
                self.surface.draw_text(screen.offset(radius + LABEL_GAP, -LABEL_RISE), &star.name, WHITE);
            }
        }
    }

    // Polylines are not culled: a segment can cross the canvas with both
    // ends far outside it, and the surface clips. A non-finite vertex breaks
    // the path in two rather than bridging its neighbours.
    fn draw_constellations(&mut self, view: &View) {
        for path in &self.catalog.constellations {
            let points: Vec<ScreenPoint> = path
                .vertices
                .iter()
                .map(|&(ra, dec)| view.locate(&self.camera, ra, dec).1)
                .collect();

            let mut label_at = None;
            for run in points.split(|p| !p.is_finite()) {
                if run.len() < 2 {
                    continue;
                }
                self.surface.draw_polyline(run, CONSTELLATION_COLOR);
                if label_at.is_none() {
                    label_at = Some(run[0]);
                }
            }

            let Some(first) = label_at else {
                continue;
            };
            if self.camera.zoom > CONSTELLATION_LABEL_ZOOM && view.canvas.is_near(first, CULL_MARGIN) {
                self.surface.draw_text(first.offset(LABEL_GAP * 2.0, -LABEL_RISE * 2.0), &path.name, CONSTELLATION_COLOR);
            }
        }
    }

    fn draw_planets(&mut self, view: &View) {
        let zoom = self.camera.zoom;
        let days = simulated_days(self.clock.day_of_year(), self.scene.time_offset_hours);
        for planet in &self.catalog.planets {
            let pos = apparent_position(planet, days, self.orbit);
            let (world, screen) = view.locate(&self.camera, pos.ra, pos.dec);
            if planet.is_earth() && world.is_finite() {
                self.scene.earth = Some(world);
            }
            if !view.canvas.is_near(screen, CULL_MARGIN) {
                continue;
            }

            let radius = planet_radius(planet.display_size, zoom);
            if planet.is_earth() && zoom > EARTH_DETAIL_ZOOM {
                draw_earth(&mut self.surface, screen, radius * 2.0, planet.color);
            } else {
                self.surface.draw_circle(screen, radius, planet.color);
            }
            if zoom > PLANET_LABEL_ZOOM {
                self.surface.draw_text(screen.offset(radius + LABEL_GAP, -LABEL_RISE), &planet.name, WHITE);
            }
        }
    }

    fn draw_hud(&mut self) {
        let lines = [
            format!("Time offset: {} hours (LEFT/RIGHT)", self.scene.time_offset_hours),
            format!("Zoom: {:.2}x (wheel, +/-)", self.camera.zoom),
            "C: Toggle constellations".to_string(),
            "P: Toggle planets".to_string(),
            "G: Toggle grid".to_string(),
            "E: Find Earth".to_string(),
            "R: Reset view".to_string(),
            "ESC: Quit".to_string(),
        ];
        let step = self.surface.line_height();
        for (i, line) in lines.iter().enumerate() {
            self.surface.draw_text(HUD_ORIGIN.offset(0.0, i as f64 * step), line, WHITE);
        }
    }
}

/// Disc radius for a star: brighter (lower magnitude) is bigger, never below
/// one pixel.
pub(crate) fn star_radius(magnitude: f64, zoom: f64) -> f64 {
    let mut denom = magnitude + MAGNITUDE_SHIFT;
    if denom.abs() < MIN_MAGNITUDE_DENOM {
        denom = MIN_MAGNITUDE_DENOM;
    }
    (STAR_SIZE_K / denom * zoom).round().max(1.0)
}

pub(crate) fn planet_radius(display_size: f64, zoom: f64) -> f64 {
    (display_size * zoom).round().max(MIN_PLANET_RADIUS)
}

/// Ocean disc of radius `r` with two land masses.
fn draw_earth<S: Surface>(surface: &mut S, at: ScreenPoint, r: f64, ocean: crate::catalog::Rgb) {
    surface.draw_circle(at, r, ocean);
    surface.draw_ellipse(at.offset(-0.4 * r, -0.45 * r), 0.3 * r, 0.15 * r, GREEN);
    surface.draw_ellipse(at.offset(-0.25 * r, -0.1 * r), 0.15 * r, 0.2 * r, GREEN);
}

pub(crate) fn run(settings: Settings) -> Result<()> {
    let catalog = Catalog::builtin(settings.seed, settings.background_stars);
    tracing::info!(
        stars = catalog.stars.len(),
        planets = catalog.planets.len(),
        constellations = catalog.constellations.len(),
        fps = settings.fps(),
        "starting"
    );

    let clock = SystemClock { use_utc: settings.use_utc };
    let surface = TerminalSurface::begin()?;
    let mut app = Planetarium::new(surface, clock, catalog, &settings);
    let res = app.run(&mut TerminalInput, settings.fps());
    app.into_surface().end()?;

    match &res {
        Ok(()) => tracing::info!("stopped"),
        Err(e) => tracing::error!(error = %e, "render loop failed"),
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ConstellationPath, Planet, Rgb, Star, BLUE, RED};
    use crate::clock::FixedClock;
    use crate::surface::recording::{DrawCall, RecordingSurface};
    use std::collections::VecDeque;

    const STAR_COLOR: Rgb = Rgb::new(1, 2, 3);
    const DIM_COLOR: Rgb = Rgb::new(4, 5, 6);

    fn test_catalog() -> Catalog {
        let planet = |name: &str, color: Rgb, size: f64, r: f64, period: f64| Planet {
            name: name.to_string(),
            ra: 0.0,
            dec: 0.0,
            magnitude: -1.0,
            color,
            display_size: size,
            orbit_radius_factor: r,
            orbit_period_days: period,
        };
        Catalog {
            stars: vec![
                Star { name: "Bright".into(), ra: 6.0, dec: 0.0, magnitude: 0.5, color: STAR_COLOR },
                Star { name: "Dim".into(), ra: 6.0, dec: 20.0, magnitude: 4.0, color: DIM_COLOR },
            ],
            planets: vec![planet("Earth", BLUE, 6.0, 1.0, 365.0), planet("Mars", RED, 4.0, 1.5, 687.0)],
            constellations: vec![ConstellationPath {
                name: "Line".into(),
                vertices: vec![(6.0, 10.0), (6.0, -10.0)],
            }],
        }
    }

    fn planetarium() -> Planetarium<RecordingSurface, FixedClock> {
        Planetarium::new(
            RecordingSurface::new(1200.0, 900.0),
            FixedClock { hours: 12.0, day: 0 },
            test_catalog(),
            &Settings::default(),
        )
    }

    fn position(calls: &[DrawCall], pred: impl Fn(&DrawCall) -> bool) -> Option<usize> {
        calls.iter().position(pred)
    }

    fn circle_of(color: Rgb) -> impl Fn(&DrawCall) -> bool {
        move |c| matches!(c, DrawCall::Circle { color: cc, .. } if *cc == color)
    }

    fn polyline_of(color: Rgb) -> impl Fn(&DrawCall) -> bool {
        move |c| matches!(c, DrawCall::Polyline { color: cc, .. } if *cc == color)
    }

    fn text_of(text: &'static str) -> impl Fn(&DrawCall) -> bool {
        move |c| matches!(c, DrawCall::Text { text: t, .. } if t == text)
    }

    #[test]
    fn test_layers_draw_in_order() {
        let mut app = planetarium();
        app.frame(&[]).unwrap();
        let calls = app.surface.last_frame();

        assert_eq!(calls.first(), Some(&DrawCall::Clear));
        assert_eq!(calls.last(), Some(&DrawCall::Present));

        let last_grid = calls.iter().rposition(polyline_of(GRID_COLOR)).unwrap();
        let star = position(calls, circle_of(STAR_COLOR)).unwrap();
        let constellation = position(calls, polyline_of(CONSTELLATION_COLOR)).unwrap();
        let earth = position(calls, circle_of(BLUE)).unwrap();
        let hud = position(calls, |c| matches!(c, DrawCall::Text { text, .. } if text.starts_with("Time offset"))).unwrap();

        assert!(last_grid < star);
        assert!(star < constellation);
        assert!(constellation < earth);
        assert!(earth < hud);
    }

    #[test]
    fn test_star_lands_where_projection_says() {
        let mut app = planetarium();
        app.frame(&[]).unwrap();
        // ra 6h at 12h is a 90° hour angle: x = 1, y = 0, scaled by 360
        let hit = app.surface.last_frame().iter().any(|c| {
            matches!(c, DrawCall::Circle { center, radius, color }
                if *color == STAR_COLOR
                    && (center.x - 960.0).abs() < 1e-6
                    && (center.y - 450.0).abs() < 1e-6
                    && *radius == 2.0)
        });
        assert!(hit);
    }

    #[test]
    fn test_toggles_hide_layers() {
        let mut app = planetarium();
        app.frame(&[Command::ToggleGrid, Command::TogglePlanets, Command::ToggleConstellations]).unwrap();
        let calls = app.surface.last_frame();
        assert!(position(calls, polyline_of(GRID_COLOR)).is_none());
        assert!(position(calls, polyline_of(CONSTELLATION_COLOR)).is_none());
        assert!(position(calls, circle_of(BLUE)).is_none());
        assert!(position(calls, circle_of(STAR_COLOR)).is_some());

        app.frame(&[Command::ToggleGrid, Command::TogglePlanets, Command::ToggleConstellations]).unwrap();
        let calls = app.surface.last_frame();
        assert!(position(calls, polyline_of(GRID_COLOR)).is_some());
        assert!(position(calls, polyline_of(CONSTELLATION_COLOR)).is_some());
        assert!(position(calls, circle_of(BLUE)).is_some());
    }

    #[test]
    fn test_find_earth_before_any_frame_is_noop() {
        let mut app = planetarium();
        app.apply(Command::FindEarth);
        assert_eq!(app.camera, Camera::default());

        // the snap in this batch runs before planets are drawn
        app.frame(&[Command::FindEarth]).unwrap();
        assert_eq!(app.camera, Camera::default());
        assert!(app.scene.earth.is_some());
    }

    #[test]
    fn test_find_earth_centers_detailed_earth() {
        let mut app = planetarium();
        app.frame(&[]).unwrap();
        let earth = app.scene.earth.unwrap();
        app.frame(&[Command::FindEarth]).unwrap();

        assert_eq!(app.camera.zoom, EARTH_SNAP_ZOOM);
        assert_eq!((app.camera.offset_x, app.camera.offset_y), (earth.x, earth.y));

        let calls = app.surface.last_frame();
        let disc = calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Circle { center, radius, color } if *color == BLUE => Some((*center, *radius)),
                _ => None,
            })
            .unwrap();
        assert!((disc.0.x - 600.0).abs() < 1e-6 && (disc.0.y - 450.0).abs() < 1e-6);
        assert_eq!(disc.1, 240.0);
        let land = calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Ellipse { color, .. } if *color == GREEN))
            .count();
        assert_eq!(land, 2);
    }

    #[test]
    fn test_far_objects_are_culled() {
        let mut app = planetarium();
        // puts "Bright" (sky plane 360, 0) at screen (10000, 10000)
        app.camera = Camera { zoom: 1.0, offset_x: -9040.0, offset_y: -9550.0 };
        app.frame(&[]).unwrap();
        let calls = app.surface.last_frame();
        assert!(position(calls, circle_of(STAR_COLOR)).is_none());
        assert!(position(calls, text_of("Bright")).is_none());
        assert!(position(calls, circle_of(BLUE)).is_none());
        assert!(app.scene.earth.is_some());
    }

    #[test]
    fn test_labels_follow_magnitude_and_zoom() {
        let mut app = planetarium();
        app.frame(&[]).unwrap();
        let calls = app.surface.last_frame();
        assert!(position(calls, text_of("Bright")).is_some());
        assert!(position(calls, text_of("Dim")).is_none());
        assert!(position(calls, text_of("Earth")).is_some());
        assert!(position(calls, text_of("Line")).is_some());

        let mut app = planetarium();
        app.camera = Camera { zoom: 2.5, offset_x: 360.0, offset_y: 0.0 };
        app.frame(&[]).unwrap();
        assert!(position(app.surface.last_frame(), text_of("Dim")).is_some());

        let mut app = planetarium();
        app.camera.zoom = 0.2;
        app.frame(&[]).unwrap();
        let calls = app.surface.last_frame();
        assert!(position(calls, text_of("Earth")).is_none());
        assert!(position(calls, text_of("Line")).is_none());
        assert!(position(calls, text_of("Bright")).is_some());
    }

    #[test]
    fn test_time_keys_move_offset_and_hud() {
        let mut app = planetarium();
        app.frame(&[Command::TimeForward, Command::TimeForward, Command::TimeBack]).unwrap();
        assert_eq!(app.scene.time_offset_hours, 1.0);
        assert!(position(app.surface.last_frame(), text_of("Time offset: 1 hours (LEFT/RIGHT)")).is_some());

        app.frame(&[Command::TimeBack, Command::TimeBack]).unwrap();
        assert!(position(app.surface.last_frame(), text_of("Time offset: -1 hours (LEFT/RIGHT)")).is_some());
    }

    #[test]
    fn test_quit_completes_the_frame() {
        let mut app = planetarium();
        app.frame(&[Command::Quit, Command::TimeForward]).unwrap();
        assert_eq!(app.state, LoopState::Stopped);
        assert_eq!(app.scene.time_offset_hours, 0.0);
        assert_eq!(app.surface.calls.last(), Some(&DrawCall::Present));
    }

    #[test]
    fn test_grid_ignores_camera() {
        let grid = |app: &Planetarium<RecordingSurface, FixedClock>| -> Vec<DrawCall> {
            app.surface
                .last_frame()
                .iter()
                .filter(|c| matches!(c, DrawCall::Polyline { color, .. } if *color == GRID_COLOR))
                .cloned()
                .collect()
        };
        let mut app = planetarium();
        app.frame(&[]).unwrap();
        let before = grid(&app);
        app.frame(&[Command::ZoomIn, Command::ZoomIn, Command::TimeForward]).unwrap();
        assert_eq!(grid(&app), before);
        // 1200 / 24 vertical + 900 / 24 horizontal (rounded up)
        assert_eq!(before.len(), 50 + 38);
    }

    #[test]
    fn test_reset_after_zoom() {
        let mut app = planetarium();
        app.frame(&[Command::ZoomIn, Command::ZoomIn, Command::ZoomOut]).unwrap();
        assert!((app.camera.zoom - ZOOM_STEP).abs() < 1e-9);
        app.frame(&[Command::ResetView]).unwrap();
        assert_eq!(app.camera, Camera::default());
    }

    fn polylines_of(calls: &[DrawCall], color: Rgb) -> Vec<Vec<ScreenPoint>> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Polyline { points, color: cc } if *cc == color => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let mut catalog = test_catalog();
        catalog.stars.push(Star { name: "Lost".into(), ra: f64::NAN, dec: 0.0, magnitude: 0.0, color: WHITE });
        catalog.planets[0].dec = f64::NAN;
        catalog.constellations.push(ConstellationPath {
            name: "Broken".into(),
            vertices: vec![(6.0, 30.0), (f64::NAN, 0.0), (6.0, -30.0), (6.0, -40.0)],
        });
        let mut app = Planetarium::new(
            RecordingSurface::new(1200.0, 900.0),
            FixedClock { hours: 12.0, day: 0 },
            catalog,
            &Settings::default(),
        );
        app.frame(&[]).unwrap();
        let calls = app.surface.last_frame();

        assert!(position(calls, circle_of(STAR_COLOR)).is_some());
        assert!(position(calls, circle_of(RED)).is_some());
        assert!(position(calls, text_of("Lost")).is_none());
        assert!(position(calls, circle_of(BLUE)).is_none());
        assert!(position(calls, text_of("Earth")).is_none());
        assert_eq!(app.scene.earth, None);
        assert!(calls.iter().all(|c| match c {
            DrawCall::Circle { center, .. } | DrawCall::Text { at: center, .. } => center.is_finite(),
            DrawCall::Polyline { points, .. } => points.iter().all(|p| p.is_finite()),
            _ => true,
        }));
        assert_eq!(calls.last(), Some(&DrawCall::Present));

        // "Line" plus the tail of "Broken"; the lone head vertex draws nothing
        let lines = polylines_of(calls, CONSTELLATION_COLOR);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.len() == 2));
        assert!(position(calls, text_of("Broken")).is_some());

        // E stays a no-op while Earth has no finite position
        app.frame(&[Command::FindEarth]).unwrap();
        assert_eq!(app.camera, Camera::default());
    }

    #[test]
    fn test_bad_vertex_splits_path() {
        let mut catalog = test_catalog();
        catalog.constellations = vec![ConstellationPath {
            name: "Split".into(),
            vertices: vec![(6.0, 30.0), (6.0, 20.0), (6.0, f64::INFINITY), (6.0, -20.0), (6.0, -30.0)],
        }];
        let mut app = Planetarium::new(
            RecordingSurface::new(1200.0, 900.0),
            FixedClock { hours: 12.0, day: 0 },
            catalog,
            &Settings::default(),
        );
        app.frame(&[]).unwrap();
        let lines = polylines_of(app.surface.last_frame(), CONSTELLATION_COLOR);
        assert_eq!(lines.len(), 2);
        // no segment joins dec 20 to dec -20
        assert!(lines[0].iter().all(|p| p.y < 450.0));
        assert!(lines[1].iter().all(|p| p.y > 450.0));
    }

    #[test]
    fn test_star_radius() {
        assert_eq!(star_radius(-1.46, 1.0), 3.0);
        assert_eq!(star_radius(5.0, 1.0), 1.0);
        assert_eq!(star_radius(0.0, 4.0), 8.0);
        assert_eq!(star_radius(-26.74, 1.0), 1.0);
        assert!(star_radius(-5.0, 1.0).is_finite());
        assert_eq!(star_radius(f64::NAN, 1.0), 1.0);
    }

    #[test]
    fn test_planet_radius_has_floor() {
        assert_eq!(planet_radius(6.0, 1.0), 6.0);
        assert_eq!(planet_radius(3.0, 0.1), 2.0);
        assert_eq!(planet_radius(8.0, 2.5), 20.0);
    }

    struct Scripted(VecDeque<Vec<Command>>);

    impl InputSource for Scripted {
        fn drain(&mut self) -> Result<Vec<Command>> {
            Ok(self.0.pop_front().unwrap_or_else(|| vec![Command::Quit]))
        }
    }

    #[test]
    fn test_run_until_quit() {
        let mut app = planetarium();
        let mut input = Scripted(VecDeque::from(vec![
            vec![Command::TimeForward],
            vec![],
            vec![Command::ToggleGrid, Command::Quit],
        ]));
        app.run(&mut input, 240).unwrap();
        assert_eq!(app.state, LoopState::Stopped);
        assert_eq!(app.scene.time_offset_hours, 1.0);
        assert!(!app.scene.show_grid);
        let presents = app.surface.calls.iter().filter(|c| **c == DrawCall::Present).count();
        assert_eq!(presents, 3);
    }
}
