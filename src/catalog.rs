use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub(crate) const WHITE: Rgb = Rgb::new(255, 255, 255);
pub(crate) const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub(crate) const BLUE: Rgb = Rgb::new(0, 100, 255);
pub(crate) const RED: Rgb = Rgb::new(255, 50, 50);
pub(crate) const GREEN: Rgb = Rgb::new(50, 255, 50);
pub(crate) const GRID_COLOR: Rgb = Rgb::new(50, 50, 80);
pub(crate) const CONSTELLATION_COLOR: Rgb = Rgb::new(100, 100, 255);

const WARM: Rgb = Rgb::new(255, 200, 150);
const BACKGROUND_COLORS: [Rgb; 3] = [WHITE, WARM, BLUE];

pub(crate) const EARTH: &str = "Earth";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Star {
    pub(crate) name: String,
    pub(crate) ra: f64,  // hours
    pub(crate) dec: f64, // degrees
    pub(crate) magnitude: f64,
    pub(crate) color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Planet {
    pub(crate) name: String,
    pub(crate) ra: f64,
    pub(crate) dec: f64,
    #[allow(dead_code)] // catalog data, disc size comes from display_size
    pub(crate) magnitude: f64,
    pub(crate) color: Rgb,
    pub(crate) display_size: f64, // px at zoom 1
    pub(crate) orbit_radius_factor: f64,
    pub(crate) orbit_period_days: f64,
}

impl Planet {
    pub(crate) fn is_earth(&self) -> bool {
        self.name == EARTH
    }
}

/// Named open polyline of (ra hours, dec degrees) vertices.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ConstellationPath {
    pub(crate) name: String,
    pub(crate) vertices: Vec<(f64, f64)>,
}

/// Everything drawn on the sky. Built once, read-only afterwards.
#[derive(Clone, Debug)]
pub(crate) struct Catalog {
    pub(crate) stars: Vec<Star>,
    pub(crate) planets: Vec<Planet>,
    pub(crate) constellations: Vec<ConstellationPath>,
}

impl Catalog {
    /// Built-in tables plus `background` random stars drawn from `seed`.
    pub(crate) fn builtin(seed: u64, background: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            stars: build_stars(&mut rng, background),
            planets: build_planets(),
            constellations: build_constellations(),
        }
    }
}

fn star(name: &str, ra: f64, dec: f64, magnitude: f64, color: Rgb) -> Star {
    Star { name: name.to_string(), ra, dec, magnitude, color }
}

fn build_stars(rng: &mut StdRng, background: usize) -> Vec<Star> {
    let mut stars = vec![
        star("Sun", 0.0, 0.0, -26.74, YELLOW),
        star("Sirius", 6.75, -16.72, -1.46, WHITE),
        star("Vega", 18.62, 38.78, 0.03, WHITE),
        star("Arcturus", 14.26, 19.18, -0.05, Rgb::new(255, 165, 0)),
        star("Betelgeuse", 5.92, 7.41, 0.42, RED),
    ];
    stars.reserve(background);
    for i in 0..background {
        stars.push(Star {
            name: format!("Star_{i}"),
            ra: rng.gen_range(0.0..24.0),
            dec: rng.gen_range(-90.0..90.0),
            magnitude: rng.gen_range(1.5..6.0),
            color: BACKGROUND_COLORS[rng.gen_range(0..BACKGROUND_COLORS.len())],
        });
    }
    stars
}

fn build_planets() -> Vec<Planet> {
    let planet = |name: &str, magnitude: f64, color: Rgb, size: f64, orbit_r: f64, period: f64| Planet {
        name: name.to_string(),
        ra: 0.0,
        dec: 0.0,
        magnitude,
        color,
        display_size: size,
        orbit_radius_factor: orbit_r,
        orbit_period_days: period,
    };
    vec![
        planet("Mercury", -0.4, Rgb::new(200, 200, 200), 3.0, 0.4, 88.0),
        planet("Venus", -4.6, Rgb::new(255, 255, 200), 5.0, 0.7, 225.0),
        planet(EARTH, -3.9, BLUE, 6.0, 1.0, 365.0),
        planet("Mars", -2.0, RED, 4.0, 1.5, 687.0),
        planet("Jupiter", -2.7, Rgb::new(255, 215, 150), 8.0, 5.2, 4333.0),
        planet("Saturn", -0.2, Rgb::new(210, 180, 140), 7.0, 9.5, 10759.0),
    ]
}

fn build_constellations() -> Vec<ConstellationPath> {
    let path = |name: &str, vertices: &[(f64, f64)]| ConstellationPath {
        name: name.to_string(),
        vertices: vertices.to_vec(),
    };
    vec![
        path(
            "Ursa Major",
            &[(11.03, 61.75), (11.90, 53.69), (12.26, 57.03), (12.90, 55.96), (13.79, 49.31), (14.18, 51.68)],
        ),
        path("Orion", &[(5.24, -8.20), (5.92, 7.41), (5.68, -1.94), (5.53, -5.91), (6.13, 9.65)]),
        path("Cassiopeia", &[(0.15, 59.15), (0.68, 56.54), (0.95, 60.72), (1.43, 60.24), (1.91, 63.67)]),
        path("Cygnus", &[(20.69, 45.28), (20.37, 40.26), (19.51, 27.96)]),
    ]
}
