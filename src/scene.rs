use crate::sky::SkyPoint;

/// Per-session view flags and simulated time. Nothing here is saved.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SceneState {
    pub(crate) time_offset_hours: f64,
    pub(crate) show_constellations: bool,
    pub(crate) show_planets: bool,
    pub(crate) show_grid: bool,
    /// Earth's sky-plane position from the last frame that drew planets.
    pub(crate) earth: Option<SkyPoint>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            time_offset_hours: 0.0,
            show_constellations: true,
            show_planets: true,
            show_grid: true,
            earth: None,
        }
    }
}

impl SceneState {
    pub(crate) fn step_time(&mut self, hours: f64) {
        self.time_offset_hours += hours;
    }

    pub(crate) fn toggle_constellations(&mut self) {
        self.show_constellations = !self.show_constellations;
    }

    pub(crate) fn toggle_planets(&mut self) {
        self.show_planets = !self.show_planets;
    }

    pub(crate) fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_restores_flags() {
        for start in [true, false] {
            let mut s = SceneState {
                show_constellations: start,
                show_planets: !start,
                show_grid: start,
                ..SceneState::default()
            };
            let before = s.clone();
            s.toggle_grid();
            s.toggle_planets();
            s.toggle_constellations();
            assert_ne!(s, before);
            s.toggle_constellations();
            s.toggle_planets();
            s.toggle_grid();
            assert_eq!(s, before);
        }
    }

    #[test]
    fn test_time_offset_is_unbounded() {
        let mut s = SceneState::default();
        for _ in 0..30 {
            s.step_time(1.0);
        }
        s.step_time(-1.0);
        assert_eq!(s.time_offset_hours, 29.0);
        for _ in 0..100 {
            s.step_time(-1.0);
        }
        assert_eq!(s.time_offset_hours, -71.0);
    }
}
