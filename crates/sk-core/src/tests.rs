//! Unit tests for sk-core primitives.

#[cfg(test)]
mod ids {
    use crate::{TrajectoryId, UnitId};

    #[test]
    fn index_roundtrip() {
        let id = UnitId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(UnitId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(UnitId(0) < UnitId(1));
        assert!(TrajectoryId(100) > TrajectoryId(99));
    }

    #[test]
    fn display() {
        assert_eq!(UnitId(7).to_string(), "UnitId(7)");
        assert_eq!(TrajectoryId(3).to_string(), "TrajectoryId(3)");
    }
}

#[cfg(test)]
mod geo {
    use std::f32::consts::FRAC_PI_2;

    use crate::{Placement, Vec2};

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn identity_heading_translates_only() {
        let p = Placement::at(Vec2::new(3.0, 4.0));
        assert!(close(p.to_world(Vec2::new(1.0, 0.0)), Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn quarter_turn_rotates_offset() {
        let p = Placement::new(Vec2::ZERO, FRAC_PI_2);
        // +X offset ends up pointing along +Y.
        assert!(close(p.to_world(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn face_points_heading_at_target() {
        let mut p = Placement::at(Vec2::ZERO);
        p.face(Vec2::new(0.0, 5.0));
        assert!((p.heading - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn face_self_keeps_heading() {
        let mut p = Placement::new(Vec2::new(1.0, 1.0), 0.5);
        p.face(Vec2::new(1.0, 1.0));
        assert_eq!(p.heading, 0.5);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, SkError, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(3));
        assert!((clock.elapsed_secs() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.25);
        assert_eq!(clock.ticks_for_secs(1.0), 4);
        assert_eq!(clock.ticks_for_secs(1.1), 5);
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.end_tick(), Tick(cfg.total_ticks));
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let cfg = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(SkError::Config(_))));
    }

    #[test]
    fn negative_arrival_radius_rejected() {
        let mut cfg = SimConfig::default();
        cfg.nav.arrival_radius = -1.0;
        assert!(matches!(cfg.validate(), Err(SkError::Config(_))));
    }

    #[test]
    fn nan_approach_speed_rejected() {
        let mut cfg = SimConfig::default();
        cfg.approach.speed = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}
