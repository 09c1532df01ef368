//! Geometric behaviour of the orbit update over many ticks

use orrery::config::default_planets;
use orrery::orbit::{Orrery, SPIN_PER_TICK};

fn run(orrery: &mut Orrery, ticks: usize) {
    for _ in 0..ticks {
        orrery.tick();
    }
}

#[test]
fn orbits_keep_constant_radius_and_stay_flat() {
    let mut orrery = Orrery::new(&default_planets(), 1.0);
    for _ in 0..2_000 {
        orrery.tick();
        for body in orrery.bodies() {
            let r2 = body.position.x * body.position.x + body.position.z * body.position.z;
            let d2 = body.distance * body.distance;
            assert!((r2 - d2).abs() <= 1e-4 * d2.max(1.0), "{} drifted", body.name);
            assert_eq!(body.position.y, 0.0);
        }
    }
}

#[test]
fn angle_delta_matches_base_speed_times_factor() {
    for factor in [0.5f32, 1.0, 3.0, -2.0] {
        let mut orrery = Orrery::new(&default_planets(), 1.0);
        run(&mut orrery, 17);
        orrery.set_speed_factor(factor);

        let before: Vec<f32> = orrery.bodies().iter().map(|b| b.angle).collect();
        orrery.tick();
        for (body, start) in orrery.bodies().iter().zip(before) {
            let delta = body.angle - start;
            assert!(
                (delta - body.base_speed * factor).abs() < 1e-6,
                "{} at factor {}: delta {}",
                body.name,
                factor,
                delta
            );
        }
    }
}

#[test]
fn zero_factor_freezes_positions() {
    let mut orrery = Orrery::new(&default_planets(), 1.0);
    run(&mut orrery, 50);
    orrery.set_speed_factor(0.0);

    let frozen: Vec<_> = orrery.bodies().iter().map(|b| (b.angle, b.position)).collect();
    run(&mut orrery, 100);
    let later: Vec<_> = orrery.bodies().iter().map(|b| (b.angle, b.position)).collect();
    assert_eq!(frozen, later);

    // Self-rotation keeps going while the orbits are halted
    assert!((orrery.bodies()[0].spin - 150.0 * SPIN_PER_TICK).abs() < 1e-4);
}

#[test]
fn negative_factor_reverses_direction() {
    let mut orrery = Orrery::new(&default_planets(), 1.0);
    run(&mut orrery, 10);
    let forward: Vec<f32> = orrery.bodies().iter().map(|b| b.angle).collect();

    orrery.set_speed_factor(-1.0);
    run(&mut orrery, 10);
    for (body, peak) in orrery.bodies().iter().zip(&forward) {
        assert!(body.angle < *peak);
        assert!(body.angle.abs() < 1e-5, "{} did not return to start", body.name);
    }
}

#[test]
fn angles_accumulate_without_wrapping() {
    let mut orrery = Orrery::new(&default_planets(), 5.0);
    run(&mut orrery, 200);
    let mercury = orrery.find_body("Mercury").unwrap();
    assert!(mercury.angle > std::f32::consts::TAU);
}
