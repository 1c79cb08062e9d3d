use criterion::{criterion_group, criterion_main, BatchSize, Criterion, black_box};

use cranesim::crane::config::LoadConfig;
use cranesim::crane::{CraneConfig, CraneSim};
use cranesim::scene::Shape;

use glam::Vec3;
use winit::keyboard::KeyCode;

const FRAME: f32 = 1.0 / 60.0;

/// Default scene with a cube right below the parked claw.
fn config() -> CraneConfig {
    let mut config = CraneConfig::default();
    config.loads.insert(
        0,
        LoadConfig {
            name: "bench_cube".to_string(),
            shape: Shape::cube(8.0),
            position: Vec3::new(15.0, 4.0, 0.0),
            rotation: Vec3::ZERO,
            radius: None,
            color: 0x64731e,
        },
    );
    config
}

/// Lower the claw until the cube latches.
fn latched_sim() -> CraneSim {
    let mut sim = CraneSim::new(config()).expect("valid bench config");
    sim.key_down(KeyCode::KeyD);
    while !sim.is_latched() {
        sim.update(FRAME);
    }
    sim.key_up(KeyCode::KeyD);
    sim
}

fn bench_pick_and_place_cycle(c: &mut Criterion) {
    c.bench_function("pick_and_place_cycle", |b| {
        b.iter_batched(
            latched_sim,
            |mut sim| {
                while sim.is_latched() {
                    sim.update(black_box(FRAME));
                }
                sim
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_manual_update(c: &mut Criterion) {
    let mut sim = CraneSim::new(CraneConfig::default()).expect("valid default config");
    sim.key_down(KeyCode::KeyQ);

    c.bench_function("manual_update", |b| {
        b.iter(|| sim.update(black_box(FRAME)));
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut sim = CraneSim::new(CraneConfig::default()).expect("valid default config");

    c.bench_function("frame_draw_list", |b| {
        b.iter(|| black_box(sim.frame()));
    });
}

criterion_group!(benches, bench_pick_and_place_cycle, bench_manual_update, bench_frame);
criterion_main!(benches);
