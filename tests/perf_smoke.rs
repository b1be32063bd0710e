use rigid2d_engine::WorldCore;

#[test]
fn perf_smoke_step() {
    let mut world = WorldCore::new();
    world.enable_perf_metrics(true);
    world.spawn_static_box(0.0, 100.0, 200.0, 10.0);
    for i in 0..64 {
        let x = (i % 8) as f32 * 12.0;
        let y = (i / 8) as f32 * 12.0;
        world.spawn_box(x, y, 10.0, 10.0, 1.0).unwrap();
    }
    world.step(&[], 1.0 / 60.0).unwrap();
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.bodies(), 65);
}
