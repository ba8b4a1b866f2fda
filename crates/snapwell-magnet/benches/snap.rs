use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use snapwell_core::Pose;
use snapwell_magnet::{
    AttractedAxis, AttractorAxis, AttractorSettings, MagnetSnapSolver, MovePolicy, SnapRequest,
};

fn bench_solve(c: &mut Criterion) {
    let solver = MagnetSnapSolver::default();
    let root = Pose::new(Vec3::new(0.2, 1.0, -0.4), Quat::from_rotation_y(0.3));
    let magnet = root * Pose::from_position(Vec3::new(0.0, -0.05, 0.0));
    let attractor = Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_x(0.1));

    let request = SnapRequest::new(
        magnet,
        attractor,
        AttractedAxis::Y,
        AttractorSettings::with_axis(AttractorAxis::AnyY)
            .move_policy(MovePolicy::ProjectOntoAlignmentPlane),
    )
    .with_assembly_root(root)
    .with_progress(0.5);

    c.bench_function("magnet_solve", |b| {
        b.iter(|| solver.solve(black_box(&request)))
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
