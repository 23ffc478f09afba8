use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tilesnap::platform::{SimulatedWindow, SimulatedWindowSystem, StatusFeed};
use tilesnap::{
    ActionTable, BorderInsets, Key, ModifierKey, Rect, SliceScheme, TileAction, TileResolver,
    TilingController,
};

fn benchmark_resolve(c: &mut Criterion) {
    let work_area = Rect::new(-2560, 40, 0, 1440);
    let action = TileAction::cell(SliceScheme::Fourth, 3, 1);

    c.bench_function("resolve_quarter", |b| {
        b.iter(|| TileResolver::resolve(black_box(work_area), black_box(&action)))
    });
}

fn benchmark_window_positioning(c: &mut Criterion) {
    let windows = Arc::new(SimulatedWindowSystem::new(vec![Rect::new(0, 0, 1920, 1080)]));
    windows.open_window(SimulatedWindow::new(
        "Bench",
        Rect::new(293, 200, 1107, 807),
        BorderInsets::new(7, 0, 7, 7),
    ));
    let table = match ActionTable::with_defaults() {
        Ok(table) => table,
        Err(e) => panic!("default bindings are invalid: {}", e),
    };
    let mut controller = TilingController::new(table, windows, Arc::new(StatusFeed::default()));
    let hyper = [ModifierKey::Control, ModifierKey::Alt, ModifierKey::Shift];

    c.bench_function("window_positioning", |b| {
        b.iter(|| controller.handle_hotkey(black_box(&hyper), black_box(Key::Letter('G'))))
    });
}

criterion_group!(benches, benchmark_resolve, benchmark_window_positioning);
criterion_main!(benches);
