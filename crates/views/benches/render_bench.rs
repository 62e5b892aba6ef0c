use common::Entity;
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Map, Value, json};
use views::{BookRows, BorrowingRows, Capabilities, RenderModel, ReportTable};

fn books(n: usize) -> Vec<Entity> {
    (0..n)
        .map(|i| {
            let fields: Map<String, Value> = serde_json::from_value(json!({
                "book_id": i,
                "title": format!("Book {i}"),
                "author": "Anonymous",
                "isbn": format!("978{i:010}"),
                "category_name": "Fiction",
                "available_copies": i % 3,
                "total_copies": 3
            }))
            .unwrap();
            Entity::from_fields(fields, "book_id").unwrap()
        })
        .collect()
}

fn borrowings(n: usize) -> Vec<Entity> {
    (0..n)
        .map(|i| {
            let returned = i % 2 == 1;
            let return_date = if returned { json!("2024-01-10") } else { Value::Null };
            let status = if returned { "returned" } else { "borrowed" };
            let fields: Map<String, Value> = serde_json::from_value(json!({
                "borrowing_id": i,
                "book": {"title": format!("Book {i}")},
                "borrow_date": "2024-01-02T10:00:00",
                "due_date": "2024-01-16T10:00:00",
                "return_date": return_date,
                "status": status
            }))
            .unwrap();
            Entity::from_fields(fields, "borrowing_id").unwrap()
        })
        .collect()
}

fn bench_render_100_books(c: &mut Criterion) {
    let entities = books(100);
    let caps = Capabilities::all();
    let model = BookRows::new();

    c.bench_function("views/render_100_books", |b| {
        b.iter(|| model.render(&entities, &caps));
    });
}

fn bench_render_1000_books(c: &mut Criterion) {
    let entities = books(1000);
    let caps = Capabilities::all();
    let model = BookRows::new();

    c.bench_function("views/render_1000_books", |b| {
        b.iter(|| model.render(&entities, &caps));
    });
}

fn bench_render_1000_borrowings(c: &mut Criterion) {
    let entities = borrowings(1000);
    let caps = Capabilities::none();
    let model = BorrowingRows::new();

    c.bench_function("views/render_1000_borrowings", |b| {
        b.iter(|| model.render(&entities, &caps));
    });
}

fn bench_report_table(c: &mut Criterion) {
    let records: Vec<Map<String, Value>> = (0..500)
        .map(|i| {
            let late = i % 7 == 0;
            serde_json::from_value(json!({"title": format!("Book {i}"), "loans": i, "late": late}))
                .unwrap()
        })
        .collect();

    c.bench_function("views/report_table_500_rows", |b| {
        b.iter(|| ReportTable::from_records(&records));
    });
}

criterion_group!(
    benches,
    bench_render_100_books,
    bench_render_1000_books,
    bench_render_1000_borrowings,
    bench_report_table,
);
criterion_main!(benches);
