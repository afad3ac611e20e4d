use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use uniformdesk_core::{SchoolId, StudentId};
use uniformdesk_infra::IssuanceService;
use uniformdesk_infra::store::{
    InMemoryInventoryStore, InMemoryIssuanceLog, InMemoryStudentRegistry, InventoryStore,
};
use uniformdesk_inventory::{IssueUniform, NewInventoryItem};

const SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL", "3XL", "4XL"];

fn stocked_service(
    lines: usize,
) -> IssuanceService<Arc<InMemoryInventoryStore>, Arc<InMemoryIssuanceLog>, Arc<InMemoryStudentRegistry>>
{
    let inventory = Arc::new(InMemoryInventoryStore::new());
    let school: SchoolId = "SCH001".parse().unwrap();
    for size in &SIZES[..lines] {
        inventory
            .insert_item(NewInventoryItem {
                school_id: school.clone(),
                item_type: "Shirt".to_string(),
                size: size.to_string(),
                quantity: u32::MAX / 2,
                low_stock_threshold: 5,
            })
            .unwrap();
    }
    IssuanceService::new(
        inventory,
        Arc::new(InMemoryIssuanceLog::new()),
        Arc::new(InMemoryStudentRegistry::new()),
    )
}

/// Four threads issuing concurrently, spread over `lines` stock rows.
/// One line means every issuance contends on the same row lock.
fn bench_contended_issuance(c: &mut Criterion) {
    let mut group = c.benchmark_group("issuance_contention");
    let per_thread = 250u64;
    let threads = 4u64;
    group.throughput(Throughput::Elements(per_thread * threads));

    for lines in [1usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let service = stocked_service(lines);
            let school: SchoolId = "SCH001".parse().unwrap();
            b.iter(|| {
                std::thread::scope(|s| {
                    for t in 0..threads as usize {
                        let service = &service;
                        let school = school.clone();
                        s.spawn(move || {
                            for i in 0..per_thread as usize {
                                let size = SIZES[(t + i) % lines];
                                let cmd = IssueUniform::new(
                                    StudentId::new(),
                                    school.clone(),
                                    "Shirt",
                                    size,
                                    1,
                                    "bench",
                                )
                                .unwrap();
                                black_box(service.issue_uniform(cmd).unwrap());
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_contended_issuance);
criterion_main!(benches);
