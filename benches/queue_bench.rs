//! Benchmarks for the upload pipeline.
//!
//! Benchmarks cover:
//! - Bounded queue push/pop
//! - Worker pool submit-and-wait round trips
//! - Storage executor writing in-memory uploads to a temp directory

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Runtime;

use upload_pool::config::WorkerPoolConfig;
use upload_pool::core::queue::bounded;
use upload_pool::core::{JobMetadata, WorkerExecutor, WorkerPool};
use upload_pool::infra::storage::FsStorage;
use upload_pool::upload::{MemorySource, UploadService};

// ============================================================================
// Executor
// ============================================================================

#[derive(Clone)]
struct EchoExecutor;

#[async_trait]
impl WorkerExecutor<u64, u64> for EchoExecutor {
    async fn execute(&self, payload: u64, _meta: JobMetadata) -> u64 {
        payload
    }
}

// ============================================================================
// Queue Benchmarks
// ============================================================================

fn bench_queue_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_push_pop");

    for size in [10_usize, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let (producer, consumer) = bounded(size);
                for i in 0..size {
                    producer.try_push(i).unwrap();
                }
                drop(producer);
                while let Some(item) = consumer.pop() {
                    black_box(item);
                }
            });
        });
    }

    group.finish();
}

fn bench_queue_reject_when_full(c: &mut Criterion) {
    let (producer, _consumer) = bounded(1);
    producer.try_push(0_u64).unwrap();

    c.bench_function("queue_reject_when_full", |b| {
        b.iter(|| black_box(producer.try_push(black_box(1)).is_err()));
    });
}

// ============================================================================
// Pool Benchmarks
// ============================================================================

fn bench_pool_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_round_trip");

    for workers in [1_usize, 4] {
        let config = WorkerPoolConfig::new()
            .with_worker_count(workers)
            .with_max_queue_depth(1024);
        let pool = WorkerPool::new(config, EchoExecutor).unwrap();

        group.throughput(Throughput::Elements(100));
        group.bench_with_input(BenchmarkId::from_parameter(workers), &pool, |b, pool| {
            b.to_async(Runtime::new().unwrap()).iter(|| async {
                let handles: Vec<_> = (0..100).map(|i| pool.submit(i).unwrap()).collect();
                for handle in handles {
                    black_box(handle.wait().await.unwrap());
                }
            });
        });

        pool.shutdown();
    }

    group.finish();
}

fn bench_upload_to_disk(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FsStorage::new(dir.path()).unwrap());
    let service = UploadService::start(storage, WorkerPoolConfig::new()).unwrap();
    let payload: Arc<[u8]> = vec![0x5a_u8; 64 * 1024].into();

    let mut group = c.benchmark_group("upload_to_disk");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("64k", |b| {
        b.to_async(Runtime::new().unwrap()).iter(|| async {
            let outcome = service
                .submit("bench.bin", MemorySource::new(Arc::clone(&payload)))
                .unwrap()
                .wait()
                .await
                .unwrap();
            black_box(outcome);
        });
    });
    group.finish();

    service.shutdown();
}

criterion_group!(queue_benches, bench_queue_push_pop, bench_queue_reject_when_full);

criterion_group!(pool_benches, bench_pool_round_trip, bench_upload_to_disk);

criterion_main!(queue_benches, pool_benches);
