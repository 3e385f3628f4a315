use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use yamb_env::core::EnvConfig;
use yamb_env::env::YambEnv;
use yamb_env::nn::{FlatEncoder, MaskedRandomPolicy, ObservationEncoder, Policy};

/// Snapshot environments at evenly spaced points of one masked game.
fn gen_states(n: usize) -> Vec<YambEnv> {
    let mut env = YambEnv::new(EnvConfig::new().with_seed(0xA5A5));
    let mut policy = MaskedRandomPolicy::new(7);
    let mut out = Vec::with_capacity(n);

    env.reset(None);
    while out.len() < n {
        if env.is_done() {
            env.reset(None);
        }
        out.push(env.clone());
        let obs = env.observation();
        env.step(&policy.act(&obs, &env.legal_action_mask()));
    }
    out
}

fn bench_legal_action_mask(c: &mut Criterion) {
    let mut g = c.benchmark_group("yamb_legal");
    for &n in &[168usize, 4096usize] {
        let states = gen_states(n);
        g.bench_with_input(BenchmarkId::new("legal_action_mask_batch", n), &states, |b, s| {
            b.iter(|| {
                for env in s.iter() {
                    black_box(env.legal_action_mask());
                }
            })
        });
    }
    g.finish();
}

fn bench_episode(c: &mut Criterion) {
    c.bench_function("masked_random_episode", |b| {
        let mut env = YambEnv::new(EnvConfig::new().with_seed(1));
        let mut policy = MaskedRandomPolicy::new(1);
        b.iter(|| {
            let mut obs = env.reset(None);
            while !env.is_done() {
                let result = env.step(&policy.act(&obs, &env.legal_action_mask()));
                obs = result.observation;
            }
            black_box(env.score())
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    let states = gen_states(168);
    let encoder = FlatEncoder::new();
    c.bench_function("flat_encode_game", |b| {
        b.iter(|| {
            for env in &states {
                black_box(encoder.encode(&env.observation()));
            }
        })
    });
}

criterion_group!(benches, bench_legal_action_mask, bench_episode, bench_encode);
criterion_main!(benches);
