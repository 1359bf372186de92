use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array1;

use aerocore::prelude::*;

fn benchmark_kernel_curve(c: &mut Criterion) {
    let gas = GasState {
        w_molar: 28.9596,
        pressure: 1e5,
        temperature: 293.15,
        mu: 1.789e-5,
        rho_l: 1e3,
    };
    let constants = Constants::default();

    let lambda = mean_free_path(&gas, &constants).unwrap();
    let k = continuum_prefactor(&gas, &constants).unwrap();
    let kt = free_molecular_prefactor(&gas, &constants).unwrap();

    let continuum = RegimeSpec::continuum(k, 1.591, lambda).unwrap();
    let free_molecular = RegimeSpec::free_molecular(kt, 0.9).unwrap();

    for size in [1024, 16_384] {
        let kns = Array1::logspace(10.0, -4.0, 4.0, size);

        c.bench_function(&format!("kernel_curve_{}", size), |b| {
            b.iter(|| {
                let _ = kernel_curve(
                    black_box(&kns),
                    black_box(&continuum),
                    black_box(&free_molecular),
                    black_box(lambda),
                    BlendMode::Harmonic,
                );
            });
        });
    }
}

criterion_group!(benches, benchmark_kernel_curve);
criterion_main!(benches);
