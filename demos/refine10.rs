#![allow(non_snake_case)]

// Solves the classic 10x10 demonstration system on each available
// backend and prints the per-iteration residual table.  The right hand
// side is the row sums of A, so the exact solution is all ones.

use lurefine::{algebra::*, solver::*};

fn build_system() -> (Matrix<f64>, Vec<f64>) {
    let A = Matrix::<f64>::from(&[
        [1., 4., 0., -9., 1., 10., -2., -1., 2., -6.],
        [9., 8., 3., 2., 2., 10., -7., 1., 10., -4.],
        [3., -6., -5., -5., 6., 3., -3., 9., 8., 1.],
        [-7., 5., -5., 8., 9., 0., -5., -1., 5., 3.],
        [-1., -9., -2., 3., -7., 8., 4., -6., -8., 20.],
        [8., 8., -5., 4., 7., 1., 2., -9., -5., 9.],
        [3., -7., 6., 3., -7., -9., 1., -1., 1., 7.],
        [-5., -3., 0., 0., 8., 0., 3., 9., 0., 5.],
        [-5., 10., -5., -5., 7., 7., -4., 4., 3., 7.],
        [-3., 9., 2., -1., -1., -6., -7., -8., -3., 0.],
    ]);

    let n = A.nrows();
    let mut b = vec![0.0; n];
    for (i, bi) in b.iter_mut().enumerate() {
        for j in 0..n {
            *bi += A[(i, j)];
        }
    }
    (A, b)
}

fn run<B: DenseBackend<f64>>(name: &str, backend: B) {
    let (A, b) = build_system();

    let engine = RefinementEngine::new(backend, RefinementSettings::default());

    // seed x with b, a deliberately rough first guess
    let mut x = b.clone();

    println!("--- refinement on {} backend ---", name);
    match engine.solve(&A, &b, &mut x) {
        Ok(trace) => {
            print!("{}", trace);
            println!("x (first 3): {:.15} {:.15} {:.15}\n", x[0], x[1], x[2]);
        }
        Err(e) => println!("solve failed: {}\n", e),
    }
}

fn main() {
    run("host", HostBackend::new());

    #[cfg(feature = "accelerator")]
    {
        run("device", DeviceBackend::new());
        run("hybrid", HybridBackend::new());
    }
}
