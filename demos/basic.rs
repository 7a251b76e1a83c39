use num_complex::Complex64;
use special_waves::*;

fn main() {
    // RUST_LOG=debug shows regime fallbacks
    env_logger::init();

    // -- Elementary functions --
    println!("=== Elementary functions ===");
    let cl = clausen(std::f64::consts::FRAC_PI_2).unwrap();
    println!("Cl2(pi/2) = {cl}  (Catalan's constant)");

    let d3 = debye(3, 5.0).unwrap();
    println!("D_3(5) = {d3}");

    let h = struve(1.0, 2.5).unwrap();
    println!("H_1(2.5) = {h}");

    // -- Fresnel integrals, two paths --
    println!("\n=== Fresnel integrals ===");
    for x in [0.5, 2.0, 10.0] {
        let s = fresnel_s_integral(x).unwrap();
        let c = fresnel_c_integral(x).unwrap();
        println!("S({x}) = {s:.16}  erf path {:.16}", fresnel_s_erf(x));
        println!("C({x}) = {c:.16}  erf path {:.16}", fresnel_c_erf(x));
    }
    println!("S_pi(1) = {}", fresnel_s_pi(1.0).unwrap());

    // -- Hypergeometric functions --
    println!("\n=== Hypergeometric functions ===");
    let z = Complex64::new(3.0, -1.0);
    let f01 = hyp0f1(1.5, z).unwrap();
    println!("0F1(;1.5;{z}) = {f01}");

    let m = hyp1f1(Complex64::new(1.0, 1.0), 2.5, z).unwrap();
    println!("1F1(1+i;2.5;{z}) = {m}");

    let u = hyp_u(0.7, 2.0, z).unwrap();
    println!("U(0.7,2,{z}) = {u}");

    // -- Coulomb wave functions across regimes --
    println!("\n=== Coulomb wave functions, l = 0, eta = 1 ===");
    for rho in [1e-20, 2.0, 50.0] {
        let regime = classify(0, 1.0, rho, Config::default().tol);
        let (f, g) = coulomb_fg(0, 1.0, rho).unwrap();
        println!("rho = {rho:e} ({regime:?}): F = {f:e}, G = {g:e}");
    }
    println!("C_0(1) = {}", coulomb_normalization(0, 1.0));
    println!("sigma_0(1) = {}", coulomb_phase_shift(0, 1.0));

    // -- Configuration and errors --
    println!("\n=== Configuration ===");
    let cfg = Config::default().with_tol(1e-8).with_wronskian_check(true);
    let g2 = irregular_coulomb_with(2, 0.5, 3.0, &cfg).unwrap();
    println!("G_2(0.5, 3) at tol 1e-8 = {g2}");

    match hyp0f1(-2.0, z) {
        Ok(v) => println!("0F1(;-2;z) = {v}"),
        Err(e) => println!("0F1(;-2;z): {e}"),
    }

    // every representation cancels here; looser tolerances accept the result
    match coulomb_fg(0, 50.0, 80.0) {
        Ok((f, g)) => println!("F_0(50, 80) = {f:e}, G_0(50, 80) = {g:e}"),
        Err(e) => println!("F_0(50, 80): {e}"),
    }
    match debye(0, 1.0) {
        Ok(v) => println!("D_0(1) = {v}"),
        Err(e) => println!("D_0(1): {e}"),
    }
}
