//! Command-line interface for the golf flight engine

fn main() {
    println!("Golf Flight Engine v0.1.0");
    println!();
    println!("This is a golf ball flight physics engine.");
    println!("The library integrates ball trajectories through layered atmosphere,");
    println!("height-dependent wind, and spin-driven aerodynamics.");
    println!();
    println!("For the full command-line tool, run:");
    println!("  golf-cli trajectory --speed 73.152 --angle 10.5 --spin 2700");
    println!();
    println!("To use as a Rust library:");
    println!("  Add to Cargo.toml: golf-flight-engine = \"0.1\"");
}
