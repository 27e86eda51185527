fn main() -> anyhow::Result<()> {
    println!("Wireframe Cube");
    println!("Controls:");
    println!("  WASD - Move camera");
    println!("  Q/E - Move up/down");
    println!("  Arrow keys - Turn and look up/down");
    println!("  Escape - Exit");
    println!();

    wirecube::run()
}
