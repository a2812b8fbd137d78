use crate::error::Result;
use crate::taxonomy::default_tree;

pub fn run() -> Result<()> {
    let paths = default_tree().flatten();
    println!("Category taxonomy ({} leaves)", paths.len());
    for path in paths {
        println!("  {path}");
    }
    Ok(())
}
